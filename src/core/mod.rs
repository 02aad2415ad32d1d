pub mod console;
pub mod loader;
pub mod offer;
pub mod render;
pub mod selection;
pub mod shell;

pub use crate::domain::model::{Catalog, CatalogOption, Category, Offer, OfferLine, Partition};
pub use crate::domain::ports::{ConfigProvider, Storage, Terminal};
pub use crate::utils::error::Result;
