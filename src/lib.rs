pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use config::{cli::LocalStorage, AppConfig};

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use crate::core::{
    console::Console,
    loader::{load_catalog, load_catalog_from_path},
    selection::SelectionEngine,
    shell::{Shell, ShellSettings},
};
pub use domain::model::{Catalog, CatalogOption, Category, DisplaySettings, Partition};
pub use utils::error::{OfferError, Result};
