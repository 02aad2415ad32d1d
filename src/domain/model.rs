use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Upper bound, in bytes, for category and option names.
pub const MAX_NAME_LEN: usize = 255;

/// A named, priced line item within a category. Prices are whole currency units.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogOption {
    pub name: String,
    pub price: u64,
}

impl CatalogOption {
    pub fn new(name: impl Into<String>, price: u64) -> Self {
        Self {
            name: name.into(),
            price,
        }
    }
}

/// A named group of options. The option index is the 0-based selector shown to the operator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub name: String,
    pub options: Vec<CatalogOption>,
}

impl Category {
    pub fn new(name: impl Into<String>, options: Vec<CatalogOption>) -> Self {
        Self {
            name: name.into(),
            options,
        }
    }

    /// Inclusive selection bounds, `None` for a category without options.
    pub fn bounds(&self) -> Option<(usize, usize)> {
        if self.options.is_empty() {
            None
        } else {
            Some((0, self.options.len() - 1))
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Partition {
    Essential,
    Extra,
}

impl Partition {
    pub const ALL: [Partition; 2] = [Partition::Essential, Partition::Extra];

    pub fn title(&self) -> &'static str {
        match self {
            Partition::Essential => "Essential Categories",
            Partition::Extra => "Extra Categories",
        }
    }

    pub fn key(&self) -> &'static str {
        match self {
            Partition::Essential => "essential",
            Partition::Extra => "extra",
        }
    }
}

impl fmt::Display for Partition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// The two-tier catalog. Built once by the loader and only read afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    pub essential: Vec<Category>,
    pub extra: Vec<Category>,
}

impl Catalog {
    pub fn partition(&self, partition: Partition) -> &[Category] {
        match partition {
            Partition::Essential => &self.essential,
            Partition::Extra => &self.extra,
        }
    }

    pub fn option_count(&self) -> usize {
        self.essential
            .iter()
            .chain(self.extra.iter())
            .map(|c| c.options.len())
            .sum()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OfferLine {
    pub category: String,
    pub partition: Partition,
    pub option_name: String,
    pub price: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Offer {
    pub customer_type: String,
    pub created_at: DateTime<Local>,
    pub lines: Vec<OfferLine>,
    pub total: u64,
}

/// Column layout for fixed-width listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplaySettings {
    pub currency: String,
    pub name_width: usize,
    pub price_width: usize,
    pub clear_screen: bool,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            currency: "EUR".to_string(),
            name_width: 12,
            price_width: 5,
            clear_screen: true,
        }
    }
}
