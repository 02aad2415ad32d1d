use crate::core::render::render_offer;
use crate::domain::model::{Category, DisplaySettings, Offer, OfferLine, Partition};
use crate::domain::ports::Storage;
use crate::utils::error::{OfferError, Result};
use chrono::{DateTime, Local};
use std::fmt;
use std::str::FromStr;

/// Collects (category, chosen option) pairs into a priced `Offer`.
#[derive(Debug, Clone)]
pub struct OfferBuilder {
    customer_type: String,
    lines: Vec<OfferLine>,
}

impl OfferBuilder {
    pub fn new(customer_type: impl Into<String>) -> Self {
        Self {
            customer_type: customer_type.into(),
            lines: Vec::new(),
        }
    }

    pub fn add(&mut self, partition: Partition, category: &Category, index: usize) -> Result<()> {
        let option = category
            .options
            .get(index)
            .ok_or_else(|| OfferError::Processing {
                message: format!(
                    "option {} does not exist in category '{}' ({} options)",
                    index,
                    category.name,
                    category.options.len()
                ),
            })?;

        self.lines.push(OfferLine {
            category: category.name.clone(),
            partition,
            option_name: option.name.clone(),
            price: option.price,
        });
        Ok(())
    }

    pub fn lines(&self) -> &[OfferLine] {
        &self.lines
    }

    pub fn build(self) -> Result<Offer> {
        self.build_at(Local::now())
    }

    pub fn build_at(self, created_at: DateTime<Local>) -> Result<Offer> {
        let total = offer_total(&self.lines)?;
        Ok(Offer {
            customer_type: self.customer_type,
            created_at,
            lines: self.lines,
            total,
        })
    }
}

pub fn offer_total(lines: &[OfferLine]) -> Result<u64> {
    lines.iter().try_fold(0u64, |acc, line| {
        acc.checked_add(line.price).ok_or_else(|| OfferError::Processing {
            message: "offer total exceeds the representable price range".to_string(),
        })
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Txt,
    Csv,
    Json,
}

impl ExportFormat {
    pub const NAMES: [&'static str; 3] = ["txt", "csv", "json"];

    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Txt => "txt",
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for ExportFormat {
    type Err = OfferError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "txt" => Ok(ExportFormat::Txt),
            "csv" => Ok(ExportFormat::Csv),
            "json" => Ok(ExportFormat::Json),
            other => Err(OfferError::InvalidConfigValue {
                field: "offer.formats".to_string(),
                value: other.to_string(),
                reason: format!("Unsupported format. Valid formats: {}", Self::NAMES.join(", ")),
            }),
        }
    }
}

pub fn export_offer(offer: &Offer, format: ExportFormat, display: &DisplaySettings) -> Result<Vec<u8>> {
    match format {
        ExportFormat::Txt => Ok(render_offer(offer, display).into_bytes()),
        ExportFormat::Json => Ok(serde_json::to_vec_pretty(offer)?),
        ExportFormat::Csv => {
            let mut writer = csv::Writer::from_writer(Vec::new());
            writer.write_record(["partition", "category", "option", "price"])?;
            for line in &offer.lines {
                let price = line.price.to_string();
                writer.write_record([
                    line.partition.key(),
                    line.category.as_str(),
                    line.option_name.as_str(),
                    price.as_str(),
                ])?;
            }
            let total = offer.total.to_string();
            writer.write_record(["total", "", "", total.as_str()])?;
            writer
                .into_inner()
                .map_err(|e| OfferError::Io(e.into_error()))
        }
    }
}

pub fn offer_file_stem(offer: &Offer) -> String {
    format!("offer-{}", offer.created_at.format("%Y%m%d-%H%M%S"))
}

/// Writes the offer once per format and returns the written locations.
pub fn save_offer<S: Storage>(
    storage: &S,
    offer: &Offer,
    formats: &[ExportFormat],
    display: &DisplaySettings,
) -> Result<Vec<String>> {
    let stem = offer_file_stem(offer);
    let mut written = Vec::with_capacity(formats.len());

    for format in formats {
        let data = export_offer(offer, *format, display)?;
        let file_name = format!("{}.{}", stem, format.extension());
        tracing::debug!("Writing {} ({} bytes)", file_name, data.len());
        written.push(storage.write_file(&file_name, &data)?);
    }

    tracing::info!("💾 Offer saved in {} format(s)", written.len());
    Ok(written)
}
