use crate::domain::model::{Catalog, CatalogOption, Category, MAX_NAME_LEN};
use crate::utils::error::{OfferError, Result};
use crate::utils::validation::validate_display_name;
use serde::de::{self, Deserializer, Visitor};
use serde::Deserialize;
use std::fmt;
use std::path::Path;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct CatalogDocument {
    essential: Vec<CategoryDocument>,
    extra: Vec<CategoryDocument>,
}

#[derive(Debug, Deserialize)]
struct CategoryDocument {
    name: String,
    options: Vec<OptionDocument>,
}

#[derive(Debug, Deserialize)]
struct OptionDocument {
    name: String,
    #[serde(deserialize_with = "deserialize_price")]
    price: u64,
}

/// 價格接受 JSON 非負整數，或只含十進位數字的字串
fn deserialize_price<'de, D>(deserializer: D) -> std::result::Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    struct PriceVisitor;

    impl<'de> Visitor<'de> for PriceVisitor {
        type Value = u64;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("a non-negative whole number price")
        }

        fn visit_u64<E: de::Error>(self, value: u64) -> std::result::Result<u64, E> {
            Ok(value)
        }

        fn visit_i64<E: de::Error>(self, value: i64) -> std::result::Result<u64, E> {
            u64::try_from(value)
                .map_err(|_| E::custom(format!("negative price {} is not allowed", value)))
        }

        fn visit_f64<E: de::Error>(self, value: f64) -> std::result::Result<u64, E> {
            // 超過 u64 的整數會被 serde_json 轉成 f64
            if value.is_finite() && value.fract() == 0.0 {
                return Err(E::custom(format!(
                    "price {} out of range, the maximum is {}",
                    value,
                    u64::MAX
                )));
            }
            Err(E::custom(format!(
                "fractional price {} is not allowed, prices are whole currency units",
                value
            )))
        }

        fn visit_str<E: de::Error>(self, value: &str) -> std::result::Result<u64, E> {
            if value.is_empty() || !value.bytes().all(|b| b.is_ascii_digit()) {
                return Err(E::invalid_value(de::Unexpected::Str(value), &self));
            }
            value
                .parse::<u64>()
                .map_err(|e| E::custom(format!("price {:?} out of range: {}", value, e)))
        }
    }

    deserializer.deserialize_any(PriceVisitor)
}

/// Parses a catalog document. The result is all-or-nothing: any syntax error yields
/// `OfferError::Parse`, any shape violation yields `OfferError::Schema`.
pub fn load_catalog(document: &str) -> Result<Catalog> {
    load_catalog_slice(document.as_bytes())
}

/// Same as `load_catalog` for raw bytes; invalid UTF-8 inside the document is a parse error.
pub fn load_catalog_slice(document: &[u8]) -> Result<Catalog> {
    let parsed: CatalogDocument = serde_json::from_slice(document).map_err(classify_json_error)?;

    let catalog = Catalog {
        essential: convert_partition("essential", parsed.essential)?,
        extra: convert_partition("extra", parsed.extra)?,
    };

    tracing::debug!(
        "Loaded catalog: {} essential categories, {} extra categories, {} options",
        catalog.essential.len(),
        catalog.extra.len(),
        catalog.option_count()
    );

    Ok(catalog)
}

/// Reads the whole file before parsing. Only the read itself maps to `OfferError::FileOpen`;
/// bad encoding is reported by the parser.
pub fn load_catalog_from_path<P: AsRef<Path>>(path: P) -> Result<Catalog> {
    let path = path.as_ref();
    tracing::info!("📁 Loading catalog from: {}", path.display());

    let content = std::fs::read(path).map_err(|source| OfferError::FileOpen {
        path: path.display().to_string(),
        source,
    })?;

    load_catalog_slice(&content)
}

fn classify_json_error(err: serde_json::Error) -> OfferError {
    match err.classify() {
        serde_json::error::Category::Data => OfferError::schema(
            format!("line {} column {}", err.line(), err.column()),
            strip_position(&err),
        ),
        _ => OfferError::Parse(err),
    }
}

// serde_json 的訊息結尾會附上位置，已經放在 location 裡
fn strip_position(err: &serde_json::Error) -> String {
    let message = err.to_string();
    let suffix = format!(" at line {} column {}", err.line(), err.column());
    message
        .strip_suffix(&suffix)
        .map(str::to_string)
        .unwrap_or(message)
}

fn convert_partition(key: &str, categories: Vec<CategoryDocument>) -> Result<Vec<Category>> {
    categories
        .into_iter()
        .enumerate()
        .map(|(index, doc)| convert_category(&format!("{}[{}]", key, index), doc))
        .collect()
}

fn convert_category(location: &str, doc: CategoryDocument) -> Result<Category> {
    validate_display_name(&format!("{}.name", location), &doc.name, MAX_NAME_LEN)?;

    if doc.options.is_empty() {
        return Err(OfferError::schema(
            format!("{}.options", location),
            format!("category '{}' has no options", doc.name),
        ));
    }

    let mut options = Vec::with_capacity(doc.options.len());
    for (index, option) in doc.options.into_iter().enumerate() {
        validate_display_name(
            &format!("{}.options[{}].name", location, index),
            &option.name,
            MAX_NAME_LEN,
        )?;
        options.push(CatalogOption::new(option.name, option.price));
    }

    Ok(Category::new(doc.name, options))
}
