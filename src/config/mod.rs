pub mod cli;
pub mod toml_config;

use crate::core::offer::ExportFormat;
use crate::domain::model::DisplaySettings;
use crate::domain::ports::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{
    validate_formats, validate_non_empty_string, validate_path, validate_range, Validate,
};
use serde::{Deserialize, Serialize};
use toml_config::TomlConfig;

pub const DEFAULT_CATALOG_PATH: &str = "options.json";
pub const DEFAULT_OUTPUT_PATH: &str = ".";

/// Fully resolved settings: command line over TOML over built-in defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    pub catalog_path: String,
    pub output_path: String,
    pub output_formats: Vec<String>,
    pub customer_types: Vec<String>,
    pub display: DisplaySettings,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            catalog_path: DEFAULT_CATALOG_PATH.to_string(),
            output_path: DEFAULT_OUTPUT_PATH.to_string(),
            output_formats: vec!["txt".to_string()],
            customer_types: vec!["Private".to_string(), "Company".to_string()],
            display: DisplaySettings::default(),
        }
    }
}

impl AppConfig {
    /// Layers a TOML file over the defaults.
    pub fn from_toml(file: &TomlConfig) -> Self {
        let mut config = Self::default();

        if let Some(path) = &file.catalog.path {
            config.catalog_path = path.clone();
        }
        if let Some(currency) = &file.display.currency {
            config.display.currency = currency.clone();
        }
        if let Some(width) = file.display.name_width {
            config.display.name_width = width;
        }
        if let Some(width) = file.display.price_width {
            config.display.price_width = width;
        }
        if let Some(clear) = file.display.clear_screen {
            config.display.clear_screen = clear;
        }
        if let Some(path) = &file.offer.output_path {
            config.output_path = path.clone();
        }
        if let Some(formats) = &file.offer.formats {
            config.output_formats = formats.clone();
        }
        if let Some(types) = &file.offer.customer_types {
            config.customer_types = types.clone();
        }

        config
    }
}

impl ConfigProvider for AppConfig {
    fn catalog_path(&self) -> &str {
        &self.catalog_path
    }

    fn output_path(&self) -> &str {
        &self.output_path
    }

    fn output_formats(&self) -> &[String] {
        &self.output_formats
    }

    fn customer_types(&self) -> &[String] {
        &self.customer_types
    }

    fn display(&self) -> &DisplaySettings {
        &self.display
    }
}

impl Validate for AppConfig {
    fn validate(&self) -> Result<()> {
        validate_path("catalog.path", &self.catalog_path)?;
        validate_path("offer.output_path", &self.output_path)?;
        validate_non_empty_string("display.currency", &self.display.currency)?;
        validate_range("display.name_width", self.display.name_width, 1, 255)?;
        validate_range("display.price_width", self.display.price_width, 1, 20)?;
        validate_formats("offer.formats", &self.output_formats, &ExportFormat::NAMES)?;
        validate_range("offer.formats", self.output_formats.len(), 1, ExportFormat::NAMES.len())?;
        validate_range("offer.customer_types", self.customer_types.len(), 1, 99)?;
        for name in &self.customer_types {
            validate_non_empty_string("offer.customer_types", name)?;
        }
        Ok(())
    }
}

#[cfg(feature = "cli")]
pub use cli_args::CliConfig;

#[cfg(feature = "cli")]
mod cli_args {
    use super::{AppConfig, TomlConfig};
    use crate::utils::error::Result;
    use clap::Parser;
    use serde::{Deserialize, Serialize};

    #[derive(Debug, Clone, Default, Serialize, Deserialize, Parser)]
    #[command(name = "shipflex-offer")]
    #[command(about = "Interactive catalog browser and offer assistant")]
    pub struct CliConfig {
        /// Path to the JSON catalog [default: options.json]
        #[arg(long)]
        pub catalog: Option<String>,

        /// Optional TOML settings file
        #[arg(short, long)]
        pub config: Option<String>,

        /// Directory that saved offers are written to
        #[arg(long)]
        pub output_path: Option<String>,

        /// Offer export formats (txt, csv, json)
        #[arg(long = "format", value_delimiter = ',')]
        pub formats: Vec<String>,

        /// Currency suffix shown after prices
        #[arg(long)]
        pub currency: Option<String>,

        /// Do not clear the screen between menus
        #[arg(long)]
        pub no_clear: bool,

        #[arg(short, long, help = "Enable verbose output")]
        pub verbose: bool,
    }

    impl CliConfig {
        /// Loads the TOML file if one was given and applies the command line on top.
        pub fn resolve(&self) -> Result<AppConfig> {
            let file = match &self.config {
                Some(path) => {
                    tracing::info!("📁 Loading configuration from: {}", path);
                    TomlConfig::from_file(path)?
                }
                None => TomlConfig::default(),
            };
            Ok(self.apply(AppConfig::from_toml(&file)))
        }

        pub fn apply(&self, mut config: AppConfig) -> AppConfig {
            if let Some(catalog) = &self.catalog {
                config.catalog_path = catalog.clone();
            }
            if let Some(output) = &self.output_path {
                config.output_path = output.clone();
            }
            if !self.formats.is_empty() {
                config.output_formats = self.formats.clone();
            }
            if let Some(currency) = &self.currency {
                config.display.currency = currency.clone();
            }
            if self.no_clear {
                config.display.clear_screen = false;
            }
            config
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.catalog_path(), "options.json");
        assert_eq!(config.display().currency, "EUR");
    }

    #[test]
    fn test_toml_overrides_defaults() {
        let file = TomlConfig::from_toml_str(
            r#"
[display]
currency = "USD"
clear_screen = false

[offer]
formats = ["json"]
"#,
        )
        .unwrap();

        let config = AppConfig::from_toml(&file);
        assert_eq!(config.display.currency, "USD");
        assert!(!config.display.clear_screen);
        assert_eq!(config.display.name_width, 12);
        assert_eq!(config.output_formats, vec!["json".to_string()]);
        assert_eq!(config.catalog_path, DEFAULT_CATALOG_PATH);
    }

    #[test]
    fn test_validation_rejects_bad_values() {
        let mut config = AppConfig::default();
        config.output_formats = vec!["xml".to_string()];
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.display.name_width = 0;
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.customer_types.clear();
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.catalog_path = String::new();
        assert!(config.validate().is_err());
    }

    #[cfg(feature = "cli")]
    #[test]
    fn test_cli_overrides_toml() {
        use clap::Parser;

        let cli = CliConfig::parse_from([
            "shipflex-offer",
            "--catalog",
            "fleet.json",
            "--format",
            "csv,json",
            "--no-clear",
        ]);

        let mut base = AppConfig::default();
        base.catalog_path = "from-toml.json".to_string();
        base.display.currency = "USD".to_string();

        let config = cli.apply(base);
        assert_eq!(config.catalog_path, "fleet.json");
        assert_eq!(config.output_formats, vec!["csv".to_string(), "json".to_string()]);
        assert_eq!(config.display.currency, "USD");
        assert!(!config.display.clear_screen);
    }
}
