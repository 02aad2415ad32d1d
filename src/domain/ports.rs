use crate::domain::model::DisplaySettings;
use crate::utils::error::Result;

/// Destination for exported offers.
pub trait Storage {
    /// Writes `data` under `path` and returns the location actually written.
    fn write_file(&self, path: &str, data: &[u8]) -> Result<String>;
}

pub trait ConfigProvider {
    fn catalog_path(&self) -> &str;
    fn output_path(&self) -> &str;
    fn output_formats(&self) -> &[String];
    fn customer_types(&self) -> &[String];
    fn display(&self) -> &DisplaySettings;
}

/// Line-oriented operator terminal.
pub trait Terminal {
    /// Reads one line without its terminator; `None` once input is closed.
    fn read_line(&mut self) -> Result<Option<String>>;
    fn write_str(&mut self, text: &str) -> Result<()>;
    fn clear_screen(&mut self) -> Result<()>;
}
