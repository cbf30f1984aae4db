// Rule and record file loaders

use crate::{ConfigError, Result};
use fieldcheck_validation::Record;
use serde_json::Value;
use std::fs;
use std::path::Path;
use tracing::debug;

/// Supported file formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    Json,
    Toml,
}

impl FileFormat {
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "json" => Some(FileFormat::Json),
            "toml" => Some(FileFormat::Toml),
            _ => None,
        }
    }

    /// Detect the format of a path from its extension
    pub fn detect(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|s| s.to_str())
            .ok_or_else(|| {
                ConfigError::LoadError(format!("No file extension found: {}", path.display()))
            })?;

        Self::from_extension(ext)
            .ok_or_else(|| ConfigError::LoadError(format!("Unsupported format: {}", ext)))
    }
}

/// Loads JSON or TOML documents as ordered JSON values.
pub struct ConfigLoader {
    format: FileFormat,
}

impl ConfigLoader {
    pub fn new(format: FileFormat) -> Self {
        Self { format }
    }

    /// Auto-detect format from file extension
    pub fn auto(path: impl AsRef<Path>) -> Result<Self> {
        FileFormat::detect(path.as_ref()).map(Self::new)
    }

    pub fn format(&self) -> FileFormat {
        self.format
    }

    /// Load a document from file
    pub fn load_file(&self, path: impl AsRef<Path>) -> Result<Value> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;

        debug!(path = %path.display(), format = ?self.format, "loaded file");
        self.parse(&content)
    }

    /// Parse a document from a string
    pub fn parse(&self, content: &str) -> Result<Value> {
        match self.format {
            FileFormat::Json => serde_json::from_str(content)
                .map_err(|e| ConfigError::ParseError(format!("JSON parse error: {}", e))),
            FileFormat::Toml => {
                let toml_value: toml::Value = toml::from_str(content)
                    .map_err(|e| ConfigError::ParseError(format!("TOML parse error: {}", e)))?;

                serde_json::to_value(toml_value)
                    .map_err(|e| ConfigError::SerializationError(e.to_string()))
            }
        }
    }
}

/// Load a record from a JSON or TOML file
pub fn load_record(path: impl AsRef<Path>) -> Result<Record> {
    let path = path.as_ref();
    let value = ConfigLoader::auto(path)?.load_file(path)?;
    Ok(Record::from_json(value)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_parse_json() {
        let loader = ConfigLoader::new(FileFormat::Json);
        let result = loader.parse(r#"{"b": 1, "a": 2}"#).unwrap();

        let keys: Vec<_> = result.as_object().unwrap().keys().cloned().collect();
        assert_eq!(keys, ["b", "a"]);
    }

    #[test]
    fn test_parse_toml_keeps_key_order() {
        let loader = ConfigLoader::new(FileFormat::Toml);
        let toml = r#"
            [fields]
            zeta = ["required"]
            alpha = ["email"]
        "#;

        let result = loader.parse(toml).unwrap();
        let keys: Vec<_> = result["fields"].as_object().unwrap().keys().cloned().collect();
        assert_eq!(keys, ["zeta", "alpha"]);
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(
            ConfigLoader::new(FileFormat::Json).parse("{"),
            Err(ConfigError::ParseError(_))
        ));
        assert!(matches!(
            ConfigLoader::new(FileFormat::Toml).parse("= nope"),
            Err(ConfigError::ParseError(_))
        ));
    }

    #[test]
    fn test_format_detection() {
        assert_eq!(FileFormat::from_extension("json"), Some(FileFormat::Json));
        assert_eq!(FileFormat::from_extension("TOML"), Some(FileFormat::Toml));
        assert_eq!(FileFormat::from_extension("yaml"), None);
        assert!(ConfigLoader::auto("rules").is_err());
        assert!(ConfigLoader::auto("rules.yaml").is_err());
        assert_eq!(ConfigLoader::auto("rules.toml").unwrap().format(), FileFormat::Toml);
    }

    #[test]
    fn test_load_record() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(file, r#"{{"name": "John", "age": 30}}"#).unwrap();

        let record = load_record(file.path()).unwrap();
        assert_eq!(record.len(), 2);
        assert_eq!(record.get("name").to_string(), "John");
    }

    #[test]
    fn test_load_record_rejects_arrays() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(file, "[1, 2, 3]").unwrap();

        assert!(matches!(
            load_record(file.path()),
            Err(ConfigError::InvalidRecord(_))
        ));
    }

    #[test]
    fn test_missing_file() {
        assert!(matches!(
            ConfigLoader::new(FileFormat::Json).load_file("/nonexistent/rules.json"),
            Err(ConfigError::IoError(e)) if e.kind() == std::io::ErrorKind::NotFound
        ));
    }
}
