use crate::core::ConfigProvider;
use crate::domain::ports::PricingDefaults;
use crate::utils::error::{PlotError, Result};
use crate::utils::validation::{self, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::OnceLock;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub pipeline: PipelineConfig,
    pub source: SourceConfig,
    #[serde(default)]
    pub pricing: PricingConfig,
    pub load: LoadConfig,
    pub monitoring: Option<MonitoringConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    pub name: String,
    pub description: Option<String>,
    pub version: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    pub path: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PricingConfig {
    pub default_price_per_gaj: Option<f64>,
    pub default_commission_percentage: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoadConfig {
    pub output_path: String,
    pub output_formats: Vec<String>,
    pub compression: Option<CompressionConfig>,
    pub filenames: Option<FilenameConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompressionConfig {
    pub enabled: bool,
    pub filename: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilenameConfig {
    pub json: Option<String>,
    pub csv: Option<String>,
    pub summary: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitoringConfig {
    pub enabled: bool,
    pub log_level: Option<String>,
}

fn env_placeholder() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\$\{([^}]+)\}").expect("placeholder pattern is valid"))
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(PlotError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| PlotError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${PLOT_DIR})，未設定的保持原樣
    fn substitute_env_vars(content: &str) -> String {
        env_placeholder()
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .to_string()
    }

    pub fn validate_config(&self) -> Result<()> {
        validation::validate_non_empty_string("pipeline.name", &self.pipeline.name)?;
        validation::validate_path("source.path", &self.source.path)?;
        validation::validate_path("load.output_path", &self.load.output_path)?;
        validation::validate_output_formats("load.output_formats", &self.load.output_formats)?;

        if let Some(rate) = self.pricing.default_price_per_gaj {
            validation::validate_positive_amount("pricing.default_price_per_gaj", rate)?;
        }
        if let Some(percentage) = self.pricing.default_commission_percentage {
            validation::validate_range(
                "pricing.default_commission_percentage",
                percentage,
                0.0,
                100.0,
            )?;
        }

        if let Some(compression) = &self.load.compression {
            if compression.enabled {
                let filename = validation::validate_required_field(
                    "load.compression.filename",
                    &compression.filename,
                )?;
                validation::validate_path("load.compression.filename", filename)?;
            } else if let Some(filename) = &compression.filename {
                validation::validate_path("load.compression.filename", filename)?;
            }
        }

        Ok(())
    }

    pub fn monitoring_enabled(&self) -> bool {
        self.monitoring.as_ref().map(|m| m.enabled).unwrap_or(false)
    }

    pub fn log_level(&self) -> Option<&str> {
        self.monitoring.as_ref().and_then(|m| m.log_level.as_deref())
    }
}

impl ConfigProvider for TomlConfig {
    fn input_path(&self) -> &str {
        &self.source.path
    }

    fn output_path(&self) -> &str {
        &self.load.output_path
    }

    fn output_formats(&self) -> &[String] {
        &self.load.output_formats
    }

    fn bundle_outputs(&self) -> bool {
        self.load
            .compression
            .as_ref()
            .map(|c| c.enabled)
            .unwrap_or(false)
    }

    fn pricing_defaults(&self) -> PricingDefaults {
        PricingDefaults {
            price_per_gaj: self.pricing.default_price_per_gaj,
            commission_percentage: self.pricing.default_commission_percentage,
        }
    }

    fn output_filename(&self, format: &str) -> String {
        let configured = self.load.filenames.as_ref().and_then(|names| match format {
            "json" => names.json.clone(),
            "csv" => names.csv.clone(),
            "summary" => names.summary.clone(),
            _ => None,
        });

        configured.unwrap_or_else(|| match format {
            "json" => "plots.json".to_string(),
            "csv" => "plots.csv".to_string(),
            "summary" => "summary.json".to_string(),
            other => format!("plots.{}", other),
        })
    }

    fn bundle_filename(&self) -> String {
        self.load
            .compression
            .as_ref()
            .and_then(|c| c.filename.clone())
            .unwrap_or_else(|| "plots_bundle.zip".to_string())
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_basic_toml_config() {
        let toml_content = r#"
[pipeline]
name = "shyam-vihar"
version = "1.0.0"

[source]
path = "sheets/shyam_vihar.csv"

[pricing]
default_price_per_gaj = 45000
default_commission_percentage = 2.5

[load]
output_path = "./out"
output_formats = ["json", "summary"]
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(config.pipeline.name, "shyam-vihar");
        assert_eq!(config.input_path(), "sheets/shyam_vihar.csv");
        assert_eq!(config.pricing_defaults().price_per_gaj, Some(45000.0));
        assert_eq!(config.pricing_defaults().commission_percentage, Some(2.5));
        assert!(!config.bundle_outputs());
        assert_eq!(config.output_filename("json"), "plots.json");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_pricing_section_is_optional() {
        let toml_content = r#"
[pipeline]
name = "bare"
version = "1"

[source]
path = "plots.csv"

[load]
output_path = "./out"
output_formats = ["csv"]
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.pricing_defaults(), PricingDefaults::default());
        assert!(!config.monitoring_enabled());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("PLOTCALC_TEST_SHEET_DIR", "/srv/sheets");

        let toml_content = r#"
[pipeline]
name = "env"
version = "1.0"

[source]
path = "${PLOTCALC_TEST_SHEET_DIR}/plots.csv"

[load]
output_path = "${PLOTCALC_TEST_UNSET_DIR}"
output_formats = ["csv"]
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.source.path, "/srv/sheets/plots.csv");
        assert_eq!(config.load.output_path, "${PLOTCALC_TEST_UNSET_DIR}");

        std::env::remove_var("PLOTCALC_TEST_SHEET_DIR");
    }

    #[test]
    fn test_config_validation() {
        let toml_content = r#"
[pipeline]
name = "bad"
version = "1.0"

[source]
path = "plots.csv"

[pricing]
default_commission_percentage = 150

[load]
output_path = "./out"
output_formats = ["csv"]
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_custom_filenames_and_bundle() {
        let toml_content = r#"
[pipeline]
name = "named"
version = "1.0"

[source]
path = "plots.csv"

[load]
output_path = "./out"
output_formats = ["json", "csv"]

[load.compression]
enabled = true
filename = "inventory_{timestamp}.zip"

[load.filenames]
json = "inventory.json"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert!(config.bundle_outputs());
        assert_eq!(config.bundle_filename(), "inventory_{timestamp}.zip");
        assert_eq!(config.output_filename("json"), "inventory.json");
        assert_eq!(config.output_filename("csv"), "plots.csv");
    }

    #[test]
    fn test_enabled_compression_requires_filename() {
        let toml_content = r#"
[pipeline]
name = "zipped"
version = "1.0"

[source]
path = "plots.csv"

[load]
output_path = "./out"
output_formats = ["csv"]

[load.compression]
enabled = true
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        let err = config.validate().unwrap_err();
        assert!(matches!(
            err,
            PlotError::MissingConfigError { ref field } if field == "load.compression.filename"
        ));
    }

    #[test]
    fn test_disabled_compression_needs_no_filename() {
        let toml_content = r#"
[pipeline]
name = "flat"
version = "1.0"

[source]
path = "plots.csv"

[load]
output_path = "./out"
output_formats = ["csv"]

[load.compression]
enabled = false
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_nan_commission_default_is_rejected() {
        let toml_content = r#"
[pipeline]
name = "nan"
version = "1.0"

[source]
path = "plots.csv"

[pricing]
default_commission_percentage = nan

[load]
output_path = "./out"
output_formats = ["csv"]
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let err = TomlConfig::from_toml_str("[pipeline\nname=").unwrap_err();
        assert!(matches!(err, PlotError::ConfigValidationError { .. }));
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();

        let toml_content = r#"
[pipeline]
name = "file-test"
version = "1.0"

[source]
path = "plots.csv"

[load]
output_path = "./output"
output_formats = ["csv"]
"#;

        temp_file.write_all(toml_content.as_bytes()).unwrap();

        let config = TomlConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.pipeline.name, "file-test");
    }
}
