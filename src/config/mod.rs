pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
use crate::core::ConfigProvider;
#[cfg(feature = "cli")]
use crate::domain::ports::PricingDefaults;
#[cfg(feature = "cli")]
use crate::utils::error::Result;
#[cfg(feature = "cli")]
use crate::utils::validation::{self, Validate};
#[cfg(feature = "cli")]
use clap::Parser;
#[cfg(feature = "cli")]
use serde::{Deserialize, Serialize};

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "plotcalc")]
#[command(about = "Reconcile plot dimensions, prices and commissions from a plot sheet")]
pub struct CliConfig {
    /// CSV plot sheet to read
    #[arg(long, short, default_value = "plots.csv")]
    pub input: String,

    #[arg(long, default_value = "./output")]
    pub output_path: String,

    /// Output formats: json, csv, summary
    #[arg(long, value_delimiter = ',', default_value = "json,csv,summary")]
    pub formats: Vec<String>,

    /// Pack all outputs into one ZIP file
    #[arg(long)]
    pub bundle: bool,

    /// Rate used for rows that carry neither a rate nor a total price
    #[arg(long)]
    pub default_price_per_gaj: Option<f64>,

    /// Commission percentage used for rows that carry no commission
    #[arg(long)]
    pub default_commission_percentage: Option<f64>,

    #[arg(long, short, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub log_json: bool,
}

#[cfg(feature = "cli")]
impl ConfigProvider for CliConfig {
    fn input_path(&self) -> &str {
        &self.input
    }

    fn output_path(&self) -> &str {
        &self.output_path
    }

    fn output_formats(&self) -> &[String] {
        &self.formats
    }

    fn bundle_outputs(&self) -> bool {
        self.bundle
    }

    fn pricing_defaults(&self) -> PricingDefaults {
        PricingDefaults {
            price_per_gaj: self.default_price_per_gaj,
            commission_percentage: self.default_commission_percentage,
        }
    }
}

#[cfg(feature = "cli")]
impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_path("input", &self.input)?;
        validation::validate_path("output_path", &self.output_path)?;
        validation::validate_output_formats("formats", &self.formats)?;

        if let Some(rate) = self.default_price_per_gaj {
            validation::validate_positive_amount("default_price_per_gaj", rate)?;
        }
        if let Some(percentage) = self.default_commission_percentage {
            validation::validate_range("default_commission_percentage", percentage, 0.0, 100.0)?;
        }

        Ok(())
    }
}
