use crate::domain::model::{PlotRow, TransformResult};
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

/// Rates applied to rows that leave them blank.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PricingDefaults {
    pub price_per_gaj: Option<f64>,
    pub commission_percentage: Option<f64>,
}

pub trait ConfigProvider: Send + Sync {
    fn input_path(&self) -> &str;
    fn output_path(&self) -> &str;
    fn output_formats(&self) -> &[String];
    fn bundle_outputs(&self) -> bool;
    fn pricing_defaults(&self) -> PricingDefaults;

    /// Output file name for a format; `{timestamp}` is expanded by the caller.
    fn output_filename(&self, format: &str) -> String {
        match format {
            "json" => "plots.json".to_string(),
            "csv" => "plots.csv".to_string(),
            "summary" => "summary.json".to_string(),
            other => format!("plots.{}", other),
        }
    }

    fn bundle_filename(&self) -> String {
        "plots_bundle.zip".to_string()
    }
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<Vec<PlotRow>>;
    async fn transform(&self, rows: Vec<PlotRow>) -> Result<TransformResult>;
    async fn load(&self, result: TransformResult) -> Result<String>;
}
