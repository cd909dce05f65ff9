use crate::core::Pipeline;
use crate::utils::error::Result;

pub struct EtlEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> EtlEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    pub async fn run(&self) -> Result<String> {
        tracing::info!("🚀 Starting plot reconciliation run");

        let rows = self.pipeline.extract().await?;
        tracing::info!("Extracted {} plot rows", rows.len());

        let result = self.pipeline.transform(rows).await?;
        tracing::info!(
            "Reconciled {} plots, {} incomplete",
            result.payloads.len(),
            result.incomplete.len()
        );

        let output_path = self.pipeline.load(result).await?;
        tracing::info!("Output saved to: {}", output_path);

        Ok(output_path)
    }
}
