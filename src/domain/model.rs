use crate::core::payload::PlotPayload;
use serde::{Deserialize, Serialize};

/// One row of a plot inventory sheet, every cell as typed.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlotRow {
    pub plot_number: String,
    #[serde(default)]
    pub colony: Option<String>,
    #[serde(default)]
    pub facing: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub front: Option<String>,
    #[serde(default)]
    pub back: Option<String>,
    #[serde(default)]
    pub left: Option<String>,
    #[serde(default)]
    pub right: Option<String>,
    #[serde(default)]
    pub area_sq_ft: Option<String>,
    #[serde(default)]
    pub price_per_gaj: Option<String>,
    #[serde(default)]
    pub price_per_sq_ft: Option<String>,
    #[serde(default)]
    pub total_price: Option<String>,
    #[serde(default)]
    pub final_price_per_gaj: Option<String>,
    #[serde(default)]
    pub commission_percentage: Option<String>,
    #[serde(default)]
    pub commission_amount: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InventorySummary {
    pub plot_count: usize,
    pub priced_count: usize,
    pub total_area_gaj: f64,
    pub total_value: f64,
    pub total_commission: f64,
    pub incomplete_plots: Vec<String>,
    pub generated_at: String,
}

#[derive(Debug, Clone)]
pub struct TransformResult {
    pub payloads: Vec<PlotPayload>,
    pub csv_output: String,
    pub incomplete: Vec<PlotPayload>,
    pub summary: InventorySummary,
}
