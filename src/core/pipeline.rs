use crate::core::dimension::Side;
use crate::core::form::{FieldEdit, FormState};
use crate::core::payload::{PlotIdentity, PlotPayload, PlotStatus};
use crate::core::units::{blank_or, convert_price_per_sq_ft_to_gaj, format_number, AreaUnit, FieldInput};
use crate::core::{ConfigProvider, Pipeline, PlotRow, Storage, TransformResult};
use crate::domain::model::InventorySummary;
use crate::domain::ports::PricingDefaults;
use crate::utils::error::{PlotError, Result};
use std::io::Write;
use zip::write::{FileOptions, ZipWriter};

const CSV_HEADER: [&str; 10] = [
    "plot_number",
    "colony",
    "status",
    "area_gaj",
    "area_sq_ft",
    "price_per_gaj",
    "total_price",
    "final_price_per_gaj",
    "commission_percentage",
    "commission_amount",
];

/// Reads a plot sheet from `source`, reconciles every row and writes the
/// results to `sink`.
pub struct PlotPipeline<R: Storage, W: Storage, C: ConfigProvider> {
    source: R,
    sink: W,
    config: C,
}

impl<R: Storage, W: Storage, C: ConfigProvider> PlotPipeline<R, W, C> {
    pub fn new(source: R, sink: W, config: C) -> Self {
        Self {
            source,
            sink,
            config,
        }
    }
}

/// Plot identity from a row. Header line is 1, so the first row is line 2.
pub fn row_identity(row: &PlotRow, line: usize) -> Result<PlotIdentity> {
    if row.plot_number.trim().is_empty() {
        return Err(PlotError::ValidationError {
            message: format!("line {}: plot_number is empty", line),
        });
    }

    let status = match row.status.as_deref().map(str::trim) {
        None | Some("") => PlotStatus::default(),
        Some(text) => text.parse::<PlotStatus>().map_err(|reason: String| PlotError::ValidationError {
            message: format!("line {}: {}", line, reason),
        })?,
    };

    Ok(PlotIdentity {
        plot_number: row.plot_number.trim().to_string(),
        colony: row.colony.clone(),
        facing: row.facing.clone(),
        status,
    })
}

/// Replays a row through the form reducer in the order a person fills the form.
pub fn reconcile_row(row: &PlotRow, defaults: PricingDefaults) -> FormState {
    let cell = |value: &Option<String>| value.clone().unwrap_or_default();

    let mut state = FormState::replay([
        FieldEdit::Side(Side::Front, cell(&row.front)),
        FieldEdit::Side(Side::Back, cell(&row.back)),
        FieldEdit::Side(Side::Left, cell(&row.left)),
        FieldEdit::Side(Side::Right, cell(&row.right)),
    ]);

    if state.area_gaj.is_none() && row.area_sq_ft.filled().is_some() {
        state = state.reduce(FieldEdit::Area {
            value: cell(&row.area_sq_ft),
            unit: AreaUnit::SqFt,
        });
    }

    let rate_edit = if row.price_per_gaj.filled().is_some() {
        Some(FieldEdit::PricePerGaj(cell(&row.price_per_gaj)))
    } else if let Some(rate) = convert_price_per_sq_ft_to_gaj(row.price_per_sq_ft.filled()) {
        Some(FieldEdit::PricePerGaj(format_number(rate)))
    } else if row.total_price.filled().is_some() {
        Some(FieldEdit::TotalPrice(cell(&row.total_price)))
    } else {
        defaults
            .price_per_gaj
            .map(|rate| FieldEdit::PricePerGaj(format_number(rate)))
    };
    if let Some(edit) = rate_edit {
        state = state.reduce(edit);
    }

    if row.final_price_per_gaj.filled().is_some() {
        state = state.reduce(FieldEdit::FinalPricePerGaj(cell(&row.final_price_per_gaj)));
    }

    let commission_edit = if row.commission_percentage.numeric().is_some() {
        Some(FieldEdit::CommissionPercentage(cell(&row.commission_percentage)))
    } else if row.commission_amount.numeric().is_some() {
        Some(FieldEdit::CommissionAmount(cell(&row.commission_amount)))
    } else {
        defaults
            .commission_percentage
            .map(|percentage| FieldEdit::CommissionPercentage(format_number(percentage)))
    };
    if let Some(edit) = commission_edit {
        state = state.reduce(edit);
    }

    state
}

pub fn summarize(payloads: &[PlotPayload]) -> InventorySummary {
    let priced: Vec<&PlotPayload> = payloads.iter().filter(|p| p.is_priced()).collect();

    InventorySummary {
        plot_count: payloads.len(),
        priced_count: priced.len(),
        total_area_gaj: payloads.iter().filter_map(|p| p.area_gaj).sum(),
        total_value: priced.iter().filter_map(|p| p.total_price).sum(),
        total_commission: payloads.iter().filter_map(|p| p.commission_amount).sum(),
        incomplete_plots: payloads
            .iter()
            .filter(|p| !p.is_priced())
            .map(|p| p.plot_number.clone())
            .collect(),
        generated_at: chrono::Utc::now().to_rfc3339(),
    }
}

fn render_csv(payloads: &[PlotPayload]) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(CSV_HEADER)?;

    for payload in payloads {
        writer.write_record([
            payload.plot_number.clone(),
            payload.colony.clone().unwrap_or_default(),
            payload.status.to_string(),
            blank_or(payload.area_gaj),
            blank_or(payload.area_sq_ft),
            blank_or(payload.price_per_gaj),
            blank_or(payload.total_price),
            blank_or(payload.final_price_per_gaj),
            blank_or(payload.commission_percentage),
            blank_or(payload.commission_amount),
        ])?;
    }

    let bytes = writer.into_inner().map_err(|e| PlotError::ProcessingError {
        message: format!("failed to flush CSV output: {}", e),
    })?;
    String::from_utf8(bytes).map_err(|e| PlotError::ProcessingError {
        message: format!("CSV output is not UTF-8: {}", e),
    })
}

fn expand_timestamp(name: &str) -> String {
    name.replace(
        "{timestamp}",
        &chrono::Utc::now().format("%Y%m%d_%H%M%S").to_string(),
    )
}

#[async_trait::async_trait]
impl<R: Storage, W: Storage, C: ConfigProvider> Pipeline for PlotPipeline<R, W, C> {
    async fn extract(&self) -> Result<Vec<PlotRow>> {
        let input = self.config.input_path();
        tracing::info!("📥 Reading plot sheet from: {}", input);

        let data = self.source.read_file(input).await?;
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(data.as_slice());

        let mut rows = Vec::new();
        for (index, record) in reader.deserialize::<PlotRow>().enumerate() {
            let row = record?;
            // 先驗證必要欄位，錯誤時回報 CSV 行號
            row_identity(&row, index + 2)?;
            rows.push(row);
        }

        tracing::info!("📊 Extracted {} plot rows", rows.len());
        Ok(rows)
    }

    async fn transform(&self, rows: Vec<PlotRow>) -> Result<TransformResult> {
        tracing::info!("🔧 Reconciling {} plots", rows.len());
        let defaults = self.config.pricing_defaults();

        let mut payloads = Vec::with_capacity(rows.len());
        let mut incomplete = Vec::new();

        for (index, row) in rows.iter().enumerate() {
            let identity = row_identity(row, index + 2)?;
            let state = reconcile_row(row, defaults);
            let payload = PlotPayload::from_form(identity, &state);

            tracing::debug!(
                "Plot {}: area={:?} gaj, total={:?}",
                payload.plot_number,
                payload.area_gaj,
                payload.total_price
            );

            if !payload.is_priced() {
                tracing::warn!(
                    "⚠️ Plot {} is incomplete (area or total price missing)",
                    payload.plot_number
                );
                incomplete.push(payload.clone());
            }
            payloads.push(payload);
        }

        let csv_output = render_csv(&payloads)?;
        let summary = summarize(&payloads);

        tracing::info!(
            "✅ Reconciled {} plots ({} priced, {} incomplete)",
            summary.plot_count,
            summary.priced_count,
            incomplete.len()
        );

        Ok(TransformResult {
            payloads,
            csv_output,
            incomplete,
            summary,
        })
    }

    async fn load(&self, result: TransformResult) -> Result<String> {
        let mut files: Vec<(String, Vec<u8>)> = Vec::new();

        for format in self.config.output_formats() {
            let name = expand_timestamp(&self.config.output_filename(format));
            let data = match format.as_str() {
                "json" => serde_json::to_vec_pretty(&result.payloads)?,
                "csv" => result.csv_output.as_bytes().to_vec(),
                "summary" => serde_json::to_vec_pretty(&result.summary)?,
                other => {
                    return Err(PlotError::ProcessingError {
                        message: format!("unsupported output format '{}'", other),
                    })
                }
            };
            files.push((name, data));
        }

        if self.config.bundle_outputs() {
            let bundle_name = expand_timestamp(&self.config.bundle_filename());
            tracing::debug!("Creating ZIP bundle with {} files", files.len());

            let zip_data = {
                let mut zip = ZipWriter::new(std::io::Cursor::new(Vec::new()));
                for (name, data) in &files {
                    zip.start_file::<_, ()>(name.as_str(), FileOptions::default())?;
                    zip.write_all(data)?;
                }
                let cursor = zip.finish()?;
                cursor.into_inner()
            };

            self.sink.write_file(&bundle_name, &zip_data).await?;
            let output_path = format!("{}/{}", self.config.output_path(), bundle_name);
            tracing::info!("📦 Bundle saved: {}", output_path);
            return Ok(output_path);
        }

        for (name, data) in &files {
            tracing::debug!("Writing {} ({} bytes)", name, data.len());
            self.sink.write_file(name, data).await?;
        }

        tracing::info!(
            "💾 Wrote {} files to {}",
            files.len(),
            self.config.output_path()
        );
        Ok(self.config.output_path().to_string())
    }
}
