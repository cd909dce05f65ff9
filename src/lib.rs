pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use config::cli::LocalStorage;
#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use crate::core::{
    commission::{amount_from_percentage, base_amount, percentage_from_amount, CommissionTerms},
    dimension::{compute_area, price_from_area, price_per_unit_from_total, Side, SideMeasurements},
    etl::EtlEngine,
    form::{FieldEdit, FormState},
    payload::{PlotIdentity, PlotPayload, PlotStatus},
    pipeline::PlotPipeline,
    units::{
        convert_gaj_to_sq_ft, convert_price_per_gaj_to_sq_ft, convert_price_per_sq_ft_to_gaj,
        convert_sq_ft_to_gaj, AreaUnit, FieldInput,
    },
};
pub use utils::error::{PlotError, Result};
