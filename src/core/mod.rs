pub mod commission;
pub mod dimension;
pub mod etl;
pub mod form;
pub mod payload;
pub mod pipeline;
pub mod units;

pub use crate::domain::model::{PlotRow, TransformResult};
pub use crate::domain::ports::{ConfigProvider, Pipeline, Storage};
pub use crate::utils::error::Result;
