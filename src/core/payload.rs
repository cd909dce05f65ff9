use crate::core::form::FormState;
use crate::core::units::{convert_gaj_to_sq_ft, convert_price_per_gaj_to_sq_ft, round3, FieldInput};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlotStatus {
    #[default]
    Available,
    Booked,
    Sold,
    Hold,
}

impl fmt::Display for PlotStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PlotStatus::Available => "available",
            PlotStatus::Booked => "booked",
            PlotStatus::Sold => "sold",
            PlotStatus::Hold => "hold",
        };
        write!(f, "{}", name)
    }
}

impl std::str::FromStr for PlotStatus {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "available" => Ok(PlotStatus::Available),
            "booked" => Ok(PlotStatus::Booked),
            "sold" => Ok(PlotStatus::Sold),
            "hold" | "on_hold" => Ok(PlotStatus::Hold),
            other => Err(format!("unknown plot status '{}'", other)),
        }
    }
}

/// Identity fields that do not take part in pricing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlotIdentity {
    pub plot_number: String,
    pub colony: Option<String>,
    pub facing: Option<String>,
    pub status: PlotStatus,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Dimensions {
    pub front: f64,
    pub back: f64,
    pub left: f64,
    pub right: f64,
}

/// Plot record as submitted to the inventory API.
///
/// Absent values are dropped from the serialized form rather than sent as
/// `null`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlotPayload {
    pub plot_number: String,
    pub status: PlotStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub colony: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub facing: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dimensions: Option<Dimensions>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub area_gaj: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub area_sq_ft: Option<f64>,
    #[serde(skip_serializing_if = "std::ops::Not::not", default)]
    pub manual_area: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_per_gaj: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_per_sq_ft: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub final_price_per_gaj: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub commission_percentage: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub commission_amount: Option<f64>,
}

impl PlotPayload {
    pub fn from_form(identity: PlotIdentity, form: &FormState) -> Self {
        let sides = &form.sides;
        let dimensions = match (
            sides.front.filled(),
            sides.back.filled(),
            sides.left.filled(),
            sides.right.filled(),
        ) {
            (Some(front), Some(back), Some(left), Some(right)) => Some(Dimensions {
                front,
                back,
                left,
                right,
            }),
            _ => None,
        };

        let price_per_gaj = form.price_per_gaj.filled();

        Self {
            plot_number: identity.plot_number,
            status: identity.status,
            colony: identity.colony.filter(|c| !c.trim().is_empty()),
            facing: identity.facing.filter(|f| !f.trim().is_empty()),
            dimensions,
            area_gaj: form.area_gaj,
            area_sq_ft: convert_gaj_to_sq_ft(form.area_gaj).map(round3),
            manual_area: form.manual_area,
            price_per_gaj,
            price_per_sq_ft: convert_price_per_gaj_to_sq_ft(price_per_gaj).map(round3),
            total_price: form.total_price_value(),
            final_price_per_gaj: form.final_price_per_gaj.filled(),
            commission_percentage: form.commission.percentage.numeric(),
            commission_amount: form.commission_amount_value(),
        }
    }

    /// Priced means both an area and a total are known.
    pub fn is_priced(&self) -> bool {
        self.area_gaj.is_some() && self.total_price.is_some()
    }
}
