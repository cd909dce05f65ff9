use crate::core::units::{format_rate, round3, FieldInput, SQ_FT_PER_GAJ};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    Front,
    Back,
    Left,
    Right,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Side::Front => "front",
            Side::Back => "back",
            Side::Left => "left",
            Side::Right => "right",
        };
        write!(f, "{}", name)
    }
}

/// Side lengths of a plot in feet, as typed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SideMeasurements {
    pub front: String,
    pub back: String,
    pub left: String,
    pub right: String,
}

impl SideMeasurements {
    pub fn new(
        front: impl Into<String>,
        back: impl Into<String>,
        left: impl Into<String>,
        right: impl Into<String>,
    ) -> Self {
        Self {
            front: front.into(),
            back: back.into(),
            left: left.into(),
            right: right.into(),
        }
    }

    pub fn get(&self, side: Side) -> &str {
        match side {
            Side::Front => &self.front,
            Side::Back => &self.back,
            Side::Left => &self.left,
            Side::Right => &self.right,
        }
    }

    pub fn with(&self, side: Side, raw: impl Into<String>) -> Self {
        let mut next = self.clone();
        let slot = match side {
            Side::Front => &mut next.front,
            Side::Back => &mut next.back,
            Side::Left => &mut next.left,
            Side::Right => &mut next.right,
        };
        *slot = raw.into();
        next
    }

    pub fn area_gaj(&self) -> Option<f64> {
        compute_area(&self.front, &self.back, &self.left, &self.right)
    }
}

/// Area in Gaj from four side lengths in feet.
///
/// Opposite sides are averaged, so an irregular quadrilateral is treated as a
/// rectangle of mean length and mean width. Absent when any side is missing or
/// zero.
pub fn compute_area(
    front: impl FieldInput,
    back: impl FieldInput,
    left: impl FieldInput,
    right: impl FieldInput,
) -> Option<f64> {
    let front = front.filled()?;
    let back = back.filled()?;
    let left = left.filled()?;
    let right = right.filled()?;

    let avg_length = (front + back) / 2.0;
    let avg_width = (left + right) / 2.0;
    let area_sq_ft = avg_length * avg_width;
    let area_gaj = round3(area_sq_ft / SQ_FT_PER_GAJ);

    area_gaj.is_finite().then_some(area_gaj)
}

pub fn price_from_area(area_gaj: impl FieldInput, price_per_gaj: impl FieldInput) -> Option<f64> {
    let total = area_gaj.filled()? * price_per_gaj.filled()?;
    total.is_finite().then_some(total)
}

/// Rate per Gaj implied by a total price, e.g. `"50000"` or `"333.333"`.
pub fn price_per_unit_from_total(
    total_price: impl FieldInput,
    area_gaj: impl FieldInput,
) -> Option<String> {
    let area = area_gaj.filled()?;
    let rate = total_price.filled()? / area;
    rate.is_finite().then(|| format_rate(rate))
}
