use crate::core::units::{round2, FieldInput};
use serde::{Deserialize, Serialize};

/// Sale value a commission is charged on: final rate per Gaj times area.
pub fn base_amount(final_price_per_gaj: impl FieldInput, area_gaj: impl FieldInput) -> Option<f64> {
    let base = final_price_per_gaj.filled()? * area_gaj.filled()?;
    base.is_finite().then_some(base)
}

/// Commission percentage with two decimals, e.g. `"2.00"`.
pub fn percentage_from_amount(amount: impl FieldInput, base_amount: impl FieldInput) -> Option<String> {
    let base = base_amount.filled()?;
    let percentage = amount.numeric()? * 100.0 / base;
    percentage
        .is_finite()
        .then(|| format!("{:.2}", round2(percentage)))
}

pub fn amount_from_percentage(percentage: impl FieldInput, base_amount: impl FieldInput) -> Option<f64> {
    let base = base_amount.filled()?;
    let amount = base * percentage.numeric()? / 100.0;
    amount.is_finite().then_some(amount)
}

/// Agent or advocate commission on one sale. Not clamped to the base.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CommissionTerms {
    pub base_amount: Option<f64>,
    pub percentage: String,
    pub amount: String,
}

impl CommissionTerms {
    pub fn new(base_amount: Option<f64>) -> Self {
        Self {
            base_amount,
            ..Self::default()
        }
    }

    pub fn with_percentage(&self, raw: impl Into<String>) -> Self {
        let percentage = raw.into();
        let amount = amount_from_percentage(percentage.as_str(), self.base_amount);
        Self {
            base_amount: self.base_amount,
            amount: crate::core::units::blank_or(amount),
            percentage,
        }
    }

    pub fn with_amount(&self, raw: impl Into<String>) -> Self {
        let amount = raw.into();
        let percentage = percentage_from_amount(amount.as_str(), self.base_amount);
        Self {
            base_amount: self.base_amount,
            percentage: percentage.unwrap_or_default(),
            amount,
        }
    }

    /// Moves to a new base, keeping the percentage and recomputing the amount.
    pub fn rebased(&self, base_amount: Option<f64>) -> Self {
        Self {
            base_amount,
            ..self.clone()
        }
        .with_percentage(self.percentage.clone())
    }
}
