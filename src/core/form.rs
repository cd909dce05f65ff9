//! Plot form state and its edit reducer.
//!
//! A [`FormState`] is never mutated in place. [`FormState::reduce`] takes one
//! [`FieldEdit`], stores the typed value verbatim and recomputes the fields
//! that depend on it. The edited field itself is never rewritten, so a chain
//! of edits cannot oscillate between price per Gaj and total price.

use crate::core::commission::{self, CommissionTerms};
use crate::core::dimension::{self, Side, SideMeasurements};
use crate::core::units::{
    blank_or, convert_gaj_to_sq_ft, convert_price_per_gaj_to_sq_ft, convert_sq_ft_to_gaj,
    format_number, AreaUnit, FieldInput,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "field", content = "value", rename_all = "snake_case")]
pub enum FieldEdit {
    Side(Side, String),
    /// Area typed directly, for plots whose sides do not describe them.
    Area { value: String, unit: AreaUnit },
    PricePerGaj(String),
    TotalPrice(String),
    FinalPricePerGaj(String),
    CommissionPercentage(String),
    CommissionAmount(String),
}

impl FieldEdit {
    /// Parses `name=value`, as used on the command line.
    pub fn parse(spec: &str) -> std::result::Result<Self, String> {
        let (name, value) = spec
            .split_once('=')
            .ok_or_else(|| format!("expected field=value, got '{}'", spec))?;
        let value = value.to_string();

        let edit = match name.trim() {
            "front" => FieldEdit::Side(Side::Front, value),
            "back" => FieldEdit::Side(Side::Back, value),
            "left" => FieldEdit::Side(Side::Left, value),
            "right" => FieldEdit::Side(Side::Right, value),
            "area" | "area_gaj" => FieldEdit::Area {
                value,
                unit: AreaUnit::Gaj,
            },
            "area_sq_ft" => FieldEdit::Area {
                value,
                unit: AreaUnit::SqFt,
            },
            "price_per_gaj" => FieldEdit::PricePerGaj(value),
            "total_price" => FieldEdit::TotalPrice(value),
            "final_price_per_gaj" => FieldEdit::FinalPricePerGaj(value),
            "commission_percentage" => FieldEdit::CommissionPercentage(value),
            "commission_amount" => FieldEdit::CommissionAmount(value),
            other => return Err(format!("unknown field '{}'", other)),
        };
        Ok(edit)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FormState {
    pub sides: SideMeasurements,
    pub area_gaj: Option<f64>,
    pub manual_area: bool,
    pub price_per_gaj: String,
    pub total_price: String,
    pub final_price_per_gaj: String,
    pub commission: CommissionTerms,
}

impl FormState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies edits left to right.
    pub fn replay<I>(edits: I) -> Self
    where
        I: IntoIterator<Item = FieldEdit>,
    {
        edits
            .into_iter()
            .fold(Self::new(), |state, edit| state.reduce(edit))
    }

    pub fn reduce(&self, edit: FieldEdit) -> Self {
        let mut next = self.clone();

        match edit {
            FieldEdit::Side(side, raw) => {
                next.sides = self.sides.with(side, raw);
                next.area_gaj = next.sides.area_gaj();
                next.manual_area = false;
                next.total_price = blank_or(
                    dimension::price_from_area(next.area_gaj, &next.price_per_gaj)
                        .map(format_number),
                );
                next.commission = next.commission.rebased(next.commission_base());
            }
            FieldEdit::Area { value, unit } => {
                next.area_gaj = match unit {
                    AreaUnit::Gaj => value.filled(),
                    AreaUnit::SqFt => convert_sq_ft_to_gaj(value.as_str()),
                };
                next.manual_area = true;
                next.total_price = blank_or(
                    dimension::price_from_area(next.area_gaj, &next.price_per_gaj)
                        .map(format_number),
                );
                next.commission = next.commission.rebased(next.commission_base());
            }
            FieldEdit::PricePerGaj(raw) => {
                next.total_price =
                    blank_or(dimension::price_from_area(self.area_gaj, &raw).map(format_number));
                next.price_per_gaj = raw;
                if !next.has_final_rate() {
                    next.commission = next.commission.rebased(next.commission_base());
                }
            }
            FieldEdit::TotalPrice(raw) => {
                next.price_per_gaj =
                    dimension::price_per_unit_from_total(&raw, self.area_gaj).unwrap_or_default();
                next.total_price = raw;
                if !next.has_final_rate() {
                    next.commission = next.commission.rebased(next.commission_base());
                }
            }
            FieldEdit::FinalPricePerGaj(raw) => {
                next.final_price_per_gaj = raw;
                next.commission = next.commission.rebased(next.commission_base());
            }
            FieldEdit::CommissionPercentage(raw) => {
                next.commission = self.commission.with_percentage(raw);
            }
            FieldEdit::CommissionAmount(raw) => {
                next.commission = self.commission.with_amount(raw);
            }
        }

        next
    }

    fn has_final_rate(&self) -> bool {
        self.final_price_per_gaj.filled().is_some()
    }

    /// Final rate times area; the listed rate stands in until a final rate is typed.
    pub fn commission_base(&self) -> Option<f64> {
        if self.has_final_rate() {
            commission::base_amount(&self.final_price_per_gaj, self.area_gaj)
        } else {
            commission::base_amount(&self.price_per_gaj, self.area_gaj)
        }
    }

    pub fn area_in(&self, unit: AreaUnit) -> Option<f64> {
        match unit {
            AreaUnit::Gaj => self.area_gaj,
            AreaUnit::SqFt => convert_gaj_to_sq_ft(self.area_gaj),
        }
    }

    pub fn price_per_unit_in(&self, unit: AreaUnit) -> Option<f64> {
        match unit {
            AreaUnit::Gaj => self.price_per_gaj.filled(),
            AreaUnit::SqFt => convert_price_per_gaj_to_sq_ft(self.price_per_gaj.filled()),
        }
    }

    pub fn total_price_value(&self) -> Option<f64> {
        self.total_price.filled()
    }

    pub fn commission_amount_value(&self) -> Option<f64> {
        self.commission.amount.numeric()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sides(front: &str, back: &str, left: &str, right: &str) -> Vec<FieldEdit> {
        vec![
            FieldEdit::Side(Side::Front, front.to_string()),
            FieldEdit::Side(Side::Back, back.to_string()),
            FieldEdit::Side(Side::Left, left.to_string()),
            FieldEdit::Side(Side::Right, right.to_string()),
        ]
    }

    #[test]
    fn test_sides_then_rate_fills_total() {
        let state = FormState::replay(sides("30", "30", "36", "36"))
            .reduce(FieldEdit::PricePerGaj("50000".to_string()));

        assert_eq!(state.area_gaj, Some(120.0));
        assert_eq!(state.total_price, "6000000");
        assert_eq!(state.price_per_gaj, "50000");
    }

    #[test]
    fn test_partial_sides_leave_area_blank() {
        let state = FormState::replay(sides("30", "30", "36", ""));
        assert_eq!(state.area_gaj, None);
        assert_eq!(state.total_price, "");
    }

    #[test]
    fn test_total_price_edit_recomputes_rate_only() {
        let state = FormState::replay(sides("30", "50", "30", "30"))
            .reduce(FieldEdit::TotalPrice("7500000".to_string()));

        // 40 * 30 / 9 = 133.333
        assert_eq!(state.area_gaj, Some(133.333));
        assert_eq!(state.total_price, "7500000");
        assert_eq!(state.price_per_gaj, "56250.141");
    }

    #[test]
    fn test_rate_edit_does_not_touch_rate_text() {
        let state = FormState::replay(sides("30", "30", "36", "36"))
            .reduce(FieldEdit::PricePerGaj("50000.50".to_string()));
        assert_eq!(state.price_per_gaj, "50000.50");
        assert_eq!(state.total_price, "6000060");
    }

    #[test]
    fn test_side_edit_reprices_from_rate() {
        let state = FormState::replay(sides("30", "30", "36", "36"))
            .reduce(FieldEdit::PricePerGaj("50000".to_string()))
            .reduce(FieldEdit::Side(Side::Left, "45".to_string()))
            .reduce(FieldEdit::Side(Side::Right, "45".to_string()));

        assert_eq!(state.area_gaj, Some(150.0));
        assert_eq!(state.total_price, "7500000");
        assert_eq!(state.price_per_gaj, "50000");
    }

    #[test]
    fn test_commission_follows_final_rate() {
        let state = FormState::replay(sides("30", "30", "36", "36"))
            .reduce(FieldEdit::PricePerGaj("55000".to_string()))
            .reduce(FieldEdit::CommissionPercentage("2".to_string()))
            .reduce(FieldEdit::FinalPricePerGaj("50000".to_string()));

        assert_eq!(state.commission_base(), Some(6_000_000.0));
        assert_eq!(state.commission.amount, "120000");

        // list rate changes do not move a commission pinned to a final rate
        let state = state.reduce(FieldEdit::PricePerGaj("60000".to_string()));
        assert_eq!(state.commission.amount, "120000");
    }

    #[test]
    fn test_commission_amount_edit_recomputes_percentage() {
        let state = FormState::replay(sides("30", "30", "36", "36"))
            .reduce(FieldEdit::PricePerGaj("50000".to_string()))
            .reduce(FieldEdit::CommissionAmount("90000".to_string()));
        assert_eq!(state.commission.percentage, "1.50");
        assert_eq!(state.commission.amount, "90000");
    }

    #[test]
    fn test_cleared_percentage_blanks_amount() {
        let state = FormState::replay(sides("30", "30", "36", "36"))
            .reduce(FieldEdit::PricePerGaj("50000".to_string()))
            .reduce(FieldEdit::CommissionPercentage("2".to_string()))
            .reduce(FieldEdit::CommissionPercentage(String::new()));
        assert_eq!(state.commission.amount, "");
    }

    #[test]
    fn test_manual_area_in_square_feet() {
        let state = FormState::new()
            .reduce(FieldEdit::PricePerGaj("50000".to_string()))
            .reduce(FieldEdit::Area {
                value: "1350".to_string(),
                unit: AreaUnit::SqFt,
            });

        assert!(state.manual_area);
        assert_eq!(state.area_gaj, Some(150.0));
        assert_eq!(state.total_price, "7500000");
        assert_eq!(state.area_in(AreaUnit::SqFt), Some(1350.0));
    }

    #[test]
    fn test_reduce_leaves_original_untouched() {
        let before = FormState::replay(sides("30", "30", "36", "36"));
        let after = before.reduce(FieldEdit::PricePerGaj("50000".to_string()));
        assert_eq!(before.price_per_gaj, "");
        assert_ne!(before, after);
    }

    #[test]
    fn test_field_edit_parse() {
        assert_eq!(
            FieldEdit::parse("front=30").unwrap(),
            FieldEdit::Side(Side::Front, "30".to_string())
        );
        assert_eq!(
            FieldEdit::parse("total_price=").unwrap(),
            FieldEdit::TotalPrice(String::new())
        );
        assert!(FieldEdit::parse("depth=10").is_err());
        assert!(FieldEdit::parse("front").is_err());
    }
}
