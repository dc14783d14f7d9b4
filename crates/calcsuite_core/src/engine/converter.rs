//! Unit conversion engine.
//!
//! # Responsibility
//! - Convert values between units of one category (linear factor scaling,
//!   affine temperature pivot through celsius).
//! - Derive display formulas and keep the bounded conversion history.
//!
//! # Invariants
//! - Conversion math is lenient: invalid input or unknown keys yield 0,
//!   never an error.
//! - Only conversions passing `is_valid_conversion` enter the history.
//! - History is newest first, at most 50 entries.

use crate::model::history::{now_epoch_ms, ConversionRecord};
use crate::store::StateStore;
use crate::units::{self, Category, QuickPair, Unit};
use log::{debug, warn};

/// Store slot holding the conversion history array.
const STATE_KEY: &str = "converter_history";

const MAX_HISTORY: usize = 50;

/// Factor-table and temperature conversion engine.
///
/// Construction rehydrates the history from the store; an unreadable or
/// corrupt blob falls back to an empty history.
pub struct ConversionEngine<S: StateStore> {
    history: Vec<ConversionRecord>,
    next_record_id: u64,
    store: S,
}

impl<S: StateStore> ConversionEngine<S> {
    pub fn new(store: S) -> Self {
        let mut engine = Self {
            history: Vec::new(),
            next_record_id: 1,
            store,
        };
        engine.rehydrate();
        engine
    }

    /// Converts `value` between two units of one category.
    ///
    /// Lenient by contract: zero, non-finite values and unknown categories
    /// return 0. Unknown linear units fall back to factor 1. The result is
    /// rounded by [`round_result`].
    pub fn convert(&self, value: f64, from: &str, to: &str, category_key: &str) -> f64 {
        if value == 0.0 || !value.is_finite() {
            return 0.0;
        }
        let Some(category) = units::category(category_key) else {
            return 0.0;
        };

        if category_key == units::TEMPERATURE {
            return convert_temperature(value, from, to);
        }

        let from_factor = unit_factor(category, from);
        let to_factor = unit_factor(category, to);
        round_result(value * from_factor / to_factor)
    }

    /// Renders the `1 <from> = <ratio> <to>` display formula.
    ///
    /// Temperature pairs use the fixed affine formula table; an unknown
    /// category yields an empty string.
    pub fn formula(&self, from: &str, to: &str, category_key: &str) -> String {
        let Some(category) = units::category(category_key) else {
            return String::new();
        };

        if category_key == units::TEMPERATURE {
            return temperature_formula(from, to);
        }

        let from_name = category.unit(from).map_or(from, |unit| unit.name);
        let to_name = category.unit(to).map_or(to, |unit| unit.name);
        let ratio = unit_factor(category, from) / unit_factor(category, to);

        if ratio == 1.0 {
            format!("1 {from_name} = 1 {to_name}")
        } else {
            format!("1 {from_name} = {} {to_name}", round_result(ratio))
        }
    }

    /// Validates a conversion request before it may enter the history.
    pub fn is_valid_conversion(&self, value: f64, from: &str, to: &str, category_key: &str) -> bool {
        if value == 0.0 || !value.is_finite() {
            return false;
        }
        let Some(category) = units::category(category_key) else {
            return false;
        };
        category.contains(from) && category.contains(to)
    }

    /// Converts and records the result in the history.
    ///
    /// Returns `None` without recording when the request is invalid.
    pub fn record(&mut self, value: f64, from: &str, to: &str, category_key: &str) -> Option<f64> {
        if !self.is_valid_conversion(value, from, to, category_key) {
            return None;
        }
        let output = self.convert(value, from, to, category_key);

        let record = ConversionRecord {
            category: category_key.to_string(),
            input_value: value,
            input_unit: from.to_string(),
            output_value: output,
            output_unit: to.to_string(),
            timestamp: now_epoch_ms(),
            id: self.next_record_id,
        };
        self.next_record_id += 1;
        self.history.insert(0, record);
        self.history.truncate(MAX_HISTORY);
        self.persist();

        Some(output)
    }

    /// History snapshot, newest first.
    pub fn history(&self) -> &[ConversionRecord] {
        &self.history
    }

    pub fn clear_history(&mut self) {
        self.history.clear();
        self.persist();
    }

    /// All categories in presentation order.
    pub fn categories(&self) -> &'static [Category] {
        units::CATEGORIES
    }

    /// Unit table of a category; empty for an unknown key.
    pub fn category_units(&self, category_key: &str) -> &'static [(&'static str, Unit)] {
        units::category(category_key).map_or(&[], |category| category.units)
    }

    /// Quick-conversion chips of a category; empty for an unknown key.
    pub fn quick_conversions(&self, category_key: &str) -> &'static [QuickPair] {
        units::category(category_key).map_or(&[], |category| category.quick)
    }

    fn rehydrate(&mut self) {
        let raw = match self.store.load(STATE_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return,
            Err(err) => {
                warn!(
                    "event=state_load module=converter status=error error_code=store_read_failed error={err}"
                );
                return;
            }
        };

        match serde_json::from_str::<Vec<ConversionRecord>>(&raw) {
            Ok(history) => {
                self.history = history;
                self.history.truncate(MAX_HISTORY);
                self.next_record_id = self
                    .history
                    .iter()
                    .map(|record| record.id)
                    .max()
                    .map_or(1, |max_id| max_id + 1);
                debug!(
                    "event=state_load module=converter status=ok entries={}",
                    self.history.len()
                );
            }
            Err(err) => {
                warn!(
                    "event=state_load module=converter status=error error_code=blob_parse_failed error={err}"
                );
            }
        }
    }

    fn persist(&self) {
        let raw = match serde_json::to_string(&self.history) {
            Ok(raw) => raw,
            Err(err) => {
                warn!(
                    "event=state_save module=converter status=error error_code=blob_encode_failed error={err}"
                );
                return;
            }
        };
        if let Err(err) = self.store.save(STATE_KEY, &raw) {
            warn!(
                "event=state_save module=converter status=error error_code=store_write_failed error={err}"
            );
        }
    }
}

fn unit_factor(category: &Category, key: &str) -> f64 {
    category.unit(key).and_then(|unit| unit.factor).unwrap_or(1.0)
}

/// Affine temperature conversion through the celsius pivot.
///
/// Identity conversions return the value unrounded; unknown unit keys
/// yield 0 under the lenient contract.
fn convert_temperature(value: f64, from: &str, to: &str) -> f64 {
    if from == to {
        return value;
    }

    let celsius = match from {
        "celsius" => value,
        "fahrenheit" => (value - 32.0) * 5.0 / 9.0,
        "kelvin" => value - 273.15,
        "rankine" => (value - 491.67) * 5.0 / 9.0,
        _ => return 0.0,
    };

    let result = match to {
        "celsius" => celsius,
        "fahrenheit" => celsius * 9.0 / 5.0 + 32.0,
        "kelvin" => celsius + 273.15,
        "rankine" => celsius * 9.0 / 5.0 + 491.67,
        _ => return 0.0,
    };

    round_result(result)
}

/// Fixed formula strings for every ordered temperature pair.
///
/// Identity and unknown pairs fall back to a generic description.
fn temperature_formula(from: &str, to: &str) -> String {
    let formula = match (from, to) {
        ("celsius", "fahrenheit") => "°F = (°C × 9/5) + 32",
        ("fahrenheit", "celsius") => "°C = (°F - 32) × 5/9",
        ("celsius", "kelvin") => "K = °C + 273.15",
        ("kelvin", "celsius") => "°C = K - 273.15",
        ("fahrenheit", "kelvin") => "K = (°F + 459.67) × 5/9",
        ("kelvin", "fahrenheit") => "°F = (K × 9/5) - 459.67",
        ("celsius", "rankine") => "°R = (°C × 9/5) + 491.67",
        ("rankine", "celsius") => "°C = (°R - 491.67) × 5/9",
        ("fahrenheit", "rankine") => "°R = °F + 459.67",
        ("rankine", "fahrenheit") => "°F = °R - 459.67",
        ("kelvin", "rankine") => "°R = K × 9/5",
        ("rankine", "kelvin") => "K = °R × 5/9",
        _ => return format!("Convert {from} to {to}"),
    };
    formula.to_string()
}

/// Magnitude-tiered rounding for converted values.
///
/// Large magnitudes collapse to 4-digit exponential form, mid-range values
/// keep 6 decimal places, sub-unit values keep 8.
pub fn round_result(value: f64) -> f64 {
    if value.abs() >= 1_000_000.0 {
        format!("{value:.4e}").parse().unwrap_or(value)
    } else if value.abs() >= 1.0 {
        round_to(value, 6)
    } else {
        round_to(value, 8)
    }
}

/// Formats a converted value for display.
pub fn format_number(value: f64) -> String {
    if !value.is_finite() {
        return "0".to_string();
    }
    if value.abs() >= 1e9 || (value.abs() < 1e-6 && value != 0.0) {
        return format!("{value:.4e}");
    }
    if value.abs() >= 1000.0 {
        let rounded: f64 = format!("{value:.4}").parse().unwrap_or(value);
        return rounded.to_string();
    }
    format!("{value:.7e}")
        .parse::<f64>()
        .unwrap_or(value)
        .to_string()
}

fn round_to(value: f64, decimals: usize) -> f64 {
    format!("{value:.decimals$}").parse().unwrap_or(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_result_tiers_by_magnitude() {
        assert_eq!(round_result(1_234_567.89), 1_234_600.0);
        assert_eq!(round_result(2.5), 2.5);
        assert_eq!(round_result(1.23456789), 1.234568);
        assert_eq!(round_result(0.123456789), 0.12345679);
        assert_eq!(round_result(-1_234_567.89), -1_234_600.0);
    }

    #[test]
    fn temperature_pivot_handles_all_units() {
        assert_eq!(convert_temperature(100.0, "celsius", "fahrenheit"), 212.0);
        assert_eq!(convert_temperature(212.0, "fahrenheit", "celsius"), 100.0);
        assert_eq!(convert_temperature(0.0, "celsius", "kelvin"), 273.15);
        assert_eq!(convert_temperature(100.0, "celsius", "rankine"), 671.67);
        assert_eq!(convert_temperature(491.67, "rankine", "celsius"), 0.0);
    }

    #[test]
    fn temperature_identity_skips_rounding() {
        let value = 36.600000001;
        assert_eq!(convert_temperature(value, "celsius", "celsius"), value);
    }

    #[test]
    fn temperature_unknown_unit_yields_zero() {
        assert_eq!(convert_temperature(10.0, "celsius", "delisle"), 0.0);
        assert_eq!(convert_temperature(10.0, "delisle", "celsius"), 0.0);
    }

    #[test]
    fn formula_table_covers_every_cross_pair() {
        let keys = ["celsius", "fahrenheit", "kelvin", "rankine"];
        for from in keys {
            for to in keys {
                let formula = temperature_formula(from, to);
                if from == to {
                    assert!(formula.starts_with("Convert"), "{from}->{to}: {formula}");
                } else {
                    assert!(
                        !formula.starts_with("Convert"),
                        "missing formula for {from}->{to}"
                    );
                }
            }
        }
    }

    #[test]
    fn format_number_tiers() {
        assert_eq!(format_number(f64::NAN), "0");
        assert!(format_number(1.5e9).contains('e'));
        assert!(format_number(2e-7).contains('e'));
        assert_eq!(format_number(0.25), "0.25");
        assert_eq!(format_number(1234.56789), "1234.5679");
    }
}
