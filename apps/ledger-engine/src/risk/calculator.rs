//! Position sizing from account risk and stop distance.

use tracing::trace;

use super::types::{RiskCalcInput, RiskCalcResult, RiskInputField};
use crate::domain::journal::Direction;
use crate::domain::shared::{InstrumentSpec, Symbol};

fn positive(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite() && *v > 0.0)
}

/// Position-size calculator.
///
/// Pure and total: bad input yields partial results and validity flags,
/// never an error.
#[derive(Debug, Clone, Copy, Default)]
pub struct PositionSizeCalculator;

impl PositionSizeCalculator {
    /// Create a calculator.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Size a position.
    #[must_use]
    pub fn calculate(&self, input: &RiskCalcInput) -> RiskCalcResult {
        let spec = InstrumentSpec::resolve(&Symbol::new(input.symbol.as_str()))
            .with_contract_size(input.contract_size_override);
        let tick = spec.tick_size;
        let account = input.account_currency.trim().to_uppercase();

        let mut invalid_fields = Vec::new();
        let balance = positive(input.balance);
        let risk_percent = positive(input.risk_percent);
        let entry = positive(input.entry_price);
        let stop = positive(input.stop_loss_price);
        if balance.is_none() {
            invalid_fields.push(RiskInputField::Balance);
        }
        if risk_percent.is_none() {
            invalid_fields.push(RiskInputField::RiskPercent);
        }
        if entry.is_none() {
            invalid_fields.push(RiskInputField::EntryPrice);
        }
        if stop.is_none() {
            invalid_fields.push(RiskInputField::StopLossPrice);
        }

        let geometry = match (entry, stop) {
            (Some(entry), Some(stop)) if entry != stop => {
                let distance = (entry - stop).abs();
                let direction = if entry > stop {
                    Direction::Long
                } else {
                    Direction::Short
                };
                Some((entry, distance, distance / tick, direction))
            }
            (Some(_), Some(_)) => {
                invalid_fields.push(RiskInputField::StopDistance);
                None
            }
            _ => None,
        };
        let sl_ticks = geometry.map(|(_, _, ticks, _)| ticks);

        let needs_conversion = spec.needs_conversion(&account);
        let conversion_rate = positive(input.conversion_rate);
        let conversion_rate_valid = !needs_conversion || conversion_rate.is_some();
        if !conversion_rate_valid {
            invalid_fields.push(RiskInputField::ConversionRate);
        }

        let base_valid = balance.is_some()
            && risk_percent.is_some()
            && sl_ticks.is_some_and(|t| t.is_finite() && t > 0.0);
        let is_valid = base_valid && conversion_rate_valid;

        let pip_value_per_unit = if spec.quote_currency.as_deref() == Some(account.as_str()) {
            Some(tick)
        } else if spec.base_currency.as_deref() == Some(account.as_str()) {
            entry.map(|e| tick / e)
        } else {
            conversion_rate.map(|rate| tick / rate)
        };

        let risk_amount = balance
            .zip(risk_percent)
            .map(|(balance, pct)| balance * pct / 100.0);

        let units = if is_valid {
            match (risk_amount, sl_ticks, pip_value_per_unit) {
                (Some(risk), Some(ticks), Some(pv)) if pv > 0.0 => Some(risk / (ticks * pv)),
                _ => None,
            }
        } else {
            None
        };
        let lots = units.map(|u| u / spec.units_per_lot);

        let target = |multiple: f64| {
            geometry.map(|(entry, distance, _, direction)| match direction {
                Direction::Long => entry + multiple * distance,
                Direction::Short => entry - multiple * distance,
            })
        };

        trace!(
            symbol = %spec.symbol,
            is_valid,
            needs_conversion,
            invalid = invalid_fields.len(),
            "position size calculated"
        );

        RiskCalcResult {
            is_valid,
            base_valid,
            conversion_rate_valid,
            needs_conversion,
            base_currency: spec.base_currency.clone(),
            quote_currency: spec.quote_currency.clone(),
            pip_size: tick,
            units_per_lot: spec.units_per_lot,
            sl_distance: geometry.map(|(_, distance, _, _)| distance),
            direction: geometry.map(|(.., direction)| direction),
            sl_pips: sl_ticks,
            pip_value_per_unit,
            risk_amount,
            units,
            lots,
            target_2r: target(2.0),
            target_3r: target(3.0),
            invalid_fields,
        }
    }
}

/// Size a position with the default calculator.
#[must_use]
pub fn calculate_position_size(input: &RiskCalcInput) -> RiskCalcResult {
    PositionSizeCalculator::new().calculate(input)
}
