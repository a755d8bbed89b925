//! Instrument metadata: currencies, tick size and lot size.

use serde::{Deserialize, Serialize};

use super::symbol::Symbol;

/// Tick size for ordinary FX pairs.
pub const DEFAULT_TICK_SIZE: f64 = 0.0001;
/// Tick size for JPY-quoted pairs.
pub const JPY_TICK_SIZE: f64 = 0.01;
/// Tick size for the supported metal.
pub const METAL_TICK_SIZE: f64 = 0.01;
/// Units in one standard FX lot.
pub const FX_UNITS_PER_LOT: f64 = 100_000.0;
/// Ounces in one metal lot unless the broker says otherwise.
pub const METAL_UNITS_PER_LOT: f64 = 100.0;

/// Broad instrument family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InstrumentClass {
    /// Spot currency pair.
    Forex,
    /// Spot precious metal quoted against a currency.
    Metal,
}

/// `(symbol, base, quote, class)`
const INSTRUMENT_TABLE: [(&str, &str, &str, InstrumentClass); 8] = [
    ("XAUUSD", "XAU", "USD", InstrumentClass::Metal),
    ("EURUSD", "EUR", "USD", InstrumentClass::Forex),
    ("GBPUSD", "GBP", "USD", InstrumentClass::Forex),
    ("AUDUSD", "AUD", "USD", InstrumentClass::Forex),
    ("NZDUSD", "NZD", "USD", InstrumentClass::Forex),
    ("USDJPY", "USD", "JPY", InstrumentClass::Forex),
    ("USDCHF", "USD", "CHF", InstrumentClass::Forex),
    ("USDCAD", "USD", "CAD", InstrumentClass::Forex),
];

/// Resolved metadata for one instrument.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstrumentSpec {
    /// Normalized symbol.
    pub symbol: Symbol,
    /// Base currency, when known.
    pub base_currency: Option<String>,
    /// Quote currency, when known.
    pub quote_currency: Option<String>,
    /// Minimum meaningful price increment.
    pub tick_size: f64,
    /// Units in one lot.
    pub units_per_lot: f64,
    /// Instrument family.
    pub class: InstrumentClass,
}

impl InstrumentSpec {
    /// Resolve metadata from the static table, falling back to a 3/3 split
    /// of six-letter codes. Unknown shapes get FX defaults and no currencies.
    #[must_use]
    pub fn resolve(symbol: &Symbol) -> Self {
        let (base, quote, class) = INSTRUMENT_TABLE
            .iter()
            .find(|(code, ..)| *code == symbol.as_str())
            .map(|(_, base, quote, class)| (Some(*base), Some(*quote), *class))
            .or_else(|| {
                symbol
                    .currency_pair()
                    .map(|(base, quote)| (Some(base), Some(quote), InstrumentClass::Forex))
            })
            .unwrap_or((None, None, InstrumentClass::Forex));

        let tick_size = match class {
            InstrumentClass::Metal => METAL_TICK_SIZE,
            InstrumentClass::Forex if quote == Some("JPY") => JPY_TICK_SIZE,
            InstrumentClass::Forex => DEFAULT_TICK_SIZE,
        };
        let units_per_lot = match class {
            InstrumentClass::Metal => METAL_UNITS_PER_LOT,
            InstrumentClass::Forex => FX_UNITS_PER_LOT,
        };

        Self {
            symbol: symbol.clone(),
            base_currency: base.map(str::to_string),
            quote_currency: quote.map(str::to_string),
            tick_size,
            units_per_lot,
            class,
        }
    }

    /// Apply a contract-size override. Only metals honour it, and only
    /// positive finite values.
    #[must_use]
    pub fn with_contract_size(mut self, contract_size: Option<f64>) -> Self {
        if self.is_metal()
            && let Some(size) = contract_size.filter(|s| s.is_finite() && *s > 0.0)
        {
            self.units_per_lot = size;
        }
        self
    }

    /// Whether this is the metal instrument.
    #[must_use]
    pub fn is_metal(&self) -> bool {
        self.class == InstrumentClass::Metal
    }

    /// Whether `currency` matches neither side of the pair.
    #[must_use]
    pub fn needs_conversion(&self, currency: &str) -> bool {
        let currency = currency.trim().to_uppercase();
        self.base_currency.as_deref() != Some(currency.as_str())
            && self.quote_currency.as_deref() != Some(currency.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec(symbol: &str) -> InstrumentSpec {
        InstrumentSpec::resolve(&Symbol::new(symbol))
    }

    #[test]
    fn table_entry_for_metal() {
        let gold = spec("XAUUSD");
        assert!(gold.is_metal());
        assert_eq!(gold.base_currency.as_deref(), Some("XAU"));
        assert_eq!(gold.tick_size, METAL_TICK_SIZE);
        assert_eq!(gold.units_per_lot, METAL_UNITS_PER_LOT);
    }

    #[test]
    fn six_letter_pairs_are_derived() {
        let eurgbp = spec("EURGBP");
        assert_eq!(eurgbp.base_currency.as_deref(), Some("EUR"));
        assert_eq!(eurgbp.quote_currency.as_deref(), Some("GBP"));
        assert_eq!(eurgbp.tick_size, DEFAULT_TICK_SIZE);
        assert_eq!(eurgbp.units_per_lot, FX_UNITS_PER_LOT);
    }

    #[test]
    fn jpy_quoted_pairs_use_wide_tick() {
        assert_eq!(spec("USDJPY").tick_size, JPY_TICK_SIZE);
        assert_eq!(spec("CADJPY").tick_size, JPY_TICK_SIZE);
        assert_eq!(spec("JPYUSD").tick_size, DEFAULT_TICK_SIZE);
    }

    #[test]
    fn unknown_symbols_get_defaults() {
        let idx = spec("US30");
        assert_eq!(idx.base_currency, None);
        assert_eq!(idx.quote_currency, None);
        assert_eq!(idx.tick_size, DEFAULT_TICK_SIZE);
        assert!(idx.needs_conversion("USD"));
    }

    #[test]
    fn contract_size_override_applies_to_metal_only() {
        assert_eq!(spec("XAUUSD").with_contract_size(Some(10.0)).units_per_lot, 10.0);
        assert_eq!(
            spec("EURUSD").with_contract_size(Some(10.0)).units_per_lot,
            FX_UNITS_PER_LOT
        );
        assert_eq!(
            spec("XAUUSD").with_contract_size(Some(-1.0)).units_per_lot,
            METAL_UNITS_PER_LOT
        );
    }

    #[test]
    fn conversion_needed_only_for_third_currency() {
        let eurusd = spec("EURUSD");
        assert!(!eurusd.needs_conversion("USD"));
        assert!(!eurusd.needs_conversion("eur"));
        assert!(eurusd.needs_conversion("GBP"));
    }
}
