//! Display-only scaling
//!
//! The function generator reports some values in milli- or micro-units.
//! The panel shows them scaled, but the wire value is never touched and
//! edits are sent back exactly as typed.

use crate::protocol::ScalarValue;

/// Divisor and decimal precision for one identifier
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Scaling {
    pub divisor: f64,
    pub precision: usize,
}

impl Scaling {
    pub fn format(&self, value: f64) -> String {
        format!("{:.*}", self.precision, value / self.divisor)
    }
}

/// Fixed identifier -> scaling map
#[derive(Debug, Clone)]
pub struct ScalingTable {
    entries: Vec<(&'static str, Scaling)>,
}

impl Default for ScalingTable {
    fn default() -> Self {
        let milli = Scaling {
            divisor: 1_000.0,
            precision: 2,
        };
        let micro = Scaling {
            divisor: 1_000_000.0,
            precision: 3,
        };
        Self {
            entries: vec![
                ("funcOffs", milli),
                ("funcAmpl", milli),
                ("funcLow", milli),
                ("funcHigh", milli),
                ("funcFreq", micro),
            ],
        }
    }
}

impl ScalingTable {
    pub fn get(&self, id: &str) -> Option<Scaling> {
        self.entries.iter().find(|(key, _)| *key == id).map(|(_, s)| *s)
    }

    pub fn ids(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().map(|(key, _)| *key)
    }

    /// Text to show in the control bound to `id`
    pub fn display(&self, id: &str, value: &ScalarValue) -> String {
        let Some(scaling) = self.get(id) else {
            return value.raw();
        };
        match value.as_f64() {
            Some(v) => scaling.format(v),
            None => {
                log::warn!("{}: '{}' is not numeric, showing unscaled", id, value.raw());
                value.raw()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn number(v: i64) -> ScalarValue {
        ScalarValue::Number(v.into())
    }

    #[test]
    fn test_function_generator_scaling() {
        let table = ScalingTable::default();
        assert_eq!(table.display("funcFreq", &number(1_500_000)), "1.500");
        assert_eq!(table.display("funcAmpl", &number(250)), "0.25");
        assert_eq!(table.display("funcOffs", &number(-1200)), "-1.20");
        assert_eq!(table.display("funcHigh", &ScalarValue::Text("3300".into())), "3.30");
    }

    #[test]
    fn test_unlisted_ids_pass_through() {
        let table = ScalingTable::default();
        assert_eq!(table.display("ch1Offs", &number(250)), "250");
        assert_eq!(table.display("ch1Coup", &ScalarValue::Text("DC".into())), "DC");
    }

    #[test]
    fn test_non_numeric_falls_back_to_raw() {
        let table = ScalingTable::default();
        assert_eq!(table.display("funcLow", &ScalarValue::Text("n/a".into())), "n/a");
    }
}
