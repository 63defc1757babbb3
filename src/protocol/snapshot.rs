//! Inbound state snapshots
//!
//! Every message the server pushes is a flat JSON object. Keys fall into
//! three disjoint classes:
//!
//! - `wave1` / `wave2`: space-delimited signed samples for one channel
//! - `<id>.range`: the option labels for the selection control `<id>`
//! - anything else: a scalar bound to the control `<id>`
//!
//! Classification happens once, here, so later stages never have to
//! re-examine a key that belongs to another class.

use serde_json::{Map, Value};

use crate::error::PanelError;

/// Suffix marking an option-list key
pub const RANGE_SUFFIX: &str = ".range";

/// One of the two instrument channels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    One,
    Two,
}

impl Channel {
    pub const ALL: [Channel; 2] = [Channel::One, Channel::Two];

    /// Snapshot key carrying this channel's samples
    pub fn wave_key(&self) -> &'static str {
        match self {
            Channel::One => "wave1",
            Channel::Two => "wave2",
        }
    }

    fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.wave_key() == key)
    }
}

/// Samples for one channel, in message order
#[derive(Debug, Clone, PartialEq)]
pub struct Waveform {
    pub channel: Channel,
    pub samples: Vec<i32>,
}

/// Option labels for a selection control
#[derive(Debug, Clone, PartialEq)]
pub struct RangeEntry {
    /// Control identifier (the key without `.range`)
    pub id: String,
    pub options: Vec<String>,
}

/// A scalar value as received on the wire
#[derive(Debug, Clone, PartialEq)]
pub enum ScalarValue {
    Number(serde_json::Number),
    Text(String),
    Bool(bool),
}

impl ScalarValue {
    /// Numeric view of the value, parsing strings the way the server formats them
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            ScalarValue::Number(n) => n.as_f64(),
            ScalarValue::Text(s) => s.trim().parse().ok(),
            ScalarValue::Bool(_) => None,
        }
    }

    /// The value exactly as it should appear in a control, unscaled
    pub fn raw(&self) -> String {
        match self {
            ScalarValue::Number(n) => n.to_string(),
            ScalarValue::Text(s) => s.clone(),
            ScalarValue::Bool(b) => b.to_string(),
        }
    }
}

/// A scalar bound to a single control
#[derive(Debug, Clone, PartialEq)]
pub struct ScalarEntry {
    pub id: String,
    pub value: ScalarValue,
}

/// A parsed inbound message
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Snapshot {
    /// Waveforms in channel order; absent or empty channels are omitted
    pub waves: Vec<Waveform>,
    pub ranges: Vec<RangeEntry>,
    pub scalars: Vec<ScalarEntry>,
}

impl Snapshot {
    /// Parse one socket message
    ///
    /// Fails only when the payload is not a JSON object. Individual keys with
    /// the wrong shape are skipped so the rest of the message still applies.
    pub fn parse(text: &str) -> Result<Self, PanelError> {
        let value: Value = serde_json::from_str(text)?;
        match value {
            Value::Object(fields) => Ok(Self::from_fields(fields)),
            _ => Err(PanelError::NotAnObject),
        }
    }

    fn from_fields(fields: Map<String, Value>) -> Self {
        let mut snapshot = Snapshot::default();
        let mut waves: [Option<Waveform>; 2] = [None, None];

        for (key, value) in fields {
            if let Some(channel) = Channel::from_key(&key) {
                let slot = match channel {
                    Channel::One => 0,
                    Channel::Two => 1,
                };
                waves[slot] = parse_wave(channel, &value);
            } else if let Some(id) = key.strip_suffix(RANGE_SUFFIX) {
                match parse_range(&value) {
                    Some(options) => snapshot.ranges.push(RangeEntry {
                        id: id.to_string(),
                        options,
                    }),
                    None => log::debug!("ignoring malformed range for {}", key),
                }
            } else {
                match parse_scalar(value) {
                    Some(value) => snapshot.scalars.push(ScalarEntry { id: key, value }),
                    None => log::debug!("ignoring non-scalar value for {}", key),
                }
            }
        }

        snapshot.waves = waves.into_iter().flatten().collect();
        snapshot
    }

    /// Whether the message carries anything to draw
    pub fn has_waves(&self) -> bool {
        !self.waves.is_empty()
    }
}

fn parse_wave(channel: Channel, value: &Value) -> Option<Waveform> {
    let Value::String(data) = value else {
        log::debug!("ignoring non-string {}", channel.wave_key());
        return None;
    };

    let mut samples = Vec::new();
    for token in data.split_whitespace() {
        match token.parse::<i32>() {
            Ok(sample) => samples.push(sample),
            Err(e) => {
                log::warn!("dropping {}: bad sample '{}' ({})", channel.wave_key(), token, e);
                return None;
            }
        }
    }

    if samples.is_empty() {
        return None;
    }
    Some(Waveform { channel, samples })
}

fn parse_range(value: &Value) -> Option<Vec<String>> {
    let Value::Array(items) = value else {
        return None;
    };
    Some(
        items
            .iter()
            .filter_map(|item| match item {
                Value::String(s) => Some(s.clone()),
                Value::Number(n) => Some(n.to_string()),
                _ => None,
            })
            .collect(),
    )
}

fn parse_scalar(value: Value) -> Option<ScalarValue> {
    match value {
        Value::Number(n) => Some(ScalarValue::Number(n)),
        Value::String(s) => Some(ScalarValue::Text(s)),
        Value::Bool(b) => Some(ScalarValue::Bool(b)),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classifies_key_classes() {
        let snapshot = Snapshot::parse(
            r#"{"wave1": "1 2 3 ", "src.range": ["a", "b"], "funcFreq": 1500000, "ch1Coup": "DC"}"#,
        )
        .unwrap();

        assert_eq!(snapshot.waves.len(), 1);
        assert_eq!(snapshot.waves[0].channel, Channel::One);
        assert_eq!(snapshot.waves[0].samples, vec![1, 2, 3]);

        assert_eq!(snapshot.ranges.len(), 1);
        assert_eq!(snapshot.ranges[0].id, "src");
        assert_eq!(snapshot.ranges[0].options, vec!["a", "b"]);

        // Range keys never show up as scalars
        let ids: Vec<&str> = snapshot.scalars.iter().map(|s| s.id.as_str()).collect();
        assert!(ids.contains(&"funcFreq"));
        assert!(ids.contains(&"ch1Coup"));
        assert!(!ids.iter().any(|id| id.ends_with(RANGE_SUFFIX)));
        assert!(!ids.contains(&"wave1"));
    }

    #[test]
    fn test_waves_in_channel_order() {
        let snapshot = Snapshot::parse(r#"{"wave2": "-5 5", "wave1": "0"}"#).unwrap();
        let channels: Vec<Channel> = snapshot.waves.iter().map(|w| w.channel).collect();
        assert_eq!(channels, vec![Channel::One, Channel::Two]);
        assert_eq!(snapshot.waves[1].samples, vec![-5, 5]);
    }

    #[test]
    fn test_empty_wave_is_absent() {
        let snapshot = Snapshot::parse(r#"{"wave1": "", "wave2": "   "}"#).unwrap();
        assert!(!snapshot.has_waves());
    }

    #[test]
    fn test_bad_sample_drops_only_that_channel() {
        let snapshot = Snapshot::parse(r#"{"wave1": "1 x 3", "wave2": "4 5"}"#).unwrap();
        assert_eq!(snapshot.waves.len(), 1);
        assert_eq!(snapshot.waves[0].channel, Channel::Two);
    }

    #[test]
    fn test_malformed_nesting_ignored() {
        let snapshot = Snapshot::parse(
            r#"{"nested": {"a": 1}, "list": [1, 2], "nothing": null, "src.range": "a b", "ok": true}"#,
        )
        .unwrap();
        assert!(snapshot.ranges.is_empty());
        assert_eq!(snapshot.scalars.len(), 1);
        assert_eq!(snapshot.scalars[0].value, ScalarValue::Bool(true));
    }

    #[test]
    fn test_non_object_is_error() {
        assert!(matches!(Snapshot::parse("[1, 2]"), Err(PanelError::NotAnObject)));
        assert!(matches!(Snapshot::parse("{not json"), Err(PanelError::Parse(_))));
    }

    #[test]
    fn test_scalar_views() {
        let text = ScalarValue::Text(" 250 ".to_string());
        assert_eq!(text.as_f64(), Some(250.0));
        assert_eq!(text.raw(), " 250 ");

        let snapshot = Snapshot::parse(r#"{"funcFreq": 1500000}"#).unwrap();
        assert_eq!(snapshot.scalars[0].value.raw(), "1500000");
    }
}
