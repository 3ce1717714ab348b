use serde::{Deserialize, Serialize};

/// Configuration for a [`Track`](crate::Track)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackConfig {
    /// Bar length as a measure literal, e.g. `"1"` or `"3/4"`
    pub bar: String,
    /// Tempo in BPM until the first tempo event
    pub tempo: f64,
    /// Upper bound on bars rendered by one call
    pub max_bars: usize,
}

impl Default for TrackConfig {
    fn default() -> Self {
        TrackConfig {
            bar: "1".to_string(),
            tempo: 120.0,
            max_bars: 1024,
        }
    }
}
