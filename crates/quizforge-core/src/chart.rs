//! Display parameters for bar charts.
//!
//! Picks a rounded axis maximum, a category gap, and a bar thickness from
//! the shape of the dataset. These are readability heuristics only.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Chart height the bar-size table is tuned for.
pub const REFERENCE_HEIGHT: f64 = 400.0;
pub const MIN_BAR_SIZE: f64 = 10.0;
pub const MAX_BAR_SIZE: f64 = 80.0;

/// Axis maximum used when the data has no positive value.
const FALLBACK_MAX: f64 = 10.0;

/// (max cardinality, gap, bar size); the last row covers everything larger.
const SIZING: [(usize, f64, f64); 5] = [
    (2, 50.0, 60.0),
    (4, 30.0, 48.0),
    (8, 15.0, 36.0),
    (16, 8.0, 24.0),
    (usize::MAX, 4.0, 16.0),
];

/// One chart datum: field name to number or numeric string.
pub type ChartRecord = Map<String, Value>;

/// Caller-supplied values that replace the computed ones.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ChartOverrides {
    pub max_value: Option<f64>,
    pub gap: Option<f64>,
    pub bar_size: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartParams {
    pub max_value: f64,
    pub gap: f64,
    pub bar_size: f64,
}

impl ChartParams {
    /// Derive parameters for plotting `key` across `records`.
    pub fn derive(
        records: &[ChartRecord],
        key: &str,
        overrides: ChartOverrides,
        chart_height: f64,
    ) -> Self {
        let values: Vec<f64> = records
            .iter()
            .filter_map(|r| r.get(key).and_then(numeric))
            .collect();
        Self::from_values(&values, records.len(), overrides, chart_height)
    }

    /// Derive parameters from plain values; `cardinality` is the number of
    /// categories on the axis.
    pub fn from_values(
        values: &[f64],
        cardinality: usize,
        overrides: ChartOverrides,
        chart_height: f64,
    ) -> Self {
        let data_max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let (gap, base_bar) = sizing_for(cardinality);
        let scale = if chart_height > 0.0 {
            chart_height / REFERENCE_HEIGHT
        } else {
            1.0
        };

        Self {
            max_value: overrides.max_value.unwrap_or_else(|| nice_max(data_max)),
            gap: overrides.gap.unwrap_or(gap),
            bar_size: overrides
                .bar_size
                .unwrap_or_else(|| (base_bar * scale).clamp(MIN_BAR_SIZE, MAX_BAR_SIZE)),
        }
    }
}

fn sizing_for(cardinality: usize) -> (f64, f64) {
    SIZING
        .iter()
        .find(|(limit, _, _)| cardinality <= *limit)
        .map_or((4.0, 16.0), |(_, gap, bar)| (*gap, *bar))
}

fn numeric(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
    .filter(|v| v.is_finite())
}

/// Smallest value of the 1-2-5-10 ladder (scaled by a power of ten) that is
/// at least `max`.
pub fn nice_max(max: f64) -> f64 {
    if !max.is_finite() || max <= 0.0 {
        return FALLBACK_MAX;
    }
    let magnitude = 10f64.powf(max.log10().floor());
    let normalized = max / magnitude;
    let step = [1.0, 2.0, 5.0, 10.0]
        .into_iter()
        // Tolerate float noise so exact ladder values map to themselves.
        .find(|s| normalized <= s + 1e-9)
        .unwrap_or(10.0);
    step * magnitude
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn records(values: &[Value]) -> Vec<ChartRecord> {
        values
            .iter()
            .enumerate()
            .map(|(i, v)| {
                let mut m = Map::new();
                m.insert("name".into(), json!(format!("S{i}")));
                m.insert("score".into(), v.clone());
                m
            })
            .collect()
    }

    #[test]
    fn nice_max_ladder() {
        assert_eq!(nice_max(7.0), 10.0);
        assert_eq!(nice_max(10.0), 10.0);
        assert_eq!(nice_max(11.0), 20.0);
        assert_eq!(nice_max(42.0), 50.0);
        assert_eq!(nice_max(87.5), 100.0);
        assert_eq!(nice_max(100.0), 100.0);
        assert_eq!(nice_max(120.0), 200.0);
        assert_eq!(nice_max(0.3), 0.5);
        assert_eq!(nice_max(0.0), FALLBACK_MAX);
        assert_eq!(nice_max(f64::NEG_INFINITY), FALLBACK_MAX);
    }

    #[test]
    fn gap_table_by_cardinality() {
        let gap = |n: usize| ChartParams::from_values(&[1.0], n, ChartOverrides::default(), 400.0).gap;
        assert_eq!(gap(1), 50.0);
        assert_eq!(gap(2), 50.0);
        assert_eq!(gap(3), 30.0);
        assert_eq!(gap(8), 15.0);
        assert_eq!(gap(16), 8.0);
        assert_eq!(gap(17), 4.0);
    }

    #[test]
    fn bar_size_scales_and_clamps() {
        let bar = |n: usize, h: f64| {
            ChartParams::from_values(&[1.0], n, ChartOverrides::default(), h).bar_size
        };
        assert_eq!(bar(2, 400.0), 60.0);
        assert_eq!(bar(2, 200.0), 30.0);
        assert_eq!(bar(2, 800.0), MAX_BAR_SIZE);
        assert_eq!(bar(30, 100.0), MIN_BAR_SIZE);
    }

    #[test]
    fn derive_reads_numbers_and_numeric_strings() {
        let data = records(&[json!(45), json!("78.5"), json!("n/a"), json!(null)]);
        let params = ChartParams::derive(&data, "score", ChartOverrides::default(), 400.0);
        assert_eq!(params.max_value, 100.0);
        assert_eq!(params.gap, 30.0);
        assert_eq!(params.bar_size, 48.0);
    }

    #[test]
    fn overrides_win() {
        let data = records(&[json!(3)]);
        let overrides = ChartOverrides {
            max_value: Some(100.0),
            gap: None,
            bar_size: Some(5.0),
        };
        let params = ChartParams::derive(&data, "score", overrides, 400.0);
        assert_eq!(params.max_value, 100.0);
        assert_eq!(params.gap, 50.0);
        assert_eq!(params.bar_size, 5.0);
    }

    #[test]
    fn missing_key_falls_back() {
        let data = records(&[json!(3), json!(4)]);
        let params = ChartParams::derive(&data, "absent", ChartOverrides::default(), 400.0);
        assert_eq!(params.max_value, FALLBACK_MAX);
    }
}
