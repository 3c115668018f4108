//! FILENAME: pivot-engine/src/series.rs
//! Data Series - summary statistics over one numeric column, for charting.
//!
//! Typical input is one column of a pivot result. Only non-null points count
//! toward the statistics.

use log::warn;
use records::Record;
use serde::{Deserialize, Serialize};

use crate::accumulator::numeric_value;
use crate::error::Result;

/// Minimum, maximum and average over the non-null points of a series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeriesStats {
    pub min: Option<f64>,
    pub max: Option<f64>,
    /// 0 when there are no points.
    pub avg: f64,
    pub points: usize,
}

impl SeriesStats {
    pub fn of(series: &[Option<f64>]) -> Self {
        let mut min: Option<f64> = None;
        let mut max: Option<f64> = None;
        let mut sum = 0.0;
        let mut points = 0;

        for v in series.iter().flatten() {
            points += 1;
            min = Some(min.map_or(*v, |m| m.min(*v)));
            max = Some(max.map_or(*v, |m| m.max(*v)));
            sum += v;
        }

        SeriesStats {
            min,
            max,
            avg: if points == 0 { 0.0 } else { sum / points as f64 },
            points,
        }
    }
}

/// Rounds half up, the way chart percentages have always been rounded.
fn round_half_up(v: f64) -> i64 {
    (v + 0.5).floor() as i64
}

/// Scales a series to whole-number percentages of its maximum.
/// Nulls stay null. A series whose max is 0 (or that has no points) cannot be
/// scaled and yields an empty vector.
pub fn normalize_to_percentages(series: &[Option<f64>]) -> Vec<Option<i64>> {
    let max = match SeriesStats::of(series).max {
        Some(max) if max != 0.0 => max,
        _ => {
            warn!("Data series has a max value of 0 or no points, cannot convert to percentages");
            return Vec::new();
        }
    };

    series
        .iter()
        .map(|v| v.map(|v| round_half_up(v / max * 100.0)))
        .collect()
}

/// A named numeric series with its statistics and a percentage rendition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataSeries {
    pub name: String,
    pub series: Vec<Option<f64>>,
    /// Unset for an empty series.
    pub stats: Option<SeriesStats>,
    pub pct_series: Vec<Option<i64>>,
    pub pct_min: Option<i64>,
    pub pct_max: Option<i64>,
    pub pct_avg: Option<i64>,
}

impl DataSeries {
    pub fn new(name: impl Into<String>, series: Vec<Option<f64>>) -> Self {
        let mut data = DataSeries {
            name: name.into(),
            series,
            stats: None,
            pct_series: Vec::new(),
            pct_min: None,
            pct_max: None,
            pct_avg: None,
        };
        if data.series.is_empty() {
            return data;
        }

        data.stats = Some(SeriesStats::of(&data.series));
        data.pct_series = normalize_to_percentages(&data.series);

        let pct: Vec<Option<f64>> = data.pct_series.iter().map(|p| p.map(|p| p as f64)).collect();
        let pct_stats = SeriesStats::of(&pct);
        if pct_stats.points > 0 {
            data.pct_min = pct_stats.min.map(round_half_up);
            data.pct_max = pct_stats.max.map(round_half_up);
            data.pct_avg = Some(round_half_up(pct_stats.avg));
        }
        data
    }

    /// Builds a series from one column of a table. Missing cells are null;
    /// non-numeric cells are an error.
    pub fn from_column(table: &[Record], column: &str) -> Result<Self> {
        let values = table
            .iter()
            .enumerate()
            .map(|(i, row)| numeric_value(row, column, i))
            .collect::<Result<Vec<_>>>()?;
        Ok(DataSeries::new(column, values))
    }

    pub fn min(&self) -> Option<f64> {
        self.stats.and_then(|s| s.min)
    }

    pub fn max(&self) -> Option<f64> {
        self.stats.and_then(|s| s.max)
    }

    pub fn avg(&self) -> Option<f64> {
        self.stats.map(|s| s.avg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EngineError;

    #[test]
    fn statistics_skip_nulls() {
        let s = DataSeries::new("dog", vec![Some(200.0), None, Some(110.0), Some(50.0)]);
        assert_eq!(s.min(), Some(50.0));
        assert_eq!(s.max(), Some(200.0));
        assert_eq!(s.avg(), Some(120.0));
        assert_eq!(s.pct_series, vec![Some(100), None, Some(55), Some(25)]);
        assert_eq!(s.pct_min, Some(25));
        assert_eq!(s.pct_max, Some(100));
        assert_eq!(s.pct_avg, Some(60));
    }

    #[test]
    fn zero_max_cannot_be_normalized() {
        let s = DataSeries::new("flat", vec![Some(0.0), Some(-4.0)]);
        assert_eq!(s.max(), Some(0.0));
        assert!(s.pct_series.is_empty());
        assert_eq!(s.pct_avg, None);
    }

    #[test]
    fn empty_series_leaves_everything_unset() {
        let s = DataSeries::new("none", Vec::new());
        assert_eq!(s.stats, None);
        assert_eq!(s.avg(), None);
        assert!(s.pct_series.is_empty());
    }

    #[test]
    fn all_null_series_averages_to_zero() {
        let stats = SeriesStats::of(&[None, None]);
        assert_eq!(stats.min, None);
        assert_eq!(stats.avg, 0.0);
        assert_eq!(stats.points, 0);
    }

    #[test]
    fn from_pivot_column() {
        let table = vec![
            Record::new().with("state", "IL").with("dog", 200.0),
            Record::new().with("state", "MN").with("dog", 110.0),
            Record::new().with("state", "WI"),
        ];
        let s = DataSeries::from_column(&table, "dog").unwrap();
        assert_eq!(s.name, "dog");
        assert_eq!(s.series, vec![Some(200.0), Some(110.0), None]);

        let err = DataSeries::from_column(&table, "state").unwrap_err();
        assert!(matches!(err, EngineError::TypeMismatch { row: 0, .. }));
    }
}
