//! Demand series input type.
//!
//! A `DemandSeries` is the validated, read-only input to every analysis
//! operation: one SKU's ordered (timestamp, quantity) history. Ordering and
//! value invariants are checked once at construction so the numeric
//! primitives can assume a well-formed slice.

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

use crate::error::{AnalysisError, Result};

/// One observation of demand for a SKU.
#[derive(Clone, Copy, Debug, Serialize)]
pub struct DemandPoint {
    pub timestamp: DateTime<Utc>,
    pub quantity: f64,
}

/// An ordered demand history for a single SKU.
///
/// Invariants (checked at construction):
/// - timestamps strictly increasing
/// - quantities non-negative and finite
#[derive(Clone, Debug, Serialize)]
pub struct DemandSeries {
    points: Vec<DemandPoint>,
}

impl DemandSeries {
    /// Build a series from observations, validating the invariants.
    pub fn new(points: Vec<DemandPoint>) -> Result<Self> {
        for (index, point) in points.iter().enumerate() {
            if !point.quantity.is_finite() || point.quantity < 0.0 {
                return Err(AnalysisError::InvalidQuantity {
                    index,
                    value: point.quantity,
                });
            }
            if index > 0 && point.timestamp <= points[index - 1].timestamp {
                return Err(AnalysisError::NonChronological { index });
            }
        }
        Ok(Self { points })
    }

    /// Build a daily series starting at `start` from raw quantities.
    /// Convenient for fixtures and callers with implicit daily sampling.
    pub fn from_daily_values(start: DateTime<Utc>, values: &[f64]) -> Result<Self> {
        let points = values
            .iter()
            .enumerate()
            .map(|(i, &quantity)| DemandPoint {
                timestamp: start + Duration::days(i as i64),
                quantity,
            })
            .collect();
        Self::new(points)
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn points(&self) -> &[DemandPoint] {
        &self.points
    }

    /// Quantities in time order, detached from their timestamps. The numeric
    /// primitives operate on this index-aligned view.
    pub fn quantities(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.quantity).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn day(offset: i64) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap() + Duration::days(offset)
    }

    #[test]
    fn accepts_well_formed_series() {
        let series = DemandSeries::new(vec![
            DemandPoint { timestamp: day(0), quantity: 5.0 },
            DemandPoint { timestamp: day(1), quantity: 0.0 },
            DemandPoint { timestamp: day(2), quantity: 12.5 },
        ])
        .unwrap();
        assert_eq!(series.len(), 3);
        assert_eq!(series.quantities(), vec![5.0, 0.0, 12.5]);
    }

    #[test]
    fn rejects_non_increasing_timestamps() {
        let result = DemandSeries::new(vec![
            DemandPoint { timestamp: day(1), quantity: 1.0 },
            DemandPoint { timestamp: day(1), quantity: 2.0 },
        ]);
        assert!(matches!(
            result,
            Err(AnalysisError::NonChronological { index: 1 })
        ));
    }

    #[test]
    fn rejects_negative_quantity() {
        let result = DemandSeries::new(vec![DemandPoint {
            timestamp: day(0),
            quantity: -3.0,
        }]);
        assert!(matches!(
            result,
            Err(AnalysisError::InvalidQuantity { index: 0, .. })
        ));
    }

    #[test]
    fn rejects_nan_quantity() {
        let result = DemandSeries::new(vec![DemandPoint {
            timestamp: day(0),
            quantity: f64::NAN,
        }]);
        assert!(matches!(result, Err(AnalysisError::InvalidQuantity { .. })));
    }

    #[test]
    fn daily_builder_spaces_points_one_day_apart() {
        let series = DemandSeries::from_daily_values(day(0), &[1.0, 2.0, 3.0]).unwrap();
        let points = series.points();
        assert_eq!(points[2].timestamp - points[0].timestamp, Duration::days(2));
    }
}
