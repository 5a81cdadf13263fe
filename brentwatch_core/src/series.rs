// SPDX-License-Identifier: MIT
//
// Copyright (c) 2025 Brentwatch Contributors
//
// Permission is hereby granted, free of charge, to any person obtaining a copy
// of this software and associated documentation files (the "Software"), to deal
// in the Software without restriction, including without limitation the rights
// to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
// copies of the Software, and to permit persons to whom the Software is
// furnished to do so, subject to the following conditions:
//
// The above copyright notice and this permission notice shall be included in all
// copies or substantial portions of the Software.

use chrono::{DateTime, Datelike, Utc};
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error types for price series construction
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SeriesError {
    /// The series contains no samples
    #[error("Price series is empty")]
    Empty,

    /// A timestamp is not strictly greater than its predecessor
    #[error("Timestamps are not strictly increasing at index {index}")]
    NonMonotonicTimestamp { index: usize },

    /// A price is zero, negative, or not finite
    #[error("Invalid price {price} at index {index} (must be positive and finite)")]
    InvalidPrice { index: usize, price: f64 },
}

/// Result type for series operations
pub type SeriesResult<T> = Result<T, SeriesError>;

/// A single timestamped price observation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    /// Observation timestamp
    pub timestamp: DateTime<Utc>,
    /// Observed price, positive and finite
    pub price: f64,
}

impl PricePoint {
    /// Create a new price point
    pub fn new(timestamp: DateTime<Utc>, price: f64) -> Self {
        Self { timestamp, price }
    }
}

/// A validated, time-ordered price series.
///
/// Construction enforces the invariants every consumer in this crate
/// relies on: at least one sample, strictly increasing timestamps, and
/// positive finite prices. An invalid series is unrepresentable, so the
/// scan-style computations downstream never re-check shape mid-pass.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceSeries {
    points: Vec<PricePoint>,
}

impl PriceSeries {
    /// Validate and wrap a sequence of price points.
    ///
    /// Returns the first violation found: an empty input, a timestamp
    /// that does not strictly increase, or a non-positive/non-finite
    /// price. The offending index is carried in the error.
    pub fn new(points: Vec<PricePoint>) -> SeriesResult<Self> {
        if points.is_empty() {
            return Err(SeriesError::Empty);
        }

        for (index, point) in points.iter().enumerate() {
            if !point.price.is_finite() || point.price <= 0.0 {
                return Err(SeriesError::InvalidPrice {
                    index,
                    price: point.price,
                });
            }
        }

        for ((_, previous), (index, current)) in points.iter().enumerate().tuple_windows() {
            if current.timestamp <= previous.timestamp {
                return Err(SeriesError::NonMonotonicTimestamp { index });
            }
        }

        Ok(Self { points })
    }

    /// Number of samples in the series, always at least 1
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Always false; a validated series holds at least one sample
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// The underlying samples in time order
    pub fn points(&self) -> &[PricePoint] {
        &self.points
    }

    /// Prices only, in time order
    pub fn prices(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.price).collect()
    }

    /// First sample of the series
    pub fn first(&self) -> &PricePoint {
        &self.points[0]
    }

    /// Last sample of the series
    pub fn last(&self) -> &PricePoint {
        &self.points[self.points.len() - 1]
    }

    /// Sample at `index`, if present
    pub fn get(&self, index: usize) -> Option<&PricePoint> {
        self.points.get(index)
    }

    /// Absolute price change from the first to the last sample
    pub fn price_change(&self) -> f64 {
        self.last().price - self.first().price
    }

    /// Fractional price change from the first to the last sample
    pub fn percent_change(&self) -> f64 {
        (self.last().price - self.first().price) / self.first().price
    }

    /// Downsample to one point per calendar month.
    ///
    /// Each output point carries the arithmetic mean of the month's
    /// prices, stamped with the month's last observed timestamp so the
    /// result is itself a valid series.
    pub fn monthly_mean(&self) -> SeriesResult<PriceSeries> {
        self.bucket_mean(|point| (point.timestamp.year(), point.timestamp.month()))
    }

    /// Downsample to one point per calendar year, mean-valued like
    /// [`monthly_mean`](Self::monthly_mean).
    pub fn yearly_mean(&self) -> SeriesResult<PriceSeries> {
        self.bucket_mean(|point| (point.timestamp.year(), 0))
    }

    fn bucket_mean<K, F>(&self, key_of: F) -> SeriesResult<PriceSeries>
    where
        K: PartialEq,
        F: Fn(&PricePoint) -> K,
    {
        let mut resampled: Vec<PricePoint> = Vec::new();
        let mut bucket_key = key_of(&self.points[0]);
        let mut bucket_sum = 0.0;
        let mut bucket_count = 0usize;
        let mut bucket_last = self.points[0].timestamp;

        for point in &self.points {
            let key = key_of(point);
            if key != bucket_key {
                resampled.push(PricePoint::new(bucket_last, bucket_sum / bucket_count as f64));
                bucket_key = key;
                bucket_sum = 0.0;
                bucket_count = 0;
            }
            bucket_sum += point.price;
            bucket_count += 1;
            bucket_last = point.timestamp;
        }
        resampled.push(PricePoint::new(bucket_last, bucket_sum / bucket_count as f64));

        PriceSeries::new(resampled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn stamp(day_offset: i64) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap() + chrono::Duration::days(day_offset)
    }

    fn make_series(prices: &[f64]) -> PriceSeries {
        let points = prices
            .iter()
            .enumerate()
            .map(|(i, &price)| PricePoint::new(stamp(i as i64), price))
            .collect();
        PriceSeries::new(points).unwrap()
    }

    #[test]
    fn test_rejects_empty_input() {
        assert_eq!(PriceSeries::new(Vec::new()), Err(SeriesError::Empty));
    }

    #[test]
    fn test_rejects_non_monotonic_timestamps() {
        let points = vec![
            PricePoint::new(stamp(0), 100.0),
            PricePoint::new(stamp(2), 101.0),
            PricePoint::new(stamp(2), 102.0),
        ];
        assert_eq!(
            PriceSeries::new(points),
            Err(SeriesError::NonMonotonicTimestamp { index: 2 })
        );
    }

    #[test]
    fn test_rejects_non_positive_price() {
        let points = vec![
            PricePoint::new(stamp(0), 100.0),
            PricePoint::new(stamp(1), 0.0),
        ];
        assert_eq!(
            PriceSeries::new(points),
            Err(SeriesError::InvalidPrice {
                index: 1,
                price: 0.0
            })
        );
    }

    #[test]
    fn test_rejects_non_finite_price() {
        let points = vec![
            PricePoint::new(stamp(0), 100.0),
            PricePoint::new(stamp(1), f64::NAN),
        ];
        assert!(matches!(
            PriceSeries::new(points),
            Err(SeriesError::InvalidPrice { index: 1, .. })
        ));
    }

    #[test]
    fn test_percent_change() {
        let series = make_series(&[100.0, 110.0, 125.0]);
        assert!((series.percent_change() - 0.25).abs() < 1e-12);
        assert!((series.price_change() - 25.0).abs() < 1e-12);
    }

    #[test]
    fn test_monthly_mean_buckets_by_calendar_month() {
        // Jan 2020 has 31 days; days 0..31 fall in January, 31..60 in February
        let prices: Vec<f64> = (0..45).map(|i| 100.0 + i as f64).collect();
        let series = make_series(&prices);

        let monthly = series.monthly_mean().unwrap();
        assert_eq!(monthly.len(), 2);

        // January: prices 100..=130, mean 115
        assert!((monthly.points()[0].price - 115.0).abs() < 1e-9);
        // February: prices 131..=144, mean 137.5
        assert!((monthly.points()[1].price - 137.5).abs() < 1e-9);

        // Stamped with the bucket's last observed timestamp
        assert_eq!(monthly.points()[0].timestamp, stamp(30));
        assert_eq!(monthly.points()[1].timestamp, stamp(44));
    }

    #[test]
    fn test_yearly_mean_single_bucket() {
        let series = make_series(&[100.0, 200.0, 300.0]);
        let yearly = series.yearly_mean().unwrap();
        assert_eq!(yearly.len(), 1);
        assert!((yearly.points()[0].price - 200.0).abs() < 1e-9);
    }

    #[test]
    fn test_single_sample_series_is_valid() {
        let series = make_series(&[42.0]);
        assert_eq!(series.len(), 1);
        assert_eq!(series.first(), series.last());
    }
}
