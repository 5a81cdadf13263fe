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

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::rolling::rolling_std;
use crate::series::PriceSeries;

/// Quick statistics over a price series
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesSummary {
    /// Most recent price
    pub latest_price: f64,
    /// Timestamp of the most recent sample
    pub latest_timestamp: DateTime<Utc>,
    /// Rolling standard deviation of the price at the tail of the
    /// series; None until the window has filled
    pub rolling_volatility: Option<f64>,
    /// Window used for the rolling volatility
    pub volatility_window: usize,
    /// Fractional change from the first to the last sample
    pub percent_change: f64,
    /// Number of samples in the series
    pub sample_count: usize,
    /// Days between the first and last sample
    pub span_days: i64,
}

/// Compute quick statistics for a series.
///
/// `volatility_window` is the number of samples in the rolling
/// standard deviation (the dashboard uses 30).
pub fn summarize(series: &PriceSeries, volatility_window: usize) -> SeriesSummary {
    let volatility = rolling_std(&series.prices(), volatility_window)
        .last()
        .copied()
        .filter(|v| v.is_finite());

    SeriesSummary {
        latest_price: series.last().price,
        latest_timestamp: series.last().timestamp,
        rolling_volatility: volatility,
        volatility_window,
        percent_change: series.percent_change(),
        sample_count: series.len(),
        span_days: (series.last().timestamp - series.first().timestamp).num_days(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::series::PricePoint;
    use chrono::TimeZone;

    fn make_series(prices: &[f64]) -> PriceSeries {
        let base = Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap();
        let points = prices
            .iter()
            .enumerate()
            .map(|(i, &price)| PricePoint::new(base + chrono::Duration::days(i as i64), price))
            .collect();
        PriceSeries::new(points).unwrap()
    }

    #[test]
    fn test_summary_fields() {
        let series = make_series(&[100.0, 110.0, 120.0, 130.0]);
        let summary = summarize(&series, 2);

        assert!((summary.latest_price - 130.0).abs() < 1e-12);
        assert_eq!(summary.sample_count, 4);
        assert_eq!(summary.span_days, 3);
        assert!((summary.percent_change - 0.3).abs() < 1e-12);

        // Std of [120, 130] with the n-1 denominator
        let vol = summary.rolling_volatility.unwrap();
        assert!((vol - 50.0_f64.sqrt()).abs() < 1e-10);
    }

    #[test]
    fn test_summary_volatility_none_while_window_unfilled() {
        let series = make_series(&[100.0, 110.0]);
        let summary = summarize(&series, 30);
        assert_eq!(summary.rolling_volatility, None);
    }
}
