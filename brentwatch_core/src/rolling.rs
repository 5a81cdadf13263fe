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

//! Rolling statistics over raw value slices.
//!
//! All window functions return a vector aligned with the input; the
//! first `window - 1` entries are NaN, the convention chart consumers
//! expect when overlaying a derived column on the source series.

/// Rolling arithmetic mean over `window` samples.
///
/// # Arguments
///
/// * `values` - Input values in time order.
/// * `window` - Number of samples per window.
///
/// # Returns
///
/// A vector of the same length as `values`. The first `window - 1`
/// entries are NaN. A window of 0 or one larger than the input yields
/// an all-NaN vector.
pub fn rolling_mean(values: &[f64], window: usize) -> Vec<f64> {
    if window == 0 || window > values.len() {
        return vec![f64::NAN; values.len()];
    }

    let mut out = Vec::with_capacity(values.len());
    for _ in 0..window - 1 {
        out.push(f64::NAN);
    }

    let mut sum: f64 = values.iter().take(window).sum();
    out.push(sum / window as f64);

    for i in window..values.len() {
        sum = sum - values[i - window] + values[i];
        out.push(sum / window as f64);
    }

    out
}

/// Rolling sample standard deviation over `window` samples.
///
/// Uses the n-1 denominator, matching the dashboard convention for
/// volatility columns. A window of 1 yields zeros past the head; a
/// window of 0 or one larger than the input yields all NaN.
pub fn rolling_std(values: &[f64], window: usize) -> Vec<f64> {
    if window == 0 || window > values.len() {
        return vec![f64::NAN; values.len()];
    }

    let mut out = Vec::with_capacity(values.len());
    for _ in 0..window - 1 {
        out.push(f64::NAN);
    }

    for end in window..=values.len() {
        let slice = &values[end - window..end];
        out.push(sample_std(slice));
    }

    out
}

/// Fractional change between consecutive samples.
///
/// Returns a vector one shorter than the input; empty for inputs with
/// fewer than two samples.
pub fn returns(values: &[f64]) -> Vec<f64> {
    values
        .windows(2)
        .map(|pair| (pair[1] - pair[0]) / pair[0])
        .collect()
}

/// Annualized rolling volatility over a returns slice, in percent.
///
/// The conventional dashboard column: rolling standard deviation of
/// the fractional returns, scaled by the square root of the number of
/// periods per year (252 for daily data), times 100.
pub fn annualized_volatility(returns: &[f64], window: usize, periods_per_year: f64) -> Vec<f64> {
    rolling_std(returns, window)
        .into_iter()
        .map(|std| std * periods_per_year.sqrt() * 100.0)
        .collect()
}

fn sample_std(slice: &[f64]) -> f64 {
    if slice.len() < 2 {
        return 0.0;
    }
    let n = slice.len() as f64;
    let mean = slice.iter().sum::<f64>() / n;
    let variance = slice.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1.0);
    variance.sqrt()
}
