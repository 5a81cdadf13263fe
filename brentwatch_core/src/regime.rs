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

use std::fmt;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::series::{PricePoint, PriceSeries, SeriesError};

/// Market phase of a detected regime
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RegimeKind {
    /// Sustained up-move confirmed from a trough
    Bull,
    /// Sustained down-move confirmed from a peak
    Bear,
}

impl fmt::Display for RegimeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegimeKind::Bull => write!(f, "Bull"),
            RegimeKind::Bear => write!(f, "Bear"),
        }
    }
}

/// Error types for regime segmentation
#[derive(Debug, Error, Clone, PartialEq)]
pub enum RegimeError {
    /// Threshold is zero, negative, or not finite
    #[error("Invalid threshold {0} (must be a positive finite fraction, e.g. 0.2)")]
    InvalidThreshold(f64),

    /// The input series failed validation
    #[error("Invalid price series: {0}")]
    InvalidSeries(#[from] SeriesError),
}

/// Result type for regime operations
pub type RegimeResult<T> = Result<T, RegimeError>;

/// A maximal contiguous span of samples classified as one sustained move.
///
/// Immutable once emitted. The move is measured between the two
/// reference prices, not between the prices at the span's endpoints:
/// a Bull runs from the trough that confirmed it to the highest price
/// seen while it was open, a Bear from the peak that confirmed it to
/// the lowest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Regime {
    /// Bull or Bear
    pub kind: RegimeKind,
    /// Index of the sample that triggered the regime
    pub start_index: usize,
    /// Index of the last sample belonging to the regime
    pub end_index: usize,
    /// Timestamp at `start_index`
    pub start_time: DateTime<Utc>,
    /// Timestamp at `end_index`
    pub end_time: DateTime<Utc>,
    /// Reference price the move is measured from (trough for Bull, peak for Bear)
    pub from_price: f64,
    /// Extreme price reached while the regime was open (peak for Bull, trough for Bear)
    pub to_price: f64,
    /// Signed fractional move: `(to_price - from_price) / from_price`.
    /// Non-negative for Bull, non-positive for Bear.
    pub percent_move: f64,
}

impl Regime {
    /// Wall-clock span covered by the regime
    pub fn duration(&self) -> Duration {
        self.end_time - self.start_time
    }

    /// Number of samples belonging to the regime
    pub fn sample_count(&self) -> usize {
        self.end_index - self.start_index + 1
    }

    /// Check whether this is a Bull regime
    pub fn is_bull(&self) -> bool {
        self.kind == RegimeKind::Bull
    }
}

/// Output of the segmenter: bull and bear regimes, each list time-ordered
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Segmentation {
    /// Bull regimes, sorted by start index, pairwise non-overlapping
    pub bull: Vec<Regime>,
    /// Bear regimes, sorted by start index, pairwise non-overlapping
    pub bear: Vec<Regime>,
}

impl Segmentation {
    /// Total number of regimes of either kind
    pub fn len(&self) -> usize {
        self.bull.len() + self.bear.len()
    }

    /// True when no regime was detected
    pub fn is_empty(&self) -> bool {
        self.bull.is_empty() && self.bear.is_empty()
    }

    /// Both lists merged into a single view ordered by start index.
    /// Bull and bear regimes strictly alternate in the merged order.
    pub fn merged(&self) -> Vec<&Regime> {
        let mut merged: Vec<&Regime> = self.bull.iter().chain(self.bear.iter()).collect();
        merged.sort_by_key(|regime| regime.start_index);
        merged
    }
}

// Scan state. Flat means no regime has been confirmed yet; the running
// peak and trough both still point at the first sample's price.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Flat,
    Bull,
    Bear,
}

/// Split a price series into alternating bull and bear regimes.
///
/// A Bull regime is confirmed when the price rises to at least
/// `trough * (1 + threshold)`, a Bear when it falls to at most
/// `peak * (1 - threshold)`. Confirming one regime closes the other,
/// and an open regime is force-closed at the end of the series. A
/// series whose prices never move by the threshold in either direction
/// yields an empty segmentation; so does a single-sample series.
///
/// The scan is a single pass, pure in its inputs: the same series and
/// threshold always produce the same segmentation. The Bull check is
/// evaluated before the Bear check at each step, and both use the
/// extrema as they stood at the start of the step.
pub fn segment(series: &PriceSeries, threshold: f64) -> RegimeResult<Segmentation> {
    if !threshold.is_finite() || threshold <= 0.0 {
        return Err(RegimeError::InvalidThreshold(threshold));
    }

    let points = series.points();
    let mut segmentation = Segmentation::default();
    if points.len() < 2 {
        return Ok(segmentation);
    }

    let mut phase = Phase::Flat;
    let mut peak = points[0].price;
    let mut trough = points[0].price;
    let mut start = 0usize;

    for (i, point) in points.iter().enumerate().skip(1) {
        let price = point.price;

        if phase != Phase::Bull && price >= trough * (1.0 + threshold) {
            if phase == Phase::Bear {
                segmentation
                    .bear
                    .push(close_regime(RegimeKind::Bear, points, start, i - 1, peak, trough));
            }
            // The trough that confirmed the move stays as the bull's
            // reference; highs are tracked from the trigger price.
            phase = Phase::Bull;
            start = i;
            peak = price;
        } else if phase != Phase::Bear && price <= peak * (1.0 - threshold) {
            if phase == Phase::Bull {
                segmentation
                    .bull
                    .push(close_regime(RegimeKind::Bull, points, start, i - 1, trough, peak));
            }
            phase = Phase::Bear;
            start = i;
            trough = price;
        }

        match phase {
            Phase::Bull if price > peak => peak = price,
            Phase::Bear if price < trough => trough = price,
            _ => {}
        }
    }

    // Force-close whatever is still open at sequence end.
    let last = points.len() - 1;
    match phase {
        Phase::Bull => segmentation
            .bull
            .push(close_regime(RegimeKind::Bull, points, start, last, trough, peak)),
        Phase::Bear => segmentation
            .bear
            .push(close_regime(RegimeKind::Bear, points, start, last, peak, trough)),
        Phase::Flat => {}
    }

    debug!(
        "Segmented {} samples into {} bull / {} bear regimes",
        points.len(),
        segmentation.bull.len(),
        segmentation.bear.len()
    );

    Ok(segmentation)
}

/// Validate raw points and segment them in one call.
///
/// Convenience wrapper for callers holding an unvalidated sample
/// vector; shape violations surface as
/// [`RegimeError::InvalidSeries`] before any regime is computed.
pub fn segment_points(points: Vec<PricePoint>, threshold: f64) -> RegimeResult<Segmentation> {
    let series = PriceSeries::new(points)?;
    segment(&series, threshold)
}

fn close_regime(
    kind: RegimeKind,
    points: &[PricePoint],
    start: usize,
    end: usize,
    from_price: f64,
    to_price: f64,
) -> Regime {
    Regime {
        kind,
        start_index: start,
        end_index: end,
        start_time: points[start].timestamp,
        end_time: points[end].timestamp,
        from_price,
        to_price,
        percent_move: (to_price - from_price) / from_price,
    }
}
