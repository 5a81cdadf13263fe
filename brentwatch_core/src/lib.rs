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

//! Core analytics for commodity price series: validated series
//! construction, bull/bear regime segmentation, rolling statistics,
//! quick summaries, and the market-event catalog.

pub mod events;
pub mod regime;
pub mod rolling;
pub mod series;
pub mod summary;

// Re-export common types
pub use events::{EventCatalog, MarketEvent};
pub use regime::{
    segment, segment_points, Regime, RegimeError, RegimeKind, RegimeResult, Segmentation,
};
pub use rolling::{annualized_volatility, returns, rolling_mean, rolling_std};
pub use series::{PricePoint, PriceSeries, SeriesError, SeriesResult};
pub use summary::{summarize, SeriesSummary};
