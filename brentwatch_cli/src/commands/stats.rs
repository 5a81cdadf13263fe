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

use std::path::Path;

use anyhow::Result;
use comfy_table::Table;

use brentwatch_core::rolling::{annualized_volatility, returns, rolling_mean};
use brentwatch_core::summary::summarize;

use crate::loader::load_price_csv;

/// Print quick statistics for a CSV price file
pub fn run(input: &Path, window: usize, short_ma: usize, long_ma: usize) -> Result<()> {
    let series = load_price_csv(input)?;
    let summary = summarize(&series, window);

    let prices = series.prices();
    let price_returns = returns(&prices);

    let mut table = Table::new();
    table.set_header(vec!["Statistic", "Value"]);
    table.add_row(vec![
        "Latest price".to_string(),
        format!("${:.2}", summary.latest_price),
    ]);
    table.add_row(vec![
        "Latest sample".to_string(),
        summary.latest_timestamp.format("%Y-%m-%d").to_string(),
    ]);
    table.add_row(vec![
        format!("Volatility ({} samples)", summary.volatility_window),
        match summary.rolling_volatility {
            Some(v) => format!("{:.2}", v),
            None => format!("n/a (< {} samples)", summary.volatility_window),
        },
    ]);
    table.add_row(vec![
        format!("Annualized volatility ({} samples)", window),
        format_tail(&annualized_volatility(&price_returns, window, 252.0), "%"),
    ]);
    table.add_row(vec![
        format!("MA({})", short_ma),
        format_tail(&rolling_mean(&prices, short_ma), ""),
    ]);
    table.add_row(vec![
        format!("MA({})", long_ma),
        format_tail(&rolling_mean(&prices, long_ma), ""),
    ]);
    table.add_row(vec![
        "Overall change".to_string(),
        format!("{:+.1}%", summary.percent_change * 100.0),
    ]);
    table.add_row(vec!["Samples".to_string(), summary.sample_count.to_string()]);
    table.add_row(vec![
        "Span".to_string(),
        format!("{} days", summary.span_days),
    ]);

    println!("{table}");

    Ok(())
}

// Latest value of a NaN-padded rolling column, or n/a while unfilled
fn format_tail(values: &[f64], suffix: &str) -> String {
    match values.last() {
        Some(value) if value.is_finite() => format!("{:.2}{}", value, suffix),
        _ => "n/a".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_run_on_small_file() {
        let mut input = tempfile::NamedTempFile::new().unwrap();
        write!(
            input,
            "date,price\n2020-01-01,100.0\n2020-01-02,110.0\n2020-01-03,121.0\n"
        )
        .unwrap();

        run(input.path(), 2, 2, 3).unwrap();
    }

    #[test]
    fn test_format_tail() {
        assert_eq!(format_tail(&[1.0, 2.5], ""), "2.50");
        assert_eq!(format_tail(&[f64::NAN], "%"), "n/a");
        assert_eq!(format_tail(&[], ""), "n/a");
    }
}
