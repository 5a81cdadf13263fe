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

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{NaiveDate, TimeZone, Utc};

use brentwatch_core::series::{PricePoint, PriceSeries};

/// Load a `date,price` CSV file into a validated price series.
///
/// Dates are `YYYY-MM-DD` and stamped midnight UTC. A first line whose
/// date field does not parse is treated as a header. Blank lines are
/// skipped; any other malformed row fails with its line number.
pub fn load_price_csv(path: &Path) -> Result<PriceSeries> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read price file {}", path.display()))?;

    let mut points = Vec::new();

    for (line_index, line) in contents.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let (date_field, price_field) = line
            .split_once(',')
            .with_context(|| format!("Line {}: expected date,price", line_index + 1))?;

        let date = match NaiveDate::parse_from_str(date_field.trim(), "%Y-%m-%d") {
            Ok(date) => date,
            // Header row
            Err(_) if line_index == 0 => continue,
            Err(e) => {
                return Err(anyhow::Error::new(e)
                    .context(format!("Line {}: invalid date {:?}", line_index + 1, date_field)));
            }
        };

        let price: f64 = price_field
            .trim()
            .parse()
            .with_context(|| format!("Line {}: invalid price {:?}", line_index + 1, price_field))?;

        let midnight = date
            .and_hms_opt(0, 0, 0)
            .with_context(|| format!("Line {}: invalid date {:?}", line_index + 1, date_field))?;
        points.push(PricePoint::new(Utc.from_utc_datetime(&midnight), price));
    }

    let series = PriceSeries::new(points)
        .with_context(|| format!("Invalid price series in {}", path.display()))?;

    log::debug!("Loaded {} samples from {}", series.len(), path.display());

    Ok(series)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_temp(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_with_header() {
        let file = write_temp("date,price\n2020-01-01,64.5\n2020-01-02,65.1\n");
        let series = load_price_csv(file.path()).unwrap();

        assert_eq!(series.len(), 2);
        assert!((series.first().price - 64.5).abs() < 1e-12);
        assert!((series.last().price - 65.1).abs() < 1e-12);
    }

    #[test]
    fn test_load_without_header() {
        let file = write_temp("2020-01-01,64.5\n2020-01-02,65.1\n");
        let series = load_price_csv(file.path()).unwrap();
        assert_eq!(series.len(), 2);
    }

    #[test]
    fn test_malformed_row_reports_line_number() {
        let file = write_temp("date,price\n2020-01-01,64.5\nnot-a-date,1.0\n");
        let err = load_price_csv(file.path()).unwrap_err();
        assert!(format!("{err:#}").contains("Line 3"));
    }

    #[test]
    fn test_invalid_price_reports_line_number() {
        let file = write_temp("2020-01-01,sixty\n");
        let err = load_price_csv(file.path()).unwrap_err();
        assert!(format!("{err:#}").contains("Line 1"));
    }

    #[test]
    fn test_non_monotonic_file_is_rejected() {
        let file = write_temp("2020-01-02,64.5\n2020-01-01,65.1\n");
        let err = load_price_csv(file.path()).unwrap_err();
        assert!(format!("{err:#}").contains("Invalid price series"));
    }

    #[test]
    fn test_blank_lines_are_skipped() {
        let file = write_temp("date,price\n\n2020-01-01,64.5\n\n2020-01-02,65.1\n");
        let series = load_price_csv(file.path()).unwrap();
        assert_eq!(series.len(), 2);
    }
}
