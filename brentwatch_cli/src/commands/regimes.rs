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

use std::fs::File;
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use colored::Colorize;
use comfy_table::{Cell, Color, Table};

use brentwatch_core::regime::{segment, Regime, RegimeKind, Segmentation};

use crate::loader::load_price_csv;

/// Run regime detection over a CSV price file and render the result
pub fn run(
    input: &Path,
    threshold: f64,
    monthly: bool,
    output: Option<&Path>,
    json: bool,
) -> Result<()> {
    let series = load_price_csv(input)?;
    let series = if monthly {
        series
            .monthly_mean()
            .context("Failed to downsample series to monthly means")?
    } else {
        series
    };

    let segmentation = segment(&series, threshold)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&segmentation)?);
    } else {
        render(series.len(), threshold, &segmentation);
    }

    if let Some(path) = output {
        save_regimes_to_csv(&segmentation, path)?;
        log::info!("Regimes saved to {}", path.display());
    }

    Ok(())
}

fn render(sample_count: usize, threshold: f64, segmentation: &Segmentation) {
    println!(
        "Detected {} regimes over {} samples (threshold {:.0}%)",
        segmentation.len(),
        sample_count,
        threshold * 100.0
    );

    if segmentation.is_empty() {
        // A valid outcome: the series never moved by the threshold
        println!(
            "{}",
            "No sustained move reached the threshold in either direction.".yellow()
        );
        return;
    }

    let mut table = Table::new();
    table.set_header(vec![
        "Kind", "Start", "End", "Samples", "From", "To", "Move",
    ]);

    let merged = segmentation.merged();
    for regime in &merged {
        let color = match regime.kind {
            RegimeKind::Bull => Color::Green,
            RegimeKind::Bear => Color::Red,
        };

        table.add_row(vec![
            Cell::new(regime.kind.to_string()).fg(color),
            Cell::new(regime.start_time.format("%Y-%m-%d").to_string()),
            Cell::new(regime.end_time.format("%Y-%m-%d").to_string()),
            Cell::new(regime.sample_count().to_string()),
            Cell::new(format!("{:.2}", regime.from_price)),
            Cell::new(format!("{:.2}", regime.to_price)),
            Cell::new(format!("{:+.1}%", regime.percent_move * 100.0)).fg(color),
        ]);
    }

    println!("{table}");

    // Share of classified samples per regime kind
    let bull_samples: usize = segmentation.bull.iter().map(Regime::sample_count).sum();
    let bear_samples: usize = segmentation.bear.iter().map(Regime::sample_count).sum();
    let classified = bull_samples + bear_samples;

    println!("\nTime Distribution:");
    for (label, samples) in [("Bull", bull_samples), ("Bear", bear_samples)] {
        let percentage = (samples as f64 / classified as f64) * 100.0;
        let bar_len = (percentage / 5.0) as usize;
        let bar = "█".repeat(bar_len);

        println!("{:<6}: {:5.1}% {}", label, percentage, bar);
    }
}

/// Save regimes to a CSV file, merged and ordered by start time
fn save_regimes_to_csv(segmentation: &Segmentation, path: &Path) -> Result<()> {
    let mut file = File::create(path)
        .with_context(|| format!("Failed to create output file {}", path.display()))?;

    writeln!(
        file,
        "kind,start_index,end_index,start_time,end_time,from_price,to_price,percent_move"
    )?;

    for regime in segmentation.merged() {
        writeln!(
            file,
            "{},{},{},{},{},{},{},{}",
            regime.kind,
            regime.start_index,
            regime.end_index,
            regime.start_time.format("%Y-%m-%d"),
            regime.end_time.format("%Y-%m-%d"),
            regime.from_price,
            regime.to_price,
            regime.percent_move
        )?;
    }

    Ok(())
}
