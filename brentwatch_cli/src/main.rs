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

mod commands;
mod loader;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "brentwatch")]
#[command(author, version, about = "Commodity price regime analytics", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Detect bull/bear regimes in a price series
    Regimes {
        /// CSV file with date,price rows
        #[arg(short, long)]
        input: PathBuf,

        /// Minimum fractional move confirming a regime
        #[arg(short, long, default_value_t = 0.2)]
        threshold: f64,

        /// Downsample to monthly means before segmenting
        #[arg(long)]
        monthly: bool,

        /// Write the detected regimes to a CSV file
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Print the segmentation as JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Print quick statistics for a price series
    Stats {
        /// CSV file with date,price rows
        #[arg(short, long)]
        input: PathBuf,

        /// Rolling volatility window in samples
        #[arg(short, long, default_value_t = 30)]
        window: usize,

        /// Short moving-average window in samples
        #[arg(long, default_value_t = 50)]
        short_ma: usize,

        /// Long moving-average window in samples
        #[arg(long, default_value_t = 200)]
        long_ma: usize,
    },

    /// List known market events
    Events {
        /// Show every event, not only the major ones
        #[arg(long)]
        all: bool,
    },
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Regimes {
            input,
            threshold,
            monthly,
            output,
            json,
        } => commands::regimes::run(&input, threshold, monthly, output.as_deref(), json),
        Commands::Stats {
            input,
            window,
            short_ma,
            long_ma,
        } => commands::stats::run(&input, window, short_ma, long_ma),
        Commands::Events { all } => commands::events::run(all),
    }
}
