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

use anyhow::Result;
use comfy_table::{Cell, Color, Table};

use brentwatch_core::events::{EventCatalog, MarketEvent};

/// List the built-in market events, major-only by default
pub fn run(all: bool) -> Result<()> {
    let catalog = EventCatalog::builtin();

    let events: Vec<&MarketEvent> = if all {
        catalog.iter().collect()
    } else {
        catalog.major().collect()
    };

    let mut table = Table::new();
    table.set_header(vec!["Date", "Event", "Description"]);

    for event in &events {
        let label = if event.major {
            Cell::new(&event.label).fg(Color::Yellow)
        } else {
            Cell::new(&event.label)
        };

        table.add_row(vec![
            Cell::new(event.date.format("%Y-%m-%d").to_string()),
            label,
            Cell::new(&event.description),
        ]);
    }

    println!("{table}");

    if !all {
        println!("({} major of {} events; use --all to list every event)", events.len(), catalog.len());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_major_and_all() {
        run(false).unwrap();
        run(true).unwrap();
    }
}
