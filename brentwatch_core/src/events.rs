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

//! Catalog of dated market events for chart annotation.
//!
//! The catalog is a plain date-to-label mapping owned by the
//! presentation side: renderers decide how to match event dates to
//! series samples, the library only stores and filters the entries.

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

/// A dated market event worth annotating on a price chart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketEvent {
    /// Calendar date of the event
    pub date: NaiveDate,
    /// Short display label
    pub label: String,
    /// One-line description
    pub description: String,
    /// Whether the event belongs to the reduced "major events" view
    pub major: bool,
}

impl MarketEvent {
    /// Create a new event
    pub fn new(date: NaiveDate, label: &str, description: &str, major: bool) -> Self {
        Self {
            date,
            label: label.to_string(),
            description: description.to_string(),
            major,
        }
    }
}

/// An ordered collection of market events
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EventCatalog {
    events: Vec<MarketEvent>,
}

impl EventCatalog {
    /// Build a catalog from arbitrary events, sorted by date
    pub fn new(mut events: Vec<MarketEvent>) -> Self {
        events.sort_by_key(|event| event.date);
        Self { events }
    }

    /// The built-in catalog of oil-market events
    pub fn builtin() -> &'static EventCatalog {
        &BUILTIN
    }

    /// Number of events in the catalog
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// True when the catalog holds no events
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// All events in date order
    pub fn iter(&self) -> impl Iterator<Item = &MarketEvent> {
        self.events.iter()
    }

    /// Only the events flagged as major
    pub fn major(&self) -> impl Iterator<Item = &MarketEvent> {
        self.events.iter().filter(|event| event.major)
    }

    /// Events falling within `[start, end]`, inclusive on both ends
    pub fn in_range(&self, start: NaiveDate, end: NaiveDate) -> Vec<&MarketEvent> {
        self.events
            .iter()
            .filter(|event| event.date >= start && event.date <= end)
            .collect()
    }
}

static BUILTIN: Lazy<EventCatalog> = Lazy::new(|| {
    let ymd = |y: i32, m: u32, d: u32| {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid calendar date in builtin catalog")
    };

    EventCatalog::new(vec![
        MarketEvent::new(
            ymd(2011, 3, 15),
            "Arab Spring",
            "Uprisings across the Middle East and North Africa",
            true,
        ),
        MarketEvent::new(
            ymd(2014, 11, 27),
            "OPEC holds output",
            "OPEC keeps production unchanged despite falling prices",
            false,
        ),
        MarketEvent::new(
            ymd(2016, 1, 16),
            "Iran sanctions lifted",
            "End of sanctions on Iran raises global supply",
            false,
        ),
        MarketEvent::new(
            ymd(2016, 11, 30),
            "OPEC agreement",
            "OPEC agrees to cut production for the first time since 2008",
            false,
        ),
        MarketEvent::new(
            ymd(2019, 12, 6),
            "OPEC+ cuts",
            "OPEC+ deepens production cuts by 500,000 barrels per day",
            false,
        ),
        MarketEvent::new(
            ymd(2020, 3, 8),
            "Price war",
            "Saudi Arabia starts a price war after a deal with Russia collapses",
            true,
        ),
        MarketEvent::new(
            ymd(2020, 3, 11),
            "COVID-19 pandemic",
            "WHO declares a global pandemic",
            true,
        ),
        MarketEvent::new(
            ymd(2020, 4, 20),
            "Negative WTI",
            "WTI crude settles below zero for the first time",
            false,
        ),
        MarketEvent::new(
            ymd(2021, 10, 4),
            "Energy crunch",
            "Natural gas and coal shortages lift oil demand",
            false,
        ),
        MarketEvent::new(
            ymd(2022, 2, 24),
            "Invasion of Ukraine",
            "Russia invades Ukraine",
            true,
        ),
        MarketEvent::new(
            ymd(2022, 3, 31),
            "Reserve release",
            "US announces release of 180 million barrels from the strategic reserve",
            false,
        ),
        MarketEvent::new(
            ymd(2023, 4, 2),
            "Surprise OPEC+ cut",
            "OPEC+ announces a surprise cut of more than 1 million barrels per day",
            false,
        ),
        MarketEvent::new(
            ymd(2023, 10, 7),
            "Israel-Hamas conflict",
            "Conflict between Israel and Hamas begins",
            false,
        ),
    ])
});

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_catalog_size_and_order() {
        let catalog = EventCatalog::builtin();
        assert_eq!(catalog.len(), 13);

        let dates: Vec<NaiveDate> = catalog.iter().map(|e| e.date).collect();
        let mut sorted = dates.clone();
        sorted.sort();
        assert_eq!(dates, sorted);
    }

    #[test]
    fn test_builtin_major_subset() {
        let catalog = EventCatalog::builtin();
        let major: Vec<&MarketEvent> = catalog.major().collect();
        assert_eq!(major.len(), 4);
        assert!(major.iter().all(|event| event.major));
    }

    #[test]
    fn test_in_range_is_inclusive() {
        let catalog = EventCatalog::builtin();
        let start = NaiveDate::from_ymd_opt(2020, 3, 8).unwrap();
        let end = NaiveDate::from_ymd_opt(2020, 4, 20).unwrap();

        let hits = catalog.in_range(start, end);
        assert_eq!(hits.len(), 3);
        assert_eq!(hits[0].label, "Price war");
        assert_eq!(hits[2].label, "Negative WTI");
    }

    #[test]
    fn test_custom_catalog_sorts_on_construction() {
        let feb = NaiveDate::from_ymd_opt(2024, 2, 1).unwrap();
        let jan = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let catalog = EventCatalog::new(vec![
            MarketEvent::new(feb, "second", "", false),
            MarketEvent::new(jan, "first", "", true),
        ]);

        let labels: Vec<&str> = catalog.iter().map(|e| e.label.as_str()).collect();
        assert_eq!(labels, vec!["first", "second"]);
    }
}
