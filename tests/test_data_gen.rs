//! Shared table builders for the integration tests.
#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};

use autobi_core::types::{Column, Table};

pub const REGIONS: [&str; 5] = ["north", "south", "east", "west", "central"];

/// 200 rows of `date` (ISO strings), `region` (5 values), `sales` (200
/// distinct floats), as an uploaded CSV would arrive before cleaning.
pub fn raw_sales_table() -> Table {
    let dates = (0..200).map(|i| {
        let month = i / 28 + 1;
        let day = i % 28 + 1;
        Some(format!("2024-{month:02}-{day:02}"))
    });
    Table::new(vec![
        Column::utf8("date", dates),
        Column::utf8("region", (0..200).map(|i| Some(REGIONS[i % 5]))),
        Column::float64("sales", (0..200).map(|i| Some(100.0 + i as f64 * 2.5))),
    ])
    .expect("sales table")
}

/// Padded numbers, blanks in every column kind and one duplicated row.
pub fn messy_table() -> Table {
    Table::new(vec![
        Column::utf8(
            "id",
            [Some("1"), Some("2"), Some("3"), Some("3"), Some("4"), Some("5")],
        ),
        Column::utf8(
            "amount",
            [Some(" 10.5 "), None, Some("7"), Some("7"), Some("3"), Some(" 2 ")],
        ),
        Column::utf8(
            "city",
            [Some(" Oslo"), Some("Bergen "), None, None, Some("Oslo"), Some("Molde")],
        ),
        Column::utf8(
            "when",
            [
                Some("2024-01-01"),
                Some("2024-01-02"),
                None,
                None,
                Some("2024-01-05"),
                Some("2024-01-06"),
            ],
        ),
    ])
    .expect("messy table")
}

/// Only text columns; nothing numeric to plot.
pub fn text_only_table() -> Table {
    Table::new(vec![
        Column::utf8("team", [Some("red"), Some("blue"), Some("red")]),
        Column::utf8("shift", [Some("day"), Some("night"), Some("night")]),
    ])
    .expect("text table")
}

/// A fresh scratch directory under the system temp dir.
pub fn create_temp_dir(tag: &str) -> PathBuf {
    static NEXT: AtomicUsize = AtomicUsize::new(0);
    let dir = std::env::temp_dir().join(format!(
        "autobi-{tag}-{}-{}",
        std::process::id(),
        NEXT.fetch_add(1, Ordering::Relaxed)
    ));
    std::fs::create_dir_all(&dir).expect("create temp dir");
    dir
}
