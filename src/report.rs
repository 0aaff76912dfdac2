// Distributed under The MIT License (MIT)
//
// Copyright (c) 2024 The `graysplit` developers
//! The line-oriented timing report.
//!
//! Each line holds a two-word label and the elapsed milliseconds with three decimals, separated
//! by single spaces:
//!
//! ```text
//! Without Threads 1.234
//! With Threads 0.456
//! ```
//!
//! Plotting tools read the first two words as the label and the third as the value.
use std::fs;
use std::io::{self, Write};
use std::path::Path;
use std::time::Duration;

use crate::Error;

/// One timed pass.
#[derive(Clone, Debug, PartialEq)]
pub struct Record {
    pub label: String,
    pub elapsed: Duration,
}

impl Record {
    pub fn new(label: impl Into<String>, elapsed: Duration) -> Self {
        Record {
            label: label.into(),
            elapsed,
        }
    }

    pub fn millis(&self) -> f64 {
        self.elapsed.as_secs_f64() * 1000.0
    }
}

pub fn write(mut writer: impl Write, records: &[Record]) -> io::Result<()> {
    for record in records {
        writeln!(writer, "{} {:.3}", record.label, record.millis())?;
    }

    writer.flush()
}

/// Write the report to a file, replacing an earlier one.
pub fn save(path: &Path, records: &[Record]) -> Result<(), Error> {
    let file = fs::File::create(path).map_err(Error::io(path))?;
    write(io::BufWriter::new(file), records).map_err(Error::io(path))
}

/// Split a report line into its label and milliseconds.
pub fn parse_line(line: &str) -> Option<(String, f64)> {
    let mut words = line.split_whitespace();
    let label = format!("{} {}", words.next()?, words.next()?);
    let millis = words.next()?.parse().ok()?;
    Some((label, millis))
}
