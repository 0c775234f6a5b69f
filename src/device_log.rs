//! Captured-output handling for the device-execution step
//!
//! The hardware harness interleaves host-side noise with target output, and
//! target lines carry a `[DEVICE]` marker. The reducer can consume a raw
//! capture as-is or pre-filter it down to the device lines first.

use anyhow::{Context, Result};
use regex::Regex;
use std::fs::{self, File};
use std::io::{self, BufRead, Write};
use std::path::Path;

/// Read log lines from a file, or from stdin when the path is `-`
pub fn read_lines(path: &Path) -> Result<Vec<String>> {
    if path.as_os_str() == "-" {
        let mut lines = Vec::new();
        for line in io::stdin().lock().lines() {
            lines.push(line.context("Failed to read captured output from stdin")?);
        }
        Ok(lines)
    } else {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read log file: {}", path.display()))?;
        Ok(contents.lines().map(str::to_string).collect())
    }
}

/// Keep only `[DEVICE]` lines, with the marker and surrounding whitespace removed
pub fn filter_device_lines(lines: &[String]) -> Vec<String> {
    let marker = Regex::new(r"^\s*\[DEVICE\]\s*").expect("device marker pattern is valid");
    lines
        .iter()
        .filter_map(|line| marker.find(line).map(|m| line[m.end()..].to_string()))
        .collect()
}

/// Write the filtered capture to a dump file, one line per entry
pub fn write_dump(lines: &[String], path: &Path) -> Result<()> {
    let mut file = File::create(path)
        .with_context(|| format!("Failed to create dump file: {}", path.display()))?;
    for line in lines {
        writeln!(file, "{line}")
            .with_context(|| format!("Failed to write dump file: {}", path.display()))?;
    }
    Ok(())
}
