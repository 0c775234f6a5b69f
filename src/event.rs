//! Typed events derived from raw device-output lines
//!
//! Two line shapes matter: `frame <n>` markers and `Profile <index>, <ticks>`
//! samples. Everything else is ignored. A sample's tag carries its pairing
//! role in a `start_` / `end_` prefix; the prefix is decoded exactly once
//! here so later passes work on the typed form.

use crate::error::ReduceError;
use crate::tag_map::TagMap;
use anyhow::{Context, Result};
use regex::Regex;

/// Pairing role of a timing point within a frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimingPoint {
    /// `start_<name>`: opens a measured region
    Start(String),
    /// `end_<name>`: closes a measured region
    End(String),
    /// Any other tag; recorded but never paired
    Plain(String),
}

impl TimingPoint {
    /// Classify a tag string by its prefix
    pub fn from_tag(tag: &str) -> Self {
        if let Some(name) = tag.strip_prefix("start_") {
            TimingPoint::Start(name.to_string())
        } else if let Some(name) = tag.strip_prefix("end_") {
            TimingPoint::End(name.to_string())
        } else {
            TimingPoint::Plain(tag.to_string())
        }
    }
}

/// One significant line of captured device output
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogEvent {
    /// `frame <n>` marker; the number is informational only
    FrameMarker(u64),
    /// `Profile <index>, <ticks>` resolved through the tag mapping
    Sample { point: TimingPoint, ticks: u64 },
}

/// Compiled patterns for the two significant line shapes
#[derive(Debug)]
pub struct EventParser {
    frame: Regex,
    profile: Regex,
}

impl EventParser {
    pub fn new() -> Self {
        Self {
            frame: Regex::new(r"^frame\s*(\d+)").expect("frame pattern is valid"),
            profile: Regex::new(r"^Profile\s*(\d+)\s*,\s*(\d+)").expect("profile pattern is valid"),
        }
    }

    /// Classify one line. Returns `None` for lines matching neither shape;
    /// fails when a sample references an undeclared profiling index.
    pub fn parse(&self, line: &str, tags: &TagMap) -> Result<Option<LogEvent>> {
        if let Some(caps) = self.frame.captures(line) {
            let number: u64 = caps[1]
                .parse()
                .with_context(|| format!("Frame number out of range in line: {line}"))?;
            return Ok(Some(LogEvent::FrameMarker(number)));
        }

        if let Some(caps) = self.profile.captures(line) {
            let index: u64 = caps[1]
                .parse()
                .with_context(|| format!("Profiling index out of range in line: {line}"))?;
            let ticks: u64 = caps[2]
                .parse()
                .with_context(|| format!("Timer snapshot out of range in line: {line}"))?;
            let tag = tags.get(index).ok_or(ReduceError::UnknownIndex { index })?;
            return Ok(Some(LogEvent::Sample {
                point: TimingPoint::from_tag(tag),
                ticks,
            }));
        }

        Ok(None)
    }
}

impl Default for EventParser {
    fn default() -> Self {
        Self::new()
    }
}
