//! Pure reduction from finalized frames to per-frame summaries
//!
//! Pairs `start_`/`end_` timing points into elapsed tick counts, accumulates
//! the non-init total per frame, and selects the worst-case frame. Operates
//! on immutable frames only; nothing here touches the filesystem.

use crate::error::ReduceError;
use crate::event::TimingPoint;
use crate::frame::Frame;
use std::collections::HashMap;

/// Elapsed ticks for one measured region of a frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Region {
    pub name: String,
    /// Signed: negative only if the device timer snapshots were non-monotonic
    pub cycles: i64,
}

/// Read-only projection of one finalized frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameSummary {
    /// Position in finalization order
    pub frame: usize,
    /// Measured regions in first-seen order, init included
    pub regions: Vec<Region>,
    /// Sum of the non-init regions
    pub total_cycles: i64,
    /// Elapsed ticks of the init region, when the frame has one
    pub init_cycles: Option<i64>,
}

impl FrameSummary {
    /// Regions that count toward the total
    pub fn non_init(&self) -> impl Iterator<Item = &Region> {
        self.regions.iter().filter(|region| !is_init(&region.name))
    }
}

fn is_init(name: &str) -> bool {
    name.contains("init")
}

/// Pair the start/end points of one frame into elapsed values.
///
/// The last snapshot wins when a point repeats within the frame. A start
/// point without a matching end is fatal; unmatched end points and plain
/// tags never contribute.
pub fn summarize(frame: &Frame, index: usize) -> Result<FrameSummary, ReduceError> {
    let mut order: Vec<&str> = Vec::new();
    let mut starts: HashMap<&str, u64> = HashMap::new();
    let mut ends: HashMap<&str, u64> = HashMap::new();

    for sample in frame.samples() {
        match &sample.point {
            TimingPoint::Start(name) => {
                if !starts.contains_key(name.as_str()) {
                    order.push(name);
                }
                starts.insert(name, sample.ticks);
            }
            TimingPoint::End(name) => {
                ends.insert(name, sample.ticks);
            }
            TimingPoint::Plain(_) => {}
        }
    }

    let mut regions = Vec::with_capacity(order.len());
    let mut total_cycles = 0i64;
    let mut init_cycles = None;

    for name in order {
        let start = starts[name];
        let end = *ends.get(name).ok_or_else(|| ReduceError::MissingEnd {
            name: name.to_string(),
            frame: index,
        })?;
        let cycles = end as i64 - start as i64;

        if is_init(name) {
            init_cycles = Some(cycles);
        } else {
            total_cycles += cycles;
        }
        regions.push(Region {
            name: name.to_string(),
            cycles,
        });
    }

    Ok(FrameSummary {
        frame: index,
        regions,
        total_cycles,
        init_cycles,
    })
}

/// Summarize every finalized frame in order
pub fn summarize_all(frames: &[Frame]) -> Result<Vec<FrameSummary>, ReduceError> {
    frames
        .iter()
        .enumerate()
        .map(|(index, frame)| summarize(frame, index))
        .collect()
}

/// Frame with the highest non-init total. Frame 0 seeds the candidate;
/// a tie keeps the earlier frame.
pub fn worst_case(summaries: &[FrameSummary]) -> Option<&FrameSummary> {
    let mut best = summaries.first()?;
    for candidate in &summaries[1..] {
        if candidate.total_cycles > best.total_cycles {
            best = candidate;
        }
    }
    Some(best)
}

/// Init value shown in the worst-case report: init runs once on the device,
/// so this is the most recently recorded init across all frames, 0 when the
/// capture never saw one.
pub fn last_init(summaries: &[FrameSummary]) -> i64 {
    summaries
        .iter()
        .rev()
        .find_map(|summary| summary.init_cycles)
        .unwrap_or(0)
}
