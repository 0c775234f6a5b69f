//! Fixed-width text artifacts
//!
//! Three files per run: the per-frame breakdown, the index-to-tag mapping,
//! and the worst-case summary with derived processor-cycle and MIPS figures.
//! Rendering is separated from writing so the reports can be asserted as
//! strings; reduction completes before any file is created, so a fatal
//! reduction error leaves no artifacts behind.

use crate::reduce::{self, FrameSummary};
use crate::tag_map::TagMap;
use anyhow::{Context, Result};
use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// Clock constants for the worst-case conversions
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClockSpec {
    /// Reference timer driving the tick snapshots, MHz
    pub timer_mhz: u32,
    /// Processor thread frequency, MHz
    pub thread_mhz: u32,
    /// Audio frame period, seconds
    pub frame_secs: f64,
}

impl Default for ClockSpec {
    /// 100 MHz reference timer, 600 MHz core shared five ways, 15 ms frames
    fn default() -> Self {
        Self {
            timer_mhz: 100,
            thread_mhz: 120,
            frame_secs: 0.015,
        }
    }
}

impl ClockSpec {
    /// Convert raw timer ticks to processor cycles via the clock ratio
    pub fn processor_cycles(&self, ticks: i64) -> i64 {
        ((ticks as f64 / f64::from(self.timer_mhz)) * f64::from(self.thread_mhz)) as i64
    }

    /// Millions of instructions per second needed to fit the frame period
    pub fn mips(&self, processor_cycles: i64) -> f64 {
        (processor_cycles as f64 / self.frame_secs) / 1.0e6
    }
}

/// Destination paths for the three artifacts
#[derive(Debug, Clone)]
pub struct ReportPaths {
    pub profile: PathBuf,
    pub mapping: PathBuf,
    pub worst_case: PathBuf,
}

fn percent(cycles: i64, total: i64) -> f64 {
    if total == 0 {
        0.0
    } else {
        cycles as f64 / total as f64 * 100.0
    }
}

fn region_row(out: &mut String, name: &str, cycles: i64, total: i64) {
    let _ = writeln!(out, "{name:<44} {cycles:<12} {:>10.2}% ", percent(cycles, total));
}

/// Per-frame report: tag rows and the running total for every frame
pub fn render_per_frame(summaries: &[FrameSummary]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{:>44} {:<12} {:<10}", "Tag", "Cycles", "% of total cycles");
    for summary in summaries {
        let _ = writeln!(out, "Frame {}", summary.frame);
        for region in summary.non_init() {
            region_row(&mut out, &region.name, region.cycles, summary.total_cycles);
        }
        let _ = writeln!(out, "{:<32} {}", "TOTAL_CYCLES", summary.total_cycles);
    }
    out
}

/// Index-to-tag mapping report, for operators adding new `prof()` call sites
pub fn render_mapping(tags: &TagMap) -> String {
    let mut out = String::new();
    for (index, tag) in tags.iter() {
        let _ = writeln!(out, "{index:<4} {tag}");
    }
    out
}

/// Worst-case report: the representative performance figure for the capture
pub fn render_worst_case(summaries: &[FrameSummary], clocks: &ClockSpec) -> String {
    let mut out = String::new();
    let Some(worst) = reduce::worst_case(summaries) else {
        return out;
    };

    let _ = writeln!(out, "Worst case frame = {}", worst.frame);
    let _ = writeln!(out, "{:<44} {:<12}", "init", reduce::last_init(summaries));

    for region in worst.non_init() {
        region_row(&mut out, &region.name, region.cycles, worst.total_cycles);
    }

    let ticks = worst.total_cycles;
    let _ = writeln!(
        out,
        "{:<44} {}",
        format!("Worst_case_frame_timer({}MHz)_ticks", clocks.timer_mhz),
        ticks
    );
    let cycles = clocks.processor_cycles(ticks);
    let _ = writeln!(
        out,
        "{:<44} {}",
        format!("Worst_case_frame_processor({}MHz)_cycles", clocks.thread_mhz),
        cycles
    );
    let _ = writeln!(out, "{:<44} {:.2} MIPS", "MCPS", clocks.mips(cycles));
    out
}

/// Write all three artifacts. Reduction is already complete here, so the
/// only failures left are I/O.
pub fn write_reports(
    tags: &TagMap,
    summaries: &[FrameSummary],
    clocks: &ClockSpec,
    paths: &ReportPaths,
) -> Result<()> {
    write(&paths.profile, &render_per_frame(summaries))?;
    write(&paths.mapping, &render_mapping(tags))?;
    write(&paths.worst_case, &render_worst_case(summaries, clocks))?;
    info!(
        profile = %paths.profile.display(),
        mapping = %paths.mapping.display(),
        worst_case = %paths.worst_case.display(),
        "reports written"
    );
    Ok(())
}

fn write(path: &Path, contents: &str) -> Result<()> {
    fs::write(path, contents).with_context(|| format!("Failed to write report: {}", path.display()))
}
