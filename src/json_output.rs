//! JSON output format for machine consumption
//!
//! `--format json` emits one document carrying everything the three text
//! artifacts carry: the tag mapping, the per-frame breakdown, and the
//! worst-case summary with its derived figures.

use crate::reduce::{self, FrameSummary};
use crate::report::ClockSpec;
use crate::tag_map::TagMap;
use serde::{Deserialize, Serialize};

/// One declared profiling index
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonMappingEntry {
    pub index: u64,
    pub tag: String,
}

/// One measured region within a frame
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRegion {
    pub name: String,
    pub cycles: i64,
    /// Share of the frame's non-init total
    pub percent: f64,
}

/// Per-frame breakdown
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonFrame {
    pub frame: usize,
    pub regions: Vec<JsonRegion>,
    pub total_cycles: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub init_cycles: Option<i64>,
}

/// Worst-case figures in raw ticks and derived units
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonWorstCase {
    pub frame: usize,
    pub init_cycles: i64,
    pub timer_ticks: i64,
    pub processor_cycles: i64,
    pub mips: f64,
}

/// Root JSON output structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonReport {
    /// Format version identifier
    pub version: String,
    /// Format name
    pub format: String,
    pub mapping: Vec<JsonMappingEntry>,
    pub frames: Vec<JsonFrame>,
    /// Absent when the capture finalized no frames
    #[serde(skip_serializing_if = "Option::is_none")]
    pub worst_case: Option<JsonWorstCase>,
}

impl JsonReport {
    /// Assemble the document from a completed reduction
    pub fn from_reduction(tags: &TagMap, summaries: &[FrameSummary], clocks: &ClockSpec) -> Self {
        let mapping = tags
            .iter()
            .map(|(index, tag)| JsonMappingEntry {
                index,
                tag: tag.to_string(),
            })
            .collect();

        let frames = summaries.iter().map(json_frame).collect();

        let worst_case = reduce::worst_case(summaries).map(|worst| {
            let processor_cycles = clocks.processor_cycles(worst.total_cycles);
            JsonWorstCase {
                frame: worst.frame,
                init_cycles: reduce::last_init(summaries),
                timer_ticks: worst.total_cycles,
                processor_cycles,
                mips: clocks.mips(processor_cycles),
            }
        });

        Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            format: "cyclescope-json-v1".to_string(),
            mapping,
            frames,
            worst_case,
        }
    }

    /// Serialize to a pretty-printed JSON string
    pub fn to_json(&self) -> anyhow::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

fn json_frame(summary: &FrameSummary) -> JsonFrame {
    let regions = summary
        .non_init()
        .map(|region| JsonRegion {
            name: region.name.clone(),
            cycles: region.cycles,
            percent: if summary.total_cycles == 0 {
                0.0
            } else {
                region.cycles as f64 / summary.total_cycles as f64 * 100.0
            },
        })
        .collect();

    JsonFrame {
        frame: summary.frame,
        regions,
        total_cycles: summary.total_cycles,
        init_cycles: summary.init_cycles,
    }
}
