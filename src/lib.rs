//! Cyclescope - cycle-count reports from embedded voice-DSP profiling logs
//!
//! This library reduces the textual profiling output captured from an
//! embedded voice-processing target (echo cancellation, noise suppression,
//! interference cancellation pipelines) into per-frame cycle counts and a
//! worst-case-frame summary. Timing points are declared in device source as
//! `prof(index, "tag")` call sites; the captured log reports them as
//! `Profile index, ticks` lines between `frame N` markers.

pub mod cli;
pub mod device_log;
pub mod error;
pub mod event;
pub mod frame;
pub mod json_output;
pub mod reduce;
pub mod report;
pub mod tag_map;
