//! Frame collection: one ordered pass over the captured lines
//!
//! A `frame <n>` marker finalizes the currently open frame and opens a fresh
//! one; samples land in whichever frame is open when they arrive. Matching
//! the device harness, the trailing open frame is dropped at end of input
//! unless the caller asks for it to be finalized.

use crate::event::{EventParser, LogEvent, TimingPoint};
use crate::tag_map::TagMap;
use anyhow::Result;
use tracing::{debug, warn};

/// One timer snapshot recorded inside a frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sample {
    pub point: TimingPoint,
    pub ticks: u64,
}

/// Samples captured between two frame markers, in arrival order.
/// Immutable once finalized.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Frame {
    samples: Vec<Sample>,
}

impl Frame {
    fn push(&mut self, sample: Sample) {
        self.samples.push(sample);
    }

    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

/// Group the captured lines into finalized frames.
///
/// Samples arriving before the first marker have no frame to belong to and
/// are dropped with a warning. With `finalize_trailing`, a non-empty frame
/// still open at end of input is finalized instead of dropped.
pub fn collect_frames(
    lines: &[String],
    tags: &TagMap,
    finalize_trailing: bool,
) -> Result<Vec<Frame>> {
    let parser = EventParser::new();
    let mut frames: Vec<Frame> = Vec::new();
    let mut open: Option<Frame> = None;

    for line in lines {
        match parser.parse(line, tags)? {
            Some(LogEvent::FrameMarker(number)) => {
                debug!(marker = number, finalized = frames.len(), "frame marker");
                if let Some(done) = open.replace(Frame::default()) {
                    frames.push(done);
                }
            }
            Some(LogEvent::Sample { point, ticks }) => match open.as_mut() {
                Some(frame) => frame.push(Sample { point, ticks }),
                None => warn!(line = %line, "sample before first frame marker, dropped"),
            },
            None => {}
        }
    }

    if finalize_trailing {
        if let Some(done) = open.take() {
            if !done.is_empty() {
                debug!(samples = done.samples().len(), "finalizing trailing frame");
                frames.push(done);
            }
        }
    }

    Ok(frames)
}
