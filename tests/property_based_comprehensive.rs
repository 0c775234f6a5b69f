//! Property-based tests over the reduction pipeline
//!
//! Random well-formed captures are generated as raw log lines and pushed
//! through tag mapping, frame collection and reduction, checking the
//! arithmetic invariants the reports depend on.

use proptest::prelude::*;

use cyclescope::frame::collect_frames;
use cyclescope::reduce::{last_init, summarize_all, worst_case};
use cyclescope::tag_map::TagMap;

/// A generated measured region: start tick and duration
#[derive(Debug, Clone)]
struct GenRegion {
    start: u64,
    duration: u32,
}

fn region_strategy() -> impl Strategy<Value = GenRegion> {
    (0u64..1_000_000, 0u32..100_000).prop_map(|(start, duration)| GenRegion { start, duration })
}

/// Up to eight regions per frame, up to six frames per capture
fn capture_strategy() -> impl Strategy<Value = Vec<Vec<GenRegion>>> {
    prop::collection::vec(prop::collection::vec(region_strategy(), 0..8), 1..6)
}

/// Build the tag map and log lines for a generated capture. Region k uses
/// indexes 2k (start) and 2k+1 (end).
fn build_capture(frames: &[Vec<GenRegion>]) -> (TagMap, Vec<String>) {
    let mut tags = TagMap::new();
    let max_regions = frames.iter().map(Vec::len).max().unwrap_or(0);
    for k in 0..max_regions {
        tags.insert(2 * k as u64, format!("start_region{k}")).unwrap();
        tags.insert(2 * k as u64 + 1, format!("end_region{k}")).unwrap();
    }

    let mut lines = Vec::new();
    for (n, regions) in frames.iter().enumerate() {
        lines.push(format!("frame {n}"));
        for (k, region) in regions.iter().enumerate() {
            lines.push(format!("Profile {}, {}", 2 * k, region.start));
            lines.push(format!(
                "Profile {}, {}",
                2 * k + 1,
                region.start + u64::from(region.duration)
            ));
        }
    }
    // closing marker so the last generated frame is finalized
    lines.push(format!("frame {}", frames.len()));
    (tags, lines)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn prop_elapsed_equals_end_minus_start(capture in capture_strategy()) {
        let (tags, lines) = build_capture(&capture);
        let frames = collect_frames(&lines, &tags, false).unwrap();
        let summaries = summarize_all(&frames).unwrap();

        prop_assert_eq!(summaries.len(), capture.len());
        for (summary, generated) in summaries.iter().zip(&capture) {
            prop_assert_eq!(summary.regions.len(), generated.len());
            for (region, gen) in summary.regions.iter().zip(generated) {
                prop_assert_eq!(region.cycles, i64::from(gen.duration));
                prop_assert!(region.cycles >= 0);
            }
        }
    }

    #[test]
    fn prop_total_is_exact_sum(capture in capture_strategy()) {
        let (tags, lines) = build_capture(&capture);
        let frames = collect_frames(&lines, &tags, false).unwrap();
        let summaries = summarize_all(&frames).unwrap();

        for summary in &summaries {
            let sum: i64 = summary.non_init().map(|r| r.cycles).sum();
            prop_assert_eq!(summary.total_cycles, sum);
        }
    }

    #[test]
    fn prop_percentages_sum_to_100(capture in capture_strategy()) {
        let (tags, lines) = build_capture(&capture);
        let frames = collect_frames(&lines, &tags, false).unwrap();
        let summaries = summarize_all(&frames).unwrap();

        for summary in &summaries {
            if summary.total_cycles == 0 {
                continue;
            }
            let percent_sum: f64 = summary
                .non_init()
                .map(|r| r.cycles as f64 / summary.total_cycles as f64 * 100.0)
                .sum();
            prop_assert!((percent_sum - 100.0).abs() < 1e-6);
        }
    }

    #[test]
    fn prop_worst_case_dominates(capture in capture_strategy()) {
        let (tags, lines) = build_capture(&capture);
        let frames = collect_frames(&lines, &tags, false).unwrap();
        let summaries = summarize_all(&frames).unwrap();

        let worst = worst_case(&summaries).unwrap();
        for summary in &summaries {
            prop_assert!(worst.total_cycles >= summary.total_cycles);
        }
        // ties resolve to the earliest frame with the winning total
        let earliest = summaries
            .iter()
            .find(|s| s.total_cycles == worst.total_cycles)
            .unwrap();
        prop_assert_eq!(worst.frame, earliest.frame);
    }

    #[test]
    fn prop_no_init_means_zero_init(capture in capture_strategy()) {
        let (tags, lines) = build_capture(&capture);
        let frames = collect_frames(&lines, &tags, false).unwrap();
        let summaries = summarize_all(&frames).unwrap();
        prop_assert_eq!(last_init(&summaries), 0);
    }

    #[test]
    fn prop_parser_never_panics_on_noise(noise in prop::collection::vec("[ -~]{0,60}", 0..40)) {
        // arbitrary printable junk must either parse or be ignored; the only
        // accepted failure is an unknown profiling index
        let tags = TagMap::new();
        match collect_frames(&noise, &tags, true) {
            Ok(_) => {}
            Err(err) => {
                let msg = err.to_string();
                prop_assert!(
                    msg.contains("no tag declared") || msg.contains("out of range"),
                    "unexpected failure: {}", msg
                );
            }
        }
    }
}
