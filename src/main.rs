use anyhow::{Context, Result};
use clap::Parser;
use cyclescope::cli::{Cli, OutputFormat};
use cyclescope::{device_log, frame, json_output, reduce, report, tag_map};
use tracing_subscriber::EnvFilter;

/// Initialize tracing subscriber for debug output
fn init_tracing(debug: bool) {
    if debug {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::from_default_env().add_directive(tracing::Level::TRACE.into()),
            )
            .with_writer(std::io::stderr)
            .init();
    }
}

fn main() -> Result<()> {
    let args = Cli::parse();

    if args.timer_mhz == 0 {
        anyhow::bail!("Invalid value for --timer-mhz: 0 (must be > 0)");
    }
    if args.thread_mhz == 0 {
        anyhow::bail!("Invalid value for --thread-mhz: 0 (must be > 0)");
    }
    if args.frame_secs <= 0.0 {
        anyhow::bail!(
            "Invalid value for --frame-secs: {} (must be > 0)",
            args.frame_secs
        );
    }

    init_tracing(args.debug);

    // Tag mapping must be complete before any Profile line is resolved
    let tags = tag_map::TagMap::from_sources(&args.src_dirs, &args.extensions)?;
    tracing::debug!(entries = tags.len(), "tag mapping built");

    let raw = device_log::read_lines(&args.log)?;
    let lines = if args.filter_device {
        device_log::filter_device_lines(&raw)
    } else {
        raw
    };

    if let Some(dump) = &args.dump_file {
        device_log::write_dump(&lines, dump)?;
    }

    let frames = frame::collect_frames(&lines, &tags, args.finalize_trailing)?;
    let summaries = reduce::summarize_all(&frames)?;
    tracing::debug!(frames = summaries.len(), "reduction complete");

    let clocks = report::ClockSpec {
        timer_mhz: args.timer_mhz,
        thread_mhz: args.thread_mhz,
        frame_secs: args.frame_secs,
    };

    match args.format {
        OutputFormat::Text => {
            std::fs::create_dir_all(&args.out_dir).with_context(|| {
                format!("Failed to create output directory: {}", args.out_dir.display())
            })?;
            let paths = report::ReportPaths {
                profile: args.out_dir.join(&args.profile_file),
                mapping: args.out_dir.join(&args.mapping_file),
                worst_case: args.out_dir.join(&args.worst_case_file),
            };
            report::write_reports(&tags, &summaries, &clocks, &paths)?;
        }
        OutputFormat::Json => {
            let output = json_output::JsonReport::from_reduction(&tags, &summaries, &clocks);
            println!("{}", output.to_json()?);
        }
    }

    Ok(())
}
