//! CLI argument parsing for Cyclescope

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Output format for the reduction results
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// Fixed-width report files (default)
    Text,
    /// Single JSON document on stdout for machine parsing
    Json,
}

#[derive(Parser, Debug)]
#[command(name = "cyclescope")]
#[command(version)]
#[command(about = "Cycle-count reports from embedded voice-DSP profiling logs", long_about = None)]
pub struct Cli {
    /// Source tree scanned for prof() call sites (repeatable)
    #[arg(short = 's', long = "src-dir", value_name = "DIR", required = true)]
    pub src_dirs: Vec<PathBuf>,

    /// Source extensions included in the scan
    #[arg(long = "ext", value_name = "EXT", default_values_t = [String::from("c"), String::from("xc")])]
    pub extensions: Vec<String>,

    /// Captured device log ('-' reads stdin)
    #[arg(short = 'l', long = "log", value_name = "FILE")]
    pub log: PathBuf,

    /// Directory receiving the report artifacts
    #[arg(short = 'o', long = "out-dir", value_name = "DIR", default_value = ".")]
    pub out_dir: PathBuf,

    /// Per-frame report file name
    #[arg(
        long = "profile-file",
        value_name = "FILE",
        default_value = "parsed_profile.log"
    )]
    pub profile_file: PathBuf,

    /// Worst-case report file name
    #[arg(
        long = "worst-case-file",
        value_name = "FILE",
        default_value = "worst_case.log"
    )]
    pub worst_case_file: PathBuf,

    /// Index-to-tag mapping file name
    #[arg(
        long = "mapping-file",
        value_name = "FILE",
        default_value = "profile_index_to_tag_mapping.log"
    )]
    pub mapping_file: PathBuf,

    /// Keep only [DEVICE] lines and strip the marker before parsing
    #[arg(long = "filter-device")]
    pub filter_device: bool,

    /// Write the (possibly filtered) capture to FILE before reduction
    #[arg(long = "dump-file", value_name = "FILE")]
    pub dump_file: Option<PathBuf>,

    /// Finalize a non-empty trailing frame at end of input instead of
    /// dropping it
    #[arg(long = "finalize-trailing")]
    pub finalize_trailing: bool,

    /// Reference timer frequency in MHz
    #[arg(long = "timer-mhz", value_name = "MHZ", default_value = "100")]
    pub timer_mhz: u32,

    /// Processor thread frequency in MHz
    #[arg(long = "thread-mhz", value_name = "MHZ", default_value = "120")]
    pub thread_mhz: u32,

    /// Audio frame period in seconds
    #[arg(long = "frame-secs", value_name = "SECS", default_value = "0.015")]
    pub frame_secs: f64,

    /// Output format (text report files or json on stdout)
    #[arg(long = "format", value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Enable trace-level diagnostics on stderr
    #[arg(long)]
    pub debug: bool,
}
