//! Profiling-index to tag-string mapping extracted from instrumented sources
//!
//! Device code declares timing points with `prof(<index>, "<tag>")` call
//! sites. The captured log refers to points by index only, so the mapping is
//! rebuilt from the source tree before any log line is resolved. An index
//! re-declared with a different tag means two call sites share a profiling
//! slot and the run is aborted.

use crate::error::ReduceError;
use anyhow::{Context, Result};
use regex::Regex;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

/// Immutable index → tag mapping built once per run
#[derive(Debug, Clone, Default)]
pub struct TagMap {
    entries: BTreeMap<u64, String>,
}

impl TagMap {
    /// Create an empty mapping
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the mapping by scanning source roots recursively.
    ///
    /// Only files whose extension appears in `extensions` are read. Matches
    /// `prof ( <integer> , "<tag>" ) ;` with arbitrary whitespace around the
    /// punctuation.
    pub fn from_sources(roots: &[PathBuf], extensions: &[String]) -> Result<Self> {
        let call_site = Regex::new(r#"^\s*prof\s*\(\s*(\d+)\s*,\s*"(.*)"\s*\)\s*;"#)
            .expect("call-site pattern is valid");

        let mut map = Self::new();
        for root in roots {
            for entry in WalkDir::new(root).into_iter().filter_map(|e| e.ok()) {
                if !entry.file_type().is_file() {
                    continue;
                }
                let path = entry.path();
                if !has_extension(path, extensions) {
                    continue;
                }
                debug!(file = %path.display(), "scanning for prof() call sites");
                map.scan_file(path, &call_site)?;
            }
        }
        Ok(map)
    }

    fn scan_file(&mut self, path: &Path, call_site: &Regex) -> Result<()> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read source file: {}", path.display()))?;

        for line in contents.lines() {
            if let Some(caps) = call_site.captures(line) {
                let index: u64 = caps[1].parse().with_context(|| {
                    format!("Profiling index out of range in {}", path.display())
                })?;
                self.insert(index, caps[2].to_string())?;
            }
        }
        Ok(())
    }

    /// Record one declaration. Re-declaring an index with the same tag is a
    /// no-op; a different tag is a configuration defect.
    pub fn insert(&mut self, index: u64, tag: String) -> Result<(), ReduceError> {
        match self.entries.get(&index) {
            Some(existing) if *existing != tag => Err(ReduceError::DuplicateIndex {
                index,
                existing: existing.clone(),
                conflicting: tag,
            }),
            _ => {
                self.entries.insert(index, tag);
                Ok(())
            }
        }
    }

    /// Resolve an index to its tag string
    pub fn get(&self, index: u64) -> Option<&str> {
        self.entries.get(&index).map(String::as_str)
    }

    /// Entries in ascending index order
    pub fn iter(&self) -> impl Iterator<Item = (u64, &str)> {
        self.entries.iter().map(|(index, tag)| (*index, tag.as_str()))
    }

    /// Number of declared indexes
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when no declarations were found
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn has_extension(path: &Path, extensions: &[String]) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| extensions.iter().any(|want| want == ext))
}
