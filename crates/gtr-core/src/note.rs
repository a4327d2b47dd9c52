//! Time notes attached to commits.
//!
//! A note records how many seconds were spent on each file before a commit,
//! plus a timeline of epoch-second points saying when that time was spent.
//!
//! # Text format
//!
//! ```text
//! [ver:2,total:1800]
//! src/main.rs:600,1710410400:300,1710414000:300,m
//! README.md:1200,1710410400:1200,r
//! ```
//!
//! A header line opens each version block. Version 1 entries carry no
//! timeline (`path:seconds,status`). A single note blob may contain several
//! blocks when commits were squashed or amended; entries for the same file
//! are merged.

use std::collections::{BTreeMap, HashMap};
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

static HEADER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\[ver:(\d+),total:\d+\]$").unwrap());

/// Errors from parsing note text.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum NoteParseError {
    /// A file entry appeared before any version header.
    #[error("line {line}: file entry before version header")]
    MissingHeader { line: usize },

    /// The version header names a format this parser does not know.
    #[error("line {line}: unsupported note version {version}")]
    UnsupportedVersion { line: usize, version: String },

    /// A file entry is malformed.
    #[error("line {line}: {reason}")]
    InvalidEntry { line: usize, reason: String },
}

/// What happened to a file while time was being tracked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileStatus {
    Modified,
    Read,
    Deleted,
}

impl FileStatus {
    /// Single-letter code used in note text.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Modified => "m",
            Self::Read => "r",
            Self::Deleted => "d",
        }
    }

    fn from_code(code: &str) -> Option<Self> {
        match code {
            "m" => Some(Self::Modified),
            "r" => Some(Self::Read),
            "d" => Some(Self::Deleted),
            _ => None,
        }
    }
}

/// Time spent on a single file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileDetail {
    pub source_file: String,
    /// Total seconds spent on the file.
    pub time_spent: i64,
    /// Epoch second → seconds spent at that point.
    pub timeline: BTreeMap<i64, i64>,
    pub status: FileStatus,
}

impl FileDetail {
    /// Folds `other` into this entry, saturating on overflow.
    fn merge(&mut self, other: Self) {
        self.time_spent = self.time_spent.saturating_add(other.time_spent);
        for (epoch, seconds) in other.timeline {
            let slot = self.timeline.entry(epoch).or_insert(0);
            *slot = slot.saturating_add(seconds);
        }
        self.status = other.status;
    }

    /// Folds `other` into this entry. Returns `None` and leaves `self`
    /// untouched when any sum overflows.
    fn checked_merge(&mut self, other: Self) -> Option<()> {
        let time_spent = self.time_spent.checked_add(other.time_spent)?;
        let mut timeline = self.timeline.clone();
        for (epoch, seconds) in other.timeline {
            let slot: &mut i64 = timeline.entry(epoch).or_insert(0);
            *slot = slot.checked_add(seconds)?;
        }
        self.time_spent = time_spent;
        self.timeline = timeline;
        self.status = other.status;
        Some(())
    }
}

/// Time data attached to one commit (or accrued since the last commit).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitNote {
    pub files: Vec<FileDetail>,
}

impl CommitNote {
    /// Sum of seconds across all files, saturating at `i64::MAX`.
    pub fn total(&self) -> i64 {
        self.files
            .iter()
            .fold(0_i64, |sum, f| sum.saturating_add(f.time_spent))
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Appends another note's files, merging entries for the same path.
    ///
    /// Sums saturate at `i64::MAX`.
    pub fn absorb(&mut self, other: Self) {
        let mut index: HashMap<String, usize> = self
            .files
            .iter()
            .enumerate()
            .map(|(i, f)| (f.source_file.clone(), i))
            .collect();
        for file in other.files {
            if let Some(&i) = index.get(&file.source_file) {
                self.files[i].merge(file);
            } else {
                index.insert(file.source_file.clone(), self.files.len());
                self.files.push(file);
            }
        }
    }

    /// Parses note text. Empty text yields an empty note.
    pub fn parse(text: &str) -> Result<Self, NoteParseError> {
        let mut note = Self::default();
        let mut version: Option<u32> = None;

        for (i, raw) in text.lines().enumerate() {
            let line_no = i + 1;
            let line = raw.trim();
            if line.is_empty() {
                continue;
            }

            if let Some(caps) = HEADER_RE.captures(line) {
                let parsed = caps[1].parse::<u32>().ok().filter(|v| (1..=2).contains(v));
                let Some(v) = parsed else {
                    return Err(NoteParseError::UnsupportedVersion {
                        line: line_no,
                        version: caps[1].to_string(),
                    });
                };
                version = Some(v);
                continue;
            }

            let Some(v) = version else {
                return Err(NoteParseError::MissingHeader { line: line_no });
            };
            let detail = parse_file_line(line, v).map_err(|reason| NoteParseError::InvalidEntry {
                line: line_no,
                reason,
            })?;
            let source_file = detail.source_file.clone();
            let merged = match note.files.iter_mut().find(|f| f.source_file == source_file) {
                Some(existing) => existing.checked_merge(detail),
                None => {
                    note.files.push(detail);
                    Some(())
                }
            };
            if merged.is_none() {
                return Err(NoteParseError::InvalidEntry {
                    line: line_no,
                    reason: format!("seconds for {source_file:?} overflow"),
                });
            }
        }

        Ok(note)
    }
}

fn parse_file_line(line: &str, version: u32) -> Result<FileDetail, String> {
    let fields: Vec<&str> = line.split(',').collect();
    let [head, rest @ .., status_code] = fields.as_slice() else {
        return Err(format!("expected `path:seconds,...,status`, got {line:?}"));
    };
    let points = rest;

    let (path, seconds) = head
        .rsplit_once(':')
        .ok_or_else(|| format!("missing seconds for {head:?}"))?;
    if path.is_empty() {
        return Err("empty file path".to_string());
    }
    let time_spent = parse_seconds(seconds)?;
    let status = FileStatus::from_code(status_code)
        .ok_or_else(|| format!("unknown file status {status_code:?}"))?;

    if version == 1 && !points.is_empty() {
        return Err("version 1 entries have no timeline".to_string());
    }

    let mut timeline = BTreeMap::new();
    for point in points {
        let (epoch, secs) = point
            .split_once(':')
            .ok_or_else(|| format!("invalid timeline point {point:?}"))?;
        let epoch = epoch
            .parse::<i64>()
            .map_err(|e| format!("invalid epoch {epoch:?}: {e}"))?;
        let secs = parse_seconds(secs)?;
        let slot: &mut i64 = timeline.entry(epoch).or_insert(0);
        *slot = slot
            .checked_add(secs)
            .ok_or_else(|| format!("timeline seconds at {epoch} overflow"))?;
    }

    // Timeline points may cover less than the file's time, never more
    let placed = timeline
        .values()
        .try_fold(0_i64, |sum, &secs| sum.checked_add(secs));
    if placed.is_none_or(|placed| placed > time_spent) {
        return Err(format!("timeline of {path:?} exceeds its {time_spent} seconds"));
    }

    Ok(FileDetail {
        source_file: path.to_string(),
        time_spent,
        timeline,
        status,
    })
}

fn parse_seconds(value: &str) -> Result<i64, String> {
    let seconds = value
        .parse::<i64>()
        .map_err(|e| format!("invalid seconds {value:?}: {e}"))?;
    if seconds < 0 {
        return Err(format!("negative seconds {value:?}"));
    }
    Ok(seconds)
}
