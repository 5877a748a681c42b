use std::{
    fs,
    path::{Path, PathBuf},
};

use chrono::{DateTime, Local};
use egui::mutex::RwLock;
use glob::Pattern;
use log::{debug, info, warn};

use crate::{error::PieError, stats::UsageStats, utils::is_hidden};

/// Progress of one directory scan, shared between the scanning thread and
/// whoever displays it.
#[derive(Clone, Debug)]
pub struct Scan {
    pub dir: String,
    pub started_at: DateTime<Local>,
    pub completed_at: Option<DateTime<Local>>,
    pub current_file: Option<String>,
    pub stats: UsageStats,
    pub stop_requested: bool,
    pub error: Option<String>,
}

impl Scan {
    pub fn new(dir: impl Into<String>) -> Self {
        Scan {
            dir: dir.into(),
            started_at: Local::now(),
            completed_at: None,
            current_file: None,
            stats: UsageStats::default(),
            stop_requested: false,
            error: None,
        }
    }

    pub fn is_running(&self) -> bool {
        self.completed_at.is_none()
    }

    fn register_file(&mut self, path: &Path, len: u64) {
        self.current_file = Some(path.display().to_string());
        self.stats.register_file(path, len);
    }
}

/// Walks a directory tree and tallies file sizes by category.
#[derive(Clone, Debug)]
pub struct Analyzer {
    root: PathBuf,
    ignore: Option<Pattern>,
    hidden: bool,
}

impl Analyzer {
    /// `ignore` is a glob matched against entry names and full paths; an
    /// empty string ignores nothing.
    pub fn new(root: impl Into<PathBuf>, ignore: &str, hidden: bool) -> Result<Self, PieError> {
        let ignore = if ignore.is_empty() {
            None
        } else {
            Some(Pattern::new(ignore)?)
        };

        Ok(Analyzer {
            root: root.into(),
            ignore,
            hidden,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Same filters, different directory.
    pub fn with_root(&self, root: impl Into<PathBuf>) -> Self {
        Analyzer {
            root: root.into(),
            ..self.clone()
        }
    }

    /// Scans the tree into `scan`, marking it complete when done. Fails only
    /// if the root itself can't be read; unreadable subdirectories are
    /// logged and skipped.
    pub fn analyze(&self, scan: &RwLock<Scan>) -> Result<(), PieError> {
        info!("scanning {}", self.root.display());

        let result = self.read_dir(&self.root, scan);

        let mut state = scan.write();
        state.completed_at = Some(Local::now());
        state.current_file = None;
        info!(
            "scanned {} files ({} bytes) under {}",
            state.stats.files,
            state.stats.total_bytes(),
            self.root.display()
        );
        result
    }

    fn skip(&self, path: &Path) -> bool {
        if !self.hidden && is_hidden(path) {
            return true;
        }

        match &self.ignore {
            Some(pattern) => {
                let name = path.file_name().and_then(|n| n.to_str()).unwrap_or("");
                pattern.matches(name) || pattern.matches_path(path)
            }
            None => false,
        }
    }

    fn read_dir(&self, dir: &Path, scan: &RwLock<Scan>) -> Result<(), PieError> {
        let entries = fs::read_dir(dir)?.filter_map(Result::ok);

        for entry in entries {
            if scan.read().stop_requested {
                debug!("scan of {} stopped", dir.display());
                return Ok(());
            }

            let path = entry.path();
            if self.skip(&path) {
                continue;
            }

            // symlinks are counted as links, never followed
            let metadata = match fs::symlink_metadata(&path) {
                Ok(metadata) => metadata,
                Err(err) => {
                    warn!("skipping {}: {}", path.display(), err);
                    continue;
                }
            };

            if metadata.is_dir() {
                if let Err(err) = self.read_dir(&path, scan) {
                    warn!("skipping {}: {}", path.display(), err);
                }
            } else if metadata.is_file() {
                scan.write().register_file(&path, metadata.len());
            }
        }

        Ok(())
    }
}
