use std::{cell::RefCell, path::Path};

use colored::*;

use crate::{pie_view::PieView, source::PieViewDataSource, utils::bytes_to_human};

/// What kind of data a file holds, judged by its MIME type.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Category {
    Images,
    Music,
    Videos,
    Documents,
    Archives,
    Binaries,
    Other,
}

impl Category {
    /// Every category, in slice order.
    pub const ALL: [Category; 7] = [
        Category::Images,
        Category::Music,
        Category::Videos,
        Category::Documents,
        Category::Archives,
        Category::Binaries,
        Category::Other,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Category::Images => "Images",
            Category::Music => "Music",
            Category::Videos => "Videos",
            Category::Documents => "Documents",
            Category::Archives => "Archives",
            Category::Binaries => "Binaries",
            Category::Other => "Other",
        }
    }

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_path(path: &Path) -> Category {
        match mime_guess::from_path(path).first() {
            Some(mime) => Self::from_mime(mime.essence_str()),
            None => Category::Other,
        }
    }

    fn from_mime(mime: &str) -> Category {
        if mime.starts_with("image/") {
            Category::Images
        } else if mime.starts_with("audio/") {
            Category::Music
        } else if mime.starts_with("video/") {
            Category::Videos
        } else if is_document(mime) {
            Category::Documents
        } else if is_archive(mime) {
            Category::Archives
        } else if is_binary(mime) {
            Category::Binaries
        } else {
            Category::Other
        }
    }
}

fn is_document(mime: &str) -> bool {
    matches!(
        mime,
        "application/msword"
            | "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
            | "application/vnd.ms-excel"
            | "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
            | "application/pdf"
            | "text/plain"
    )
}

fn is_binary(mime: &str) -> bool {
    matches!(mime, "application/octet-stream")
}

fn is_archive(mime: &str) -> bool {
    matches!(
        mime,
        "application/x-bzip"
            | "application/x-bzip2"
            | "application/zip"
            | "application/x-tar"
            | "application/gzip"
            | "application/x-7z-compressed"
    )
}

/// Bytes seen per category.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct UsageStats {
    totals: [u64; Category::ALL.len()],
    pub files: u64,
}

impl UsageStats {
    pub fn register_file(&mut self, path: &Path, len: u64) {
        self.totals[Category::from_path(path).index()] += len;
        self.files += 1;
    }

    pub fn total(&self, category: Category) -> u64 {
        self.totals[category.index()]
    }

    pub fn total_bytes(&self) -> u64 {
        self.totals.iter().sum()
    }
}

/// Feeds category totals to a [`PieView`], one slice per [`Category`].
#[derive(Debug, Default)]
pub struct UsageSource {
    stats: RefCell<UsageStats>,
}

impl UsageSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the totals. The view picks them up on its next reload.
    pub fn update(&self, stats: UsageStats) {
        *self.stats.borrow_mut() = stats;
    }

    pub fn stats(&self) -> UsageStats {
        self.stats.borrow().clone()
    }

    pub fn print_breakdown(&self, view: &PieView) {
        let stats = self.stats.borrow();
        println!(
            "{} files, {}",
            stats.files.to_string().bold(),
            bytes_to_human(stats.total_bytes()).bold()
        );

        for slice in view.slices() {
            let Some(category) = Category::ALL.get(slice.index) else {
                continue;
            };
            let c = view.color_for_slice(slice.index);
            println!(
                "{} {:<10} {:>12} {:>6.1}% {:>6.1}°",
                "■".truecolor(c.r, c.g, c.b),
                category.label().bright_white(),
                bytes_to_human(stats.total(*category)),
                slice.fraction() * 100.0,
                slice.span.sweep().to_degrees(),
            );
        }
    }
}

impl PieViewDataSource for UsageSource {
    fn number_of_slices(&self, _view: &PieView) -> usize {
        Category::ALL.len()
    }

    fn value_for_slice(&self, _view: &PieView, index: usize) -> f64 {
        Category::ALL
            .get(index)
            .map(|category| self.stats.borrow().total(*category) as f64)
            .unwrap_or(0.0)
    }
}
