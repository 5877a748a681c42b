use std::path::Path;

use human_bytes::human_bytes;

pub fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .map(|name| name.starts_with('.'))
        .unwrap_or(false)
}

pub fn bytes_to_human(bytes: u64) -> String {
    human_bytes(bytes as f64)
}
