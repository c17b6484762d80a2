//! Reader for an on-disk content library: the processed-video count from
//! `content_library.md` and the most recent `content_model_*.txt` files.

use std::path::Path;

use chrono::{DateTime, Utc};
use mc_panels::panels::pipeline::DEFAULT_TOTAL_VIDEOS;
use serde::Serialize;

pub const LIBRARY_FILE: &str = "content_library.md";
pub const RECENT_LIMIT: usize = 5;

const TOTAL_MARKER: &str = "Total videos processed: ";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContentModel {
    pub name: String,
    pub modified: DateTime<Utc>,
    pub size: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LibrarySummary {
    pub total_videos: u32,
    pub recent: Vec<ContentModel>,
}

impl Default for LibrarySummary {
    fn default() -> Self {
        Self {
            total_videos: DEFAULT_TOTAL_VIDEOS,
            recent: Vec::new(),
        }
    }
}

/// First `Total videos processed: N` in `text`.
pub fn parse_total_videos(text: &str) -> Option<u32> {
    text.match_indices(TOTAL_MARKER).find_map(|(at, _)| {
        let rest = &text[at + TOTAL_MARKER.len()..];
        let digits: String = rest.chars().take_while(|c| c.is_ascii_digit()).collect();
        digits.parse().ok()
    })
}

/// Processed-video count, or the default when the file is missing or has no count.
pub fn read_total_videos(dir: &Path) -> u32 {
    let path = dir.join(LIBRARY_FILE);
    match std::fs::read_to_string(&path) {
        Ok(text) => parse_total_videos(&text).unwrap_or_else(|| {
            tracing::warn!(path = %path.display(), "No video count in content library");
            DEFAULT_TOTAL_VIDEOS
        }),
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "Content library unreadable");
            DEFAULT_TOTAL_VIDEOS
        }
    }
}

fn is_content_model(name: &str) -> bool {
    name.starts_with("content_model_") && name.ends_with(".txt")
}

/// Up to [`RECENT_LIMIT`] content model files, newest first.
pub fn recent_models(dir: &Path) -> Vec<ContentModel> {
    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            tracing::warn!(dir = %dir.display(), error = %e, "Cannot list content library");
            return Vec::new();
        }
    };

    let mut models: Vec<ContentModel> = entries
        .filter_map(Result::ok)
        .filter_map(|entry| {
            let name = entry.file_name().to_string_lossy().into_owned();
            if !is_content_model(&name) {
                return None;
            }
            let meta = entry.metadata().ok()?;
            if !meta.is_file() {
                return None;
            }
            let modified = meta.modified().ok()?;
            Some(ContentModel {
                name,
                modified: DateTime::<Utc>::from(modified),
                size: meta.len(),
            })
        })
        .collect();

    models.sort_by(|a, b| b.modified.cmp(&a.modified).then_with(|| b.name.cmp(&a.name)));
    models.truncate(RECENT_LIMIT);
    models
}

pub fn summarize(dir: &Path) -> LibrarySummary {
    LibrarySummary {
        total_videos: read_total_videos(dir),
        recent: recent_models(dir),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn count_parsed_from_markdown() {
        let text = "# Library\n\n- Total videos processed: 27\n- Size: 3MB\n";
        assert_eq!(parse_total_videos(text), Some(27));
        assert_eq!(parse_total_videos("Total videos processed: n/a"), None);
        assert_eq!(parse_total_videos("nothing here"), None);
    }
}
