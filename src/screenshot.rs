// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Failure screenshots
//!
//! Capture is best-effort throughout: a failed capture logs and yields empty
//! bytes rather than aborting the test that triggered it.

use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

use chrono::Local;
use tracing::{error, info, warn};

use crate::error::Result;
use crate::session::UiSession;

/// Capture the current page and save it under `dir` as
/// `{test_name}_{timestamp}.png`, returning the file path.
pub async fn capture(session: &UiSession, dir: impl AsRef<Path>, test_name: &str) -> Result<PathBuf> {
    let dir = dir.as_ref();
    std::fs::create_dir_all(dir)?;

    let timestamp = Local::now().format("%Y%m%d_%H%M%S");
    let path = dir.join(format!("{}_{}.png", test_name, timestamp));

    let bytes = session.screenshot_png().await?;
    std::fs::write(&path, bytes)?;

    info!("Screenshot saved: {}", path.display());
    Ok(path)
}

/// Capture the current page as PNG bytes.
///
/// Never fails: capture errors are logged and produce empty bytes.
pub async fn capture_bytes(session: &UiSession) -> Vec<u8> {
    match session.screenshot_png().await {
        Ok(bytes) => bytes,
        Err(e) => {
            error!("Failed to take screenshot as bytes: {}", e);
            Vec::new()
        }
    }
}

/// Read screenshot bytes back from a file path, empty on failure
pub fn read_bytes(path: impl AsRef<Path>) -> Vec<u8> {
    let path = path.as_ref();
    match std::fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) => {
            warn!("Failed to read screenshot file {}: {}", path.display(), e);
            Vec::new()
        }
    }
}

/// Delete screenshots older than `days_to_keep` days, returning how many
/// files were removed
pub fn clean_older_than(dir: impl AsRef<Path>, days_to_keep: u64) -> Result<usize> {
    let dir = dir.as_ref();
    if !dir.exists() {
        return Ok(0);
    }

    let cutoff = SystemTime::now() - Duration::from_secs(days_to_keep * 24 * 60 * 60);
    let mut removed = 0;

    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let modified = entry.metadata()?.modified()?;
        if modified < cutoff {
            if std::fs::remove_file(&path).is_ok() {
                info!("Deleted old screenshot: {}", path.display());
                removed += 1;
            }
        }
    }
    Ok(removed)
}

/// Number of PNG files in the screenshot directory
pub fn count(dir: impl AsRef<Path>) -> usize {
    let dir = dir.as_ref();
    let Ok(entries) = std::fs::read_dir(dir) else {
        return 0;
    };
    entries
        .filter_map(|e| e.ok())
        .filter(|e| {
            e.path()
                .extension()
                .map(|ext| ext.eq_ignore_ascii_case("png"))
                .unwrap_or(false)
        })
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_bytes_missing_file_is_empty() {
        assert!(read_bytes("/nonexistent/shot.png").is_empty());
    }

    #[test]
    fn test_count_pngs() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("a.png"), b"x").unwrap();
        std::fs::write(dir.path().join("b.PNG"), b"x").unwrap();
        std::fs::write(dir.path().join("notes.txt"), b"x").unwrap();
        assert_eq!(count(dir.path()), 2);
        assert_eq!(count(dir.path().join("missing")), 0);
    }

    #[test]
    fn test_clean_keeps_recent_files() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("recent.png"), b"x").unwrap();
        let removed = clean_older_than(dir.path(), 7).unwrap();
        assert_eq!(removed, 0);
        assert_eq!(count(dir.path()), 1);
    }

    #[test]
    fn test_clean_missing_dir_is_noop() {
        assert_eq!(clean_older_than("/nonexistent/shots", 7).unwrap(), 0);
    }
}
