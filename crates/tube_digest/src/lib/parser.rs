//! # URL Parser
//!
//! This module extracts a canonical video identifier from the YouTube URL
//! shapes the application accepts.

use std::{fmt, ops::Deref, sync::LazyLock};

use regex::Regex;

use crate::error::Error;

static VIDEO_URL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?:https?://)?(?:www\.)?(?:youtube\.com/watch\?v=|youtu\.be/|youtube\.com/embed/|youtube\.com/v/|youtube\.com/shorts/|youtube\.com/playlist\?list=)([^&=%?]{11})",
    )
    .unwrap()
});

/// A validated 11-character YouTube video identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoId(String);

impl VideoId {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Static thumbnail URL for the video, as served by YouTube's image CDN.
    pub fn thumbnail_url(&self) -> String {
        format!("https://img.youtube.com/vi/{}/0.jpg", self.0)
    }
}

impl Deref for VideoId {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl fmt::Display for VideoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Extracts the video id from a YouTube URL.
///
/// Matching is anchored at the start of the string and recognizes the
/// `watch?v=`, `youtu.be/`, `embed/`, `v/`, `shorts/` and `playlist?list=`
/// shapes, with or without scheme and `www.` prefix.
///
/// # Returns
/// * `Ok(VideoId)` with the 11-character id found in the matched shape.
/// * `Err(Error::InvalidUrl)` when no shape matches.
pub fn extract_video_id(url: &str) -> Result<VideoId, Error> {
    VIDEO_URL_RE
        .captures(url)
        .and_then(|cap| cap.get(1))
        .map(|m| VideoId(m.as_str().to_string()))
        .ok_or(Error::InvalidUrl)
}
