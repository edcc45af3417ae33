//! Recorded talks listed next to the articles

use serde::{Deserialize, Serialize};
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use super::ContentError;
use crate::helpers::encode_path_segment;

/// One conference or meetup talk with its video
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Talk {
    pub title: String,
    #[serde(default)]
    pub event: String,
    #[serde(default)]
    pub description: String,
    /// YouTube video id
    #[serde(rename = "videoId")]
    pub video_id: String,
}

impl Talk {
    /// Link to the recording
    pub fn video_url(&self) -> String {
        format!(
            "https://www.youtube.com/watch?v={}",
            encode_path_segment(&self.video_id)
        )
    }
}

/// Read the talks list from a JSON array, in file order.
///
/// A missing file means no talks.
pub fn load_talks(path: &Path) -> Result<Vec<Talk>, ContentError> {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            tracing::debug!("No talks file at {:?}", path);
            return Ok(Vec::new());
        }
        Err(source) => {
            return Err(ContentError::ReadFile {
                path: path.to_path_buf(),
                source,
            })
        }
    };

    serde_json::from_str(&raw).map_err(|source| ContentError::Talks {
        path: path.to_path_buf(),
        source,
    })
}
