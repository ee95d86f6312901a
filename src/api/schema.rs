use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Top-level namespace of the workspace tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Base {
    #[default]
    Research,
    Scripts,
}

impl Base {
    pub fn as_str(self) -> &'static str {
        match self {
            Base::Research => "research",
            Base::Scripts => "scripts",
        }
    }
}

impl fmt::Display for Base {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Base {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "research" => Ok(Base::Research),
            "scripts" => Ok(Base::Scripts),
            other => Err(format!("unknown base '{other}' (expected research or scripts)")),
        }
    }
}

/// A file or directory record returned by a listing call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectoryEntry {
    pub name: String,
    /// Relative, slash-separated path under the listed base.
    pub path: String,
    pub is_dir: bool,
    #[serde(default)]
    pub modified: Option<String>,
}

/// Response of the directory listing endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DirectoryListing {
    #[serde(default)]
    pub path: String,
    #[serde(default)]
    pub entries: Vec<DirectoryEntry>,
}

/// Response of the file content endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileContent {
    #[serde(default)]
    pub content: String,
}

/// Per-channel metadata block from the thumbnail overview.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelBlock {
    pub channel: String,
    #[serde(default)]
    pub channel_title: Option<String>,
    #[serde(default)]
    pub library_path: Option<String>,
}

impl ChannelBlock {
    /// Title for display, falling back to the channel id.
    pub fn display_title(&self) -> &str {
        self.channel_title
            .as_deref()
            .filter(|t| !t.trim().is_empty())
            .unwrap_or(&self.channel)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ThumbnailOverview {
    #[serde(default)]
    pub channels: Vec<ChannelBlock>,
}

impl ThumbnailOverview {
    pub fn contains(&self, channel: &str) -> bool {
        self.channels.iter().any(|c| c.channel == channel)
    }
}

/// A binary thumbnail stored in a channel's library.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThumbnailAsset {
    /// Unique within its channel.
    pub id: String,
    pub file_name: String,
    pub relative_path: String,
    pub public_url: String,
    #[serde(default)]
    pub updated_at: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_parses_case_insensitively() {
        assert_eq!("Research".parse::<Base>().unwrap(), Base::Research);
        assert_eq!(" scripts ".parse::<Base>().unwrap(), Base::Scripts);
        assert!("drafts".parse::<Base>().is_err());
    }

    #[test]
    fn listing_tolerates_missing_optional_fields() {
        let listing: DirectoryListing = serde_json::from_str(
            r#"{"path":"a","entries":[{"name":"b","path":"a/b","is_dir":true}]}"#,
        )
        .unwrap();
        assert_eq!(listing.entries.len(), 1);
        assert!(listing.entries[0].modified.is_none());
    }

    #[test]
    fn channel_title_falls_back_to_id() {
        let block = ChannelBlock {
            channel: "CH01".into(),
            channel_title: Some("  ".into()),
            library_path: None,
        };
        assert_eq!(block.display_title(), "CH01");
    }
}
