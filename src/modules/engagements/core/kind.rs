use std::fmt;
use std::str::FromStr;

/// The kinds of engagement a viewer can have with a work.
///
/// `View` is counter-only; the remaining kinds are binary toggles. `Archive`
/// is a subject flag rather than a per-viewer record and is owner-only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EngagementKind {
    View,
    Repost,
    Like,
    Bookmark,
    Archive,
}

impl EngagementKind {
    pub fn is_toggle(self) -> bool {
        !matches!(self, EngagementKind::View)
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("unknown engagement kind: {0}")]
pub struct ParseKindError(pub String);

impl FromStr for EngagementKind {
    type Err = ParseKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "view" => Ok(EngagementKind::View),
            "repost" => Ok(EngagementKind::Repost),
            "like" => Ok(EngagementKind::Like),
            "bookmark" => Ok(EngagementKind::Bookmark),
            "archive" => Ok(EngagementKind::Archive),
            other => Err(ParseKindError(other.to_string())),
        }
    }
}

impl fmt::Display for EngagementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            EngagementKind::View => "view",
            EngagementKind::Repost => "repost",
            EngagementKind::Like => "like",
            EngagementKind::Bookmark => "bookmark",
            EngagementKind::Archive => "archive",
        };
        f.write_str(s)
    }
}
