//! Data model for merge requests and review progress

use serde::{Deserialize, Serialize};

/// Author of a merge request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    /// Display name
    pub name: String,
}

/// A single reviewable merge request as pushed by the backend
///
/// Immutable once received; held in arrival order for the duration of
/// one result set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MergeRequest {
    /// Unique identifier, e.g. "MR-101"
    pub id: String,
    /// Free-text state as reported by the backend ("OPEN", "merged", ...)
    #[serde(default)]
    pub status: Option<String>,
    /// Author reference
    pub author: Author,
}

impl MergeRequest {
    /// Classify this merge request's status into a display category
    pub fn category(&self) -> StatusCategory {
        StatusCategory::classify(self.status.as_deref())
    }
}

/// Display category for a merge request status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusCategory {
    Open,
    Merged,
    Closed,
    /// Unrecognized or absent status, rendered unstyled
    Unknown,
}

impl StatusCategory {
    /// Map a free-text status to a display category
    ///
    /// Case-insensitive, total: anything unrecognized (including absent
    /// values) falls through to [`StatusCategory::Unknown`].
    pub fn classify(status: Option<&str>) -> Self {
        match status {
            Some(s) if s.eq_ignore_ascii_case("open") => StatusCategory::Open,
            Some(s) if s.eq_ignore_ascii_case("merged") => StatusCategory::Merged,
            Some(s) if s.eq_ignore_ascii_case("closed") => StatusCategory::Closed,
            _ => StatusCategory::Unknown,
        }
    }

    /// Display name for this category; empty for unrecognized statuses
    pub fn as_str(&self) -> &'static str {
        match self {
            StatusCategory::Open => "open",
            StatusCategory::Merged => "merged",
            StatusCategory::Closed => "closed",
            StatusCategory::Unknown => "",
        }
    }
}

impl std::fmt::Display for StatusCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Status of a review in progress
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProgressStatus {
    /// Review not started yet
    Pending,
    /// Review running
    InProgress,
    /// Review finished
    Done,
    /// Review aborted with an error
    Failed,
}

impl ProgressStatus {
    /// Check if the review has reached a terminal state
    pub fn is_terminal(&self) -> bool {
        matches!(self, ProgressStatus::Done | ProgressStatus::Failed)
    }

    /// Check if the review is running
    pub fn is_in_progress(&self) -> bool {
        matches!(self, ProgressStatus::InProgress)
    }
}

/// Progress record shown when a merge request is inspected
///
/// Created when an item is selected, destroyed when the user navigates
/// back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewProgress {
    /// Total files under review
    pub total_files: u32,
    /// Files whose checks failed
    pub failed_files: u32,
    /// Current review status
    pub status: ProgressStatus,
}

impl ReviewProgress {
    /// Initial progress record for a freshly selected merge request
    pub fn pending() -> Self {
        Self {
            total_files: 0,
            failed_files: 0,
            status: ProgressStatus::Pending,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_is_case_insensitive() {
        assert_eq!(StatusCategory::classify(Some("open")), StatusCategory::Open);
        assert_eq!(StatusCategory::classify(Some("Open")), StatusCategory::Open);
        assert_eq!(StatusCategory::classify(Some("OPEN")), StatusCategory::Open);
        assert_eq!(
            StatusCategory::classify(Some("Merged")),
            StatusCategory::Merged
        );
        assert_eq!(
            StatusCategory::classify(Some("closed")),
            StatusCategory::Closed
        );
    }

    #[test]
    fn test_classify_unrecognized_falls_through() {
        assert_eq!(
            StatusCategory::classify(Some("unknown")),
            StatusCategory::Unknown
        );
        assert_eq!(StatusCategory::classify(Some("")), StatusCategory::Unknown);
        assert_eq!(StatusCategory::classify(None), StatusCategory::Unknown);
        assert_eq!(StatusCategory::Unknown.as_str(), "");
    }

    #[test]
    fn test_merge_request_category() {
        let mr: MergeRequest = serde_json::from_str(
            r#"{"id":"MR-101","status":"OPEN","author":{"name":"Alice"}}"#,
        )
        .unwrap();
        assert_eq!(mr.id, "MR-101");
        assert_eq!(mr.author.name, "Alice");
        assert_eq!(mr.category(), StatusCategory::Open);
    }

    #[test]
    fn test_merge_request_without_status() {
        let mr: MergeRequest =
            serde_json::from_str(r#"{"id":"MR-9","author":{"name":"Bob"}}"#).unwrap();
        assert_eq!(mr.status, None);
        assert_eq!(mr.category(), StatusCategory::Unknown);
    }

    #[test]
    fn test_pending_progress() {
        let progress = ReviewProgress::pending();
        assert_eq!(progress.total_files, 0);
        assert_eq!(progress.failed_files, 0);
        assert_eq!(progress.status, ProgressStatus::Pending);
        assert!(!progress.status.is_terminal());
        assert!(!progress.status.is_in_progress());
    }
}
