//! Inbound frame decoding for review sessions

use serde::Deserialize;

use crate::model::MergeRequest;

/// Wire form of a pushed frame, discriminated by its `dataType` tag
#[derive(Debug, Deserialize)]
#[serde(tag = "dataType")]
enum WireFrame {
    /// A merge request list
    #[serde(rename = "mr")]
    Mr { data: Vec<MergeRequest> },
}

/// A message delivered by a review session, in transport arrival order
#[derive(Debug, Clone, PartialEq)]
pub enum SessionMessage {
    /// A recognized merge-request list
    List(Vec<MergeRequest>),
    /// A frame that failed structured decode, forwarded unchanged
    Raw(String),
}

impl SessionMessage {
    /// Decode one text frame
    ///
    /// Total: a frame that is not a recognized discriminated object
    /// degrades to [`SessionMessage::Raw`] rather than terminating the
    /// session.
    pub fn decode(frame: &str) -> Self {
        match serde_json::from_str::<WireFrame>(frame) {
            Ok(WireFrame::Mr { data }) => SessionMessage::List(data),
            Err(_) => SessionMessage::Raw(frame.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::StatusCategory;

    #[test]
    fn test_decode_mr_frame() {
        let frame = r#"{"dataType":"mr","data":[{"id":"MR-101","status":"OPEN","author":{"name":"Alice"}}]}"#;
        match SessionMessage::decode(frame) {
            SessionMessage::List(items) => {
                assert_eq!(items.len(), 1);
                assert_eq!(items[0].id, "MR-101");
                assert_eq!(items[0].author.name, "Alice");
                assert_eq!(items[0].category(), StatusCategory::Open);
            }
            other => panic!("Expected List, got {:?}", other),
        }
    }

    #[test]
    fn test_decode_empty_list() {
        let frame = r#"{"dataType":"mr","data":[]}"#;
        assert_eq!(SessionMessage::decode(frame), SessionMessage::List(vec![]));
    }

    #[test]
    fn test_unrecognized_tag_degrades_to_raw() {
        let frame = r#"{"dataType":"comment","data":[]}"#;
        assert_eq!(
            SessionMessage::decode(frame),
            SessionMessage::Raw(frame.to_string())
        );
    }

    #[test]
    fn test_non_sequence_payload_degrades_to_raw() {
        let frame = r#"{"dataType":"mr","data":{"id":"MR-1"}}"#;
        assert_eq!(
            SessionMessage::decode(frame),
            SessionMessage::Raw(frame.to_string())
        );
    }

    #[test]
    fn test_plain_text_degrades_to_raw() {
        assert_eq!(
            SessionMessage::decode("heartbeat"),
            SessionMessage::Raw("heartbeat".to_string())
        );
    }
}
