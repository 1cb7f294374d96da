//! Server-sent-event transport for review sessions

use async_trait::async_trait;
use futures::StreamExt;
use reqwest_eventsource::{retry, Event, EventSource};
use tracing::{debug, info, warn};
use url::Url;

use super::{ReviewStream, SessionHandle, SessionMessage};
use crate::{Error, Result};

/// Review session source backed by an SSE endpoint
///
/// Opens one `EventSource` per session; each inbound frame is decoded
/// and forwarded in arrival order. Transport errors terminate the
/// session with a failure signal and no automatic retry.
pub struct SseReviewStream {
    client: reqwest::Client,
    endpoint: Url,
}

impl SseReviewStream {
    /// Create a session source for the given review endpoint
    pub fn new(endpoint: Url) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint,
        }
    }

    /// Build the session URL with the prompt percent-encoded
    fn request_url(&self, prompt: &str) -> Url {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut().append_pair("prompt", prompt);
        url
    }
}

#[async_trait]
impl ReviewStream for SseReviewStream {
    async fn open(&self, prompt: &str) -> Result<SessionHandle> {
        let url = self.request_url(prompt);
        debug!(url = %url, "Opening review event stream");

        let request = self.client.get(url);
        let mut es = EventSource::new(request)
            .map_err(|e| Error::Transport(format!("Failed to open event stream: {}", e)))?;
        // Retry policy belongs to the caller, not this layer.
        es.set_retry_policy(Box::new(retry::Never));

        let (tx, mut cancel, handle) = SessionHandle::channel();

        tokio::spawn(async move {
            loop {
                tokio::select! {
                    _ = &mut cancel => {
                        debug!("Review session cancelled by consumer");
                        break;
                    }
                    event = es.next() => match event {
                        Some(Ok(Event::Open)) => {
                            debug!("Review event stream connected");
                        }
                        Some(Ok(Event::Message(frame))) => {
                            let message = SessionMessage::decode(&frame.data);
                            if tx.send(Ok(message)).await.is_err() {
                                // Consumer dropped the handle.
                                break;
                            }
                        }
                        Some(Err(reqwest_eventsource::Error::StreamEnded)) => {
                            debug!("Review event stream ended");
                            break;
                        }
                        Some(Err(e)) => {
                            warn!(error = %e, "Review event stream failed");
                            let _ = tx.send(Err(Error::Transport(e.to_string()))).await;
                            break;
                        }
                        None => break,
                    },
                }
            }
            es.close();
        });

        info!(prompt_len = prompt.len(), "Review session opened");
        Ok(handle)
    }
}

impl std::fmt::Debug for SseReviewStream {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SseReviewStream")
            .field("endpoint", &self.endpoint.as_str())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stream_for(endpoint: &str) -> SseReviewStream {
        SseReviewStream::new(Url::parse(endpoint).unwrap())
    }

    #[test]
    fn test_prompt_is_percent_encoded() {
        let stream = stream_for("http://localhost:8080/review");
        let url = stream.request_url("review my branch & tell me");

        assert_eq!(
            url.as_str(),
            "http://localhost:8080/review?prompt=review+my+branch+%26+tell+me"
        );
    }

    #[test]
    fn test_existing_query_is_preserved() {
        let stream = stream_for("http://localhost:8080/review?team=platform");
        let url = stream.request_url("check MRs");

        assert_eq!(
            url.as_str(),
            "http://localhost:8080/review?team=platform&prompt=check+MRs"
        );
    }
}
