//! Streaming review sessions
//!
//! A session is one server-pushed event channel scoped to a single
//! prompt. The [`ReviewStream`] trait is the seam between the view
//! controller and the transport, so a test double can stand in for the
//! backend.

mod message;
mod sse;

pub use message::SessionMessage;
pub use sse::SseReviewStream;

use async_trait::async_trait;
use tokio::sync::{mpsc, oneshot};
use tracing::debug;

use crate::Result;

/// Buffer of the session message channel
const CHANNEL_CAPACITY: usize = 32;

/// A source of review sessions
#[async_trait]
pub trait ReviewStream: Send + Sync {
    /// Open one event channel scoped to the given prompt
    ///
    /// The prompt's semantics are not validated here; it is only encoded
    /// safely into the transport address.
    async fn open(&self, prompt: &str) -> Result<SessionHandle>;
}

/// Handle to one live review session
///
/// Exclusively owns its transport channel; holds no state across
/// sessions. Dropping the handle closes the channel.
pub struct SessionHandle {
    rx: mpsc::Receiver<Result<SessionMessage>>,
    cancel: Option<oneshot::Sender<()>>,
}

impl SessionHandle {
    /// Create a handle plus the sender and cancel signal that drive it
    ///
    /// Transport implementations forward decoded messages through the
    /// returned sender and stop when the cancel signal fires. Test
    /// doubles use the same construction.
    pub fn channel() -> (
        mpsc::Sender<Result<SessionMessage>>,
        oneshot::Receiver<()>,
        SessionHandle,
    ) {
        let (tx, rx) = mpsc::channel(CHANNEL_CAPACITY);
        let (cancel_tx, cancel_rx) = oneshot::channel();
        let handle = SessionHandle {
            rx,
            cancel: Some(cancel_tx),
        };
        (tx, cancel_rx, handle)
    }

    /// Receive the next message, in transport arrival order
    ///
    /// Returns `None` once the stream has ended or the session was
    /// closed.
    pub async fn next_message(&mut self) -> Option<Result<SessionMessage>> {
        self.rx.recv().await
    }

    /// Close the session, releasing the transport channel
    ///
    /// Idempotent: closing an already-closed handle is a no-op.
    pub fn close(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            // The transport task may already be gone; that's fine.
            let _ = cancel.send(());
            debug!("Review session closed");
        }
    }
}

impl Drop for SessionHandle {
    fn drop(&mut self) {
        self.close();
    }
}

impl std::fmt::Debug for SessionHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionHandle")
            .field("closed", &self.cancel.is_none())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_close_is_idempotent() {
        let (_tx, mut cancel, mut handle) = SessionHandle::channel();

        handle.close();
        handle.close();
        handle.close();

        assert!(cancel.try_recv().is_ok());
    }

    #[tokio::test]
    async fn test_drop_closes_session() {
        let (_tx, cancel, handle) = SessionHandle::channel();

        drop(handle);

        assert!(cancel.await.is_ok());
    }

    #[tokio::test]
    async fn test_messages_arrive_in_order() {
        let (tx, _cancel, mut handle) = SessionHandle::channel();

        tx.send(Ok(SessionMessage::Raw("first".to_string())))
            .await
            .unwrap();
        tx.send(Ok(SessionMessage::Raw("second".to_string())))
            .await
            .unwrap();
        drop(tx);

        assert_eq!(
            handle.next_message().await.unwrap().unwrap(),
            SessionMessage::Raw("first".to_string())
        );
        assert_eq!(
            handle.next_message().await.unwrap().unwrap(),
            SessionMessage::Raw("second".to_string())
        );
        assert!(handle.next_message().await.is_none());
    }

    #[tokio::test]
    async fn test_transport_error_is_terminal() {
        let (tx, _cancel, mut handle) = SessionHandle::channel();

        tx.send(Err(crate::Error::Transport("connection reset".to_string())))
            .await
            .unwrap();
        drop(tx);

        assert!(handle.next_message().await.unwrap().is_err());
        assert!(handle.next_message().await.is_none());
    }
}
