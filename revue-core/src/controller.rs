//! View controller for the prompt → results → detail flow
//!
//! The controller owns all UI-visible state and the live session. It is
//! single-owner: callers pump messages with [`ReviewController::next_message`]
//! and fold them with [`ReviewController::handle_message`], so message
//! handling and user-triggered transitions interleave on one owner and
//! never race.

use tracing::{debug, info};

use crate::model::{MergeRequest, ReviewProgress};
use crate::session::{ReviewStream, SessionHandle, SessionMessage};
use crate::Result;

/// Which of the three views is active
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewMode {
    /// Prompt entry
    Prompt,
    /// Result list
    Results,
    /// Detail view for one selected merge request
    Detail,
}

/// Outcome of a user-triggered transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// The transition was applied and this mode is now active
    Entered(ViewMode),
    /// The trigger was rejected by a guard; state is unchanged
    Ignored,
}

impl Transition {
    /// Check if the transition was applied
    pub fn entered(&self) -> bool {
        matches!(self, Transition::Entered(_))
    }
}

/// Controller for the review view state machine
///
/// Invariants: exactly one [`ViewMode`] is active; `Detail` implies a
/// selected merge request and a progress record; at most one session is
/// live, and it never outlives the view transition that replaces it.
pub struct ReviewController {
    stream: Box<dyn ReviewStream>,
    mode: ViewMode,
    prompt: String,
    results: Vec<MergeRequest>,
    selected: Option<MergeRequest>,
    progress: Option<ReviewProgress>,
    session: Option<SessionHandle>,
}

impl ReviewController {
    /// Create a controller in prompt-entry mode
    pub fn new(stream: Box<dyn ReviewStream>) -> Self {
        Self {
            stream,
            mode: ViewMode::Prompt,
            prompt: String::new(),
            results: Vec::new(),
            selected: None,
            progress: None,
            session: None,
        }
    }

    /// The active view mode
    pub fn mode(&self) -> ViewMode {
        self.mode
    }

    /// The submitted prompt, trimmed
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    /// The current result list, in arrival order
    pub fn results(&self) -> &[MergeRequest] {
        &self.results
    }

    /// The merge request under inspection, if any
    pub fn selected(&self) -> Option<&MergeRequest> {
        self.selected.as_ref()
    }

    /// The progress record for the inspected merge request, if any
    pub fn progress(&self) -> Option<&ReviewProgress> {
        self.progress.as_ref()
    }

    /// Submit a prompt, opening one review session scoped to it
    ///
    /// Blank or whitespace-only prompts are rejected silently: no state
    /// change, no channel opened. Otherwise any prior session is closed
    /// before the new one is established.
    pub async fn submit(&mut self, prompt: &str) -> Result<Transition> {
        let trimmed = prompt.trim();
        if trimmed.is_empty() {
            debug!("Ignoring blank prompt");
            return Ok(Transition::Ignored);
        }

        // Release the prior channel before opening the next one.
        self.close_session();

        let session = self.stream.open(trimmed).await?;
        self.session = Some(session);
        self.prompt = trimmed.to_string();
        self.results.clear();
        self.selected = None;
        self.progress = None;
        self.enter(ViewMode::Results);
        Ok(Transition::Entered(ViewMode::Results))
    }

    /// Receive the next session message, in arrival order
    ///
    /// Returns `None` when no session is live or the stream has ended.
    /// A terminal `Err` means the transport failed; the session is
    /// already closing and no further messages will arrive.
    pub async fn next_message(&mut self) -> Option<Result<SessionMessage>> {
        match self.session.as_mut() {
            Some(session) => session.next_message().await,
            None => None,
        }
    }

    /// Fold one session message into the view state
    ///
    /// A recognized list replaces the result sequence wholesale; any
    /// other shape is ignored without error.
    pub fn handle_message(&mut self, message: SessionMessage) {
        match message {
            SessionMessage::List(items) => {
                info!(count = items.len(), "Received merge request list");
                self.results = items;
            }
            SessionMessage::Raw(text) => {
                debug!(len = text.len(), "Ignoring unrecognized frame");
            }
        }
    }

    /// Inspect a merge request from the current result list
    ///
    /// Only defined in the results view and for an id present in the
    /// list; anything else is ignored.
    pub fn select(&mut self, id: &str) -> Transition {
        if self.mode != ViewMode::Results {
            debug!(id, mode = ?self.mode, "Ignoring selection outside results view");
            return Transition::Ignored;
        }

        let Some(item) = self.results.iter().find(|mr| mr.id == id).cloned() else {
            debug!(id, "Ignoring selection of unknown merge request");
            return Transition::Ignored;
        };

        self.selected = Some(item);
        self.progress = Some(ReviewProgress::pending());
        self.enter(ViewMode::Detail);
        Transition::Entered(ViewMode::Detail)
    }

    /// Leave the detail view, keeping the result list
    pub fn back_to_results(&mut self) -> Transition {
        if self.mode != ViewMode::Detail {
            return Transition::Ignored;
        }

        self.selected = None;
        self.progress = None;
        self.enter(ViewMode::Results);
        Transition::Entered(ViewMode::Results)
    }

    /// Return to prompt entry, clearing all result state at once
    pub fn back_to_prompt(&mut self) -> Transition {
        self.close_session();
        self.prompt.clear();
        self.results.clear();
        self.selected = None;
        self.progress = None;
        self.enter(ViewMode::Prompt);
        Transition::Entered(ViewMode::Prompt)
    }

    fn enter(&mut self, mode: ViewMode) {
        info!(from = ?self.mode, to = ?mode, "View transition");
        self.mode = mode;
    }

    fn close_session(&mut self) {
        if let Some(mut session) = self.session.take() {
            session.close();
        }
    }
}

impl std::fmt::Debug for ReviewController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReviewController")
            .field("mode", &self.mode)
            .field("results", &self.results.len())
            .field("selected", &self.selected.as_ref().map(|mr| &mr.id))
            .finish_non_exhaustive()
    }
}
