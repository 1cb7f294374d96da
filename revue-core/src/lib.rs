//! Revue Core - Core library for streaming merge-request review
//!
//! This crate provides the pieces behind the Revue client: a prompt goes
//! out to a review backend, merge-request lists come back over a
//! server-pushed event stream, and a view controller folds them into the
//! prompt → results → detail flow.

pub mod config;
pub mod controller;
pub mod error;
pub mod model;
pub mod session;

pub use config::Config;
pub use controller::{ReviewController, Transition, ViewMode};
pub use error::{Error, Result};
pub use model::{Author, MergeRequest, ProgressStatus, ReviewProgress, StatusCategory};
pub use session::{ReviewStream, SessionHandle, SessionMessage, SseReviewStream};
