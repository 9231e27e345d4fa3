//! View models for the report and dashboard pages.
//!
//! Rendering is left to the front end; these types hold the state each page
//! shows and the rules for moving between states.

pub mod capabilities;
pub mod client;
pub mod dashboard;
pub mod display;
pub mod landing;
pub mod pages;
pub mod report;

/// Per-view fetch lifecycle: idle, loading, then success or error
#[derive(Debug, Clone, PartialEq)]
pub enum FetchState<T> {
    Idle,
    Loading,
    Success(T),
    Failed(String),
}

impl<T> Default for FetchState<T> {
    fn default() -> Self {
        FetchState::Idle
    }
}

impl<T> FetchState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, FetchState::Loading)
    }

    pub fn value(&self) -> Option<&T> {
        match self {
            FetchState::Success(v) => Some(v),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            FetchState::Failed(msg) => Some(msg.as_str()),
            _ => None,
        }
    }
}
