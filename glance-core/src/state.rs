use tracing::debug;

use crate::error::{FetchError, LocationError};
use crate::model::WeatherReport;

/// What the UI currently displays. Exactly one variant is active.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ViewState {
    #[default]
    Idle,
    Loading,
    Error(String),
    Success(WeatherReport),
}

/// Identifies one issued fetch. Only the outcome carrying the most
/// recently issued ticket is applied to the view; anything older is a
/// stale in-flight response and gets discarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket(u64);

/// Single source of truth for the lookup UI: the current view, the pending
/// input text, and the sequence number of the latest issued fetch.
#[derive(Debug, Default)]
pub struct LookupState {
    view: ViewState,
    input: String,
    latest: u64,
}

impl LookupState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn set_input(&mut self, text: impl Into<String>) {
        self.input = text.into();
    }

    /// Enter Loading, clearing whatever was displayed before, and issue a
    /// ticket for the outgoing request.
    pub fn begin_fetch(&mut self) -> FetchTicket {
        self.latest += 1;
        self.view = ViewState::Loading;
        FetchTicket(self.latest)
    }

    /// Settle a fetch. The input text is cleared regardless of outcome.
    ///
    /// Returns `false` when the ticket is stale; the outcome is discarded
    /// and the view is left untouched.
    pub fn finish_fetch(
        &mut self,
        ticket: FetchTicket,
        outcome: Result<WeatherReport, FetchError>,
    ) -> bool {
        self.input.clear();

        if ticket.0 != self.latest {
            debug!(
                ticket = ticket.0,
                latest = self.latest,
                "discarding stale fetch outcome"
            );
            return false;
        }

        self.view = match outcome {
            Ok(report) => ViewState::Success(report),
            Err(err) => ViewState::Error(err.user_message().to_string()),
        };
        true
    }

    /// Record a failed location attempt. Never enters Loading; manual
    /// search remains available.
    pub fn location_failed(&mut self, err: &LocationError) {
        self.view = ViewState::Error(err.user_message().to_string());
    }
}
