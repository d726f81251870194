//! State container for the widget: draft input, the query in effect, and the
//! outcome of the latest lookup.

use crate::{
    error::LookupError,
    model::WeatherReport,
};

/// Identifies one lookup. Outcomes are applied only while their generation is
/// still the widget's current one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    pub generation: u64,
    pub city: String,
}

/// Coarse lifecycle of the current query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Fetching,
    Success,
    Failure,
}

#[derive(Debug, Clone)]
pub struct WeatherWidget {
    draft: String,
    query: String,
    report: Option<WeatherReport>,
    error: Option<String>,
    generation: u64,
    pending: bool,
}

impl WeatherWidget {
    pub fn new(default_city: impl Into<String>) -> Self {
        Self {
            draft: String::new(),
            query: default_city.into(),
            report: None,
            error: None,
            generation: 0,
            pending: false,
        }
    }

    /// Issue the startup lookup for the default city.
    pub fn mount(&mut self) -> FetchTicket {
        self.next_ticket()
    }

    pub fn set_draft(&mut self, draft: impl Into<String>) {
        self.draft = draft.into();
    }

    /// Handle an explicit search action.
    ///
    /// A blank draft only sets the prompt; the query and any report on screen
    /// are left alone.
    ///
    /// Returns a ticket only when the query changed; resubmitting the city
    /// already in effect just clears the error.
    pub fn submit(&mut self) -> Option<FetchTicket> {
        if self.draft.trim().is_empty() {
            self.error = Some(LookupError::EmptyInput.user_message());
            return None;
        }

        self.error = None;
        if self.draft == self.query {
            return None;
        }

        self.query = self.draft.clone();
        Some(self.next_ticket())
    }

    /// Apply a lookup outcome. Returns `false` when the ticket was superseded
    /// and the outcome was dropped.
    pub fn apply(
        &mut self,
        ticket: &FetchTicket,
        outcome: Result<WeatherReport, LookupError>,
    ) -> bool {
        if ticket.generation != self.generation {
            return false;
        }

        self.pending = false;
        match outcome {
            Ok(report) => {
                self.report = Some(report);
                self.error = None;
            }
            Err(err) => {
                self.report = None;
                self.error = Some(err.user_message());
            }
        }
        true
    }

    pub fn phase(&self) -> Phase {
        if self.pending {
            Phase::Fetching
        } else if self.report.is_some() {
            Phase::Success
        } else if self.generation > 0 && self.error.is_some() {
            Phase::Failure
        } else {
            Phase::Idle
        }
    }

    pub fn draft(&self) -> &str {
        &self.draft
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn report(&self) -> Option<&WeatherReport> {
        self.report.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    fn next_ticket(&mut self) -> FetchTicket {
        self.generation += 1;
        self.pending = true;
        FetchTicket {
            generation: self.generation,
            city: self.query.clone(),
        }
    }
}
