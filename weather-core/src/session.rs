//! Single-threaded event loop that owns a [`WeatherWidget`].
//!
//! Input events and lookup outcomes arrive on one channel and are applied in
//! order. Each lookup runs as its own task, so a slow request never blocks
//! typing; superseded outcomes are discarded by the widget's ticket check.

use std::sync::Arc;

use tokio::sync::mpsc;

use crate::{
    error::LookupError,
    model::WeatherReport,
    provider::WeatherProvider,
    render::{self, View},
    widget::{FetchTicket, WeatherWidget},
};

#[derive(Debug)]
pub enum Msg {
    /// The draft text changed.
    Input(String),
    /// Search was requested (Enter or the search icon).
    Submit,
    Fetched {
        ticket: FetchTicket,
        outcome: Result<WeatherReport, LookupError>,
    },
    Quit,
}

/// What processing one message did to the widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Changed,
    Unchanged,
    Quit,
}

pub struct Session {
    provider: Arc<dyn WeatherProvider>,
    widget: WeatherWidget,
    tx: mpsc::UnboundedSender<Msg>,
    rx: mpsc::UnboundedReceiver<Msg>,
    in_flight: usize,
}

impl Session {
    pub fn new(provider: Arc<dyn WeatherProvider>, widget: WeatherWidget) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            provider,
            widget,
            tx,
            rx,
            in_flight: 0,
        }
    }

    /// Handle for feeding input events from another task.
    pub fn sender(&self) -> mpsc::UnboundedSender<Msg> {
        self.tx.clone()
    }

    pub fn widget(&self) -> &WeatherWidget {
        &self.widget
    }

    pub fn view(&self) -> View {
        render::view(&self.widget)
    }

    /// Lookups spawned whose outcome has not come back yet.
    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    /// Mount the widget: kicks off the lookup for the default city.
    pub fn start(&mut self) {
        let ticket = self.widget.mount();
        self.spawn_lookup(ticket);
    }

    /// Wait for the next message and apply it.
    pub async fn step(&mut self) -> Step {
        let Some(msg) = self.rx.recv().await else {
            return Step::Quit;
        };
        self.handle(msg)
    }

    fn handle(&mut self, msg: Msg) -> Step {
        match msg {
            Msg::Input(draft) => {
                self.widget.set_draft(draft);
                Step::Changed
            }
            Msg::Submit => {
                if let Some(ticket) = self.widget.submit() {
                    self.spawn_lookup(ticket);
                }
                Step::Changed
            }
            Msg::Fetched { ticket, outcome } => {
                self.in_flight = self.in_flight.saturating_sub(1);
                if let Err(err) = &outcome {
                    tracing::info!(city = %ticket.city, error = %err, "lookup failed");
                }
                if self.widget.apply(&ticket, outcome) {
                    Step::Changed
                } else {
                    tracing::debug!(
                        city = %ticket.city,
                        generation = ticket.generation,
                        current = self.widget.generation(),
                        "dropping superseded lookup"
                    );
                    Step::Unchanged
                }
            }
            Msg::Quit => Step::Quit,
        }
    }

    /// Mount, then process messages until [`Msg::Quit`], calling `render`
    /// with a fresh view after every change.
    pub async fn run<F>(mut self, mut render: F) -> WeatherWidget
    where
        F: FnMut(&View),
    {
        render(&self.view());
        self.start();

        loop {
            match self.step().await {
                Step::Changed => render(&self.view()),
                Step::Unchanged => {}
                Step::Quit => break,
            }
        }

        self.widget
    }

    fn spawn_lookup(&mut self, ticket: FetchTicket) {
        tracing::debug!(city = %ticket.city, generation = ticket.generation, "spawning lookup");

        let provider = Arc::clone(&self.provider);
        let tx = self.tx.clone();
        self.in_flight += 1;

        tokio::spawn(async move {
            let outcome = provider.current(&ticket.city).await;
            // The receiver is gone once the session has quit.
            let _ = tx.send(Msg::Fetched { ticket, outcome });
        });
    }
}
