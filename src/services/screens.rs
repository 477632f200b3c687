//! List screens and their loading lifecycle.
//!
//! A recent-expenses screen fetches once when mounted, then renders from
//! the shared expense book. A result that arrives after the screen was
//! dismissed is dropped without touching the book.

use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

use chrono::NaiveDate;
use parking_lot::Mutex;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::{
    domain::{recency::filter_recent, summary::ExpensesOutput},
    infrastructure::state::AppState,
    services::errors::{ServiceError, FETCH_FAILED},
};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ScreenState {
    Loading,
    Error { message: String },
    Content(ExpensesOutput),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Loading,
    Failed(&'static str),
    Ready,
}

/// Lets the owner of a screen mark it gone while a fetch is in flight.
#[derive(Debug, Clone, Default)]
pub struct ScreenHandle {
    dismissed: Arc<AtomicBool>,
}

impl ScreenHandle {
    pub fn dismiss(&self) {
        self.dismissed.store(true, Ordering::SeqCst);
    }

    pub fn is_dismissed(&self) -> bool {
        self.dismissed.load(Ordering::SeqCst)
    }
}

struct InFlight<'a>(&'a AtomicBool);

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

pub struct RecentExpensesScreen {
    state: Arc<AppState>,
    phase: Mutex<Phase>,
    fetching: AtomicBool,
    handle: ScreenHandle,
}

impl RecentExpensesScreen {
    pub fn new(state: Arc<AppState>) -> Self {
        Self {
            state,
            phase: Mutex::new(Phase::Loading),
            fetching: AtomicBool::new(false),
            handle: ScreenHandle::default(),
        }
    }

    pub fn handle(&self) -> ScreenHandle {
        self.handle.clone()
    }

    pub fn is_fetching(&self) -> bool {
        self.fetching.load(Ordering::SeqCst)
    }

    /// Fetches the expense list once and replaces the book with it.
    pub async fn mount(&self, today: NaiveDate) -> Result<ScreenState, ServiceError> {
        if self.handle.is_dismissed() {
            return Err(ServiceError::Dismissed);
        }
        if self.fetching.swap(true, Ordering::SeqCst) {
            return Err(ServiceError::Busy);
        }
        let in_flight = InFlight(&self.fetching);
        *self.phase.lock() = Phase::Loading;

        let result = self.state.store.fetch_expenses().await;
        drop(in_flight);

        if self.handle.is_dismissed() {
            debug!("discarding expenses fetched for a dismissed screen");
            return Err(ServiceError::Dismissed);
        }

        let phase = match result {
            Ok(expenses) => {
                let mut book = self.state.book.write();
                // A dismiss may land while the lock is contended.
                if self.handle.is_dismissed() {
                    debug!("discarding expenses fetched for a dismissed screen");
                    return Err(ServiceError::Dismissed);
                }
                info!(count = expenses.len(), "fetched expenses");
                book.set_expenses(expenses);
                Phase::Ready
            }
            Err(err) => {
                warn!(error = %err, "failed to fetch expenses");
                Phase::Failed(FETCH_FAILED)
            }
        };
        *self.phase.lock() = phase;

        Ok(self.render(today))
    }

    pub fn render(&self, today: NaiveDate) -> ScreenState {
        match *self.phase.lock() {
            Phase::Loading => ScreenState::Loading,
            Phase::Failed(message) => ScreenState::Error {
                message: message.to_string(),
            },
            Phase::Ready => {
                let window_days = self.state.window_days();
                let recent = filter_recent(today, window_days, self.state.book.read().expenses());
                ScreenState::Content(ExpensesOutput::recent(window_days, recent))
            }
        }
    }
}

/// Shows whatever the book currently holds; it never fetches.
pub struct AllExpensesScreen {
    state: Arc<AppState>,
}

impl AllExpensesScreen {
    pub fn new(state: Arc<AppState>) -> Self {
        Self { state }
    }

    pub fn render(&self) -> ScreenState {
        let expenses = self.state.book.read().expenses().to_vec();
        ScreenState::Content(ExpensesOutput::all(expenses))
    }
}
