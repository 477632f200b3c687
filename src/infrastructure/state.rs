use std::sync::Arc;

use parking_lot::RwLock;

use crate::{
    domain::book::ExpenseBook,
    infrastructure::{config::Config, store::RemoteStore},
};

/// Shared by every screen and handler. The book lock is never held across
/// an `.await`.
pub struct AppState {
    pub config: Arc<Config>,
    pub store: Arc<dyn RemoteStore>,
    pub book: RwLock<ExpenseBook>,
}

impl AppState {
    pub fn new(config: Arc<Config>, store: Arc<dyn RemoteStore>) -> Self {
        Self {
            config,
            store,
            book: RwLock::new(ExpenseBook::new()),
        }
    }

    pub fn window_days(&self) -> u32 {
        self.config.recent.window_days
    }
}
