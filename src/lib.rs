//! Expense tracking: submit-time form validation, the trailing-window
//! recent view, and a client for the remote JSON store behind them.

pub mod api;
pub mod domain;
pub mod infrastructure;
pub mod services;
pub mod telemetry;
