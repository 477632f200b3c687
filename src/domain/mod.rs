pub mod book;
pub mod form;
pub mod models;
pub mod recency;
pub mod summary;
