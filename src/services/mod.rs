pub mod errors;
pub mod expenses;
pub mod screens;
