pub mod completions;
pub mod error;
pub mod habits;
