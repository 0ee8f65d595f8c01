// Library crate: the editing engine, exposed for the binary, integration tests
// and the JSON command interface.

pub mod catalog;
pub mod clock;
pub mod command;
pub mod error;
pub mod fixtures;
pub mod geometry;
pub mod harness;
pub mod history;
pub mod state;
pub mod stats;
pub mod templates;
pub mod validation;
