//! V1 API handlers.

mod agenda;
mod todos;

#[cfg(test)]
mod agenda_test;

pub use agenda::*;
pub use todos::*;
