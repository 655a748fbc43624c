//! Punctuation restoration provider contract
//!
//! Recognition output carries no punctuation; implementations of
//! [`PunctuationProvider`] restore it one segment at a time. A
//! passthrough implementation is provided for deployments without a
//! punctuation model.

pub mod error;
pub mod passthrough;
pub mod provider;

pub use error::PunctError;
pub use passthrough::PassthroughPunctuator;
pub use provider::{MockPunctuator, PunctuationProvider};
