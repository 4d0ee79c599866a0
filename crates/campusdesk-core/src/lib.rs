//! Domain layer of CampusDesk.
//!
//! Holds the issue lifecycle, the role/session rules, chat transcripts, the
//! read-only campus catalog and the traits the outer crates implement
//! (persistence and the AI gateway). Nothing here performs I/O.

pub mod catalog;
pub mod chat;
pub mod config;
pub mod error;
pub mod gateway;
pub mod issue;
pub mod session;
pub mod store;

pub use error::{CampusError, Result};
