//! Editing session module
//!
//! This module contains:
//! - Command messages applied to a session
//! - The session object and its lifecycle

pub mod messages;
pub mod state;

pub use messages::{EditMsg, SessionMsg};
pub use state::{EditSession, Editor};
