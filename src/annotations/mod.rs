//! Stroke capture and annotation editing
//!
//! Turns `EditMsg` commands into annotation model updates.

pub mod handlers;

pub use handlers::handle_edit_msg;
