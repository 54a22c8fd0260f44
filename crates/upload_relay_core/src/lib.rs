//! Upload relay domain primitives.
//!
//! This crate owns envelope decoding, upload event extraction and chat
//! message construction. It intentionally excludes HTTP clients and Lambda
//! runtime concerns.

pub mod chat_message;
pub mod console_url;
pub mod contract;
pub mod error;
pub mod event_time;
