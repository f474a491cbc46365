//! Core domain logic for the companion chat client.
//!
//! This crate is transport-agnostic: everything here operates against the
//! [`chat::ChatTransport`] trait, which `companion-client` implements over
//! HTTP.

pub mod chat;
pub mod config;
pub mod error;
pub mod health;

pub use error::{BACKEND_UNREACHABLE_MSG, CompanionError, Result};
