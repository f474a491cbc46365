//! HTTP infrastructure for the companion client.
//!
//! Implements `companion-core`'s [`companion_core::chat::ChatTransport`] over
//! HTTP/JSON, plus the journal and memory API surfaces.

mod chat;
pub mod config;
mod http;
mod journal;
mod memory;

pub use chat::HttpChatClient;
pub use config::ClientConfig;
pub use journal::{AiJournal, JournalClient, UserJournal};
pub use memory::{Memory, MemoryClient, MemoryRetrieval};
