//! Chat domain module.
//!
//! - `model`: server-owned wire records (`Turn`, `ChatReply`, `ConversationSummary`)
//! - `timeline`: projection of turns into renderable display entries
//! - `transport`: the seam to the remote conversation service
//! - `session`: the per-mount chat state machine (`ChatSession`)
//! - `registry`: the cached conversation list (`ConversationRegistry`)

mod model;
mod registry;
mod session;
mod timeline;
mod transport;

pub use model::{ChatReply, ConversationSummary, Turn};
pub use registry::ConversationRegistry;
pub use session::{ChatSession, SessionSnapshot};
pub use timeline::{DisplayEntry, EntryRole, project_history, project_turn};
pub use transport::ChatTransport;
