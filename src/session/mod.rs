//! Client session management
//!
//! This module provides the `Session` context that every controller
//! operation receives:
//! - The bearer token issued by the backend at login
//! - The currently selected meeting id
//! - Persistence through a pluggable `SessionStore`
//!
//! At most one token and one meeting id are held; every write replaces the
//! previous value and is persisted immediately.

mod session;
mod state;
mod store;

pub use session::Session;
pub use state::SessionState;
pub use store::{FileSessionStore, MemorySessionStore, SessionStore};
