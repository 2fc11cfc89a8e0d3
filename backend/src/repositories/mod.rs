//! Database repositories
//!
//! Provides data access layer for database operations.

pub mod session;
pub mod user;

pub use session::{CreateSession, SessionRecord, SessionRepository, UpdateSession};
pub use user::{UserRecord, UserRepository};
