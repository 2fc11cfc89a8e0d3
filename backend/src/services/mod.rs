//! Business logic services
//!
//! Services encapsulate business logic and coordinate between
//! repositories and external systems.

pub mod photo;
pub mod session;
pub mod user;

pub use photo::{PhotoCleanup, PhotoStore, StoredPhoto, MAX_PHOTO_BYTES};
pub use session::SessionService;
pub use user::UserService;
