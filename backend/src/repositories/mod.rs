//! Data access layer
//!
//! Store traits plus their PostgreSQL and in-memory implementations.

pub mod memory;
pub mod postgres;
pub mod store;
pub mod user;
pub mod video;

pub use memory::InMemoryStore;
pub use postgres::PgStore;
pub use store::{NewUser, NewVideo, StoreError, UserChanges, UserStore, VideoStore};
pub use user::UserRecord;
pub use video::VideoRecord;
