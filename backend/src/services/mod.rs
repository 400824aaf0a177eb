//! Business logic services
//!
//! Services encapsulate business logic and coordinate between
//! stores and the authentication primitives.

pub mod credentials;
pub mod user;
pub mod video;

pub use credentials::CredentialManager;
pub use user::UserService;
pub use video::VideoService;
