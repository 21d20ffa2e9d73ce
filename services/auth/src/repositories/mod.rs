//! Repositories for database operations

pub mod user;
pub mod verification;

pub use user::UserRepository;
pub use verification::VerificationRepository;
