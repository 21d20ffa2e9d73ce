//! Authentication service models

pub mod user;
pub mod verification;

// Re-export for convenience
pub use user::{LoginCredentials, NewUser, User};
pub use verification::EmailVerificationToken;
