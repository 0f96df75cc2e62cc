pub mod token;

pub use token::{FirebaseClaims, SessionClaims};
