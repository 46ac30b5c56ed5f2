//! Forno core types and utilities

pub mod error;
pub mod store;
pub mod token;
pub mod types;

pub use error::{CoreError, CoreResult};
pub use store::{FileTokenStore, MemoryTokenStore, TokenStore};
pub use token::{decode_claims, expires_at, AccessClaims};
