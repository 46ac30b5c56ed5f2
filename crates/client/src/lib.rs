//! Forno HTTP client
//!
//! Typed client for the Forno ordering API plus the session machinery
//! that keeps its access token fresh: a proactive refresh scheduler, a
//! single-flight refresh coalescer and a request dispatcher that
//! recovers from one 401 per call by refreshing and retrying once.

pub mod client;
pub mod session;
pub mod types;

pub use client::error::{ApiFailure, ClientError};
pub use client::{FornoClient, FornoClientBuilder};
pub use session::SessionManager;
