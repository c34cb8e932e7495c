//! Shared utilities for stocksage
//!
//! Logging setup and loading of the plaintext API credential.

pub mod credentials;
pub mod logging;

pub use credentials::{CredentialError, read_credential_file};
pub use logging::{init_tracing, init_tracing_with_default};
