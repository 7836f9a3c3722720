//! Credential primitives library
//!
//! Provides the storage-free building blocks of the session service:
//! - One-way digests for credential secrets (SHA-256, hex encoded)
//! - Constant-time digest comparison
//! - Opaque bearer token generation
//! - Authentication coordination
//!
//! # Examples
//!
//! ## Digests
//! ```
//! use auth::Sha256Hasher;
//!
//! let hasher = Sha256Hasher::new();
//! assert_eq!(hasher.digest_hex(b"dev"), hasher.digest_hex(b"dev"));
//! assert_eq!(hasher.digest_hex(b"dev").len(), 64);
//! ```
//!
//! ## Complete Credential Flow
//! ```
//! use auth::Authenticator;
//!
//! let auth = Authenticator::new();
//!
//! // Register: digest email and password
//! let digests = auth.credential_digests("root", "dev");
//!
//! // Login: verify password against stored digest
//! assert!(auth.verify_password("dev", &digests.password_hash));
//!
//! // Issue: mint an opaque token
//! let token = auth.mint_token();
//! assert_eq!(token.len(), 64);
//! ```

pub mod authenticator;
pub mod digest;
pub mod token;

// Re-export commonly used items
pub use authenticator::Authenticator;
pub use authenticator::CredentialDigests;
pub use digest::constant_time_eq;
pub use digest::Sha256Hasher;
pub use token::TokenGenerator;
