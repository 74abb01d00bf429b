//! Session token handling for the Zeiterfassung client.
//!
//! At most one bearer token is active per installation. The token is created
//! at login, read by every outgoing request, and deleted on logout or when
//! the server signals that the session is no longer valid. Both halves of
//! that lifecycle sit behind traits so the request pipeline can be tested
//! with doubles:
//!
//! - [`SessionStore`] — read/save/clear of the stored token
//!   ([`FileSessionStore`] for production, [`InMemorySessionStore`] for
//!   tests).
//! - [`TokenRefresher`] — exchanges an expired token for a fresh one
//!   ([`HttpTokenRefresher`] against the backend, [`StaticTokenRefresher`]
//!   for tests).

pub mod error;
pub mod refresh;
pub mod session;

pub use error::{AuthError, Result};
pub use refresh::{HttpTokenRefresher, StaticTokenRefresher, TokenRefresher};
pub use session::{mask_token, FileSessionStore, InMemorySessionStore, SessionStore, TOKEN_FILE};
