//! HTTP client SDK for the BBQ GmbH Zeiterfassung backend.
//!
//! This crate provides a typed client whose every request runs through the
//! authenticated pipeline: session token lookup, header merge, status
//! classification, a single refresh-and-reissue on 401/403, and notifier
//! reporting.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use zeit_auth::FileSessionStore;
//! use zeit_client::ZeitClient;
//!
//! # async fn example() -> zeit_client::Result<()> {
//! let client = ZeitClient::builder()
//!     .base_url("http://localhost:8000")
//!     .session_store(Arc::new(FileSessionStore::new("/tmp/zeit".as_ref())))
//!     .build()?;
//!
//! // Who is logged in?
//! let user = client.user().me().await?;
//! println!("Willkommen, {}!", user.display_name());
//!
//! // Recent work, upcoming absences
//! let entries = client.time_entries().recent().await?;
//! let absences = client.absences().upcoming().await?;
//! println!("{} Einträge, {} Abwesenheiten", entries.len(), absences.len());
//! # Ok(())
//! # }
//! ```
//!
//! # API Coverage
//!
//! - **User**: the authenticated user (`/api/user/me`)
//! - **Time entries**: recent list, create, delete
//! - **Absences**: upcoming list
//! - **Diagnostics**: probe `/api/v1/*` endpoints and report status/timing
//!
//! When a request fails, [`fallback_for`] supplies a canned substitute
//! dataset so consumers can still render.

pub mod api;
pub mod client;
pub mod error;
pub mod fallback;
pub mod request;
pub mod types;

pub use client::{ClientBuilder, ZeitClient};
pub use error::{ApiError, Result};
pub use fallback::fallback_for;
pub use request::RequestDescriptor;
pub use types::*;
