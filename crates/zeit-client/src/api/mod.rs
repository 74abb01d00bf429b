//! API endpoint implementations.

mod absences;
mod diagnostics;
mod time_entries;
mod user;

pub use absences::AbsencesApi;
pub use diagnostics::{DiagnosticsApi, DEFAULT_ENDPOINTS};
pub use time_entries::TimeEntriesApi;
pub use user::UserApi;
