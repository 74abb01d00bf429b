//! Time entries API.

use crate::client::ZeitClient;
use crate::error::Result;
use crate::types::{NewTimeEntry, TimeEntry};

/// Time entries API client.
pub struct TimeEntriesApi {
    client: ZeitClient,
}

impl TimeEntriesApi {
    pub(crate) fn new(client: ZeitClient) -> Self {
        Self { client }
    }

    /// The most recent time entries of the current user.
    pub async fn recent(&self) -> Result<Vec<TimeEntry>> {
        self.client.get("time_entries/recent").await
    }

    /// Create a new time entry.
    pub async fn create(&self, entry: &NewTimeEntry) -> Result<TimeEntry> {
        self.client.post("time_entries", entry).await
    }

    /// Delete a time entry.
    pub async fn delete(&self, id: i64) -> Result<()> {
        self.client.delete(&format!("time_entries/{}", id)).await
    }
}
