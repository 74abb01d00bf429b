//! Absences API.

use crate::client::ZeitClient;
use crate::error::Result;
use crate::types::Absence;

/// Absences API client.
pub struct AbsencesApi {
    client: ZeitClient,
}

impl AbsencesApi {
    pub(crate) fn new(client: ZeitClient) -> Self {
        Self { client }
    }

    /// Upcoming absences of the current user.
    pub async fn upcoming(&self) -> Result<Vec<Absence>> {
        self.client.get("absences/upcoming").await
    }
}
