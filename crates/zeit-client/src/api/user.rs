//! Current-user API.

use crate::client::ZeitClient;
use crate::error::Result;
use crate::types::User;

/// Current-user API client.
pub struct UserApi {
    client: ZeitClient,
}

impl UserApi {
    pub(crate) fn new(client: ZeitClient) -> Self {
        Self { client }
    }

    /// The authenticated user.
    pub async fn me(&self) -> Result<User> {
        self.client.get("user/me").await
    }
}
