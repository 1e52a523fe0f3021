//! Customer and builder lookups.

use fa_core::error::{FaError, FaResult};
use fa_models::UserProfile;

use crate::client::ApiClient;
use crate::response::MaybeWrapped;

impl ApiClient {
    /// Fetch a customer by identifier.
    ///
    /// A 404 becomes `FaError::NotFound` so views can show their placeholder.
    pub async fn get_customer(&self, id: &str) -> FaResult<UserProfile> {
        self.get_profile("customers", id).await
    }

    /// Fetch a builder by identifier.
    pub async fn get_builder(&self, id: &str) -> FaResult<UserProfile> {
        self.get_profile("builders", id).await
    }

    async fn get_profile(&self, collection: &str, id: &str) -> FaResult<UserProfile> {
        match self.get_json::<MaybeWrapped<UserProfile>>(&[collection, id], &[]).await {
            Ok(resp) => Ok(resp.into_inner()),
            Err(FaError::Api { status: 404, .. }) => {
                Err(FaError::NotFound(format!("{collection}/{id}")))
            }
            Err(e) => Err(e),
        }
    }
}
