//! Role authorization for gated routes.
//!
//! Runs only after the credential verifier has produced an [`Identity`].
//! Every call re-reads the user record; nothing is cached between requests.

use std::sync::Arc;
use std::time::Duration;

use stayvista_models::Role;

use crate::claims::Identity;
use crate::directory::UserDirectory;
use crate::error::AuthError;

#[derive(Debug, Clone)]
pub struct RoleAuthorizer {
    directory: Arc<dyn UserDirectory>,
    lookup_timeout: Duration,
}

impl RoleAuthorizer {
    pub fn new(directory: Arc<dyn UserDirectory>, lookup_timeout: Duration) -> Self {
        Self {
            directory,
            lookup_timeout,
        }
    }

    /// Admits `identity` only if its stored record holds exactly `required`.
    ///
    /// # Errors
    ///
    /// - [`AuthError::Unauthorized`] when no record exists or its role differs
    /// - [`AuthError::UpstreamFailure`] when the lookup fails or exceeds the timeout
    pub async fn authorize(&self, identity: &Identity, required: Role) -> Result<(), AuthError> {
        let lookup = self.directory.find_by_email(&identity.email);

        let record = match tokio::time::timeout(self.lookup_timeout, lookup).await {
            Ok(Ok(record)) => record,
            Ok(Err(e)) => {
                tracing::error!(error = %e, "User directory lookup failed");
                return Err(AuthError::UpstreamFailure(e.to_string()));
            }
            Err(_) => {
                tracing::error!(
                    timeout_ms = %self.lookup_timeout.as_millis(),
                    "User directory lookup timed out"
                );
                return Err(AuthError::UpstreamFailure(
                    "role lookup timed out".to_string(),
                ));
            }
        };

        match record {
            Some(record) if record.role == Some(required) => Ok(()),
            _ => Err(AuthError::Unauthorized),
        }
    }
}
