//! Lookup of stored user records by email.
//!
//! The role authorizer reads roles through [`UserDirectory`] instead of a
//! database handle, so the persistence layer owns the query and tests can
//! substitute an in-memory directory.

use async_trait::async_trait;
use stayvista_models::UserRecord;

#[async_trait]
pub trait UserDirectory: Send + Sync + std::fmt::Debug {
    /// Returns the record for `email`, `Ok(None)` if there is none, or an
    /// error when the backing store cannot be read.
    async fn find_by_email(&self, email: &str) -> anyhow::Result<Option<UserRecord>>;
}

#[cfg(any(test, feature = "test-utils"))]
pub use memory::MemoryUserDirectory;

#[cfg(any(test, feature = "test-utils"))]
mod memory {
    use std::collections::HashMap;
    use std::sync::RwLock;

    use async_trait::async_trait;
    use stayvista_models::{Role, UserRecord};

    use super::UserDirectory;

    /// Directory backed by a map, for tests.
    #[derive(Debug, Default)]
    pub struct MemoryUserDirectory {
        records: RwLock<HashMap<String, UserRecord>>,
    }

    impl MemoryUserDirectory {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with_user(self, email: &str, role: Option<Role>) -> Self {
            self.insert(UserRecord::new(email, role));
            self
        }

        pub fn insert(&self, record: UserRecord) {
            if let Ok(mut records) = self.records.write() {
                records.insert(record.email.clone(), record);
            }
        }
    }

    #[async_trait]
    impl UserDirectory for MemoryUserDirectory {
        async fn find_by_email(&self, email: &str) -> anyhow::Result<Option<UserRecord>> {
            let records = self
                .records
                .read()
                .map_err(|_| anyhow::anyhow!("user directory lock poisoned"))?;
            Ok(records.get(email).cloned())
        }
    }
}
