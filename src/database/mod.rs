use crate::{models::UserRecord, utils::AppError};
use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::PathBuf;
use tokio::fs;
use tokio::sync::Mutex;

pub type RecordUpdate = Box<dyn FnOnce(&mut UserRecord) + Send>;

/// Persistence seam for user records.
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find_by_email(&self, email: &str) -> Result<Option<UserRecord>, AppError>;

    /// Exact match on both email and plaintext password.
    async fn find_by_credentials(&self, email: &str, password: &str) -> Result<Option<UserRecord>, AppError>;

    async fn find_by_id(&self, user_id: &str) -> Result<Option<UserRecord>, AppError>;

    /// Appends `record`, failing with `AppError::Conflict` when its email is taken.
    async fn insert(&self, record: UserRecord) -> Result<(), AppError>;

    /// Applies `update` to the record with `user_id` and persists the result.
    /// Returns `None` (and writes nothing) when no such record exists.
    async fn update(&self, user_id: &str, update: RecordUpdate) -> Result<Option<UserRecord>, AppError>;

    async fn count(&self) -> Result<usize, AppError>;
}

/// The whole user collection as one pretty-printed JSON array on disk.
///
/// Every call reads the full file; mutations rewrite it through a temporary
/// sibling and a rename. All access is serialized by `lock`, so concurrent
/// read-modify-write cycles cannot overwrite each other.
pub struct JsonFileStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    async fn load(&self) -> Result<Vec<UserRecord>, AppError> {
        match fs::read_to_string(&self.path).await {
            Ok(data) if data.trim().is_empty() => Ok(Vec::new()),
            Ok(data) => Ok(serde_json::from_str(&data)?),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                log::debug!("📂 {} not found, starting with no users", self.path.display());
                Ok(Vec::new())
            }
            Err(e) => Err(AppError::StorageError(format!(
                "Failed to read {}: {}",
                self.path.display(),
                e
            ))),
        }
    }

    async fn persist(&self, users: &[UserRecord]) -> Result<(), AppError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).await?;
            }
        }

        let json = serde_json::to_string_pretty(users)
            .map_err(|e| AppError::StorageError(format!("Failed to serialize users: {}", e)))?;

        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json).await?;
        fs::rename(&tmp, &self.path).await?;

        log::debug!("💾 Wrote {} users to {}", users.len(), self.path.display());
        Ok(())
    }
}

#[async_trait]
impl UserStore for JsonFileStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<UserRecord>, AppError> {
        let _guard = self.lock.lock().await;
        let users = self.load().await?;
        Ok(users.into_iter().find(|u| u.email == email))
    }

    async fn find_by_credentials(&self, email: &str, password: &str) -> Result<Option<UserRecord>, AppError> {
        let _guard = self.lock.lock().await;
        let users = self.load().await?;
        Ok(users.into_iter().find(|u| u.email == email && u.password == password))
    }

    async fn find_by_id(&self, user_id: &str) -> Result<Option<UserRecord>, AppError> {
        let _guard = self.lock.lock().await;
        let users = self.load().await?;
        Ok(users.into_iter().find(|u| u.user_id == user_id))
    }

    async fn insert(&self, record: UserRecord) -> Result<(), AppError> {
        let _guard = self.lock.lock().await;
        let mut users = self.load().await?;

        if users.iter().any(|u| u.email == record.email) {
            return Err(AppError::Conflict(record.email));
        }

        users.push(record);
        self.persist(&users).await
    }

    async fn update(&self, user_id: &str, update: RecordUpdate) -> Result<Option<UserRecord>, AppError> {
        let _guard = self.lock.lock().await;
        let mut users = self.load().await?;

        let Some(record) = users.iter_mut().find(|u| u.user_id == user_id) else {
            return Ok(None);
        };
        update(record);
        let updated = record.clone();

        self.persist(&users).await?;
        Ok(Some(updated))
    }

    async fn count(&self) -> Result<usize, AppError> {
        let _guard = self.lock.lock().await;
        Ok(self.load().await?.len())
    }
}
