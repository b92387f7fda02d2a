//! Local identity cache.
//!
//! Persists the signed-in user's profile fields and the onboarding-seen
//! flag in `<data_dir>/identity.json`, and exposes both as watch channels
//! so session components can observe changes. Writes go through a temp
//! file + rename so a crash mid-write cannot leave a torn record.
//!
//! A record missing any of the five user fields reads as "no user"; a
//! partial write is indistinguishable from being logged out.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use serde::{Deserialize, Serialize};
use tokio::sync::watch;

use crate::error::StoreError;
use crate::types::User;

/// On-disk record. Key names are the stable storage contract
/// (`user_id`, `user_name`, `user_email`, `user_whatsapp`, `user_date`,
/// `has_seen_onboarding`).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct IdentityRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    user_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    user_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    user_email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    user_whatsapp: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    user_date: Option<String>,
    #[serde(default)]
    has_seen_onboarding: bool,
}

impl IdentityRecord {
    /// All five user fields present, or nothing.
    fn user(&self) -> Option<User> {
        Some(User {
            id: self.user_id?,
            name: self.user_name.clone()?,
            email: self.user_email.clone()?,
            whatsapp: self.user_whatsapp.clone()?,
            date: self.user_date.clone()?,
        })
    }
}

/// Durable-across-restart store for the current identity.
pub struct IdentityStore {
    path: PathBuf,
    record: Mutex<IdentityRecord>,
    user_tx: watch::Sender<Option<User>>,
    onboarding_tx: watch::Sender<bool>,
}

impl IdentityStore {
    /// Open (or initialize) the store under `data_dir`.
    ///
    /// An unreadable or malformed file is treated as empty; the cache is
    /// disposable state and must never block startup.
    pub fn open(data_dir: &Path) -> Result<Self, StoreError> {
        fs::create_dir_all(data_dir)
            .map_err(|_| StoreError::CreateDir(data_dir.to_path_buf()))?;

        let path = data_dir.join("identity.json");
        let record = match fs::read_to_string(&path) {
            Ok(content) => match serde_json::from_str::<IdentityRecord>(&content) {
                Ok(record) => record,
                Err(e) => {
                    log::warn!("Identity cache at {} is malformed: {}", path.display(), e);
                    IdentityRecord::default()
                }
            },
            Err(_) => IdentityRecord::default(),
        };

        let (user_tx, _) = watch::channel(record.user());
        let (onboarding_tx, _) = watch::channel(record.has_seen_onboarding);

        Ok(Self {
            path,
            record: Mutex::new(record),
            user_tx,
            onboarding_tx,
        })
    }

    /// Write all five identity fields in one atomic update.
    pub fn save_user(&self, user: &User) -> Result<(), StoreError> {
        self.edit(|record| {
            record.user_id = Some(user.id);
            record.user_name = Some(user.name.clone());
            record.user_email = Some(user.email.clone());
            record.user_whatsapp = Some(user.whatsapp.clone());
            record.user_date = Some(user.date.clone());
        })
    }

    /// Remove the identity fields. The onboarding flag survives; a user
    /// who logs out should not be shown onboarding again.
    pub fn clear_data(&self) -> Result<(), StoreError> {
        self.edit(|record| {
            record.user_id = None;
            record.user_name = None;
            record.user_email = None;
            record.user_whatsapp = None;
            record.user_date = None;
        })
    }

    /// Record whether the onboarding flow has been seen.
    pub fn set_has_seen_onboarding(&self, has_seen: bool) -> Result<(), StoreError> {
        self.edit(|record| record.has_seen_onboarding = has_seen)
    }

    /// Snapshot of the cached user, if a complete one exists.
    pub fn current_user(&self) -> Option<User> {
        self.user_tx.borrow().clone()
    }

    /// Continuously-updating view of the cached user.
    pub fn user(&self) -> watch::Receiver<Option<User>> {
        self.user_tx.subscribe()
    }

    /// Continuously-updating view of the onboarding flag.
    pub fn has_seen_onboarding(&self) -> watch::Receiver<bool> {
        self.onboarding_tx.subscribe()
    }

    /// Apply a mutation, persist it, and notify observers.
    fn edit(&self, mutator: impl FnOnce(&mut IdentityRecord)) -> Result<(), StoreError> {
        let snapshot = {
            let mut guard = self.record.lock().unwrap_or_else(|e| e.into_inner());
            mutator(&mut guard);
            guard.clone()
        };

        self.persist(&snapshot)?;

        self.user_tx.send_replace(snapshot.user());
        self.onboarding_tx.send_replace(snapshot.has_seen_onboarding);
        Ok(())
    }

    /// Temp file + rename so readers never observe a torn write.
    fn persist(&self, record: &IdentityRecord) -> Result<(), StoreError> {
        let content = serde_json::to_string_pretty(record)?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, content)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}
