use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

const SESSION_TOKEN: &str = "session_token";
const USER_ID: &str = "user_id";
const SESSION_EXPIRES: &str = "session_expires";

#[derive(Debug, Serialize, Deserialize, Default)]
struct CredentialsData {
    #[serde(flatten)]
    data: HashMap<String, String>,
}

/// An authenticated backend session
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub user_id: String,
    pub token: String,
}

pub struct CredentialStore {
    path: PathBuf,
    credentials: HashMap<String, String>,
}

impl CredentialStore {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            credentials: HashMap::new(),
        }
    }

    pub fn load(&mut self) -> Result<()> {
        if self.path.exists() {
            let content = std::fs::read_to_string(&self.path)?;
            let creds_data: CredentialsData = toml::from_str(&content)?;
            self.credentials = creds_data.data;
        }
        Ok(())
    }

    pub fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let creds_data = CredentialsData {
            data: self.credentials.clone(),
        };
        let content = toml::to_string_pretty(&creds_data)?;
        std::fs::write(&self.path, content)?;
        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<&String> {
        self.credentials.get(key)
    }

    pub fn set(&mut self, key: String, value: String) {
        self.credentials.insert(key, value);
    }

    pub fn remove(&mut self, key: &str) {
        self.credentials.remove(key);
    }

    pub fn set_session(&mut self, user_id: String, token: String, expires_at: Option<DateTime<Utc>>) {
        self.set(USER_ID.to_string(), user_id);
        self.set(SESSION_TOKEN.to_string(), token);
        match expires_at {
            Some(expires_at) => self.set(SESSION_EXPIRES.to_string(), expires_at.to_rfc3339()),
            None => self.remove(SESSION_EXPIRES),
        }
    }

    pub fn clear_session(&mut self) {
        self.remove(USER_ID);
        self.remove(SESSION_TOKEN);
        self.remove(SESSION_EXPIRES);
    }

    pub fn get_session_expires(&self) -> Option<DateTime<Utc>> {
        self.get(SESSION_EXPIRES)
            .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
            .map(|dt| dt.with_timezone(&Utc))
    }

    /// The stored session, if there is one and it has not expired.
    /// A session saved without an expiry never expires.
    pub fn session(&self) -> Option<Session> {
        self.session_at(Utc::now())
    }

    pub fn session_at(&self, now: DateTime<Utc>) -> Option<Session> {
        let user_id = self.get(USER_ID).filter(|s| !s.is_empty())?;
        let token = self.get(SESSION_TOKEN).filter(|s| !s.is_empty())?;
        if let Some(expires_at) = self.get_session_expires() {
            if expires_at <= now {
                return None;
            }
        }
        Some(Session {
            user_id: user_id.clone(),
            token: token.clone(),
        })
    }
}
