use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Login state of a session identity.
///
/// `Unknown` is the startup state before the first auth check resolves;
/// callers should treat it as pending rather than logged out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    #[default]
    Unknown,
    Authenticated,
    Anonymous,
}

/// The authenticated user's identity, consulted before every alarm
/// operation. Always a value, never absent; an empty identity carries the
/// `Unknown` status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionIdentity {
    pub id: Option<Uuid>,
    pub username: String,
    pub status: SessionStatus,
}

impl SessionIdentity {
    pub fn unknown() -> Self {
        Self {
            id: None,
            username: String::new(),
            status: SessionStatus::Unknown,
        }
    }

    pub fn authenticated(id: Uuid, username: impl Into<String>) -> Self {
        Self {
            id: Some(id),
            username: username.into(),
            status: SessionStatus::Authenticated,
        }
    }

    /// Transition on successful login or account creation.
    pub fn log_in(&mut self, id: Uuid, username: impl Into<String>) {
        self.id = Some(id);
        self.username = username.into();
        self.status = SessionStatus::Authenticated;
    }

    /// Transition on explicit logout. Clears the identity fields.
    pub fn log_out(&mut self) {
        self.id = None;
        self.username.clear();
        self.status = SessionStatus::Anonymous;
    }

    pub fn is_authenticated(&self) -> bool {
        self.status == SessionStatus::Authenticated
    }

    /// The owning user id, present only while authenticated.
    pub fn user_id(&self) -> Option<Uuid> {
        match self.status {
            SessionStatus::Authenticated => self.id,
            _ => None,
        }
    }
}

impl Default for SessionIdentity {
    fn default() -> Self {
        Self::unknown()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: Uuid,
    pub user_id: Uuid,
    pub username: String,
    pub last_login: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogoutResponse {
    pub logged_out: bool,
}
