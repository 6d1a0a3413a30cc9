//! Selected-user session
//!
//! The only client-side state: which user profile the views act on. It is
//! stored as a JSON object under [`CURRENT_USER_KEY`] in a small state file,
//! read once at startup and rewritten whenever the selection changes.

use std::fs;
use std::io::ErrorKind as IoErrorKind;
use std::path::{Path, PathBuf};

use healthstride_shared::EntityId;
use serde_json::{Map, Value};
use thiserror::Error;
use tracing::{debug, info};

/// Key under which the selected user id is persisted
pub const CURRENT_USER_KEY: &str = "currentUserId";

#[derive(Error, Debug)]
pub enum SessionError {
    #[error("No user selected. Select a profile with `healthstride users select <id>` first")]
    NoUserSelected,

    #[error("Failed to access session file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Session file {} is not valid JSON: {source}", path.display())]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

pub type SessionResult<T> = Result<T, SessionError>;

/// The current user selection, optionally backed by a state file
#[derive(Debug, Clone, Default)]
pub struct Session {
    path: Option<PathBuf>,
    current_user_id: Option<EntityId>,
}

impl Session {
    /// A session that is never persisted
    pub fn in_memory() -> Self {
        Self::default()
    }

    /// Read the selection from `path`; a missing file means no user selected
    pub fn load(path: impl Into<PathBuf>) -> SessionResult<Self> {
        let path = path.into();
        let state = read_state(&path)?;
        let current_user_id = state.get(CURRENT_USER_KEY).and_then(parse_id);
        debug!(path = %path.display(), user_id = ?current_user_id, "Session loaded");

        Ok(Self {
            path: Some(path),
            current_user_id,
        })
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    #[inline]
    pub fn current_user_id(&self) -> Option<EntityId> {
        self.current_user_id
    }

    /// The selected user, or [`SessionError::NoUserSelected`]
    pub fn require_user(&self) -> SessionResult<EntityId> {
        self.current_user_id.ok_or(SessionError::NoUserSelected)
    }

    /// Make `user_id` the current user and persist it
    pub fn select(&mut self, user_id: EntityId) -> SessionResult<()> {
        self.current_user_id = Some(user_id);
        self.persist()?;
        info!(user_id, "User selected");
        Ok(())
    }

    /// Forget the current user and drop the persisted key
    pub fn clear(&mut self) -> SessionResult<()> {
        self.current_user_id = None;
        self.persist()?;
        info!("User selection cleared");
        Ok(())
    }

    /// End the session; same effect as [`Session::clear`]
    pub fn logout(&mut self) -> SessionResult<()> {
        self.clear()
    }

    /// Rewrite the state file, keeping any keys other than ours
    fn persist(&self) -> SessionResult<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };

        let mut state = read_state(path)?;
        match self.current_user_id {
            Some(id) => {
                state.insert(CURRENT_USER_KEY.to_string(), Value::from(id));
            }
            None => {
                state.remove(CURRENT_USER_KEY);
            }
        }

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| SessionError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let contents = serde_json::to_string_pretty(&Value::Object(state)).map_err(|source| {
            SessionError::Corrupt {
                path: path.clone(),
                source,
            }
        })?;
        fs::write(path, contents).map_err(|source| SessionError::Io {
            path: path.clone(),
            source,
        })
    }
}

fn read_state(path: &Path) -> SessionResult<Map<String, Value>> {
    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(err) if err.kind() == IoErrorKind::NotFound => return Ok(Map::new()),
        Err(source) => {
            return Err(SessionError::Io {
                path: path.to_path_buf(),
                source,
            })
        }
    };

    if contents.trim().is_empty() {
        return Ok(Map::new());
    }

    match serde_json::from_str::<Value>(&contents) {
        Ok(Value::Object(map)) => Ok(map),
        // a scalar or array holds nothing we can keep
        Ok(_) => Ok(Map::new()),
        Err(source) => Err(SessionError::Corrupt {
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// Ids were historically stored as strings as well as numbers
fn parse_id(value: &Value) -> Option<EntityId> {
    match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}
