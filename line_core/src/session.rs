//! # Session Container
//!
//! One configuration session: the shared form state plus the load-unit
//! list, with identity and timestamps. Sessions serialize to human-readable
//! JSON; there is no persistence layer beyond that - a session lives for
//! one form interaction and is discarded when it ends.
//!
//! ## Structure
//!
//! ```text
//! Session
//! ├── meta: SessionMetadata (version, id, timestamps)
//! ├── form: FormState (the user's answers)
//! └── gruas: Vec<LoadGroup> (one entry per load unit)
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::form::{FormState, LoadGroup};

/// Current schema version for serialized sessions
pub const SCHEMA_VERSION: &str = "0.1.0";

/// Root container for one configuration session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    /// Session metadata (version, id, timestamps)
    pub meta: SessionMetadata,

    /// The shared form state, mutated exclusively by user edits
    pub form: FormState,

    /// Load units ("gruas"), in declaration order
    pub gruas: Vec<LoadGroup>,
}

/// Session identity and bookkeeping
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionMetadata {
    /// Schema version of the serialized form
    pub version: String,

    /// Unique session id
    pub id: Uuid,

    /// When the session started
    pub created: DateTime<Utc>,

    /// Last mutation timestamp
    pub modified: DateTime<Utc>,
}

impl Session {
    /// Start a new empty session with one empty load unit
    pub fn new() -> Self {
        let now = Utc::now();
        Session {
            meta: SessionMetadata {
                version: SCHEMA_VERSION.to_string(),
                id: Uuid::new_v4(),
                created: now,
                modified: now,
            },
            form: FormState::new(),
            gruas: vec![LoadGroup::default()],
        }
    }

    /// Append an empty load unit; returns its index
    pub fn add_grua(&mut self) -> usize {
        self.gruas.push(LoadGroup::default());
        self.touch();
        self.gruas.len() - 1
    }

    /// Remove a load unit by index, if it exists
    pub fn remove_grua(&mut self, index: usize) -> Option<LoadGroup> {
        if index >= self.gruas.len() {
            return None;
        }
        let grua = self.gruas.remove(index);
        self.touch();
        Some(grua)
    }

    /// Mutable access to the form; marks the session modified
    pub fn form_mut(&mut self) -> &mut FormState {
        self.meta.modified = Utc::now();
        &mut self.form
    }

    /// Mutable access to a load unit; marks the session modified
    pub fn grua_mut(&mut self, index: usize) -> Option<&mut LoadGroup> {
        if index < self.gruas.len() {
            self.meta.modified = Utc::now();
            self.gruas.get_mut(index)
        } else {
            None
        }
    }

    /// Update the modified timestamp
    pub fn touch(&mut self) {
        self.meta.modified = Utc::now();
    }
}

impl Default for Session {
    fn default() -> Self {
        Session::new()
    }
}
