use serde::{Deserialize, Serialize};

use crate::types::{null_as_empty, BoxId, Timestamp};

/// A box: a named workspace holding one or more record containers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Workspace {
    pub id: BoxId,
    pub name: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub containers: Vec<String>,
    #[serde(default)]
    pub created_at: Option<Timestamp>,
}

impl Workspace {
    /// Whether `container` is one of the box's known containers.
    pub fn has_container(&self, container: &str) -> bool {
        self.containers.iter().any(|c| c == container)
    }

    /// Container a freshly opened box navigates to.
    pub fn default_container(&self) -> Option<&str> {
        self.containers.first().map(String::as_str)
    }
}

/// Response of `POST /box/create`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct CreatedWorkspace {
    pub id: BoxId,
}

/// Body of `PUT /box/:id`. Always carries the full name and container list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateWorkspace {
    pub name: String,
    pub containers: Vec<String>,
}

impl From<&Workspace> for UpdateWorkspace {
    fn from(ws: &Workspace) -> Self {
        Self {
            name: ws.name.clone(),
            containers: ws.containers.clone(),
        }
    }
}
