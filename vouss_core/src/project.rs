//! # Project Data Structures
//!
//! The `Project` struct is the root container for a set of roof analyses.
//! Projects serialize to `.vsp` files as human-readable JSON.
//!
//! ## Structure
//!
//! ```text
//! Project
//! ├── meta: ProjectMetadata (version, engineer, job info, timestamps)
//! └── items: HashMap<Uuid, VoussoirInput> (all analyses)
//! ```
//!
//! ## Example
//!
//! ```rust
//! use vouss_core::calculations::VoussoirInput;
//! use vouss_core::project::Project;
//!
//! let mut project = Project::new("J. Engineer", "26-014", "North Decline");
//! let id = project.add_item(VoussoirInput::reference());
//!
//! assert!(project.get_item(&id).is_some());
//! let json = serde_json::to_string_pretty(&project).unwrap();
//! assert!(json.contains("North Decline"));
//! ```

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::calculations::VoussoirInput;
use crate::errors::{VoussoirError, VoussoirResult};

/// Current schema version for .vsp files
pub const SCHEMA_VERSION: &str = "0.1.0";

/// Root project container.
///
/// Items are stored in a flat UUID-keyed map.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    pub meta: ProjectMetadata,

    /// All analyses, keyed by UUID
    pub items: HashMap<Uuid, VoussoirInput>,
}

impl Project {
    /// Create a new empty project.
    ///
    /// # Arguments
    ///
    /// * `engineer` - Name of the responsible engineer
    /// * `job_id` - Job number (e.g., "26-014")
    /// * `site` - Mine or site name
    pub fn new(
        engineer: impl Into<String>,
        job_id: impl Into<String>,
        site: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        Project {
            meta: ProjectMetadata {
                version: SCHEMA_VERSION.to_string(),
                engineer: engineer.into(),
                job_id: job_id.into(),
                site: site.into(),
                created: now,
                modified: now,
            },
            items: HashMap::new(),
        }
    }

    /// Add an analysis to the project. Returns the UUID assigned to it.
    pub fn add_item(&mut self, item: VoussoirInput) -> Uuid {
        let id = Uuid::new_v4();
        self.items.insert(id, item);
        self.touch();
        id
    }

    /// Remove an analysis by UUID.
    pub fn remove_item(&mut self, id: &Uuid) -> Option<VoussoirInput> {
        let item = self.items.remove(id);
        if item.is_some() {
            self.touch();
        }
        item
    }

    pub fn get_item(&self, id: &Uuid) -> Option<&VoussoirInput> {
        self.items.get(id)
    }

    /// Get a mutable reference to an analysis. Marks the project modified.
    pub fn get_item_mut(&mut self, id: &Uuid) -> Option<&mut VoussoirInput> {
        if self.items.contains_key(id) {
            self.meta.modified = Utc::now();
            self.items.get_mut(id)
        } else {
            None
        }
    }

    /// Find an analysis by its label.
    ///
    /// Labels are not required to be unique; if several match, the one with
    /// the lowest UUID is returned so the choice is stable across loads.
    pub fn find_by_label(&self, label: &str) -> VoussoirResult<(Uuid, &VoussoirInput)> {
        self.items
            .iter()
            .filter(|(_, item)| item.label == label)
            .min_by_key(|(id, _)| **id)
            .map(|(id, item)| (*id, item))
            .ok_or_else(|| VoussoirError::analysis_not_found(label))
    }

    /// Analyses sorted by label, for display.
    pub fn sorted_items(&self) -> Vec<(Uuid, &VoussoirInput)> {
        let mut items: Vec<_> = self.items.iter().map(|(id, item)| (*id, item)).collect();
        items.sort_by(|a, b| a.1.label.cmp(&b.1.label).then(a.0.cmp(&b.0)));
        items
    }

    /// Update the modified timestamp.
    pub fn touch(&mut self) {
        self.meta.modified = Utc::now();
    }

    pub fn item_count(&self) -> usize {
        self.items.len()
    }
}

impl Default for Project {
    fn default() -> Self {
        Project::new("", "", "")
    }
}

/// Project metadata stored in the file header.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectMetadata {
    /// Schema version (for migration compatibility)
    pub version: String,

    /// Name of the responsible engineer
    pub engineer: String,

    /// Job/project number
    pub job_id: String,

    /// Mine or site name
    pub site: String,

    pub created: DateTime<Utc>,
    pub modified: DateTime<Utc>,
}
