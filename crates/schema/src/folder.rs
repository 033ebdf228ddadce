//! Folder records and payloads.

use serde::{Deserialize, Serialize};

use crate::error::FieldErrors;
use crate::ValidationError;

/// A folder in the self-referential folder tree.
///
/// Nothing validates or traverses the tree, so reference loops are possible
/// and tolerated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Folder {
    /// Unique identifier, assigned by the storage backend.
    pub id: i64,
    /// Folder name.
    pub name: String,
    /// Parent folder, if any.
    pub parent_id: Option<i64>,
}

/// Raw folder insert payload.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct FolderDraft {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<i64>,
}

/// Normalized folder insert payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewFolder {
    pub name: String,
    pub parent_id: Option<i64>,
}

impl FolderDraft {
    /// Checks the draft and produces the normalized insert payload.
    pub fn validate(self) -> Result<NewFolder, ValidationError> {
        let mut errors = FieldErrors::default();

        let name = match self.name {
            Some(n) if !n.trim().is_empty() => n,
            Some(_) => {
                errors.push("name", "must not be empty");
                String::new()
            }
            None => {
                errors.push("name", "is required");
                String::new()
            }
        };

        errors.finish(NewFolder {
            name,
            parent_id: self.parent_id,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn draft_requires_name() {
        let draft: FolderDraft = serde_json::from_value(serde_json::json!({})).unwrap();
        assert_eq!(draft.validate().unwrap_err().errors[0].field, "name");
    }

    #[test]
    fn draft_keeps_parent() {
        let draft: FolderDraft =
            serde_json::from_value(serde_json::json!({"name": "Photos", "parentId": 1})).unwrap();
        let new = draft.validate().unwrap();
        assert_eq!(new.parent_id, Some(1));
    }
}
