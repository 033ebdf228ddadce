//! Media file records and payloads.

use serde::{Deserialize, Serialize};

use crate::error::FieldErrors;
use crate::ValidationError;

/// A bookkeeping entry for an externally stored media file.
///
/// `file_path` points at the external blob location; no file content is
/// stored by this system.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaFile {
    /// Unique identifier, assigned by the storage backend.
    pub id: i64,
    /// Display name of the file.
    pub filename: String,
    /// URL or location of the external blob.
    pub file_path: String,
    /// MIME type string.
    pub file_type: String,
    /// Containing folder, if any.
    pub folder_id: Option<i64>,
}

/// Raw media file insert payload.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct MediaFileDraft {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub folder_id: Option<i64>,
}

/// Normalized media file insert payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMediaFile {
    pub filename: String,
    pub file_path: String,
    pub file_type: String,
    pub folder_id: Option<i64>,
}

impl MediaFileDraft {
    /// Checks the draft and produces the normalized insert payload.
    pub fn validate(self) -> Result<NewMediaFile, ValidationError> {
        let mut errors = FieldErrors::default();

        let filename = required(&mut errors, "filename", self.filename);
        let file_path = required(&mut errors, "filePath", self.file_path);
        let file_type = required(&mut errors, "fileType", self.file_type);

        errors.finish(NewMediaFile {
            filename,
            file_path,
            file_type,
            folder_id: self.folder_id,
        })
    }
}

fn required(errors: &mut FieldErrors, field: &'static str, value: Option<String>) -> String {
    match value {
        Some(v) if !v.trim().is_empty() => v,
        Some(_) => {
            errors.push(field, "must not be empty");
            String::new()
        }
        None => {
            errors.push(field, "is required");
            String::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn draft_requires_all_file_fields() {
        let draft: MediaFileDraft = serde_json::from_value(serde_json::json!({})).unwrap();
        let err = draft.validate().unwrap_err();
        let fields: Vec<_> = err.errors.iter().map(|e| e.field).collect();
        assert_eq!(fields, vec!["filename", "filePath", "fileType"]);
    }

    #[test]
    fn draft_keeps_optional_folder() {
        let draft: MediaFileDraft = serde_json::from_value(serde_json::json!({
            "filename": "cat.png",
            "filePath": "blob:https://example/abc",
            "fileType": "image/png",
            "folderId": 3,
        }))
        .unwrap();
        let new = draft.validate().unwrap();
        assert_eq!(new.folder_id, Some(3));
    }

    #[test]
    fn draft_accepts_null_folder() {
        let draft: MediaFileDraft = serde_json::from_value(serde_json::json!({
            "filename": "cat.png",
            "filePath": "blob:https://example/abc",
            "fileType": "image/png",
            "folderId": null,
        }))
        .unwrap();
        assert_eq!(draft.validate().unwrap().folder_id, None);
    }
}
