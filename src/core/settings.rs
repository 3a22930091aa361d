// metamerge - core/settings.rs
//
// The settings document: flat fields plus the `exifTags` tag-flag sub-map.
// Keys the UI does not know about are round-tripped opaquely so a newer
// backend can add fields without this front-end losing them on push.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// =============================================================================
// Field values
// =============================================================================

/// Scalar value of one flat settings field.
///
/// `Bool` backs checkbox controls, `Text` backs everything else (including
/// number-as-string fields such as the timezone offset). `Opaque` carries
/// values of unknown keys through fetch → mirror → push untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Bool(bool),
    Text(String),
    Opaque(serde_json::Value),
}

impl FieldValue {
    /// The checkbox interpretation of this value, if it has one.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            Self::Opaque(v) => v.as_bool(),
            Self::Text(_) => None,
        }
    }

    /// The value coerced to display text for non-checkbox controls.
    pub fn display_text(&self) -> String {
        match self {
            Self::Text(s) => s.clone(),
            Self::Bool(b) => b.to_string(),
            Self::Opaque(serde_json::Value::String(s)) => s.clone(),
            Self::Opaque(v) => v.to_string(),
        }
    }
}

// =============================================================================
// Settings document
// =============================================================================

/// Which part of the document an edit landed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditTarget {
    /// The edit went to `exifTags[id]`.
    NestedTag,
    /// The edit went to the flat field `id`.
    FlatField,
}

/// The complete settings state exchanged with the settings service.
///
/// `Default` is the empty placeholder the mirror holds before the startup
/// fetch resolves (and keeps if the fetch fails).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SettingsDocument {
    /// Tag-name → enabled flag for the ExifTag checkboxes.
    #[serde(rename = "exifTags", default)]
    pub exif_tags: BTreeMap<String, bool>,

    /// All flat fields, known and unknown alike.
    #[serde(flatten)]
    pub fields: BTreeMap<String, FieldValue>,
}

impl SettingsDocument {
    /// Value of a flat field, if present.
    pub fn field(&self, id: &str) -> Option<&FieldValue> {
        self.fields.get(id)
    }

    /// Value of a nested tag flag, if present.
    pub fn tag(&self, id: &str) -> Option<bool> {
        self.exif_tags.get(id).copied()
    }

    /// Apply one control edit to the document.
    ///
    /// Classification is purely by key membership: an id that is currently
    /// a key of `exifTags` updates the nested flag, any other id updates
    /// (or inserts) the flat field. Returns which branch was taken so the
    /// caller can log it.
    pub fn apply_edit(&mut self, id: &str, value: FieldValue) -> EditTarget {
        if let Some(flag) = self.exif_tags.get_mut(id) {
            *flag = value.as_bool().unwrap_or(false);
            EditTarget::NestedTag
        } else {
            self.fields.insert(id.to_string(), value);
            EditTarget::FlatField
        }
    }
}

// =============================================================================
// Unit tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_doc() -> SettingsDocument {
        serde_json::from_value(json!({
            "editedSuffix": "_edited",
            "ignoreMinorErrors": false,
            "timezoneOffset": "+0200",
            "exifTags": {"title": true, "GPS": false}
        }))
        .unwrap()
    }

    #[test]
    fn test_deserialize_splits_nested_and_flat() {
        let doc = sample_doc();
        assert_eq!(
            doc.field("editedSuffix"),
            Some(&FieldValue::Text("_edited".to_string()))
        );
        assert_eq!(doc.field("ignoreMinorErrors"), Some(&FieldValue::Bool(false)));
        assert_eq!(doc.tag("title"), Some(true));
        assert_eq!(doc.tag("GPS"), Some(false));
        assert_eq!(doc.field("GPS"), None);
    }

    /// A document without an `exifTags` key is the degenerate flat shape.
    #[test]
    fn test_flat_only_document_has_empty_tag_map() {
        let doc: SettingsDocument =
            serde_json::from_value(json!({"editedSuffix": "x"})).unwrap();
        assert!(doc.exif_tags.is_empty());
    }

    /// Keys this front-end does not know are carried through a round-trip.
    #[test]
    fn test_unknown_keys_round_trip_opaquely() {
        let input = json!({
            "editedSuffix": "_edited",
            "futureRetryCount": 3,
            "futureNested": {"a": [1, 2]},
            "exifTags": {"title": true}
        });
        let doc: SettingsDocument = serde_json::from_value(input.clone()).unwrap();
        let output = serde_json::to_value(&doc).unwrap();
        assert_eq!(output, input);
    }

    /// Membership in the tag sub-map decides the branch, not the id name.
    #[test]
    fn test_nested_edit_never_touches_flat_field_of_same_name() {
        let mut doc: SettingsDocument = serde_json::from_value(json!({
            "GPS": "flat value",
            "exifTags": {"GPS": false}
        }))
        .unwrap();

        let target = doc.apply_edit("GPS", FieldValue::Bool(true));
        assert_eq!(target, EditTarget::NestedTag);
        assert_eq!(doc.tag("GPS"), Some(true));
        assert_eq!(doc.field("GPS"), Some(&FieldValue::Text("flat value".to_string())));
    }

    #[test]
    fn test_flat_edit_never_touches_tag_map() {
        let mut doc = sample_doc();
        let target = doc.apply_edit("editedSuffix", FieldValue::Text("-new".to_string()));
        assert_eq!(target, EditTarget::FlatField);
        assert_eq!(
            doc.field("editedSuffix"),
            Some(&FieldValue::Text("-new".to_string()))
        );
        assert_eq!(doc.tag("title"), Some(true));
    }

    /// An id in neither set still lands in the flat map (no allow-list).
    #[test]
    fn test_unregistered_id_follows_flat_branch() {
        let mut doc = sample_doc();
        let target = doc.apply_edit("somethingNew", FieldValue::Bool(true));
        assert_eq!(target, EditTarget::FlatField);
        assert_eq!(doc.field("somethingNew"), Some(&FieldValue::Bool(true)));
    }

    #[test]
    fn test_display_text_coercions() {
        assert_eq!(FieldValue::Text("+0200".into()).display_text(), "+0200");
        assert_eq!(FieldValue::Bool(true).display_text(), "true");
        assert_eq!(FieldValue::Opaque(json!(3)).display_text(), "3");
    }
}
