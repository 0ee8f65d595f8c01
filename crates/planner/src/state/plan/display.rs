//! Display helper functions for placed objects

use shared::PlacedObject;

use crate::catalog::Catalog;

/// Get display name for an object: type name plus label, or a short id
pub fn object_display_name(object: &PlacedObject, catalog: &dyn Catalog) -> String {
    let kind = catalog
        .get_type(&object.type_id)
        .map(|t| t.name.as_str())
        .unwrap_or(object.type_id.as_str());
    match &object.label {
        Some(label) => format!("{kind} ({label})"),
        None => format!("{kind} ({})", short_id(&object.id)),
    }
}

/// Get shortened ID (first 8 characters)
pub fn short_id(id: &str) -> &str {
    match id.char_indices().nth(8) {
        Some((end, _)) => &id[..end],
        None => id,
    }
}
