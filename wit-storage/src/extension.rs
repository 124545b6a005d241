//! Field inheritance for extended work item types

use std::collections::BTreeMap;

use uuid::Uuid;
use wit_core::FieldDefinition;
use wit_interfaces::DatabaseError;

/// Merge the fields of a base type into the fields of a type extending it.
///
/// Field names must stay unique, so a name defined by both types is rejected.
pub fn inherit_fields(
    fields: &mut BTreeMap<String, FieldDefinition>,
    base_id: Uuid,
    base_fields: BTreeMap<String, FieldDefinition>,
) -> Result<(), DatabaseError> {
    for (name, definition) in base_fields {
        if fields.contains_key(&name) {
            return Err(DatabaseError::Validation {
                message: format!(
                    "field '{}' is already defined by extended type {}",
                    name, base_id
                ),
            });
        }
        fields.insert(name, definition);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use wit_core::{FieldType, Kind};

    fn field(label: &str) -> FieldDefinition {
        FieldDefinition::new(label, FieldType::simple(Kind::String).unwrap())
    }

    #[test]
    fn test_base_fields_are_added() {
        let mut own = BTreeMap::from([("story.points".to_string(), field("Points"))]);
        let base = BTreeMap::from([("system.title".to_string(), field("Title"))]);

        inherit_fields(&mut own, Uuid::nil(), base).unwrap();

        assert_eq!(own.len(), 2);
        assert_eq!(own["system.title"].label, "Title");
    }

    #[test]
    fn test_duplicate_field_rejected() {
        let mut own = BTreeMap::from([("system.title".to_string(), field("Headline"))]);
        let base = BTreeMap::from([("system.title".to_string(), field("Title"))]);

        let err = inherit_fields(&mut own, Uuid::nil(), base).unwrap_err();
        assert!(matches!(err, DatabaseError::Validation { .. }));
    }
}
