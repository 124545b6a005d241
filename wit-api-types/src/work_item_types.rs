//! Work item type documents

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::pagination::{ListMeta, PagingLinks};

pub const WORK_ITEM_TYPES_RESOURCE: &str = "workitemtypes";
pub const SPACES_RESOURCE: &str = "spaces";

/// Wire form of a field type. `kind` decides which of the optional members apply.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldType {
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub component_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub values: Option<Vec<serde_json::Value>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDefinition {
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "type")]
    pub field_type: FieldType,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct WorkItemTypeAttributes {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub icon: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extended_type_name: Option<Uuid>,
    #[serde(default)]
    pub fields: BTreeMap<String, FieldDefinition>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct GenericLinks {
    #[serde(rename = "self", default, skip_serializing_if = "Option::is_none")]
    pub self_link: Option<String>,
}

impl GenericLinks {
    pub fn to_self(url: impl Into<String>) -> Self {
        Self {
            self_link: Some(url.into()),
        }
    }
}

/// `{type, id}` pair identifying a related resource
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenericData {
    #[serde(rename = "type")]
    pub resource_type: String,
    pub id: Uuid,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelationGenericList {
    pub data: Vec<GenericData>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelationSpacesData {
    #[serde(rename = "type")]
    pub resource_type: String,
    pub id: Uuid,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelationSpaces {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<RelationSpacesData>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub links: Option<GenericLinks>,
}

impl RelationSpaces {
    /// Relation to a space with a self link to the space resource
    pub fn new(space_id: Uuid, self_url: impl Into<String>) -> Self {
        Self {
            data: Some(RelationSpacesData {
                resource_type: SPACES_RESOURCE.to_string(),
                id: space_id,
            }),
            links: Some(GenericLinks::to_self(self_url)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct WorkItemTypeRelationships {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub space: Option<RelationSpaces>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guided_child_types: Option<RelationGenericList>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkItemTypeData {
    #[serde(rename = "type")]
    pub resource_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
    pub attributes: WorkItemTypeAttributes,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relationships: Option<WorkItemTypeRelationships>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub links: Option<GenericLinks>,
}

/// Single resource document, used for show responses and create payloads
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkItemTypeSingle {
    pub data: WorkItemTypeData,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkItemTypeList {
    pub data: Vec<WorkItemTypeData>,
    pub meta: ListMeta,
    #[serde(default)]
    pub links: PagingLinks,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_create_payload_parses() {
        let payload = json!({
            "data": {
                "type": "workitemtypes",
                "attributes": {
                    "name": "Story",
                    "icon": "fa fa-book",
                    "fields": {
                        "priority": {
                            "required": false,
                            "type": {"kind": "enum", "baseType": "string", "values": ["low", "high"]}
                        },
                        "watchers": {
                            "type": {"kind": "list", "componentType": "user"}
                        }
                    }
                },
                "relationships": {
                    "space": {"data": {"type": "spaces", "id": "2e0698d8-753e-4cef-bb7c-f027634824a2"}}
                }
            }
        });

        let single: WorkItemTypeSingle = serde_json::from_value(payload).unwrap();
        let fields = &single.data.attributes.fields;
        assert_eq!(fields["priority"].field_type.base_type.as_deref(), Some("string"));
        assert_eq!(fields["priority"].field_type.values, Some(vec![json!("low"), json!("high")]));
        assert_eq!(fields["watchers"].field_type.component_type.as_deref(), Some("user"));
        assert!(single.data.id.is_none());
    }

    #[test]
    fn test_attribute_keys_on_the_wire() {
        let attributes = WorkItemTypeAttributes {
            name: "Bug".to_string(),
            version: Some(0),
            extended_type_name: Some(Uuid::nil()),
            created_at: Some(Utc::now()),
            ..Default::default()
        };
        let value = serde_json::to_value(&attributes).unwrap();

        assert!(value.get("created-at").is_some());
        assert!(value.get("extended-type-name").is_some());
        assert!(value.get("updated-at").is_none());
        assert!(value.get("description").is_none());
    }

    #[test]
    fn test_guided_child_types_key() {
        let relationships = WorkItemTypeRelationships {
            space: None,
            guided_child_types: Some(RelationGenericList { data: vec![] }),
        };
        let value = serde_json::to_value(&relationships).unwrap();
        assert_eq!(value, json!({"guided-child-types": {"data": []}}));
    }
}
