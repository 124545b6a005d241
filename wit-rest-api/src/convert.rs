//! Conversion between JSON:API payloads and the work item type model

use std::collections::BTreeMap;

use axum::http::HeaderMap;
use uuid::Uuid;
use wit_api_types::{
    self as wire, GenericData, GenericLinks, RelationGenericList, RelationSpaces, WorkItemTypeAttributes,
    WorkItemTypeData, WorkItemTypeRelationships, WORK_ITEM_TYPES_RESOURCE,
};
use wit_core::system::guided_child_types;
use wit_core::{ConversionError, EnumType, FieldDefinition, FieldType, Kind, ListType, SimpleType, WorkItemType};
use wit_interfaces::CreateWorkItemType;
use wit_web::absolute_url;

use crate::errors::{RestError, RestResult};

/// Builds resource URLs for the current request
pub struct LinkBuilder<'a> {
    headers: &'a HeaderMap,
    api_prefix: &'a str,
}

impl<'a> LinkBuilder<'a> {
    pub fn new(headers: &'a HeaderMap, api_prefix: &'a str) -> Self {
        Self { headers, api_prefix }
    }

    /// Path of a work item type, without scheme or host
    pub fn work_item_type_path(&self, space_id: Uuid, id: Uuid) -> String {
        format!("{}/spaces/{}/workitemtypes/{}", self.api_prefix, space_id, id)
    }

    pub fn work_item_type(&self, space_id: Uuid, id: Uuid) -> String {
        absolute_url(self.headers, &self.work_item_type_path(space_id, id))
    }

    pub fn work_item_types(&self, space_id: Uuid, query: &str) -> String {
        let path = format!("{}/spaces/{}/workitemtypes?{}", self.api_prefix, space_id, query);
        absolute_url(self.headers, &path)
    }

    pub fn space(&self, space_id: Uuid) -> String {
        absolute_url(self.headers, &format!("{}/spaces/{}", self.api_prefix, space_id))
    }
}

fn parse_kind(raw: &str) -> Result<Kind, ConversionError> {
    Ok(raw.parse::<Kind>()?)
}

/// Wire field type into the model. Unknown kinds and malformed containers are rejected.
pub fn field_type_to_model(field_type: &wire::FieldType) -> Result<FieldType, ConversionError> {
    match parse_kind(&field_type.kind)? {
        Kind::List => {
            let component = field_type
                .component_type
                .as_deref()
                .ok_or(ConversionError::MissingComponentType)?;
            Ok(FieldType::List(ListType::new(parse_kind(component)?)?))
        }
        Kind::Enum => {
            let base = field_type.base_type.as_deref().ok_or(ConversionError::MissingBaseType)?;
            let values = field_type.values.as_deref().unwrap_or_default();
            Ok(FieldType::Enum(EnumType::new(parse_kind(base)?, values)?))
        }
        kind => Ok(FieldType::Simple(SimpleType::new(kind)?)),
    }
}

pub fn field_type_to_wire(field_type: &FieldType) -> wire::FieldType {
    let mut out = wire::FieldType {
        kind: field_type.kind().to_string(),
        component_type: None,
        base_type: None,
        values: None,
    };
    match field_type {
        FieldType::Simple(_) => {}
        FieldType::List(list) => out.component_type = Some(list.component_type.kind().to_string()),
        FieldType::Enum(enum_type) => {
            out.base_type = Some(enum_type.base_type.kind().to_string());
            out.values = Some(enum_type.values.clone());
        }
    }
    out
}

pub fn field_to_model(field: &wire::FieldDefinition) -> Result<FieldDefinition, ConversionError> {
    Ok(FieldDefinition {
        label: field.label.clone(),
        description: field.description.clone(),
        required: field.required,
        field_type: field_type_to_model(&field.field_type)?,
    })
}

pub fn field_to_wire(field: &FieldDefinition) -> wire::FieldDefinition {
    wire::FieldDefinition {
        required: field.required,
        label: field.label.clone(),
        description: field.description.clone(),
        field_type: field_type_to_wire(&field.field_type),
    }
}

/// Build the persistence request from a create payload.
///
/// The space always comes from the URL, whatever the payload's relationship says.
pub fn create_request(space_id: Uuid, data: WorkItemTypeData) -> RestResult<CreateWorkItemType> {
    let attributes = data.attributes;
    if attributes.name.trim().is_empty() {
        return Err(RestError::bad_parameter("data.attributes.name must not be empty"));
    }

    let mut fields = BTreeMap::new();
    for (name, field) in &attributes.fields {
        let model = field_to_model(field).map_err(|source| RestError::FieldConversion {
            field: name.clone(),
            source,
        })?;
        fields.insert(name.clone(), model);
    }

    Ok(CreateWorkItemType {
        space_id,
        id: data.id,
        extended_type_name: attributes.extended_type_name,
        name: attributes.name,
        description: attributes.description,
        icon: attributes.icon,
        fields,
    })
}

/// JSON:API resource object for a stored work item type
pub fn work_item_type_to_wire(wit: &WorkItemType, links: &LinkBuilder<'_>) -> WorkItemTypeData {
    let fields = wit
        .fields
        .iter()
        .map(|(name, field)| (name.clone(), field_to_wire(field)))
        .collect();

    let children = guided_child_types(wit.id);
    let guided_child_types = (!children.is_empty()).then(|| RelationGenericList {
        data: children
            .iter()
            .map(|id| GenericData {
                resource_type: WORK_ITEM_TYPES_RESOURCE.to_string(),
                id: *id,
            })
            .collect(),
    });

    WorkItemTypeData {
        resource_type: WORK_ITEM_TYPES_RESOURCE.to_string(),
        id: Some(wit.id),
        attributes: WorkItemTypeAttributes {
            name: wit.name.clone(),
            description: wit.description.clone(),
            icon: wit.icon.clone(),
            version: Some(wit.version),
            created_at: Some(wit.created_at),
            updated_at: Some(wit.updated_at),
            extended_type_name: wit.extended_type_name,
            fields,
        },
        relationships: Some(WorkItemTypeRelationships {
            space: Some(RelationSpaces::new(wit.space_id, links.space(wit.space_id))),
            guided_child_types,
        }),
        links: Some(GenericLinks::to_self(links.work_item_type(wit.space_id, wit.id))),
    }
}
