//! JSON:API wire types
//!
//! Everything that crosses the HTTP boundary is defined here: work item type
//! documents, the apps facade payloads, the error envelope and list metadata.
//! The types carry no behaviour beyond serde and small constructors.

pub mod apps;
pub mod errors;
pub mod pagination;
pub mod work_item_types;

pub use errors::{ApiError, ErrorObject, JsonApiErrors};
pub use pagination::{ListMeta, PagingLinks};
pub use work_item_types::{
    FieldDefinition, FieldType, GenericData, GenericLinks, RelationGenericList, RelationSpaces, RelationSpacesData,
    WorkItemTypeAttributes, WorkItemTypeData, WorkItemTypeList, WorkItemTypeRelationships, WorkItemTypeSingle,
    SPACES_RESOURCE, WORK_ITEM_TYPES_RESOURCE,
};
