//! Core domain model for the work item type service
//!
//! This crate defines the domain language shared by the storage, REST and
//! server crates: field kinds, field types, work item types and spaces, plus
//! the catalogue of built-in system types. It has minimal dependencies and no
//! knowledge of the wire format.

pub mod field;
pub mod kind;
pub mod space;
pub mod system;
pub mod work_item_type;

pub use field::{ConversionError, EnumType, FieldDefinition, FieldType, ListType, SimpleType};
pub use kind::{Kind, ParseKindError};
pub use space::Space;
pub use work_item_type::WorkItemType;
