pub mod spaces;
pub mod work_item_types;

pub use spaces::{ActiveModel as SpaceActiveModel, Column as SpaceColumn, Entity as Spaces, Model as SpaceModel};
pub use work_item_types::{
    ActiveModel as WorkItemTypeActiveModel, Column as WorkItemTypeColumn, Entity as WorkItemTypes,
    Model as WorkItemTypeModel,
};
