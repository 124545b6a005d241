//! Built-in spaces and work item types
//!
//! The system space holds the catalogue of built-in types every other space
//! falls back to. All built-in types except the planner item extend the
//! planner item and inherit its `system.*` fields.

use std::collections::BTreeMap;

use serde_json::json;
use uuid::{uuid, Uuid};

use crate::field::{EnumType, FieldDefinition, FieldType, ListType, SimpleType};
use crate::kind::Kind;

pub const SYSTEM_SPACE: Uuid = uuid!("2e0698d8-753e-4cef-bb7c-f027634824a2");

pub const PLANNER_ITEM: Uuid = uuid!("86af5178-9b41-469b-9096-57e5155c3f31");
pub const TASK: Uuid = uuid!("bbf35418-04b6-426c-a60b-7f80beb0b624");
pub const VALUE_PROPOSITION: Uuid = uuid!("3194ab60-855b-4155-9005-9dce4a05f1eb");
pub const FUNDAMENTAL: Uuid = uuid!("ee7ca005-f81d-4eea-9b9b-1965df0988d0");
pub const EXPERIENCE: Uuid = uuid!("b9a71831-c803-4f66-8774-4193fffd1311");
pub const FEATURE: Uuid = uuid!("0a24d3c2-e0a6-4686-8051-ec0ea1915a28");
pub const SCENARIO: Uuid = uuid!("71171e90-6d35-498f-a6a7-2083b5267c18");
pub const BUG: Uuid = uuid!("26787039-b68f-4e28-8814-c2f93be1ef4e");
pub const PAPERCUTS: Uuid = uuid!("6d603ab4-7c5e-4c5f-bba8-a3ba9d370985");

/// Suggested next-step types for a built-in type, empty for everything else.
// TODO: move guided child types onto the type definitions once they are stored per space
pub fn guided_child_types(id: Uuid) -> &'static [Uuid] {
    const EXPERIENCE_OR_VALUE: &[Uuid] = &[EXPERIENCE, VALUE_PROPOSITION];
    const FEATURE_OR_BUG: &[Uuid] = &[FEATURE, BUG];

    match id {
        SCENARIO | FUNDAMENTAL | PAPERCUTS => EXPERIENCE_OR_VALUE,
        EXPERIENCE | VALUE_PROPOSITION => FEATURE_OR_BUG,
        FEATURE => &[TASK, BUG],
        BUG => &[TASK],
        _ => &[],
    }
}

/// Seed description of a built-in type
#[derive(Debug, Clone)]
pub struct SystemTypeDefinition {
    pub id: Uuid,
    pub name: &'static str,
    pub description: &'static str,
    pub icon: &'static str,
    pub extends: Option<Uuid>,
}

/// Built-in types in creation order; base types come before the types extending them.
pub fn system_type_definitions() -> Vec<SystemTypeDefinition> {
    let planner = Some(PLANNER_ITEM);
    vec![
        SystemTypeDefinition {
            id: PLANNER_ITEM,
            name: "Planner Item",
            description: "Base type for every planning artifact",
            icon: "fa fa-bookmark",
            extends: None,
        },
        SystemTypeDefinition {
            id: SCENARIO,
            name: "Scenario",
            description: "A story describing how a user gets value from the product",
            icon: "fa fa-bullseye",
            extends: planner,
        },
        SystemTypeDefinition {
            id: FUNDAMENTAL,
            name: "Fundamental",
            description: "A non-negotiable quality of the product",
            icon: "fa fa-bank",
            extends: planner,
        },
        SystemTypeDefinition {
            id: PAPERCUTS,
            name: "Papercuts",
            description: "Small irritations that add up",
            icon: "fa fa-scissors",
            extends: planner,
        },
        SystemTypeDefinition {
            id: EXPERIENCE,
            name: "Experience",
            description: "A user experience delivering part of a scenario",
            icon: "fa fa-map",
            extends: planner,
        },
        SystemTypeDefinition {
            id: VALUE_PROPOSITION,
            name: "Value Proposition",
            description: "A measurable benefit delivered to the user",
            icon: "fa fa-diamond",
            extends: planner,
        },
        SystemTypeDefinition {
            id: FEATURE,
            name: "Feature",
            description: "A unit of functionality realising an experience",
            icon: "fa fa-mouse-pointer",
            extends: planner,
        },
        SystemTypeDefinition {
            id: BUG,
            name: "Bug",
            description: "Something that does not work as intended",
            icon: "fa fa-bug",
            extends: planner,
        },
        SystemTypeDefinition {
            id: TASK,
            name: "Task",
            description: "A concrete piece of work",
            icon: "fa fa-tasks",
            extends: planner,
        },
    ]
}

/// The `system.*` fields defined by the planner item
pub fn planner_item_fields() -> BTreeMap<String, FieldDefinition> {
    // only simple kinds are passed to these two
    fn simple(kind: Kind) -> FieldType {
        FieldType::Simple(SimpleType { kind })
    }

    fn list(kind: Kind) -> FieldType {
        FieldType::List(ListType {
            component_type: SimpleType { kind },
        })
    }

    let state = FieldType::Enum(EnumType {
        base_type: SimpleType { kind: Kind::String },
        values: ["new", "open", "in progress", "resolved", "closed"]
            .into_iter()
            .map(|state| json!(state))
            .collect(),
    });

    let fields = [
        ("system.title", FieldDefinition::new("Title", simple(Kind::String)).required()),
        ("system.description", FieldDefinition::new("Description", simple(Kind::Markup))),
        ("system.state", FieldDefinition::new("State", state).required()),
        ("system.creator", FieldDefinition::new("Creator", simple(Kind::User)).required()),
        ("system.assignees", FieldDefinition::new("Assignees", list(Kind::User))),
        ("system.created_at", FieldDefinition::new("Created at", simple(Kind::Instant))),
        ("system.updated_at", FieldDefinition::new("Updated at", simple(Kind::Instant))),
        ("system.remote_item_id", FieldDefinition::new("Remote item", simple(Kind::String))),
        ("system.number", FieldDefinition::new("Number", simple(Kind::Integer))),
        ("system.order", FieldDefinition::new("Execution order", simple(Kind::Float))),
        ("system.area", FieldDefinition::new("Area", simple(Kind::Area))),
        ("system.iteration", FieldDefinition::new("Iteration", simple(Kind::Iteration))),
        ("system.labels", FieldDefinition::new("Labels", list(Kind::Label))),
        ("system.codebase", FieldDefinition::new("Codebase", simple(Kind::Codebase))),
    ];

    fields.into_iter().map(|(name, def)| (name.to_string(), def)).collect()
}
