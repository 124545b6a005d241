//! SeaORM backend against an in-memory SQLite database

use std::collections::BTreeMap;
use std::time::Duration;

use serde_json::json;
use uuid::Uuid;
use wit_core::system::{PLANNER_ITEM, SYSTEM_SPACE};
use wit_core::{EnumType, FieldDefinition, FieldType, Kind, Space};
use wit_interfaces::{transactional, CreateWorkItemType, DatabaseError, TransactionManager};
use wit_storage::{ensure_system_types, DatabaseConfig, DatabaseConnection, SeaOrmDatabase};

async fn setup() -> SeaOrmDatabase {
    let config = DatabaseConfig {
        url: "sqlite::memory:".to_string(),
        max_connections: 5,
        connection_timeout: Duration::from_secs(10),
    };
    let connection = DatabaseConnection::new(config).await.unwrap();
    connection.migrate().await.unwrap();
    let db = SeaOrmDatabase::new(connection);
    ensure_system_types(&db).await.unwrap();
    db
}

async fn create_space(db: &SeaOrmDatabase, owner: Uuid) -> Uuid {
    let space = Space::new(Uuid::new_v4(), "project", owner);
    let id = space.id;
    transactional(db, |app| Box::pin(async move { app.spaces().create(space).await }))
        .await
        .unwrap();
    id
}

fn priority_field() -> BTreeMap<String, FieldDefinition> {
    let priority = EnumType::new(Kind::String, &[json!("low"), json!("high")]).unwrap();
    BTreeMap::from([(
        "priority".to_string(),
        FieldDefinition::new("Priority", FieldType::Enum(priority)),
    )])
}

fn create_request(space_id: Uuid) -> CreateWorkItemType {
    CreateWorkItemType {
        space_id,
        id: None,
        extended_type_name: None,
        name: "Story".to_string(),
        description: Some("A user story".to_string()),
        icon: "fa fa-book".to_string(),
        fields: priority_field(),
    }
}

#[tokio::test]
async fn test_create_then_load_preserves_fields() {
    let db = setup().await;
    let space_id = create_space(&db, Uuid::new_v4()).await;

    let request = create_request(space_id);
    let created = transactional(&db, |app| Box::pin(async move { app.work_item_types().create(request).await }))
        .await
        .unwrap();
    assert_eq!(created.version, 0);

    let id = created.id;
    let loaded = transactional(&db, |app| Box::pin(async move { app.work_item_types().load(space_id, id).await }))
        .await
        .unwrap();

    assert_eq!(loaded.fields, priority_field());
    assert_eq!(loaded.description.as_deref(), Some("A user story"));
}

#[tokio::test]
async fn test_load_in_wrong_space_is_not_found() {
    let db = setup().await;
    let other_space = create_space(&db, Uuid::new_v4()).await;

    let err = transactional(&db, |app| {
        Box::pin(async move { app.work_item_types().load(other_space, PLANNER_ITEM).await })
    })
    .await
    .unwrap_err();

    assert!(matches!(err, DatabaseError::NotFound { .. }));
}

#[tokio::test]
async fn test_extended_type_inherits_fields() {
    let db = setup().await;
    let space_id = create_space(&db, Uuid::new_v4()).await;

    let mut request = create_request(space_id);
    request.extended_type_name = Some(PLANNER_ITEM);
    let created = transactional(&db, |app| Box::pin(async move { app.work_item_types().create(request).await }))
        .await
        .unwrap();

    assert!(created.fields.contains_key("priority"));
    assert!(created.fields.contains_key("system.title"));
}

#[tokio::test]
async fn test_extended_type_field_clash_is_rejected() {
    let db = setup().await;
    let space_id = create_space(&db, Uuid::new_v4()).await;

    let mut request = create_request(space_id);
    request.extended_type_name = Some(PLANNER_ITEM);
    request.fields.insert(
        "system.title".to_string(),
        FieldDefinition::new("Title", FieldType::simple(Kind::String).unwrap()),
    );

    let err = transactional(&db, |app| Box::pin(async move { app.work_item_types().create(request).await }))
        .await
        .unwrap_err();
    assert!(matches!(err, DatabaseError::Validation { .. }));
}

#[tokio::test]
async fn test_duplicate_id_is_a_constraint_violation() {
    let db = setup().await;
    let space_id = create_space(&db, Uuid::new_v4()).await;

    let mut request = create_request(space_id);
    request.id = Some(PLANNER_ITEM);
    let err = transactional(&db, |app| Box::pin(async move { app.work_item_types().create(request).await }))
        .await
        .unwrap_err();
    assert!(matches!(err, DatabaseError::Constraint { .. }));
}

#[tokio::test]
async fn test_failed_unit_of_work_is_rolled_back() {
    let db = setup().await;
    let space_id = create_space(&db, Uuid::new_v4()).await;
    let request = create_request(space_id);

    let result: Result<(), DatabaseError> = transactional(&db, |app| {
        Box::pin(async move {
            app.work_item_types().create(request).await?;
            Err::<(), _>(DatabaseError::Validation {
                message: "abort after write".to_string(),
            })
        })
    })
    .await;
    assert!(result.is_err());

    let listed = transactional(&db, |app| {
        Box::pin(async move { app.work_item_types().list(space_id, None, None).await })
    })
    .await
    .unwrap();
    assert!(listed.is_empty());
}

#[tokio::test]
async fn test_list_honours_offset_and_limit() {
    let db = setup().await;

    let all = transactional(&db, |app| {
        Box::pin(async move { app.work_item_types().list(SYSTEM_SPACE, None, None).await })
    })
    .await
    .unwrap();
    let page = transactional(&db, |app| {
        Box::pin(async move { app.work_item_types().list(SYSTEM_SPACE, Some(2), Some(3)).await })
    })
    .await
    .unwrap();

    assert_eq!(page.len(), 3);
    assert_eq!(page[0].id, all[2].id);
    assert!(db.health_check().await.is_ok());
}
