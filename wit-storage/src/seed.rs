//! Built-in data every deployment needs

use std::collections::BTreeMap;

use tracing::{debug, info};
use uuid::Uuid;
use wit_core::system::{planner_item_fields, system_type_definitions, PLANNER_ITEM, SYSTEM_SPACE};
use wit_core::Space;
use wit_interfaces::{transactional, CreateWorkItemType, DatabaseError, TransactionManager};

/// Create the system space and the built-in work item types when missing.
///
/// Safe to run on every startup; existing rows are left untouched.
pub async fn ensure_system_types(db: &dyn TransactionManager) -> Result<(), DatabaseError> {
    transactional(db, |app| {
        Box::pin(async move {
            match app.spaces().load(SYSTEM_SPACE).await {
                Ok(_) => debug!("System space already present"),
                Err(DatabaseError::NotFound { .. }) => {
                    let space = Space::new(SYSTEM_SPACE, "system.space", Uuid::nil())
                        .with_description("Description of the system space");
                    app.spaces().create(space).await?;
                    info!(space_id = %SYSTEM_SPACE, "Created system space");
                }
                Err(e) => return Err(e),
            }

            let mut created = 0usize;
            for def in system_type_definitions() {
                match app.work_item_types().load(SYSTEM_SPACE, def.id).await {
                    Ok(_) => continue,
                    Err(DatabaseError::NotFound { .. }) => {}
                    Err(e) => return Err(e),
                }

                let fields = if def.id == PLANNER_ITEM {
                    planner_item_fields()
                } else {
                    BTreeMap::new()
                };

                app.work_item_types()
                    .create(CreateWorkItemType {
                        space_id: SYSTEM_SPACE,
                        id: Some(def.id),
                        extended_type_name: def.extends,
                        name: def.name.to_string(),
                        description: Some(def.description.to_string()),
                        icon: def.icon.to_string(),
                        fields,
                    })
                    .await?;
                created += 1;
            }

            if created > 0 {
                info!(count = created, "Created system work item types");
            }
            Ok(())
        })
    })
    .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::InMemoryDatabase;
    use wit_core::system::{BUG, TASK};

    #[tokio::test]
    async fn test_seed_is_idempotent() {
        let db = InMemoryDatabase::new();
        ensure_system_types(&db).await.unwrap();
        ensure_system_types(&db).await.unwrap();

        let tx = db.begin().await.unwrap();
        let listed = tx
            .application()
            .work_item_types()
            .list(SYSTEM_SPACE, None, None)
            .await
            .unwrap();
        assert_eq!(listed.len(), system_type_definitions().len());

        let space = tx.application().spaces().load(SYSTEM_SPACE).await.unwrap();
        assert_eq!(space.owner_id, Uuid::nil());
    }

    #[tokio::test]
    async fn test_children_inherit_planner_item_fields() {
        let db = InMemoryDatabase::new();
        ensure_system_types(&db).await.unwrap();

        let tx = db.begin().await.unwrap();
        let bug = tx.application().work_item_types().load(SYSTEM_SPACE, BUG).await.unwrap();
        let task = tx.application().work_item_types().load(SYSTEM_SPACE, TASK).await.unwrap();

        assert_eq!(bug.extended_type_name, Some(PLANNER_ITEM));
        assert_eq!(bug.fields, planner_item_fields());
        assert!(task.fields.contains_key("system.title"));
    }
}
