//! Work item type endpoints: show, create and list

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::{header, HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use tracing::{debug, info, warn};
use uuid::Uuid;
use wit_api_types::{ListMeta, PagingLinks, WorkItemTypeList, WorkItemTypeSingle};
use wit_core::system::{PLANNER_ITEM, SYSTEM_SPACE};
use wit_core::WorkItemType;
use wit_interfaces::{transactional, Application};
use wit_web::{ConditionalRequest, Identity, Page, Validators, JSONAPI_CONTENT_TYPE};

use super::parse_id;
use crate::context::WorkItemTypesContext;
use crate::convert::{create_request, work_item_type_to_wire, LinkBuilder};
use crate::errors::{RestError, RestResult};

fn json_api<T: serde::Serialize>(status: StatusCode, body: T) -> Response {
    let mut response = (status, Json(body)).into_response();
    response
        .headers_mut()
        .insert(header::CONTENT_TYPE, HeaderValue::from_static(JSONAPI_CONTENT_TYPE));
    response
}

/// `GET /spaces/{spaceID}/workitemtypes/{witID}`
pub async fn show_work_item_type(
    State(ctx): State<WorkItemTypesContext>,
    Path((space_id, wit_id)): Path<(String, String)>,
    conditional: ConditionalRequest,
    headers: HeaderMap,
) -> RestResult<Response> {
    let space_id = parse_id("spaceID", &space_id)?;
    let wit_id = parse_id("witID", &wit_id)?;
    debug!(%space_id, %wit_id, "Showing work item type");

    let wit = transactional(ctx.db.as_ref(), |app| {
        Box::pin(async move { Ok::<_, RestError>(app.work_item_types().load(space_id, wit_id).await?) })
    })
    .await?;

    let cache_control = ctx.cache_control.work_item_type();
    let validators = Validators::for_entity(&wit.cache_validator(), wit.updated_at);
    if conditional.is_not_modified(&validators) {
        return Ok(validators.not_modified(cache_control));
    }

    let links = LinkBuilder::new(&headers, &ctx.api_prefix);
    let mut response = json_api(
        StatusCode::OK,
        WorkItemTypeSingle {
            data: work_item_type_to_wire(&wit, &links),
        },
    );
    validators.apply(response.headers_mut(), cache_control);
    Ok(response)
}

/// `POST /spaces/{spaceID}/workitemtypes`
///
/// Only the owner of the space may add types to it.
pub async fn create_work_item_type(
    State(ctx): State<WorkItemTypesContext>,
    Path(space_id): Path<String>,
    identity: Identity,
    headers: HeaderMap,
    payload: Result<Json<WorkItemTypeSingle>, JsonRejection>,
) -> RestResult<Response> {
    let space_id = parse_id("spaceID", &space_id)?;
    let Json(payload) = payload.map_err(|e| RestError::bad_parameter(e.body_text()))?;
    let current_user = identity.user_id();

    let created = transactional(ctx.db.as_ref(), |app| {
        Box::pin(async move {
            let space = app.spaces().load(space_id).await?;
            if !space.is_owned_by(current_user) {
                warn!(
                    space_id = %space.id,
                    space_owner = %space.owner_id,
                    current_user = %current_user,
                    "User is not the space owner"
                );
                return Err(RestError::forbidden("user is not the space owner"));
            }

            let request = create_request(space_id, payload.data)?;
            Ok(app.work_item_types().create(request).await?)
        })
    })
    .await?;

    info!(work_item_type_id = %created.id, %space_id, "Created work item type");

    let links = LinkBuilder::new(&headers, &ctx.api_prefix);
    let location = links.work_item_type(created.space_id, created.id);
    let mut response = json_api(
        StatusCode::CREATED,
        WorkItemTypeSingle {
            data: work_item_type_to_wire(&created, &links),
        },
    );
    if let Ok(value) = HeaderValue::from_str(&location) {
        response.headers_mut().insert(header::LOCATION, value);
    }
    Ok(response)
}

/// One page of types for `space_id` with the planner item removed.
///
/// The flag reports whether the store returned a full page.
async fn visible_types(
    app: &dyn Application,
    space_id: Uuid,
    page: Page,
) -> RestResult<(Vec<WorkItemType>, bool)> {
    let fetched = app
        .work_item_types()
        .list(space_id, Some(page.offset), Some(page.limit))
        .await?;
    let full_page = fetched.len() as u64 >= page.limit;
    let visible = fetched.into_iter().filter(|wit| wit.id != PLANNER_ITEM).collect();
    Ok((visible, full_page))
}

/// `GET /spaces/{spaceID}/workitemtypes`
///
/// A space without types of its own lists the system types instead, using the
/// same page.
pub async fn list_work_item_types(
    State(ctx): State<WorkItemTypesContext>,
    Path(space_id): Path<String>,
    page: Page,
    conditional: ConditionalRequest,
    headers: HeaderMap,
) -> RestResult<Response> {
    let space_id = parse_id("spaceID", &space_id)?;
    debug!(%space_id, offset = page.offset, limit = page.limit, "Listing work item types");

    let (types, full_page) = transactional(ctx.db.as_ref(), |app| {
        Box::pin(async move {
            let listed = visible_types(app, space_id, page).await?;
            if !listed.0.is_empty() || space_id == SYSTEM_SPACE {
                return Ok(listed);
            }
            debug!(%space_id, "Space has no work item types, listing system types");
            visible_types(app, SYSTEM_SPACE, page).await
        })
    })
    .await?;

    let cache_control = ctx.cache_control.work_item_types();
    let tags: Vec<String> = types.iter().map(WorkItemType::cache_validator).collect();
    let validators = Validators::for_entities(tags.iter().map(String::as_str).zip(types.iter().map(|t| t.updated_at)));
    if conditional.is_not_modified(&validators) {
        return Ok(validators.not_modified(cache_control));
    }

    let links = LinkBuilder::new(&headers, &ctx.api_prefix);
    let paging = PagingLinks {
        self_link: Some(links.work_item_types(space_id, &page.to_query())),
        first: Some(links.work_item_types(space_id, &page.first().to_query())),
        next: full_page.then(|| links.work_item_types(space_id, &page.next().to_query())),
    };

    let body = WorkItemTypeList {
        meta: ListMeta {
            total_count: types.len() as u64,
        },
        data: types.iter().map(|wit| work_item_type_to_wire(wit, &links)).collect(),
        links: paging,
    };

    let mut response = json_api(StatusCode::OK, body);
    validators.apply(response.headers_mut(), cache_control);
    Ok(response)
}
