//! Apps facade handlers
//!
//! Thin adapters from validated route parameters to the deployment platform.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use tracing::{debug, info};
use wit_api_types::apps::{JsonList, JsonSingle};
use wit_interfaces::StatSeriesQuery;

use crate::context::AppsContext;
use crate::errors::RestResult;
use crate::schema::{AppParams, AppsAction, RouteSpec};

/// Run the action of `route` with already validated parameters
pub async fn dispatch(ctx: &AppsContext, route: &RouteSpec, params: &AppParams) -> RestResult<Response> {
    debug!(action = route.name, "Dispatching apps action");
    let deployments = ctx.deployments.as_ref();

    let response = match route.action {
        AppsAction::ShowSpace => {
            let space = deployments.space(params.uuid("spaceID")?).await?;
            Json(JsonSingle::new(space)).into_response()
        }
        AppsAction::ShowSpaceApp => {
            let app = deployments
                .application(params.uuid("spaceID")?, params.string("appName")?)
                .await?;
            Json(JsonSingle::new(app)).into_response()
        }
        AppsAction::ShowSpaceAppDeployment => {
            let deployment = deployments
                .deployment(
                    params.uuid("spaceID")?,
                    params.string("appName")?,
                    params.string("deployName")?,
                )
                .await?;
            Json(JsonSingle::new(deployment)).into_response()
        }
        AppsAction::ShowDeploymentStats => {
            let stats = deployments
                .deployment_stats(
                    params.uuid("spaceID")?,
                    params.string("appName")?,
                    params.string("deployName")?,
                    params.number("start"),
                )
                .await?;
            Json(JsonSingle::new(stats)).into_response()
        }
        AppsAction::ShowDeploymentStatSeries => {
            let query = StatSeriesQuery {
                start: params.number("start"),
                end: params.number("end"),
                limit: params.integer("limit"),
            };
            let series = deployments
                .deployment_stat_series(
                    params.uuid("spaceID")?,
                    params.string("appName")?,
                    params.string("deployName")?,
                    query,
                )
                .await?;
            Json(JsonSingle::new(series)).into_response()
        }
        AppsAction::SetDeployment => {
            let space_id = params.uuid("spaceID")?;
            let app_name = params.string("appName")?;
            let deploy_name = params.string("deployName")?;
            let pod_count = params.integer("podCount");
            deployments
                .scale_deployment(space_id, app_name, deploy_name, pod_count)
                .await?;
            info!(%space_id, app_name, deploy_name, ?pod_count, "Scaled deployment");
            StatusCode::OK.into_response()
        }
        AppsAction::ShowSpaceEnvironments => {
            let environments = deployments.space_environments(params.uuid("spaceID")?).await?;
            Json(JsonList::new(environments)).into_response()
        }
        AppsAction::ShowEnvironment => {
            let environment = deployments.environment(params.string("envName")?).await?;
            Json(JsonSingle::new(environment)).into_response()
        }
        AppsAction::ShowEnvAppPods => {
            let pods = deployments
                .environment_app_pods(params.string("envName")?, params.string("appName")?)
                .await?;
            Json(pods).into_response()
        }
    };

    Ok(response)
}
