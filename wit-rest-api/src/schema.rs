//! Declarative route table of the `apps` facade
//!
//! [`APPS_ROUTES`] is the single source for the facade: the router, the
//! parameter validation and the documented response bodies are all derived
//! from it. Every route sits behind bearer authentication and can answer
//! 401, 404 and 500 with the JSON:API error document in addition to its
//! success response.

use std::collections::HashMap;
use std::fmt;

use axum::{
    extract::{Path, Query, State},
    http::Uri,
    middleware,
    routing::{get, put, MethodRouter},
    Router,
};
use uuid::Uuid;
use wit_web::require_authenticated;

use crate::context::AppsContext;
use crate::errors::{RestError, RestResult};
use crate::handlers::apps::dispatch;

/// Mount point of the facade below the API prefix
pub const APPS_BASE_PATH: &str = "/apps";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Put,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamType {
    Uuid,
    String,
    Number,
    Integer,
}

impl fmt::Display for ParamType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ParamType::Uuid => "UUID",
            ParamType::String => "string",
            ParamType::Number => "number",
            ParamType::Integer => "integer",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamSource {
    Path,
    Query,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParamSpec {
    pub name: &'static str,
    pub source: ParamSource,
    pub param_type: ParamType,
    pub required: bool,
}

const fn path(name: &'static str, param_type: ParamType) -> ParamSpec {
    ParamSpec {
        name,
        source: ParamSource::Path,
        param_type,
        required: true,
    }
}

const fn query(name: &'static str, param_type: ParamType) -> ParamSpec {
    ParamSpec {
        name,
        source: ParamSource::Query,
        param_type,
        required: false,
    }
}

/// Body of the 200 response
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseBody {
    /// `{"data": SimpleSpace}`
    SimpleSpace,
    /// `{"data": SimpleApp}`
    SimpleApp,
    /// `{"data": SimpleDeployment}`
    SimpleDeployment,
    /// `{"data": SimpleDeploymentStats}`
    SimpleDeploymentStats,
    /// `{"data": SimpleDeploymentStatSeries}`
    SimpleDeploymentStatSeries,
    /// `{"data": [SimpleEnvironment]}`
    SimpleEnvironmentList,
    /// `{"data": SimpleEnvironment}`
    SimpleEnvironment,
    /// Arbitrary `application/json`
    RawJson,
    Empty,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppsAction {
    ShowSpace,
    ShowSpaceApp,
    ShowSpaceAppDeployment,
    ShowDeploymentStats,
    ShowDeploymentStatSeries,
    SetDeployment,
    ShowSpaceEnvironments,
    ShowEnvironment,
    ShowEnvAppPods,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouteSpec {
    pub action: AppsAction,
    /// Operation name
    pub name: &'static str,
    pub method: HttpMethod,
    /// Path below [`APPS_BASE_PATH`], in router syntax
    pub path: &'static str,
    pub params: &'static [ParamSpec],
    pub response: ResponseBody,
}

const SPACE_ID: ParamSpec = path("spaceID", ParamType::Uuid);
const APP_NAME: ParamSpec = path("appName", ParamType::String);
const DEPLOY_NAME: ParamSpec = path("deployName", ParamType::String);
const ENV_NAME: ParamSpec = path("envName", ParamType::String);

pub static APPS_ROUTES: &[RouteSpec] = &[
    RouteSpec {
        action: AppsAction::ShowSpace,
        name: "showSpace",
        method: HttpMethod::Get,
        path: "/spaces/{spaceID}",
        params: &[SPACE_ID],
        response: ResponseBody::SimpleSpace,
    },
    RouteSpec {
        action: AppsAction::ShowSpaceApp,
        name: "showSpaceApp",
        method: HttpMethod::Get,
        path: "/spaces/{spaceID}/applications/{appName}",
        params: &[SPACE_ID, APP_NAME],
        response: ResponseBody::SimpleApp,
    },
    RouteSpec {
        action: AppsAction::ShowSpaceAppDeployment,
        name: "showSpaceAppDeployment",
        method: HttpMethod::Get,
        path: "/spaces/{spaceID}/applications/{appName}/deployments/{deployName}",
        params: &[SPACE_ID, APP_NAME, DEPLOY_NAME],
        response: ResponseBody::SimpleDeployment,
    },
    RouteSpec {
        action: AppsAction::ShowDeploymentStats,
        name: "showDeploymentStats",
        method: HttpMethod::Get,
        path: "/spaces/{spaceID}/applications/{appName}/deployments/{deployName}/stats",
        params: &[SPACE_ID, APP_NAME, DEPLOY_NAME, query("start", ParamType::Number)],
        response: ResponseBody::SimpleDeploymentStats,
    },
    RouteSpec {
        action: AppsAction::ShowDeploymentStatSeries,
        name: "showDeploymentStatSeries",
        method: HttpMethod::Get,
        path: "/spaces/{spaceID}/applications/{appName}/deployments/{deployName}/statseries",
        params: &[
            SPACE_ID,
            APP_NAME,
            DEPLOY_NAME,
            query("start", ParamType::Number),
            query("end", ParamType::Number),
            query("limit", ParamType::Integer),
        ],
        response: ResponseBody::SimpleDeploymentStatSeries,
    },
    RouteSpec {
        action: AppsAction::SetDeployment,
        name: "setDeployment",
        method: HttpMethod::Put,
        path: "/spaces/{spaceID}/applications/{appName}/deployments/{deployName}/control",
        params: &[SPACE_ID, APP_NAME, DEPLOY_NAME, query("podCount", ParamType::Integer)],
        response: ResponseBody::Empty,
    },
    RouteSpec {
        action: AppsAction::ShowSpaceEnvironments,
        name: "showSpaceEnvironments",
        method: HttpMethod::Get,
        path: "/spaces/{spaceID}/environments",
        params: &[SPACE_ID],
        response: ResponseBody::SimpleEnvironmentList,
    },
    RouteSpec {
        action: AppsAction::ShowEnvironment,
        name: "showEnvironment",
        method: HttpMethod::Get,
        path: "/environments/{envName}",
        params: &[ENV_NAME],
        response: ResponseBody::SimpleEnvironment,
    },
    RouteSpec {
        action: AppsAction::ShowEnvAppPods,
        name: "showEnvAppPods",
        method: HttpMethod::Get,
        path: "/environments/{envName}/applications/{appName}/pods",
        params: &[ENV_NAME, APP_NAME],
        response: ResponseBody::RawJson,
    },
];

/// A validated parameter value
#[derive(Debug, Clone, PartialEq)]
pub enum ParamValue {
    Uuid(Uuid),
    String(String),
    Number(f64),
    Integer(i64),
}

/// Parameters of one request, checked against its [`RouteSpec`]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppParams {
    values: HashMap<&'static str, ParamValue>,
}

impl AppParams {
    /// Validate raw path and query values. Undeclared query parameters are ignored.
    pub fn validate(
        route: &RouteSpec,
        path: &HashMap<String, String>,
        query: &HashMap<String, String>,
    ) -> RestResult<Self> {
        let mut values = HashMap::new();

        for spec in route.params {
            let raw = match spec.source {
                ParamSource::Path => path.get(spec.name),
                ParamSource::Query => query.get(spec.name),
            };

            let Some(raw) = raw else {
                if spec.required {
                    return Err(RestError::bad_parameter(format!("missing required parameter {}", spec.name)));
                }
                continue;
            };

            values.insert(spec.name, Self::parse(spec, raw)?);
        }

        Ok(Self { values })
    }

    fn parse(spec: &ParamSpec, raw: &str) -> RestResult<ParamValue> {
        let invalid = || RestError::bad_parameter(format!("{} must be a {}, got '{}'", spec.name, spec.param_type, raw));

        match spec.param_type {
            ParamType::Uuid => Uuid::parse_str(raw).map(ParamValue::Uuid).map_err(|_| invalid()),
            ParamType::String if raw.is_empty() => Err(invalid()),
            ParamType::String => Ok(ParamValue::String(raw.to_string())),
            ParamType::Number => match raw.parse::<f64>() {
                Ok(n) if n.is_finite() => Ok(ParamValue::Number(n)),
                _ => Err(invalid()),
            },
            ParamType::Integer => raw.parse::<i64>().map(ParamValue::Integer).map_err(|_| invalid()),
        }
    }

    fn missing(name: &str) -> RestError {
        RestError::InternalError(format!("parameter {} is not declared for this route", name))
    }

    pub fn uuid(&self, name: &str) -> RestResult<Uuid> {
        match self.values.get(name) {
            Some(ParamValue::Uuid(id)) => Ok(*id),
            _ => Err(Self::missing(name)),
        }
    }

    pub fn string(&self, name: &str) -> RestResult<&str> {
        match self.values.get(name) {
            Some(ParamValue::String(s)) => Ok(s),
            _ => Err(Self::missing(name)),
        }
    }

    pub fn number(&self, name: &str) -> Option<f64> {
        match self.values.get(name) {
            Some(ParamValue::Number(n)) => Some(*n),
            _ => None,
        }
    }

    pub fn integer(&self, name: &str) -> Option<i64> {
        match self.values.get(name) {
            Some(ParamValue::Integer(n)) => Some(*n),
            _ => None,
        }
    }
}

fn route_handler(route: &'static RouteSpec) -> MethodRouter<AppsContext> {
    let handler = move |State(ctx): State<AppsContext>, Path(path): Path<HashMap<String, String>>, uri: Uri| async move {
        let Query(query) = Query::<HashMap<String, String>>::try_from_uri(&uri)
            .map_err(|e| RestError::bad_parameter(e.body_text()))?;
        let params = AppParams::validate(route, &path, &query)?;
        dispatch(&ctx, route, &params).await
    };

    match route.method {
        HttpMethod::Get => get(handler),
        HttpMethod::Put => put(handler),
    }
}

/// Router for every entry of [`APPS_ROUTES`], requiring authentication
pub fn apps_router(ctx: AppsContext) -> Router {
    APPS_ROUTES
        .iter()
        .fold(Router::new(), |router, route| router.route(route.path, route_handler(route)))
        .route_layer(middleware::from_fn(require_authenticated))
        .with_state(ctx)
}
