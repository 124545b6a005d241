mod common;

use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
};
use common::{error_code, setup, setup_with_deployments};
use mockall::mock;
use serde_json::json;
use uuid::Uuid;
use wit_api_types::apps::{
    SimpleApp, SimpleDeployment, SimpleDeploymentStatSeries, SimpleDeploymentStats, SimpleEnvironment, SimpleSpace,
    TimedNumberTuple,
};
use wit_interfaces::{DeploymentsError, DeploymentsService, StatSeriesQuery};

mock! {
    pub Deployments {}

    #[async_trait]
    impl DeploymentsService for Deployments {
        async fn space(&self, space_id: Uuid) -> Result<SimpleSpace, DeploymentsError>;
        async fn application(&self, space_id: Uuid, app_name: &str) -> Result<SimpleApp, DeploymentsError>;
        async fn deployment(
            &self,
            space_id: Uuid,
            app_name: &str,
            deploy_name: &str,
        ) -> Result<SimpleDeployment, DeploymentsError>;
        async fn deployment_stats(
            &self,
            space_id: Uuid,
            app_name: &str,
            deploy_name: &str,
            start: Option<f64>,
        ) -> Result<SimpleDeploymentStats, DeploymentsError>;
        async fn deployment_stat_series(
            &self,
            space_id: Uuid,
            app_name: &str,
            deploy_name: &str,
            query: StatSeriesQuery,
        ) -> Result<SimpleDeploymentStatSeries, DeploymentsError>;
        async fn scale_deployment(
            &self,
            space_id: Uuid,
            app_name: &str,
            deploy_name: &str,
            pod_count: Option<i64>,
        ) -> Result<(), DeploymentsError>;
        async fn space_environments(&self, space_id: Uuid) -> Result<Vec<SimpleEnvironment>, DeploymentsError>;
        async fn environment(&self, env_name: &str) -> Result<SimpleEnvironment, DeploymentsError>;
        async fn environment_app_pods(
            &self,
            env_name: &str,
            app_name: &str,
        ) -> Result<serde_json::Value, DeploymentsError>;
    }
}

fn environment(name: &str) -> SimpleEnvironment {
    SimpleEnvironment {
        id: Uuid::new_v4(),
        name: name.to_string(),
        quota: None,
    }
}

#[tokio::test]
async fn test_requires_authentication() {
    // no expectations: any backend call would panic
    let app = setup_with_deployments(Arc::new(MockDeployments::new())).await;

    let response = app.get(&format!("/api/apps/spaces/{}", Uuid::new_v4())).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(error_code(&response), "unauthorized_error");
}

#[tokio::test]
async fn test_show_space() {
    let space_id = Uuid::new_v4();
    let mut mock = MockDeployments::new();
    mock.expect_space()
        .withf(move |id| *id == space_id)
        .times(1)
        .returning(|id| {
            Ok(SimpleSpace {
                id,
                name: "demo".to_string(),
                applications: vec![],
            })
        });
    let app = setup_with_deployments(Arc::new(mock)).await;

    let response = app
        .get_as(&format!("/api/apps/spaces/{}", space_id), Uuid::new_v4())
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(
        response.body,
        json!({"data": {"id": space_id, "name": "demo", "applications": []}})
    );
}

#[tokio::test]
async fn test_malformed_space_id_never_reaches_backend() {
    let app = setup_with_deployments(Arc::new(MockDeployments::new())).await;

    let response = app.get_as("/api/apps/spaces/not-a-uuid", Uuid::new_v4()).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(error_code(&response), "bad_parameter");
    assert!(response.body["errors"][0]["detail"]
        .as_str()
        .unwrap()
        .contains("spaceID"));
}

#[tokio::test]
async fn test_stat_series_query_parameters() {
    let mut mock = MockDeployments::new();
    mock.expect_deployment_stat_series()
        .withf(|_, app_name, deploy_name, query| {
            app_name.to_string() == "web"
                && deploy_name.to_string() == "stage"
                && query.start == Some(1000.0)
                && query.end.is_none()
                && query.limit == Some(10)
        })
        .times(1)
        .returning(|_, _, _, query| {
            Ok(SimpleDeploymentStatSeries {
                start: query.start.unwrap_or_default(),
                end: 2000.0,
                memory: vec![TimedNumberTuple { time: 1500.0, value: 64.0 }],
                cores: vec![],
            })
        });
    let app = setup_with_deployments(Arc::new(mock)).await;
    let base = format!(
        "/api/apps/spaces/{}/applications/web/deployments/stage/statseries",
        Uuid::new_v4()
    );

    let response = app.get_as(&format!("{}?start=1000&limit=10", base), Uuid::new_v4()).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["start"], 1000.0);
    assert_eq!(response.body["data"]["memory"][0]["value"], 64.0);

    let bad_limit = app.get_as(&format!("{}?limit=ten", base), Uuid::new_v4()).await;
    assert_eq!(bad_limit.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_set_deployment_scales_pods() {
    let mut mock = MockDeployments::new();
    mock.expect_scale_deployment()
        .withf(|_, _, _, pod_count| *pod_count == Some(3))
        .times(1)
        .returning(|_, _, _, _| Ok(()));
    let app = setup_with_deployments(Arc::new(mock)).await;
    let user = Uuid::new_v4();
    let uri = format!(
        "/api/apps/spaces/{}/applications/web/deployments/run/control",
        Uuid::new_v4()
    );

    let request = |query: &str| {
        Request::builder()
            .method(Method::PUT)
            .uri(format!("{}?podCount={}", uri, query))
            .header(header::AUTHORIZATION, format!("Bearer {}", app.token(user)))
            .body(Body::empty())
            .unwrap()
    };

    let scaled = app.send(request("3")).await;
    assert_eq!(scaled.status, StatusCode::OK);
    assert!(scaled.body.is_null());

    let invalid = app.send(request("many")).await;
    assert_eq!(invalid.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_environments_and_pods() {
    let mut mock = MockDeployments::new();
    mock.expect_space_environments()
        .returning(|_| Ok(vec![environment("run"), environment("stage")]));
    mock.expect_environment_app_pods()
        .withf(|env_name, app_name| env_name.to_string() == "run" && app_name.to_string() == "web")
        .returning(|_, _| Ok(json!({"pods": [["Running", "2"]]})));
    let app = setup_with_deployments(Arc::new(mock)).await;
    let user = Uuid::new_v4();

    let listed = app
        .get_as(&format!("/api/apps/spaces/{}/environments", Uuid::new_v4()), user)
        .await;
    assert_eq!(listed.status, StatusCode::OK);
    let names: Vec<&str> = listed.body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|env| env["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, ["run", "stage"]);

    let pods = app.get_as("/api/apps/environments/run/applications/web/pods", user).await;
    assert_eq!(pods.status, StatusCode::OK);
    assert_eq!(pods.body, json!({"pods": [["Running", "2"]]}));
}

#[tokio::test]
async fn test_backend_errors_are_mapped() {
    let mut mock = MockDeployments::new();
    mock.expect_environment().returning(|name| {
        Err(DeploymentsError::NotFound {
            resource: "environment".to_string(),
            name: name.to_string(),
        })
    });
    mock.expect_application()
        .returning(|_, _| Err(DeploymentsError::Backend("connection reset".to_string())));
    let app = setup_with_deployments(Arc::new(mock)).await;
    let user = Uuid::new_v4();

    let missing = app.get_as("/api/apps/environments/nowhere", user).await;
    assert_eq!(missing.status, StatusCode::NOT_FOUND);

    let failed = app
        .get_as(&format!("/api/apps/spaces/{}/applications/web", Uuid::new_v4()), user)
        .await;
    assert_eq!(failed.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(failed.body["errors"][0]["detail"], "An internal error occurred");
}

#[tokio::test]
async fn test_unconfigured_platform_is_unavailable() {
    let app = setup().await;

    let response = app
        .get_as(&format!("/api/apps/spaces/{}", Uuid::new_v4()), Uuid::new_v4())
        .await;
    assert_eq!(response.status, StatusCode::SERVICE_UNAVAILABLE);
}
