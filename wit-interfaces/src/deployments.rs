//! Deployment platform interface behind the apps facade

use async_trait::async_trait;
use uuid::Uuid;
use wit_api_types::apps::{
    SimpleApp, SimpleDeployment, SimpleDeploymentStatSeries, SimpleDeploymentStats, SimpleEnvironment, SimpleSpace,
};

#[derive(Debug, thiserror::Error)]
pub enum DeploymentsError {
    #[error("{resource} '{name}' not found")]
    NotFound { resource: String, name: String },

    #[error("Not authorized by the deployment platform: {0}")]
    Unauthorized(String),

    #[error("Deployment platform unavailable: {0}")]
    Unavailable(String),

    #[error("Deployment platform error: {0}")]
    Backend(String),
}

/// Time window of a stat series request, in milliseconds since the epoch
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct StatSeriesQuery {
    pub start: Option<f64>,
    pub end: Option<f64>,
    /// Maximum number of samples per series
    pub limit: Option<i64>,
}

/// Read and control operations offered by the deployment platform.
///
/// Names are the platform's own application, deployment and environment names.
#[async_trait]
pub trait DeploymentsService: Send + Sync {
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

    /// Set the desired running pod count; `None` leaves it unchanged
    async fn scale_deployment(
        &self,
        space_id: Uuid,
        app_name: &str,
        deploy_name: &str,
        pod_count: Option<i64>,
    ) -> Result<(), DeploymentsError>;

    async fn space_environments(&self, space_id: Uuid) -> Result<Vec<SimpleEnvironment>, DeploymentsError>;

    async fn environment(&self, env_name: &str) -> Result<SimpleEnvironment, DeploymentsError>;

    /// Raw pod descriptions as returned by the platform
    async fn environment_app_pods(&self, env_name: &str, app_name: &str)
        -> Result<serde_json::Value, DeploymentsError>;
}

/// Stand-in used when no deployment platform is configured
#[derive(Debug, Clone, Copy, Default)]
pub struct UnavailableDeployments;

impl UnavailableDeployments {
    fn unavailable<T>() -> Result<T, DeploymentsError> {
        Err(DeploymentsError::Unavailable(
            "no deployment platform is configured".to_string(),
        ))
    }
}

#[async_trait]
impl DeploymentsService for UnavailableDeployments {
    async fn space(&self, _space_id: Uuid) -> Result<SimpleSpace, DeploymentsError> {
        Self::unavailable()
    }

    async fn application(&self, _space_id: Uuid, _app_name: &str) -> Result<SimpleApp, DeploymentsError> {
        Self::unavailable()
    }

    async fn deployment(&self, _: Uuid, _: &str, _: &str) -> Result<SimpleDeployment, DeploymentsError> {
        Self::unavailable()
    }

    async fn deployment_stats(
        &self,
        _: Uuid,
        _: &str,
        _: &str,
        _: Option<f64>,
    ) -> Result<SimpleDeploymentStats, DeploymentsError> {
        Self::unavailable()
    }

    async fn deployment_stat_series(
        &self,
        _: Uuid,
        _: &str,
        _: &str,
        _: StatSeriesQuery,
    ) -> Result<SimpleDeploymentStatSeries, DeploymentsError> {
        Self::unavailable()
    }

    async fn scale_deployment(&self, _: Uuid, _: &str, _: &str, _: Option<i64>) -> Result<(), DeploymentsError> {
        Self::unavailable()
    }

    async fn space_environments(&self, _space_id: Uuid) -> Result<Vec<SimpleEnvironment>, DeploymentsError> {
        Self::unavailable()
    }

    async fn environment(&self, _env_name: &str) -> Result<SimpleEnvironment, DeploymentsError> {
        Self::unavailable()
    }

    async fn environment_app_pods(&self, _: &str, _: &str) -> Result<serde_json::Value, DeploymentsError> {
        Self::unavailable()
    }
}
