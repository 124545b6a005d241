//! Handler dependencies, grouped per endpoint family

use std::sync::Arc;

use wit_config::CacheControlConfig;
use wit_interfaces::{DeploymentsService, TransactionManager};

/// `Cache-Control` values per resource kind
#[derive(Debug, Clone, PartialEq)]
pub struct CacheControlPolicy {
    work_item_type: String,
    work_item_types: String,
}

impl CacheControlPolicy {
    pub fn new(work_item_type: impl Into<String>, work_item_types: impl Into<String>) -> Self {
        Self {
            work_item_type: work_item_type.into(),
            work_item_types: work_item_types.into(),
        }
    }

    /// For a single work item type
    pub fn work_item_type(&self) -> &str {
        &self.work_item_type
    }

    /// For lists of work item types
    pub fn work_item_types(&self) -> &str {
        &self.work_item_types
    }
}

impl Default for CacheControlPolicy {
    fn default() -> Self {
        Self::from(&CacheControlConfig::default())
    }
}

impl From<&CacheControlConfig> for CacheControlPolicy {
    fn from(config: &CacheControlConfig) -> Self {
        Self::new(config.work_item_type.clone(), config.work_item_types.clone())
    }
}

#[derive(Clone)]
pub struct WorkItemTypesContext {
    pub db: Arc<dyn TransactionManager>,
    pub cache_control: Arc<CacheControlPolicy>,
    /// Path prefix used when building links and `Location`
    pub api_prefix: String,
}

impl WorkItemTypesContext {
    pub fn new(db: Arc<dyn TransactionManager>, cache_control: CacheControlPolicy, api_prefix: impl Into<String>) -> Self {
        Self {
            db,
            cache_control: Arc::new(cache_control),
            api_prefix: api_prefix.into(),
        }
    }
}

#[derive(Clone)]
pub struct AppsContext {
    pub deployments: Arc<dyn DeploymentsService>,
}

impl AppsContext {
    pub fn new(deployments: Arc<dyn DeploymentsService>) -> Self {
        Self { deployments }
    }
}
