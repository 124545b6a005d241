//! Payloads of the apps facade over the deployment platform
//!
//! Spaces contain applications, an application is a pipeline of deployments
//! (one per environment stage), and environments carry resource quotas.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// `{"data": T}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonSingle<T> {
    pub data: T,
}

impl<T> JsonSingle<T> {
    pub fn new(data: T) -> Self {
        Self { data }
    }
}

/// `{"data": [T]}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonList<T> {
    pub data: Vec<T>,
}

impl<T> JsonList<T> {
    pub fn new(data: Vec<T>) -> Self {
        Self { data }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimpleSpace {
    pub id: Uuid,
    pub name: String,
    pub applications: Vec<SimpleApp>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimpleApp {
    pub id: Uuid,
    pub name: String,
    pub pipeline: Vec<SimpleDeployment>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimpleDeployment {
    pub id: Uuid,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pods: Option<PodStats>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimpleEnvironment {
    pub id: Uuid,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quota: Option<EnvStats>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct EnvStats {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cpucores: Option<EnvStatCores>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub memory: Option<EnvStatMemory>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnvStatCores {
    pub used: f64,
    pub quota: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnvStatMemory {
    pub used: f64,
    pub quota: f64,
    pub units: String,
}

/// Pod counts of a deployment by phase
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PodStats {
    pub starting: i64,
    pub running: i64,
    pub stopping: i64,
    pub total: i64,
}

/// A sample: `time` in milliseconds since the epoch
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimedNumberTuple {
    pub time: f64,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimpleDeploymentStats {
    pub cores: TimedNumberTuple,
    pub memory: TimedNumberTuple,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimpleDeploymentStatSeries {
    pub start: f64,
    pub end: f64,
    pub memory: Vec<TimedNumberTuple>,
    pub cores: Vec<TimedNumberTuple>,
}

/// Wrapper around a raw pod description from the platform
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimplePod {
    pub pod: serde_json::Value,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_single_wraps_data() {
        let env = SimpleEnvironment {
            id: Uuid::nil(),
            name: "stage".to_string(),
            quota: Some(EnvStats {
                cpucores: Some(EnvStatCores { used: 0.5, quota: 2.0 }),
                memory: None,
            }),
        };
        let value = serde_json::to_value(JsonSingle::new(env)).unwrap();
        assert_eq!(value["data"]["name"], "stage");
        assert_eq!(value["data"]["quota"]["cpucores"], json!({"used": 0.5, "quota": 2.0}));
        assert!(value["data"]["quota"].get("memory").is_none());
    }

    #[test]
    fn test_space_requires_applications() {
        let missing = json!({"id": Uuid::nil(), "name": "s"});
        assert!(serde_json::from_value::<SimpleSpace>(missing).is_err());
    }
}
