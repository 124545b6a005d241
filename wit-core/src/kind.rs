//! Field kinds

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// The closed set of kind tags a field type can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Kind {
    String,
    Integer,
    Float,
    Instant,
    Duration,
    Url,
    WorkItem,
    User,
    Enum,
    List,
    Markup,
    Iteration,
    Area,
    Label,
    Boolean,
    Codebase,
}

impl Kind {
    /// Get the wire representation of the kind
    pub fn as_str(&self) -> &'static str {
        match self {
            Kind::String => "string",
            Kind::Integer => "integer",
            Kind::Float => "float",
            Kind::Instant => "instant",
            Kind::Duration => "duration",
            Kind::Url => "url",
            Kind::WorkItem => "workitem",
            Kind::User => "user",
            Kind::Enum => "enum",
            Kind::List => "list",
            Kind::Markup => "markup",
            Kind::Iteration => "iteration",
            Kind::Area => "area",
            Kind::Label => "label",
            Kind::Boolean => "boolean",
            Kind::Codebase => "codebase",
        }
    }

    /// Every kind except the two container kinds is simple.
    pub fn is_simple(&self) -> bool {
        !matches!(self, Kind::Enum | Kind::List)
    }

    /// Get all kinds
    pub fn all() -> &'static [Kind] {
        &[
            Kind::String,
            Kind::Integer,
            Kind::Float,
            Kind::Instant,
            Kind::Duration,
            Kind::Url,
            Kind::WorkItem,
            Kind::User,
            Kind::Enum,
            Kind::List,
            Kind::Markup,
            Kind::Iteration,
            Kind::Area,
            Kind::Label,
            Kind::Boolean,
            Kind::Codebase,
        ]
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Kind {
    type Err = ParseKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Kind::all()
            .iter()
            .copied()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| ParseKindError(s.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown kind '{0}'")]
pub struct ParseKindError(pub String);
