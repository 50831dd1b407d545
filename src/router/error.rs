use crate::method::MethodSet;

use std::fmt;

/// A required field of a [`RouteMap`](super::RouteMap).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Pattern,
    Controller,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Field::Pattern => f.write_str("pattern"),
            Field::Controller => f.write_str("controller"),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum RouterError {
    #[error("invalid pattern {pattern:?}: {source}")]
    Pattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("route map #{index} is missing `{field}`")]
    MissingField { index: usize, field: Field },

    #[error("invalid method: {method:?}")]
    InvalidMethod { method: String },

    #[error("method not allowed for {path:?}, allowed: {allowed}")]
    MethodNotAllowed { path: String, allowed: MethodSet },

    #[error("no route matched {path:?}")]
    NotFound { path: String },

    #[error("no handler registered under key {key:?}")]
    UnregisteredHandler { key: String },

    #[error("corrupt rule table: {0}")]
    CorruptTable(&'static str),

    #[error("rule table codec error: {0}")]
    Codec(#[from] serde_json::Error),
}

pub type Result<T, E = RouterError> = std::result::Result<T, E>;
