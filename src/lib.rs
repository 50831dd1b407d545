//! An ordered, first-match-wins path router.
//!
//! Patterns use a small segment language (`:name`, `:`, `*`, `*name` and the
//! escaped forms `\:…`, `\*…`) compiled to anchored regular expressions.
//! Rules live in one bucket per HTTP method and are tried in registration
//! order; the first match wins. A path that matches only under other methods
//! is reported as [`RouterError::MethodNotAllowed`] rather than
//! [`RouterError::NotFound`].
//!
//! The rule table does no internal locking. Register everything first, then
//! share the finished [`Router`] for read-only resolution. Override regexes
//! are compiled as given; callers that take them from untrusted input own
//! the cost of matching them.

#![forbid(unsafe_code)]

mod codec;
mod method;
pub mod pattern;
mod router;
mod router_macro;

#[cfg(feature = "http-router")]
mod http_router;

#[cfg(feature = "hyper-service")]
mod hyper_service;

pub use crate::codec::{ControllerRepr, HandlerRegistry};
pub use crate::method::{Method, MethodSet};
pub use crate::router::{
    Callable, Controller, Field, Params, ResolvedRoute, Result, RouteConfig, RouteMap, Router,
    RouterError, Rule,
};

#[cfg(feature = "hyper-service")]
pub use crate::hyper_service::{BoxHandler, Handler, Matched, RouterService};
