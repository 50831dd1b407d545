use super::{Controller, Params, Result, Router};
use crate::codec::{ControllerRepr, HandlerRegistry};

use std::collections::BTreeMap;

use serde::Deserialize;

/// One entry of a bulk registration.
///
/// Every field is optional so a batch can be assembled from loose data;
/// [`Router::add_routes`] rejects entries without a pattern or controller.
pub struct RouteMap<H> {
    pub(super) method: Option<String>,
    pub(super) pattern: Option<String>,
    pub(super) controller: Option<Controller<H>>,
    pub(super) rules: Vec<(String, String)>,
    pub(super) defaults: Params,
}

impl<H> Default for RouteMap<H> {
    fn default() -> Self {
        Self {
            method: None,
            pattern: None,
            controller: None,
            rules: Vec::new(),
            defaults: Params::new(),
        }
    }
}

impl<H> RouteMap<H> {
    pub fn new(pattern: impl Into<String>, controller: impl Into<Controller<H>>) -> Self {
        Self::default()
            .pattern(pattern)
            .controller(controller)
    }

    /// Defaults to `GET` when unset.
    pub fn method(mut self, method: impl Into<String>) -> Self {
        self.method = Some(method.into());
        self
    }

    pub fn pattern(mut self, pattern: impl Into<String>) -> Self {
        self.pattern = Some(pattern.into());
        self
    }

    pub fn controller(mut self, controller: impl Into<Controller<H>>) -> Self {
        self.controller = Some(controller.into());
        self
    }

    pub fn rule(mut self, name: impl Into<String>, regex: impl Into<String>) -> Self {
        self.rules.push((name.into(), regex.into()));
        self
    }

    pub fn with_default(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.defaults.insert(name, value);
        self
    }
}

/// A route declared as data, e.g. in a JSON file shipped with the
/// application.
///
/// ```json
/// { "method": "post", "pattern": "/users/:id", "controller": { "name": "users#update" },
///   "rules": { "id": "\\d+" }, "defaults": { "format": "json" } }
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RouteConfig {
    pub method: Option<String>,
    pub pattern: Option<String>,
    pub controller: Option<ControllerRepr>,
    pub rules: BTreeMap<String, String>,
    pub defaults: BTreeMap<String, String>,
}

impl RouteConfig {
    /// Builds the route map, instantiating handler controllers through
    /// `registry`.
    pub fn into_route_map<H>(self, registry: &HandlerRegistry<H>) -> Result<RouteMap<H>> {
        let controller = match self.controller {
            Some(repr) => Some(registry.controller(repr)?),
            None => None,
        };
        Ok(RouteMap {
            method: self.method,
            pattern: self.pattern,
            controller,
            rules: self.rules.into_iter().collect(),
            defaults: self.defaults.into_iter().collect(),
        })
    }
}

impl<H> Router<H> {
    /// Registers a JSON array of [`RouteConfig`] entries, all or nothing.
    pub fn load_routes(&mut self, json: &str, registry: &HandlerRegistry<H>) -> Result<&mut Self> {
        let configs: Vec<RouteConfig> = serde_json::from_str(json)?;
        let maps = configs
            .into_iter()
            .map(|c| c.into_route_map(registry))
            .collect::<Result<Vec<_>>>()?;
        tracing::debug!(count = maps.len(), "loading declared routes");
        self.add_routes(maps)
    }
}
