mod controller;
mod core;
mod error;
mod imp;
mod params;
mod route_map;

pub use self::controller::{Callable, Controller};
pub use self::error::{Field, Result, RouterError};
pub use self::params::Params;
pub use self::route_map::{RouteConfig, RouteMap};

use crate::method::Method;
use crate::pattern::Variable;

use std::sync::Arc;

use regex::Regex;

/// An ordered rule table with one bucket per [`Method`].
///
/// Rules are tried in registration order and the first one whose matcher
/// accepts the path wins. There is no specificity scoring: registration
/// order is the only tie-break.
pub struct Router<H> {
    buckets: [Vec<Arc<Rule<H>>>; 8],
}

/// One compiled registration.
pub struct Rule<H> {
    pattern: Box<str>,
    matcher: Regex,
    variables: Vec<Variable>,
    controller: Controller<H>,
    defaults: Params,
}

/// A successful resolution.
pub struct ResolvedRoute<'a, H> {
    pub controller: &'a Controller<H>,
    pub params: Params,
    pub rule: &'a Rule<H>,
}

impl<H> Rule<H> {
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn matcher(&self) -> &Regex {
        &self.matcher
    }

    pub fn variable_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.variables.iter().map(|v| &*v.name)
    }

    pub fn controller(&self) -> &Controller<H> {
        &self.controller
    }

    pub fn defaults(&self) -> &Params {
        &self.defaults
    }

    pub(crate) fn variables(&self) -> &[Variable] {
        &self.variables
    }

    pub(crate) fn from_parts(
        pattern: Box<str>,
        matcher: Regex,
        variables: Vec<Variable>,
        controller: Controller<H>,
        defaults: Params,
    ) -> Self {
        Self {
            pattern,
            matcher,
            variables,
            controller,
            defaults,
        }
    }
}

impl<H> std::fmt::Debug for Rule<H> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Rule")
            .field("pattern", &self.pattern)
            .field("matcher", &self.matcher.as_str())
            .field("variables", &self.variables)
            .field("controller", &self.controller)
            .field("defaults", &self.defaults)
            .finish()
    }
}

impl<H> std::fmt::Debug for ResolvedRoute<'_, H> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResolvedRoute")
            .field("controller", self.controller)
            .field("params", &self.params)
            .field("pattern", &self.rule.pattern)
            .finish()
    }
}

impl<H> std::fmt::Debug for Router<H> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut map = f.debug_map();
        for m in Method::ALL.iter() {
            map.entry(m, &self.buckets[m.index()]);
        }
        map.finish()
    }
}

impl<H> Default for Router<H> {
    fn default() -> Self {
        Self::new()
    }
}
