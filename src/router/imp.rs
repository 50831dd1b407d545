use super::route_map::RouteMap;
use super::{Controller, Field, Params, Result, Rule, Router, RouterError};
use crate::method::Method;
use crate::pattern;

use std::sync::Arc;

impl<H> Router<H> {
    pub fn new() -> Self {
        Self {
            buckets: Default::default(),
        }
    }

    pub fn clear(&mut self) {
        self.buckets.iter_mut().for_each(Vec::clear);
    }

    /// Total number of entries over all buckets. A rule registered through
    /// [`all`](Self::all) counts once per method.
    pub fn len(&self) -> usize {
        self.buckets.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.iter().all(Vec::is_empty)
    }

    /// The rules of `method`, in match order.
    pub fn rules(&self, method: Method) -> impl Iterator<Item = &Rule<H>> + '_ {
        self.buckets[method.index()].iter().map(|r| &**r)
    }

    /// Compiles `pattern` and appends a rule to the bucket of `method`.
    ///
    /// `rules` overrides the group body of named variables, `defaults`
    /// pre-populates the resolved variables.
    pub fn add_route(
        &mut self,
        method: Method,
        pattern: &str,
        controller: impl Into<Controller<H>>,
        rules: &[(&str, &str)],
        defaults: &[(&str, &str)],
    ) -> Result<&mut Self> {
        let defaults: Params = defaults.iter().copied().collect();
        let rule = Self::build_rule(pattern, controller.into(), rules, defaults)?;
        self.push(method, rule);
        Ok(self)
    }

    /// Appends one shared rule to every bucket. Defaults are not supported
    /// here.
    pub fn all(
        &mut self,
        pattern: &str,
        controller: impl Into<Controller<H>>,
        rules: &[(&str, &str)],
    ) -> Result<&mut Self> {
        let rule = Arc::new(Self::build_rule(
            pattern,
            controller.into(),
            rules,
            Params::new(),
        )?);
        for bucket in self.buckets.iter_mut() {
            bucket.push(Arc::clone(&rule));
        }
        tracing::debug!(pattern, "route registered for all methods");
        Ok(self)
    }

    /// Registers a batch of route maps.
    ///
    /// Every entry is validated and compiled before anything is appended,
    /// so on error the table is unchanged.
    pub fn add_routes(&mut self, maps: Vec<RouteMap<H>>) -> Result<&mut Self> {
        let mut staged: Vec<(Method, Rule<H>)> = Vec::with_capacity(maps.len());

        for (index, map) in maps.into_iter().enumerate() {
            let pattern = map.pattern.ok_or(RouterError::MissingField {
                index,
                field: Field::Pattern,
            })?;
            let controller = map.controller.ok_or(RouterError::MissingField {
                index,
                field: Field::Controller,
            })?;
            let method = match map.method {
                Some(ref m) => m.parse::<Method>()?,
                None => Method::GET,
            };
            let rules: Vec<(&str, &str)> = map
                .rules
                .iter()
                .map(|(k, v)| (k.as_str(), v.as_str()))
                .collect();
            let rule = Self::build_rule(&pattern, controller, &rules, map.defaults)?;
            staged.push((method, rule));
        }

        for (method, rule) in staged {
            self.push(method, rule);
        }
        Ok(self)
    }
}

macro_rules! define_method {
    ($name:tt, $method:tt) => {
        #[doc = concat!("Shorthand for [`add_route`](Self::add_route) with `", stringify!($method), "`.")]
        pub fn $name(
            &mut self,
            pattern: &str,
            controller: impl Into<Controller<H>>,
        ) -> Result<&mut Self> {
            self.add_route(Method::$method, pattern, controller, &[], &[])
        }
    };
}

impl<H> Router<H> {
    define_method!(get, GET);
    define_method!(put, PUT);
    define_method!(post, POST);
    define_method!(delete, DELETE);
    define_method!(head, HEAD);
    define_method!(options, OPTIONS);
    define_method!(trace, TRACE);
    define_method!(patch, PATCH);
}

impl<H> Router<H> {
    fn build_rule(
        pattern: &str,
        controller: Controller<H>,
        rules: &[(&str, &str)],
        defaults: Params,
    ) -> Result<Rule<H>> {
        let compiled = pattern::compile(pattern, rules)?;
        Ok(Rule {
            pattern: pattern.into(),
            matcher: compiled.matcher,
            variables: compiled.variables,
            controller,
            defaults,
        })
    }

    fn push(&mut self, method: Method, rule: Rule<H>) {
        tracing::debug!(%method, pattern = %rule.pattern, "route registered");
        self.buckets[method.index()].push(Arc::new(rule));
    }

    pub(crate) fn bucket(&self, method: Method) -> &[Arc<Rule<H>>] {
        &self.buckets[method.index()]
    }

    pub(crate) fn from_buckets(buckets: [Vec<Arc<Rule<H>>>; 8]) -> Self {
        Self { buckets }
    }
}
