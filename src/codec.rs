//! Persistence of rule tables.
//!
//! A table is written as JSON:
//!
//! ```json
//! { "version": 1,
//!   "rules": [ { "pattern": "/u/:id", "matcher": "^u/([^/]*)$", "variables": [["id", 1]],
//!                "controller": { "name": "users#show" }, "defaults": [] } ],
//!   "buckets": { "GET": [0], "PUT": [], ... } }
//! ```
//!
//! `rules` holds each distinct rule once and buckets refer to it by index,
//! so a rule registered for every method stays shared after a restore.
//!
//! Executable controllers are stored as their registry key plus their
//! environment. Restoring rebuilds them with the factories of the
//! [`HandlerRegistry`] passed in; only the key and the environment are
//! portable, the code behind a key is whatever the restoring process has
//! registered under it.

use crate::method::Method;
use crate::pattern::Variable;
use crate::router::{Callable, Controller, Params, Result, Rule, Router, RouterError};

use std::collections::{BTreeMap, HashMap};
use std::io;
use std::sync::Arc;

use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;

const FORMAT_VERSION: u32 = 1;

/// Portable form of a [`Controller`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ControllerRepr {
    /// Accepted on input as shorthand for `{"name": ...}`.
    Bare(String),
    Name {
        name: String,
    },
    Handler {
        handler: String,
        #[serde(default)]
        env: Value,
    },
}

type Factory<H> = Box<dyn Fn(&Value) -> H + Send + Sync>;

/// Maps handler keys to factories that build an executable from its
/// environment.
pub struct HandlerRegistry<H> {
    factories: HashMap<String, Factory<H>>,
}

impl<H> Default for HandlerRegistry<H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H> HandlerRegistry<H> {
    pub fn new() -> Self {
        Self {
            factories: HashMap::new(),
        }
    }

    /// Registers `factory` under `key`, replacing any previous one.
    pub fn register<F>(&mut self, key: impl Into<String>, factory: F) -> &mut Self
    where
        F: Fn(&Value) -> H + Send + Sync + 'static,
    {
        let key = key.into();
        if self.factories.insert(key.clone(), Box::new(factory)).is_some() {
            tracing::debug!(%key, "handler factory replaced");
        }
        self
    }

    pub fn contains(&self, key: &str) -> bool {
        self.factories.contains_key(key)
    }

    /// Builds an executable controller for `key` closed over `env`.
    pub fn handler(&self, key: &str, env: Value) -> Result<Controller<H>> {
        let factory = self
            .factories
            .get(key)
            .ok_or_else(|| RouterError::UnregisteredHandler {
                key: key.to_owned(),
            })?;
        let inner = factory(&env);
        Ok(Controller::Handler(Callable::new(key, env, inner)))
    }

    pub fn controller(&self, repr: ControllerRepr) -> Result<Controller<H>> {
        match repr {
            ControllerRepr::Bare(name) | ControllerRepr::Name { name } => {
                Ok(Controller::Name(name))
            }
            ControllerRepr::Handler { handler, env } => self.handler(&handler, env),
        }
    }
}

impl ControllerRepr {
    pub fn of<H>(controller: &Controller<H>) -> Self {
        match controller {
            Controller::Name(name) => Self::Name { name: name.clone() },
            Controller::Handler(c) => Self::Handler {
                handler: c.key().to_owned(),
                env: c.env().clone(),
            },
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct TableRepr {
    version: u32,
    rules: Vec<RuleRepr>,
    buckets: BTreeMap<Method, Vec<usize>>,
}

#[derive(Debug, Serialize, Deserialize)]
struct RuleRepr {
    pattern: String,
    matcher: String,
    variables: Vec<(String, usize)>,
    controller: ControllerRepr,
    defaults: Vec<(String, String)>,
}

impl<H> Router<H> {
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.to_repr())?)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.to_repr())?)
    }

    pub fn to_writer<W: io::Write>(&self, writer: W) -> Result<()> {
        Ok(serde_json::to_writer(writer, &self.to_repr())?)
    }

    pub fn from_json(json: &str, registry: &HandlerRegistry<H>) -> Result<Self> {
        let repr: TableRepr = serde_json::from_str(json)?;
        Self::from_repr(repr, registry)
    }

    pub fn from_reader<R: io::Read>(reader: R, registry: &HandlerRegistry<H>) -> Result<Self> {
        let repr: TableRepr = serde_json::from_reader(reader)?;
        Self::from_repr(repr, registry)
    }

    /// Replaces the whole table with the one stored in `json`.
    ///
    /// On error the current table is left untouched.
    pub fn restore_json(&mut self, json: &str, registry: &HandlerRegistry<H>) -> Result<()> {
        *self = Self::from_json(json, registry)?;
        Ok(())
    }

    fn to_repr(&self) -> TableRepr {
        let mut index: HashMap<*const Rule<H>, usize> = HashMap::new();
        let mut rules: Vec<RuleRepr> = Vec::new();
        let mut buckets: BTreeMap<Method, Vec<usize>> = BTreeMap::new();

        for &method in Method::ALL.iter() {
            let ids = self
                .bucket(method)
                .iter()
                .map(|rule| {
                    *index.entry(Arc::as_ptr(rule)).or_insert_with(|| {
                        rules.push(rule_to_repr(rule));
                        rules.len() - 1
                    })
                })
                .collect();
            buckets.insert(method, ids);
        }

        tracing::info!(rules = rules.len(), entries = self.len(), "rule table saved");

        TableRepr {
            version: FORMAT_VERSION,
            rules,
            buckets,
        }
    }

    fn from_repr(repr: TableRepr, registry: &HandlerRegistry<H>) -> Result<Self> {
        if repr.version != FORMAT_VERSION {
            return Err(RouterError::CorruptTable("unsupported format version"));
        }

        let rules = repr
            .rules
            .into_iter()
            .map(|r| rule_from_repr(r, registry).map(Arc::new))
            .collect::<Result<Vec<_>>>()?;

        let mut buckets: [Vec<Arc<Rule<H>>>; 8] = Default::default();
        for (method, ids) in repr.buckets {
            let bucket = &mut buckets[method.index()];
            for id in ids {
                let rule = rules
                    .get(id)
                    .ok_or(RouterError::CorruptTable("rule index out of range"))?;
                bucket.push(Arc::clone(rule));
            }
        }

        let router = Self::from_buckets(buckets);
        tracing::info!(rules = rules.len(), entries = router.len(), "rule table restored");
        Ok(router)
    }
}

fn rule_to_repr<H>(rule: &Rule<H>) -> RuleRepr {
    RuleRepr {
        pattern: rule.pattern().to_owned(),
        matcher: rule.matcher().as_str().to_owned(),
        variables: rule
            .variables()
            .iter()
            .map(|v| (v.name.to_string(), v.group))
            .collect(),
        controller: ControllerRepr::of(rule.controller()),
        defaults: rule.defaults().to_vec(),
    }
}

fn rule_from_repr<H>(repr: RuleRepr, registry: &HandlerRegistry<H>) -> Result<Rule<H>> {
    let matcher = Regex::new(&repr.matcher).map_err(|source| RouterError::Pattern {
        pattern: repr.pattern.clone(),
        source,
    })?;

    let groups = matcher.captures_len();
    let variables = repr
        .variables
        .into_iter()
        .map(|(name, group)| {
            if group == 0 || group >= groups {
                return Err(RouterError::CorruptTable("variable group out of range"));
            }
            Ok(Variable {
                name: name.into(),
                group,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    let controller = registry.controller(repr.controller)?;
    let defaults: Params = repr.defaults.into_iter().collect();

    Ok(Rule::from_parts(
        repr.pattern.into(),
        matcher,
        variables,
        controller,
        defaults,
    ))
}
