use super::{ResolvedRoute, Result, Rule, Router, RouterError};
use crate::method::{Method, MethodSet};
use crate::pattern::normalize;

impl<H> Router<H> {
    /// Resolves `path` under `method`.
    ///
    /// `path` may be a full URL; only its path component is matched.
    /// `method` is case-insensitive and must name one of the eight buckets.
    ///
    /// When nothing matches under `method` but some other bucket has a
    /// matching rule, the error is [`RouterError::MethodNotAllowed`] with the
    /// methods that would have matched. Otherwise it is
    /// [`RouterError::NotFound`].
    pub fn resolve<'s>(&'s self, path: &str, method: &str) -> Result<ResolvedRoute<'s, H>> {
        let method: Method = method.parse()?;
        self.resolve_method(path, method)
    }

    /// Same as [`resolve`](Self::resolve) with an already parsed method.
    pub fn resolve_method<'s>(&'s self, path: &str, method: Method) -> Result<ResolvedRoute<'s, H>> {
        let normalized = normalize(path);

        if let Some(route) = self.find_in(method, &normalized) {
            tracing::trace!(%method, path, pattern = %route.rule.pattern, "route resolved");
            return Ok(route);
        }

        let allowed = self.allowed_methods(&normalized, method);
        if allowed.is_empty() {
            tracing::debug!(%method, path, "no route matched");
            Err(RouterError::NotFound {
                path: path.to_owned(),
            })
        } else {
            tracing::debug!(%method, path, %allowed, "method not allowed");
            Err(RouterError::MethodNotAllowed {
                path: path.to_owned(),
                allowed,
            })
        }
    }

    fn find_in<'s>(&'s self, method: Method, normalized: &str) -> Option<ResolvedRoute<'s, H>> {
        self.bucket(method).iter().find_map(|rule| {
            let caps = rule.matcher.captures(normalized)?;
            let mut params = rule.defaults.clone();
            for var in &rule.variables {
                if let Some(m) = caps.get(var.group) {
                    params.insert(&*var.name, m.as_str());
                }
            }
            let rule: &'s Rule<H> = rule;
            Some(ResolvedRoute {
                controller: &rule.controller,
                params,
                rule,
            })
        })
    }

    /// Methods other than `except` with at least one rule matching the
    /// normalized path.
    fn allowed_methods(&self, normalized: &str, except: Method) -> MethodSet {
        Method::ALL
            .iter()
            .copied()
            .filter(|&m| m != except && self.matches_any(m, normalized))
            .collect()
    }

    /// Every method with a rule matching `path`.
    pub fn methods_for(&self, path: &str) -> MethodSet {
        let normalized = normalize(path);
        Method::ALL
            .iter()
            .copied()
            .filter(|&m| self.matches_any(m, &normalized))
            .collect()
    }

    #[inline]
    fn matches_any(&self, method: Method, normalized: &str) -> bool {
        self.bucket(method)
            .iter()
            .any(|rule| rule.matcher.is_match(normalized))
    }
}
