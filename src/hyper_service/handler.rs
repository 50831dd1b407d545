use super::{BoxError, BoxFuture, Request, Response, StdError};
use crate::router::{Params, ResolvedRoute};

use std::future::Future;

/// What the router matched for a request, handed to the [`Handler`].
#[derive(Debug, Clone)]
pub struct Matched {
    /// The pattern of the rule that matched, as registered.
    pub pattern: Box<str>,
    /// The registry key of the handler controller.
    pub key: Box<str>,
    pub params: Params,
}

impl Matched {
    pub(super) fn new<H>(route: &ResolvedRoute<'_, H>, key: &str) -> Self {
        Self {
            pattern: route.rule.pattern().into(),
            key: key.into(),
            params: route.params.clone(),
        }
    }
}

/// An executable controller for [`RouterService`](super::RouterService).
pub trait Handler {
    fn call(&self, req: Request, matched: Matched) -> BoxFuture<'static, Result<Response, BoxError>>;
}

pub type BoxHandler = Box<dyn Handler + Send + Sync>;

impl Handler for BoxHandler {
    fn call(&self, req: Request, matched: Matched) -> BoxFuture<'static, Result<Response, BoxError>> {
        Handler::call(&**self, req, matched)
    }
}

impl<F, E, Fut> Handler for F
where
    F: Fn(Request, Matched) -> Fut,
    E: StdError + Send + Sync + 'static,
    Fut: Future<Output = Result<Response, E>> + Send + 'static,
{
    fn call(&self, req: Request, matched: Matched) -> BoxFuture<'static, Result<Response, BoxError>> {
        let fut = (self)(req, matched);
        Box::pin(async move { fut.await.map_err(|e| Box::new(e) as BoxError) })
    }
}
