use super::handler::{BoxHandler, Handler, Matched};
use super::{BoxError, BoxFuture, Request, Response};
use crate::router::{Controller, Router, RouterError};

use std::sync::Arc;
use std::task::{Context, Poll};

use http::header::ALLOW;
use http::StatusCode;
use hyper::service::Service;
use hyper::Body;

/// A hyper service dispatching requests through a shared [`Router`].
///
/// Handler controllers are invoked with the [`Matched`] route. Resolution
/// failures become `404`, `405` (with `Allow`) or `400` responses. A
/// [`Controller::Name`] has nothing to execute and yields `500`.
pub struct RouterService<H = BoxHandler> {
    router: Arc<Router<H>>,
}

impl<H> Clone for RouterService<H> {
    fn clone(&self) -> Self {
        Self {
            router: Arc::clone(&self.router),
        }
    }
}

impl<H> RouterService<H> {
    pub fn new(router: Router<H>) -> Self {
        Self::from_shared(Arc::new(router))
    }

    pub fn from_shared(router: Arc<Router<H>>) -> Self {
        Self { router }
    }

    pub fn router(&self) -> &Router<H> {
        &self.router
    }
}

impl Service<Request> for RouterService<BoxHandler> {
    type Response = Response;
    type Error = BoxError;
    type Future = BoxFuture<'static, Result<Response, BoxError>>;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, req: Request) -> Self::Future {
        let path = req.uri().path().to_owned();

        let route = match self.router.resolve_http(req.method(), req.uri()) {
            Ok(route) => route,
            Err(e) => {
                let res = error_response(&e);
                return Box::pin(async move { res });
            }
        };

        match route.controller {
            Controller::Handler(h) => {
                let matched = Matched::new(&route, h.key());
                tracing::trace!(path = %path, pattern = %matched.pattern, handler = %matched.key, "dispatching");
                let fut = Handler::call(h.inner(), req, matched);
                Box::pin(async move {
                    let ret = fut.await;
                    if let Err(ref e) = ret {
                        tracing::error!(path = %path, error = %e, "handler failed");
                    }
                    ret
                })
            }
            Controller::Name(name) => {
                tracing::error!(path = %path, controller = %name, "controller has no handler");
                let res = status_response(StatusCode::INTERNAL_SERVER_ERROR);
                Box::pin(async move { res })
            }
        }
    }
}

fn error_response(e: &RouterError) -> Result<Response, BoxError> {
    let mut builder = hyper::Response::builder().status(e.status_code());
    if let Some(allow) = e.allow_header() {
        builder = builder.header(ALLOW, allow);
    }
    builder
        .body(Body::from(e.to_string()))
        .map_err(|e| Box::new(e) as BoxError)
}

fn status_response(status: StatusCode) -> Result<Response, BoxError> {
    hyper::Response::builder()
        .status(status)
        .body(Body::empty())
        .map_err(|e| Box::new(e) as BoxError)
}
