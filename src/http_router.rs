#![forbid(unsafe_code)]

//! Interop with the `http` crate.

use crate::method::Method;
use crate::router::{Result, ResolvedRoute, Router, RouterError};

use http::header::HeaderValue;
use http::StatusCode;

impl TryFrom<&http::Method> for Method {
    type Error = RouterError;

    fn try_from(method: &http::Method) -> Result<Self> {
        method.as_str().parse()
    }
}

impl From<Method> for http::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::GET => http::Method::GET,
            Method::PUT => http::Method::PUT,
            Method::POST => http::Method::POST,
            Method::DELETE => http::Method::DELETE,
            Method::HEAD => http::Method::HEAD,
            Method::OPTIONS => http::Method::OPTIONS,
            Method::TRACE => http::Method::TRACE,
            Method::PATCH => http::Method::PATCH,
        }
    }
}

impl RouterError {
    /// The response status this error maps to.
    pub fn status_code(&self) -> StatusCode {
        match self {
            RouterError::NotFound { .. } => StatusCode::NOT_FOUND,
            RouterError::MethodNotAllowed { .. } => StatusCode::METHOD_NOT_ALLOWED,
            RouterError::InvalidMethod { .. } => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// The `Allow` header for a 405 response.
    pub fn allow_header(&self) -> Option<HeaderValue> {
        match self {
            RouterError::MethodNotAllowed { allowed, .. } => {
                HeaderValue::from_str(&allowed.to_string()).ok()
            }
            _ => None,
        }
    }
}

impl<H> Router<H> {
    /// Resolves the path of `uri` under an `http` method.
    pub fn resolve_http<'s>(
        &'s self,
        method: &http::Method,
        uri: &http::Uri,
    ) -> Result<ResolvedRoute<'s, H>> {
        let method = Method::try_from(method)?;
        self.resolve_method(uri.path(), method)
    }
}
