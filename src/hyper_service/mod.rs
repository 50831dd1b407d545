#![forbid(unsafe_code)]

//! A hyper [`Service`](hyper::service::Service) on top of a [`Router`](crate::Router)
//! whose handler controllers are [`BoxHandler`]s.

mod handler;
mod service;

pub use self::handler::{BoxHandler, Handler, Matched};
pub use self::service::RouterService;

use std::error::Error as StdError;
use std::future::Future;
use std::pin::Pin;

type Request = hyper::Request<hyper::Body>;
type Response = hyper::Response<hyper::Body>;

type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;
type BoxError = Box<dyn StdError + Send + Sync>;
