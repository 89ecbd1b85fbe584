//! Request handler abstraction.
//!
//! Any async function taking the request and returning something that
//! implements [`IntoResponse`] is a handler. The router stores handlers
//! type-erased behind `Arc<dyn Handler>`.

use std::future::Future;

use axum::{
    body::Body,
    http::Request,
    response::{IntoResponse, Response},
};
use futures_util::future::{BoxFuture, FutureExt};

/// A callable that turns a request into a response.
pub trait Handler: Send + Sync + 'static {
    fn call(&self, req: Request<Body>) -> BoxFuture<'static, Response>;
}

impl<F, Fut, R> Handler for F
where
    F: Fn(Request<Body>) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = R> + Send + 'static,
    R: IntoResponse,
{
    fn call(&self, req: Request<Body>) -> BoxFuture<'static, Response> {
        (self)(req).map(|r| r.into_response()).boxed()
    }
}
