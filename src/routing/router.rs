//! Route registration and dispatch.
//!
//! # Responsibilities
//! - Store compiled routes in registration order
//! - Select the first route whose pattern and method both match
//! - Collect the methods of path-only matches for `405` responses
//! - Fall back to `404` when no pattern matches the path
//!
//! # Design Decisions
//! - Linear scan in registration order; first match wins
//! - Registration needs `&mut Router`, serving needs a [`RouterService`].
//!   Turning one into the other consumes the router, so every route is
//!   registered before the first request is served
//! - Path parameters travel in the request extensions, never in shared state
//! - Invalid patterns fail at registration, not on first request

use std::convert::Infallible;
use std::fmt;
use std::sync::Arc;
use std::task::{Context, Poll};

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    response::Response,
};
use futures_util::future::BoxFuture;
use tower::Service;

use crate::http::response::{allow_header, plain_error};
use crate::routing::handler::Handler;
use crate::routing::matcher::{decode_path, PathPattern, RouteError};
use crate::routing::params::Params;

/// A registered route: method, anchored pattern and handler.
pub struct Route {
    method: Method,
    pattern: PathPattern,
    handler: Arc<dyn Handler>,
}

impl Route {
    /// The method this route answers.
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// The pattern as registered, without anchors.
    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }
}

impl fmt::Debug for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Route")
            .field("method", &self.method)
            .field("pattern", &self.pattern.as_str())
            .finish()
    }
}

/// Outcome of matching a method and path against the route table.
#[derive(Debug)]
pub enum Resolution<'a> {
    /// A route matched both path and method.
    Matched { route: &'a Route, params: Params },
    /// The path matched, but only under these methods (in route order).
    MethodNotAllowed(Vec<Method>),
    /// No pattern matched the path.
    NotFound,
}

/// Methods under which the request path did match, in route order.
///
/// Present in the request extensions seen by a custom `405` handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AllowedMethods(pub Vec<Method>);

/// Response extension telling the router not to add an `Allow` header.
///
/// A custom `405` handler returns `Extension(OmitAllowHeader)` to send its
/// response without one.
#[derive(Debug, Clone, Copy, Default)]
pub struct OmitAllowHeader;

/// Regex-based request router.
#[derive(Default)]
pub struct Router {
    routes: Vec<Route>,
    not_found: Option<Arc<dyn Handler>>,
    method_not_allowed: Option<Arc<dyn Handler>>,
}

impl Router {
    /// Create an empty router with the default fallbacks.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a route for `method` on `pattern`.
    ///
    /// The pattern is a regular expression matched against the entire
    /// request path. Named groups (`(?P<id>\d+)`) become path parameters.
    pub fn add<H: Handler>(
        &mut self,
        method: Method,
        pattern: &str,
        handler: H,
    ) -> Result<&mut Self, RouteError> {
        let pattern = PathPattern::new(pattern)?;
        tracing::debug!(method = %method, pattern = %pattern.as_str(), "Route registered");
        self.routes.push(Route {
            method,
            pattern,
            handler: Arc::new(handler),
        });
        Ok(self)
    }

    /// Register a `GET` route.
    pub fn get<H: Handler>(&mut self, pattern: &str, handler: H) -> Result<&mut Self, RouteError> {
        self.add(Method::GET, pattern, handler)
    }

    /// Register a `POST` route.
    pub fn post<H: Handler>(&mut self, pattern: &str, handler: H) -> Result<&mut Self, RouteError> {
        self.add(Method::POST, pattern, handler)
    }

    /// Register a `PUT` route.
    pub fn put<H: Handler>(&mut self, pattern: &str, handler: H) -> Result<&mut Self, RouteError> {
        self.add(Method::PUT, pattern, handler)
    }

    /// Register a `PATCH` route.
    pub fn patch<H: Handler>(&mut self, pattern: &str, handler: H) -> Result<&mut Self, RouteError> {
        self.add(Method::PATCH, pattern, handler)
    }

    /// Register a `DELETE` route.
    pub fn delete<H: Handler>(&mut self, pattern: &str, handler: H) -> Result<&mut Self, RouteError> {
        self.add(Method::DELETE, pattern, handler)
    }

    /// Register a `HEAD` route.
    pub fn head<H: Handler>(&mut self, pattern: &str, handler: H) -> Result<&mut Self, RouteError> {
        self.add(Method::HEAD, pattern, handler)
    }

    /// Register an `OPTIONS` route.
    pub fn options<H: Handler>(&mut self, pattern: &str, handler: H) -> Result<&mut Self, RouteError> {
        self.add(Method::OPTIONS, pattern, handler)
    }

    /// Register a `CONNECT` route.
    pub fn connect<H: Handler>(&mut self, pattern: &str, handler: H) -> Result<&mut Self, RouteError> {
        self.add(Method::CONNECT, pattern, handler)
    }

    /// Register a `TRACE` route.
    pub fn trace<H: Handler>(&mut self, pattern: &str, handler: H) -> Result<&mut Self, RouteError> {
        self.add(Method::TRACE, pattern, handler)
    }

    /// Replace the default `404 Not Found` response.
    pub fn not_found<H: Handler>(&mut self, handler: H) -> &mut Self {
        self.not_found = Some(Arc::new(handler));
        self
    }

    /// Replace the default `405 Method Not Allowed` response.
    ///
    /// The `Allow` header is still added unless the handler sets its own
    /// or marks the response with [`OmitAllowHeader`].
    pub fn method_not_allowed<H: Handler>(&mut self, handler: H) -> &mut Self {
        self.method_not_allowed = Some(Arc::new(handler));
        self
    }

    /// Registered routes in match order.
    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    /// Select the route for `method` and an already decoded `path` without
    /// running it.
    pub fn resolve(&self, method: &Method, path: &str) -> Resolution<'_> {
        let mut allowed = Vec::new();

        for route in &self.routes {
            if route.method == *method {
                if let Some(params) = route.pattern.captures(path) {
                    return Resolution::Matched { route, params };
                }
            } else if route.pattern.is_match(path) {
                allowed.push(route.method.clone());
            }
        }

        if allowed.is_empty() {
            Resolution::NotFound
        } else {
            Resolution::MethodNotAllowed(allowed)
        }
    }

    /// Route one request to its handler or to a fallback.
    ///
    /// Routes see the percent-decoded path. A path with a malformed escape
    /// or one that does not decode to UTF-8 is answered with `400`.
    pub async fn dispatch(&self, mut req: Request<Body>) -> Response {
        let path = match decode_path(req.uri().path()) {
            Some(path) => path.into_owned(),
            None => {
                tracing::debug!(path = %req.uri().path(), "Undecodable request path");
                return plain_error(StatusCode::BAD_REQUEST);
            }
        };

        let resolution = self.resolve(req.method(), &path);

        match resolution {
            Resolution::Matched { route, params } => {
                tracing::debug!(
                    method = %req.method(),
                    path = %path,
                    pattern = %route.pattern(),
                    "Route matched"
                );
                req.extensions_mut().insert(params);
                route.handler.call(req).await
            }
            Resolution::MethodNotAllowed(allowed) => {
                tracing::debug!(
                    method = %req.method(),
                    path = %path,
                    allowed = ?allowed,
                    "Method not allowed"
                );
                let mut response = match &self.method_not_allowed {
                    Some(handler) => {
                        req.extensions_mut().insert(AllowedMethods(allowed.clone()));
                        handler.call(req).await
                    }
                    None => plain_error(StatusCode::METHOD_NOT_ALLOWED),
                };
                let skip_allow = response.headers().contains_key(header::ALLOW)
                    || response.extensions().get::<OmitAllowHeader>().is_some();
                if !skip_allow {
                    match allow_header(&allowed) {
                        Some(value) => {
                            response.headers_mut().insert(header::ALLOW, value);
                        }
                        None => tracing::warn!(allowed = ?allowed, "Could not encode Allow header"),
                    }
                }
                response
            }
            Resolution::NotFound => {
                tracing::debug!(
                    method = %req.method(),
                    path = %path,
                    "No route matched"
                );
                match &self.not_found {
                    Some(handler) => handler.call(req).await,
                    None => plain_error(StatusCode::NOT_FOUND),
                }
            }
        }
    }

    /// Freeze the route table and expose it as a `tower` service.
    pub fn into_service(self) -> RouterService {
        RouterService {
            router: Arc::new(self),
        }
    }
}

impl fmt::Debug for Router {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Router")
            .field("routes", &self.routes)
            .field("not_found", &self.not_found.is_some())
            .field("method_not_allowed", &self.method_not_allowed.is_some())
            .finish()
    }
}

/// Shared, read-only router usable wherever a `tower::Service` is expected.
#[derive(Clone, Debug)]
pub struct RouterService {
    router: Arc<Router>,
}

impl RouterService {
    /// The frozen router behind this service.
    pub fn router(&self) -> &Router {
        &self.router
    }
}

impl Service<Request<Body>> for RouterService {
    type Response = Response;
    type Error = Infallible;
    type Future = BoxFuture<'static, Result<Response, Infallible>>;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, req: Request<Body>) -> Self::Future {
        let router = self.router.clone();
        Box::pin(async move { Ok(router.dispatch(req).await) })
    }
}
