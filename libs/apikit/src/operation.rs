//! Type-safe operation builder that wires an axum route and its OpenAPI entry together.
//!
//! `register()` only exists once both a handler and at least one response are set,
//! so a route can't be mounted without documentation (or documented without a handler).

use axum::Router;
use axum::handler::Handler;
use axum::routing::MethodRouter;
use http::{Method, StatusCode};
use std::marker::PhantomData;

use crate::openapi::{OpenApiRegistry, ensure_schema};
use crate::problem::{APPLICATION_PROBLEM_JSON, Problem};

pub mod state {
    #[derive(Debug, Clone, Copy)]
    pub struct Missing;

    #[derive(Debug, Clone, Copy)]
    pub struct Present;
}

mod sealed {
    pub trait Sealed {}
}

pub trait HandlerSlot: sealed::Sealed {
    type Slot;
}

impl sealed::Sealed for Missing {}
impl sealed::Sealed for Present {}

impl HandlerSlot for Missing {
    type Slot = ();
}
impl HandlerSlot for Present {
    type Slot = MethodRouter;
}

pub use state::{Missing, Present};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ParamLocation {
    Path,
    Query,
}

#[derive(Clone, Debug)]
pub struct ParamSpec {
    pub name: String,
    pub location: ParamLocation,
    pub required: bool,
    pub description: Option<String>,
    /// JSON Schema type (string, integer)
    pub param_type: &'static str,
}

#[derive(Clone, Debug)]
pub struct RequestBodySpec {
    pub description: Option<String>,
    pub schema_name: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ResponseSchema {
    Ref(String),
    ArrayOf(String),
}

#[derive(Clone, Debug)]
pub struct ResponseSpec {
    pub status: u16,
    pub content_type: &'static str,
    pub description: String,
    pub schema: Option<ResponseSchema>,
}

#[derive(Clone, Debug)]
pub struct OperationSpec {
    pub method: Method,
    pub path: String,
    pub operation_id: Option<String>,
    pub summary: Option<String>,
    pub tags: Vec<String>,
    pub params: Vec<ParamSpec>,
    pub request_body: Option<RequestBodySpec>,
    pub responses: Vec<ResponseSpec>,
}

#[must_use]
pub struct OperationBuilder<H = Missing, R = Missing>
where
    H: HandlerSlot,
{
    spec: OperationSpec,
    method_router: <H as HandlerSlot>::Slot,
    _has_handler: PhantomData<H>,
    _has_response: PhantomData<R>,
}

impl OperationBuilder<Missing, Missing> {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            spec: OperationSpec {
                method,
                path: path.into(),
                operation_id: None,
                summary: None,
                tags: Vec::new(),
                params: Vec::new(),
                request_body: None,
                responses: Vec::new(),
            },
            method_router: (),
            _has_handler: PhantomData,
            _has_response: PhantomData,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::PUT, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }
}

impl<H, R> OperationBuilder<H, R>
where
    H: HandlerSlot,
{
    pub fn operation_id(mut self, id: impl Into<String>) -> Self {
        self.spec.operation_id = Some(id.into());
        self
    }

    pub fn summary(mut self, text: impl Into<String>) -> Self {
        self.spec.summary = Some(text.into());
        self
    }

    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.spec.tags.push(tag.into());
        self
    }

    /// Integer path parameter, e.g. `{id}`.
    pub fn path_param(mut self, name: impl Into<String>, description: impl Into<String>) -> Self {
        self.spec.params.push(ParamSpec {
            name: name.into(),
            location: ParamLocation::Path,
            required: true,
            description: Some(description.into()),
            param_type: "integer",
        });
        self
    }

    pub fn string_path_param(
        mut self,
        name: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        self.spec.params.push(ParamSpec {
            name: name.into(),
            location: ParamLocation::Path,
            required: true,
            description: Some(description.into()),
            param_type: "string",
        });
        self
    }

    pub fn query_param(
        mut self,
        name: impl Into<String>,
        required: bool,
        description: impl Into<String>,
    ) -> Self {
        self.spec.params.push(ParamSpec {
            name: name.into(),
            location: ParamLocation::Query,
            required,
            description: Some(description.into()),
            param_type: "string",
        });
        self
    }

    pub fn json_request<T>(
        mut self,
        registry: &dyn OpenApiRegistry,
        description: impl Into<String>,
    ) -> Self
    where
        T: utoipa::ToSchema + 'static,
    {
        let schema_name = ensure_schema::<T>(registry);
        self.spec.request_body = Some(RequestBodySpec {
            description: Some(description.into()),
            schema_name,
        });
        self
    }

    /// Problem response for a single status code.
    pub fn problem_response(
        mut self,
        registry: &dyn OpenApiRegistry,
        status: StatusCode,
        description: impl Into<String>,
    ) -> Self {
        let problem_name = ensure_schema::<Problem>(registry);
        self.spec.responses.push(ResponseSpec {
            status: status.as_u16(),
            content_type: APPLICATION_PROBLEM_JSON,
            description: description.into(),
            schema: Some(ResponseSchema::Ref(problem_name)),
        });
        self
    }

    pub fn error_400(self, registry: &dyn OpenApiRegistry) -> Self {
        self.problem_response(registry, StatusCode::BAD_REQUEST, "Bad Request")
    }

    pub fn error_404(self, registry: &dyn OpenApiRegistry) -> Self {
        self.problem_response(registry, StatusCode::NOT_FOUND, "Not Found")
    }

    pub fn error_409(self, registry: &dyn OpenApiRegistry) -> Self {
        self.problem_response(registry, StatusCode::CONFLICT, "Conflict")
    }

    pub fn error_500(self, registry: &dyn OpenApiRegistry) -> Self {
        self.problem_response(
            registry,
            StatusCode::INTERNAL_SERVER_ERROR,
            "Internal Server Error",
        )
    }
}

impl<R> OperationBuilder<Missing, R> {
    pub fn handler<F, T>(self, h: F) -> OperationBuilder<Present, R>
    where
        F: Handler<T, ()> + Clone + Send + 'static,
        T: 'static,
    {
        let method_router = match self.spec.method {
            Method::POST => axum::routing::post(h),
            Method::PUT => axum::routing::put(h),
            Method::DELETE => axum::routing::delete(h),
            _ => axum::routing::get(h),
        };

        OperationBuilder {
            spec: self.spec,
            method_router,
            _has_handler: PhantomData,
            _has_response: self._has_response,
        }
    }
}

impl<H> OperationBuilder<H, Missing>
where
    H: HandlerSlot,
{
    fn push_response(
        mut self,
        status: StatusCode,
        description: impl Into<String>,
        schema: Option<ResponseSchema>,
    ) -> OperationBuilder<H, Present> {
        self.spec.responses.push(ResponseSpec {
            status: status.as_u16(),
            content_type: "application/json",
            description: description.into(),
            schema,
        });
        OperationBuilder {
            spec: self.spec,
            method_router: self.method_router,
            _has_handler: self._has_handler,
            _has_response: PhantomData,
        }
    }

    /// Response without a body (e.g. 204).
    pub fn empty_response(
        self,
        status: StatusCode,
        description: impl Into<String>,
    ) -> OperationBuilder<H, Present> {
        self.push_response(status, description, None)
    }

    pub fn json_response_with_schema<T>(
        self,
        registry: &dyn OpenApiRegistry,
        status: StatusCode,
        description: impl Into<String>,
    ) -> OperationBuilder<H, Present>
    where
        T: utoipa::ToSchema + 'static,
    {
        let name = ensure_schema::<T>(registry);
        self.push_response(status, description, Some(ResponseSchema::Ref(name)))
    }

    pub fn json_array_response<T>(
        self,
        registry: &dyn OpenApiRegistry,
        status: StatusCode,
        description: impl Into<String>,
    ) -> OperationBuilder<H, Present>
    where
        T: utoipa::ToSchema + 'static,
    {
        let name = ensure_schema::<T>(registry);
        self.push_response(status, description, Some(ResponseSchema::ArrayOf(name)))
    }
}

impl OperationBuilder<Present, Present> {
    /// Record the operation in the registry and mount its handler on `router`.
    pub fn register(self, router: Router, openapi: &dyn OpenApiRegistry) -> Router {
        openapi.register_operation(&self.spec);
        router.route(&self.spec.path, self.method_router)
    }
}
