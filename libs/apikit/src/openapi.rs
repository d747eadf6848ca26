//! OpenAPI registry for operations and component schemas.
//!
//! Modules register their routes through [`crate::operation::OperationBuilder`], which
//! records an [`OperationSpec`] here. The host calls [`OpenApiRegistryImpl::build_openapi`]
//! once all modules are wired and serves the result as JSON.

use arc_swap::ArcSwap;
use dashmap::DashMap;
use std::collections::HashMap;
use std::sync::Arc;
use utoipa::openapi::{
    OpenApi, OpenApiBuilder, Ref, RefOr, Required,
    content::ContentBuilder,
    info::InfoBuilder,
    path::{HttpMethod, OperationBuilder as UOperationBuilder, ParameterBuilder, ParameterIn},
    path::{PathItemBuilder, PathsBuilder},
    request_body::RequestBodyBuilder,
    response::{ResponseBuilder, ResponsesBuilder},
    schema::{ArrayBuilder, ComponentsBuilder, ObjectBuilder, Schema, SchemaType, Type},
};

use crate::operation::{OperationSpec, ParamLocation, ResponseSchema};

type SchemaCollection = Vec<(String, RefOr<Schema>)>;

/// OpenAPI document metadata
#[derive(Debug, Clone)]
pub struct OpenApiInfo {
    pub title: String,
    pub version: String,
    pub description: Option<String>,
}

impl Default for OpenApiInfo {
    fn default() -> Self {
        Self {
            title: "Northwind API".to_owned(),
            version: env!("CARGO_PKG_VERSION").to_owned(),
            description: None,
        }
    }
}

pub trait OpenApiRegistry: Send + Sync {
    fn register_operation(&self, spec: &OperationSpec);

    /// Insert `schemas` under components and return the component name for `$ref`.
    fn ensure_schema_raw(&self, name: &str, schemas: SchemaCollection) -> String;
}

/// Register `T` and everything it references; returns the component name.
pub fn ensure_schema<T: utoipa::ToSchema + 'static>(registry: &dyn OpenApiRegistry) -> String {
    use utoipa::PartialSchema;

    let root_name = T::name().to_string();
    let mut collected: SchemaCollection = vec![(root_name.clone(), <T as PartialSchema>::schema())];
    T::schemas(&mut collected);
    registry.ensure_schema_raw(&root_name, collected)
}

#[derive(Default)]
pub struct OpenApiRegistryImpl {
    /// Keyed by "METHOD:path"
    operation_specs: DashMap<String, OperationSpec>,
    components_registry: ArcSwap<HashMap<String, RefOr<Schema>>>,
}

impl OpenApiRegistryImpl {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn operation_count(&self) -> usize {
        self.operation_specs.len()
    }

    #[must_use]
    pub fn build_openapi(&self, info: &OpenApiInfo) -> OpenApi {
        tracing::info!(
            operations = self.operation_specs.len(),
            "Building OpenAPI document"
        );

        let mut paths = PathsBuilder::new();
        for entry in &self.operation_specs {
            let spec = entry.value();
            let item = PathItemBuilder::new()
                .operation(http_method(&spec.method), build_operation(spec))
                .build();
            paths = paths.path(spec.path.clone(), item);
        }

        let mut components = ComponentsBuilder::new();
        for (name, schema) in self.components_registry.load().iter() {
            components = components.schema(name.clone(), schema.clone());
        }

        let openapi_info = InfoBuilder::new()
            .title(&info.title)
            .version(&info.version)
            .description(info.description.clone())
            .build();

        OpenApiBuilder::new()
            .info(openapi_info)
            .paths(paths.build())
            .components(Some(components.build()))
            .build()
    }
}

impl OpenApiRegistry for OpenApiRegistryImpl {
    fn register_operation(&self, spec: &OperationSpec) {
        let operation_key = format!("{}:{}", spec.method.as_str(), spec.path);
        tracing::debug!(
            method = %spec.method.as_str(),
            path = %spec.path,
            operation_key = %operation_key,
            "Registered API operation"
        );
        self.operation_specs.insert(operation_key, spec.clone());
    }

    fn ensure_schema_raw(&self, root_name: &str, schemas: SchemaCollection) -> String {
        let current = self.components_registry.load();
        let mut reg = (**current).clone();
        for (name, schema) in schemas {
            reg.insert(name, schema);
        }
        self.components_registry.store(Arc::new(reg));
        root_name.to_owned()
    }
}

fn http_method(method: &http::Method) -> HttpMethod {
    match *method {
        http::Method::POST => HttpMethod::Post,
        http::Method::PUT => HttpMethod::Put,
        http::Method::DELETE => HttpMethod::Delete,
        http::Method::PATCH => HttpMethod::Patch,
        _ => HttpMethod::Get,
    }
}

fn schema_ref(name: &str) -> RefOr<Schema> {
    RefOr::Ref(Ref::from_schema_name(name))
}

fn build_operation(spec: &OperationSpec) -> utoipa::openapi::path::Operation {
    let mut op = UOperationBuilder::new()
        .operation_id(spec.operation_id.clone())
        .summary(spec.summary.clone());

    for tag in &spec.tags {
        op = op.tag(tag.clone());
    }

    for p in &spec.params {
        let (in_, required) = match p.location {
            ParamLocation::Path => (ParameterIn::Path, Required::True),
            ParamLocation::Query if p.required => (ParameterIn::Query, Required::True),
            ParamLocation::Query => (ParameterIn::Query, Required::False),
        };
        let schema_type = match p.param_type {
            "integer" => SchemaType::Type(Type::Integer),
            _ => SchemaType::Type(Type::String),
        };
        let param = ParameterBuilder::new()
            .name(&p.name)
            .parameter_in(in_)
            .required(required)
            .description(p.description.clone())
            .schema(Some(Schema::Object(
                ObjectBuilder::new().schema_type(schema_type).build(),
            )))
            .build();
        op = op.parameter(param);
    }

    if let Some(rb) = &spec.request_body {
        let content = ContentBuilder::new()
            .schema(Some(schema_ref(&rb.schema_name)))
            .build();
        let body = RequestBodyBuilder::new()
            .description(rb.description.clone())
            .content("application/json", content)
            .required(Some(Required::True))
            .build();
        op = op.request_body(Some(body));
    }

    let mut responses = ResponsesBuilder::new();
    for r in &spec.responses {
        let mut resp = ResponseBuilder::new().description(&r.description);
        if let Some(schema) = &r.schema {
            let schema = match schema {
                ResponseSchema::Ref(name) => schema_ref(name),
                ResponseSchema::ArrayOf(name) => RefOr::T(Schema::Array(
                    ArrayBuilder::new().items(schema_ref(name)).build(),
                )),
            };
            resp = resp.content(
                r.content_type,
                ContentBuilder::new().schema(Some(schema)).build(),
            );
        }
        responses = responses.response(r.status.to_string(), resp.build());
    }

    op.responses(responses.build()).build()
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use crate::problem::Problem;

    #[test]
    fn ensure_schema_registers_component_once() {
        let registry = OpenApiRegistryImpl::new();
        let a = ensure_schema::<Problem>(&registry);
        let b = ensure_schema::<Problem>(&registry);
        assert_eq!(a, "Problem");
        assert_eq!(a, b);

        let doc = registry.build_openapi(&OpenApiInfo::default());
        let json = serde_json::to_value(&doc).unwrap();
        assert!(json["components"]["schemas"]["Problem"].is_object());
    }
}
