//! Builds GraphQL documents and their variables out of plain data structures.
//!
//! ```rust
//! use gql_query_builder::{query, BuilderConfig, OperationRequest};
//!
//! let document = query(
//!   OperationRequest::new("thought").variable("id", 1).fields(["id", "name"]),
//!   &BuilderConfig::default(),
//! );
//!
//! assert_eq!(document.query, "query ($id: Int) { thought (id: $id) { id, name } }");
//! ```

pub mod appsync;
pub mod config;
pub mod document;
pub mod fields;
pub mod json;
pub mod operation;
pub mod variables;

use tracing::instrument;

pub use appsync::AppSyncRenderer;
pub use config::BuilderConfig;
pub use document::{DefaultRenderer, DocumentRenderer, OperationKind, RenderedDocument};
pub use json::ParseOperationError;
pub use operation::{
  Field, ListKind, NestedOperation, OperationName, OperationRequest, Operations,
  VariableDescriptor, VariableSet,
};

pub fn query(operations: impl Into<Operations>, config: &BuilderConfig) -> RenderedDocument {
  query_with(operations, &DefaultRenderer, config)
}

pub fn query_with<R>(
  operations: impl Into<Operations>,
  renderer: &R,
  config: &BuilderConfig,
) -> RenderedDocument
where
  R: DocumentRenderer + ?Sized,
{
  render(OperationKind::Query, operations.into(), renderer, config)
}

pub fn mutation(operations: impl Into<Operations>, config: &BuilderConfig) -> RenderedDocument {
  mutation_with(operations, &DefaultRenderer, config)
}

pub fn mutation_with<R>(
  operations: impl Into<Operations>,
  renderer: &R,
  config: &BuilderConfig,
) -> RenderedDocument
where
  R: DocumentRenderer + ?Sized,
{
  render(OperationKind::Mutation, operations.into(), renderer, config)
}

pub fn subscription(operations: impl Into<Operations>) -> RenderedDocument {
  subscription_with(operations, &DefaultRenderer)
}

pub fn subscription_with<R>(operations: impl Into<Operations>, renderer: &R) -> RenderedDocument
where
  R: DocumentRenderer + ?Sized,
{
  render(
    OperationKind::Subscription,
    operations.into(),
    renderer,
    &BuilderConfig::default(),
  )
}

#[instrument(level = "debug", skip_all, fields(kind = %kind))]
fn render<R>(
  kind: OperationKind,
  operations: Operations,
  renderer: &R,
  config: &BuilderConfig,
) -> RenderedDocument
where
  R: DocumentRenderer + ?Sized,
{
  match &operations {
    Operations::Single(request) => renderer.build(kind, request, config),
    Operations::Batch(requests) => renderer.build_many(kind, requests, config),
  }
}
