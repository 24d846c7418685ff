use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::debug;

use crate::{
  config::BuilderConfig,
  fields::render_operation_call,
  operation::OperationRequest,
  variables::{query_data_argument_and_type_map, query_variables_map, resolve_variables},
};

#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OperationKind {
  Query,
  Mutation,
  Subscription,
}

impl Display for OperationKind {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    match self {
      OperationKind::Query => write!(f, "query"),
      OperationKind::Mutation => write!(f, "mutation"),
      OperationKind::Subscription => write!(f, "subscription"),
    }
  }
}

/// A GraphQL document together with the variables to send alongside it.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct RenderedDocument {
  pub query: String,
  pub variables: Map<String, Value>,
}

impl RenderedDocument {
  /// GraphQL-over-HTTP request body. eg: `{"query": "...", "variables": {...}}`
  pub fn into_json(self) -> Value {
    serde_json::json!({
      "query": self.query,
      "variables": self.variables,
    })
  }
}

/// Builds documents out of operation requests.
///
/// This is the extension point of the builder: any implementation can be handed to
/// `query_with`, `mutation_with` or `subscription_with` instead of [`DefaultRenderer`].
pub trait DocumentRenderer: Send + Sync {
  /// Document for a single operation.
  fn build(
    &self,
    kind: OperationKind,
    request: &OperationRequest,
    config: &BuilderConfig,
  ) -> RenderedDocument;

  /// One document holding every operation of the batch, sharing one variable header.
  fn build_many(
    &self,
    kind: OperationKind,
    requests: &[OperationRequest],
    config: &BuilderConfig,
  ) -> RenderedDocument;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultRenderer;

impl DocumentRenderer for DefaultRenderer {
  fn build(
    &self,
    kind: OperationKind,
    request: &OperationRequest,
    config: &BuilderConfig,
  ) -> RenderedDocument {
    build_document(kind, std::slice::from_ref(request), config)
  }

  fn build_many(
    &self,
    kind: OperationKind,
    requests: &[OperationRequest],
    config: &BuilderConfig,
  ) -> RenderedDocument {
    build_document(kind, requests, config)
  }
}

/// `<kind>[ <operationName>] <header> { <body> }`, where the body holds one call per request.
pub fn build_document(
  kind: OperationKind,
  requests: &[OperationRequest],
  config: &BuilderConfig,
) -> RenderedDocument {
  let body = requests
    .iter()
    .map(|request| render_operation_call(&request.operation, &request.variables, &request.fields))
    .collect::<Vec<_>>()
    .join("\n");

  assemble_document(kind, config.operation_name(), requests, &body)
}

/// Wraps an already rendered body with the keyword and the document-level variable header.
pub fn assemble_document(
  kind: OperationKind,
  operation_name: Option<&str>,
  requests: &[OperationRequest],
  body: &str,
) -> RenderedDocument {
  let variables = resolve_variables(requests);
  let header = query_data_argument_and_type_map(&variables);
  let keyword = match operation_name {
    Some(name) => format!("{} {}", kind, name),
    None => kind.to_string(),
  };

  debug!(
    kind = %kind,
    operations = requests.len(),
    variables = variables.len(),
    "graphql document assembled"
  );

  RenderedDocument {
    query: format!("{} {} {{ {} }}", keyword, header, body),
    variables: query_variables_map(&variables, None),
  }
}
