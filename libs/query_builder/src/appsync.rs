use crate::{
  config::BuilderConfig,
  document::{assemble_document, DocumentRenderer, OperationKind, RenderedDocument},
  fields::{render_fields, render_operation_call},
  operation::OperationRequest,
  variables::query_data_name_and_argument_map,
};

/// Renderer for AWS AppSync flavoured APIs.
///
/// Documents are named after their (first) operation, capitalized, and query selections
/// are wrapped into the `nodes` connection field AppSync list resolvers return.
#[derive(Debug, Clone, Copy, Default)]
pub struct AppSyncRenderer;

impl AppSyncRenderer {
  fn operation_call(&self, kind: OperationKind, request: &OperationRequest) -> String {
    match (kind, request.fields.is_empty()) {
      (OperationKind::Query, false) => format!(
        "{} {} {{ nodes {{ {} }} }}",
        request.operation.render(),
        query_data_name_and_argument_map(&request.variables),
        render_fields(&request.fields)
      ),
      _ => render_operation_call(&request.operation, &request.variables, &request.fields),
    }
  }

  fn render(
    &self,
    kind: OperationKind,
    requests: &[OperationRequest],
    config: &BuilderConfig,
  ) -> RenderedDocument {
    let operation_name = config
      .operation_name()
      .map(str::to_string)
      .or_else(|| requests.first().map(|r| capitalize(&r.operation.name)))
      .filter(|name| !name.is_empty());

    let body = requests
      .iter()
      .map(|request| self.operation_call(kind, request))
      .collect::<Vec<_>>()
      .join("\n");

    assemble_document(kind, operation_name.as_deref(), requests, &body)
  }
}

impl DocumentRenderer for AppSyncRenderer {
  fn build(
    &self,
    kind: OperationKind,
    request: &OperationRequest,
    config: &BuilderConfig,
  ) -> RenderedDocument {
    self.render(kind, std::slice::from_ref(request), config)
  }

  fn build_many(
    &self,
    kind: OperationKind,
    requests: &[OperationRequest],
    config: &BuilderConfig,
  ) -> RenderedDocument {
    self.render(kind, requests, config)
  }
}

fn capitalize(name: &str) -> String {
  let mut chars = name.chars();
  match chars.next() {
    Some(first) => first.to_uppercase().chain(chars).collect(),
    None => String::new(),
  }
}
