use schemars::{schema::RootSchema, schema_for, JsonSchema};
use serde::{Deserialize, Serialize};

/// Options applied when a document is assembled.
///
/// The configuration is immutable: it is passed by reference to every renderer and never
/// updated while building.
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq, JsonSchema)]
pub struct BuilderConfig {
  /// Name of the GraphQL operation, inserted right after the `query`/`mutation` keyword.
  ///
  /// An empty string is treated as if no name was given.
  #[serde(
    rename = "operationName",
    default,
    skip_serializing_if = "Option::is_none"
  )]
  pub operation_name: Option<String>,
}

impl BuilderConfig {
  pub fn named(operation_name: impl Into<String>) -> Self {
    BuilderConfig {
      operation_name: Some(operation_name.into()),
    }
  }

  pub fn operation_name(&self) -> Option<&str> {
    self
      .operation_name
      .as_deref()
      .filter(|name| !name.is_empty())
  }

  pub fn json_schema() -> RootSchema {
    schema_for!(BuilderConfig)
  }
}
