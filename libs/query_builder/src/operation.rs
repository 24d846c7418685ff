use indexmap::IndexMap;
use serde_json::{Map, Value};

/// Ordered mapping from a variable identifier to its descriptor, for one operation node.
pub type VariableSet = IndexMap<String, VariableDescriptor>;

/// The name of an operation or nested field, optionally aliased (`alias: name`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperationName {
  pub name: String,
  pub alias: Option<String>,
}

impl OperationName {
  pub fn new(name: impl Into<String>) -> Self {
    OperationName {
      name: name.into(),
      alias: None,
    }
  }

  pub fn aliased(name: impl Into<String>, alias: impl Into<String>) -> Self {
    OperationName {
      name: name.into(),
      alias: Some(alias.into()),
    }
  }

  /// Call-site text of the operation, eg: `thoughts` or `first: thoughts`
  pub fn render(&self) -> String {
    match &self.alias {
      Some(alias) => format!("{}: {}", alias, self.name),
      None => self.name.clone(),
    }
  }
}

impl From<&str> for OperationName {
  fn from(name: &str) -> Self {
    OperationName::new(name)
  }
}

impl From<String> for OperationName {
  fn from(name: String) -> Self {
    OperationName::new(name)
  }
}

/// How a variable's GraphQL type is wrapped in a list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ListKind {
  #[default]
  Scalar,
  /// `[T]`
  List,
  /// `[T]` or `[T!]`, depending on whether the items are non-null.
  ListOf { non_null_items: bool },
}

/// A value bound to a variable, plus the metadata controlling its type annotation.
///
/// A bare value converts into a descriptor with every other attribute defaulted,
/// so `VariableDescriptor::from(1)` declares an optional `Int`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct VariableDescriptor {
  /// Runtime value. `Null` marks a variable that is declared but not bound yet.
  pub value: Value,
  /// Explicit GraphQL type, takes precedence over inference.
  pub declared_type: Option<String>,
  /// Argument key used at the call site when it differs from the variable identifier.
  pub argument_name: Option<String>,
  pub required: bool,
  pub list: ListKind,
}

impl VariableDescriptor {
  pub fn new(value: impl Into<Value>) -> Self {
    VariableDescriptor {
      value: value.into(),
      ..Default::default()
    }
  }

  pub fn with_type(mut self, declared_type: impl Into<String>) -> Self {
    self.declared_type = Some(declared_type.into());
    self
  }

  pub fn argument_name(mut self, argument_name: impl Into<String>) -> Self {
    self.argument_name = Some(argument_name.into());
    self
  }

  pub fn required(mut self) -> Self {
    self.required = true;
    self
  }

  pub fn list(mut self) -> Self {
    self.list = ListKind::List;
    self
  }

  pub fn list_of(mut self, non_null_items: bool) -> Self {
    self.list = ListKind::ListOf { non_null_items };
    self
  }

  /// The key rendered on the left-hand side of `key: $variable`.
  pub fn argument_key<'a>(&'a self, variable: &'a str) -> &'a str {
    self.argument_name.as_deref().unwrap_or(variable)
  }
}

macro_rules! descriptor_from_value {
  ($($ty:ty),*) => {
    $(
      impl From<$ty> for VariableDescriptor {
        fn from(value: $ty) -> Self {
          VariableDescriptor::new(value)
        }
      }
    )*
  };
}

descriptor_from_value!(Value, bool, i32, i64, u32, u64, f32, f64, String, &str);

/// A field that takes its own arguments, or an inline fragment spread.
#[derive(Debug, Clone, PartialEq)]
pub struct NestedOperation {
  pub operation: OperationName,
  pub variables: VariableSet,
  pub fields: Vec<Field>,
}

impl NestedOperation {
  pub fn new(operation: impl Into<OperationName>) -> Self {
    NestedOperation {
      operation: operation.into(),
      variables: VariableSet::new(),
      fields: vec![],
    }
  }

  pub fn variable(mut self, key: impl Into<String>, descriptor: impl Into<VariableDescriptor>) -> Self {
    self.variables.insert(key.into(), descriptor.into());
    self
  }

  pub fn fields<I, F>(mut self, fields: I) -> Self
  where
    I: IntoIterator<Item = F>,
    F: Into<Field>,
  {
    self.fields = fields.into_iter().map(Into::into).collect();
    self
  }
}

/// One entry of a selection set.
#[derive(Debug, Clone, PartialEq)]
pub enum Field {
  /// `id`
  Plain(String),
  /// `user { id, name }`, a sub-selection without arguments.
  Object { name: String, fields: Vec<Field> },
  /// `publication (id: $id) { name }`
  Operation(NestedOperation),
  /// `... on User { name }`, never rendered with arguments.
  Fragment(NestedOperation),
}

impl Field {
  pub fn plain(name: impl Into<String>) -> Self {
    Field::Plain(name.into())
  }

  pub fn object<I, F>(name: impl Into<String>, fields: I) -> Self
  where
    I: IntoIterator<Item = F>,
    F: Into<Field>,
  {
    Field::Object {
      name: name.into(),
      fields: fields.into_iter().map(Into::into).collect(),
    }
  }

  pub fn nested(operation: NestedOperation) -> Self {
    Field::Operation(operation)
  }

  pub fn fragment<I, F>(type_condition: impl Into<String>, fields: I) -> Self
  where
    I: IntoIterator<Item = F>,
    F: Into<Field>,
  {
    Field::Fragment(NestedOperation::new(OperationName::new(type_condition)).fields(fields))
  }
}

impl From<&str> for Field {
  fn from(name: &str) -> Self {
    Field::Plain(name.to_string())
  }
}

impl From<String> for Field {
  fn from(name: String) -> Self {
    Field::Plain(name)
  }
}

impl From<NestedOperation> for Field {
  fn from(operation: NestedOperation) -> Self {
    Field::Operation(operation)
  }
}

/// A top-level operation: one root field invocation of a document.
#[derive(Debug, Clone, PartialEq)]
pub struct OperationRequest {
  pub operation: OperationName,
  pub fields: Vec<Field>,
  pub variables: VariableSet,
}

impl OperationRequest {
  pub fn new(operation: impl Into<OperationName>) -> Self {
    OperationRequest {
      operation: operation.into(),
      fields: vec![],
      variables: VariableSet::new(),
    }
  }

  pub fn alias(mut self, alias: impl Into<String>) -> Self {
    self.operation.alias = Some(alias.into());
    self
  }

  pub fn fields<I, F>(mut self, fields: I) -> Self
  where
    I: IntoIterator<Item = F>,
    F: Into<Field>,
  {
    self.fields = fields.into_iter().map(Into::into).collect();
    self
  }

  pub fn variable(mut self, key: impl Into<String>, descriptor: impl Into<VariableDescriptor>) -> Self {
    self.variables.insert(key.into(), descriptor.into());
    self
  }
}

/// Either a single operation or an ordered batch rendered into one document.
#[derive(Debug, Clone, PartialEq)]
pub enum Operations {
  Single(OperationRequest),
  Batch(Vec<OperationRequest>),
}

impl Operations {
  pub fn as_slice(&self) -> &[OperationRequest] {
    match self {
      Operations::Single(request) => std::slice::from_ref(request),
      Operations::Batch(requests) => requests,
    }
  }
}

impl From<OperationRequest> for Operations {
  fn from(request: OperationRequest) -> Self {
    Operations::Single(request)
  }
}

impl From<Vec<OperationRequest>> for Operations {
  fn from(requests: Vec<OperationRequest>) -> Self {
    Operations::Batch(requests)
  }
}

/// Tells a nested operation apart from object shorthand: `operation` together with
/// `fields`/`variables`, or `operation` together with `fragment`.
pub fn is_nested_operation(object: &Map<String, Value>) -> bool {
  object.contains_key("operation")
    && (object.contains_key("fields")
      || object.contains_key("variables")
      || object.contains_key("fragment"))
}

pub fn is_fragment(object: &Map<String, Value>) -> bool {
  is_nested_operation(object) && object.get("fragment").is_some_and(is_truthy)
}

pub(crate) fn is_truthy(value: &Value) -> bool {
  match value {
    Value::Null => false,
    Value::Bool(flag) => *flag,
    Value::Number(number) => number.as_f64().is_some_and(|n| n != 0.0),
    Value::String(text) => !text.is_empty(),
    Value::Array(_) | Value::Object(_) => true,
  }
}
