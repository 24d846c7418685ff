//! Operation descriptions in the JSON shape callers of the JavaScript API are used to:
//!
//! ```json
//! {
//!   "operation": { "name": "thought", "alias": "first" },
//!   "variables": { "id": 1, "name": { "value": "Jon", "type": "ID", "required": true } },
//!   "fields": ["id", { "user": ["name"] }, { "operation": "posts", "variables": {}, "fields": ["title"] }]
//! }
//! ```

use serde::{de::Error as DeError, Deserialize, Deserializer};
use serde_json::{Error as SerdeError, Map, Value};
use tracing::warn;

use crate::operation::{
  is_fragment, is_nested_operation, is_truthy, Field, ListKind, NestedOperation, OperationName,
  OperationRequest, Operations, VariableDescriptor, VariableSet,
};

#[derive(thiserror::Error, Debug)]
pub enum ParseOperationError {
  #[error("invalid operation json format")]
  InvalidJsonFormat(#[from] SerdeError),
  #[error("expected an operation object or an array of operation objects")]
  ExpectedOperationObject,
  #[error("missing \"operation\" key")]
  MissingOperation,
  #[error("\"operation\" must be a string or an object with a \"name\"")]
  InvalidOperationName,
  #[error("\"fields\" of \"{0}\" must be an array")]
  FieldsNotArray(String),
  #[error("\"variables\" of \"{0}\" must be an object")]
  VariablesNotObject(String),
  #[error("sub-selection \"{0}\" must be an array")]
  SubSelectionNotArray(String),
}

impl Operations {
  /// A JSON array is a batch, a JSON object a single operation.
  pub fn from_json_value(value: Value) -> Result<Self, ParseOperationError> {
    match value {
      Value::Array(items) => items
        .into_iter()
        .map(OperationRequest::try_from)
        .collect::<Result<Vec<_>, _>>()
        .map(Operations::Batch),
      Value::Object(_) => OperationRequest::try_from(value).map(Operations::Single),
      _ => Err(ParseOperationError::ExpectedOperationObject),
    }
  }

  pub fn from_json_str(raw: &str) -> Result<Self, ParseOperationError> {
    let value = serde_json::from_str::<Value>(raw)?;

    Operations::from_json_value(value)
  }
}

impl TryFrom<Value> for OperationRequest {
  type Error = ParseOperationError;

  fn try_from(value: Value) -> Result<Self, Self::Error> {
    let mut object = match value {
      Value::Object(object) => object,
      _ => return Err(ParseOperationError::ExpectedOperationObject),
    };

    let operation = parse_operation_name(object.remove("operation"))?;
    let variables = parse_variables(&operation.name, object.remove("variables"))?;
    let fields = parse_fields(&operation.name, object.remove("fields"))?;

    Ok(OperationRequest {
      operation,
      fields,
      variables,
    })
  }
}

impl TryFrom<Value> for Field {
  type Error = ParseOperationError;

  fn try_from(value: Value) -> Result<Self, Self::Error> {
    match value {
      Value::String(name) => Ok(Field::Plain(name)),
      Value::Object(object) if is_nested_operation(&object) => parse_nested_operation(object),
      Value::Object(object) if !object.is_empty() => {
        let extra_keys = object.len() - 1;
        let mut entries = object.into_iter();
        match entries.next() {
          Some((name, Value::Array(children))) => {
            if extra_keys > 0 {
              warn!(field = %name, extra_keys, "sub-selection object has more than one key, only the first one is rendered");
            }

            Ok(Field::Object {
              name,
              fields: children
                .into_iter()
                .map(Field::try_from)
                .collect::<Result<_, _>>()?,
            })
          }
          Some((name, _)) => Err(ParseOperationError::SubSelectionNotArray(name)),
          None => Ok(coerce_field(Value::Object(Map::new()))),
        }
      }
      other => Ok(coerce_field(other)),
    }
  }
}

fn parse_nested_operation(mut object: Map<String, Value>) -> Result<Field, ParseOperationError> {
  let fragment = is_fragment(&object);
  let operation = parse_operation_name(object.remove("operation"))?;
  let variables = parse_variables(&operation.name, object.remove("variables"))?;
  let fields = parse_fields(&operation.name, object.remove("fields"))?;

  let nested = NestedOperation {
    operation,
    variables,
    fields,
  };

  Ok(match fragment {
    true => Field::Fragment(nested),
    false => Field::Operation(nested),
  })
}

// Entries of no known shape still end up in the selection, as their JSON text.
fn coerce_field(value: Value) -> Field {
  let text = match value {
    Value::String(text) => text,
    other => other.to_string(),
  };
  warn!(field = %text, "unrecognized field entry, rendering it as a plain field");

  Field::Plain(text)
}

impl TryFrom<Value> for OperationName {
  type Error = ParseOperationError;

  fn try_from(value: Value) -> Result<Self, Self::Error> {
    match value {
      Value::String(name) => Ok(OperationName::new(name)),
      Value::Object(mut object) => {
        let name = match object.remove("name") {
          Some(Value::String(name)) => name,
          _ => return Err(ParseOperationError::InvalidOperationName),
        };
        let alias = match object.remove("alias") {
          Some(Value::String(alias)) => Some(alias),
          None | Some(Value::Null) => None,
          Some(other) => {
            warn!(operation = %name, alias = %other, "ignoring non-string operation alias");
            None
          }
        };

        Ok(OperationName { name, alias })
      }
      _ => Err(ParseOperationError::InvalidOperationName),
    }
  }
}

fn parse_operation_name(value: Option<Value>) -> Result<OperationName, ParseOperationError> {
  value
    .ok_or(ParseOperationError::MissingOperation)
    .and_then(OperationName::try_from)
}

fn parse_fields(operation: &str, value: Option<Value>) -> Result<Vec<Field>, ParseOperationError> {
  match value {
    None | Some(Value::Null) => Ok(vec![]),
    Some(Value::Array(items)) => items.into_iter().map(Field::try_from).collect(),
    Some(_) => Err(ParseOperationError::FieldsNotArray(operation.to_string())),
  }
}

fn parse_variables(operation: &str, value: Option<Value>) -> Result<VariableSet, ParseOperationError> {
  match value {
    None | Some(Value::Null) => Ok(VariableSet::new()),
    Some(Value::Object(object)) => Ok(
      object
        .into_iter()
        .map(|(key, value)| (key, VariableDescriptor::from_json(value)))
        .collect(),
    ),
    Some(_) => Err(ParseOperationError::VariablesNotObject(operation.to_string())),
  }
}

const DESCRIPTOR_KEYS: [&str; 5] = ["value", "type", "name", "list", "required"];

fn is_descriptor(object: &Map<String, Value>) -> bool {
  (object.contains_key("value") || object.contains_key("type"))
    && object.keys().all(|key| DESCRIPTOR_KEYS.contains(&key.as_str()))
}

impl VariableDescriptor {
  /// Objects made only of `value`, `type`, `name`, `list` and `required` keys, with at least
  /// a `value` or a `type`, are descriptors. Everything else, input objects included, is a
  /// bare value.
  pub fn from_json(value: Value) -> Self {
    let mut object = match value {
      Value::Object(object) if is_descriptor(&object) => object,
      bare => return VariableDescriptor::new(bare),
    };

    let declared_type = match object.remove("type") {
      None | Some(Value::Null) => None,
      Some(Value::String(declared_type)) => Some(declared_type),
      Some(other) => Some(other.to_string()),
    };
    let argument_name = match object.remove("name") {
      Some(Value::String(name)) => Some(name),
      _ => None,
    };
    let list = match object.remove("list") {
      Some(Value::Bool(true)) => ListKind::List,
      Some(Value::Array(indicator)) => ListKind::ListOf {
        non_null_items: indicator.first().is_some_and(is_truthy),
      },
      _ => ListKind::Scalar,
    };

    VariableDescriptor {
      value: object.remove("value").unwrap_or(Value::Null),
      declared_type,
      argument_name,
      required: object.get("required").is_some_and(is_truthy),
      list,
    }
  }
}

macro_rules! deserialize_through_value {
  ($($ty:ty),*) => {
    $(
      impl<'de> Deserialize<'de> for $ty {
        fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
        where
          D: Deserializer<'de>,
        {
          let value = Value::deserialize(deserializer)?;
          <$ty>::try_from(value).map_err(DeError::custom)
        }
      }
    )*
  };
}

deserialize_through_value!(OperationRequest, Field, OperationName);

impl<'de> Deserialize<'de> for Operations {
  fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
  where
    D: Deserializer<'de>,
  {
    let value = Value::deserialize(deserializer)?;
    Operations::from_json_value(value).map_err(DeError::custom)
  }
}

impl<'de> Deserialize<'de> for VariableDescriptor {
  fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
  where
    D: Deserializer<'de>,
  {
    Value::deserialize(deserializer).map(VariableDescriptor::from_json)
  }
}
