use std::collections::HashSet;

use serde_json::{Map, Number, Value};

use crate::operation::{Field, ListKind, OperationRequest, VariableDescriptor, VariableSet};

/// Every variable a document needs: each request's own variables plus the ones declared
/// by nested operations in its selection.
///
/// Declarations made on a request win over same-named nested ones, otherwise the first
/// declaration seen wins. Keys keep the order in which they were first encountered.
pub fn resolve_variables(requests: &[OperationRequest]) -> VariableSet {
  let mut resolved = VariableSet::new();
  // keys whose current declaration still comes from a nested scope
  let mut nested_keys: HashSet<String> = HashSet::new();

  for request in requests {
    for (key, descriptor) in &request.variables {
      match resolved.get_mut(key) {
        None => {
          resolved.insert(key.clone(), descriptor.clone());
        }
        Some(existing) => {
          if nested_keys.remove(key) {
            *existing = descriptor.clone();
          }
        }
      }
    }

    for (key, descriptor) in collect_nested_variables(&request.fields) {
      if !resolved.contains_key(&key) {
        nested_keys.insert(key.clone());
        resolved.insert(key, descriptor);
      }
    }
  }

  resolved
}

/// Variables declared by nested operations anywhere in `fields`, depth first.
pub fn collect_nested_variables(fields: &[Field]) -> VariableSet {
  let mut collected = VariableSet::new();
  collect_into(fields, &mut collected);

  collected
}

fn collect_into(fields: &[Field], collected: &mut VariableSet) {
  for field in fields {
    match field {
      Field::Plain(_) => {}
      Field::Object { fields, .. } => collect_into(fields, collected),
      Field::Operation(nested) | Field::Fragment(nested) => {
        for (key, descriptor) in &nested.variables {
          collected
            .entry(key.clone())
            .or_insert_with(|| descriptor.clone());
        }
        collect_into(&nested.fields, collected);
      }
    }
  }
}

/// GraphQL type of a variable as declared in the document header. eg: `Int`, `[String!]!`
pub fn query_data_type(descriptor: &VariableDescriptor) -> String {
  let base = match &descriptor.declared_type {
    Some(declared_type) => declared_type.clone(),
    None => infer_scalar_type(&descriptor.value).to_string(),
  };

  let wrapped = match descriptor.list {
    ListKind::Scalar => base,
    ListKind::List | ListKind::ListOf { non_null_items: false } => format!("[{}]", base),
    ListKind::ListOf { non_null_items: true } => format!("[{}!]", base),
  };

  match descriptor.required {
    true => format!("{}!", wrapped),
    false => wrapped,
  }
}

fn infer_scalar_type(value: &Value) -> &'static str {
  // lists are typed after their first item
  let candidate = match value {
    Value::Array(items) => items.first(),
    other => Some(other),
  };

  match candidate {
    Some(Value::Object(_)) | Some(Value::Array(_)) => "Object",
    Some(Value::Bool(_)) => "Boolean",
    Some(Value::Number(number)) if is_integral(number) => "Int",
    Some(Value::Number(_)) => "Float",
    _ => "String",
  }
}

fn is_integral(number: &Number) -> bool {
  number.is_i64() || number.is_u64() || number.as_f64().is_some_and(|n| n.fract() == 0.0)
}

/// Runtime variables payload. eg: `{ "id": 1, "name": "Jon Doe" }`
///
/// When `fields` is given, variables of nested operations are included too, but a
/// top-level binding always wins over a nested one with the same key.
pub fn query_variables_map(variables: &VariableSet, fields: Option<&[Field]>) -> Map<String, Value> {
  let mut mapped: Map<String, Value> = variables
    .iter()
    .map(|(key, descriptor)| (key.clone(), descriptor.value.clone()))
    .collect();

  if let Some(fields) = fields {
    for (key, descriptor) in collect_nested_variables(fields) {
      mapped.entry(key).or_insert(descriptor.value);
    }
  }

  mapped
}

/// Argument list used at a field call site. eg: `(id: $id, name: $userName)`
pub fn query_data_name_and_argument_map(variables: &VariableSet) -> String {
  if variables.is_empty() {
    return String::new();
  }

  let arguments = variables
    .iter()
    .map(|(key, descriptor)| format!("{}: ${}", descriptor.argument_key(key), key))
    .collect::<Vec<_>>()
    .join(", ");

  format!("({})", arguments)
}

/// Variable declarations of a document header. eg: `($id: Int, $email: String!)`
pub fn query_data_argument_and_type_map(variables: &VariableSet) -> String {
  if variables.is_empty() {
    return String::new();
  }

  let declarations = variables
    .iter()
    .map(|(key, descriptor)| format!("${}: {}", key, query_data_type(descriptor)))
    .collect::<Vec<_>>()
    .join(", ");

  format!("({})", declarations)
}
