use crate::{
  operation::{Field, OperationName, VariableSet},
  variables::query_data_name_and_argument_map,
};

/// Selection set text. eg: `id, name, user { email }`
pub fn render_fields(fields: &[Field]) -> String {
  fields
    .iter()
    .map(render_field)
    .collect::<Vec<_>>()
    .join(", ")
}

fn render_field(field: &Field) -> String {
  match field {
    Field::Plain(name) => name.clone(),
    Field::Object { name, fields } if fields.is_empty() => format!("{}  ", name),
    Field::Object { name, fields } => format!("{} {{ {} }}", name, render_fields(fields)),
    Field::Operation(nested) => {
      render_operation_call(&nested.operation, &nested.variables, &nested.fields)
    }
    Field::Fragment(nested) => format!(
      "... on {} {}",
      nested.operation.name,
      selection_block(&nested.fields)
    ),
  }
}

/// A field invocation with its arguments and selection. eg: `thought (id: $id) { id }`
///
/// Used for nested operations as well as for the root fields of a document.
pub fn render_operation_call(
  operation: &OperationName,
  variables: &VariableSet,
  fields: &[Field],
) -> String {
  format!(
    "{} {} {}",
    operation.render(),
    query_data_name_and_argument_map(variables),
    selection_block(fields)
  )
}

/// Braced selection, or nothing at all when there is nothing to select.
pub fn selection_block(fields: &[Field]) -> String {
  match fields.is_empty() {
    true => String::new(),
    false => format!("{{ {} }}", render_fields(fields)),
  }
}
