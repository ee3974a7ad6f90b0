use crate::{
    DbType, KeelError, Result, SqlCharacters, SqlQuery, TypeConverters, TypeMappings, Value,
    parameter_names, sql_utility::placeholder_index, truncate_long,
};
use log::{debug, error};
use std::collections::VecDeque;

/// How the executor must run the command text.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum CommandKind {
    #[default]
    Text,
    /// The text invokes a stored procedure.
    StoredProcedure,
}

/// A bound parameter, the value is already in its wire form.
#[derive(Debug, Clone, PartialEq)]
pub struct Parameter {
    pub name: String,
    pub value: Value,
    pub db_type: DbType,
}

/// What reaches the executor: text, kind, bound parameters and timeout.
#[derive(Debug, Clone, PartialEq)]
pub struct Command {
    pub text: String,
    pub kind: CommandKind,
    pub parameters: Vec<Parameter>,
    pub timeout: Option<u32>,
}

impl Command {
    /// Binds the arguments of the query to its placeholders.
    ///
    /// Argument `i` binds the generated placeholder `pi` when the text references it, otherwise the
    /// next placeholder not generated by Keel (a stored procedure parameter name). The text must
    /// reference as many distinct placeholders as there are arguments.
    pub fn build(
        query: &SqlQuery,
        chars: &SqlCharacters,
        converters: &TypeConverters,
        mappings: &TypeMappings,
    ) -> Result<Command> {
        let text = query.command_text();
        let names = parameter_names(text, chars);
        if names.len() != query.arguments().len() {
            let error = KeelError::ParameterCountMismatch {
                placeholders: names.len(),
                arguments: query.arguments().len(),
            };
            error!("{}, command: {}", error, truncate_long!(text));
            return Err(error.into());
        }
        let mut named = names
            .iter()
            .filter(|v| placeholder_index(v, chars).is_none())
            .collect::<VecDeque<_>>();
        let mut parameters = Vec::with_capacity(names.len());
        for (i, argument) in query.arguments().iter().enumerate() {
            let name = if !chars.supports_named_parameters {
                chars.get_parameter_name(i)
            } else {
                let generated = chars.get_parameter_name(i);
                if names.iter().any(|v| v.eq_ignore_ascii_case(&generated)) {
                    generated
                } else if let Some(name) = named.pop_front() {
                    name.clone()
                } else {
                    return Err(KeelError::invalid_argument(
                        "query",
                        format!("no placeholder is left for the argument {}", i),
                    )
                    .into());
                }
            };
            let db_type = argument
                .db_type
                .unwrap_or_else(|| mappings.db_type(&argument.value.prototype()));
            let value = converters.to_wire(argument.value.clone()).map_err(|e| {
                let e = e.context(format!("while binding {}", name));
                error!("{:#}", e);
                e
            })?;
            parameters.push(Parameter {
                name,
                value,
                db_type,
            });
        }
        let command = Command {
            text: text.to_string(),
            kind: if chars.is_stored_procedure_call(text) {
                CommandKind::StoredProcedure
            } else {
                CommandKind::Text
            },
            parameters,
            timeout: query.timeout(),
        };
        debug!(
            "Command ({} parameters): {}",
            command.parameters.len(),
            truncate_long!(command.text)
        );
        Ok(command)
    }

    pub fn parameter(&self, name: &str) -> Option<&Parameter> {
        self.parameters
            .iter()
            .find(|v| v.name.eq_ignore_ascii_case(name))
    }
}
