use thiserror::Error;

/// Domain failures raised by the mapping, building, conversion and identifier layers.
///
/// They travel inside [`crate::Error`] (an `anyhow::Error`), callers that need to tell them apart
/// use `error.downcast_ref::<KeelError>()`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum KeelError {
    /// The type cannot be mapped to a table.
    #[error("Cannot map type `{type_name}`: {message}")]
    Mapping { type_name: String, message: String },

    /// No dialect is known under the requested name.
    #[error("Unsupported dialect `{0}`")]
    UnsupportedDialect(String),

    /// A builder or generator received an argument it cannot use.
    #[error("Invalid argument `{argument}`: {message}")]
    InvalidArgument { argument: String, message: String },

    /// The command text and the argument list disagree.
    #[error(
        "The command references {placeholders} distinct parameters but {arguments} arguments were supplied"
    )]
    ParameterCountMismatch { placeholders: usize, arguments: usize },

    /// A value could not be converted to or from its wire representation.
    #[error("Cannot convert value of type `{type_name}`: {message}")]
    Conversion { type_name: String, message: String },

    /// An encrypted payload is malformed.
    #[error("Invalid encrypted value: {0}")]
    InvalidCiphertext(String),

    /// The identifier must be assigned before the operation.
    #[error("The identifier `{property}` of `{type_name}` is not set")]
    IdentifierNotSet { type_name: String, property: String },

    /// The identifier is generated and must not be assigned before insert.
    #[error("The identifier `{property}` of `{type_name}` is already set")]
    IdentifierAlreadySet { type_name: String, property: String },

    /// The entity does not expose the requested property.
    #[error("Type `{type_name}` has no property `{property}`")]
    UnknownProperty { type_name: String, property: String },
}

impl KeelError {
    pub fn mapping(type_name: impl Into<String>, message: impl Into<String>) -> Self {
        KeelError::Mapping {
            type_name: type_name.into(),
            message: message.into(),
        }
    }

    pub fn invalid_argument(argument: impl Into<String>, message: impl Into<String>) -> Self {
        KeelError::InvalidArgument {
            argument: argument.into(),
            message: message.into(),
        }
    }

    pub fn conversion(type_name: impl Into<String>, message: impl Into<String>) -> Self {
        KeelError::Conversion {
            type_name: type_name.into(),
            message: message.into(),
        }
    }

    pub fn unknown_property(type_name: impl Into<String>, property: impl Into<String>) -> Self {
        KeelError::UnknownProperty {
            type_name: type_name.into(),
            property: property.into(),
        }
    }
}

/// Rejects blank names.
pub(crate) fn require_not_empty(argument: &str, value: &str) -> crate::Result<()> {
    if value.trim().is_empty() {
        return Err(KeelError::invalid_argument(argument, "must not be empty").into());
    }
    Ok(())
}
