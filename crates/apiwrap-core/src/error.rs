//! Error types for binding generation

use thiserror::Error;

/// Result type alias for generation operations
pub type GenResult<T> = Result<T, GenError>;

/// Error type for generation operations
#[derive(Error, Debug)]
pub enum GenError {
    /// A description node lacks an attribute the generator relies on
    #[error("<{tag}> node is missing required attribute '{attribute}'")]
    MissingAttribute { tag: String, attribute: String },

    /// An opaque-object type has no matching class in the registry
    #[error("no class definition found for type '{0}'")]
    UnknownClass(String),

    /// A setter method declares no value argument after the instance
    #[error("setter '{0}' has no value argument")]
    MissingSetterArgument(String),

    /// A property with neither a getter nor a setter
    #[error("property '{0}' has neither a getter nor a setter")]
    EmptyProperty(String),

    /// A node selector could not be parsed
    #[error("invalid selector: {0}")]
    InvalidSelector(String),

    /// Failure while reading or writing JSON documents
    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// Failure while generating one member, tagged with its owner
    #[error("{class}.{member}: {source}")]
    Member {
        class: String,
        member: String,
        #[source]
        source: Box<GenError>,
    },
}

impl GenError {
    /// Attach the owning class and member name to this error.
    ///
    /// An error that already carries member context is returned unchanged so
    /// the innermost identity wins.
    pub fn in_member(self, class: impl Into<String>, member: impl Into<String>) -> Self {
        match self {
            GenError::Member { .. } => self,
            other => GenError::Member {
                class: class.into(),
                member: member.into(),
                source: Box::new(other),
            },
        }
    }

    /// Returns the error with any member context stripped
    pub fn root_cause(&self) -> &GenError {
        match self {
            GenError::Member { source, .. } => source.root_cause(),
            other => other,
        }
    }

    /// Returns a stable numeric code, suitable as a process exit status
    pub fn error_code(&self) -> u32 {
        match self {
            GenError::MissingAttribute { .. } => 1,
            GenError::UnknownClass(_) => 2,
            GenError::MissingSetterArgument(_) => 3,
            GenError::EmptyProperty(_) => 4,
            GenError::InvalidSelector(_) => 5,
            GenError::Json(_) => 6,
            GenError::Member { source, .. } => source.error_code(),
        }
    }
}
