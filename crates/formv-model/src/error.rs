use thiserror::Error;

#[derive(Debug, Error)]
pub enum FormError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    /// Malformed configuration: bad rule shape, unknown enum value,
    /// invalid regex, unresolved custom rule, bad table range.
    #[error("configuration error: {0}")]
    Config(String),
    /// The document could not be read or has an unsupported shape.
    #[error("document error: {0}")]
    Document(String),
    /// A message template referenced an undefined variable.
    #[error("render error: {0}")]
    Render(String),
}

pub type Result<T> = std::result::Result<T, FormError>;
