use displaydoc::Display;

/// An opaque error produced by an injected codec function.
pub type CodecError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Type alias for results produced by marshallers.
pub type Result<T> = core::result::Result<T, Error>;

#[derive(Debug, Display)]
pub enum Error {
    /// invalid configuration: `{missing}` must be provided
    InvalidConfiguration { missing: &'static str },
    /// failed to encode value: `{0}`
    Encode(CodecError),
    /// failed to decode `{type_name}`: `{source}`
    Decode {
        type_name: &'static str,
        source: CodecError,
    },
    /// unsupported type: `{type_name}`
    UnsupportedType { type_name: &'static str },
    /// config error: `{reason}`
    Config { reason: String },
}

impl Error {
    pub fn encode(source: impl Into<CodecError>) -> Self {
        Self::Encode(source.into())
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Encode(source) | Self::Decode { source, .. } => Some(&**source),
            _ => None,
        }
    }
}
