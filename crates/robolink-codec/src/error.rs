/// Errors that can occur while encoding or decoding a packet.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CodecError {
    /// No packet type is registered for the identifier byte.
    #[error("no packet registered for identifier {0:#04x}")]
    UnknownIdentifier(u8),

    /// The identifier byte does not belong to the packet type being decoded.
    #[error("unexpected identifier (expected {expected:#04x}, found {found:#04x})")]
    UnexpectedIdentifier { expected: u8, found: u8 },

    /// The declared total size disagrees with the bytes actually present.
    #[error("size mismatch (declared {declared} bytes, buffer holds {actual})")]
    SizeMismatch { declared: usize, actual: usize },

    /// A fixed field or declared length runs past the end of the buffer.
    #[error("truncated buffer (needed {needed} bytes, {remaining} remaining)")]
    TruncatedBuffer { needed: usize, remaining: usize },

    /// A text field holds bytes that are not valid UTF-8.
    #[error("field `{field}` is not valid UTF-8: {source}")]
    InvalidUtf8 {
        field: &'static str,
        #[source]
        source: std::str::Utf8Error,
    },

    /// A tagged value's tag or width is inconsistent.
    #[error("invalid tagged value encoding: {0}")]
    InvalidTagEncoding(String),

    /// The message or one of its fields cannot be represented on the wire.
    #[error("message too large ({size} bytes, max {max})")]
    MessageTooLarge { size: usize, max: usize },
}

pub type Result<T> = std::result::Result<T, CodecError>;
