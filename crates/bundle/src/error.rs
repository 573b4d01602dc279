/// Errors produced while turning bundle input into bytes, or canonical bytes
/// back into transactions.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EncodingError {
    /// A transaction string was not valid base64.
    #[error("transaction {index} is not valid base64: {source}")]
    Base64 {
        /// Index of the transaction in the bundle.
        index: usize,
        /// The underlying decoding error.
        #[source]
        source: base64::DecodeError,
    },
    /// The input is not a valid protobuf bundle.
    #[error("malformed bundle encoding: {0}")]
    Decode(#[from] prost::DecodeError),
    /// The input decodes, but is not the canonical encoding of its
    /// transactions.
    #[error("non-canonical bundle encoding: expected {expected} bytes, got {actual}")]
    NonCanonical {
        /// Length of the canonical encoding of the decoded transactions.
        expected: usize,
        /// Length of the input.
        actual: usize,
    },
}

impl EncodingError {
    /// Create a new [`EncodingError::Base64`].
    pub const fn base64(index: usize, source: base64::DecodeError) -> Self {
        Self::Base64 { index, source }
    }
}
