//! Error types surfaced by the token core.
//!
//! Variant names mirror the stable error codes that front-ends and scripts
//! observe (`BAD_LEN`, `TOKEN_VERSION`, ...); changing them is a breaking
//! change for anything that matches on them.

use thiserror::Error;

/// Errors produced by decoding, decrypting, encoding, or PIN operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SecurIdError {
    #[error("operation failed")]
    General,

    #[error("token string length out of range")]
    BadLen,

    #[error("password too long, or device id has too many valid digits")]
    BadPassword,

    #[error("password or device id required but not supplied")]
    MissingPassword,

    #[error("device id does not match the one this token is bound to")]
    BadDevid,

    #[error("checksum does not match token contents")]
    ChecksumFailed,

    #[error("unsupported token version")]
    TokenVersion,

    #[error("seed decryption failed integrity check")]
    DecryptFailed,
}

/// Convenience alias for fallible core operations.
pub type Result<T> = std::result::Result<T, SecurIdError>;
