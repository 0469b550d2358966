//! Error types for RESP response handling.
//!
//! Three failure channels are kept apart:
//!
//! - [`Error::Redis`]: the server answered with an error or nil reply.
//! - [`Error::Transport`]: no reply was received at all.
//! - [`Error::TypeMismatch`], [`Error::NonStringMapKey`], [`Error::OddMapLength`]:
//!   the caller asked for a shape the reply can never have, or the server sent a
//!   structurally malformed composite. These indicate a bug, not a retryable
//!   condition.

use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

use bytes::Bytes;

use crate::cluster::{self, Redirect};
use crate::kind::Kind;

/// Text reported for a nil reply.
pub const NIL_MESSAGE: &str = "nil response";

/// Error type for response conversions.
#[derive(Debug, Clone, thiserror::Error)]
pub enum Error {
    /// The server returned an error or nil reply.
    #[error(transparent)]
    Redis(#[from] RedisError),

    /// The request never produced a reply (connection closed, timeout, ...).
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// The reply kind can never be converted to the requested type.
    #[error("type mismatch: expected {expected}, got {actual}")]
    TypeMismatch { expected: &'static str, actual: Kind },

    /// A map reply used a key that is not a string.
    #[error("map key must be a string, got {actual}")]
    NonStringMapKey { actual: Kind },

    /// A flattened map sequence had an odd number of elements.
    #[error("map has an odd number of elements: {0}")]
    OddMapLength(usize),

    /// A double reply did not contain a valid decimal literal.
    #[error("invalid double: {0}")]
    InvalidDouble(String),

    /// A string payload was not valid UTF-8.
    #[error("invalid utf-8 in string payload")]
    InvalidUtf8,
}

impl Error {
    /// Returns true if this is a nil reply from the server.
    #[inline]
    pub fn is_redis_nil(&self) -> bool {
        matches!(self, Error::Redis(e) if e.is_nil())
    }

    /// Returns true if the reply did not have the shape the caller asked for.
    #[inline]
    pub fn is_type_mismatch(&self) -> bool {
        matches!(
            self,
            Error::TypeMismatch { .. } | Error::NonStringMapKey { .. } | Error::OddMapLength(_)
        )
    }

    /// Returns true if no reply was received.
    #[inline]
    pub fn is_transport(&self) -> bool {
        matches!(self, Error::Transport(_))
    }

    /// Returns the server error, if this is one.
    #[inline]
    pub fn as_redis(&self) -> Option<&RedisError> {
        match self {
            Error::Redis(e) => Some(e),
            _ => None,
        }
    }
}

/// Returns true if `err` is a nil reply from the server.
#[inline]
pub fn is_redis_nil(err: &Error) -> bool {
    err.is_redis_nil()
}

pub(crate) fn type_mismatch(expected: &'static str, actual: Kind) -> Error {
    tracing::debug!(expected, actual = actual.name(), "response type mismatch");
    Error::TypeMismatch { expected, actual }
}

// ============================================================================
// TransportError
// ============================================================================

/// An opaque failure from the connection layer.
///
/// The inner error is shared so a result can hand out its error more than once.
#[derive(Clone)]
pub struct TransportError(Arc<dyn std::error::Error + Send + Sync + 'static>);

impl TransportError {
    /// Wrap a connection-layer error.
    pub fn new<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        TransportError(Arc::new(err))
    }

    /// Returns the wrapped error.
    pub fn get_ref(&self) -> &(dyn std::error::Error + Send + Sync + 'static) {
        &*self.0
    }

    /// Attempt to downcast the wrapped error to a concrete type.
    pub fn downcast_ref<E: std::error::Error + 'static>(&self) -> Option<&E> {
        self.0.downcast_ref::<E>()
    }
}

impl From<std::io::Error> for TransportError {
    fn from(err: std::io::Error) -> Self {
        TransportError::new(err)
    }
}

impl fmt::Debug for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("TransportError").field(&self.0).finish()
    }
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for TransportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.0.source()
    }
}

// ============================================================================
// RedisError
// ============================================================================

/// Which error-shaped reply produced a [`RedisError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Simple error: `-ERR message\r\n`
    Simple,
    /// Blob error: `!<len>\r\n<error>\r\n`
    Blob,
    /// Null: `_\r\n`
    Nil,
}

/// An error or nil reply from the server.
///
/// The classification methods are pure prefix checks over the error text;
/// acting on them (following a redirect, retrying, loading a script) is up
/// to the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedisError {
    kind: ErrorKind,
    message: Bytes,
}

impl RedisError {
    /// Create a simple error.
    pub fn simple(msg: impl Into<Bytes>) -> Self {
        Self {
            kind: ErrorKind::Simple,
            message: msg.into(),
        }
    }

    /// Create a blob error.
    pub fn blob(msg: impl Into<Bytes>) -> Self {
        Self {
            kind: ErrorKind::Blob,
            message: msg.into(),
        }
    }

    /// Create a nil reply.
    pub fn nil() -> Self {
        Self {
            kind: ErrorKind::Nil,
            message: Bytes::new(),
        }
    }

    #[inline]
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Returns true if this is a nil reply.
    #[inline]
    pub fn is_nil(&self) -> bool {
        self.kind == ErrorKind::Nil
    }

    /// The raw error text. Empty for nil replies.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.message
    }

    /// Human-readable error text. Nil replies read as [`NIL_MESSAGE`].
    pub fn message(&self) -> Cow<'_, str> {
        if self.is_nil() {
            Cow::Borrowed(NIL_MESSAGE)
        } else {
            String::from_utf8_lossy(&self.message)
        }
    }

    /// If this is a `MOVED <slot> <host:port>` error, returns the address.
    pub fn is_moved(&self) -> Option<&str> {
        self.redirect_address(b"MOVED")
    }

    /// If this is an `ASK <slot> <host:port>` error, returns the address.
    pub fn is_ask(&self) -> Option<&str> {
        self.redirect_address(b"ASK")
    }

    /// Returns true for `TRYAGAIN` errors.
    #[inline]
    pub fn is_try_again(&self) -> bool {
        self.message.starts_with(b"TRYAGAIN")
    }

    /// Returns true for `NOSCRIPT` errors.
    #[inline]
    pub fn is_no_script(&self) -> bool {
        self.message.starts_with(b"NOSCRIPT")
    }

    /// Parse a MOVED or ASK error into a [`Redirect`], including the slot.
    pub fn redirect(&self) -> Option<Redirect> {
        if self.is_nil() {
            return None;
        }
        cluster::parse_redirect(&self.message)
    }

    fn redirect_address(&self, token: &[u8]) -> Option<&str> {
        if self.is_nil() || !self.message.starts_with(token) {
            return None;
        }
        let addr = cluster::field(&self.message, 2)
            .filter(|f| !f.is_empty())
            .and_then(|f| std::str::from_utf8(f).ok());
        if addr.is_none() {
            tracing::debug!(
                message = %String::from_utf8_lossy(&self.message),
                "malformed redirect error"
            );
        }
        addr
    }
}

impl fmt::Display for RedisError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message())
    }
}

impl std::error::Error for RedisError {}
