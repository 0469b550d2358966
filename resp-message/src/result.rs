//! The outcome of a single request.
//!
//! A [`RedisResult`] pairs the reply [`Value`] with the transport failure, if
//! any, that prevented the reply from arriving. The typed accessors check
//! [`RedisResult::error`] first, so a transport failure is never masked by
//! converting the placeholder value that accompanies it.

use std::collections::HashMap;

use crate::Value;
use crate::error::{Error, RedisError, TransportError};

/// A reply value, or the transport failure that replaced it.
#[derive(Debug, Clone)]
pub struct RedisResult {
    value: Value,
    transport: Option<TransportError>,
}

impl RedisResult {
    /// A result carrying a decoded reply.
    pub fn new(value: Value) -> Self {
        Self {
            value,
            transport: None,
        }
    }

    /// A result for a request that never produced a reply.
    ///
    /// The paired value is [`Value::Null`].
    pub fn from_transport(err: impl Into<TransportError>) -> Self {
        Self {
            value: Value::Null,
            transport: Some(err.into()),
        }
    }

    pub fn from_parts(value: Value, transport: Option<TransportError>) -> Self {
        Self { value, transport }
    }

    /// The raw reply, regardless of any error.
    #[inline]
    pub fn value(&self) -> &Value {
        &self.value
    }

    pub fn into_parts(self) -> (Value, Option<TransportError>) {
        (self.value, self.transport)
    }

    /// The server error carried by the reply, ignoring any transport failure.
    pub fn protocol_error(&self) -> Option<RedisError> {
        self.value.as_error()
    }

    /// The transport failure, if the request never completed.
    #[inline]
    pub fn transport_error(&self) -> Option<&TransportError> {
        self.transport.as_ref()
    }

    /// The transport failure if there is one, otherwise the server error.
    pub fn error(&self) -> Option<Error> {
        if let Some(err) = &self.transport {
            return Some(Error::Transport(err.clone()));
        }
        self.protocol_error().map(Error::Redis)
    }

    /// The reply, unless either failure channel reports an error.
    pub fn as_message(&self) -> Result<&Value, Error> {
        self.check()?;
        Ok(&self.value)
    }

    pub fn into_message(self) -> Result<Value, Error> {
        self.check()?;
        Ok(self.value)
    }

    pub fn as_i64(&self) -> Result<i64, Error> {
        self.check()?;
        self.value.as_i64()
    }

    pub fn as_bool(&self) -> Result<bool, Error> {
        self.check()?;
        self.value.as_bool()
    }

    pub fn as_f64(&self) -> Result<f64, Error> {
        self.check()?;
        self.value.as_f64()
    }

    pub fn as_bytes(&self) -> Result<&[u8], Error> {
        self.check()?;
        self.value.as_bytes()
    }

    pub fn as_str(&self) -> Result<&str, Error> {
        self.check()?;
        self.value.as_str()
    }

    pub fn as_array(&self) -> Result<&[Value], Error> {
        self.check()?;
        self.value.as_array()
    }

    pub fn as_map(&self) -> Result<HashMap<&str, &Value>, Error> {
        self.check()?;
        self.value.as_map()
    }

    #[inline]
    fn check(&self) -> Result<(), Error> {
        match self.error() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

impl From<Value> for RedisResult {
    fn from(value: Value) -> Self {
        RedisResult::new(value)
    }
}

impl From<Result<Value, TransportError>> for RedisResult {
    fn from(result: Result<Value, TransportError>) -> Self {
        match result {
            Ok(value) => RedisResult::new(value),
            Err(err) => RedisResult::from_transport(err),
        }
    }
}
