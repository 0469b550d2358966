//! RESP3 response values and strict conversions.
//!
//! A [`Value`] is what the decoder hands over for every reply. Conversions are
//! deliberately narrow: each one accepts exactly the kinds a command with that
//! reply shape can produce. Error and nil replies come back as
//! [`Error::Redis`]; any other kind is a type mismatch, never a silent
//! default.

use std::collections::HashMap;

use bytes::Bytes;

use crate::error::{Error, RedisError, type_mismatch};
use crate::kind::Kind;

/// A decoded RESP3 reply.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Bulk string: `$6\r\nfoobar\r\n`
    BulkString(Bytes),
    /// Simple string: `+OK\r\n`
    SimpleString(Bytes),
    /// Integer: `:1000\r\n`
    Integer(i64),
    /// Boolean: `#t\r\n` or `#f\r\n`
    ///
    /// Holds the number the decoder produced; only `1` reads as true.
    Boolean(i64),
    /// Double: `,3.14159\r\n`
    ///
    /// Stored as the decimal text and parsed on conversion.
    Double(Bytes),
    /// Array: `*2\r\n...`
    Array(Vec<Value>),
    /// Set: `~2\r\n...`. Order is kept as received; no deduplication.
    Set(Vec<Value>),
    /// Map: `%<len>\r\n<key><val>...`
    Map(Vec<(Value, Value)>),
    /// Simple error: `-ERR message\r\n`
    SimpleError(Bytes),
    /// Blob error: `!<len>\r\n<error>\r\n`
    BlobError(Bytes),
    /// Null: `_\r\n`
    Null,
    /// Out-of-band metadata attached to a reply: `|<len>\r\n<attrs>...<value>`
    Attribute {
        /// Metadata key-value pairs
        attrs: Vec<(Value, Value)>,
        /// The reply this metadata is attached to
        value: Box<Value>,
    },
}

impl Value {
    // ========================================================================
    // Constructors
    // ========================================================================

    /// Create a bulk string value.
    #[inline]
    pub fn bulk_string(data: impl AsRef<[u8]>) -> Self {
        Value::BulkString(Bytes::copy_from_slice(data.as_ref()))
    }

    /// Create a simple string value.
    #[inline]
    pub fn simple_string(s: impl AsRef<[u8]>) -> Self {
        Value::SimpleString(Bytes::copy_from_slice(s.as_ref()))
    }

    #[inline]
    pub fn integer(n: i64) -> Self {
        Value::Integer(n)
    }

    #[inline]
    pub fn boolean(b: bool) -> Self {
        Value::Boolean(i64::from(b))
    }

    /// Create a boolean from the number a decoder produced.
    #[inline]
    pub fn boolean_raw(n: i64) -> Self {
        Value::Boolean(n)
    }

    /// Create a double value, formatted the way RESP3 writes it.
    pub fn double(d: f64) -> Self {
        let text = if d.is_nan() {
            "nan".to_string()
        } else if d == f64::INFINITY {
            "inf".to_string()
        } else if d == f64::NEG_INFINITY {
            "-inf".to_string()
        } else {
            d.to_string()
        };
        Value::Double(Bytes::from(text))
    }

    /// Create a double value from its decimal text.
    #[inline]
    pub fn double_text(text: impl AsRef<[u8]>) -> Self {
        Value::Double(Bytes::copy_from_slice(text.as_ref()))
    }

    #[inline]
    pub fn array(elements: Vec<Value>) -> Self {
        Value::Array(elements)
    }

    #[inline]
    pub fn set(elements: Vec<Value>) -> Self {
        Value::Set(elements)
    }

    #[inline]
    pub fn map(entries: Vec<(Value, Value)>) -> Self {
        Value::Map(entries)
    }

    /// Create a map from a flat `key, value, key, value, ...` sequence.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OddMapLength`] if the sequence has an odd length.
    pub fn map_from_flat(elements: Vec<Value>) -> Result<Self, Error> {
        if elements.len() % 2 != 0 {
            return Err(Error::OddMapLength(elements.len()));
        }
        let mut entries = Vec::with_capacity(elements.len() / 2);
        let mut iter = elements.into_iter();
        while let (Some(k), Some(v)) = (iter.next(), iter.next()) {
            entries.push((k, v));
        }
        Ok(Value::Map(entries))
    }

    /// Create a simple error value.
    #[inline]
    pub fn simple_error(msg: impl AsRef<[u8]>) -> Self {
        Value::SimpleError(Bytes::copy_from_slice(msg.as_ref()))
    }

    /// Create a blob error value.
    #[inline]
    pub fn blob_error(msg: impl AsRef<[u8]>) -> Self {
        Value::BlobError(Bytes::copy_from_slice(msg.as_ref()))
    }

    #[inline]
    pub fn null() -> Self {
        Value::Null
    }

    /// Attach attribute metadata to this value.
    pub fn with_attributes(self, attrs: Vec<(Value, Value)>) -> Self {
        Value::Attribute {
            attrs,
            value: Box::new(self),
        }
    }

    // ========================================================================
    // Type checks
    // ========================================================================

    /// The reply kind. Attribute metadata is looked through, so this is
    /// never [`Kind::Attribute`].
    pub fn kind(&self) -> Kind {
        match self {
            Value::BulkString(_) => Kind::BulkString,
            Value::SimpleString(_) => Kind::SimpleString,
            Value::Integer(_) => Kind::Integer,
            Value::Boolean(_) => Kind::Boolean,
            Value::Double(_) => Kind::Double,
            Value::Array(_) => Kind::Array,
            Value::Set(_) => Kind::Set,
            Value::Map(_) => Kind::Map,
            Value::SimpleError(_) => Kind::SimpleError,
            Value::BlobError(_) => Kind::BlobError,
            Value::Null => Kind::Null,
            Value::Attribute { value, .. } => value.kind(),
        }
    }

    /// Returns true if this is a null reply.
    #[inline]
    pub fn is_null(&self) -> bool {
        matches!(self.payload(), Value::Null)
    }

    /// Returns true for error and nil replies.
    #[inline]
    pub fn is_error(&self) -> bool {
        self.kind().is_error()
    }

    /// Returns true for bulk and simple strings.
    #[inline]
    pub fn is_string(&self) -> bool {
        self.kind().is_string()
    }

    #[inline]
    pub fn is_composite(&self) -> bool {
        self.kind().is_composite()
    }

    /// The attribute metadata attached to this reply, if any.
    ///
    /// Only the outermost layer is returned when attributes are nested;
    /// inner layers are reachable by matching on [`Value::Attribute`].
    pub fn attributes(&self) -> Option<&[(Value, Value)]> {
        match self {
            Value::Attribute { attrs, .. } => Some(attrs),
            _ => None,
        }
    }

    /// The reply with any attribute wrappers removed.
    pub fn payload(&self) -> &Value {
        let mut value = self;
        while let Value::Attribute { value: inner, .. } = value {
            value = &**inner;
        }
        value
    }

    fn into_payload(self) -> Value {
        let mut value = self;
        while let Value::Attribute { value: inner, .. } = value {
            value = *inner;
        }
        value
    }

    // ========================================================================
    // Conversions
    // ========================================================================

    /// Returns the server error for simple error, blob error and null replies.
    pub fn as_error(&self) -> Option<RedisError> {
        match self.payload() {
            Value::SimpleError(msg) => Some(RedisError::simple(msg.clone())),
            Value::BlobError(msg) => Some(RedisError::blob(msg.clone())),
            Value::Null => Some(RedisError::nil()),
            _ => None,
        }
    }

    /// Returns the payload of a string reply.
    ///
    /// Bulk strings, simple strings and doubles (as their decimal text) are
    /// accepted.
    pub fn as_bytes(&self) -> Result<&[u8], Error> {
        match self.payload() {
            Value::BulkString(s) | Value::SimpleString(s) | Value::Double(s) => Ok(s),
            other => Err(other.mismatch("string")),
        }
    }

    /// Like [`as_bytes`](Self::as_bytes), but requires valid UTF-8.
    pub fn as_str(&self) -> Result<&str, Error> {
        std::str::from_utf8(self.as_bytes()?).map_err(|_| Error::InvalidUtf8)
    }

    pub fn as_i64(&self) -> Result<i64, Error> {
        match self.payload() {
            Value::Integer(n) => Ok(*n),
            other => Err(other.mismatch("integer")),
        }
    }

    /// Returns the value of a boolean reply. Only a stored `1` is true.
    pub fn as_bool(&self) -> Result<bool, Error> {
        match self.payload() {
            Value::Boolean(n) => Ok(*n == 1),
            other => Err(other.mismatch("boolean")),
        }
    }

    /// Parses a double reply.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDouble`] if the server sent malformed text.
    pub fn as_f64(&self) -> Result<f64, Error> {
        match self.payload() {
            Value::Double(text) => parse_double(text),
            other => Err(other.mismatch("double")),
        }
    }

    /// Returns the elements of an array or set reply.
    pub fn as_array(&self) -> Result<&[Value], Error> {
        match self.payload() {
            Value::Array(elements) | Value::Set(elements) => Ok(elements),
            other => Err(other.mismatch("array")),
        }
    }

    /// Owned variant of [`as_array`](Self::as_array).
    pub fn into_array(self) -> Result<Vec<Value>, Error> {
        match self.into_payload() {
            Value::Array(elements) | Value::Set(elements) => Ok(elements),
            other => Err(other.mismatch("array")),
        }
    }

    /// Builds a string-keyed map from a map reply.
    ///
    /// Duplicate keys keep the last value.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NonStringMapKey`] if any key is not a bulk or simple
    /// string, and [`Error::InvalidUtf8`] if a key is not valid UTF-8.
    pub fn as_map(&self) -> Result<HashMap<&str, &Value>, Error> {
        match self.payload() {
            Value::Map(entries) => {
                let mut map = HashMap::with_capacity(entries.len());
                for (key, value) in entries {
                    let key = match key.payload() {
                        Value::BulkString(s) | Value::SimpleString(s) => {
                            std::str::from_utf8(s).map_err(|_| Error::InvalidUtf8)?
                        }
                        other => {
                            tracing::debug!(key = other.kind().name(), "non-string map key");
                            return Err(Error::NonStringMapKey {
                                actual: other.kind(),
                            });
                        }
                    };
                    map.insert(key, value);
                }
                Ok(map)
            }
            other => Err(other.mismatch("map")),
        }
    }

    /// The failure for a conversion that does not match this reply.
    fn mismatch(&self, expected: &'static str) -> Error {
        match self.as_error() {
            Some(err) => Error::Redis(err),
            None => type_mismatch(expected, self.kind()),
        }
    }
}

fn parse_double(text: &[u8]) -> Result<f64, Error> {
    let s = std::str::from_utf8(text).map_err(|e| Error::InvalidDouble(e.to_string()))?;
    match s {
        "inf" | "+inf" => Ok(f64::INFINITY),
        "-inf" => Ok(f64::NEG_INFINITY),
        "nan" | "-nan" => Ok(f64::NAN),
        _ => s
            .parse()
            .map_err(|e: std::num::ParseFloatError| Error::InvalidDouble(format!("{s:?}: {e}"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn all_kinds() -> Vec<Value> {
        vec![
            Value::bulk_string("x"),
            Value::simple_string("OK"),
            Value::integer(1),
            Value::boolean(true),
            Value::double(1.5),
            Value::array(vec![Value::integer(1)]),
            Value::set(vec![Value::integer(1)]),
            Value::map(vec![(Value::bulk_string("a"), Value::integer(1))]),
            Value::simple_error("ERR x"),
            Value::blob_error("ERR y"),
            Value::null(),
        ]
    }

    // ====================================================================
    // Type checks
    // ====================================================================

    #[test]
    fn test_is_null() {
        for value in all_kinds() {
            assert_eq!(value.is_null(), value.kind() == Kind::Null, "{value:?}");
        }
    }

    #[test]
    fn test_as_error_only_for_error_kinds() {
        for value in all_kinds() {
            let expected = matches!(
                value,
                Value::SimpleError(_) | Value::BlobError(_) | Value::Null
            );
            assert_eq!(value.as_error().is_some(), expected, "{value:?}");
        }
    }

    #[test]
    fn test_as_error_kinds() {
        let err = Value::simple_error("ERR boom").as_error().unwrap();
        assert_eq!(err.message(), "ERR boom");
        assert!(!err.is_nil());

        let err = Value::blob_error("SYNTAX bad").as_error().unwrap();
        assert_eq!(err.message(), "SYNTAX bad");

        let err = Value::null().as_error().unwrap();
        assert!(err.is_nil());
    }

    // ====================================================================
    // Strings
    // ====================================================================

    #[test]
    fn test_as_str() {
        assert_eq!(Value::bulk_string("x").as_str().unwrap(), "x");
        assert_eq!(Value::simple_string("OK").as_str().unwrap(), "OK");
        assert_eq!(Value::double_text("3.5").as_str().unwrap(), "3.5");
    }

    #[test]
    fn test_as_bytes_binary() {
        let value = Value::bulk_string([0xffu8, 0x00, 0xfe]);
        assert_eq!(value.as_bytes().unwrap(), &[0xff, 0x00, 0xfe]);
        assert!(matches!(value.as_str(), Err(Error::InvalidUtf8)));
    }

    #[test]
    fn test_as_str_error_reply() {
        let err = Value::simple_error("ERR wrong").as_str().unwrap_err();
        assert_eq!(err.as_redis().unwrap().message(), "ERR wrong");

        let err = Value::null().as_str().unwrap_err();
        assert!(err.is_redis_nil());
    }

    #[test]
    fn test_as_str_type_mismatch() {
        for value in [
            Value::integer(1),
            Value::boolean(true),
            Value::array(vec![]),
            Value::set(vec![]),
            Value::map(vec![]),
        ] {
            let err = value.as_str().unwrap_err();
            assert!(err.is_type_mismatch(), "{value:?}");
        }
    }

    // ====================================================================
    // Scalars
    // ====================================================================

    #[test]
    fn test_as_i64() {
        assert_eq!(Value::integer(-42).as_i64().unwrap(), -42);
        assert_eq!(Value::integer(i64::MAX).as_i64().unwrap(), i64::MAX);
        assert!(Value::bulk_string("42").as_i64().unwrap_err().is_type_mismatch());
        assert!(Value::null().as_i64().unwrap_err().is_redis_nil());
    }

    #[test]
    fn test_as_bool() {
        assert!(Value::boolean(true).as_bool().unwrap());
        assert!(!Value::boolean(false).as_bool().unwrap());
        assert!(Value::boolean_raw(1).as_bool().unwrap());
        assert!(!Value::boolean_raw(0).as_bool().unwrap());
        // Only 1 is true; other encodings are not rejected.
        assert!(!Value::boolean_raw(2).as_bool().unwrap());
        assert!(!Value::boolean_raw(-1).as_bool().unwrap());
    }

    #[test]
    fn test_as_bool_mismatch() {
        let err = Value::integer(1).as_bool().unwrap_err();
        match err {
            Error::TypeMismatch { expected, actual } => {
                assert_eq!(expected, "boolean");
                assert_eq!(actual, Kind::Integer);
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(Value::simple_error("ERR").as_bool().unwrap_err().as_redis().is_some());
    }

    #[test]
    fn test_as_f64() {
        assert_eq!(Value::double_text("2.75").as_f64().unwrap(), 2.75);
        assert_eq!(Value::double_text("-1e3").as_f64().unwrap(), -1000.0);
        assert_eq!(Value::double_text("10").as_f64().unwrap(), 10.0);
        assert_eq!(Value::double(2.5).as_f64().unwrap(), 2.5);
    }

    #[test]
    fn test_as_f64_special() {
        assert_eq!(Value::double_text("inf").as_f64().unwrap(), f64::INFINITY);
        assert_eq!(
            Value::double_text("-inf").as_f64().unwrap(),
            f64::NEG_INFINITY
        );
        assert!(Value::double_text("nan").as_f64().unwrap().is_nan());
        assert!(Value::double(f64::NAN).as_f64().unwrap().is_nan());
        assert_eq!(
            Value::double(f64::NEG_INFINITY).as_f64().unwrap(),
            f64::NEG_INFINITY
        );
    }

    #[test]
    fn test_as_f64_malformed() {
        let err = Value::double_text("abc").as_f64().unwrap_err();
        assert!(matches!(err, Error::InvalidDouble(_)));
        assert!(!err.is_type_mismatch());
    }

    #[test]
    fn test_as_f64_mismatch() {
        assert!(Value::integer(3).as_f64().unwrap_err().is_type_mismatch());
        assert!(Value::bulk_string("3.0").as_f64().unwrap_err().is_type_mismatch());
    }

    // ====================================================================
    // Composites
    // ====================================================================

    #[test]
    fn test_as_array() {
        let value = Value::array(vec![Value::integer(1), Value::bulk_string("a")]);
        let elements = value.as_array().unwrap();
        assert_eq!(elements.len(), 2);
        assert_eq!(elements[0], Value::integer(1));
        assert_eq!(elements[1], Value::bulk_string("a"));
    }

    #[test]
    fn test_as_array_set_keeps_order_and_duplicates() {
        let value = Value::set(vec![
            Value::integer(3),
            Value::integer(1),
            Value::integer(3),
        ]);
        let elements = value.as_array().unwrap();
        assert_eq!(
            elements,
            &[Value::integer(3), Value::integer(1), Value::integer(3)]
        );
    }

    #[test]
    fn test_into_array() {
        let value = Value::array(vec![Value::integer(1)]).with_attributes(vec![]);
        assert_eq!(value.into_array().unwrap(), vec![Value::integer(1)]);
        assert!(Value::integer(1).into_array().unwrap_err().is_type_mismatch());
        assert!(Value::null().into_array().unwrap_err().is_redis_nil());
    }

    #[test]
    fn test_as_array_mismatch() {
        assert!(Value::map(vec![]).as_array().unwrap_err().is_type_mismatch());
        assert!(Value::bulk_string("a").as_array().unwrap_err().is_type_mismatch());
    }

    #[test]
    fn test_as_map() {
        let value = Value::map(vec![
            (Value::bulk_string("a"), Value::integer(1)),
            (Value::simple_string("b"), Value::integer(2)),
        ]);
        let map = value.as_map().unwrap();
        assert_eq!(map.len(), 2);
        assert_eq!(map["a"], &Value::integer(1));
        assert_eq!(map["b"], &Value::integer(2));
    }

    #[test]
    fn test_as_map_last_write_wins() {
        let value = Value::map(vec![
            (Value::bulk_string("a"), Value::integer(1)),
            (Value::bulk_string("a"), Value::integer(2)),
        ]);
        let map = value.as_map().unwrap();
        assert_eq!(map.len(), 1);
        assert_eq!(map["a"], &Value::integer(2));
    }

    #[test]
    fn test_as_map_non_string_key() {
        let value = Value::map(vec![(Value::integer(5), Value::bulk_string("x"))]);
        let err = value.as_map().unwrap_err();
        assert!(err.is_type_mismatch());
        assert!(matches!(
            err,
            Error::NonStringMapKey {
                actual: Kind::Integer
            }
        ));
    }

    #[test]
    fn test_as_map_attributed_key() {
        let key = Value::bulk_string("a")
            .with_attributes(vec![(Value::bulk_string("ttl"), Value::integer(5))]);
        let value = Value::map(vec![(key, Value::integer(1))]);
        let map = value.as_map().unwrap();
        assert_eq!(map["a"], &Value::integer(1));

        let key = Value::integer(5).with_attributes(vec![]);
        let err = Value::map(vec![(key, Value::null())]).as_map().unwrap_err();
        assert!(matches!(
            err,
            Error::NonStringMapKey {
                actual: Kind::Integer
            }
        ));
    }

    #[test]
    fn test_as_map_mismatch() {
        assert!(Value::array(vec![]).as_map().unwrap_err().is_type_mismatch());
        assert!(Value::blob_error("ERR").as_map().unwrap_err().as_redis().is_some());
    }

    #[test]
    fn test_map_from_flat() {
        let value = Value::map_from_flat(vec![
            Value::bulk_string("a"),
            Value::integer(1),
            Value::bulk_string("b"),
            Value::integer(2),
        ])
        .unwrap();
        let map = value.as_map().unwrap();
        assert_eq!(map["a"], &Value::integer(1));
        assert_eq!(map["b"], &Value::integer(2));
    }

    #[test]
    fn test_map_from_flat_odd() {
        let err = Value::map_from_flat(vec![Value::bulk_string("a")]).unwrap_err();
        assert!(matches!(err, Error::OddMapLength(1)));
        assert!(err.is_type_mismatch());
    }

    // ====================================================================
    // Attributes
    // ====================================================================

    #[test]
    fn test_attributes_are_transparent() {
        let attrs = vec![(Value::bulk_string("ttl"), Value::integer(30))];
        let value = Value::integer(7).with_attributes(attrs.clone());

        assert_eq!(value.kind(), Kind::Integer);
        assert_eq!(value.as_i64().unwrap(), 7);
        assert_eq!(value.attributes().unwrap(), attrs.as_slice());
        assert_eq!(value.payload(), &Value::integer(7));
        assert!(Value::integer(7).attributes().is_none());
    }

    #[test]
    fn test_kind_never_attribute() {
        let nested = Value::array(vec![])
            .with_attributes(vec![])
            .with_attributes(vec![]);
        assert_eq!(nested.kind(), Kind::Array);
        assert!(nested.is_composite());
        assert!(!Value::integer(1).with_attributes(vec![]).is_composite());
    }

    #[test]
    fn test_nested_attributes_outermost() {
        let inner = vec![(Value::bulk_string("inner"), Value::integer(1))];
        let outer = vec![(Value::bulk_string("outer"), Value::integer(2))];
        let value = Value::integer(7)
            .with_attributes(inner.clone())
            .with_attributes(outer.clone());
        assert_eq!(value.attributes().unwrap(), outer.as_slice());
        match &value {
            Value::Attribute { value: wrapped, .. } => {
                assert_eq!(wrapped.attributes().unwrap(), inner.as_slice());
            }
            other => panic!("unexpected value: {other:?}"),
        }
        assert_eq!(value.as_i64().unwrap(), 7);
    }

    #[test]
    fn test_attributes_on_error() {
        let value = Value::null().with_attributes(vec![]);
        assert!(value.is_null());
        assert!(value.as_error().unwrap().is_nil());
    }
}
