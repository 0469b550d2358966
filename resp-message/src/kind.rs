//! RESP3 wire type markers.
//!
//! Every decoded response carries exactly one of these kinds. The decoder
//! identifies them by the first byte of each frame:
//!
//! | Kind | Prefix | Payload |
//! |---|---|---|
//! | bulk string | `$` | bytes |
//! | simple string | `+` | bytes |
//! | integer | `:` | `i64` |
//! | boolean | `#` | `i64` (1 = true) |
//! | double | `,` | decimal text |
//! | array | `*` | children |
//! | set | `~` | children |
//! | map | `%` | key/value pairs |
//! | simple error | `-` | text |
//! | blob error | `!` | text |
//! | null | `_` | none |
//! | attribute | `\|` | key/value pairs + carried value |

use std::fmt;

/// The wire type of a [`Value`](crate::Value).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    BulkString,
    SimpleString,
    Integer,
    Boolean,
    Double,
    Array,
    Set,
    Map,
    SimpleError,
    BlobError,
    Null,
    /// Attribute frame prefix. Only produced by [`Kind::from_prefix`];
    /// [`Value::kind`](crate::Value::kind) reports the annotated reply's kind.
    Attribute,
}

impl Kind {
    /// All kinds, in wire-table order.
    pub const ALL: [Kind; 12] = [
        Kind::BulkString,
        Kind::SimpleString,
        Kind::Integer,
        Kind::Boolean,
        Kind::Double,
        Kind::Array,
        Kind::Set,
        Kind::Map,
        Kind::SimpleError,
        Kind::BlobError,
        Kind::Null,
        Kind::Attribute,
    ];

    /// The RESP3 prefix byte for this kind.
    #[inline]
    pub const fn prefix(self) -> u8 {
        match self {
            Kind::BulkString => b'$',
            Kind::SimpleString => b'+',
            Kind::Integer => b':',
            Kind::Boolean => b'#',
            Kind::Double => b',',
            Kind::Array => b'*',
            Kind::Set => b'~',
            Kind::Map => b'%',
            Kind::SimpleError => b'-',
            Kind::BlobError => b'!',
            Kind::Null => b'_',
            Kind::Attribute => b'|',
        }
    }

    /// Look up a kind by its prefix byte.
    ///
    /// Returns `None` for prefixes outside the supported RESP3 subset
    /// (verbatim strings, big numbers, push frames, ...).
    pub const fn from_prefix(prefix: u8) -> Option<Kind> {
        Some(match prefix {
            b'$' => Kind::BulkString,
            b'+' => Kind::SimpleString,
            b':' => Kind::Integer,
            b'#' => Kind::Boolean,
            b',' => Kind::Double,
            b'*' => Kind::Array,
            b'~' => Kind::Set,
            b'%' => Kind::Map,
            b'-' => Kind::SimpleError,
            b'!' => Kind::BlobError,
            b'_' => Kind::Null,
            b'|' => Kind::Attribute,
            _ => return None,
        })
    }

    /// Human-readable name, used in error messages.
    pub const fn name(self) -> &'static str {
        match self {
            Kind::BulkString => "bulk string",
            Kind::SimpleString => "simple string",
            Kind::Integer => "integer",
            Kind::Boolean => "boolean",
            Kind::Double => "double",
            Kind::Array => "array",
            Kind::Set => "set",
            Kind::Map => "map",
            Kind::SimpleError => "simple error",
            Kind::BlobError => "blob error",
            Kind::Null => "null",
            Kind::Attribute => "attribute",
        }
    }

    /// Returns true for the kinds that carry a text payload usable as a string.
    #[inline]
    pub const fn is_string(self) -> bool {
        matches!(self, Kind::BulkString | Kind::SimpleString)
    }

    /// Returns true for the kinds reported through the error channel.
    ///
    /// Null is error-shaped: a nil reply surfaces as an error so callers
    /// cannot mistake it for an empty string.
    #[inline]
    pub const fn is_error(self) -> bool {
        matches!(self, Kind::SimpleError | Kind::BlobError | Kind::Null)
    }

    /// Returns true for kinds whose payload is a sequence of child values.
    #[inline]
    pub const fn is_composite(self) -> bool {
        matches!(self, Kind::Array | Kind::Set | Kind::Map | Kind::Attribute)
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ('{}')", self.name(), self.prefix() as char)
    }
}
