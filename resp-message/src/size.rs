//! Approximate memory footprint of a [`Value`].
//!
//! Client-side caches use this for capacity accounting when an entry is
//! inserted. The estimate is structural: a fixed overhead per value, plus
//! payload bytes, plus every child and any attribute metadata. It is not
//! memoized; callers compute it once per stored entry.
//!
//! # Example
//!
//! ```
//! use resp_message::{SizeOptions, Value, approximate_size};
//!
//! let one = Value::array(vec![Value::bulk_string("a")]);
//! let two = Value::array(vec![Value::bulk_string("a"), Value::bulk_string("b")]);
//! assert!(approximate_size(&two) > approximate_size(&one));
//!
//! // A cache that only cares about payload bytes can drop the overhead.
//! let payload_only = SizeOptions::new().value_overhead(0);
//! assert_eq!(payload_only.approximate_size(&Value::bulk_string("hello")), 5);
//! ```

use crate::Value;

/// In-memory size of a single [`Value`].
pub const VALUE_STRUCT_SIZE: usize = std::mem::size_of::<Value>();

/// Configuration for size estimation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SizeOptions {
    /// Bytes charged for every value, before its payload.
    pub value_overhead: usize,
}

impl Default for SizeOptions {
    fn default() -> Self {
        Self::new()
    }
}

impl SizeOptions {
    /// Create size options with default values.
    pub const fn new() -> Self {
        Self {
            value_overhead: VALUE_STRUCT_SIZE,
        }
    }

    /// Set the per-value overhead.
    ///
    /// With an overhead of 0 the estimate is payload bytes only: appending
    /// an integer, boolean or null then leaves the size unchanged, so growth
    /// is monotonic but no longer strict.
    pub const fn value_overhead(mut self, bytes: usize) -> Self {
        self.value_overhead = bytes;
        self
    }

    /// Estimate the footprint of `value` in bytes.
    pub fn approximate_size(&self, value: &Value) -> usize {
        let payload = match value {
            Value::BulkString(s)
            | Value::SimpleString(s)
            | Value::Double(s)
            | Value::SimpleError(s)
            | Value::BlobError(s) => s.len(),
            Value::Integer(_) | Value::Boolean(_) | Value::Null => 0,
            Value::Array(elements) | Value::Set(elements) => {
                elements.iter().map(|v| self.approximate_size(v)).sum()
            }
            Value::Map(entries) => self.pairs_size(entries),
            Value::Attribute { attrs, value } => {
                self.pairs_size(attrs) + self.approximate_size(value)
            }
        };
        self.value_overhead + payload
    }

    fn pairs_size(&self, pairs: &[(Value, Value)]) -> usize {
        pairs
            .iter()
            .map(|(k, v)| self.approximate_size(k) + self.approximate_size(v))
            .sum()
    }
}

/// Estimate the footprint of `value` in bytes with default options.
#[inline]
pub fn approximate_size(value: &Value) -> usize {
    SizeOptions::new().approximate_size(value)
}
