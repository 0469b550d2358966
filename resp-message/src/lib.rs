//! RESP3 response values for Redis clients.
//!
//! This crate is the shared vocabulary between a client's decoder, connection
//! pipeline, cluster router and client-side cache:
//!
//! - **Values**: [`Value`], one variant per RESP3 reply kind, with strict
//!   typed conversions (`as_i64`, `as_str`, `as_map`, ...).
//! - **Errors**: [`Error`] keeps server errors, transport failures and type
//!   mismatches apart. [`RedisError`] classifies server errors, including
//!   cluster redirects (`MOVED`, `ASK`), `TRYAGAIN` and `NOSCRIPT`.
//! - **Results**: [`RedisResult`] pairs a reply with the transport failure that
//!   may have replaced it.
//! - **Sizing**: [`approximate_size`] estimates a reply's memory footprint for
//!   cache eviction accounting.
//!
//! Decoding wire bytes, sending requests and acting on redirects are left to
//! the layers that consume these types.
//!
//! # Example
//!
//! ```
//! use resp_message::{RedisResult, Value};
//!
//! let reply = RedisResult::new(Value::simple_error("MOVED 1234 10.0.0.1:6381"));
//! let err = reply.as_str().unwrap_err();
//! assert_eq!(err.as_redis().unwrap().is_moved(), Some("10.0.0.1:6381"));
//!
//! let reply = RedisResult::new(Value::map(vec![
//!     (Value::bulk_string("a"), Value::integer(1)),
//!     (Value::bulk_string("b"), Value::integer(2)),
//! ]));
//! let map = reply.as_map().unwrap();
//! assert_eq!(map["b"].as_i64().unwrap(), 2);
//! ```

pub mod cluster;
mod error;
mod kind;
mod result;
mod size;
mod value;

pub use cluster::{Redirect, RedirectKind, parse_redirect, redirect_of};
pub use error::{Error, ErrorKind, NIL_MESSAGE, RedisError, TransportError, is_redis_nil};
pub use kind::Kind;
pub use result::RedisResult;
pub use size::{SizeOptions, VALUE_STRUCT_SIZE, approximate_size};
pub use value::Value;
