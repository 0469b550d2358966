//! Redis Cluster redirect parsing.
//!
//! A cluster node answers a request for a slot it does not serve with one of
//!
//! - `MOVED <slot> <host:port>`: the slot is permanently owned elsewhere.
//! - `ASK <slot> <host:port>`: one-time redirect during slot migration.
//!
//! This module only parses; following the redirect belongs to the router.

use crate::Value;

/// The kind of cluster redirect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RedirectKind {
    /// MOVED: slot permanently owned by another node.
    Moved,
    /// ASK: one-time redirect during slot migration.
    Ask,
}

/// A parsed MOVED or ASK redirect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Redirect {
    pub kind: RedirectKind,
    pub slot: u16,
    /// Address as `host:port` string. Kept as String because some deployments use hostnames.
    pub address: String,
}

/// Parse a MOVED or ASK redirect from raw error text.
///
/// Returns `None` if the text is not a well-formed redirect.
pub fn parse_redirect(msg: &[u8]) -> Option<Redirect> {
    let kind = if msg.starts_with(b"MOVED ") {
        RedirectKind::Moved
    } else if msg.starts_with(b"ASK ") {
        RedirectKind::Ask
    } else {
        return None;
    };

    let slot: u16 = std::str::from_utf8(field(msg, 1)?).ok()?.parse().ok()?;
    let address = std::str::from_utf8(field(msg, 2)?).ok()?;
    if address.is_empty() {
        tracing::debug!(slot, "redirect without address");
        return None;
    }

    Some(Redirect {
        kind,
        slot,
        address: address.to_string(),
    })
}

/// Parse a MOVED or ASK redirect from a reply value.
///
/// Returns `None` if the value is not an error or not a redirect.
pub fn redirect_of(value: &Value) -> Option<Redirect> {
    value.as_error()?.redirect()
}

/// Returns the `n`th space-delimited field of `msg`.
pub(crate) fn field(msg: &[u8], n: usize) -> Option<&[u8]> {
    let mut ends = memchr::memchr_iter(b' ', msg).chain(std::iter::once(msg.len()));
    let mut start = 0;
    for _ in 0..n {
        start = ends.next()? + 1;
    }
    let end = ends.next()?;
    Some(&msg[start..end])
}
