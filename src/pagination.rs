//! Page request parsing and clamping
//!
//! Pagination input never produces an error. Anything the client sends is
//! parsed leniently and clamped into the safe range, and the effective values
//! are echoed back in the listing response.

use crate::model::ListParams;

/// Page size used when `top` is missing or not a number
pub const DEFAULT_TOP: usize = 50;
/// Largest page a single listing call may return
pub const MAX_TOP: usize = 200;
/// Offset used when `skip` is missing or not a number
pub const DEFAULT_SKIP: usize = 0;
/// Largest offset a listing call may request
pub const MAX_SKIP: usize = 1_000_000;

/// Effective (clamped) pagination window for a listing query
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub top: usize,
    pub skip: usize,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            top: DEFAULT_TOP,
            skip: DEFAULT_SKIP,
        }
    }
}

impl PageRequest {
    /// Builds a page request from raw query values
    ///
    /// `top` ends up in `[1, MAX_TOP]` and `skip` in `[0, MAX_SKIP]`.
    pub fn from_params(params: &ListParams) -> Self {
        Self {
            top: clamp_param(params.top.as_deref(), DEFAULT_TOP, 1, MAX_TOP),
            skip: clamp_param(params.skip.as_deref(), DEFAULT_SKIP, 0, MAX_SKIP),
        }
    }
}

fn clamp_param(raw: Option<&str>, default: usize, min: usize, max: usize) -> usize {
    match raw.and_then(parse_int_prefix) {
        Some(n) => n.clamp(min as i64, max as i64) as usize,
        None => default,
    }
}

/// Reads a leading, optionally signed integer and ignores whatever follows
///
/// `" 42abc"` is 42, `"-5"` is -5, `"abc"` and `""` are `None`. Values too
/// large for `i64` saturate.
fn parse_int_prefix(raw: &str) -> Option<i64> {
    let s = raw.trim_start();
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let mut seen_digit = false;
    let mut value: i64 = 0;
    for b in digits.bytes().take_while(u8::is_ascii_digit) {
        seen_digit = true;
        let digit = i64::from(b - b'0');
        value = if negative {
            value.saturating_mul(10).saturating_sub(digit)
        } else {
            value.saturating_mul(10).saturating_add(digit)
        };
    }

    seen_digit.then_some(value)
}
