//! Fractional position keys for task ordering.
//!
//! A [`PositionKey`] is a string over the base-36 alphabet `0-9a-z` whose
//! lexicographic order encodes an item's position within its partition. The
//! key space is dense: a distinct value always exists strictly between any
//! two distinct keys, so a single insert never rewrites any other item's key.
//!
//! Keys are treated as base-36 fractions (digits after the radix point).
//! Generated keys never end in the minimum digit `0` - a trailing zero would
//! create a lexicographically-distinct but numerically-equal sibling, leaving
//! no room between the two.

use crate::error::{BoardError, Result};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// Ordered digit alphabet. Index in this table is the digit's value.
const DIGITS: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Number of symbols in the alphabet
const BASE: usize = DIGITS.len();

/// A fractional order key.
///
/// Keys are opaque and totally ordered within a single partition. Comparing
/// keys from different partitions is meaningless - partitions are independent
/// key spaces.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PositionKey(String);

impl PositionKey {
    /// The fixed mid-range key assigned to the first item of an empty
    /// partition
    pub fn initial() -> Self {
        Self::generate(None, None).unwrap_or_else(|_| Self("i".to_string()))
    }

    /// The unusable sentinel produced when a stored task carries no key.
    /// Detected by [`PositionKey::is_usable`] and rejected by the index.
    pub(crate) fn missing() -> Self {
        Self(String::new())
    }

    /// Check whether this key can participate in ordering
    pub fn is_usable(&self) -> bool {
        !self.0.is_empty()
    }

    /// Get the key as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Generate a key strictly between the given bounds.
    ///
    /// - `(None, None)`: the fixed mid-range default for an empty partition.
    /// - `(None, Some(after))`: a key strictly below `after` (insert at head),
    ///   derived from `after`'s own digits.
    /// - `(Some(before), None)`: a key strictly above `before` (insert at
    ///   tail), by incrementing or extending `before`.
    /// - `(Some(before), Some(after))`: requires `before < after`; returns a
    ///   key strictly between them. Where adjacent digits leave no gap the
    ///   key is extended with a digit near the middle of the alphabet, so
    ///   only the inserted key lengthens.
    ///
    /// Pure and deterministic. `before >= after` is a caller contract
    /// violation and fails with [`BoardError::KeyOrderViolation`] rather than
    /// silently producing a wrong key.
    pub fn generate(before: Option<&PositionKey>, after: Option<&PositionKey>) -> Result<Self> {
        if let Some(b) = before {
            b.validate()?;
        }
        if let Some(a) = after {
            a.validate()?;
        }
        if let (Some(b), Some(a)) = (before, after) {
            if b.0 >= a.0 {
                return Err(BoardError::KeyOrderViolation {
                    before: b.0.clone(),
                    after: a.0.clone(),
                });
            }
        }

        let low = before.map(|k| k.0.as_str()).unwrap_or("");
        Ok(Self(midpoint(low, after.map(|k| k.0.as_str()))))
    }

    /// Key between two existing keys
    pub fn between(before: &PositionKey, after: &PositionKey) -> Result<Self> {
        Self::generate(Some(before), Some(after))
    }

    /// Key before the current head of a partition
    pub fn before_head(first: &PositionKey) -> Result<Self> {
        Self::generate(None, Some(first))
    }

    /// Key after the current tail of a partition
    pub fn after_tail(last: &PositionKey) -> Result<Self> {
        Self::generate(Some(last), None)
    }

    /// Validate key shape: non-empty, alphabet digits only, no trailing
    /// minimum digit
    fn validate(&self) -> Result<()> {
        if self.0.is_empty() {
            return Err(BoardError::invalid_key(self.0.as_str(), "empty key"));
        }
        if let Some(bad) = self.0.bytes().find(|b| !DIGITS.contains(b)) {
            return Err(BoardError::invalid_key(
                self.0.as_str(),
                format!("digit {:?} outside alphabet", bad as char),
            ));
        }
        if self.0.ends_with('0') {
            return Err(BoardError::invalid_key(self.0.as_str(), "trailing minimum digit"));
        }
        Ok(())
    }
}

impl PartialOrd for PositionKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for PositionKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.cmp(&other.0)
    }
}

impl fmt::Display for PositionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Value of an alphabet byte
fn digit_value(b: u8) -> usize {
    match b {
        b'0'..=b'9' => (b - b'0') as usize,
        b'a'..=b'z' => (b - b'a') as usize + 10,
        // Unreachable for validated keys
        _ => 0,
    }
}

/// Midpoint of two base-36 fractions, `a < b` required.
///
/// `a` may be empty (the open lower boundary, numerically zero); `b` of
/// `None` is the open upper boundary. Walks the common prefix, then either
/// picks the arithmetic midpoint digit where the first differing digits
/// leave a gap, or extends the key by one digit where they are adjacent.
fn midpoint(a: &str, b: Option<&str>) -> String {
    if let Some(b) = b {
        let a_bytes = a.as_bytes();
        let b_bytes = b.as_bytes();
        let mut n = 0;
        while n < b_bytes.len() && a_bytes.get(n).copied().unwrap_or(b'0') == b_bytes[n] {
            n += 1;
        }
        if n > 0 {
            let tail_a = a.get(n..).unwrap_or("");
            return format!("{}{}", &b[..n], midpoint(tail_a, Some(&b[n..])));
        }
    }

    let digit_a = a.as_bytes().first().map(|&c| digit_value(c)).unwrap_or(0);
    let digit_b = b
        .and_then(|s| s.as_bytes().first())
        .map(|&c| digit_value(c))
        .unwrap_or(BASE);

    if digit_b - digit_a > 1 {
        // Room between the digits: take the arithmetic midpoint
        let mid = (digit_a + digit_b + 1) / 2;
        (DIGITS[mid] as char).to_string()
    } else if let Some(b) = b.filter(|s| s.len() > 1) {
        // Adjacent digits but the upper bound has more digits: its first
        // digit alone already sits strictly between the bounds
        b[..1].to_string()
    } else {
        // Adjacent digits with no room above: keep the lower digit and
        // extend into the next fractional place
        let tail_a = a.get(1..).unwrap_or("");
        format!("{}{}", DIGITS[digit_a] as char, midpoint(tail_a, None))
    }
}
