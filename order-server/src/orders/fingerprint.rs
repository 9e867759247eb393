//! Order fingerprinting
//!
//! A fingerprint identifies the equivalence class of an order's
//! `(items, amount)` pair: same multiset of item strings (order does not
//! matter) and numerically-equal amount always hash to the same value.
//!
//! Fields are hashed length-prefixed and domain-separated so that
//! different item sets can never collide by stringifying identically
//! (`["ab","c"]` vs `["a","bc"]`).

use rust_decimal::Decimal;
use sha2::{Digest, Sha256};

/// Compute the idempotency key for a submission.
///
/// Pure function: no I/O, deterministic for the same logical input.
pub fn fingerprint(items: &[String], amount: Decimal) -> String {
    let mut sorted: Vec<&str> = items.iter().map(String::as_str).collect();
    sorted.sort_unstable();

    let mut hasher = Sha256::new();
    for item in &sorted {
        // length prefix keeps item boundaries unambiguous
        hasher.update((item.len() as u64).to_be_bytes());
        hasher.update(item.as_bytes());
    }
    hasher.update(b"\x00amount:");
    hasher.update(canonical_amount(amount).as_bytes());

    hex::encode(hasher.finalize())
}

/// Render an amount with exactly two fractional digits, so that
/// numerically-equal representations (100.5, 100.50) serialize
/// identically.
fn canonical_amount(amount: Decimal) -> String {
    let mut canonical = amount;
    canonical.rescale(2);
    canonical.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn items(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    #[test]
    fn item_order_is_not_significant() {
        assert_eq!(
            fingerprint(&items(&["a", "b"]), dec("10.00")),
            fingerprint(&items(&["b", "a"]), dec("10.00")),
        );
    }

    #[test]
    fn amount_representations_canonicalize() {
        let i = items(&["item1", "item2"]);
        assert_eq!(fingerprint(&i, dec("100.5")), fingerprint(&i, dec("100.50")));
        assert_eq!(fingerprint(&i, dec("7")), fingerprint(&i, dec("7.00")));
    }

    #[test]
    fn item_boundaries_do_not_collide() {
        assert_ne!(
            fingerprint(&items(&["ab", "c"]), dec("1.00")),
            fingerprint(&items(&["a", "bc"]), dec("1.00")),
        );
        assert_ne!(
            fingerprint(&items(&["abc"]), dec("1.00")),
            fingerprint(&items(&["ab", "c"]), dec("1.00")),
        );
    }

    #[test]
    fn duplicate_items_are_distinct_from_single() {
        assert_ne!(
            fingerprint(&items(&["a", "a"]), dec("1.00")),
            fingerprint(&items(&["a"]), dec("1.00")),
        );
        // sort is total for duplicate strings: deterministic output
        assert_eq!(
            fingerprint(&items(&["a", "a", "b"]), dec("1.00")),
            fingerprint(&items(&["b", "a", "a"]), dec("1.00")),
        );
    }

    #[test]
    fn amount_is_significant() {
        let i = items(&["item1"]);
        assert_ne!(fingerprint(&i, dec("10.00")), fingerprint(&i, dec("10.01")));
    }

    #[test]
    fn output_is_lowercase_hex_sha256() {
        let fp = fingerprint(&items(&["item1"]), dec("1.00"));
        assert_eq!(fp.len(), 64);
        assert!(fp.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }
}
