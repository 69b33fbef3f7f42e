//! Greedy unit packing.
//!
//! ## The Policy Decision
//!
//! Given atomic units (paragraphs, list items, lines) and a joiner, the
//! packer accumulates greedily left-to-right and **flushes early at the
//! target**, rather than packing each chunk as full as the ceiling
//! allows:
//!
//! ```text
//! tokens:   0 ········ target ········ max
//! chunk A:  ███████████▌        flush  (reached target)
//! chunk B:  ██████████▊         flush
//! chunk C:  ████▍               flush  (input exhausted)
//! ```
//!
//! Maximal packing would produce fewer chunks of wildly varying size;
//! greedy-with-early-flush trades chunk count for uniformity and skips
//! bin-packing entirely. Retrieval behaves better when chunk sizes
//! cluster around one value.
//!
//! Units are never split here — except a single unit that alone
//! exceeds the ceiling, which goes straight to the hard character
//! slicer. Everything finer-grained is the cascade's job
//! ([`split_to_fit`](crate::split_to_fit)), which runs before packing
//! or in the guardrail pass after it.

use crate::bounds::BoundPolicy;
use crate::split::hard_slice;

/// Pack `units` into chunks joined by `joiner`.
///
/// Greedy left-to-right: a unit joins the open buffer unless the join
/// would cross `max_tokens` (flush first), and the buffer flushes as
/// soon as it reaches `target_tokens`. A single unit exceeding the
/// ceiling on its own is hard-sliced immediately. Blank units are
/// skipped; emitted chunks are trimmed and non-empty.
#[must_use]
pub fn pack_units(units: &[String], joiner: &str, policy: &BoundPolicy) -> Vec<String> {
    let mut packed = Vec::new();
    let mut current = String::new();

    for unit in units {
        let unit = unit.trim();
        if unit.is_empty() {
            continue;
        }

        if current.is_empty() {
            if policy.exceeds_len(unit.len()) {
                packed.extend(hard_slice(unit, policy));
                continue;
            }
            current.push_str(unit);
        } else {
            let joined_len = current.len() + joiner.len() + unit.len();
            if policy.exceeds_len(joined_len) {
                packed.push(std::mem::take(&mut current));
                if policy.exceeds_len(unit.len()) {
                    packed.extend(hard_slice(unit, policy));
                    continue;
                }
                current.push_str(unit);
            } else {
                current.push_str(joiner);
                current.push_str(unit);
            }
        }

        // Early flush: stop at the target, don't fill to the ceiling.
        if policy.estimate_tokens(&current) >= policy.target_tokens() {
            packed.push(std::mem::take(&mut current));
        }
    }

    if !current.is_empty() {
        packed.push(current);
    }

    packed
}
