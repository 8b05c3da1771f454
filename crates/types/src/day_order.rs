//! Canonical weekday ordering, shared by the loader and the domain model so
//! the output column order never depends on input row order.

/// Monday → Sunday, the natural weekday sequence. Day names found in input
/// data that don't match one of these (case-sensitive) are appended after,
/// sorted alphabetically.
pub const CANONICAL_WEEKDAYS: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

/// Assigns a dense `day_index` to each distinct day name: weekdays found in
/// `CANONICAL_WEEKDAYS` come first in that order, any other names are
/// appended afterwards in alphabetical order.
pub fn order_day_names<'a>(names: impl Iterator<Item = &'a str>) -> Vec<String> {
    use std::collections::BTreeSet;

    let mut seen: BTreeSet<&str> = BTreeSet::new();
    for n in names {
        seen.insert(n);
    }

    let mut ordered: Vec<String> = Vec::new();
    for &w in &CANONICAL_WEEKDAYS {
        if seen.remove(w) {
            ordered.push(w.to_string());
        }
    }
    // remaining names, already alphabetical because `seen` is a BTreeSet
    ordered.extend(seen.into_iter().map(|s| s.to_string()));
    ordered
}
