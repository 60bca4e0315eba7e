//! List and string builtins
//!
//! Direct wrappers over container and string primitives: the legacy
//! push/pop/shift/unshift/reverse/sort family plus split/join/chomp. No
//! invariants beyond delegating faithfully; they exist so translated code
//! has a call for every builtin it used to have.

use anyhow::Result;

use crate::engine;

/// Append items to the end of the list.
pub fn push<T>(list: &mut Vec<T>, items: impl IntoIterator<Item = T>) {
    list.extend(items);
}

/// Remove and return the last element.
pub fn pop<T>(list: &mut Vec<T>) -> Option<T> {
    list.pop()
}

/// Remove and return the first element.
pub fn shift<T>(list: &mut Vec<T>) -> Option<T> {
    if list.is_empty() { None } else { Some(list.remove(0)) }
}

/// Prepend items to the front of the list, preserving their order.
pub fn unshift<T>(list: &mut Vec<T>, items: impl IntoIterator<Item = T>) {
    let mut front: Vec<T> = items.into_iter().collect();
    front.extend(list.drain(..));
    *list = front;
}

/// The list in reverse order. The legacy builtin returns a new list.
pub fn reverse<T: Clone>(list: &[T]) -> Vec<T> {
    list.iter().rev().cloned().collect()
}

/// The list sorted by the default string ordering. Returns a new list.
pub fn sort<T: Clone + Ord>(list: &[T]) -> Vec<T> {
    let mut sorted = list.to_vec();
    sorted.sort();
    sorted
}

/// Split `expr` on a regex pattern. A missing pattern means "runs of
/// whitespace"; `limit` caps the number of fields the way the legacy
/// builtin does (the last field keeps the unsplit remainder).
pub fn split(pattern: Option<&str>, expr: &str, limit: Option<usize>) -> Result<Vec<String>> {
    let re = engine::compile(pattern.unwrap_or(r"\s+"), false)?;
    let fields = match limit {
        Some(n) => re.splitn(expr, n).map(String::from).collect(),
        None => re.split(expr).map(String::from).collect(),
    };
    Ok(fields)
}

/// Join the items with a separator.
pub fn join(separator: &str, items: &[String]) -> String {
    items.join(separator)
}

/// Strip trailing newlines, returning the chomped string.
pub fn chomp(s: &str) -> &str {
    s.trim_end_matches('\n')
}
