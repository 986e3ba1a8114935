//! Upload batch computation.

use std::collections::HashSet;

/// Target-day local names that are neither confirmed remote nor in flight.
///
/// The result keeps the order of `local` and names each file at most once.
/// Membership is exact filename equality.
pub fn reconcile(local: &[String], confirmed_remote: &[String], in_flight: &[String]) -> Vec<String> {
    let local_set: HashSet<&str> = local.iter().map(String::as_str).collect();

    let accounted_for: HashSet<&str> = confirmed_remote
        .iter()
        .chain(in_flight)
        .map(String::as_str)
        .filter(|name| local_set.contains(name))
        .collect();

    let mut emitted: HashSet<&str> = HashSet::with_capacity(local.len());
    local
        .iter()
        .filter(|name| !accounted_for.contains(name.as_str()))
        .filter(|name| emitted.insert(name.as_str()))
        .cloned()
        .collect()
}
