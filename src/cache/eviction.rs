//! Eviction Module
//!
//! Capacity enforcement for the entry store.

use tracing::debug;

use crate::cache::LruList;

// == Enforce Capacity ==
/// Evicts least recently used entries until `list.len() <= capacity`.
///
/// Entries inserted in the same logical step leave in insertion order, since
/// that is their order in the list. Returns the evicted keys, oldest first.
pub fn enforce_capacity<T>(list: &mut LruList<T>, capacity: usize) -> Vec<String> {
    let mut evicted = Vec::new();

    while list.len() > capacity {
        match list.pop_front() {
            Some((key, _)) => {
                debug!("LRU eviction: {}", key);
                evicted.push(key);
            }
            None => break,
        }
    }

    evicted
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled(n: usize) -> LruList<usize> {
        let mut list = LruList::new();
        for i in 0..n {
            list.push_back(format!("key{}", i), i);
        }
        list
    }

    #[test]
    fn test_under_capacity_evicts_nothing() {
        let mut list = filled(3);
        assert!(enforce_capacity(&mut list, 3).is_empty());
        assert_eq!(list.len(), 3);
    }

    #[test]
    fn test_evicts_oldest_first() {
        let mut list = filled(5);

        let evicted = enforce_capacity(&mut list, 3);

        assert_eq!(evicted, vec!["key0", "key1"]);
        assert_eq!(list.len(), 3);
        assert!(list.contains("key2"));
    }

    #[test]
    fn test_touched_entry_survives() {
        let mut list = filled(3);
        list.touch("key0");
        list.push_back("key3".to_string(), 3);

        let evicted = enforce_capacity(&mut list, 3);

        assert_eq!(evicted, vec!["key1"]);
        assert!(list.contains("key0"));
    }

    #[test]
    fn test_zero_capacity_empties_list() {
        let mut list = filled(2);
        assert_eq!(enforce_capacity(&mut list, 0).len(), 2);
        assert!(list.is_empty());
    }
}
