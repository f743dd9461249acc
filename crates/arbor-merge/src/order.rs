//! Sequence reassembly: combine the member orders of several versions.

use std::collections::HashSet;
use std::hash::Hash;

/// Interleave `orders` into a single order of the keys accepted by `keep`.
///
/// The first order is taken as is. Keys missing from it are then placed
/// following each later order in turn: a key goes directly before its
/// nearest successor in that order that is already placed, or at the end
/// when it has none. Keys already placed are never moved.
pub(crate) fn reassemble<K, F>(orders: &[Vec<K>], keep: F) -> Vec<K>
where
    K: Copy + Eq + Hash,
    F: Fn(&K) -> bool,
{
    let mut result: Vec<K> = Vec::new();
    let mut placed: HashSet<K> = HashSet::new();

    let Some((first, rest)) = orders.split_first() else {
        return result;
    };
    for key in first {
        if keep(key) && placed.insert(*key) {
            result.push(*key);
        }
    }

    for order in rest {
        let mut successor: Option<K> = None;
        for key in order.iter().rev() {
            if placed.contains(key) {
                successor = Some(*key);
                continue;
            }
            if !keep(key) {
                continue;
            }
            let position = successor
                .and_then(|s| result.iter().position(|k| *k == s))
                .unwrap_or(result.len());
            result.insert(position, *key);
            placed.insert(*key);
            successor = Some(*key);
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(orders: &[&[char]], keep: &[char]) -> String {
        let orders: Vec<Vec<char>> = orders.iter().map(|o| o.to_vec()).collect();
        reassemble(&orders, |k| keep.contains(k)).into_iter().collect()
    }

    #[test]
    fn first_order_wins() {
        assert_eq!(run(&[&['b', 'a', 'c'], &['a', 'b', 'c']], &['a', 'b', 'c']), "bac");
    }

    #[test]
    fn later_additions_follow_their_anchor() {
        assert_eq!(
            run(&[&['b', 'a', 'c'], &['a', 'b', 'c', 'd']], &['a', 'b', 'c', 'd']),
            "bacd"
        );
        assert_eq!(
            run(&[&['a', 'b', 'c'], &['a', 'x', 'y', 'b', 'c']], &['a', 'b', 'c', 'x', 'y']),
            "axybc"
        );
    }

    #[test]
    fn trailing_additions_stay_at_the_end() {
        assert_eq!(run(&[&['b', 'a'], &['a', 'b', 'd']], &['a', 'b', 'd']), "bad");
        assert_eq!(
            run(&[&['c', 'b', 'a'], &['a', 'b', 'c', 'd', 'e']], &['a', 'b', 'c', 'd', 'e']),
            "cbade"
        );
    }

    #[test]
    fn additions_land_before_their_successor() {
        assert_eq!(run(&[&['b', 'a'], &['a', 'x', 'b']], &['a', 'b', 'x']), "xba");
    }

    #[test]
    fn leading_additions_go_to_the_front() {
        assert_eq!(run(&[&['a', 'b', 'c'], &['z', 'a', 'b']], &['a', 'b', 'c', 'z']), "zabc");
    }

    #[test]
    fn dropped_keys_are_skipped() {
        // 'b' is not kept, so 'x' lands after the nearest kept predecessor.
        assert_eq!(run(&[&['a', 'c'], &['a', 'b', 'x', 'c']], &['a', 'c', 'x']), "axc");
    }

    #[test]
    fn third_order_fills_remaining_keys() {
        assert_eq!(
            run(&[&['a', 'c'], &['c'], &['a', 'b', 'c']], &['a', 'b', 'c']),
            "abc"
        );
    }

    #[test]
    fn everything_missing_from_first_order() {
        assert_eq!(run(&[&[], &['a', 'b']], &['a', 'b']), "ab");
    }
}
