//! Merge algebra for divergent achievement state.
//!
//! Two save histories that share an ancestor (a rollback replayed differently,
//! an older save loaded over live state, a copy pulled from sync) are combined
//! with a join: commutative, associative and idempotent. Any number of
//! snapshots merged in any order, with duplicates, converge to the same value.
//!
//! - unlocked: set union, so nothing granted on either branch is lost
//! - progress: pointwise max, with a missing id read as 0
//!
//! Joins are pure. They never grant anything, even when a merged progress
//! value reaches its threshold; that only happens through `progress`.

use crate::state::{PersistedSnapshot, ProgressMap, UnlockedSet};

/// A type with a least-upper-bound operation.
pub trait JoinSemilattice: Sized {
    /// Combine two values into their least upper bound.
    fn join(&self, other: &Self) -> Self;
}

/// The identity element of the join.
pub trait Bottom {
    /// The empty value: `x.join(&bottom()) == x`.
    fn bottom() -> Self;
}

impl JoinSemilattice for UnlockedSet {
    fn join(&self, other: &Self) -> Self {
        UnlockedSet(self.0.union(&other.0).cloned().collect())
    }
}

impl Bottom for UnlockedSet {
    fn bottom() -> Self {
        UnlockedSet::new()
    }
}

impl JoinSemilattice for ProgressMap {
    fn join(&self, other: &Self) -> Self {
        let mut merged = self.0.clone();
        for (id, &value) in &other.0 {
            merged
                .entry(id.clone())
                .and_modify(|current| *current = (*current).max(value))
                .or_insert(value);
        }
        ProgressMap(merged)
    }
}

impl Bottom for ProgressMap {
    fn bottom() -> Self {
        ProgressMap::new()
    }
}

// Component-wise: each slot joins with its own operator.
impl JoinSemilattice for PersistedSnapshot {
    fn join(&self, other: &Self) -> Self {
        Self {
            unlocked: self.unlocked.join(&other.unlocked),
            progress: self.progress.join(&other.progress),
        }
    }
}

impl Bottom for PersistedSnapshot {
    fn bottom() -> Self {
        PersistedSnapshot::new()
    }
}

/// Merge operator for the `unlocked` slot.
pub fn merge_unlocked(a: &UnlockedSet, b: &UnlockedSet) -> UnlockedSet {
    a.join(b)
}

/// Merge operator for the `progress` slot.
pub fn merge_progress(a: &ProgressMap, b: &ProgressMap) -> ProgressMap {
    a.join(b)
}

/// Fold any number of values, starting from bottom.
pub fn merge_all<'a, T, I>(values: I) -> T
where
    T: JoinSemilattice + Bottom + 'a,
    I: IntoIterator<Item = &'a T>,
{
    values
        .into_iter()
        .fold(T::bottom(), |acc, value| acc.join(value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::id::AchievementId;
    use proptest::prelude::*;

    fn unlocked(ids: &[&str]) -> UnlockedSet {
        ids.iter().map(|id| AchievementId::new(*id)).collect()
    }

    fn progress(entries: &[(&str, u64)]) -> ProgressMap {
        entries
            .iter()
            .map(|(id, v)| (AchievementId::new(*id), *v))
            .collect()
    }

    fn assert_join_laws<T>(a: &T, b: &T, c: &T)
    where
        T: JoinSemilattice + PartialEq + std::fmt::Debug,
    {
        assert_eq!(a.join(b), b.join(a), "join not commutative");
        assert_eq!(a.join(b).join(c), a.join(&b.join(c)), "join not associative");
        assert_eq!(&a.join(a), a, "join not idempotent");
    }

    #[test]
    fn test_unlock_merge_is_union() {
        let merged = merge_unlocked(&unlocked(&["b"]), &unlocked(&["c"]));
        assert_eq!(merged, unlocked(&["b", "c"]));
    }

    #[test]
    fn test_progress_merge_takes_max() {
        let merged = merge_progress(&progress(&[("a", 4)]), &progress(&[("a", 7)]));
        assert_eq!(merged, progress(&[("a", 7)]));
    }

    #[test]
    fn test_progress_merge_missing_reads_as_zero() {
        let merged = merge_progress(&progress(&[("a", 4)]), &progress(&[("b", 2)]));
        assert_eq!(merged, progress(&[("a", 4), ("b", 2)]));
    }

    #[test]
    fn test_bottom_is_identity() {
        let snapshot = PersistedSnapshot {
            unlocked: unlocked(&["x"]),
            progress: progress(&[("y", 3)]),
        };
        assert_eq!(snapshot.join(&PersistedSnapshot::bottom()), snapshot);
        assert_eq!(PersistedSnapshot::bottom().join(&snapshot), snapshot);
    }

    #[test]
    fn test_merge_does_not_grant_at_threshold() {
        // Progress that reaches a threshold only through a merge stays
        // progress; unlocking is the backend's job.
        let a = PersistedSnapshot {
            unlocked: UnlockedSet::new(),
            progress: progress(&[("a", 10)]),
        };
        let merged = a.join(&PersistedSnapshot::new());
        assert!(!merged.unlocked.contains("a"));
    }

    #[test]
    fn test_merge_all_any_order() {
        let x = PersistedSnapshot {
            unlocked: unlocked(&["a"]),
            progress: progress(&[("p", 1)]),
        };
        let y = PersistedSnapshot {
            unlocked: unlocked(&["b"]),
            progress: progress(&[("p", 5), ("q", 2)]),
        };
        let z = PersistedSnapshot {
            unlocked: unlocked(&["a", "c"]),
            progress: progress(&[("q", 9)]),
        };

        let forward: PersistedSnapshot = merge_all([&x, &y, &z]);
        let backward: PersistedSnapshot = merge_all([&z, &y, &x, &y]);
        assert_eq!(forward, backward);
        assert_eq!(forward.unlocked, unlocked(&["a", "b", "c"]));
        assert_eq!(forward.progress, progress(&[("p", 5), ("q", 9)]));

        let nothing: PersistedSnapshot = merge_all(std::iter::empty());
        assert!(nothing.is_empty());
    }

    fn arb_unlocked() -> impl Strategy<Value = UnlockedSet> {
        prop::collection::btree_set("[a-e]", 0..5)
            .prop_map(|ids| ids.into_iter().map(AchievementId::new).collect())
    }

    fn arb_progress() -> impl Strategy<Value = ProgressMap> {
        prop::collection::btree_map("[a-e]", 0u64..20, 0..5).prop_map(|entries| {
            entries
                .into_iter()
                .map(|(id, v)| (AchievementId::new(id), v))
                .collect()
        })
    }

    proptest! {
        #[test]
        fn prop_unlocked_join_laws(a in arb_unlocked(), b in arb_unlocked(), c in arb_unlocked()) {
            assert_join_laws(&a, &b, &c);
        }

        #[test]
        fn prop_progress_join_laws(a in arb_progress(), b in arb_progress(), c in arb_progress()) {
            assert_join_laws(&a, &b, &c);
        }

        #[test]
        fn prop_merge_never_regresses(
            ua in arb_unlocked(), ub in arb_unlocked(),
            pa in arb_progress(), pb in arb_progress()
        ) {
            let merged_unlocked = merge_unlocked(&ua, &ub);
            for id in ua.iter().chain(ub.iter()) {
                prop_assert!(merged_unlocked.contains(id.as_str()));
            }
            let distinct: std::collections::BTreeSet<_> = ua.iter().chain(ub.iter()).collect();
            prop_assert_eq!(merged_unlocked.len(), distinct.len());

            let merged_progress = merge_progress(&pa, &pb);
            for (id, value) in merged_progress.iter() {
                let expected = pa.get(id.as_str()).max(pb.get(id.as_str()));
                prop_assert_eq!(value, expected);
            }
            for (id, _) in pa.iter().chain(pb.iter()) {
                prop_assert!(merged_progress.entry_value(id.as_str()).is_some());
            }
        }
    }
}
