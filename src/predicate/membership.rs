//! Immutable literal sets with O(1) expected membership tests.

use std::fmt;
use std::hash::Hash;

use hashbrown::HashSet;

use crate::config::PredicateConfig;
use crate::error::{PredicateError, Result};
use crate::observability::{log_trace, log_warn};

use super::member::MemberType;

/// Set of IN-list literals, built once and never modified.
///
/// Duplicates collapse on build. Literals that can never match a row (float
/// `NaN`) are dropped, so [`MembershipSet::size`] may be smaller than the
/// number of literals supplied. Small sets are kept as a flat slice and
/// probed linearly; larger ones live in an open-addressed hash table.
pub struct MembershipSet<T: MemberType> {
    repr: Repr<T::Key>,
}

enum Repr<K> {
    Linear(Vec<K>),
    Hashed(HashSet<K>),
}

/// Deduplicates `keys` into the layout their distinct count calls for.
///
/// The storage is allocated once from `hinted`. Keys are only moved into a
/// second container when the hint lands on the wrong side of `threshold`.
fn collect_keys<K, I>(mut keys: I, hinted: usize, threshold: usize) -> Repr<K>
where
    K: Eq + Hash,
    I: Iterator<Item = K>,
{
    if hinted > threshold {
        let mut table = HashSet::with_capacity(hinted);
        table.extend(keys);
        if table.len() <= threshold {
            return Repr::Linear(table.into_iter().collect());
        }
        table.shrink_to_fit();
        return Repr::Hashed(table);
    }

    let mut linear: Vec<K> = Vec::with_capacity(hinted);
    while let Some(key) = keys.next() {
        if linear.contains(&key) {
            continue;
        }
        linear.push(key);
        if linear.len() > threshold {
            let mut table: HashSet<K> = linear.drain(..).collect();
            table.extend(keys);
            return Repr::Hashed(table);
        }
    }
    Repr::Linear(linear)
}

impl<T: MemberType> MembershipSet<T> {
    /// Builds a set using the default linear-scan threshold.
    ///
    /// # Errors
    ///
    /// Returns [`PredicateError::EmptyInList`] if `values` is empty.
    pub fn build<I>(values: I) -> Result<Self>
    where
        I: IntoIterator<Item = T>,
    {
        Self::build_with(values, &PredicateConfig::default())
    }

    /// Builds a set, choosing its layout from `config`.
    ///
    /// # Errors
    ///
    /// Returns [`PredicateError::EmptyInList`] if `values` is empty.
    pub fn build_with<I>(values: I, config: &PredicateConfig) -> Result<Self>
    where
        I: IntoIterator<Item = T>,
    {
        let values = values.into_iter();
        let hinted = values.size_hint().0;
        let mut literal_count = 0_usize;
        let mut unmatchable = 0_usize;
        let keys = values.filter_map(|value| {
            literal_count += 1;
            let key = value.into_key();
            if key.is_none() {
                unmatchable += 1;
            }
            key
        });
        let repr = collect_keys(keys, hinted, config.linear_scan_threshold);

        if literal_count == 0 {
            return Err(PredicateError::EmptyInList);
        }
        if unmatchable > 0 {
            log_warn!(event = "unmatchable_literals_dropped", count = unmatchable);
        }
        let set = MembershipSet { repr };
        log_trace!(
            event = "membership_set_built",
            literals = literal_count,
            distinct = set.size(),
            hashed = set.is_hashed(),
        );
        Ok(set)
    }

    /// Returns true if `value` equals one of the literals.
    #[inline]
    pub fn contains(&self, value: T::Elem<'_>) -> bool {
        match &self.repr {
            Repr::Linear(keys) => keys.iter().any(|key| T::key_eq(key, value)),
            Repr::Hashed(table) => T::table_contains(table, value),
        }
    }

    /// Returns the number of distinct matchable literals.
    #[must_use]
    pub fn size(&self) -> u32 {
        let len = match &self.repr {
            Repr::Linear(keys) => keys.len(),
            Repr::Hashed(table) => table.len(),
        };
        len as u32
    }

    /// Returns true if no literal can match any row.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.size() == 0
    }

    /// Returns true if the set is backed by a hash table.
    #[must_use]
    pub fn is_hashed(&self) -> bool {
        matches!(self.repr, Repr::Hashed(_))
    }
}

impl<T: MemberType> Clone for MembershipSet<T> {
    fn clone(&self) -> Self {
        let repr = match &self.repr {
            Repr::Linear(keys) => Repr::Linear(keys.clone()),
            Repr::Hashed(table) => Repr::Hashed(table.clone()),
        };
        MembershipSet { repr }
    }
}

impl<T: MemberType> fmt::Debug for MembershipSet<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MembershipSet")
            .field("size", &self.size())
            .field("hashed", &self.is_hashed())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Decimal12, StrSlice};

    #[test]
    fn test_empty_input_rejected() {
        assert!(matches!(
            MembershipSet::<i32>::build(Vec::new()),
            Err(PredicateError::EmptyInList)
        ));
    }

    #[test]
    fn test_duplicates_collapse() {
        let set = MembershipSet::build(vec![4_i32, 5, 5, 6, 4]).unwrap();
        assert_eq!(set.size(), 3);
        assert!(set.contains(5));
        assert!(!set.contains(7));
    }

    #[test]
    fn test_layout_follows_threshold() {
        let small = MembershipSet::build(0_i64..8).unwrap();
        assert!(!small.is_hashed());

        let large = MembershipSet::build(0_i64..9).unwrap();
        assert!(large.is_hashed());
        assert!((0..9).all(|v| large.contains(v)));
        assert!(!large.contains(9));

        let forced = PredicateConfig::new().with_linear_scan_threshold(0);
        assert!(MembershipSet::build_with(vec![1_i8], &forced).unwrap().is_hashed());
    }

    #[test]
    fn test_layout_counts_distinct_literals() {
        let repeated = MembershipSet::build(vec![7_i32; 100]).unwrap();
        assert!(!repeated.is_hashed());
        assert_eq!(repeated.size(), 1);
        assert!(repeated.contains(7));

        // `filter` hides the length, so the set starts out linear.
        let unhinted = MembershipSet::build((0_i32..20).filter(|v| v % 2 == 0)).unwrap();
        assert!(unhinted.is_hashed());
        assert_eq!(unhinted.size(), 10);
        assert!((0..20).all(|v| unhinted.contains(v) == (v % 2 == 0)));
    }

    #[test]
    fn test_small_set_is_stored_without_a_table() {
        let set = MembershipSet::build(vec![3_i64, 1, 3, 2]).unwrap();
        match &set.repr {
            Repr::Linear(keys) => assert_eq!(keys, &[3, 1, 2]),
            Repr::Hashed(_) => panic!("expected a linear set"),
        }
    }

    #[test]
    fn test_float_nan_never_matches_and_zero_is_unsigned() {
        for threshold in [0, 8] {
            let config = PredicateConfig::new().with_linear_scan_threshold(threshold);
            let set = MembershipSet::build_with(vec![f64::NAN, 0.0, 1.5], &config).unwrap();
            assert_eq!(set.size(), 2);
            assert!(!set.contains(f64::NAN));
            assert!(set.contains(-0.0));
            assert!(set.contains(1.5));
        }
    }

    #[test]
    fn test_only_nan_literals_give_empty_set() {
        let set = MembershipSet::build(vec![f32::NAN]).unwrap();
        assert!(set.is_empty());
        assert!(!set.contains(f32::NAN));
    }

    #[test]
    fn test_decimal_requires_both_parts() {
        let set = MembershipSet::build(vec![Decimal12::new(4, 4)]).unwrap();
        assert!(set.contains(Decimal12::new(4, 4)));
        assert!(!set.contains(Decimal12::new(4, 5)));
    }

    #[test]
    fn test_string_membership_is_bytewise() {
        for threshold in [0, 8] {
            let config = PredicateConfig::new().with_linear_scan_threshold(threshold);
            let set = MembershipSet::build_with(
                vec![b"a".to_vec(), b"bb".to_vec(), b"ccc".to_vec()],
                &config,
            )
            .unwrap();
            let buffer = b"xbbx";
            assert!(set.contains(StrSlice::new(&buffer[1..3])));
            assert!(!set.contains(StrSlice::from("b")));
            assert!(!set.contains(StrSlice::from("")));
        }
    }
}
