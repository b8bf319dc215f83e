use float_ord::FloatOrd;
use std::collections::{btree_map, BTreeMap};

/// Sorted multiset of samples, storing each distinct value once along with
/// its multiplicity.
///
/// Memory grows with the number of *distinct* values, not with the number of
/// insertions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderedMultiset {
    entries: BTreeMap<FloatOrd<f64>, u64>,
    total: u64,
}

impl OrderedMultiset {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one occurrence of `value`.
    ///
    /// Values must be finite; the input layer is expected to filter out NaN
    /// and infinities.
    pub fn insert(&mut self, value: f64) {
        debug_assert!(value.is_finite(), "non-finite value {value}");
        // -0.0 and 0.0 share one entry.
        let value = if value == 0.0 { 0.0 } else { value };
        *self.entries.entry(FloatOrd(value)).or_insert(0) += 1;
        self.total += 1;
    }

    /// Number of distinct values.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of all multiplicities.
    #[inline]
    pub fn total(&self) -> u64 {
        self.total
    }

    /// Multiplicity of `value`, zero if absent.
    pub fn multiplicity(&self, value: f64) -> u64 {
        let value = if value == 0.0 { 0.0 } else { value };
        self.entries.get(&FloatOrd(value)).copied().unwrap_or(0)
    }

    /// Fresh ascending traversal of `(value, multiplicity)` pairs.
    #[inline]
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            inner: self.entries.iter(),
        }
    }
}

impl Extend<f64> for OrderedMultiset {
    fn extend<I: IntoIterator<Item = f64>>(&mut self, iter: I) {
        for value in iter {
            self.insert(value);
        }
    }
}

impl FromIterator<f64> for OrderedMultiset {
    fn from_iter<I: IntoIterator<Item = f64>>(iter: I) -> Self {
        let mut set = Self::new();
        set.extend(iter);
        set
    }
}

impl<'a> IntoIterator for &'a OrderedMultiset {
    type Item = (f64, u64);
    type IntoIter = Iter<'a>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Ascending iterator over an [OrderedMultiset].
#[derive(Debug, Clone)]
pub struct Iter<'a> {
    inner: btree_map::Iter<'a, FloatOrd<f64>, u64>,
}

impl Iterator for Iter<'_> {
    type Item = (f64, u64);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(k, c)| (k.0, *c))
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl DoubleEndedIterator for Iter<'_> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|(k, c)| (k.0, *c))
    }
}

impl ExactSizeIterator for Iter<'_> {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicates_increment_multiplicity() {
        let set: OrderedMultiset = [3.0, 1.0, 3.0, 2.0, 3.0].into_iter().collect();

        assert_eq!(set.len(), 3);
        assert_eq!(set.total(), 5);
        assert_eq!(set.multiplicity(3.0), 3);
        assert_eq!(set.multiplicity(4.0), 0);
    }

    #[test]
    fn test_ascending_traversal() {
        let set: OrderedMultiset = [5.0, -1.5, 2.0, 5.0, 0.25].into_iter().collect();

        let pairs: Vec<_> = set.iter().collect();
        assert_eq!(pairs, vec![(-1.5, 1), (0.25, 1), (2.0, 1), (5.0, 2)]);

        // A second traversal starts over.
        assert_eq!(set.iter().count(), 4);
        assert_eq!(set.iter().next_back(), Some((5.0, 2)));
    }

    #[test]
    fn test_signed_zero_shares_entry() {
        let set: OrderedMultiset = [0.0, -0.0].into_iter().collect();

        assert_eq!(set.len(), 1);
        assert_eq!(set.multiplicity(0.0), 2);
    }

    #[test]
    fn test_empty() {
        let set = OrderedMultiset::new();

        assert!(set.is_empty());
        assert_eq!(set.total(), 0);
        assert_eq!(set.iter().next(), None);
    }
}
