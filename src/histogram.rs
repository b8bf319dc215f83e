use crate::{
    config::BucketCount,
    error::{Result, SummaryError},
    multiset::OrderedMultiset,
};

/// One equal-width bucket of a [Histogram].
///
/// Covers `[start, end)`, except the last bucket which also includes `end`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HistogramBucket {
    pub start: f64,
    pub end: f64,
    pub count: u64,
}

/// Equal-width histogram spanning `[min, max]` of a sample.
#[derive(Debug, Clone, PartialEq)]
pub struct Histogram {
    bucket_size: f64,
    buckets: Vec<HistogramBucket>,
}

impl Histogram {
    /// Width of every bucket; zero when all samples are equal.
    #[inline]
    pub fn bucket_size(&self) -> f64 {
        self.bucket_size
    }

    #[inline]
    pub fn buckets(&self) -> &[HistogramBucket] {
        &self.buckets
    }

    /// Sum of all bucket counts.
    pub fn total(&self) -> u64 {
        self.buckets.iter().map(|b| b.count).sum()
    }

    /// Largest single bucket count.
    pub fn max_count(&self) -> u64 {
        self.buckets.iter().map(|b| b.count).max().unwrap_or(0)
    }

    /// Buckets `set` with a dedicated traversal.
    pub fn build(set: &OrderedMultiset, buckets: BucketCount) -> Result<Self> {
        let (Some((min, _)), Some((max, _))) = (set.iter().next(), set.iter().next_back()) else {
            return Err(SummaryError::NoData);
        };
        let mut builder = HistogramBuilder::new(buckets, min, max);
        for (value, multiplicity) in set {
            builder.observe(value, multiplicity);
        }
        Ok(builder.finish())
    }
}

/// Assigns values to buckets during an ascending traversal.
///
/// A value lying exactly on a boundary between two buckets goes to the upper
/// one. The last bucket absorbs everything from its start up to and
/// including `max`. `min` always stays in the first bucket, even when the
/// bucket size is below the float resolution at `min`.
#[derive(Debug, Clone)]
pub struct HistogramBuilder {
    min: f64,
    max: f64,
    bucket_size: f64,
    counts: Vec<u64>,
    current: usize,
    limit: f64,
}

impl HistogramBuilder {
    pub fn new(buckets: BucketCount, min: f64, max: f64) -> Self {
        let n = buckets.get();
        // Dividing first keeps the width finite for ranges wider than f64::MAX.
        let bucket_size = max / n as f64 - min / n as f64;
        let mut builder = Self {
            min,
            max,
            bucket_size,
            counts: vec![0; n],
            current: 0,
            limit: min,
        };
        builder.limit = builder.boundary(1);
        builder
    }

    /// Lower bound of bucket `i`.
    fn boundary(&self, i: usize) -> f64 {
        if i == 0 {
            return self.min;
        }
        let offset = i as f64 * self.bucket_size;
        if offset.is_finite() {
            self.min + offset
        } else {
            let half = i as f64 * (self.bucket_size / 2.0);
            self.min + half + half
        }
    }

    /// Consumes the next distinct value of the traversal.
    pub fn observe(&mut self, value: f64, multiplicity: u64) {
        if self.max == self.min {
            self.counts[0] += multiplicity;
            return;
        }
        let last = self.counts.len() - 1;
        while value >= self.limit && value > self.min && self.current < last {
            self.current += 1;
            self.limit = self.boundary(self.current + 1);
        }
        self.counts[self.current] += multiplicity;
    }

    pub fn finish(self) -> Histogram {
        let last = self.counts.len() - 1;
        let buckets = self
            .counts
            .iter()
            .enumerate()
            .map(|(i, &count)| HistogramBucket {
                start: self.boundary(i),
                end: if i == last {
                    self.max
                } else {
                    self.boundary(i + 1)
                },
                count,
            })
            .collect();
        Histogram {
            bucket_size: self.bucket_size,
            buckets,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counts(h: &Histogram) -> Vec<u64> {
        h.buckets().iter().map(|b| b.count).collect()
    }

    fn buckets(n: usize) -> BucketCount {
        BucketCount::new(n).unwrap()
    }

    #[test]
    fn test_counts_sum_to_total() {
        let set: OrderedMultiset = [1.0, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0]
            .into_iter()
            .collect();
        let h = Histogram::build(&set, buckets(3)).unwrap();

        assert_eq!(h.bucket_size(), 3.0);
        assert_eq!(counts(&h), [4, 3, 4]);
        assert_eq!(h.total(), 11);
        assert_eq!(h.max_count(), 4);
    }

    #[test]
    fn test_boundary_value_moves_up() {
        let set: OrderedMultiset = [0.0, 5.0, 10.0].into_iter().collect();
        let h = Histogram::build(&set, buckets(2)).unwrap();

        // 5.0 sits on the boundary and belongs to the upper bucket; 10.0 is
        // captured by the closed last bucket.
        assert_eq!(counts(&h), [1, 2]);
    }

    #[test]
    fn test_bucket_bounds() {
        let set: OrderedMultiset = [0.0, 10.0].into_iter().collect();
        let h = Histogram::build(&set, buckets(4)).unwrap();

        let bounds: Vec<_> = h.buckets().iter().map(|b| (b.start, b.end)).collect();
        assert_eq!(bounds, [(0.0, 2.5), (2.5, 5.0), (5.0, 7.5), (7.5, 10.0)]);
    }

    #[test]
    fn test_empty_buckets_are_skipped() {
        let set: OrderedMultiset = [0.0, 0.5, 9.9, 10.0].into_iter().collect();
        let h = Histogram::build(&set, buckets(5)).unwrap();

        assert_eq!(counts(&h), [2, 0, 0, 0, 2]);
    }

    #[test]
    fn test_degenerate_range() {
        let set: OrderedMultiset = std::iter::repeat(4.2).take(7).collect();
        let h = Histogram::build(&set, buckets(3)).unwrap();

        assert_eq!(h.bucket_size(), 0.0);
        assert_eq!(counts(&h), [7, 0, 0]);
    }

    #[test]
    fn test_range_wider_than_f64_max() {
        let set: OrderedMultiset = [-1e308, 1e308].into_iter().collect();
        let h = Histogram::build(&set, buckets(2)).unwrap();

        assert_eq!(h.bucket_size(), 1e308);
        assert_eq!(counts(&h), [1, 1]);
        let bounds: Vec<_> = h.buckets().iter().map(|b| (b.start, b.end)).collect();
        assert_eq!(bounds, [(-1e308, 0.0), (0.0, 1e308)]);
    }

    #[test]
    fn test_wide_range_many_buckets_stays_finite() {
        let set: OrderedMultiset = [f64::MIN, 0.0, f64::MAX].into_iter().collect();
        let h = Histogram::build(&set, buckets(10)).unwrap();

        assert!(h
            .buckets()
            .iter()
            .all(|b| b.start.is_finite() && b.end.is_finite()));
        assert_eq!(h.buckets()[0].start, f64::MIN);
        let c = counts(&h);
        assert_eq!(c[0], 1);
        assert_eq!(c[9], 1);
        assert_eq!(h.total(), 3);
    }

    #[test]
    fn test_min_stays_in_first_bucket_below_resolution() {
        // Bucket size 0.2 is below the spacing of floats near 1e16.
        let set: OrderedMultiset = [1e16, 1e16 + 2.0].into_iter().collect();
        let h = Histogram::build(&set, buckets(10)).unwrap();

        assert_eq!(counts(&h)[0], 1);
        assert_eq!(h.total(), 2);
    }

    #[test]
    fn test_empty_set_has_no_data() {
        assert!(matches!(
            Histogram::build(&OrderedMultiset::new(), buckets(2)),
            Err(SummaryError::NoData)
        ));
    }
}
