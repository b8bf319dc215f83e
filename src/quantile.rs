use crate::{
    config::Quantiles,
    error::{Result, SummaryError},
    multiset::OrderedMultiset,
};

/// A requested quantile fraction and the sample found at its rank.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quantile {
    /// Fraction in `(0, 1)`, e.g. `0.9` for the 90th percentile.
    pub q: f64,
    /// Zero-based position of the quantile in the sorted sample.
    pub rank: u64,
    pub value: f64,
}

/// Zero-based nearest rank of quantile `q` in a sample of `count` values,
/// `round((count - 1) * q)` with halves rounded up.
#[inline]
pub fn quantile_rank(q: f64, count: u64) -> u64 {
    debug_assert!(count > 0);
    round_half_up((count - 1) as f64 * q)
}

#[inline]
pub(crate) fn round_half_up(x: f64) -> u64 {
    (x + 0.5).floor() as u64
}

/// Resolves nearest-rank quantiles during an ascending traversal.
///
/// Ranks are precomputed from the total count; the traversal then feeds
/// every `(value, multiplicity)` pair through [QuantileExtractor::observe].
/// Each occurrence within a run of equal values advances the running index
/// by one, so a rank falling inside a run resolves to that run's value.
#[derive(Debug, Clone)]
pub struct QuantileExtractor {
    pending: Vec<(Quantile, bool)>,
    next: usize,
    index: u64,
}

impl QuantileExtractor {
    pub fn new(quantiles: &Quantiles, count: u64) -> Self {
        let pending = quantiles
            .iter()
            .map(|&q| {
                let rank = if count == 0 { 0 } else { quantile_rank(q, count) };
                (
                    Quantile {
                        q,
                        rank,
                        value: f64::NAN,
                    },
                    false,
                )
            })
            .collect();
        Self {
            pending,
            next: 0,
            index: 0,
        }
    }

    /// Whether every requested rank has been reached.
    #[inline]
    pub fn is_done(&self) -> bool {
        self.next == self.pending.len()
    }

    /// Consumes the next distinct value of the traversal.
    pub fn observe(&mut self, value: f64, multiplicity: u64) {
        let end = self.index + multiplicity;
        while let Some((quantile, resolved)) = self.pending.get_mut(self.next) {
            if quantile.rank >= end {
                break;
            }
            quantile.value = value;
            *resolved = true;
            self.next += 1;
        }
        self.index = end;
    }

    /// Resolved quantiles, in ascending order of `q`.
    pub fn finish(self) -> Result<Vec<Quantile>> {
        self.pending
            .into_iter()
            .map(|(quantile, resolved)| {
                if resolved {
                    Ok(quantile)
                } else {
                    Err(SummaryError::UnresolvedQuantile {
                        q: quantile.q,
                        rank: quantile.rank,
                    })
                }
            })
            .collect()
    }

    /// Runs a dedicated traversal over `set`.
    pub fn extract(set: &OrderedMultiset, quantiles: &Quantiles) -> Result<Vec<Quantile>> {
        if set.is_empty() {
            return Err(SummaryError::NoData);
        }
        let mut extractor = Self::new(quantiles, set.total());
        for (value, multiplicity) in set {
            extractor.observe(value, multiplicity);
            if extractor.is_done() {
                break;
            }
        }
        extractor.finish()
    }
}
