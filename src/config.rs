use crate::error::{Result, SummaryError};
use float_ord::FloatOrd;
use std::{fmt, ops::Deref, str::FromStr};

/// Default bar width of a rendered histogram, in character cells.
pub const HISTOGRAM_WIDTH: usize = 70;

/// Sorted, deduplicated list of quantile fractions, each strictly inside
/// `(0, 1)`.
#[derive(Debug, Clone, PartialEq)]
pub struct Quantiles(Vec<f64>);

impl Quantiles {
    pub fn new(fractions: impl IntoIterator<Item = f64>) -> Result<Self> {
        let mut qs = Vec::new();
        for q in fractions {
            // Also rejects NaN.
            if !(q > 0.0 && q < 1.0) {
                return Err(SummaryError::InvalidQuantile(q));
            }
            qs.push(q);
        }
        if qs.is_empty() {
            return Err(SummaryError::EmptyQuantiles);
        }
        qs.sort_by_key(|q| FloatOrd(*q));
        qs.dedup();
        Ok(Self(qs))
    }

    #[inline]
    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }
}

impl Default for Quantiles {
    fn default() -> Self {
        Self(vec![0.5, 0.9, 0.99])
    }
}

impl Deref for Quantiles {
    type Target = [f64];

    #[inline]
    fn deref(&self) -> &[f64] {
        &self.0
    }
}

/// Parses a comma-separated list such as `"0.5, 0.9,0.99"`.
impl FromStr for Quantiles {
    type Err = SummaryError;

    fn from_str(s: &str) -> Result<Self> {
        let fractions = s
            .split(',')
            .map(str::trim)
            .map(|part| {
                part.parse::<f64>()
                    .map_err(|_| SummaryError::UnparsableQuantile(part.to_owned()))
            })
            .collect::<Result<Vec<_>>>()?;
        Self::new(fractions)
    }
}

impl fmt::Display for Quantiles {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, q) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{q}")?;
        }
        Ok(())
    }
}

/// Number of histogram buckets; always at least 2.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct BucketCount(usize);

impl BucketCount {
    pub fn new(n: usize) -> Result<Self> {
        if n <= 1 {
            return Err(SummaryError::InvalidBucketCount(n));
        }
        Ok(Self(n))
    }

    #[inline]
    pub fn get(self) -> usize {
        self.0
    }
}

impl Default for BucketCount {
    fn default() -> Self {
        Self(10)
    }
}

impl TryFrom<usize> for BucketCount {
    type Error = SummaryError;

    fn try_from(n: usize) -> Result<Self> {
        Self::new(n)
    }
}

/// Validated finalization settings.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SummaryConfig {
    pub quantiles: Quantiles,
    pub buckets: BucketCount,
}

impl SummaryConfig {
    pub fn new(quantiles: Quantiles, buckets: BucketCount) -> Self {
        Self { quantiles, buckets }
    }
}

/// Presentation settings for [crate::Histogram::render].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HistogramStyle {
    /// Width in cells of the longest bar.
    pub width: usize,
    /// Append each bucket's share of the total after its count.
    pub show_percent: bool,
}

impl Default for HistogramStyle {
    fn default() -> Self {
        Self {
            width: HISTOGRAM_WIDTH,
            show_percent: true,
        }
    }
}
