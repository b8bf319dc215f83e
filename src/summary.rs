use crate::{
    accumulator::Accumulator,
    config::SummaryConfig,
    error::{Result, SummaryError},
    histogram::{Histogram, HistogramBuilder},
    multiset::OrderedMultiset,
    quantile::{Quantile, QuantileExtractor},
    render::format_shortest,
};
use std::fmt;
use tracing::debug;

/// Collects samples and derives a [Summary] from them.
///
/// Insertion costs O(log d) for d distinct values. [Summarizer::summarize]
/// resolves every quantile and fills every histogram bucket in a single
/// ascending traversal.
#[derive(Debug, Clone, Default)]
pub struct Summarizer {
    config: SummaryConfig,
    set: OrderedMultiset,
    acc: Accumulator,
}

impl Summarizer {
    pub fn new(config: SummaryConfig) -> Self {
        Self {
            config,
            set: OrderedMultiset::new(),
            acc: Accumulator::new(),
        }
    }

    /// Adds one finite sample.
    #[inline]
    pub fn add(&mut self, value: f64) {
        self.set.insert(value);
        self.acc.update(value);
    }

    /// Number of samples added so far.
    #[inline]
    pub fn count(&self) -> u64 {
        self.acc.count()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.acc.is_empty()
    }

    #[inline]
    pub fn config(&self) -> &SummaryConfig {
        &self.config
    }

    #[inline]
    pub fn multiset(&self) -> &OrderedMultiset {
        &self.set
    }

    #[inline]
    pub fn accumulator(&self) -> &Accumulator {
        &self.acc
    }

    /// Computes the final statistics, or [SummaryError::NoData] when no
    /// sample was added.
    pub fn summarize(&self) -> Result<Summary> {
        let (Some(min), Some(max), Some(mean), Some(stdev)) = (
            self.acc.min(),
            self.acc.max(),
            self.acc.mean(),
            self.acc.stdev(),
        ) else {
            return Err(SummaryError::NoData);
        };
        debug!(
            count = self.acc.count(),
            distinct = self.set.len(),
            "summarizing"
        );

        let mut quantiles = QuantileExtractor::new(&self.config.quantiles, self.acc.count());
        let mut hist = HistogramBuilder::new(self.config.buckets, min, max);
        for (value, multiplicity) in &self.set {
            quantiles.observe(value, multiplicity);
            hist.observe(value, multiplicity);
        }

        Ok(Summary {
            count: self.acc.count(),
            min,
            max,
            mean,
            stdev,
            quantiles: quantiles.finish()?,
            histogram: hist.finish(),
        })
    }
}

impl Extend<f64> for Summarizer {
    fn extend<I: IntoIterator<Item = f64>>(&mut self, iter: I) {
        for value in iter {
            self.add(value);
        }
    }
}

/// Final statistics of a non-empty sample.
#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    count: u64,
    min: f64,
    max: f64,
    mean: f64,
    stdev: f64,
    quantiles: Vec<Quantile>,
    histogram: Histogram,
}

impl Summary {
    #[inline]
    pub fn count(&self) -> u64 {
        self.count
    }

    #[inline]
    pub fn min(&self) -> f64 {
        self.min
    }

    #[inline]
    pub fn max(&self) -> f64 {
        self.max
    }

    #[inline]
    pub fn mean(&self) -> f64 {
        self.mean
    }

    /// Population standard deviation.
    #[inline]
    pub fn stdev(&self) -> f64 {
        self.stdev
    }

    /// Resolved quantiles, in ascending order of fraction.
    #[inline]
    pub fn quantiles(&self) -> &[Quantile] {
        &self.quantiles
    }

    /// Value resolved for fraction `q`, if it was requested.
    pub fn quantile(&self, q: f64) -> Option<f64> {
        self.quantiles.iter().find(|x| x.q == q).map(|x| x.value)
    }

    #[inline]
    pub fn histogram(&self) -> &Histogram {
        &self.histogram
    }
}

/// Column gap of the statistics table.
const TABLE_PADDING: usize = 4;

/// Two-column statistics table, without the histogram.
impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut rows = vec![
            ("count".to_owned(), self.count.to_string()),
            ("min".to_owned(), format_shortest(self.min)),
            ("max".to_owned(), format_shortest(self.max)),
            ("mean".to_owned(), format_shortest(self.mean)),
            ("std. dev.".to_owned(), format_shortest(self.stdev)),
        ];
        rows.extend(self.quantiles.iter().map(|q| {
            (
                format!("quantile {}", format_shortest(q.q)),
                format_shortest(q.value),
            )
        }));

        let width = rows.iter().map(|(name, _)| name.len()).max().unwrap_or(0) + TABLE_PADDING;
        for (i, (name, value)) in rows.iter().enumerate() {
            if i > 0 {
                f.write_str("\n")?;
            }
            write!(f, "{name:<width$}{value}")?;
        }
        Ok(())
    }
}
