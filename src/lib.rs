//! Exact descriptive statistics over a stream of numbers.
//!
//! Samples are kept in an ordered multiset keyed by value, so memory grows
//! with the number of distinct values. Finalization walks the multiset once
//! to resolve [nearest-rank
//! quantiles](https://en.wikipedia.org/wiki/Percentile#The_nearest-rank_method)
//! and fill an equal-width histogram.
//!
//! ## Example
//!
//! ```rust
//! use summarize::{BucketCount, Quantiles, Summarizer, SummaryConfig};
//!
//! let config = SummaryConfig::new(
//!     Quantiles::new([0.5]).unwrap(),
//!     BucketCount::new(2).unwrap(),
//! );
//! let mut s = Summarizer::new(config);
//! s.extend([10.0, 20.0, 20.0, 30.0]);
//!
//! let summary = s.summarize().unwrap();
//! assert_eq!(summary.count(), 4);
//! assert_eq!(summary.mean(), 20.0);
//! assert_eq!(summary.quantile(0.5), Some(20.0));
//! println!("{summary}\n{}", summary.histogram());
//! ```

mod accumulator;
mod config;
mod error;
mod histogram;
mod input;
mod multiset;
mod quantile;
mod render;
mod summary;

pub use accumulator::*;
pub use config::*;
pub use error::*;
pub use histogram::*;
pub use input::*;
pub use multiset::*;
pub use quantile::*;
pub use render::*;
pub use summary::*;
