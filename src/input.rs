use crate::{error::Result, summary::Summarizer};
use std::{io::BufRead, ops::AddAssign};
use tracing::trace;

/// Tally of lines consumed by [read_values].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputStats {
    /// Lines added to the summarizer.
    pub accepted: u64,
    /// Non-empty lines that were not a finite number.
    pub rejected: u64,
}

impl AddAssign for InputStats {
    #[inline]
    fn add_assign(&mut self, rhs: Self) {
        self.accepted += rhs.accepted;
        self.rejected += rhs.rejected;
    }
}

/// Parses one number per line of `reader` into `summarizer`.
///
/// Surrounding whitespace is ignored and blank lines are skipped. Lines that
/// do not parse, or parse to NaN or an infinity, are counted as rejected.
pub fn read_values<R: BufRead>(reader: R, summarizer: &mut Summarizer) -> Result<InputStats> {
    let mut stats = InputStats::default();
    for line in reader.lines() {
        let line = line?;
        let token = line.trim();
        if token.is_empty() {
            continue;
        }
        match token.parse::<f64>() {
            Ok(v) if v.is_finite() => {
                summarizer.add(v);
                stats.accepted += 1;
            }
            _ => {
                trace!(token, "rejected non-numeric input");
                stats.rejected += 1;
            }
        }
    }
    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_read_values() {
        let input = "1\n  2.5 \n\nabc\n-3e2\nNaN\ninf\n\n";
        let mut s = Summarizer::default();

        let stats = read_values(Cursor::new(input), &mut s).unwrap();
        assert_eq!(
            stats,
            InputStats {
                accepted: 3,
                rejected: 3
            }
        );
        assert_eq!(s.count(), 3);
        assert_eq!(s.accumulator().min(), Some(-300.0));
    }

    #[test]
    fn test_stats_merge() {
        let mut total = InputStats::default();
        total += InputStats {
            accepted: 2,
            rejected: 1,
        };
        total += InputStats {
            accepted: 5,
            rejected: 0,
        };

        assert_eq!(total.accepted, 7);
        assert_eq!(total.rejected, 1);
    }
}
