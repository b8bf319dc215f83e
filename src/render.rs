use crate::{
    config::HistogramStyle,
    histogram::{Histogram, HistogramBucket},
    quantile::round_half_up,
};
use std::fmt;

/// Partial block glyphs, indexed by eighths of a cell.
const BAR_EIGHTHS: [char; 9] = [' ', '▏', '▎', '▍', '▌', '▋', '▊', '▉', '█'];

/// Significant digits in bucket boundary labels.
const LABEL_PRECISION: usize = 3;

/// Formats a [Histogram] as an aligned bar chart, one line per bucket:
///
/// ```text
///   0 ≤ x < 10 │████▊ 3 (37.500%)
///  10 ≤ x ≤ 20 │████████ 5 (62.500%)
/// ```
///
/// Labels are padded so the `x` markers line up in one column.
#[derive(Debug, Clone, Copy, Default)]
pub struct HistogramRenderer {
    style: HistogramStyle,
}

impl HistogramRenderer {
    pub fn new(style: HistogramStyle) -> Self {
        Self { style }
    }

    /// Renders every bucket; the result has no trailing newline.
    pub fn render(&self, hist: &Histogram) -> String {
        let buckets = hist.buckets();
        let labels: Vec<Label> = buckets
            .iter()
            .enumerate()
            .map(|(i, b)| Label::new(b, i + 1 == buckets.len()))
            .collect();
        let space_before = labels.iter().map(|l| l.before).max().unwrap_or(0);
        let space_after = labels.iter().map(|l| l.after).max().unwrap_or(0);

        let max_count = hist.max_count();
        let total = hist.total();
        let mut out = String::new();
        for (i, (bucket, label)) in buckets.iter().zip(&labels).enumerate() {
            if i > 0 {
                out.push('\n');
            }
            let proportion = if max_count == 0 {
                0.0
            } else {
                bucket.count as f64 / max_count as f64
            };
            out.push_str(&format!(
                " {:before$}{}{:after$} │{} {}",
                "",
                label.text,
                "",
                bar(proportion * self.style.width as f64),
                bucket.count,
                before = space_before - label.before,
                after = space_after - label.after,
            ));
            if self.style.show_percent {
                let pct = if total == 0 {
                    0.0
                } else {
                    100.0 * bucket.count as f64 / total as f64
                };
                out.push_str(&format!(" ({pct:.3}%)"));
            }
        }
        out
    }
}

struct Label {
    text: String,
    /// Characters before the `x` marker.
    before: usize,
    /// Characters after the `x` marker.
    after: usize,
}

impl Label {
    fn new(bucket: &HistogramBucket, last: bool) -> Self {
        let op = if last { '≤' } else { '<' };
        let text = format!(
            "{} ≤ x {} {}",
            format_sig(bucket.start, LABEL_PRECISION),
            op,
            format_sig(bucket.end, LABEL_PRECISION)
        );
        let len = text.chars().count();
        let before = text.chars().position(|c| c == 'x').unwrap_or(0);
        Self {
            text,
            before,
            after: len - before - 1,
        }
    }
}

/// Bar of `cells` character cells, with sub-cell precision in eighths.
fn bar(cells: f64) -> String {
    let eighths = round_half_up(cells * 8.0) as usize;
    let mut s: String = std::iter::repeat(BAR_EIGHTHS[8])
        .take(eighths / 8)
        .collect();
    let rem = eighths % 8;
    if rem > 0 {
        s.push(BAR_EIGHTHS[rem]);
    }
    s
}

/// Formats `v` with `precision` significant digits, dropping trailing zeros
/// and switching to exponent notation (`1.23e+06`) when the decimal exponent
/// is below -4 or at least `precision`.
pub fn format_sig(v: f64, precision: usize) -> String {
    let precision = precision.max(1);
    if v == 0.0 || !v.is_finite() {
        return format!("{v}");
    }
    let sci = format!("{:.*e}", precision - 1, v);
    let Some((mantissa, exp)) = sci.split_once('e') else {
        return sci;
    };
    let exp: i32 = exp.parse().unwrap_or(0);

    if exp < -4 || exp >= precision as i32 {
        let sign = if exp < 0 { '-' } else { '+' };
        format!("{}e{}{:02}", trim_zeros(mantissa), sign, exp.unsigned_abs())
    } else {
        let decimals = (precision as i32 - 1 - exp).max(0) as usize;
        trim_zeros(&format!("{v:.decimals$}")).to_owned()
    }
}

/// Decimal exponent from which [format_shortest] switches to exponent form.
const SHORTEST_EXP_LIMIT: i32 = 21;

/// Formats `v` with the fewest digits that round-trip, in exponent form
/// (`1e+300`, `1.5e-07`) when the decimal exponent is below -4 or at least 21.
pub fn format_shortest(v: f64) -> String {
    if v == 0.0 || !v.is_finite() {
        return format!("{v}");
    }
    let sci = format!("{v:e}");
    let Some((mantissa, exp)) = sci.split_once('e') else {
        return sci;
    };
    let exp: i32 = exp.parse().unwrap_or(0);

    if exp < -4 || exp >= SHORTEST_EXP_LIMIT {
        let sign = if exp < 0 { '-' } else { '+' };
        format!("{mantissa}e{sign}{:02}", exp.unsigned_abs())
    } else {
        format!("{v}")
    }
}

fn trim_zeros(s: &str) -> &str {
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.')
    } else {
        s
    }
}

impl Histogram {
    /// Renders the histogram with `style`.
    pub fn render(&self, style: HistogramStyle) -> String {
        HistogramRenderer::new(style).render(self)
    }
}

impl fmt::Display for Histogram {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(HistogramStyle::default()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{config::BucketCount, multiset::OrderedMultiset};

    #[test]
    fn test_format_sig() {
        assert_eq!(format_sig(0.0, 3), "0");
        assert_eq!(format_sig(1.0, 3), "1");
        assert_eq!(format_sig(2.5, 3), "2.5");
        assert_eq!(format_sig(3.14159, 3), "3.14");
        assert_eq!(format_sig(-0.125, 3), "-0.125");
        assert_eq!(format_sig(99.96, 3), "100");
        assert_eq!(format_sig(999.6, 3), "1e+03");
        assert_eq!(format_sig(1234.0, 3), "1.23e+03");
        assert_eq!(format_sig(1_500_000.0, 3), "1.5e+06");
        assert_eq!(format_sig(0.0001234, 3), "0.000123");
        assert_eq!(format_sig(0.00001234, 3), "1.23e-05");
    }

    #[test]
    fn test_format_shortest() {
        assert_eq!(format_shortest(0.0), "0");
        assert_eq!(format_shortest(2.0), "2");
        assert_eq!(format_shortest(0.99), "0.99");
        assert_eq!(format_shortest(-123.5), "-123.5");
        assert_eq!(format_shortest(0.0001), "0.0001");
        assert_eq!(format_shortest(1e-7), "1e-07");
        assert_eq!(format_shortest(-1.5e-7), "-1.5e-07");
        assert_eq!(format_shortest(1e20), "100000000000000000000");
        assert_eq!(format_shortest(1e21), "1e+21");
        assert_eq!(format_shortest(1e300), "1e+300");
        assert_eq!(format_shortest(1.25e300), "1.25e+300");
    }

    #[test]
    fn test_bar_eighths() {
        assert_eq!(bar(0.0), "");
        assert_eq!(bar(1.0), "█");
        assert_eq!(bar(2.5), "██▌");
        assert_eq!(bar(0.125), "▏");
        assert_eq!(bar(0.06), "");
        assert_eq!(bar(0.07), "▏");
    }

    fn hist(values: &[f64], n: usize) -> Histogram {
        let set: OrderedMultiset = values.iter().copied().collect();
        Histogram::build(&set, BucketCount::new(n).unwrap()).unwrap()
    }

    #[test]
    fn test_render_aligns_markers() {
        let h = hist(&[0.0, 5.0, 5.0, 10.0, 10.0, 10.0, 10.0, 20.0], 2);
        let style = HistogramStyle {
            width: 8,
            show_percent: false,
        };

        assert_eq!(
            h.render(style),
            "  0 ≤ x < 10 │████▊ 3\n 10 ≤ x ≤ 20 │████████ 5"
        );
    }

    #[test]
    fn test_render_aligns_text_after_marker() {
        let h = hist(&[0.0, 10.0], 4);
        let style = HistogramStyle {
            width: 2,
            show_percent: false,
        };

        let expected = [
            "   0 ≤ x < 2.5 │██ 1",
            " 2.5 ≤ x < 5   │ 0",
            "   5 ≤ x < 7.5 │ 0",
            " 7.5 ≤ x ≤ 10  │██ 1",
        ];
        assert_eq!(h.render(style), expected.join("\n"));
    }

    #[test]
    fn test_render_percent_and_no_trailing_newline() {
        let h = hist(&[1.0, 2.0, 3.0, 4.0], 2);

        let out = h.to_string();
        assert!(!out.ends_with('\n'));
        assert_eq!(out.lines().count(), 2);
        assert!(out.lines().all(|l| l.ends_with(" 2 (50.000%)")));
        // Both bars are full width.
        assert!(out.contains(&"█".repeat(70)));
    }

    #[test]
    fn test_render_is_idempotent() {
        let h = hist(&[0.3, 1.7, 2.2, 2.2, 9.0, 12.5], 4);

        assert_eq!(h.to_string(), h.to_string());
    }

    #[test]
    fn test_render_degenerate_range() {
        let h = hist(&[3.0, 3.0, 3.0], 2);

        let out = h.render(HistogramStyle {
            width: 4,
            show_percent: true,
        });
        assert_eq!(
            out,
            " 3 ≤ x < 3 │████ 3 (100.000%)\n 3 ≤ x ≤ 3 │ 0 (0.000%)"
        );
    }
}
