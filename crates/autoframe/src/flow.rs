//! Line breaking and remainder sharing for auto-layout flow.
//!
//! Both helpers work on plain extents along the primary axis so the distribution pass
//! can stay focused on geometry.

use std::ops::Range;

/// Slack used when comparing accumulated extents against a budget.
const EPSILON: f64 = 1e-9;

/// Greedily partition `sizes` into lines no longer than `extent`.
///
/// Children are walked in order, each adding its size plus `spacing` to the current
/// line. A new line starts when the next child would overflow. A child that is larger
/// than `extent` on its own still gets a line, so no child is ever dropped.
///
/// ```
/// # use autoframe::break_lines;
/// let lines = break_lines(&[40.0, 40.0, 40.0], 100.0, 10.0);
/// assert_eq!(lines, vec![0..2, 2..3]);
/// ```
pub fn break_lines(sizes: &[f64], extent: f64, spacing: f64) -> Vec<Range<usize>> {
    let mut lines = Vec::new();
    let mut start = 0;
    let mut used = 0.0;

    for (i, &size) in sizes.iter().enumerate() {
        if i == start {
            used = size;
            continue;
        }
        let next = used + spacing + size;
        if next > extent + EPSILON {
            lines.push(start..i);
            start = i;
            used = size;
        } else {
            used = next;
        }
    }

    if start < sizes.len() {
        lines.push(start..sizes.len());
    }
    lines
}

/// Extent of a run of children: sizes plus spacing between them, never negative.
pub fn line_extent(sizes: &[f64], spacing: f64) -> f64 {
    if sizes.is_empty() {
        return 0.0;
    }
    let gaps = spacing * (sizes.len() - 1) as f64;
    (sizes.iter().sum::<f64>() + gaps).max(0.0)
}

/// Split `total` between children proportionally to `weights`.
///
/// Zero weights receive nothing. With `snap` set, shares are whole units: each child
/// gets the floor of its exact share and the leftover units go one by one to the
/// earliest growing children. A fractional residue (when `total` itself is not whole)
/// goes to the last growing child, so the shares always add up to `total`.
///
/// ```
/// # use autoframe::split_remainder;
/// assert_eq!(split_remainder(100.0, &[1.0, 1.0, 1.0], true), vec![34.0, 33.0, 33.0]);
/// assert_eq!(split_remainder(90.0, &[1.0, 0.0, 2.0], true), vec![30.0, 0.0, 60.0]);
/// ```
pub fn split_remainder(total: f64, weights: &[f64], snap: bool) -> Vec<f64> {
    let sum: f64 = weights.iter().sum();
    if total <= 0.0 || sum <= 0.0 || !total.is_finite() {
        return vec![0.0; weights.len()];
    }

    let exact = weights.iter().map(|w| total * w / sum);
    if !snap {
        return exact.collect();
    }

    let mut shares: Vec<f64> = exact.map(|share| (share + EPSILON).floor()).collect();
    let mut leftover = total - shares.iter().sum::<f64>();

    for (share, _) in shares
        .iter_mut()
        .zip(weights)
        .filter(|(_, &weight)| weight > 0.0)
    {
        if leftover < 1.0 - EPSILON {
            break;
        }
        *share += 1.0;
        leftover -= 1.0;
    }

    if leftover.abs() > 0.0 {
        if let Some(last) = weights.iter().rposition(|&w| w > 0.0) {
            shares[last] += leftover;
        }
    }
    shares
}

/// One child's footprint on the counter axis of a line.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct CrossItem {
    pub extent: f64,
    /// Distance from the line start to the child's baseline, for baseline-aligned children
    pub baseline: Option<f64>,
}

/// Counter-axis extent of a line.
///
/// Baseline-aligned children need room for the tallest ascent plus the deepest descent;
/// everyone else just needs their own extent.
pub(crate) fn cross_extent(items: impl IntoIterator<Item = CrossItem>) -> f64 {
    let mut plain: f64 = 0.0;
    let mut ascent: f64 = 0.0;
    let mut descent: f64 = 0.0;
    for item in items {
        match item.baseline {
            Some(baseline) => {
                ascent = ascent.max(baseline);
                descent = descent.max(item.extent - baseline);
            }
            None => plain = plain.max(item.extent),
        }
    }
    plain.max(ascent + descent)
}
