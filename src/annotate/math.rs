//! Null-propagating arithmetic with SQL aggregate semantics.
//!
//! `None` plays the part of SQL `NULL`: it flows through every operation,
//! and a zero or missing denominator produces `None` instead of an error.

pub fn sub(a: Option<f64>, b: Option<f64>) -> Option<f64> {
    Some(a? - b?)
}

pub fn div(numerator: Option<f64>, denominator: Option<f64>) -> Option<f64> {
    let denominator = denominator?;
    if denominator == 0.0 {
        return None;
    }
    Some(numerator? / denominator)
}

/// `numerator / denominator * 100`
pub fn index(numerator: Option<f64>, denominator: Option<f64>) -> Option<f64> {
    div(numerator, denominator).map(|ratio| ratio * 100.0)
}

/// `(new - old) / old * 100`
pub fn pct_change(new: Option<f64>, old: Option<f64>) -> Option<f64> {
    index(sub(new, old), old)
}

/// Running `SUM(expr)`: null terms are skipped, and a sum over no
/// non-null terms is itself null.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SqlSum(Option<f64>);

impl SqlSum {
    pub fn add(&mut self, term: Option<f64>) {
        if let Some(term) = term {
            self.0 = Some(self.0.unwrap_or(0.0) + term);
        }
    }

    pub fn value(&self) -> Option<f64> {
        self.0
    }
}

/// `AVG(expr)` over the non-null values.
pub fn mean<I>(values: I) -> Option<f64>
where
    I: IntoIterator<Item = Option<f64>>,
{
    let (sum, count) = values
        .into_iter()
        .flatten()
        .fold((0.0, 0u32), |(sum, count), v| (sum + v, count + 1));
    (count > 0).then(|| sum / f64::from(count))
}

/// Value carrying the largest total weight. Equal values are pooled; on a
/// weight tie the smallest value wins so the result does not depend on row
/// order.
pub fn weighted_mode<T, I>(items: I) -> Option<T>
where
    T: Copy + PartialOrd,
    I: IntoIterator<Item = (T, i64)>,
{
    let mut tally: Vec<(T, i64)> = Vec::new();
    for (value, weight) in items {
        match tally.iter_mut().find(|(seen, _)| *seen == value) {
            Some((_, total)) => *total += weight,
            None => tally.push((value, weight)),
        }
    }

    tally
        .into_iter()
        .reduce(|best, candidate| {
            let better = candidate.1 > best.1 || (candidate.1 == best.1 && candidate.0 < best.0);
            if better {
                candidate
            } else {
                best
            }
        })
        .map(|(value, _)| value)
}
