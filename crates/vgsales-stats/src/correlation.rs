//! Pearson correlation with pairwise-complete observations

/// Computes the Pearson correlation coefficient of paired observations.
///
/// Pairs where either side is `None` are skipped, so each coefficient uses
/// every observation where both values are present.
///
/// # Returns
///
/// * `Some(r)` - with `r` in `[-1, 1]`
/// * `None` - if fewer than two complete pairs exist or either side is constant
///
/// # Examples
///
/// ```
/// use vgsales_stats::correlation::pearson;
///
/// let pairs = [(Some(1.0), Some(2.0)), (Some(2.0), None), (Some(3.0), Some(6.0))];
/// let r = pearson(pairs).unwrap();
/// assert!((r - 1.0).abs() < 1e-12);
/// ```
#[expect(clippy::cast_precision_loss)]
#[must_use]
pub fn pearson<I>(pairs: I) -> Option<f64>
where
    I: IntoIterator<Item = (Option<f64>, Option<f64>)>,
{
    let complete = pairs
        .into_iter()
        .filter_map(|(x, y)| Some((x?, y?)))
        .collect::<Vec<_>>();
    if complete.len() < 2 {
        return None;
    }

    let n = complete.len() as f64;
    let mean_x = complete.iter().map(|(x, _)| x).sum::<f64>() / n;
    let mean_y = complete.iter().map(|(_, y)| y).sum::<f64>() / n;

    let mut cov = 0.0;
    let mut var_x = 0.0;
    let mut var_y = 0.0;
    for (x, y) in &complete {
        let dx = x - mean_x;
        let dy = y - mean_y;
        cov += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }

    if var_x == 0.0 || var_y == 0.0 {
        return None;
    }
    Some((cov / (var_x.sqrt() * var_y.sqrt())).clamp(-1.0, 1.0))
}
