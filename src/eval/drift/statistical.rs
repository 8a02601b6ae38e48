//! Statistical helper functions for drift detection.

use std::cmp::Ordering;

/// Floor applied to empty bin shares before taking logs or ratios
const EMPTY_BIN_SHARE: f64 = 0.0001;

/// Sort a copy of `data` ascending
pub fn sorted(data: &[f64]) -> Vec<f64> {
    let mut out = data.to_vec();
    out.sort_by(f64::total_cmp);
    out
}

/// Count samples in bins defined by edges (left-open, right-closed)
pub fn bin_counts(data: &[f64], edges: &[f64]) -> Vec<usize> {
    let mut counts = vec![0; edges.len().saturating_sub(1)];
    for &val in data {
        for i in 0..counts.len() {
            if val > edges[i] && val <= edges[i + 1] {
                counts[i] += 1;
                break;
            }
        }
    }
    counts
}

/// Distinct values with their counts, in ascending value order
pub fn category_counts(data: &[f64]) -> Vec<(f64, usize)> {
    let mut out: Vec<(f64, usize)> = Vec::new();
    for v in sorted(data) {
        match out.last_mut() {
            Some((last, n)) if last.total_cmp(&v) == Ordering::Equal => *n += 1,
            _ => out.push((v, 1)),
        }
    }
    out
}

/// Align two category histograms on the union of their keys
pub fn aligned_counts(reference: &[f64], current: &[f64]) -> Vec<(f64, usize, usize)> {
    let r = category_counts(reference);
    let c = category_counts(current);
    let (mut i, mut j) = (0, 0);
    let mut out = Vec::with_capacity(r.len().max(c.len()));
    while i < r.len() || j < c.len() {
        let ord = match (r.get(i), c.get(j)) {
            (Some(a), Some(b)) => a.0.total_cmp(&b.0),
            (Some(_), None) => Ordering::Less,
            _ => Ordering::Greater,
        };
        match ord {
            Ordering::Less => {
                out.push((r[i].0, r[i].1, 0));
                i += 1;
            }
            Ordering::Greater => {
                out.push((c[j].0, 0, c[j].1));
                j += 1;
            }
            Ordering::Equal => {
                out.push((r[i].0, r[i].1, c[j].1));
                i += 1;
                j += 1;
            }
        }
    }
    out
}

/// Two-sample KS statistic: maximum distance between the empirical CDFs
pub fn ks_statistic(sorted_a: &[f64], sorted_b: &[f64]) -> f64 {
    let (n1, n2) = (sorted_a.len() as f64, sorted_b.len() as f64);
    let (mut i, mut j) = (0, 0);
    let mut d_max = 0.0f64;
    while i < sorted_a.len() && j < sorted_b.len() {
        let x = sorted_a[i].min(sorted_b[j]);
        // Step past every tie at x on both sides before comparing CDFs
        while i < sorted_a.len() && sorted_a[i] <= x {
            i += 1;
        }
        while j < sorted_b.len() && sorted_b[j] <= x {
            j += 1;
        }
        d_max = d_max.max((i as f64 / n1 - j as f64 / n2).abs());
    }
    d_max
}

/// Exact two-sided p-value `P(D >= d)` for a KS statistic `d` from samples
/// of sizes `n1` and `n2`.
///
/// Walks the lattice of merged-sample orderings: point `(i, j)` stays inside
/// while `|i/n1 - j/n2| < d`. `inside[i][j]` holds the share of monotone paths
/// to `(i, j)` that never left, so every cell stays in `[0, 1]`.
pub fn ks_exact_p_value(n1: usize, n2: usize, d: f64) -> f64 {
    if n1 == 0 || n2 == 0 {
        return 1.0;
    }
    let bound = (d * n1 as f64 * n2 as f64).round() as i64;
    if bound <= 0 {
        return 1.0;
    }
    let (a, b) = (n1 as i64, n2 as i64);
    let mut row = vec![0.0f64; n2 + 1];
    for i in 0..=n1 {
        for j in 0..=n2 {
            row[j] = if (i as i64 * b - j as i64 * a).abs() >= bound {
                0.0
            } else if i == 0 && j == 0 {
                1.0
            } else {
                // row[j] still holds (i - 1, j); row[j - 1] is already (i, j - 1)
                let from_prev = if i > 0 { row[j] * i as f64 } else { 0.0 };
                let from_left = if j > 0 { row[j - 1] * j as f64 } else { 0.0 };
                (from_prev + from_left) / (i + j) as f64
            };
        }
    }
    (1.0 - row[n2]).clamp(0.0, 1.0)
}

/// Approximate p-value for KS statistic using Kolmogorov distribution
///
/// `lambda` is `d * sqrt(n1 * n2 / (n1 + n2))`. Accurate for large samples;
/// small samples go through [`ks_exact_p_value`].
pub fn ks_p_value(lambda: f64) -> f64 {
    if lambda <= 0.0 {
        return 1.0;
    }
    // Asymptotic approximation: P(D > d) ≈ 2 * sum_{k=1}^∞ (-1)^{k+1} * exp(-2 * k^2 * λ^2)
    let mut p = 0.0;
    for k in 1..=100 {
        let sign = if k % 2 == 1 { 1.0 } else { -1.0 };
        let term = sign * (-2.0 * f64::from(k).powi(2) * lambda.powi(2)).exp();
        p += term;
        if term.abs() < 1e-10 {
            break;
        }
    }
    (2.0 * p).clamp(0.0, 1.0)
}

/// Approximate chi-square p-value using Wilson-Hilferty approximation
pub fn chi_square_p_value(chi_sq: f64, df: usize) -> f64 {
    if df == 0 || chi_sq <= 0.0 {
        return 1.0;
    }
    if chi_sq.is_infinite() {
        return 0.0;
    }
    let k = df as f64;
    // Wilson-Hilferty transformation to normal
    let z = ((chi_sq / k).powf(1.0 / 3.0) - (1.0 - 2.0 / (9.0 * k))) / (2.0 / (9.0 * k)).sqrt();
    // Convert z to p-value (upper tail)
    (0.5 * (1.0 - erf(z / std::f64::consts::SQRT_2))).clamp(0.0, 1.0)
}

/// Standard normal CDF
pub fn normal_cdf(x: f64) -> f64 {
    0.5 * (1.0 + erf(x / std::f64::consts::SQRT_2))
}

/// Two-sided p-value of the pooled two-proportion Z-test, where `hits1` of
/// `n1` and `hits2` of `n2` samples take the first value.
pub fn two_proportion_z_p_value(hits1: usize, n1: usize, hits2: usize, n2: usize) -> f64 {
    if n1 == 0 || n2 == 0 {
        return 1.0;
    }
    let (n1, n2) = (n1 as f64, n2 as f64);
    let pooled = (hits1 + hits2) as f64 / (n1 + n2);
    let se = (pooled * (1.0 - pooled) * (1.0 / n1 + 1.0 / n2)).sqrt();
    if se == 0.0 {
        // Both samples hold a single shared value
        return 1.0;
    }
    let z = (hits1 as f64 / n1 - hits2 as f64 / n2) / se;
    (2.0 * (1.0 - normal_cdf(z.abs()))).clamp(0.0, 1.0)
}

/// Error function approximation
pub fn erf(x: f64) -> f64 {
    let a1 = 0.254829592;
    let a2 = -0.284496736;
    let a3 = 1.421413741;
    let a4 = -1.453152027;
    let a5 = 1.061405429;
    let p = 0.3275911;

    let sign = if x >= 0.0 { 1.0 } else { -1.0 };
    let x = x.abs();
    let t = 1.0 / (1.0 + p * x);
    let y = 1.0 - (((((a5 * t + a4) * t) + a3) * t + a2) * t + a1) * t * (-x * x).exp();

    sign * y
}

/// Population standard deviation
pub fn std_dev(data: &[f64]) -> f64 {
    if data.is_empty() {
        return 0.0;
    }
    let n = data.len() as f64;
    let mean = data.iter().sum::<f64>() / n;
    (data.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n).sqrt()
}

/// First Wasserstein distance between two empirical distributions
///
/// Integrates |F_a(x) - F_b(x)| over the merged support.
pub fn wasserstein_distance(sorted_a: &[f64], sorted_b: &[f64]) -> f64 {
    if sorted_a.is_empty() || sorted_b.is_empty() {
        return 0.0;
    }
    let (n1, n2) = (sorted_a.len() as f64, sorted_b.len() as f64);
    let mut merged: Vec<f64> = sorted_a.iter().chain(sorted_b.iter()).copied().collect();
    merged.sort_by(f64::total_cmp);

    let (mut i, mut j) = (0, 0);
    let mut distance = 0.0;
    for w in merged.windows(2) {
        let x = w[0];
        while i < sorted_a.len() && sorted_a[i] <= x {
            i += 1;
        }
        while j < sorted_b.len() && sorted_b[j] <= x {
            j += 1;
        }
        distance += (i as f64 / n1 - j as f64 / n2).abs() * (w[1] - w[0]);
    }
    distance
}

/// Replace empty shares with a small floor so logs and ratios stay finite
pub fn floor_shares(counts: &[usize], total: usize) -> Vec<f64> {
    counts
        .iter()
        .map(|&c| {
            if c == 0 || total == 0 {
                EMPTY_BIN_SHARE
            } else {
                c as f64 / total as f64
            }
        })
        .collect()
}

/// Jensen-Shannon distance (square root of the divergence, natural log)
pub fn jensen_shannon_distance(p: &[f64], q: &[f64]) -> f64 {
    let p_sum: f64 = p.iter().sum();
    let q_sum: f64 = q.iter().sum();
    if p_sum <= 0.0 || q_sum <= 0.0 {
        return 0.0;
    }
    let mut divergence = 0.0;
    for (&pi, &qi) in p.iter().zip(q.iter()) {
        let (pi, qi) = (pi / p_sum, qi / q_sum);
        let m = 0.5 * (pi + qi);
        if pi > 0.0 {
            divergence += 0.5 * pi * (pi / m).ln();
        }
        if qi > 0.0 {
            divergence += 0.5 * qi * (qi / m).ln();
        }
    }
    divergence.max(0.0).sqrt()
}

/// Bin edges for numeric histograms: `n_bins` equal-width bins over the
/// combined range of both samples.
pub fn histogram_edges(sorted_a: &[f64], sorted_b: &[f64], n_bins: usize) -> Vec<f64> {
    let lo = match (sorted_a.first(), sorted_b.first()) {
        (Some(a), Some(b)) => a.min(*b),
        (Some(a), None) | (None, Some(a)) => *a,
        (None, None) => 0.0,
    };
    let hi = match (sorted_a.last(), sorted_b.last()) {
        (Some(a), Some(b)) => a.max(*b),
        (Some(a), None) | (None, Some(a)) => *a,
        (None, None) => 0.0,
    };
    let mut edges = Vec::with_capacity(n_bins + 1);
    edges.push(f64::NEG_INFINITY);
    if hi > lo {
        let width = (hi - lo) / n_bins as f64;
        for i in 1..n_bins {
            edges.push(lo + width * i as f64);
        }
    }
    edges.push(f64::INFINITY);
    edges
}
