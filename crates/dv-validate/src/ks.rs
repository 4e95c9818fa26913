//! Two-sample Kolmogorov–Smirnov test.

/// Statistic and p-value of a two-sample KS test.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KsResult {
    /// Largest distance between the two empirical CDFs, in [0, 1].
    pub statistic: f64,
    /// Probability of a distance at least this large if both samples share a
    /// distribution.
    pub p_value: f64,
}

/// Runs the two-sample KS test. Returns `None` if either sample is empty.
///
/// NaN values must be removed by the caller.
pub fn ks_2samp(baseline: &[f64], current: &[f64]) -> Option<KsResult> {
    if baseline.is_empty() || current.is_empty() {
        return None;
    }
    let statistic = ks_statistic(baseline, current);
    Some(KsResult {
        statistic,
        p_value: ks_p_value(statistic, baseline.len(), current.len()),
    })
}

/// Supremum distance between the empirical CDFs of two samples.
///
/// Tied values advance both CDFs before the distance is measured.
pub fn ks_statistic(a: &[f64], b: &[f64]) -> f64 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    let mut a = a.to_vec();
    let mut b = b.to_vec();
    a.sort_by(f64::total_cmp);
    b.sort_by(f64::total_cmp);

    let (n1, n2) = (a.len() as f64, b.len() as f64);
    let (mut i, mut j) = (0usize, 0usize);
    let mut d: f64 = 0.0;
    while i < a.len() && j < b.len() {
        let x = a[i].min(b[j]);
        while i < a.len() && a[i] <= x {
            i += 1;
        }
        while j < b.len() && b[j] <= x {
            j += 1;
        }
        d = d.max((i as f64 / n1 - j as f64 / n2).abs());
    }
    d
}

/// Largest sample size for which the exact p-value is computed.
pub const MAX_EXACT_SAMPLE_SIZE: usize = 10_000;

/// Two-sided p-value for a KS statistic from samples of size `n1` and `n2`.
///
/// Exact when both samples have at most [`MAX_EXACT_SAMPLE_SIZE`] values,
/// asymptotic otherwise.
pub fn ks_p_value(statistic: f64, n1: usize, n2: usize) -> f64 {
    if n1 == 0 || n2 == 0 {
        return 1.0;
    }
    if n1.max(n2) <= MAX_EXACT_SAMPLE_SIZE {
        exact_p_value(statistic, n1, n2)
    } else {
        asymptotic_p_value(statistic, n1, n2)
    }
}

/// Exact `P(D >= statistic)` under the null hypothesis.
///
/// The statistic is snapped to the lattice `h / lcm(n1, n2)` first, so float
/// noise in `statistic` does not move it between attainable values.
fn exact_p_value(statistic: f64, n1: usize, n2: usize) -> f64 {
    let g = gcd(n1, n2);
    let lcm = (n1 / g) as f64 * n2 as f64;
    let h = (statistic * lcm).round();
    if h <= 0.0 {
        return 1.0;
    }
    let p = if n1 == n2 {
        prob_outside_square(n1, h as usize)
    } else {
        prob_outside_band(n1, n2, g, h as u64)
    };
    p.clamp(0.0, 1.0)
}

/// Equal sample sizes: reflection-principle sum
/// `2 * sum_k (-1)^(k-1) C(2n, n - k*h) / C(2n, n)`, evaluated as nested
/// products so no binomial coefficient is formed.
fn prob_outside_square(n: usize, h: usize) -> f64 {
    let mut p = 0.0;
    for k in (0..=n / h).rev() {
        let mut term = 1.0;
        for j in 0..h {
            let num = (n as f64) - (k * h + j) as f64;
            let den = (n + k * h + j + 1) as f64;
            term = num * term / den;
        }
        p = term * (1.0 - p);
    }
    2.0 * p
}

/// Unequal sample sizes: probability that a uniformly random lattice path
/// from `(0, 0)` to `(n1, n2)` touches `|x/n1 - y/n2| >= h / lcm`.
///
/// Probability mass is pushed through the grid one column at a time; mass
/// reaching a node on or beyond the band boundary is collected and dropped.
fn prob_outside_band(n1: usize, n2: usize, g: usize, h: u64) -> f64 {
    let (x_weight, y_weight) = ((n2 / g) as u64, (n1 / g) as u64);
    let outside = |x: usize, y: usize| (x as u64 * x_weight).abs_diff(y as u64 * y_weight) >= h;

    // mass[y] is the probability of standing at (x, y) without having left the band
    let mut mass = vec![0.0f64; n2 + 1];
    let mut escaped = 0.0;
    for x in 0..=n1 {
        for y in 0..=n2 {
            let mut p = if x == 0 && y == 0 { 1.0 } else { 0.0 };
            if x > 0 {
                let (right, up) = ((n1 - x + 1) as f64, (n2 - y) as f64);
                p += mass[y] * right / (right + up);
            }
            if y > 0 {
                let (right, up) = ((n1 - x) as f64, (n2 - y + 1) as f64);
                p += mass[y - 1] * up / (right + up);
            }
            if p > 0.0 && outside(x, y) {
                escaped += p;
                mass[y] = 0.0;
            } else {
                mass[y] = p;
            }
        }
    }
    escaped
}

fn gcd(mut a: usize, mut b: usize) -> usize {
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a
}

/// Kolmogorov limit with the effective size `sqrt(n1*n2/(n1+n2))` and
/// Stephens' correction.
fn asymptotic_p_value(statistic: f64, n1: usize, n2: usize) -> f64 {
    let (n1, n2) = (n1 as f64, n2 as f64);
    let en = (n1 * n2 / (n1 + n2)).sqrt();
    kolmogorov_survival((en + 0.12 + 0.11 / en) * statistic)
}

/// `P(K > lambda)` for the Kolmogorov distribution:
/// `2 * sum_{k>=1} (-1)^{k-1} exp(-2 k^2 lambda^2)`.
fn kolmogorov_survival(lambda: f64) -> f64 {
    const TERM_RATIO_EPS: f64 = 1e-3;
    const SUM_EPS: f64 = 1e-8;

    if lambda <= 0.0 {
        return 1.0;
    }
    let a2 = -2.0 * lambda * lambda;
    let mut sign = 2.0;
    let mut sum = 0.0;
    let mut previous = 0.0;
    for k in 1..=100 {
        let term = sign * (a2 * f64::from(k * k)).exp();
        sum += term;
        if term.abs() <= TERM_RATIO_EPS * previous || term.abs() <= SUM_EPS * sum {
            return sum.clamp(0.0, 1.0);
        }
        sign = -sign;
        previous = term.abs();
    }
    // Series did not settle: lambda is tiny and the samples are indistinguishable.
    1.0
}
