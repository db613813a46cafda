//! Batch formulation: whole-vector operations with intermediate arrays
//!
//! Each stage materializes a full vector (cumulative survival, in-force,
//! net cash flow, discount factors) before the final reduction. The
//! allocations are part of what this strategy measures.

/// NPV computed stage by stage over whole vectors
///
/// Periods are paired index-for-index and truncated to the shorter of
/// `mortality` and `withdrawal`. No input checks are performed.
pub fn npv_vectorized(
    mortality: &[f64],
    withdrawal: &[f64],
    premium: f64,
    sum_assured: f64,
    interest_rate: f64,
) -> f64 {
    let n = mortality.len().min(withdrawal.len());
    let q = &mortality[..n];
    let w = &withdrawal[..n];

    let survival: Vec<f64> = q.iter().zip(w).map(|(q, w)| 1.0 - q - w).collect();
    let decrements = cumprod(&survival);

    // In-force at the start of period t is the survival through t-1
    let in_force: Vec<f64> = std::iter::once(1.0)
        .chain(decrements.iter().copied())
        .take(n)
        .collect();

    let premiums = scale(&in_force, premium);
    let claims = scale(&multiply(&in_force, q), sum_assured);
    let net_cashflows: Vec<f64> = premiums.iter().zip(&claims).map(|(p, c)| p - c).collect();

    let v = 1.0 / (1.0 + interest_rate);
    // v^1, v^2, ..., v^n
    let discount = cumprod(&vec![v; n]);

    multiply(&net_cashflows, &discount).iter().sum()
}

/// Running product: out[t] = x[0] * ... * x[t]
fn cumprod(values: &[f64]) -> Vec<f64> {
    values
        .iter()
        .scan(1.0, |acc, &x| {
            *acc *= x;
            Some(*acc)
        })
        .collect()
}

fn multiply(a: &[f64], b: &[f64]) -> Vec<f64> {
    a.iter().zip(b).map(|(x, y)| x * y).collect()
}

fn scale(values: &[f64], factor: f64) -> Vec<f64> {
    values.iter().map(|x| x * factor).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_cumprod() {
        assert_eq!(cumprod(&[0.5, 0.5, 2.0]), vec![0.5, 0.25, 0.5]);
        assert!(cumprod(&[]).is_empty());
    }

    #[test]
    fn test_two_periods_by_hand() {
        // Period 0: 1.0 * (10 - 100*0.1) * v = 0
        // Period 1: 0.7 * (10 - 100*0.2) * v^2 = -7 / 1.21
        let npv = npv_vectorized(&[0.1, 0.2], &[0.2, 0.1], 10.0, 100.0, 0.1);
        assert_relative_eq!(npv, -7.0 / 1.21, epsilon = 1e-12);
    }

    #[test]
    fn test_discount_vector_matches_powers() {
        let v: f64 = 1.0 / 1.02;
        let discount = cumprod(&[v; 40]);
        for (t, d) in discount.iter().enumerate() {
            assert_relative_eq!(*d, v.powf(t as f64 + 1.0), max_relative = 1e-13);
        }
    }

    #[test]
    fn test_empty_table_is_zero() {
        assert_eq!(npv_vectorized(&[], &[], 100.0, 25_000.0, 0.02), 0.0);
    }
}
