//! Recurrence formulation: a single pass carrying in-force and discount state

/// NPV by indexed scalar loop
///
/// State starts at in-force 1.0 and discount v = 1/(1+r). Each period adds
/// `in_force * (P - S*q[t]) * v_t`, then decrements in-force by q[t] + w[t]
/// and rolls the discount forward one period.
pub fn npv_accumulator(
    mortality: &[f64],
    withdrawal: &[f64],
    premium: f64,
    sum_assured: f64,
    interest_rate: f64,
) -> f64 {
    let n = mortality.len().min(withdrawal.len());
    let v = 1.0 / (1.0 + interest_rate);

    let mut in_force = 1.0;
    let mut v_t = v;
    let mut result = 0.0;

    for t in 0..n {
        result += in_force * (premium - sum_assured * mortality[t]) * v_t;
        in_force *= 1.0 - (mortality[t] + withdrawal[t]);
        v_t *= v;
    }

    result
}

/// NPV by the same recurrence expressed as one fused iterator fold
///
/// The ahead-of-time counterpart of a JIT-compiled scalar loop: no index
/// bounds checks, no intermediate storage, and the whole body inlines into
/// the caller's loop.
#[inline]
pub fn npv_compiled(
    mortality: &[f64],
    withdrawal: &[f64],
    premium: f64,
    sum_assured: f64,
    interest_rate: f64,
) -> f64 {
    let v = 1.0 / (1.0 + interest_rate);

    let (result, _, _) = mortality.iter().zip(withdrawal).fold(
        (0.0, 1.0, v),
        |(result, in_force, v_t), (&q, &w)| {
            (
                result + in_force * (premium - sum_assured * q) * v_t,
                in_force * (1.0 - (q + w)),
                v_t * v,
            )
        },
    );

    result
}
