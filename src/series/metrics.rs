use crate::foundation::error::{FourierError, FourierResult};

/// Mean of squared pointwise differences.
pub fn mean_squared_error(approx: &[f64], exact: &[f64]) -> FourierResult<f64> {
    check_lengths(approx, exact)?;
    Ok(sum_squared(approx, exact) / approx.len() as f64)
}

/// Largest absolute pointwise difference.
pub fn max_abs_error(approx: &[f64], exact: &[f64]) -> FourierResult<f64> {
    check_lengths(approx, exact)?;
    Ok(max_abs(approx, exact))
}

fn check_lengths(approx: &[f64], exact: &[f64]) -> FourierResult<()> {
    if approx.len() != exact.len() {
        return Err(FourierError::validation(format!(
            "sample length mismatch: {} vs {}",
            approx.len(),
            exact.len()
        )));
    }
    if approx.is_empty() {
        return Err(FourierError::validation("error metrics need at least one sample"));
    }
    Ok(())
}

pub(crate) fn sum_squared(approx: &[f64], exact: &[f64]) -> f64 {
    approx
        .iter()
        .zip(exact)
        .map(|(a, e)| (a - e) * (a - e))
        .sum()
}

pub(crate) fn max_abs(approx: &[f64], exact: &[f64]) -> f64 {
    approx
        .iter()
        .zip(exact)
        .map(|(a, e)| (a - e).abs())
        .fold(0.0, f64::max)
}
