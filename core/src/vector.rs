//! Dense numeric helpers over term-aligned vectors.
//!
//! Every vector built for a query has one slot per distinct query term, so
//! binary operations require equal lengths and report
//! [`RankError::ShapeMismatch`] otherwise.

use crate::error::{RankError, Result};

pub type Vector = Vec<f64>;

fn check_shape(a: &[f64], b: &[f64]) -> Result<()> {
    if a.len() != b.len() {
        return Err(RankError::ShapeMismatch { left: a.len(), right: b.len() });
    }
    Ok(())
}

/// Elementwise product.
pub fn product(a: &[f64], b: &[f64]) -> Result<Vector> {
    check_shape(a, b)?;
    Ok(a.iter().zip(b).map(|(x, y)| x * y).collect())
}

/// Elementwise sum.
pub fn sum(a: &[f64], b: &[f64]) -> Result<Vector> {
    check_shape(a, b)?;
    Ok(a.iter().zip(b).map(|(x, y)| x + y).collect())
}

/// In-place elementwise sum, used when folding many zone vectors together.
pub fn add_assign(acc: &mut [f64], v: &[f64]) -> Result<()> {
    check_shape(acc, v)?;
    for (a, x) in acc.iter_mut().zip(v) {
        *a += x;
    }
    Ok(())
}

pub fn scale(v: &[f64], alpha: f64) -> Vector {
    v.iter().map(|u| alpha * u).collect()
}

/// Maps each raw count `u` to `1 + ln(u)`, keeping zeros at zero.
pub fn sublinear_scale(v: &[f64]) -> Vector {
    v.iter()
        .map(|&u| if u == 0.0 { 0.0 } else { 1.0 + u.ln() })
        .collect()
}

pub fn dot(a: &[f64], b: &[f64]) -> Result<f64> {
    check_shape(a, b)?;
    // Start from +0.0 so an all-zero score never comes out as -0.0.
    Ok(a.iter().zip(b).fold(0.0, |acc, (x, y)| acc + x * y))
}
