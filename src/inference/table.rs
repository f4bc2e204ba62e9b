//! Coefficient tables: estimates, standard errors, z-statistics, p-values.
//!
//! p-values are two-sided under the asymptotic normal approximation,
//! `p = 2(1 − Φ(|z|)) = erfc(|z| / √2)`. A zero standard error (e.g. a
//! direction dropped from the pseudoinverse) yields `z = NaN`, `p = NaN`.
use crate::inference::errors::{InferenceError, InferenceResult};
use ndarray::Array1;
use statrs::function::erf::erfc;
use std::fmt;

/// Which covariance estimator produced the standard errors.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum StdErrorKind {
    /// Inverse observed information.
    #[default]
    Classical,
    /// Bollerslev–Wooldridge sandwich `J⁻¹ S J⁻¹`.
    Robust,
}

impl fmt::Display for StdErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StdErrorKind::Classical => write!(f, "classical"),
            StdErrorKind::Robust => write!(f, "robust"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CoefficientTable {
    pub names: Vec<String>,
    pub estimates: Array1<f64>,
    pub std_errors: Array1<f64>,
    pub z_stats: Array1<f64>,
    pub p_values: Array1<f64>,
    pub kind: StdErrorKind,
}

impl CoefficientTable {
    /// Assemble a table and derive z-statistics and p-values.
    ///
    /// # Errors
    /// - `InferenceError::EstimateDimMismatch` if lengths disagree.
    /// - `InferenceError::InvalidStdError` for negative or non-finite SEs.
    pub fn new(
        names: Vec<String>, estimates: Array1<f64>, std_errors: Array1<f64>, kind: StdErrorKind,
    ) -> InferenceResult<CoefficientTable> {
        let k = estimates.len();
        if names.len() != k {
            return Err(InferenceError::EstimateDimMismatch { expected: k, actual: names.len() });
        }
        if std_errors.len() != k {
            return Err(InferenceError::EstimateDimMismatch {
                expected: k,
                actual: std_errors.len(),
            });
        }
        if let Some((index, &value)) =
            std_errors.iter().enumerate().find(|(_, se)| !se.is_finite() || **se < 0.0)
        {
            return Err(InferenceError::InvalidStdError { index, value });
        }
        let z_stats = Array1::from_shape_fn(k, |i| {
            if std_errors[i] > 0.0 { estimates[i] / std_errors[i] } else { f64::NAN }
        });
        let p_values = z_stats.mapv(|z| erfc(z.abs() / std::f64::consts::SQRT_2));
        Ok(CoefficientTable { names, estimates, std_errors, z_stats, p_values, kind })
    }

    pub fn len(&self) -> usize {
        self.estimates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.estimates.is_empty()
    }

    /// Row for parameter `name`: `(estimate, std_error, z, p)`.
    pub fn row(&self, name: &str) -> Option<(f64, f64, f64, f64)> {
        let i = self.names.iter().position(|n| n == name)?;
        Some((self.estimates[i], self.std_errors[i], self.z_stats[i], self.p_values[i]))
    }
}

impl fmt::Display for CoefficientTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Coefficients ({} standard errors)", self.kind)?;
        writeln!(f, "{:>8} {:>14} {:>14} {:>10} {:>10}", "", "estimate", "std. error", "z", "P>|z|")?;
        for i in 0..self.len() {
            writeln!(
                f,
                "{:>8} {:>14.6e} {:>14.6e} {:>10.3} {:>10.4}",
                self.names[i],
                self.estimates[i],
                self.std_errors[i],
                self.z_stats[i],
                self.p_values[i]
            )?;
        }
        Ok(())
    }
}
