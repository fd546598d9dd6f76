//! The Antoine correlation for pure component vapor pressures.
//!
//! The correlation reads
//! $$\log_{10} p^\mathrm{sat} = A - \frac{B}{T + C}$$
//! and is used in whatever units the coefficients were fitted in. The
//! parameter table shipped with this crate uses mmHg and °C.
use crate::errors::{VleError, VleResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Antoine coefficients of a single substance.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct AntoineRecord {
    pub a: f64,
    pub b: f64,
    pub c: f64,
}

impl AntoineRecord {
    /// Create a new set of Antoine coefficients.
    pub fn new(a: f64, b: f64, c: f64) -> Self {
        Self { a, b, c }
    }

    /// Vapor pressure at the given temperature.
    ///
    /// Returns a [VleError::DomainError] at the pole `T = -C` instead of
    /// an infinite pressure.
    pub fn vapor_pressure(&self, temperature: f64) -> VleResult<f64> {
        vapor_pressure(self.a, self.b, self.c, temperature)
    }

    /// Temperature at which the vapor pressure equals `pressure`.
    pub fn saturation_temperature(&self, pressure: f64) -> VleResult<f64> {
        if pressure.is_nan() || pressure <= 0.0 {
            return Err(VleError::domain("log10", pressure));
        }
        let denominator = self.a - pressure.log10();
        if denominator == 0.0 {
            return Err(VleError::domain("saturation_temperature", pressure));
        }
        let temperature = self.b / denominator - self.c;
        if !temperature.is_finite() {
            return Err(VleError::domain("saturation_temperature", pressure));
        }
        Ok(temperature)
    }
}

impl fmt::Display for AntoineRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AntoineRecord(a={}, b={}, c={})", self.a, self.b, self.c)
    }
}

/// Vapor pressure `p = 10^(A - B / (T + C))`.
pub fn vapor_pressure(a: f64, b: f64, c: f64, temperature: f64) -> VleResult<f64> {
    let shifted = temperature + c;
    if shifted == 0.0 {
        return Err(VleError::domain("vapor_pressure", temperature));
    }
    let pressure = 10f64.powf(a - b / shifted);
    if !pressure.is_finite() {
        return Err(VleError::domain("vapor_pressure", temperature));
    }
    Ok(pressure)
}
