//! Implementation of the van der Waals equation of state in its
//! compressibility form.
//!
//! With the reduced properties $T_r = T/T_c$ and $p_r = p/p_c$, the
//! dimensionless coefficients
//! $$A = \frac{27 p_r}{64 T_r^2}\qquad B = \frac{p_r}{8 T_r}$$
//! turn the equation of state into the cubic
//! $$Z^3 - (B + 1) Z^2 + A Z - A B = 0$$
//! for the compressibility factor $Z$. The smallest real root describes the
//! liquid, the largest real root the vapor.
use crate::errors::{VleError, VleResult};
use arrayvec::ArrayVec;
use num_dual::{first_derivative, Dual64};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use std::fmt;

/// Ideal gas constant in J/(mol K).
pub const RGAS: f64 = 8.314;

const NEWTON_STEPS: usize = 2;

/// Critical properties of a single substance.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct VanDerWaalsRecord {
    /// critical temperature in Kelvin
    pub tc: f64,
    /// critical pressure
    pub pc: f64,
}

impl VanDerWaalsRecord {
    pub fn new(tc: f64, pc: f64) -> Self {
        Self { tc, pc }
    }
}

/// The van der Waals equation of state for a pure substance.
///
/// Pressures can be given in any unit as long as the critical pressure and
/// all state pressures share it. Enthalpies are returned in the energy unit
/// of the gas constant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VanDerWaals {
    /// Critical temperature in Kelvin
    pub tc: f64,
    /// Critical pressure
    pub pc: f64,
    /// Ideal gas constant
    pub rgas: f64,
}

impl VanDerWaals {
    /// Create the equation of state from critical properties.
    pub fn new(tc: f64, pc: f64) -> VleResult<Self> {
        if !(tc.is_finite() && tc > 0.0) {
            return Err(VleError::InvalidInput(format!(
                "critical temperature must be positive, got {tc}"
            )));
        }
        if !(pc.is_finite() && pc > 0.0) {
            return Err(VleError::InvalidInput(format!(
                "critical pressure must be positive, got {pc}"
            )));
        }
        Ok(Self {
            tc,
            pc,
            rgas: RGAS,
        })
    }

    pub fn from_record(record: &VanDerWaalsRecord) -> VleResult<Self> {
        Self::new(record.tc, record.pc)
    }

    /// Replace the default gas constant [RGAS].
    pub fn with_gas_constant(mut self, rgas: f64) -> Self {
        self.rgas = rgas;
        self
    }

    /// Evaluate the coefficients of the cubic at the given state.
    pub fn state(&self, temperature: f64, pressure: f64) -> EosState {
        let reduced_temperature = temperature / self.tc;
        let reduced_pressure = pressure / self.pc;
        EosState {
            temperature,
            pressure,
            reduced_temperature,
            reduced_pressure,
            a: 27.0 * reduced_pressure / (64.0 * reduced_temperature.powi(2)),
            b: reduced_pressure / (8.0 * reduced_temperature),
        }
    }
}

/// Coefficients of the cubic at a given temperature and pressure.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EosState {
    pub temperature: f64,
    pub pressure: f64,
    pub reduced_temperature: f64,
    pub reduced_pressure: f64,
    /// attraction term
    pub a: f64,
    /// repulsion term
    pub b: f64,
}

impl EosState {
    /// Real roots of the cubic.
    pub fn roots(&self) -> VleResult<CubicRoots> {
        compressibility_roots(self.a, self.b)
    }

    pub fn fugacity_coefficient(&self, z: f64) -> VleResult<f64> {
        fugacity_coefficient(z, self.a, self.b)
    }

    /// Residual enthalpy `R T (Z - 1 - A/Z)` of a phase with compressibility `z`.
    pub fn residual_enthalpy(&self, z: f64, rgas: f64) -> f64 {
        residual_enthalpy(z, self.a, self.temperature, rgas)
    }
}

/// The real roots of the cubic in ascending order.
#[derive(Debug, Clone, PartialEq)]
pub struct CubicRoots(ArrayVec<f64, 3>);

impl CubicRoots {
    /// Compressibility factor of the liquid (smallest root).
    pub fn liquid(&self) -> f64 {
        self.0[0]
    }

    /// Compressibility factor of the vapor (largest root).
    pub fn vapor(&self) -> f64 {
        self.0[self.0.len() - 1]
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Whether the cubic has distinct liquid and vapor roots.
    pub fn is_two_phase(&self) -> bool {
        self.0.len() == 3 && self.liquid() < self.vapor()
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }
}

impl fmt::Display for CubicRoots {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CubicRoots({:?})", self.as_slice())
    }
}

/// Real roots of `Z^3 - (B + 1) Z^2 + A Z - A B = 0`.
///
/// The roots are computed in closed form (Cardano's formula for one real
/// root, the trigonometric form for three real roots) and refined with
/// Newton steps.
pub fn compressibility_roots(a: f64, b: f64) -> VleResult<CubicRoots> {
    let c2 = -(b + 1.0);
    let c1 = a;
    let c0 = -a * b;
    let roots = cubic_roots(c2, c1, c0);
    if roots.is_empty() {
        return Err(VleError::EosRootError(format!(
            "no real root for A = {a}, B = {b}"
        )));
    }
    Ok(CubicRoots(roots))
}

/// Real roots of the monic cubic `x^3 + c2 x^2 + c1 x + c0`, sorted ascending.
fn cubic_roots(c2: f64, c1: f64, c0: f64) -> ArrayVec<f64, 3> {
    // depressed cubic t^3 + p t + q with x = t - c2 / 3
    let shift = -c2 / 3.0;
    let p = c1 - c2 * c2 / 3.0;
    let q = 2.0 * c2.powi(3) / 27.0 - c2 * c1 / 3.0 + c0;
    let discriminant = (0.5 * q).powi(2) + (p / 3.0).powi(3);

    let mut roots = ArrayVec::<f64, 3>::new();
    if p == 0.0 {
        roots.push((-q).cbrt() + shift);
    } else if discriminant > 0.0 {
        let s = discriminant.sqrt();
        let u = -(0.5 * q.abs() + s).cbrt().copysign(q);
        let v = if u == 0.0 { 0.0 } else { -p / (3.0 * u) };
        roots.push(u + v + shift);
    } else {
        let m = 2.0 * (-p / 3.0).sqrt();
        let theta = (3.0 * q / (p * m)).clamp(-1.0, 1.0).acos() / 3.0;
        for k in 0..3 {
            roots.push(m * (theta - 2.0 * PI * k as f64 / 3.0).cos() + shift);
        }
    }

    for root in roots.iter_mut() {
        *root = polish(*root, c2, c1, c0);
    }
    roots.retain(|r| r.is_finite());
    roots.sort_by(|r1, r2| r1.total_cmp(r2));
    roots
}

fn polish(mut x: f64, c2: f64, c1: f64, c0: f64) -> f64 {
    for _ in 0..NEWTON_STEPS {
        let (f, df) = first_derivative(|x: Dual64| x * x * x + x * x * c2 + x * c1 + c0, x);
        if df == 0.0 || f == 0.0 {
            break;
        }
        let x_new = x - f / df;
        let f_new = x_new.powi(3) + c2 * x_new.powi(2) + c1 * x_new + c0;
        if f_new.is_nan() || f_new.abs() >= f.abs() {
            break;
        }
        x = x_new;
    }
    x
}

/// Fugacity coefficient `exp(Z - 1 - ln(Z - B) - A/Z)` of a phase with
/// compressibility factor `z`.
pub fn fugacity_coefficient(z: f64, a: f64, b: f64) -> VleResult<f64> {
    if z.is_nan() || z <= b {
        return Err(VleError::domain("fugacity_coefficient", z));
    }
    let phi = (z - 1.0 - (z - b).ln() - a / z).exp();
    if !phi.is_finite() {
        return Err(VleError::domain("fugacity_coefficient", z));
    }
    Ok(phi)
}

/// Residual enthalpy `R T (Z - 1 - A/Z)`.
pub fn residual_enthalpy(z: f64, a: f64, temperature: f64, rgas: f64) -> f64 {
    rgas * temperature * (z - 1.0 - a / z)
}
