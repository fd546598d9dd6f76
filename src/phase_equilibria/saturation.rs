use crate::cubic::{EosState, VanDerWaals};
use crate::errors::{VleError, VleResult};
use crate::{SolverOptions, Verbosity};
use std::fmt;

const MAX_ITER_SATURATION: usize = 200;
const TOL_SATURATION: f64 = 1e-6;

/// Vapor-liquid equilibrium of a pure substance described by the
/// van der Waals equation of state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SaturationPoint {
    /// Temperature in Kelvin
    pub temperature: f64,
    /// Saturation pressure in the unit of the critical pressure
    pub pressure: f64,
    pub liquid_compressibility: f64,
    pub vapor_compressibility: f64,
    pub liquid_fugacity_coefficient: f64,
    pub vapor_fugacity_coefficient: f64,
    pub liquid_residual_enthalpy: f64,
    pub vapor_residual_enthalpy: f64,
    /// Difference of the vapor and liquid residual enthalpies
    pub enthalpy_of_vaporization: f64,
    /// Number of pressure updates until convergence
    pub iterations: usize,
}

/// Liquid and vapor root of the cubic at a trial pressure.
struct PhasePair {
    state: EosState,
    z_liquid: f64,
    z_vapor: f64,
    phi_liquid: f64,
    phi_vapor: f64,
}

impl PhasePair {
    fn new(eos: &VanDerWaals, temperature: f64, pressure: f64) -> VleResult<Self> {
        let state = eos.state(temperature, pressure);
        let roots = state.roots()?;
        if !roots.is_two_phase() {
            return Err(VleError::EosRootError(format!(
                "no liquid and vapor root at T = {temperature}, p = {pressure}: {roots}"
            )));
        }
        let (z_liquid, z_vapor) = (roots.liquid(), roots.vapor());
        Ok(Self {
            state,
            z_liquid,
            z_vapor,
            phi_liquid: state.fugacity_coefficient(z_liquid)?,
            phi_vapor: state.fugacity_coefficient(z_vapor)?,
        })
    }

    fn residual(&self) -> f64 {
        (self.phi_vapor - self.phi_liquid).abs()
    }
}

impl SaturationPoint {
    /// Calculate the saturation pressure at the given temperature.
    ///
    /// Starting from the estimate `pressure`, which has to be below the
    /// critical pressure, the pressure is updated by successive substitution
    /// `p <- p phi_liquid / phi_vapor` until the fugacity coefficients of both
    /// phases agree within the tolerance. The returned pressure is the one at
    /// which the converged fugacity coefficients were evaluated.
    pub fn pure_t(
        eos: &VanDerWaals,
        temperature: f64,
        pressure: f64,
        options: SolverOptions,
    ) -> VleResult<Self> {
        if !(temperature.is_finite() && temperature > 0.0) {
            return Err(VleError::InvalidInput(format!(
                "temperature must be positive, got {temperature}"
            )));
        }
        if temperature >= eos.tc {
            return Err(VleError::InvalidInput(format!(
                "temperature {temperature} is not below the critical temperature {}",
                eos.tc
            )));
        }
        if !(pressure.is_finite() && pressure > 0.0) {
            return Err(VleError::InvalidInput(format!(
                "pressure must be positive, got {pressure}"
            )));
        }
        if pressure >= eos.pc {
            return Err(VleError::InvalidInput(format!(
                "initial pressure {pressure} is not below the critical pressure {}",
                eos.pc
            )));
        }

        let (max_iter, tol, verbosity) = options.unwrap_or(MAX_ITER_SATURATION, TOL_SATURATION);
        log_iter!(
            verbosity,
            " iter |    residual    |   pressure   |  Z liquid  |  Z vapor   "
        );
        log_iter!(verbosity, "{:-<64}", "");

        let mut pressure = pressure;
        for iteration in 0..=max_iter {
            let phases = PhasePair::new(eos, temperature, pressure)?;
            let residual = phases.residual();
            log_iter!(
                verbosity,
                " {:4} | {:14.8e} | {:12.6} | {:10.6} | {:10.6}",
                iteration,
                residual,
                pressure,
                phases.z_liquid,
                phases.z_vapor
            );

            if residual <= tol {
                log_result!(
                    verbosity,
                    "SaturationPoint::pure_t: calculation converged in {} step(s)\n",
                    iteration
                );
                return Ok(Self::from_phases(eos, &phases, iteration));
            }

            pressure = update_pressure(pressure, phases.phi_liquid, phases.phi_vapor)?;
        }
        log_result!(
            verbosity,
            "SaturationPoint::pure_t: no convergence within {} step(s)\n",
            max_iter
        );
        Err(VleError::NotConverged("SaturationPoint::pure_t".into()))
    }

    fn from_phases(eos: &VanDerWaals, phases: &PhasePair, iterations: usize) -> Self {
        let state = &phases.state;
        let liquid_residual_enthalpy = state.residual_enthalpy(phases.z_liquid, eos.rgas);
        let vapor_residual_enthalpy = state.residual_enthalpy(phases.z_vapor, eos.rgas);
        Self {
            temperature: state.temperature,
            pressure: state.pressure,
            liquid_compressibility: phases.z_liquid,
            vapor_compressibility: phases.z_vapor,
            liquid_fugacity_coefficient: phases.phi_liquid,
            vapor_fugacity_coefficient: phases.phi_vapor,
            liquid_residual_enthalpy,
            vapor_residual_enthalpy,
            enthalpy_of_vaporization: vapor_residual_enthalpy - liquid_residual_enthalpy,
            iterations,
        }
    }
}

/// Successive substitution step `p phi_liquid / phi_vapor`.
fn update_pressure(pressure: f64, phi_liquid: f64, phi_vapor: f64) -> VleResult<f64> {
    let pressure = pressure * phi_liquid / phi_vapor;
    if pressure.is_finite() && pressure > 0.0 {
        Ok(pressure)
    } else {
        Err(VleError::IterationFailed("SaturationPoint::pure_t".into()))
    }
}

impl fmt::Display for SaturationPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "SaturationPoint(T = {:.4}, p = {:.4}, h_res,l = {:.4}, h_res,v = {:.4}, delta_h_vap = {:.4})",
            self.temperature,
            self.pressure,
            self.liquid_residual_enthalpy,
            self.vapor_residual_enthalpy,
            self.enthalpy_of_vaporization
        )
    }
}
