use super::vapor_molefracs;
use crate::antoine::AntoineRecord;
use crate::errors::{VleError, VleResult};
use crate::parameter::Mixture;
use crate::{SolverOptions, Verbosity};
use itertools::Itertools;
use ndarray::Array1;
use std::fmt;

const MAX_ITER_BUBBLE: usize = 200;
const TOL_BUBBLE: f64 = 1e-6;

/// The variable that is specified in a bubble point calculation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BubbleTarget {
    /// Fixed temperature, the bubble pressure is calculated.
    Temperature(f64),
    /// Fixed pressure, the bubble temperature is calculated.
    Pressure(f64),
}

/// The reference component of the relative volatilities.
#[derive(Debug, Clone, PartialEq)]
pub struct KeyComponent {
    pub index: usize,
    pub name: String,
}

/// Bubble point of an ideal liquid mixture.
#[derive(Debug, Clone, PartialEq)]
pub struct BubblePoint {
    /// Temperature in the unit of the Antoine correlation
    pub temperature: f64,
    /// Pressure in the unit of the Antoine correlation
    pub pressure: f64,
    pub liquid_molefracs: Array1<f64>,
    pub vapor_molefracs: Array1<f64>,
    /// The heaviest component, only determined in bubble temperature calculations.
    pub key_component: Option<KeyComponent>,
    pub iterations: usize,
}

impl BubblePoint {
    /// Calculate the bubble point for either given temperature or pressure.
    pub fn new(
        mixture: &Mixture,
        target: BubbleTarget,
        initial_temperature: Option<f64>,
        options: SolverOptions,
    ) -> VleResult<Self> {
        match target {
            BubbleTarget::Temperature(t) => Self::pressure(mixture, t),
            BubbleTarget::Pressure(p) => {
                Self::temperature(mixture, p, initial_temperature, options)
            }
        }
    }

    /// Bubble pressure `p = sum_i x_i p_i(T)` at the given temperature.
    pub fn pressure(mixture: &Mixture, temperature: f64) -> VleResult<Self> {
        check_temperature(temperature)?;
        let x = mixture.molefracs();
        let p_i = mixture.vapor_pressures(temperature)?;
        let pressure = x.dot(&p_i);
        let y = vapor_molefracs(&x, &p_i, pressure)?;
        Ok(Self {
            temperature,
            pressure,
            liquid_molefracs: x,
            vapor_molefracs: y,
            key_component: None,
            iterations: 0,
        })
    }

    /// Bubble temperature at the given pressure.
    ///
    /// The component with the highest boiling point at `pressure` is used as
    /// key component. It is selected once from the pure component boiling
    /// points and kept for all iterations. In every step the pressure of the
    /// key component is corrected with the relative volatilities,
    /// `p_key = p / sum_i x_i p_i / p_key`, and the new temperature is the
    /// boiling point of the key component at that pressure.
    ///
    /// Without an `initial_temperature`, the iteration starts from the mole
    /// fraction weighted mean of the pure component boiling points.
    pub fn temperature(
        mixture: &Mixture,
        pressure: f64,
        initial_temperature: Option<f64>,
        options: SolverOptions,
    ) -> VleResult<Self> {
        if !(pressure.is_finite() && pressure > 0.0) {
            return Err(VleError::InvalidInput(format!(
                "pressure must be positive, got {pressure}"
            )));
        }
        if let Some(t) = initial_temperature {
            check_temperature(t)?;
        }

        let (max_iter, tol, verbosity) = options.unwrap_or(MAX_ITER_BUBBLE, TOL_BUBBLE);
        let x = mixture.molefracs();
        let t_sat = mixture.saturation_temperatures(pressure)?;
        let key = t_sat
            .iter()
            .position_max_by(|t1, t2| t1.total_cmp(t2))
            .ok_or_else(|| VleError::InvalidInput("mixture without components".into()))?;
        let key_antoine: AntoineRecord = mixture.components()[key].antoine;
        let mut temperature = initial_temperature.unwrap_or_else(|| x.dot(&t_sat));

        log_iter!(
            verbosity,
            "key component: {} ({})",
            mixture.components()[key].name,
            key
        );
        log_iter!(verbosity, " iter |    residual    |  temperature  |  key pressure ");
        log_iter!(verbosity, "{:-<56}", "");

        for iteration in 1..=max_iter {
            let p_i = mixture.vapor_pressures(temperature)?;
            let volatility = &p_i / p_i[key];
            let p_key = pressure / x.dot(&volatility);
            let t_new = key_antoine.saturation_temperature(p_key)?;
            let residual = (t_new - temperature).abs();
            log_iter!(
                verbosity,
                " {:4} | {:14.8e} | {:13.8} | {:13.6}",
                iteration,
                residual,
                t_new,
                p_key
            );

            if residual <= tol {
                log_result!(
                    verbosity,
                    "BubblePoint::temperature: calculation converged in {} step(s)\n",
                    iteration
                );
                return Self::from_temperature(mixture, t_new, pressure, key, iteration);
            }
            temperature = t_new;
        }
        log_result!(
            verbosity,
            "BubblePoint::temperature: no convergence within {} step(s)\n",
            max_iter
        );
        Err(VleError::NotConverged("BubblePoint::temperature".into()))
    }

    /// Bubble temperature of a binary mixture with mole fraction `x1` of the
    /// first component.
    pub fn binary_temperature(
        pressure: f64,
        x1: f64,
        component1: (&str, AntoineRecord),
        component2: (&str, AntoineRecord),
        options: SolverOptions,
    ) -> VleResult<Self> {
        let mixture = Mixture::binary(x1, component1, component2)?;
        Self::temperature(&mixture, pressure, None, options)
    }

    fn from_temperature(
        mixture: &Mixture,
        temperature: f64,
        pressure: f64,
        key: usize,
        iterations: usize,
    ) -> VleResult<Self> {
        let x = mixture.molefracs();
        let p_i = mixture.vapor_pressures(temperature)?;
        // normalized with the bubble pressure at the converged temperature,
        // which agrees with `pressure` within the tolerance of the iteration
        let y = vapor_molefracs(&x, &p_i, x.dot(&p_i))?;
        Ok(Self {
            temperature,
            pressure,
            liquid_molefracs: x,
            vapor_molefracs: y,
            key_component: Some(KeyComponent {
                index: key,
                name: mixture.components()[key].name.clone(),
            }),
            iterations,
        })
    }

    /// Name of the heaviest component, if it was determined.
    pub fn heaviest_component(&self) -> Option<&str> {
        self.key_component.as_ref().map(|k| k.name.as_str())
    }
}

// only applies to inputs, converged bubble temperatures can be negative
fn check_temperature(temperature: f64) -> VleResult<()> {
    if temperature.is_finite() && temperature > 0.0 {
        Ok(())
    } else {
        Err(VleError::InvalidInput(format!(
            "temperature must be positive, got {temperature}"
        )))
    }
}

impl fmt::Display for BubblePoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "BubblePoint(T = {:.4}, p = {:.4}, x = {:.4}, y = {:.4}",
            self.temperature, self.pressure, self.liquid_molefracs, self.vapor_molefracs
        )?;
        if let Some(key) = &self.key_component {
            write!(f, ", key component = {}", key.name)?;
        }
        write!(f, ")")
    }
}
