use super::{BubblePoint, SaturationPoint};
use crate::antoine::AntoineRecord;
use crate::cubic::VanDerWaals;
use crate::errors::{VleError, VleResult};
use crate::parameter::Mixture;
use crate::SolverOptions;
use ndarray::Array1;
#[cfg(feature = "rayon")]
use rayon::prelude::*;

/// Saturation curve of a pure substance.
#[derive(Debug, Clone)]
pub struct PhaseDiagram {
    pub states: Vec<SaturationPoint>,
}

impl PhaseDiagram {
    /// Create a phase diagram from a list of saturation points.
    pub fn new(states: Vec<SaturationPoint>) -> Self {
        Self { states }
    }

    /// Calculate saturation points at the given temperatures.
    ///
    /// Every calculation is initialized with the saturation pressure of the
    /// previous temperature, the first one with `initial_pressure`.
    /// Temperatures at which the solver fails are skipped.
    pub fn pure_saturation(
        eos: &VanDerWaals,
        temperatures: &[f64],
        initial_pressure: f64,
        options: SolverOptions,
    ) -> Self {
        let mut states = Vec::with_capacity(temperatures.len());
        let mut pressure = initial_pressure;
        for &t in temperatures {
            if let Ok(vle) = SaturationPoint::pure_t(eos, t, pressure, options) {
                pressure = vle.pressure;
                states.push(vle);
            }
        }
        Self::new(states)
    }

    pub fn temperature(&self) -> Array1<f64> {
        self.states.iter().map(|s| s.temperature).collect()
    }

    pub fn pressure(&self) -> Array1<f64> {
        self.states.iter().map(|s| s.pressure).collect()
    }

    pub fn enthalpy_of_vaporization(&self) -> Array1<f64> {
        self.states
            .iter()
            .map(|s| s.enthalpy_of_vaporization)
            .collect()
    }
}

/// Bubble point curves of a binary mixture.
#[derive(Debug, Clone)]
pub struct PhaseDiagramBinary {
    pub states: Vec<BubblePoint>,
}

impl PhaseDiagramBinary {
    pub fn new(states: Vec<BubblePoint>) -> Self {
        Self { states }
    }

    /// T-x-y diagram at constant pressure.
    pub fn bubble_temperature(
        pressure: f64,
        component1: (&str, AntoineRecord),
        component2: (&str, AntoineRecord),
        npoints: usize,
        options: SolverOptions,
    ) -> VleResult<Self> {
        let states = molefrac_grid(npoints)?
            .into_iter()
            .map(|x1| {
                let mixture = Mixture::binary(x1, component1, component2)?;
                BubblePoint::temperature(&mixture, pressure, None, options)
            })
            .collect::<VleResult<_>>()?;
        Ok(Self::new(states))
    }

    /// T-x-y diagram at constant pressure evaluated in parallel.
    #[cfg(feature = "rayon")]
    pub fn par_bubble_temperature(
        pressure: f64,
        component1: (&str, AntoineRecord),
        component2: (&str, AntoineRecord),
        npoints: usize,
        options: SolverOptions,
    ) -> VleResult<Self> {
        let states = molefrac_grid(npoints)?
            .into_par_iter()
            .map(|x1| {
                let mixture = Mixture::binary(x1, component1, component2)?;
                BubblePoint::temperature(&mixture, pressure, None, options)
            })
            .collect::<VleResult<_>>()?;
        Ok(Self::new(states))
    }

    /// P-x-y diagram at constant temperature.
    pub fn bubble_pressure(
        temperature: f64,
        component1: (&str, AntoineRecord),
        component2: (&str, AntoineRecord),
        npoints: usize,
    ) -> VleResult<Self> {
        let states = molefrac_grid(npoints)?
            .into_iter()
            .map(|x1| {
                let mixture = Mixture::binary(x1, component1, component2)?;
                BubblePoint::pressure(&mixture, temperature)
            })
            .collect::<VleResult<_>>()?;
        Ok(Self::new(states))
    }

    pub fn temperature(&self) -> Array1<f64> {
        self.states.iter().map(|s| s.temperature).collect()
    }

    pub fn pressure(&self) -> Array1<f64> {
        self.states.iter().map(|s| s.pressure).collect()
    }

    /// Liquid mole fractions of the first component.
    pub fn liquid_molefracs(&self) -> Array1<f64> {
        self.states.iter().map(|s| s.liquid_molefracs[0]).collect()
    }

    /// Vapor mole fractions of the first component.
    pub fn vapor_molefracs(&self) -> Array1<f64> {
        self.states.iter().map(|s| s.vapor_molefracs[0]).collect()
    }
}

// equidistant grid on [0, 1] that hits both ends exactly
fn molefrac_grid(npoints: usize) -> VleResult<Vec<f64>> {
    if npoints < 2 {
        return Err(VleError::InvalidInput(format!(
            "a phase diagram needs at least 2 points, got {npoints}"
        )));
    }
    let n = (npoints - 1) as f64;
    Ok((0..npoints).map(|i| i as f64 / n).collect())
}
