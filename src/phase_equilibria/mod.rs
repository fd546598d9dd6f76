use crate::errors::{VleError, VleResult};
use ndarray::Array1;

mod bubble_point;
mod phase_diagram;
mod saturation;
pub use bubble_point::{BubblePoint, BubbleTarget, KeyComponent};
pub use phase_diagram::{PhaseDiagram, PhaseDiagramBinary};
pub use saturation::SaturationPoint;

/// Vapor mole fractions `y_i = x_i p_i / p` of an ideal mixture.
///
/// `vapor_pressures` are the pure component vapor pressures at the
/// temperature of the mixture and `total_pressure` is the pressure of the
/// system.
pub fn vapor_molefracs(
    liquid_molefracs: &Array1<f64>,
    vapor_pressures: &Array1<f64>,
    total_pressure: f64,
) -> VleResult<Array1<f64>> {
    if liquid_molefracs.len() != vapor_pressures.len() {
        return Err(VleError::IncompatibleParameters(format!(
            "{} mole fractions but {} vapor pressures",
            liquid_molefracs.len(),
            vapor_pressures.len()
        )));
    }
    if total_pressure == 0.0 || !total_pressure.is_finite() {
        return Err(VleError::domain("vapor_molefracs", total_pressure));
    }
    Ok(liquid_molefracs * vapor_pressures / total_pressure)
}
