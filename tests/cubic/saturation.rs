use approx::assert_relative_eq;
use feos_vle::cubic::{VanDerWaals, VanDerWaalsRecord};
use feos_vle::parameter::{IdentifierOption, PureRecord};
use feos_vle::{PhaseDiagram, SaturationPoint, VleResult};

fn carbon_dioxide() -> VleResult<VanDerWaals> {
    let records = PureRecord::<VanDerWaalsRecord>::from_json(
        &["CO2"],
        "parameters/van_der_waals.json",
        IdentifierOption::Formula,
    )?;
    VanDerWaals::from_record(&records[0].model_record)
}

#[test]
fn saturation_pressure_carbon_dioxide() -> VleResult<()> {
    let eos = carbon_dioxide()?;
    let vle = SaturationPoint::pure_t(&eos, 240.0, 30.0, Default::default())?;
    assert_relative_eq!(vle.pressure, 26.532620581415, max_relative = 1e-5);
    assert_relative_eq!(vle.enthalpy_of_vaporization, 6276.267647407096, max_relative = 1e-3);
    assert_relative_eq!(vle.liquid_residual_enthalpy, -7392.613150559174, max_relative = 1e-3);
    assert_relative_eq!(vle.vapor_residual_enthalpy, -1116.3455031520775, max_relative = 1e-3);
    assert!(vle.liquid_compressibility < vle.vapor_compressibility);
    Ok(())
}

#[test]
fn fugacity_coefficients_agree_at_saturation() -> VleResult<()> {
    let eos = carbon_dioxide()?;
    let vle = SaturationPoint::pure_t(&eos, 240.0, 30.0, Default::default())?;
    let state = eos.state(vle.temperature, vle.pressure);
    let roots = state.roots()?;
    assert!(roots.is_two_phase());
    let phi_l = state.fugacity_coefficient(roots.liquid())?;
    let phi_v = state.fugacity_coefficient(roots.vapor())?;
    assert!((phi_l - phi_v).abs() <= 1e-6);
    Ok(())
}

#[test]
fn restart_from_saturation_pressure() -> VleResult<()> {
    let eos = carbon_dioxide()?;
    let vle = SaturationPoint::pure_t(&eos, 240.0, 10.0, Default::default())?;
    let restart = SaturationPoint::pure_t(&eos, 240.0, vle.pressure, Default::default())?;
    assert!(restart.iterations <= 2);
    assert_relative_eq!(restart.pressure, vle.pressure, max_relative = 1e-5);
    Ok(())
}

#[test]
fn saturation_curve_carbon_dioxide() -> VleResult<()> {
    let eos = carbon_dioxide()?;
    let temperatures: Vec<f64> = (0..9).map(|i| 200.0 + 10.0 * i as f64).collect();
    let diagram = PhaseDiagram::pure_saturation(&eos, &temperatures, 10.0, Default::default());
    assert_eq!(diagram.states.len(), temperatures.len());
    let expected = [
        10.66448, 13.7814, 17.4432, 21.6834, 26.5326, 32.0187, 38.1673, 45.0015, 52.5424,
    ];
    for (&p, &p_ref) in diagram.pressure().iter().zip(expected.iter()) {
        assert_relative_eq!(p, p_ref, max_relative = 1e-4);
    }
    let h = diagram.enthalpy_of_vaporization();
    assert_relative_eq!(h[0], 7423.99, max_relative = 1e-4);
    assert_relative_eq!(h[8], 4121.8, max_relative = 1e-3);
    Ok(())
}
