use approx::assert_relative_eq;
use feos_vle::parameter::{IdentifierOption, Mixture};
use feos_vle::{BubblePoint, BubbleTarget, VleError, VleResult};

const ALKANES: [&str; 5] = ["n-hexane", "n-heptane", "n-octane", "n-decane", "n-butane"];

fn alkanes(molefracs: &[f64]) -> VleResult<Mixture> {
    Mixture::from_json(
        &ALKANES,
        molefracs,
        "parameters/antoine.json",
        IdentifierOption::Name,
    )
}

#[test]
fn bubble_pressure_equimolar_alkanes() -> VleResult<()> {
    let mixture = alkanes(&[0.2; 5])?;
    let bubble = BubblePoint::new(
        &mixture,
        BubbleTarget::Temperature(45.38084),
        None,
        Default::default(),
    )?;
    assert_relative_eq!(bubble.pressure, 756.4509087240755, max_relative = 1e-9);
    assert_relative_eq!(bubble.vapor_molefracs.sum(), 1.0, max_relative = 1e-12);
    assert!(bubble.vapor_molefracs.iter().all(|&y| y >= 0.0));
    // n-butane dominates the vapor
    assert_relative_eq!(bubble.vapor_molefracs[4], 0.86657, max_relative = 1e-4);
    Ok(())
}

#[test]
fn bubble_temperature_equimolar_alkanes() -> VleResult<()> {
    let mixture = alkanes(&[0.2; 5])?;
    let bubble = BubblePoint::new(
        &mixture,
        BubbleTarget::Pressure(760.0),
        None,
        Default::default(),
    )?;
    let boiling_points = mixture.saturation_temperatures(760.0)?;
    let t_min = boiling_points.iter().copied().fold(f64::INFINITY, f64::min);
    let t_max = boiling_points.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    assert!(t_min < bubble.temperature && bubble.temperature < t_max);
    assert_relative_eq!(bubble.temperature, 45.5456162509401, max_relative = 1e-6);
    assert_relative_eq!(bubble.vapor_molefracs.sum(), 1.0, epsilon = 1e-9);
    assert_eq!(bubble.heaviest_component(), Some("n-decane"));
    assert_eq!(bubble.key_component.map(|k| k.index), Some(3));

    // the bubble pressure at the bubble temperature is the specified pressure
    let check = BubblePoint::pressure(&mixture, bubble.temperature)?;
    assert_relative_eq!(check.pressure, 760.0, max_relative = 1e-6);
    Ok(())
}

#[test]
fn bubble_temperature_from_converged_guess() -> VleResult<()> {
    let mixture = alkanes(&[0.1, 0.3, 0.25, 0.15, 0.2])?;
    let bubble = BubblePoint::temperature(&mixture, 760.0, None, Default::default())?;
    assert_relative_eq!(bubble.temperature, 46.536, max_relative = 1e-4);
    let restart =
        BubblePoint::temperature(&mixture, 760.0, Some(bubble.temperature), Default::default())?;
    assert!(restart.iterations <= 2);
    assert_relative_eq!(restart.temperature, bubble.temperature, epsilon = 1e-5);
    Ok(())
}

#[test]
fn bubble_temperature_below_freezing() -> VleResult<()> {
    // bubble temperatures in degree Celsius can be negative
    let mixture = alkanes(&[0.1, 0.3, 0.25, 0.15, 0.2])?;
    let bubble = BubblePoint::temperature(&mixture, 100.0, None, Default::default())?;
    assert!(bubble.temperature < 0.0);
    assert_relative_eq!(bubble.temperature, -12.05, max_relative = 1e-3);
    Ok(())
}

#[test]
fn binary_acetone_water() -> VleResult<()> {
    let records = feos_vle::parameter::PureRecord::from_json(
        &["acetone", "water"],
        "parameters/antoine.json",
        IdentifierOption::Name,
    )?;
    let (acetone, water) = (records[0].model_record, records[1].model_record);
    let bubble = BubblePoint::binary_temperature(
        760.0,
        0.5,
        ("acetone", acetone),
        ("water", water),
        Default::default(),
    )?;
    assert_relative_eq!(bubble.temperature, 60.51743011505363, max_relative = 1e-6);
    assert!(acetone.saturation_temperature(760.0)? < bubble.temperature);
    assert!(bubble.temperature < water.saturation_temperature(760.0)?);
    assert_relative_eq!(bubble.vapor_molefracs.sum(), 1.0, epsilon = 1e-9);
    assert_relative_eq!(bubble.vapor_molefracs[0], 0.5771, max_relative = 1e-3);
    assert_eq!(bubble.heaviest_component(), Some("water"));
    Ok(())
}

#[test]
fn non_positive_temperature_target() -> VleResult<()> {
    let mixture = alkanes(&[0.2; 5])?;
    for t in [0.0, -10.0] {
        let result = BubblePoint::new(
            &mixture,
            BubbleTarget::Temperature(t),
            None,
            Default::default(),
        );
        assert!(matches!(result, Err(VleError::InvalidInput(_))));
    }
    Ok(())
}

#[test]
fn unknown_substance() {
    let result = Mixture::from_json(
        &["n-hexane", "toluene"],
        &[0.5, 0.5],
        "parameters/antoine.json",
        IdentifierOption::Name,
    );
    assert!(matches!(result, Err(VleError::ComponentsNotFound(_))));
}

#[test]
fn temperature_at_antoine_pole() -> VleResult<()> {
    // t + c = 0 for n-hexane
    let mixture = alkanes(&[0.2; 5])?;
    let result = mixture.vapor_pressures(-224.867);
    assert!(matches!(result, Err(VleError::DomainError { .. })));
    Ok(())
}
