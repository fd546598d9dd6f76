use approx::assert_relative_eq;
use feos_vle::antoine::AntoineRecord;
use feos_vle::parameter::{IdentifierOption, PureRecord};
use feos_vle::{PhaseDiagramBinary, VleError, VleResult};

fn acetone_water() -> VleResult<[(&'static str, AntoineRecord); 2]> {
    let records = PureRecord::<AntoineRecord>::from_json(
        &["acetone", "water"],
        "parameters/antoine.json",
        IdentifierOption::Name,
    )?;
    Ok([
        ("acetone", records[0].model_record),
        ("water", records[1].model_record),
    ])
}

#[test]
fn txy_diagram_acetone_water() -> VleResult<()> {
    let [acetone, water] = acetone_water()?;
    let diagram =
        PhaseDiagramBinary::bubble_temperature(760.0, acetone, water, 11, Default::default())?;
    assert_eq!(diagram.states.len(), 11);
    let t = diagram.temperature();
    assert_relative_eq!(t[0], 64.69946705536393, max_relative = 1e-7);
    assert_relative_eq!(t[5], 60.51743011505363, max_relative = 1e-6);
    assert_relative_eq!(t[10], 56.289132774790716, max_relative = 1e-7);
    for state in &diagram.states {
        assert_relative_eq!(state.vapor_molefracs.sum(), 1.0, epsilon = 1e-9);
        assert_eq!(state.heaviest_component(), Some("water"));
    }
    Ok(())
}

#[test]
fn pxy_diagram_acetone_water() -> VleResult<()> {
    let [acetone, water] = acetone_water()?;
    let diagram = PhaseDiagramBinary::bubble_pressure(60.51743011505363, acetone, water, 3)?;
    assert_relative_eq!(diagram.pressure()[1], 760.0, max_relative = 1e-6);
    assert_relative_eq!(diagram.liquid_molefracs()[1], 0.5);
    assert_relative_eq!(diagram.vapor_molefracs()[1], 0.5771, max_relative = 1e-3);
    Ok(())
}

#[cfg(feature = "rayon")]
#[test]
fn parallel_txy_diagram() -> VleResult<()> {
    let [acetone, water] = acetone_water()?;
    let serial =
        PhaseDiagramBinary::bubble_temperature(760.0, acetone, water, 21, Default::default())?;
    let parallel =
        PhaseDiagramBinary::par_bubble_temperature(760.0, acetone, water, 21, Default::default())?;
    assert_eq!(serial.temperature(), parallel.temperature());
    Ok(())
}

#[test]
fn too_few_points() -> VleResult<()> {
    let [acetone, water] = acetone_water()?;
    let result = PhaseDiagramBinary::bubble_pressure(50.0, acetone, water, 1);
    assert!(matches!(result, Err(VleError::InvalidInput(_))));
    Ok(())
}
