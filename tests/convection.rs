use fdlab::faer_add::{l2_error, max_abs_error};
use fdlab::problem::{Convection, ConvectionCase};
use fdlab::{solve, ConvectionScheme, Domain, Evolution, Float, Mesh, SolveError};

fn max_error(pb: &Convection, dx: Float, dt: Float, scheme: ConvectionScheme) -> Float {
    let mesh = Mesh::from_domain(pb.domain(), dx, dt).unwrap();
    let u = solve(pb, &mesh, scheme).unwrap();
    max_abs_error(u.as_ref(), pb.reference(&mesh).as_ref())
}

#[test]
fn every_scheme_converges_on_the_smooth_bump() {
    let domain = Domain {
        space: (0.0, 3.0),
        time: (0.0, 1.0),
    };
    let pb = Convection::new(domain, 1.0, ConvectionCase::GaussianBump).unwrap();

    for scheme in ConvectionScheme::ALL {
        let coarse = max_error(&pb, 0.02, 0.01, scheme);
        let fine = max_error(&pb, 0.01, 0.005, scheme);
        assert!(fine < coarse, "{scheme}: {coarse:e} -> {fine:e}");
    }

    // second-order schemes at least halve the error
    for scheme in [
        ConvectionScheme::LaxWendroff,
        ConvectionScheme::LeapFrog,
        ConvectionScheme::Wendroff,
    ] {
        let coarse = max_error(&pb, 0.02, 0.01, scheme);
        let fine = max_error(&pb, 0.01, 0.005, scheme);
        assert!(fine < 0.5 * coarse, "{scheme}: {coarse:e} -> {fine:e}");
    }
}

#[test]
fn every_scheme_converges_in_l2_on_the_discontinuous_cases() {
    let domain = Domain {
        space: (0.0, 3.0),
        time: (0.0, 1.0),
    };
    let rms = |pb: &Convection, dx: Float, scheme: ConvectionScheme| {
        let mesh = Mesh::from_domain(pb.domain(), dx, 0.5 * dx).unwrap();
        let u = solve(pb, &mesh, scheme).unwrap();
        l2_error(u.as_ref(), pb.reference(&mesh).as_ref())
    };

    for case in [
        ConvectionCase::GaussianPlateau,
        ConvectionCase::Indicator,
        ConvectionCase::TwoLevel,
    ] {
        let pb = Convection::new(domain, 1.0, case).unwrap();
        for scheme in ConvectionScheme::ALL {
            let coarse = rms(&pb, 0.02, scheme);
            let fine = rms(&pb, 0.01, scheme);
            assert!(
                fine < 0.9 * coarse,
                "{case:?} {scheme}: {coarse:e} -> {fine:e}"
            );
        }
    }
}

#[test]
fn upwind_is_exact_at_unit_courant_number() {
    let domain = Domain {
        space: (0.0, 1.0),
        time: (0.0, 1.0),
    };
    for case in [ConvectionCase::Indicator, ConvectionCase::TwoLevel] {
        let pb = Convection::new(domain, 1.0, case).unwrap();
        let err = max_error(&pb, 0.1, 0.1, ConvectionScheme::UpWind);
        assert!(err < 1e-12, "{case:?}: {err:e}");
    }
}

#[test]
fn upwind_smears_the_pulse_by_the_expected_amount() {
    let domain = Domain {
        space: (0.0, 5.0),
        time: (0.0, 2.0),
    };
    let pb = Convection::from_case_id(domain, 1.0, 1).unwrap();
    let mesh = Mesh::from_domain(&domain, 0.01, 0.00625).unwrap();
    let u = solve(&pb, &mesh, ConvectionScheme::UpWind).unwrap();
    let reference = pb.reference(&mesh);

    let max = max_abs_error(u.as_ref(), reference.as_ref());
    let rms = l2_error(u.as_ref(), reference.as_ref());
    assert!((1e-2..1.0).contains(&max), "max error {max:e}");
    assert!((1e-2..2e-1).contains(&rms), "rms error {rms:e}");
}

#[test]
fn bogus_scheme_yields_no_field() {
    let domain = Domain {
        space: (0.0, 1.0),
        time: (0.0, 1.0),
    };
    let pb = Convection::new(domain, 1.0, ConvectionCase::Indicator).unwrap();
    let mesh = Mesh::from_domain(&domain, 0.1, 0.1).unwrap();

    let run = |name: &str| -> Result<_, SolveError> {
        let scheme: ConvectionScheme = name.parse()?;
        solve(&pb, &mesh, scheme)
    };
    assert_eq!(
        run("bogus").err(),
        Some(SolveError::UnknownScheme("bogus".into()))
    );
    assert!(run("Carlson").is_ok());
}

#[test]
fn grid_step_larger_than_the_domain_is_rejected() {
    let domain = Domain {
        space: (0.0, 1.0),
        time: (0.0, 1.0),
    };
    assert!(matches!(
        Mesh::from_domain(&domain, 1.5, 0.1),
        Err(SolveError::InvalidGrid { axis: "x", .. })
    ));
    assert!(matches!(
        Mesh::from_domain(&domain, 0.1, 2.0),
        Err(SolveError::InvalidGrid { axis: "t", .. })
    ));
    // a vanishing step would ask for more points than fit in memory
    assert!(matches!(
        Mesh::from_domain(&domain, 1e-300, 0.1),
        Err(SolveError::InvalidGrid { axis: "x", .. })
    ));
    // one point is not a grid either
    assert!(matches!(
        Mesh::from_domain(&domain, 0.9, 0.1),
        Err(SolveError::InvalidGrid { count: 1, .. })
    ));
}

#[test]
fn unknown_case_is_an_error() {
    let domain = Domain {
        space: (0.0, 1.0),
        time: (0.0, 1.0),
    };
    assert_eq!(
        Convection::from_case_id(domain, 1.0, 0),
        Err(SolveError::UnknownCase {
            problem: "convection",
            id: 0
        })
    );
}
