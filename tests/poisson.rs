use fdlab::faer_add::max_abs_error;
use fdlab::poisson::assemble;
use fdlab::problem::Poisson;
use fdlab::{solve_poisson, Float, PlaneDomain, PlaneMesh, SolveError, Stencil};

const SQUARE: PlaneDomain = PlaneDomain {
    x: (-1.0, 1.0),
    y: (-1.0, 1.0),
};

fn max_error(id: u32, h: Float, stencil: &str) -> Result<Float, SolveError> {
    let pb = Poisson::from_case_id(SQUARE, id)?;
    let mesh = PlaneMesh::from_domain(&SQUARE, h)?;
    let u = solve_poisson(&pb, &mesh, stencil.parse()?)?;
    Ok(max_abs_error(u.as_ref(), pb.reference(&mesh).as_ref()))
}

#[test]
fn quadratics_are_exact_for_every_stencil() {
    for stencil in ["five", "oblique_five", "nine"] {
        let err = max_error(1, 0.1, stencil).unwrap();
        assert!(err < 1e-10, "{stencil}: {err:e}");
    }
}

#[test]
fn nine_point_wins_on_the_ripple() {
    let five = max_error(5, 0.1, "five").unwrap();
    let nine = max_error(5, 0.1, "nine").unwrap();
    assert!(nine < five, "nine {nine:e} vs five {five:e}");
    assert!(nine < 1e-3, "{nine:e}");
}

#[test]
fn solution_satisfies_the_assembled_system() {
    let pb = Poisson::from_case_id(SQUARE, 2).unwrap();
    let mesh = PlaneMesh::from_domain(&SQUARE, 0.2).unwrap();
    let system = assemble(&pb, &mesh, Stencil::Nine).unwrap();
    let x = system.solve().unwrap();

    let mut ax = vec![0.0; system.size()];
    system.mul_vec(&x, &mut ax);
    let residual = ax
        .iter()
        .zip(system.rhs())
        .map(|(l, r)| (l - r).abs())
        .fold(0.0, Float::max);
    assert!(residual < 1e-9, "{residual:e}");
}

#[test]
fn cone_apex_on_a_node_yields_no_field() {
    // 11 points per axis put a node on the origin, where the source is -1/r
    assert!(matches!(
        max_error(4, 0.18, "nine"),
        Err(SolveError::NonFinite { .. })
    ));
    let err = max_error(4, 0.2, "five").unwrap();
    assert!(err.is_finite() && err < 0.1, "{err:e}");
}

#[test]
fn bad_selectors_are_typed_failures() {
    assert_eq!(
        max_error(1, 0.1, "bogus"),
        Err(SolveError::UnknownScheme("bogus".into()))
    );
    assert!(matches!(
        max_error(6, 0.1, "five"),
        Err(SolveError::UnknownCase { problem: "poisson", id: 6 })
    ));
    assert!(matches!(
        max_error(1, 3.0, "five"),
        Err(SolveError::InvalidGrid { .. })
    ));
}
