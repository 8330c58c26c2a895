use fdlab::faer_add::{l2_error, max_abs_error};
use fdlab::{problem::Poisson, solve_poisson, PlaneDomain, PlaneMesh, SolveError, Stencil};

fn main() -> Result<(), SolveError> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    // usage: poisson [case] [h]
    let mut args = std::env::args().skip(1);
    let case = args.next().and_then(|s| s.parse().ok()).unwrap_or(5);
    let h = args.next().and_then(|s| s.parse().ok()).unwrap_or(0.1);

    let domain = PlaneDomain {
        x: (-1.0, 1.0),
        y: (-1.0, 1.0),
    };
    let problem = Poisson::from_case_id(domain, case)?;
    let mesh = PlaneMesh::from_domain(&domain, h)?;
    let reference = problem.reference(&mesh);

    for stencil in Stencil::ALL {
        let u = solve_poisson(&problem, &mesh, stencil)?;
        tracing::info!(
            "{stencil}: max error {:.3e}, l2 error {:.3e}",
            max_abs_error(u.as_ref(), reference.as_ref()),
            l2_error(u.as_ref(), reference.as_ref())
        );
    }

    Ok(())
}
