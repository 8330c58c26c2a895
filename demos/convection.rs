use fdlab::faer_add::{l2_error, max_abs_error};
use fdlab::{
    problem::Convection, ConvectionScheme, Domain, Driver, Evolution, Logger, Resolution,
    Simulation, SolveError,
};

fn main() -> Result<(), SolveError> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    // usage: convection [case] [a]
    let mut args = std::env::args().skip(1);
    let case = args.next().and_then(|s| s.parse().ok()).unwrap_or(1);
    let a = args.next().and_then(|s| s.parse().ok()).unwrap_or(1.0);

    let problem = Convection::from_case_id(
        Domain {
            space: (0.0, 5.0),
            time: (0.0, 2.0),
        },
        a,
        case,
    )?;

    for scheme in ConvectionScheme::ALL {
        let sim = Simulation::new(problem.clone(), scheme)?
            .with_space_resolution(Resolution::Delta(0.01))?
            .with_time_resolution(Resolution::Delta(0.00625))?;
        let reference = sim.problem().reference(sim.mesh());
        tracing::info!("{sim}");

        let u = Driver::new(sim)
            .with_time_sampling(Resolution::Delta(0.25))
            .with_observer(Logger)
            .run()?;

        tracing::info!(
            "{scheme}: max error {:.3e}, l2 error {:.3e}",
            max_abs_error(u.as_ref(), reference.as_ref()),
            l2_error(u.as_ref(), reference.as_ref())
        );
    }

    Ok(())
}
