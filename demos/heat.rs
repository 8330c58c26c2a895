use std::cell::Cell;

use fdlab::{
    problem::Heat, Domain, Driver, HeatScheme, Logger, MaxError, Resolution, Simulation,
    SolveError, ThetaMethod,
};

fn main() -> Result<(), SolveError> {
    tracing_subscriber::fmt::init();

    // usage: heat [case] [dx] [dt]
    let mut args = std::env::args().skip(1);
    let case = args.next().and_then(|s| s.parse().ok()).unwrap_or(4);
    let dx = args.next().and_then(|s| s.parse().ok()).unwrap_or(0.05);
    let dt = args.next().and_then(|s| s.parse().ok()).unwrap_or(0.01);

    let problem = Heat::from_case_id(
        Domain {
            space: (0.0, 1.0),
            time: (0.0, 0.5),
        },
        1.0,
        case,
    )?;

    for name in ["explicit", "implicit", "Crank-Nicolson", "Douglas"] {
        let scheme: HeatScheme = name.parse()?;
        let sim = Simulation::new(problem.clone(), ThetaMethod::from(scheme))?
            .with_space_resolution(Resolution::Delta(dx))?
            .with_time_resolution(Resolution::Delta(dt))?;

        let worst = Cell::new(0.0);
        Driver::new(sim)
            .with_observer(Logger)
            .with_observer(MaxError::reporting_to(&worst))
            .run()?;

        tracing::info!("{scheme}: max error {:.3e} on sampled layers", worst.get());
    }

    Ok(())
}
