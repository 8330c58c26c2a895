use std::cell::Cell;

use faer::Mat;
use faer_core::MatRef;

use crate::{
    faer_add::max_abs_error,
    grid::{Mesh, Resolution},
    method::{Ctx, Method},
    problem::{self, Evolution},
    sim::Simulation,
    Float, SolveError,
};

pub struct ObsCtx<'ctx, P: ?Sized> {
    // Meta
    problem: &'ctx P,
    mesh: &'ctx Mesh,
    method: &'static str,
    time_sampling: usize,

    // Iteration info
    iter: usize,
    time: Float,
    solution: MatRef<'ctx, Float>, // column `iter` of the field
}

impl<'ctx, P: ?Sized> ObsCtx<'ctx, P> {
    pub fn problem(&self) -> &'ctx P {
        self.problem
    }

    pub fn mesh(&self) -> &'ctx Mesh {
        self.mesh
    }

    pub fn method(&self) -> &'static str {
        self.method
    }

    pub fn iter(&self) -> usize {
        self.iter
    }

    pub fn time(&self) -> Float {
        self.time
    }

    pub fn solution(&self) -> MatRef<'ctx, Float> {
        self.solution
    }

    pub fn sampling_period(&self) -> usize {
        self.time_sampling
    }
}

#[allow(unused_variables)]
pub trait Observer<P: ?Sized> {
    fn at_startup(&mut self, ctx: ObsCtx<P>) -> Result<(), SolveError> {
        Ok(())
    }

    fn at_each_iteration(&mut self, ctx: ObsCtx<P>) -> Result<(), SolveError> {
        Ok(())
    }

    fn at_cleanup(&mut self, ctx: ObsCtx<P>) -> Result<(), SolveError> {
        Ok(())
    }
}

pub struct Driver<'d, P, M> {
    pub(crate) sim: Simulation<P, M>,
    pub(crate) observers: Vec<Box<dyn Observer<P> + 'd>>,
    pub(crate) time_sampling: usize,
}

impl<'d, P: Evolution, M: Method<P>> Driver<'d, P, M> {
    pub fn new(sim: Simulation<P, M>) -> Self {
        let time_sampling = 1 + sim.mesh.time().count() / 10;
        Self {
            sim,
            observers: Vec::new(),
            time_sampling,
        }
    }

    pub fn with_time_sampling(mut self, sampling_period: Resolution) -> Self {
        self.time_sampling = match sampling_period {
            Resolution::Delta(period) => {
                (period / self.sim.mesh.time().step_size()).ceil().max(1.0) as usize
            }
            Resolution::Points(period) => period.max(1),
        };
        self
    }

    pub fn with_observer(mut self, observer: impl Observer<P> + 'd) -> Self {
        self.observers.push(Box::new(observer));
        self
    }

    pub fn simulation(&self) -> &Simulation<P, M> {
        &self.sim
    }

    /// Marches every layer and returns the `nx × nt` field. Any failure,
    /// including one raised by an observer, aborts the run.
    pub fn run(&mut self) -> Result<Mat<Float>, SolveError> {
        let Simulation {
            problem,
            mesh,
            method,
        } = &mut self.sim;
        let (problem, mesh) = (&*problem, &*mesh);
        let name = method.name();
        let time = mesh.time();

        let mut u = problem::seed(problem, mesh);
        method.init(Ctx {
            problem,
            mesh,
            n: 0,
        })?;

        for o in self.observers.iter_mut() {
            o.at_startup(ObsCtx {
                problem,
                mesh,
                method: name,
                time_sampling: self.time_sampling,
                iter: 0,
                time: time.lower(),
                solution: u.as_ref().col(0),
            })?;
        }

        for n in 1..time.count() {
            method.step(Ctx { problem, mesh, n }, u.as_mut())?;
            check_layer(u.as_ref(), n)?;

            if n % self.time_sampling == 0 {
                for o in self.observers.iter_mut() {
                    o.at_each_iteration(ObsCtx {
                        problem,
                        mesh,
                        method: name,
                        time_sampling: self.time_sampling,
                        iter: n,
                        time: time.at(n),
                        solution: u.as_ref().col(n),
                    })?;
                }
            }
        }

        let last = time.count() - 1;
        for o in self.observers.iter_mut() {
            o.at_cleanup(ObsCtx {
                problem,
                mesh,
                method: name,
                time_sampling: self.time_sampling,
                iter: last,
                time: time.upper(),
                solution: u.as_ref().col(last),
            })?;
        }

        Ok(u)
    }
}

/// One-shot run of `method` on `problem` without observers.
pub fn solve<P: Evolution + ?Sized, M: Method<P>>(
    problem: &P,
    mesh: &Mesh,
    mut method: M,
) -> Result<Mat<Float>, SolveError> {
    let mut u = problem::seed(problem, mesh);
    method.init(Ctx {
        problem,
        mesh,
        n: 0,
    })?;
    for n in 1..mesh.time().count() {
        method.step(Ctx { problem, mesh, n }, u.as_mut())?;
        check_layer(u.as_ref(), n)?;
    }
    Ok(u)
}

/// Fails on the first time layer holding an infinite or NaN value.
fn check_layer(u: MatRef<'_, Float>, n: usize) -> Result<(), SolveError> {
    if (0..u.nrows()).any(|i| !u.read(i, n).is_finite()) {
        tracing::error!(layer = n, "solution blew up");
        return Err(SolveError::NonFinite {
            what: "time layer",
            index: n,
        });
    }
    Ok(())
}

pub struct Logger;

impl<P: Evolution + ?Sized> Observer<P> for Logger {
    fn at_startup(&mut self, ctx: ObsCtx<P>) -> Result<(), SolveError> {
        let (space, time) = (ctx.mesh().space(), ctx.mesh().time());
        tracing::event!(
            tracing::Level::INFO,
            "start of simulation of problem `{}` (`{}` method, Δx={:e} ({} points), Δt={:e} ({} points))",
            ctx.problem().name(),
            ctx.method(),
            space.step_size(),
            space.count(),
            time.step_size(),
            time.count(),
        );
        Ok(())
    }

    fn at_each_iteration(&mut self, ctx: ObsCtx<P>) -> Result<(), SolveError> {
        tracing::event!(
            tracing::Level::TRACE,
            "problem `{}`: step {} (t={:.4})",
            ctx.problem().name(),
            ctx.iter(),
            ctx.time()
        );
        Ok(())
    }

    fn at_cleanup(&mut self, ctx: ObsCtx<P>) -> Result<(), SolveError> {
        tracing::event!(
            tracing::Level::INFO,
            "finished simulation of problem `{}`",
            ctx.problem().name()
        );
        Ok(())
    }
}

/// Tracks the largest deviation from the analytic solution over the sampled
/// layers (the first and last layer are always included).
#[derive(Debug, Default, Clone, Copy)]
pub struct MaxError<'a> {
    max: Option<&'a Cell<Float>>,
    current: Float,
}

impl<'a> MaxError<'a> {
    /// Reports the final value into `out` at cleanup.
    pub fn reporting_to(out: &'a Cell<Float>) -> Self {
        Self {
            max: Some(out),
            current: 0.0,
        }
    }

    pub fn value(&self) -> Float {
        self.current
    }

    fn record<P: Evolution + ?Sized>(&mut self, ctx: &ObsCtx<P>) {
        let space = ctx.mesh().space();
        let exact = Mat::from_fn(space.count(), 1, |i, _| {
            ctx.problem().solution(space.at(i), ctx.time())
        });
        let err = max_abs_error(ctx.solution(), exact.as_ref());
        self.current = self.current.max(err);
    }
}

impl<P: Evolution + ?Sized> Observer<P> for MaxError<'_> {
    fn at_startup(&mut self, ctx: ObsCtx<P>) -> Result<(), SolveError> {
        self.current = 0.0;
        self.record(&ctx);
        Ok(())
    }

    fn at_each_iteration(&mut self, ctx: ObsCtx<P>) -> Result<(), SolveError> {
        self.record(&ctx);
        Ok(())
    }

    fn at_cleanup(&mut self, ctx: ObsCtx<P>) -> Result<(), SolveError> {
        self.record(&ctx);
        if let Some(out) = self.max {
            out.set(self.current);
        }
        tracing::debug!(
            "problem `{}`: max error {:e}",
            ctx.problem().name(),
            self.current
        );
        Ok(())
    }
}
