use std::fmt;

use faer::Mat;

use crate::{
    driver::Driver,
    grid::{Grid, Mesh, Resolution},
    method::Method,
    problem::Evolution,
    Float, SolveError,
};

/// Points per axis of a fresh simulation.
pub const DEFAULT_POINTS: usize = 101;

#[derive(Debug, Clone)]
pub struct Simulation<P, M> {
    pub(crate) problem: P,
    pub(crate) mesh: Mesh,
    pub(crate) method: M,
}

impl<P: Evolution, M: Method<P>> Simulation<P, M> {
    /// Pairs `problem` with `method` on a mesh of [`DEFAULT_POINTS`] points
    /// along both space and time.
    pub fn new(problem: P, method: M) -> Result<Self, SolveError> {
        let points = Resolution::Points(DEFAULT_POINTS);
        let mesh = Mesh::with_resolution(problem.domain(), points, points)?;
        Ok(Self {
            problem,
            mesh,
            method,
        })
    }

    pub fn with_space_resolution(mut self, r: Resolution) -> Result<Self, SolveError> {
        let (lower, upper) = self.problem.domain().space;
        self.mesh = Mesh::new(
            Grid::with_resolution("x", lower, upper, r)?,
            self.mesh.time(),
        )?;
        Ok(self)
    }

    pub fn with_time_resolution(mut self, r: Resolution) -> Result<Self, SolveError> {
        let (lower, upper) = self.problem.domain().time;
        self.mesh = Mesh::new(
            self.mesh.space(),
            Grid::with_resolution("t", lower, upper, r)?,
        )?;
        Ok(self)
    }

    pub fn with_mesh(mut self, mesh: Mesh) -> Self {
        self.mesh = mesh;
        self
    }

    pub fn with_method<N: Method<P>>(self, method: N) -> Simulation<P, N> {
        Simulation {
            problem: self.problem,
            mesh: self.mesh,
            method,
        }
    }

    pub fn problem(&self) -> &P {
        &self.problem
    }

    pub fn mesh(&self) -> &Mesh {
        &self.mesh
    }

    pub fn method(&self) -> &M {
        &self.method
    }

    /// Runs without observers.
    pub fn solve(self) -> Result<Mat<Float>, SolveError> {
        Driver::new(self).run()
    }
}

impl<P: Evolution, M: Method<P>> fmt::Display for Simulation<P, M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (space, time) = (self.mesh.space(), self.mesh.time());
        write!(
            f,
            "simulation of `{}` problem:\n\t- `{}` method\n\t- Δx = {:e} ({} points)\n\t- Δt = {:e} ({} points)",
            self.problem.name(),
            self.method.name(),
            space.step_size(),
            space.count(),
            time.step_size(),
            time.count()
        )
    }
}
