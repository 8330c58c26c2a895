use faer::Mat;

use crate::{
    grid::{Mesh, Mesh2D, PlaneMesh},
    Float,
};

pub mod convection;
pub mod heat;
pub mod poisson;

pub use convection::{Convection, Convection2D, Convection2DCase, ConvectionCase};
pub use heat::{Heat, HeatCase};
pub use poisson::{Poisson, PoissonCase};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Domain {
    pub space: (Float, Float),
    pub time: (Float, Float),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Domain2D {
    pub x: (Float, Float),
    pub y: (Float, Float),
    pub time: (Float, Float),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlaneDomain {
    pub x: (Float, Float),
    pub y: (Float, Float),
}

/// A one-dimensional time-dependent problem with a closed-form solution.
///
/// Boundary and initial values are not given independently: they are the
/// analytic solution evaluated on the edges of the domain.
pub trait Evolution {
    fn name(&self) -> String;

    fn domain(&self) -> &Domain;

    /// Advection speed or diffusivity.
    fn coefficient(&self) -> Float;

    fn solution(&self, x: Float, t: Float) -> Float;

    fn boundary_lower(&self, t: Float) -> Float {
        self.solution(self.domain().space.0, t)
    }

    fn boundary_upper(&self, t: Float) -> Float {
        self.solution(self.domain().space.1, t)
    }

    fn initial(&self, x: Float) -> Float {
        self.solution(x, self.domain().time.0)
    }

    /// The analytic solution sampled on every node of `mesh`.
    fn reference(&self, mesh: &Mesh) -> Mat<Float> {
        let (space, time) = (mesh.space(), mesh.time());
        Mat::from_fn(space.count(), time.count(), |i, n| {
            self.solution(space.at(i), time.at(n))
        })
    }
}

/// An evolution problem with a right-hand side `f(x, t)`.
pub trait Forced: Evolution {
    fn source(&self, x: Float, t: Float) -> Float;
}

/// Seeds column 0 with the initial condition and rows `0` and `nx - 1` with
/// the boundary values of every time layer.
pub(crate) fn seed<P: Evolution + ?Sized>(problem: &P, mesh: &Mesh) -> Mat<Float> {
    let (space, time) = (mesh.space(), mesh.time());
    let last = space.count() - 1;

    let mut u = Mat::<Float>::zeros(space.count(), time.count());
    for (i, x) in space.iter().enumerate() {
        u[(i, 0)] = problem.initial(x);
    }
    for (n, t) in time.iter().enumerate() {
        u[(0, n)] = problem.boundary_lower(t);
        u[(last, n)] = problem.boundary_upper(t);
    }
    u
}

pub(crate) fn reference_plane(
    mesh: &PlaneMesh,
    solution: impl Fn(Float, Float) -> Float,
) -> Mat<Float> {
    let (x, y) = (mesh.x(), mesh.y());
    Mat::from_fn(x.count(), y.count(), |i, j| solution(x.at(i), y.at(j)))
}

pub(crate) fn reference_layer(
    mesh: &Mesh2D,
    n: usize,
    solution: impl Fn(Float, Float, Float) -> Float,
) -> Mat<Float> {
    let (x, y, t) = (mesh.x(), mesh.y(), mesh.time().at(n));
    Mat::from_fn(x.count(), y.count(), |i, j| solution(x.at(i), y.at(j), t))
}
