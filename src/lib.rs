pub mod driver;
pub mod error;
pub mod faer_add;
pub mod grid;
pub mod linear;
pub mod method;
pub mod methods;
pub mod poisson;
pub mod problem;
pub mod sim;

pub type Float = f64;

pub use driver::{solve, Driver, Logger, MaxError, ObsCtx, Observer};
pub use error::SolveError;
pub use grid::{Grid, Mesh, Mesh2D, PlaneMesh, Resolution};
pub use method::{Ctx, Method};
pub use methods::{solve_plane, ConvectionScheme, HeatScheme, Layers, PlaneScheme, ThetaMethod};
pub use poisson::{solve_poisson, Stencil};
pub use problem::{Domain, Domain2D, Evolution, Forced, PlaneDomain};
pub use sim::Simulation;
