pub mod convection;
pub mod heat;
pub mod plane;

pub use convection::ConvectionScheme;
pub use heat::{HeatScheme, ThetaMethod};
pub use plane::{solve_plane, Layers, PlaneScheme};
