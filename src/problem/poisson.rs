use std::f64::consts::PI;

use faer::Mat;

use super::{reference_plane, PlaneDomain};
use crate::{grid::PlaneMesh, Float, SolveError};

/// Manufactured solutions of `-(u_xx + u_yy) = f`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PoissonCase {
    Bilinear,
    Paraboloid,
    Gaussian,
    DiagonalWave,
    /// `sqrt(x^2 + y^2)`; the source is singular at the origin.
    Cone,
    Ripple,
}

impl TryFrom<u32> for PoissonCase {
    type Error = SolveError;

    fn try_from(id: u32) -> Result<Self, Self::Error> {
        match id {
            0 => Ok(Self::Bilinear),
            1 => Ok(Self::Paraboloid),
            2 => Ok(Self::Gaussian),
            3 => Ok(Self::DiagonalWave),
            4 => Ok(Self::Cone),
            5 => Ok(Self::Ripple),
            _ => Err(SolveError::UnknownCase {
                problem: "poisson",
                id,
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Poisson {
    domain: PlaneDomain,
    case: PoissonCase,
}

impl Poisson {
    pub fn new(domain: PlaneDomain, case: PoissonCase) -> Self {
        Self { domain, case }
    }

    pub fn from_case_id(domain: PlaneDomain, id: u32) -> Result<Self, SolveError> {
        Ok(Self::new(domain, PoissonCase::try_from(id)?))
    }

    pub fn name(&self) -> String {
        format!("poisson ({:?})", self.case)
    }

    pub fn domain(&self) -> &PlaneDomain {
        &self.domain
    }

    pub fn case(&self) -> PoissonCase {
        self.case
    }

    pub fn solution(&self, x: Float, y: Float) -> Float {
        let r2 = x * x + y * y;
        match self.case {
            PoissonCase::Bilinear => x + y + x * y,
            PoissonCase::Paraboloid => r2,
            PoissonCase::Gaussian => (-r2).exp(),
            PoissonCase::DiagonalWave => (PI * (x + y)).sin(),
            PoissonCase::Cone => r2.sqrt(),
            PoissonCase::Ripple => (PI * r2).sin(),
        }
    }

    pub fn source(&self, x: Float, y: Float) -> Float {
        let r2 = x * x + y * y;
        match self.case {
            PoissonCase::Bilinear => 0.0,
            PoissonCase::Paraboloid => -4.0,
            PoissonCase::Gaussian => -(4.0 * r2 - 4.0) * (-r2).exp(),
            PoissonCase::DiagonalWave => 2.0 * PI * PI * (PI * (x + y)).sin(),
            PoissonCase::Cone => -1.0 / r2.sqrt(),
            PoissonCase::Ripple => {
                -4.0 * PI * (PI * r2).cos() + 4.0 * PI * PI * r2 * (PI * r2).sin()
            }
        }
    }

    pub fn reference(&self, mesh: &PlaneMesh) -> Mat<Float> {
        reference_plane(mesh, |x, y| self.solution(x, y))
    }
}
