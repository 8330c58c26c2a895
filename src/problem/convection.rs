use faer::Mat;
use faer_core::MatRef;

use super::{reference_layer, Domain, Domain2D, Evolution};
use crate::{faer_add::apply_func, grid::Mesh2D, Float, SolveError};

/// Initial profiles of `u_t + a u_x = 0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConvectionCase {
    /// Gaussian pulse at `x = 1.5` next to a unit plateau on `[0.3, 0.5]`.
    GaussianPlateau,
    /// Unit indicator of `[0.3, 0.8]`.
    Indicator,
    /// `0.75` on `[0.3, 0.8]`, `0.25` elsewhere.
    TwoLevel,
    /// Smooth bump `0.5 exp(-100 (x - 1)^2) + 0.25`.
    GaussianBump,
}

impl TryFrom<u32> for ConvectionCase {
    type Error = SolveError;

    fn try_from(id: u32) -> Result<Self, Self::Error> {
        match id {
            1 => Ok(Self::GaussianPlateau),
            2 => Ok(Self::Indicator),
            3 => Ok(Self::TwoLevel),
            4 => Ok(Self::GaussianBump),
            _ => Err(SolveError::UnknownCase {
                problem: "convection",
                id,
            }),
        }
    }
}

impl ConvectionCase {
    pub fn id(self) -> u32 {
        match self {
            Self::GaussianPlateau => 1,
            Self::Indicator => 2,
            Self::TwoLevel => 3,
            Self::GaussianBump => 4,
        }
    }

    pub fn profile(self, x: Float) -> Float {
        let inside = (0.3..=0.8).contains(&x);
        match self {
            Self::GaussianPlateau => {
                if (0.3..=0.5).contains(&x) {
                    1.0
                } else {
                    (-160.0 * (x - 1.5).powi(2)).exp()
                }
            }
            Self::Indicator => {
                if inside {
                    1.0
                } else {
                    0.0
                }
            }
            Self::TwoLevel => {
                if inside {
                    0.75
                } else {
                    0.25
                }
            }
            Self::GaussianBump => 0.5 * (-100.0 * (x - 1.0).powi(2)).exp() + 0.25,
        }
    }
}

/// Linear advection `u_t + a u_x = 0`, transported exactly along characteristics.
#[derive(Debug, Clone, PartialEq)]
pub struct Convection {
    domain: Domain,
    a: Float,
    case: ConvectionCase,
}

impl Convection {
    pub fn new(domain: Domain, a: Float, case: ConvectionCase) -> Result<Self, SolveError> {
        if !a.is_finite() {
            return Err(SolveError::InvalidCoefficient { name: "a", value: a });
        }
        Ok(Self { domain, a, case })
    }

    pub fn from_case_id(domain: Domain, a: Float, id: u32) -> Result<Self, SolveError> {
        Self::new(domain, a, ConvectionCase::try_from(id)?)
    }

    pub fn case(&self) -> ConvectionCase {
        self.case
    }

    /// Initial condition applied element-wise to a column of coordinates.
    pub fn initial_profile(&self, x: MatRef<'_, Float>) -> Mat<Float> {
        apply_func(x, |x| self.case.profile(x))
    }
}

impl Evolution for Convection {
    fn name(&self) -> String {
        format!("convection (case {}, a={})", self.case.id(), self.a)
    }

    fn domain(&self) -> &Domain {
        &self.domain
    }

    fn coefficient(&self) -> Float {
        self.a
    }

    fn solution(&self, x: Float, t: Float) -> Float {
        self.case.profile(x - self.a * t)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Convection2DCase {
    /// Unit field with the quadrant `x >= 0.5, y >= 0.5` cut out.
    Corner,
}

impl TryFrom<u32> for Convection2DCase {
    type Error = SolveError;

    fn try_from(id: u32) -> Result<Self, Self::Error> {
        match id {
            1 => Ok(Self::Corner),
            _ => Err(SolveError::UnknownCase {
                problem: "2-D convection",
                id,
            }),
        }
    }
}

impl Convection2DCase {
    pub fn profile(self, x: Float, y: Float) -> Float {
        match self {
            Self::Corner => {
                if x >= 0.5 && y >= 0.5 {
                    0.0
                } else {
                    1.0
                }
            }
        }
    }
}

/// `u_t + a u_x + b u_y = 0`
#[derive(Debug, Clone, PartialEq)]
pub struct Convection2D {
    domain: Domain2D,
    a: Float,
    b: Float,
    case: Convection2DCase,
}

impl Convection2D {
    pub fn new(
        domain: Domain2D,
        a: Float,
        b: Float,
        case: Convection2DCase,
    ) -> Result<Self, SolveError> {
        for (name, value) in [("a", a), ("b", b)] {
            if !value.is_finite() {
                return Err(SolveError::InvalidCoefficient { name, value });
            }
        }
        Ok(Self { domain, a, b, case })
    }

    pub fn from_case_id(domain: Domain2D, a: Float, b: Float, id: u32) -> Result<Self, SolveError> {
        Self::new(domain, a, b, Convection2DCase::try_from(id)?)
    }

    pub fn name(&self) -> String {
        format!("2-D convection (a={}, b={})", self.a, self.b)
    }

    pub fn domain(&self) -> &Domain2D {
        &self.domain
    }

    pub fn speeds(&self) -> (Float, Float) {
        (self.a, self.b)
    }

    pub fn solution(&self, x: Float, y: Float, t: Float) -> Float {
        self.case.profile(x - self.a * t, y - self.b * t)
    }

    /// The analytic solution on time layer `n` of `mesh`.
    pub fn reference(&self, mesh: &Mesh2D, n: usize) -> Mat<Float> {
        reference_layer(mesh, n, |x, y, t| self.solution(x, y, t))
    }
}
