use std::f64::consts::PI;

use super::{Domain, Evolution, Forced};
use crate::{Float, SolveError};

/// Manufactured solutions of `u_t = a u_xx + f`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeatCase {
    Constant,
    DecayingParabola,
    Quadratic,
    StandingWave,
    TravellingWave,
    Oscillation,
    SteadyParabola,
}

impl TryFrom<u32> for HeatCase {
    type Error = SolveError;

    fn try_from(id: u32) -> Result<Self, Self::Error> {
        match id {
            0 => Ok(Self::Constant),
            1 => Ok(Self::DecayingParabola),
            2 => Ok(Self::Quadratic),
            3 => Ok(Self::StandingWave),
            4 => Ok(Self::TravellingWave),
            5 => Ok(Self::Oscillation),
            6 => Ok(Self::SteadyParabola),
            _ => Err(SolveError::UnknownCase { problem: "heat", id }),
        }
    }
}

impl HeatCase {
    pub fn id(self) -> u32 {
        match self {
            Self::Constant => 0,
            Self::DecayingParabola => 1,
            Self::Quadratic => 2,
            Self::StandingWave => 3,
            Self::TravellingWave => 4,
            Self::Oscillation => 5,
            Self::SteadyParabola => 6,
        }
    }
}

/// One-dimensional heat equation with diffusivity `a > 0`.
#[derive(Debug, Clone, PartialEq)]
pub struct Heat {
    domain: Domain,
    a: Float,
    case: HeatCase,
}

impl Heat {
    pub fn new(domain: Domain, a: Float, case: HeatCase) -> Result<Self, SolveError> {
        if !(a.is_finite() && a > 0.0) {
            return Err(SolveError::InvalidCoefficient { name: "a", value: a });
        }
        Ok(Self { domain, a, case })
    }

    pub fn from_case_id(domain: Domain, a: Float, id: u32) -> Result<Self, SolveError> {
        Self::new(domain, a, HeatCase::try_from(id)?)
    }

    pub fn case(&self) -> HeatCase {
        self.case
    }
}

impl Evolution for Heat {
    fn name(&self) -> String {
        format!("heat (case {}, a={})", self.case.id(), self.a)
    }

    fn domain(&self) -> &Domain {
        &self.domain
    }

    fn coefficient(&self) -> Float {
        self.a
    }

    fn solution(&self, x: Float, t: Float) -> Float {
        match self.case {
            HeatCase::Constant => 1.0,
            HeatCase::DecayingParabola => x * (1.0 - x) - 2.0 * self.a * t,
            HeatCase::Quadratic => x * x + t * t,
            HeatCase::StandingWave => 10.0 * (PI * x).sin() * (PI * t).sin(),
            HeatCase::TravellingWave => (PI * (x + t)).sin(),
            HeatCase::Oscillation => (100.0 * (x - t)).sin(),
            HeatCase::SteadyParabola => x * (1.0 - x),
        }
    }
}

impl Forced for Heat {
    fn source(&self, x: Float, t: Float) -> Float {
        let a = self.a;
        match self.case {
            HeatCase::Constant | HeatCase::DecayingParabola => 0.0,
            HeatCase::Quadratic => 2.0 * t - 2.0 * a,
            HeatCase::StandingWave => {
                10.0 * PI * (PI * x).sin() * ((PI * t).cos() + a * PI * (PI * t).sin())
            }
            HeatCase::TravellingWave => {
                PI * ((PI * (x + t)).cos() + a * PI * (PI * (x + t)).sin())
            }
            HeatCase::Oscillation => {
                -100.0 * (100.0 * (x - t)).cos() + 1e4 * a * (100.0 * (x - t)).sin()
            }
            HeatCase::SteadyParabola => 2.0 * a,
        }
    }
}
