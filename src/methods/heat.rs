use std::{fmt, str::FromStr};

use faer_core::MatMut;

use crate::{
    linear::Tridiagonal,
    method::{Ctx, Method},
    problem::Forced,
    Float, SolveError,
};

/// Time discretisations of `u_t = a u_xx + f`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HeatScheme {
    /// Forward Euler, no linear solve.
    Explicit,
    /// Backward Euler, `θ = 1`.
    Implicit,
    /// `θ = 1/2`
    CrankNicolson,
    /// `θ = 1/2 - 1/(12 a μ)`, fourth-order truncation error in space.
    Douglas,
    Theta(Float),
}

impl HeatScheme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Explicit => "explicit",
            Self::Implicit => "implicit",
            Self::CrankNicolson => "Crank-Nicolson",
            Self::Douglas => "Douglas",
            Self::Theta(_) => "theta",
        }
    }

    /// Weight of the implicit part for diffusion number `a μ`.
    pub fn theta(&self, a_mu: Float) -> Result<Float, SolveError> {
        let theta = match *self {
            Self::Explicit => 0.0,
            Self::Implicit => 1.0,
            Self::CrankNicolson => 0.5,
            Self::Douglas => {
                if !(a_mu.is_finite() && a_mu > 0.0) {
                    return Err(SolveError::InvalidCoefficient {
                        name: "a mu",
                        value: a_mu,
                    });
                }
                0.5 - 1.0 / (12.0 * a_mu)
            }
            Self::Theta(theta) => {
                if !(0.0..=1.0).contains(&theta) {
                    return Err(SolveError::InvalidCoefficient {
                        name: "theta",
                        value: theta,
                    });
                }
                theta
            }
        };
        Ok(theta)
    }
}

impl FromStr for HeatScheme {
    type Err = SolveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "explicit" => Ok(Self::Explicit),
            "implicit" => Ok(Self::Implicit),
            "Crank-Nicolson" => Ok(Self::CrankNicolson),
            "Douglas" => Ok(Self::Douglas),
            _ => Err(SolveError::UnknownScheme(s.to_string())),
        }
    }
}

impl fmt::Display for HeatScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Theta(theta) => write!(f, "theta ({theta})"),
            other => f.write_str(other.as_str()),
        }
    }
}

/// Theta-weighted diffusion stepping; one tridiagonal solve per layer
/// unless the scheme is [`HeatScheme::Explicit`].
#[derive(Debug, Clone)]
pub struct ThetaMethod {
    scheme: HeatScheme,
    theta: Float,
    system: Tridiagonal,
    interior: Vec<Float>,
}

impl ThetaMethod {
    pub fn new(scheme: HeatScheme) -> Self {
        Self {
            scheme,
            theta: Float::NAN,
            system: Tridiagonal::default(),
            interior: Vec::new(),
        }
    }

    pub fn scheme(&self) -> HeatScheme {
        self.scheme
    }

    fn explicit<P: Forced + ?Sized>(&self, ctx: Ctx<'_, P>, mut u: MatMut<'_, Float>) {
        let (n, dt) = (ctx.n, ctx.dt());
        let r = ctx.problem.coefficient() * ctx.mesh.diffusion_ratio();
        let t = ctx.mesh.time().at(n - 1);

        for i in 1..ctx.last() {
            u[(i, n)] = (1.0 - 2.0 * r) * u[(i, n - 1)]
                + dt * ctx.problem.source(ctx.x(i), t)
                + r * (u[(i - 1, n - 1)] + u[(i + 1, n - 1)]);
        }
    }

    fn implicit<P: Forced + ?Sized>(
        &mut self,
        ctx: Ctx<'_, P>,
        mut u: MatMut<'_, Float>,
    ) -> Result<(), SolveError> {
        let (n, t, dt, last) = (ctx.n, ctx.t(), ctx.dt(), ctx.last());
        let r = ctx.problem.coefficient() * ctx.mesh.diffusion_ratio();
        let (wi, we) = (self.theta * r, (1.0 - self.theta) * r);
        let m = last - 1;
        if m == 0 {
            return Ok(());
        }

        let sys = &mut self.system;
        for k in 0..m {
            let i = k + 1;
            sys.lower[k] = if k > 0 { -wi } else { 0.0 };
            sys.upper[k] = if k + 1 < m { -wi } else { 0.0 };
            sys.diag[k] = 1.0 + 2.0 * wi;
            sys.rhs[k] = u[(i, n - 1)]
                + dt * ctx.problem.source(ctx.x(i), t)
                + we * (u[(i - 1, n - 1)] - 2.0 * u[(i, n - 1)] + u[(i + 1, n - 1)]);
        }
        // boundary values of layer n are known
        sys.rhs[0] += wi * u[(0, n)];
        sys.rhs[m - 1] += wi * u[(last, n)];

        sys.solve_to(&mut self.interior)?;
        for (k, v) in self.interior.iter().enumerate() {
            u[(k + 1, n)] = *v;
        }
        Ok(())
    }
}

impl From<HeatScheme> for ThetaMethod {
    fn from(scheme: HeatScheme) -> Self {
        Self::new(scheme)
    }
}

impl<P: Forced + ?Sized> Method<P> for ThetaMethod {
    fn name(&self) -> &'static str {
        self.scheme.as_str()
    }

    fn init(&mut self, ctx: Ctx<'_, P>) -> Result<(), SolveError> {
        let r = ctx.problem.coefficient() * ctx.mesh.diffusion_ratio();
        self.theta = self.scheme.theta(r)?;

        // von Neumann limit of the theta family
        if r * (1.0 - 2.0 * self.theta) > 0.5 {
            tracing::warn!(
                "{} with a·μ = {:.3} (θ = {:.3}) is unstable",
                self.scheme,
                r,
                self.theta
            );
        }

        if self.scheme != HeatScheme::Explicit {
            let m = ctx.last().saturating_sub(1);
            self.system.resize(m);
            self.interior.clear();
            self.interior.resize(m, 0.0);
        }
        Ok(())
    }

    fn step(&mut self, ctx: Ctx<'_, P>, u: MatMut<'_, Float>) -> Result<(), SolveError> {
        match self.scheme {
            HeatScheme::Explicit => {
                self.explicit(ctx, u);
                Ok(())
            }
            _ => self.implicit(ctx, u),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        driver::solve,
        faer_add::max_abs_error,
        grid::Mesh,
        problem::{Domain, Evolution, Heat, HeatCase},
    };

    const DOMAIN: Domain = Domain {
        space: (0.0, 1.0),
        time: (0.0, 0.5),
    };

    #[test]
    fn names_parse() {
        for scheme in [
            HeatScheme::Explicit,
            HeatScheme::Implicit,
            HeatScheme::CrankNicolson,
            HeatScheme::Douglas,
        ] {
            assert_eq!(scheme.to_string().parse::<HeatScheme>(), Ok(scheme));
        }
        assert_eq!(
            "bogus".parse::<HeatScheme>(),
            Err(SolveError::UnknownScheme("bogus".into()))
        );
    }

    #[test]
    fn theta_weights() {
        assert_eq!(HeatScheme::Implicit.theta(3.0), Ok(1.0));
        assert_eq!(HeatScheme::CrankNicolson.theta(3.0), Ok(0.5));
        assert!((HeatScheme::Douglas.theta(1.0 / 3.0).unwrap() - 0.25).abs() < 1e-15);
        assert!(HeatScheme::Douglas.theta(0.0).is_err());
        assert!(HeatScheme::Theta(1.5).theta(1.0).is_err());
        assert!(HeatScheme::Theta(Float::NAN).theta(1.0).is_err());
    }

    #[test]
    fn theta_family_is_exact_on_the_decaying_parabola() {
        let pb = Heat::new(DOMAIN, 1.0, HeatCase::DecayingParabola).unwrap();
        // μ ≈ 0.83 and μ ≈ 10
        for dt in [0.01, 0.1] {
            let mesh = Mesh::from_domain(&DOMAIN, 0.1, dt).unwrap();
            let reference = pb.reference(&mesh);
            for scheme in [
                HeatScheme::Implicit,
                HeatScheme::CrankNicolson,
                HeatScheme::Douglas,
                HeatScheme::Theta(0.75),
            ] {
                let u = solve(&pb, &mesh, ThetaMethod::from(scheme)).unwrap();
                let err = max_abs_error(u.as_ref(), reference.as_ref());
                assert!(err < 1e-12, "{scheme} dt={dt}: {err:e}");
            }
        }
    }

    #[test]
    fn explicit_update_matches_the_stencil() {
        let pb = Heat::new(DOMAIN, 1.0, HeatCase::Quadratic).unwrap();
        let mesh = Mesh::from_domain(&DOMAIN, 0.1, 0.002).unwrap();
        let u = solve(&pb, &mesh, ThetaMethod::from(HeatScheme::Explicit)).unwrap();

        let r = mesh.diffusion_ratio();
        let dt = mesh.time().step_size();
        let (i, x) = (4, mesh.space().at(4));
        let expected = (1.0 - 2.0 * r) * u[(i, 0)]
            + dt * pb.source(x, 0.0)
            + r * (u[(i - 1, 0)] + u[(i + 1, 0)]);
        assert!((u[(i, 1)] - expected).abs() < 1e-15);
    }

    #[test]
    fn single_interior_node() {
        let domain = Domain {
            space: (0.0, 1.0),
            time: (0.0, 1.0),
        };
        let pb = Heat::new(domain, 1.0, HeatCase::SteadyParabola).unwrap();
        let mesh = Mesh::from_domain(&domain, 1.0 / 3.0, 0.1).unwrap();
        assert_eq!(mesh.space().count(), 3);

        let u = solve(&pb, &mesh, ThetaMethod::from(HeatScheme::Implicit)).unwrap();
        let err = max_abs_error(u.as_ref(), pb.reference(&mesh).as_ref());
        assert!(err < 1e-14, "{err:e}");
    }
}
