use std::{fmt, str::FromStr};

use faer_core::{zipped, MatMut};
use reborrow::*;

use crate::{
    method::{Ctx, Method},
    problem::Evolution,
    Float, SolveError,
};

/// Finite-difference schemes for `u_t + a u_x = 0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConvectionScheme {
    UpWind,
    LaxWendroff,
    LaxFriedrichs,
    LeapFrog,
    Wendroff,
    Carlson,
}

impl ConvectionScheme {
    pub const ALL: [ConvectionScheme; 6] = [
        Self::UpWind,
        Self::LaxWendroff,
        Self::LaxFriedrichs,
        Self::LeapFrog,
        Self::Wendroff,
        Self::Carlson,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::UpWind => "UpWind",
            Self::LaxWendroff => "LaxWendroff",
            Self::LaxFriedrichs => "LaxFriedrichs",
            Self::LeapFrog => "LeapFrog",
            Self::Wendroff => "Wendroff",
            Self::Carlson => "Carlson",
        }
    }

    /// Whether an interior update reads a value of the layer being computed,
    /// which forces a sequential sweep in the upwind direction.
    pub fn is_sequential(self) -> bool {
        matches!(self, Self::Wendroff | Self::Carlson)
    }
}

impl FromStr for ConvectionScheme {
    type Err = SolveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|scheme| scheme.as_str() == s)
            .ok_or_else(|| SolveError::UnknownScheme(s.to_string()))
    }
}

impl fmt::Display for ConvectionScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// Writes `schema(u[i-1], u[i], u[i+1])` of layer `n - 1` into the interior of layer `n`.
fn three_point(mut u: MatMut<'_, Float>, n: usize, schema: impl Fn(Float, Float, Float) -> Float) {
    let m = u.nrows() - 2;
    let prev = u.rb().col(n - 1).to_owned();
    let prev = prev.as_ref();

    zipped!(
        u.rb_mut().submatrix(1, n, m, 1),
        prev.submatrix(0, 0, m, 1),
        prev.submatrix(1, 0, m, 1),
        prev.submatrix(2, 0, m, 1)
    )
    .for_each(|mut v, um, uc, up| v.write(schema(um.read(), uc.read(), up.read())));
}

fn upwind(u: MatMut<'_, Float>, n: usize, c: Float) {
    if c > 0.0 {
        three_point(u, n, |um, uc, _| uc - c * (uc - um))
    } else {
        three_point(u, n, |_, uc, up| uc - c * (up - uc))
    }
}

fn leapfrog(mut u: MatMut<'_, Float>, n: usize, c: Float) {
    let m = u.nrows() - 2;
    let prev = u.rb().col(n - 1).to_owned();
    let prev = prev.as_ref();
    let older = u.rb().col(n - 2).to_owned();

    zipped!(
        u.rb_mut().submatrix(1, n, m, 1),
        older.as_ref().submatrix(1, 0, m, 1),
        prev.submatrix(0, 0, m, 1),
        prev.submatrix(2, 0, m, 1)
    )
    .for_each(|mut v, uo, um, up| v.write(uo.read() - c * (up.read() - um.read())));
}

// `u[i, n]` depends on `u[i ∓ 1, n]`, so the sweep runs from the inflow side.
fn sweep(
    mut u: MatMut<'_, Float>,
    n: usize,
    c: Float,
    schema: impl Fn(Float, Float, Float, Float) -> Float,
) {
    let last = u.nrows() - 1;
    let cc = c.abs();
    if c >= 0.0 {
        for i in 1..last {
            u[(i, n)] = schema(cc, u[(i, n - 1)], u[(i - 1, n - 1)], u[(i - 1, n)]);
        }
    } else {
        for i in (1..last).rev() {
            u[(i, n)] = schema(cc, u[(i, n - 1)], u[(i + 1, n - 1)], u[(i + 1, n)]);
        }
    }
}

impl<P: Evolution + ?Sized> Method<P> for ConvectionScheme {
    fn name(&self) -> &'static str {
        self.as_str()
    }

    fn init(&mut self, ctx: Ctx<'_, P>) -> Result<(), SolveError> {
        let courant = ctx.problem.coefficient().abs() * ctx.mesh.ratio();
        if courant > 1.0 && !self.is_sequential() {
            tracing::warn!(
                "{} with Courant number {:.3} > 1 is unstable",
                self.as_str(),
                courant
            );
        }
        Ok(())
    }

    fn step(&mut self, ctx: Ctx<'_, P>, u: MatMut<'_, Float>) -> Result<(), SolveError> {
        let n = ctx.n;
        // signed Courant number a Δt / Δx
        let c = ctx.problem.coefficient() * ctx.mesh.ratio();

        match self {
            Self::UpWind => upwind(u, n, c),
            Self::LaxWendroff => three_point(u, n, |um, uc, up| {
                uc - 0.5 * c * (up - um) + 0.5 * c * c * (up - 2.0 * uc + um)
            }),
            Self::LaxFriedrichs => {
                three_point(u, n, |um, _, up| 0.5 * (um + up) - 0.5 * c * (up - um))
            }
            // no `n - 2` layer yet: seed with an upwind step
            Self::LeapFrog if n == 1 => upwind(u, n, c),
            Self::LeapFrog => leapfrog(u, n, c),
            Self::Wendroff => sweep(u, n, c, |c, uc, ub, vb| {
                ub + (1.0 - c) / (1.0 + c) * (uc - vb)
            }),
            Self::Carlson => sweep(u, n, c, |c, uc, _, vb| (uc + c * vb) / (1.0 + c)),
        }
        Ok(())
    }
}
