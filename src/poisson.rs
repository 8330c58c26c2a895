use std::{fmt, str::FromStr};

use faer::Mat;

use crate::{grid::PlaneMesh, linear::SparseSystem, problem::Poisson, Float, SolveError};

/// Interior discretisations of `-(u_xx + u_yy)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stencil {
    /// Axis neighbours, second order.
    Five,
    /// Diagonal neighbours on the 45° rotated grid, second order.
    ObliqueFive,
    /// Compact Mehrstellen stencil, fourth order for smooth sources.
    Nine,
}

impl Stencil {
    pub const ALL: [Stencil; 3] = [Self::Five, Self::ObliqueFive, Self::Nine];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Five => "five",
            Self::ObliqueFive => "oblique_five",
            Self::Nine => "nine",
        }
    }

    fn nnz_per_row(self) -> usize {
        match self {
            Self::Five | Self::ObliqueFive => 5,
            Self::Nine => 9,
        }
    }
}

impl FromStr for Stencil {
    type Err = SolveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|stencil| stencil.as_str() == s)
            .ok_or_else(|| SolveError::UnknownScheme(s.to_string()))
    }
}

impl fmt::Display for Stencil {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Builds the system over all `nx · ny` nodes: Dirichlet identity rows on the
/// boundary, the chosen stencil inside.
pub fn assemble(
    problem: &Poisson,
    mesh: &PlaneMesh,
    stencil: Stencil,
) -> Result<SparseSystem, SolveError> {
    let (x, y) = (mesh.x(), mesh.y());
    let (hx, hy) = (x.step_size(), y.step_size());

    if stencil != Stencil::Five && (hx - hy).abs() > 1e-9 * hx.max(hy) {
        return Err(SolveError::AnisotropicGrid {
            stencil: stencil.as_str(),
            hx,
            hy,
        });
    }

    let f = |i: usize, j: usize| problem.source(x.at(i), y.at(j));
    let mut system = SparseSystem::with_capacity(mesh.len(), mesh.len() * stencil.nnz_per_row());

    for i in 0..x.count() {
        for j in 0..y.count() {
            let c = mesh.idx(i, j);
            if mesh.is_boundary(i, j) {
                system.push_row(&[(c, 1.0)], problem.solution(x.at(i), y.at(j)));
                continue;
            }

            let (n, s, w, e) = (
                mesh.idx(i - 1, j),
                mesh.idx(i + 1, j),
                mesh.idx(i, j - 1),
                mesh.idx(i, j + 1),
            );
            let (nw, ne, sw, se) = (
                mesh.idx(i - 1, j - 1),
                mesh.idx(i - 1, j + 1),
                mesh.idx(i + 1, j - 1),
                mesh.idx(i + 1, j + 1),
            );

            match stencil {
                Stencil::Five => {
                    let (kx, ky) = (1.0 / (hx * hx), 1.0 / (hy * hy));
                    system.push_row(
                        &[
                            (c, 2.0 * kx + 2.0 * ky),
                            (n, -kx),
                            (s, -kx),
                            (w, -ky),
                            (e, -ky),
                        ],
                        f(i, j),
                    );
                }
                Stencil::ObliqueFive => {
                    let k = 1.0 / (2.0 * hx * hx);
                    system.push_row(
                        &[(c, 4.0 * k), (ne, -k), (se, -k), (nw, -k), (sw, -k)],
                        f(i, j),
                    );
                }
                Stencil::Nine => {
                    let k = 1.0 / (hx * hx);
                    let (axis, diag) = (-2.0 / 3.0 * k, -1.0 / 6.0 * k);
                    let rhs = 2.0 / 3.0 * f(i, j)
                        + (f(i - 1, j) + f(i + 1, j) + f(i, j - 1) + f(i, j + 1)) / 12.0;
                    system.push_row(
                        &[
                            (c, 10.0 / 3.0 * k),
                            (n, axis),
                            (s, axis),
                            (w, axis),
                            (e, axis),
                            (ne, diag),
                            (se, diag),
                            (nw, diag),
                            (sw, diag),
                        ],
                        rhs,
                    );
                }
            }
        }
    }

    let (kl, ku) = system.bandwidths();
    tracing::debug!(
        "assembled `{}` system: {} unknowns, {} non-zeros, bandwidths ({}, {})",
        stencil,
        system.size(),
        system.nnz(),
        kl,
        ku
    );
    Ok(system)
}

/// Assembles and solves once, returning the `nx × ny` field.
pub fn solve_poisson(
    problem: &Poisson,
    mesh: &PlaneMesh,
    stencil: Stencil,
) -> Result<Mat<Float>, SolveError> {
    tracing::info!(
        "start of `{}` solve of problem `{}` ({}×{} nodes)",
        stencil,
        problem.name(),
        mesh.x().count(),
        mesh.y().count()
    );

    let u = assemble(problem, mesh, stencil)?.solve()?;
    let field = Mat::from_fn(mesh.x().count(), mesh.y().count(), |i, j| u[mesh.idx(i, j)]);

    tracing::info!("finished `{}` solve of problem `{}`", stencil, problem.name());
    Ok(field)
}
