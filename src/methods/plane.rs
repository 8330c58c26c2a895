use std::str::FromStr;

use faer::Mat;
use faer_core::MatRef;

use crate::{grid::Mesh2D, problem::Convection2D, Float, SolveError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaneScheme {
    UpWind,
}

impl FromStr for PlaneScheme {
    type Err = SolveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "UpWind" => Ok(Self::UpWind),
            _ => Err(SolveError::UnknownScheme(s.to_string())),
        }
    }
}

/// Time layers of a two-dimensional field, each `nx × ny`.
#[derive(Debug, Clone)]
pub struct Layers {
    layers: Vec<Mat<Float>>,
}

impl Layers {
    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    pub fn layer(&self, n: usize) -> MatRef<'_, Float> {
        self.layers[n].as_ref()
    }

    pub fn into_inner(self) -> Vec<Mat<Float>> {
        self.layers
    }
}

/// Marches `u_t + a u_x + b u_y = 0` with a dimension-wise upwind update.
///
/// Every interior cell of a layer only reads the previous layer. Boundary
/// rows and columns of every layer hold the analytic solution.
pub fn solve_plane(
    problem: &Convection2D,
    mesh: &Mesh2D,
    scheme: PlaneScheme,
) -> Result<Layers, SolveError> {
    let PlaneScheme::UpWind = scheme;

    let (x, y, time) = (mesh.x(), mesh.y(), mesh.time());
    let (a, b) = problem.speeds();
    let cx = a * time.step_size() / x.step_size();
    let cy = b * time.step_size() / y.step_size();
    if cx.abs() + cy.abs() > 1.0 {
        tracing::warn!(
            "2-D upwind with |a|ν_x + |b|ν_y = {:.3} > 1 is unstable",
            cx.abs() + cy.abs()
        );
    }

    tracing::info!(
        "start of simulation of problem `{}` (UpWind, {}×{} nodes, {} steps)",
        problem.name(),
        x.count(),
        y.count(),
        time.count()
    );

    let (nx, ny) = (x.count(), y.count());
    let mut layers = Vec::with_capacity(time.count());
    layers.push(problem.reference(mesh, 0));

    // one-sided difference from the upwind neighbour along each axis
    let (kx, ky) = (usize::from(a <= 0.0), usize::from(b <= 0.0));

    for n in 1..time.count() {
        let prev = &layers[n - 1];
        let mut next = problem.reference(mesh, n);
        for i in 1..nx - 1 {
            for j in 1..ny - 1 {
                let dx = prev[(i + kx, j)] - prev[(i + kx - 1, j)];
                let dy = prev[(i, j + ky)] - prev[(i, j + ky - 1)];
                next[(i, j)] = prev[(i, j)] - cx * dx - cy * dy;
            }
        }
        tracing::trace!("problem `{}`: step {}", problem.name(), n);
        layers.push(next);
    }

    tracing::info!("finished simulation of problem `{}`", problem.name());
    Ok(Layers { layers })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        faer_add::max_abs_error,
        problem::{Convection2DCase, Domain2D},
    };

    const DOMAIN: Domain2D = Domain2D {
        x: (0.0, 1.0),
        y: (0.0, 1.0),
        time: (0.0, 0.5),
    };

    #[test]
    fn unknown_scheme() {
        assert_eq!(
            "LaxWendroff".parse::<PlaneScheme>(),
            Err(SolveError::UnknownScheme("LaxWendroff".into()))
        );
    }

    #[test]
    fn boundaries_hold_the_analytic_solution() {
        let pb = Convection2D::new(DOMAIN, 1.0, 1.0, Convection2DCase::Corner).unwrap();
        let mesh = Mesh2D::from_domain(&DOMAIN, 0.05, 0.05, 0.02).unwrap();
        let u = solve_plane(&pb, &mesh, PlaneScheme::UpWind).unwrap();
        assert_eq!(u.len(), mesh.time().count());

        let (nx, ny) = (mesh.x().count(), mesh.y().count());
        for n in 0..u.len() {
            let reference = pb.reference(&mesh, n);
            let layer = u.layer(n);
            for i in 0..nx {
                for j in [0, ny - 1] {
                    assert_eq!(layer[(i, j)], reference[(i, j)]);
                }
            }
            for j in 0..ny {
                for i in [0, nx - 1] {
                    assert_eq!(layer[(i, j)], reference[(i, j)]);
                }
            }
        }
    }

    #[test]
    fn upwind_stays_bounded_and_tracks_the_corner() {
        let pb = Convection2D::new(DOMAIN, 1.0, 0.5, Convection2DCase::Corner).unwrap();
        let mesh = Mesh2D::from_domain(&DOMAIN, 0.02, 0.02, 0.005).unwrap();
        let u = solve_plane(&pb, &mesh, PlaneScheme::UpWind).unwrap();

        // monotone scheme: no new extrema
        for n in 0..u.len() {
            let layer = u.layer(n);
            for j in 0..layer.ncols() {
                for i in 0..layer.nrows() {
                    let v = layer[(i, j)];
                    assert!((-1e-12..=1.0 + 1e-12).contains(&v), "u={v} at ({i}, {j}, {n})");
                }
            }
        }

        // everything upwind of (0.2, 0.2) is 1, so the update is exact there
        let last = u.len() - 1;
        let (x, y) = (mesh.x(), mesh.y());
        let i = (0..x.count()).find(|&i| x.at(i) >= 0.2).unwrap();
        let j = (0..y.count()).find(|&j| y.at(j) >= 0.2).unwrap();
        assert_eq!(u.layer(last)[(i, j)], 1.0);

        let err = max_abs_error(u.layer(last), pb.reference(&mesh, last).as_ref());
        assert!(err < 1.0);
    }

    #[test]
    fn negative_speeds_read_the_right_and_upper_neighbours() {
        let pb = Convection2D::new(DOMAIN, -1.0, -0.5, Convection2DCase::Corner).unwrap();
        let mesh = Mesh2D::from_domain(&DOMAIN, 0.05, 0.05, 0.02).unwrap();
        let u = solve_plane(&pb, &mesh, PlaneScheme::UpWind).unwrap();

        let (x, y, time) = (mesh.x(), mesh.y(), mesh.time());
        let cx = -time.step_size() / x.step_size();
        let cy = -0.5 * time.step_size() / y.step_size();

        // last column left of the cut, a row inside it
        let i = (0..x.count()).find(|&i| x.at(i) >= 0.5).unwrap() - 1;
        let j = (0..y.count()).find(|&j| y.at(j) >= 0.6).unwrap();
        let (prev, next) = (u.layer(0), u.layer(1));
        assert_eq!((prev[(i, j)], prev[(i + 1, j)], prev[(i, j + 1)]), (1.0, 0.0, 1.0));

        let expected = prev[(i, j)]
            - cx * (prev[(i + 1, j)] - prev[(i, j)])
            - cy * (prev[(i, j + 1)] - prev[(i, j)]);
        assert_eq!(next[(i, j)], expected);
        assert!(0.0 < next[(i, j)] && next[(i, j)] < 1.0, "{}", next[(i, j)]);

        // the cut quadrant only sees zeros downstream
        for n in 0..u.len() {
            let layer = u.layer(n);
            for (ii, jj) in [(i + 1, j), (x.count() - 2, y.count() - 2)] {
                assert_eq!(layer[(ii, jj)], 0.0, "({ii}, {jj}, {n})");
            }
        }
    }
}
