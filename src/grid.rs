use faer::Mat;

use crate::{
    faer_add::linspace,
    problem::{Domain, Domain2D, PlaneDomain},
    Float, SolveError,
};

/// Upper bound on the number of points along one axis.
pub const MAX_POINTS: usize = 1 << 24;

/// Upper bound on the number of nodes of a whole mesh.
pub const MAX_NODES: usize = 1 << 28;

fn check_nodes(counts: &[usize]) -> Result<(), SolveError> {
    let nodes = counts
        .iter()
        .try_fold(1usize, |acc, &c| acc.checked_mul(c))
        .unwrap_or(usize::MAX);
    if nodes > MAX_NODES {
        return Err(SolveError::MeshTooLarge {
            nodes,
            limit: MAX_NODES,
        });
    }
    Ok(())
}

/// How an axis is discretised: by a nominal step size (`floor(extent / step)`
/// points) or by an explicit number of points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Resolution {
    Delta(Float),
    Points(usize),
}

// grid.at(0) <-> lower
// grid.at(i) <-> lower + i * step_size forall i
// grid.at(count - 1) <-> upper
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Grid {
    lower: Float,
    upper: Float,
    count: usize,
    step_size: Float,
}

impl Grid {
    pub fn from_count(
        axis: &'static str,
        lower: Float,
        upper: Float,
        count: usize,
    ) -> Result<Self, SolveError> {
        if count <= 1
            || count > MAX_POINTS
            || !lower.is_finite()
            || !upper.is_finite()
            || upper <= lower
        {
            return Err(SolveError::InvalidGrid {
                axis,
                lower,
                upper,
                count,
            });
        }

        Ok(Self {
            lower,
            upper,
            count,
            step_size: (upper - lower) / (count - 1) as Float,
        })
    }

    pub fn from_step_size(
        axis: &'static str,
        lower: Float,
        upper: Float,
        step_size: Float,
    ) -> Result<Self, SolveError> {
        // negative and NaN ratios saturate to 0, huge ones to usize::MAX
        let count = ((upper - lower) / step_size).floor();
        Self::from_count(axis, lower, upper, count as usize)
    }

    pub fn with_resolution(
        axis: &'static str,
        lower: Float,
        upper: Float,
        resolution: Resolution,
    ) -> Result<Self, SolveError> {
        match resolution {
            Resolution::Delta(step_size) => Self::from_step_size(axis, lower, upper, step_size),
            Resolution::Points(count) => Self::from_count(axis, lower, upper, count),
        }
    }

    pub fn lower(&self) -> Float {
        self.lower
    }

    pub fn upper(&self) -> Float {
        self.upper
    }

    pub fn count(&self) -> usize {
        self.count
    }

    /// Actual spacing between consecutive points, `(upper - lower) / (count - 1)`.
    pub fn step_size(&self) -> Float {
        self.step_size
    }

    #[inline]
    pub fn at(&self, i: usize) -> Float {
        if i + 1 == self.count {
            self.upper
        } else {
            self.lower + self.step_size * i as Float
        }
    }

    pub fn iter(self) -> impl Iterator<Item = Float> {
        (0..self.count).map(move |i| self.at(i))
    }

    pub fn coordinates(&self) -> Mat<Float> {
        linspace(self.lower, self.upper, self.count)
    }
}

/// Space-time mesh of a one-dimensional evolution problem.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Mesh {
    space: Grid,
    time: Grid,
}

impl Mesh {
    pub fn new(space: Grid, time: Grid) -> Result<Self, SolveError> {
        check_nodes(&[space.count, time.count])?;
        Ok(Self { space, time })
    }

    pub fn from_domain(domain: &Domain, dx: Float, dt: Float) -> Result<Self, SolveError> {
        Self::with_resolution(domain, Resolution::Delta(dx), Resolution::Delta(dt))
    }

    pub fn with_resolution(
        domain: &Domain,
        space: Resolution,
        time: Resolution,
    ) -> Result<Self, SolveError> {
        Self::new(
            Grid::with_resolution("x", domain.space.0, domain.space.1, space)?,
            Grid::with_resolution("t", domain.time.0, domain.time.1, time)?,
        )
    }

    pub fn space(&self) -> Grid {
        self.space
    }

    pub fn time(&self) -> Grid {
        self.time
    }

    /// `Δt / Δx`
    pub fn ratio(&self) -> Float {
        self.time.step_size / self.space.step_size
    }

    /// `Δt / Δx²`
    pub fn diffusion_ratio(&self) -> Float {
        self.time.step_size / (self.space.step_size * self.space.step_size)
    }
}

/// Space-time mesh of a two-dimensional evolution problem.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Mesh2D {
    x: Grid,
    y: Grid,
    time: Grid,
}

impl Mesh2D {
    pub fn from_domain(
        domain: &Domain2D,
        dx: Float,
        dy: Float,
        dt: Float,
    ) -> Result<Self, SolveError> {
        let mesh = Self {
            x: Grid::from_step_size("x", domain.x.0, domain.x.1, dx)?,
            y: Grid::from_step_size("y", domain.y.0, domain.y.1, dy)?,
            time: Grid::from_step_size("t", domain.time.0, domain.time.1, dt)?,
        };
        check_nodes(&[mesh.x.count, mesh.y.count, mesh.time.count])?;
        Ok(mesh)
    }

    pub fn x(&self) -> Grid {
        self.x
    }

    pub fn y(&self) -> Grid {
        self.y
    }

    pub fn time(&self) -> Grid {
        self.time
    }
}

/// Spatial mesh of a stationary two-dimensional problem.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlaneMesh {
    x: Grid,
    y: Grid,
}

impl PlaneMesh {
    pub fn new(x: Grid, y: Grid) -> Result<Self, SolveError> {
        check_nodes(&[x.count, y.count])?;
        Ok(Self { x, y })
    }

    /// Both axes discretised with the same nominal step `h`.
    pub fn from_domain(domain: &PlaneDomain, h: Float) -> Result<Self, SolveError> {
        Self::new(
            Grid::from_step_size("x", domain.x.0, domain.x.1, h)?,
            Grid::from_step_size("y", domain.y.0, domain.y.1, h)?,
        )
    }

    pub fn x(&self) -> Grid {
        self.x
    }

    pub fn y(&self) -> Grid {
        self.y
    }

    /// Row-major flat index of node `(i, j)`.
    #[inline]
    pub fn idx(&self, i: usize, j: usize) -> usize {
        i * self.y.count + j
    }

    pub fn len(&self) -> usize {
        self.x.count * self.y.count
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_boundary(&self, i: usize, j: usize) -> bool {
        i == 0 || j == 0 || i + 1 == self.x.count || j + 1 == self.y.count
    }
}
