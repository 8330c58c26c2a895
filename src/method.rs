use faer_core::MatMut;

use crate::{grid::Mesh, Float, SolveError};

/// What a time-marching method sees when it fills layer `n`.
pub struct Ctx<'a, P: ?Sized> {
    pub problem: &'a P,
    pub mesh: &'a Mesh,
    pub n: usize,
}

impl<P: ?Sized> Clone for Ctx<'_, P> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<P: ?Sized> Copy for Ctx<'_, P> {}

impl<P: ?Sized> Ctx<'_, P> {
    pub fn t(&self) -> Float {
        self.mesh.time().at(self.n)
    }

    pub fn x(&self, i: usize) -> Float {
        self.mesh.space().at(i)
    }

    pub fn dt(&self) -> Float {
        self.mesh.time().step_size()
    }

    /// Index of the last spatial node.
    pub fn last(&self) -> usize {
        self.mesh.space().count() - 1
    }
}

/// A time-marching scheme for the evolution problem `P`.
///
/// The field handed to [`Method::step`] is the whole `nx × nt` buffer with
/// column 0 and rows `0`, `nx - 1` already seeded; a step only writes the
/// interior rows of column `ctx.n` and may read any column before it.
pub trait Method<P: ?Sized> {
    fn name(&self) -> &'static str;

    /// Called once on the seeded field before the first step.
    fn init(&mut self, _ctx: Ctx<'_, P>) -> Result<(), SolveError> {
        Ok(())
    }

    fn step(&mut self, ctx: Ctx<'_, P>, u: MatMut<'_, Float>) -> Result<(), SolveError>;
}
