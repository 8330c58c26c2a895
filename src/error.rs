use thiserror::Error;

use crate::Float;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SolveError {
    #[error("invalid grid along `{axis}`: {count} point(s) on [{lower}, {upper}]")]
    InvalidGrid {
        axis: &'static str,
        lower: Float,
        upper: Float,
        count: usize,
    },

    #[error("unknown {problem} case `{id}`")]
    UnknownCase { problem: &'static str, id: u32 },

    #[error("unknown scheme `{0}`")]
    UnknownScheme(String),

    #[error("singular linear system of size {size} (no usable pivot in row {row})")]
    SingularSystem { size: usize, row: usize },

    #[error("invalid coefficient `{name}` = {value}")]
    InvalidCoefficient { name: &'static str, value: Float },

    #[error("`{stencil}` stencil needs equal spacing, got hx={hx:e}, hy={hy:e}")]
    AnisotropicGrid {
        stencil: &'static str,
        hx: Float,
        hy: Float,
    },

    #[error("non-finite value in {what} at index {index}")]
    NonFinite { what: &'static str, index: usize },

    #[error("mesh of {nodes} nodes exceeds the limit of {limit}")]
    MeshTooLarge { nodes: usize, limit: usize },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_offending_input() {
        let e = SolveError::UnknownScheme("bogus".into());
        assert_eq!(e.to_string(), "unknown scheme `bogus`");

        let e = SolveError::UnknownCase {
            problem: "poisson",
            id: 9,
        };
        assert_eq!(e.to_string(), "unknown poisson case `9`");

        let e = SolveError::NonFinite {
            what: "time layer",
            index: 12,
        };
        assert_eq!(e.to_string(), "non-finite value in time layer at index 12");
    }
}
