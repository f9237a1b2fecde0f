use thiserror::Error;

/// Errors raised by grid construction, algorithm selection and distance queries.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum MazeError {
    /// An argument was outside the domain the operation accepts.
    #[error("Invalid argument: {reason}")]
    InvalidArgument {
        /// What was wrong with the argument.
        reason: String,
    },
    /// The target cell was never reached by the breadth-first search.
    #[error("Cell ({row}, {column}) is not reachable from the root ({root_row}, {root_column})")]
    Unreachable {
        row: usize,
        column: usize,
        root_row: usize,
        root_column: usize,
    },
    /// Backtracking found no linked neighbour closer to the root.
    /// Only possible when the link graph is not a symmetric tree.
    #[error("Path not found: no linked neighbour of ({row}, {column}) is closer to the root")]
    PathNotFound { row: usize, column: usize },
}

impl MazeError {
    pub fn invalid_argument(reason: impl Into<String>) -> Self {
        MazeError::InvalidArgument {
            reason: reason.into(),
        }
    }
}

impl From<MazeError> for std::io::Error {
    fn from(err: MazeError) -> Self {
        std::io::Error::new(std::io::ErrorKind::InvalidInput, err)
    }
}

pub type Result<T> = std::result::Result<T, MazeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = MazeError::invalid_argument("rows must be at least 1");
        assert_eq!(err.to_string(), "Invalid argument: rows must be at least 1");

        let err = MazeError::Unreachable {
            row: 2,
            column: 1,
            root_row: 0,
            root_column: 0,
        };
        assert_eq!(
            err.to_string(),
            "Cell (2, 1) is not reachable from the root (0, 0)"
        );
    }

    #[test]
    fn test_into_io_error() {
        let io_err: std::io::Error = MazeError::invalid_argument("bad").into();
        assert_eq!(io_err.kind(), std::io::ErrorKind::InvalidInput);
    }
}
