use std::collections::TryReserveError;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    Allocation,
    EmptyInput,
    InvalidArgument(String),
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineError::Allocation =>
                write!(f, "allocation failed while building the tree"),
            EngineError::EmptyInput =>
                write!(f, "empty input: at least one symbol is required"),
            EngineError::InvalidArgument(what) =>
                write!(f, "invalid argument: {}", what),
        }
    }
}

impl std::error::Error for EngineError {}

impl From<TryReserveError> for EngineError {
    fn from(_: TryReserveError) -> Self {
        EngineError::Allocation
    }
}

pub type EngineResult<T> = Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reserve_failure_maps_to_allocation() {
        let mut v: Vec<u64> = Vec::new();
        let err = v.try_reserve(usize::MAX).unwrap_err();
        assert_eq!(EngineError::from(err), EngineError::Allocation);
    }

    #[test]
    fn display_names_the_argument() {
        let err = EngineError::InvalidArgument("count for 'a' is zero".into());
        assert_eq!(err.to_string(), "invalid argument: count for 'a' is zero");
    }
}
