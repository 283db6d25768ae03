use thiserror::Error;

/// Failure modes of the statistical kernels.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Algorithm A failed to converge after {max_iterations} iterations")]
    NonConvergence { max_iterations: usize },

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("insufficient data: need at least {required} data points, got {actual}")]
    InsufficientData { required: usize, actual: usize },

    #[error("array length mismatch: {left_name} has {left}, {right_name} has {right}")]
    LengthMismatch {
        left_name: &'static str,
        left: usize,
        right_name: &'static str,
        right: usize,
    },

    #[error("division by zero in {context}")]
    DivisionByZero { context: &'static str },
}

/// Checks every value in `data` is finite, reporting the first offender.
pub(crate) fn ensure_finite(data: &[f64], name: &str) -> Result<(), EngineError> {
    for (i, &value) in data.iter().enumerate() {
        if !value.is_finite() {
            return Err(EngineError::InvalidInput(format!(
                "{name} contains non-finite value at index {i}: {value}"
            )));
        }
    }
    Ok(())
}

pub(crate) fn ensure_same_length(
    left_name: &'static str,
    left: usize,
    right_name: &'static str,
    right: usize,
) -> Result<(), EngineError> {
    if left != right {
        return Err(EngineError::LengthMismatch {
            left_name,
            left,
            right_name,
            right,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ensure_finite_names_the_offending_index() {
        let err = ensure_finite(&[1.0, f64::NAN, 3.0], "results").unwrap_err();
        assert!(err.to_string().contains("index 1"));
        assert!(ensure_finite(&[1.0, 2.0], "results").is_ok());
    }

    #[test]
    fn ensure_same_length_reports_both_sides() {
        let err = ensure_same_length("results", 3, "uncertainties", 2).unwrap_err();
        assert!(err.to_string().contains("results has 3"));
    }
}
