//! Numeric expressions for custom element dimensions ("19", "5,7", "2*9.5+1")

use evalexpr::{build_operator_tree, ContextWithMutableVariables, HashMapContext, Value};

/// Errors raised while reading a dimension input
#[derive(Debug, Clone, PartialEq)]
pub enum DimensionError {
    /// Input is empty
    Empty,
    /// Expression could not be parsed
    ParseError(String),
    /// Expression could not be evaluated
    EvaluationError(String),
    /// Result is not a finite, strictly positive number
    NotPositive(f64),
}

impl std::fmt::Display for DimensionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DimensionError::Empty => write!(f, "empty dimension"),
            DimensionError::ParseError(msg) => write!(f, "parse error: {}", msg),
            DimensionError::EvaluationError(msg) => write!(f, "evaluation error: {}", msg),
            DimensionError::NotPositive(v) => write!(f, "dimension must be positive (got {})", v),
        }
    }
}

impl std::error::Error for DimensionError {}

/// Evaluate a dimension input in centimeters.
///
/// Accepts plain numbers, a decimal comma and arithmetic expressions.
/// The result must be finite and strictly positive.
pub fn evaluate_dimension(input: &str) -> Result<f64, DimensionError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(DimensionError::Empty);
    }
    let expression = trimmed.replace(',', ".");

    let mut context = HashMapContext::new();
    context
        .set_value("PI".to_string(), Value::Float(std::f64::consts::PI))
        .ok();

    let tree = build_operator_tree(&expression)
        .map_err(|e| DimensionError::ParseError(e.to_string()))?;
    let value = tree
        .eval_with_context(&context)
        .map_err(|e| DimensionError::EvaluationError(e.to_string()))?;

    let number = match value {
        Value::Float(f) => f,
        Value::Int(i) => i as f64,
        other => {
            return Err(DimensionError::EvaluationError(format!(
                "expected number, got {:?}",
                other
            )))
        }
    };

    if number.is_finite() && number > 0.0 {
        Ok(number)
    } else {
        Err(DimensionError::NotPositive(number))
    }
}
