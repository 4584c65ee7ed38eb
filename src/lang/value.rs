use serde::{Deserialize, Serialize};

/// Runtime value in the cinder VM.
///
/// Values are the only data that can live in a chunk's constant pool or on
/// the operand stack. Only numbers exist for now; new variants slot in here.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Value {
    /// 64-bit floating-point number.
    Number(f64),
}

impl Value {
    /// Arithmetic negation.
    pub fn negate(self) -> Value {
        match self {
            Value::Number(n) => Value::Number(-n),
        }
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Number(n) => write!(f, "{}", n),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_number() {
        assert_eq!(Value::Number(1.2).to_string(), "1.2");
        assert_eq!(Value::Number(7.0).to_string(), "7");
        assert_eq!(Value::Number(-7.0).to_string(), "-7");
    }

    #[test]
    fn test_negate() {
        assert_eq!(Value::Number(7.0).negate(), Value::Number(-7.0));
        assert_eq!(Value::Number(-0.5).negate(), Value::Number(0.5));
    }
}
