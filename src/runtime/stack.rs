//! Operand stack for the VM.

use crate::lang::value::Value;
use crate::runtime::runtime_error::RuntimeError;

/// Fixed-capacity value stack.
#[derive(Debug)]
pub struct ValueStack {
    values: Vec<Value>,
    capacity: usize,
}

impl ValueStack {
    /// Stack holding at most `capacity` values. Grows on demand.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            values: Vec::new(),
            capacity,
        }
    }

    #[inline]
    pub fn push(&mut self, value: Value) -> Result<(), RuntimeError> {
        if self.values.len() >= self.capacity {
            return Err(RuntimeError::StackOverflow {
                capacity: self.capacity,
            });
        }
        self.values.push(value);
        Ok(())
    }

    #[inline]
    pub fn pop(&mut self) -> Result<Value, RuntimeError> {
        self.values.pop().ok_or(RuntimeError::StackUnderflow)
    }

    pub fn as_slice(&self) -> &[Value] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn clear(&mut self) {
        self.values.clear();
    }
}

impl std::fmt::Display for ValueStack {
    /// `[a][b][c]`, bottom first.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for value in &self.values {
            write!(f, "[{}]", value)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_pop_order() {
        let mut stack = ValueStack::with_capacity(4);
        stack.push(Value::Number(1.0)).unwrap();
        stack.push(Value::Number(2.0)).unwrap();

        assert_eq!(stack.as_slice(), &[Value::Number(1.0), Value::Number(2.0)]);
        assert_eq!(stack.pop(), Ok(Value::Number(2.0)));
        assert_eq!(stack.pop(), Ok(Value::Number(1.0)));
        assert!(stack.is_empty());
    }

    #[test]
    fn test_pop_empty_underflows() {
        let mut stack = ValueStack::with_capacity(4);
        assert_eq!(stack.pop(), Err(RuntimeError::StackUnderflow));
    }

    #[test]
    fn test_push_past_capacity_overflows() {
        let mut stack = ValueStack::with_capacity(2);
        stack.push(Value::Number(1.0)).unwrap();
        stack.push(Value::Number(2.0)).unwrap();

        assert_eq!(
            stack.push(Value::Number(3.0)),
            Err(RuntimeError::StackOverflow { capacity: 2 })
        );
        assert_eq!(stack.len(), 2);
    }

    #[test]
    fn test_display() {
        let mut stack = ValueStack::with_capacity(4);
        assert_eq!(stack.to_string(), "");
        stack.push(Value::Number(1.5)).unwrap();
        stack.push(Value::Number(-2.0)).unwrap();
        assert_eq!(stack.to_string(), "[1.5][-2]");
    }
}
