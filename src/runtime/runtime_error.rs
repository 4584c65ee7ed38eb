use thiserror::Error;

use crate::runtime::vm::VmState;

/// A fault raised while executing a chunk. Every variant halts the VM.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuntimeError {
    #[error("stack underflow")]
    StackUnderflow,

    #[error("stack overflow: capacity of {capacity} values exceeded")]
    StackOverflow { capacity: usize },

    #[error("invalid instruction {byte} at offset {offset}")]
    InvalidOpcode { byte: u8, offset: usize },

    #[error("malformed chunk: read past end of code at offset {offset}")]
    CodeOutOfBounds { offset: usize },

    #[error("malformed chunk: constant {index} out of range (pool holds {len})")]
    ConstantOutOfRange { index: usize, len: usize },
}

/// Failure of one `interpret` call.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InterpretError {
    /// Reserved for the compiler front end; never produced by the VM itself.
    #[error("compile error: {0}")]
    Compile(String),

    #[error("runtime error: {source}\n[line {line}] in script")]
    Runtime {
        #[source]
        source: RuntimeError,
        /// Byte offset of the faulting instruction.
        offset: usize,
        line: u32,
    },
}

impl InterpretError {
    /// Terminal VM state this error corresponds to.
    pub fn state(&self) -> VmState {
        match self {
            InterpretError::Compile(_) => VmState::CompileError,
            InterpretError::Runtime { .. } => VmState::RuntimeError,
        }
    }

    pub fn runtime_error(&self) -> Option<&RuntimeError> {
        match self {
            InterpretError::Runtime { source, .. } => Some(source),
            InterpretError::Compile(_) => None,
        }
    }
}
