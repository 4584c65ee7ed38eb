pub mod runtime_error;
pub mod stack;
pub mod vm;

pub use runtime_error::{InterpretError, RuntimeError};
pub use vm::{InterpretResult, Vm, VmConfig, VmState};
