//! # Cinder
//!
//! A minimal stack-based bytecode virtual machine.
//!
//! - [`bytecode::Chunk`] holds the instruction bytes, the constant pool and a
//!   run-length encoded line table.
//! - [`bytecode::disasm`] renders a chunk as text for diagnostics.
//! - [`runtime::Vm`] executes a chunk against an operand stack.
//!
//! ```
//! use cinder::bytecode::{Chunk, OpCode};
//! use cinder::lang::value::Value;
//! use cinder::runtime::Vm;
//!
//! let mut chunk = Chunk::new();
//! chunk.write_constant(Value::Number(7.0), 1);
//! chunk.write_op(OpCode::Negate, 1);
//! chunk.write_op(OpCode::Return, 1);
//!
//! let result = Vm::new().interpret(&chunk);
//! assert_eq!(result, Ok(Value::Number(-7.0)));
//! ```

pub mod bytecode;
pub mod lang;
pub mod runtime;

pub use bytecode::{Chunk, OpCode};
pub use lang::value::Value;
pub use runtime::{InterpretError, InterpretResult, RuntimeError, Vm, VmConfig, VmState};
