use crate::bytecode::chunk::decode_long_index;
use crate::bytecode::disasm::disassemble_instruction;
use crate::bytecode::{Chunk, OpCode};
use crate::lang::value::Value;
use crate::runtime::runtime_error::{InterpretError, RuntimeError};
use crate::runtime::stack::ValueStack;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

/// Default operand stack capacity.
pub const STACK_MAX: usize = 256;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VmConfig {
    /// Maximum number of values on the operand stack.
    pub stack_max: usize,
    /// Print the stack and each instruction before it executes.
    pub trace_execution: bool,
}

impl Default for VmConfig {
    fn default() -> Self {
        VmConfig {
            stack_max: STACK_MAX,
            trace_execution: false,
        }
    }
}

impl VmConfig {
    pub fn with_stack_max(mut self, stack_max: usize) -> Self {
        self.stack_max = stack_max;
        self
    }

    pub fn with_trace_execution(mut self, trace_execution: bool) -> Self {
        self.trace_execution = trace_execution;
        self
    }
}

/// Lifecycle of the interpreter.
///
/// `Idle` until a chunk is bound, `Running` while fetching, then one of the
/// three terminal states until the next `interpret`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VmState {
    Idle,
    Running,
    Ok,
    CompileError,
    RuntimeError,
}

/// Outcome of one `interpret` call: the value handed to `OP_RETURN` on success.
pub type InterpretResult = Result<Value, InterpretError>;

#[derive(Debug)]
pub struct Vm {
    config: VmConfig,
    stack: ValueStack,
    /// Offset of the next byte to fetch.
    ip: usize,
    /// Offset of the opcode currently executing, for error reporting.
    instruction_start: usize,
    state: VmState,
}

impl Default for Vm {
    fn default() -> Self {
        Self::new()
    }
}

impl Vm {
    pub fn new() -> Self {
        Self::with_config(VmConfig::default())
    }

    pub fn with_config(config: VmConfig) -> Self {
        Self {
            stack: ValueStack::with_capacity(config.stack_max),
            config,
            ip: 0,
            instruction_start: 0,
            state: VmState::Idle,
        }
    }

    pub fn config(&self) -> &VmConfig {
        &self.config
    }

    pub fn state(&self) -> VmState {
        self.state
    }

    /// Values left on the operand stack by the last run.
    pub fn stack(&self) -> &[Value] {
        self.stack.as_slice()
    }

    /// Empty the stack, rewind the pointer and go back to `Idle`.
    pub fn reset(&mut self) {
        self.stack.clear();
        self.ip = 0;
        self.instruction_start = 0;
        self.state = VmState::Idle;
    }

    /// Execute `chunk` from its first byte until `OP_RETURN` or a fault.
    pub fn interpret(&mut self, chunk: &Chunk) -> InterpretResult {
        self.reset();
        self.state = VmState::Running;

        debug!(
            bytes = chunk.len(),
            constants = chunk.constants().len(),
            "interpret chunk"
        );

        match self.run(chunk) {
            Ok(value) => {
                self.state = VmState::Ok;
                debug!(result = %value, "interpret finished");
                Ok(value)
            }
            Err(source) => {
                self.state = VmState::RuntimeError;
                let offset = self.instruction_start;
                let line = fault_line(chunk, offset);
                warn!(error = %source, offset, line, "runtime error");
                Err(InterpretError::Runtime {
                    source,
                    offset,
                    line,
                })
            }
        }
    }

    // =========================================================================
    // Execution
    // =========================================================================

    fn run(&mut self, chunk: &Chunk) -> Result<Value, RuntimeError> {
        loop {
            self.instruction_start = self.ip;

            if self.config.trace_execution {
                self.trace_instruction(chunk);
            }

            let byte = self.read_byte(chunk)?;
            let op = OpCode::from_byte(byte).ok_or(RuntimeError::InvalidOpcode {
                byte,
                offset: self.instruction_start,
            })?;

            trace!(
                offset = self.instruction_start,
                op = %op,
                depth = self.stack.len(),
                "dispatch"
            );

            match op {
                OpCode::Constant => {
                    let index = self.read_byte(chunk)? as usize;
                    let value = self.read_constant(chunk, index)?;
                    self.stack.push(value)?;
                }
                OpCode::ConstantLong => {
                    let index = decode_long_index([
                        self.read_byte(chunk)?,
                        self.read_byte(chunk)?,
                        self.read_byte(chunk)?,
                    ]);
                    let value = self.read_constant(chunk, index)?;
                    self.stack.push(value)?;
                }
                OpCode::Negate => {
                    let value = self.stack.pop()?;
                    self.stack.push(value.negate())?;
                }
                OpCode::Return => {
                    return self.stack.pop();
                }
            }
        }
    }

    fn read_byte(&mut self, chunk: &Chunk) -> Result<u8, RuntimeError> {
        let byte = chunk
            .code()
            .get(self.ip)
            .copied()
            .ok_or(RuntimeError::CodeOutOfBounds { offset: self.ip })?;
        self.ip += 1;
        Ok(byte)
    }

    fn read_constant(&self, chunk: &Chunk, index: usize) -> Result<Value, RuntimeError> {
        chunk
            .constant(index)
            .copied()
            .ok_or(RuntimeError::ConstantOutOfRange {
                index,
                len: chunk.constants().len(),
            })
    }

    fn trace_instruction(&self, chunk: &Chunk) {
        println!("          {}", self.stack);
        if self.ip < chunk.len() {
            disassemble_instruction(chunk, self.ip);
        }
    }
}

/// Source line for a fault at `offset`, 0 when the chunk has no code.
fn fault_line(chunk: &Chunk, offset: usize) -> u32 {
    if chunk.is_empty() {
        return 0;
    }
    chunk.get_line(offset.min(chunk.len() - 1))
}
