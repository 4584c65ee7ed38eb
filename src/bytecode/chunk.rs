use crate::bytecode::OpCode;
use crate::lang::value::Value;

/// Largest constant index `OP_CONSTANT` can address.
pub const MAX_SHORT_CONSTANT: usize = u8::MAX as usize;

/// Number of constants addressable by `OP_CONSTANT_LONG`.
pub const MAX_CONSTANTS: usize = 1 << 24;

/// Start of a run of code bytes that share one source line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineStart {
    /// Index of the first byte of the run.
    pub offset: usize,
    pub line: u32,
}

/// A unit of compiled bytecode.
///
/// Holds the flat instruction stream, the constant pool it indexes into and
/// a run-length encoded line table. Producers append through `&mut Chunk`;
/// the VM and disassembler only ever see `&Chunk`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Chunk {
    code: Vec<u8>,
    constants: Vec<Value>,
    /// Strictly increasing in `offset`, one entry per line change.
    lines: Vec<LineStart>,
}

impl Chunk {
    pub fn new() -> Self {
        Self::default()
    }

    // =========================================================================
    // Building
    // =========================================================================

    /// Append one opcode or operand byte produced from source `line`.
    pub fn write(&mut self, byte: u8, line: u32) {
        let offset = self.code.len();
        self.code.push(byte);

        match self.lines.last() {
            Some(last) if last.line == line => {}
            _ => self.lines.push(LineStart { offset, line }),
        }
    }

    pub fn write_op(&mut self, op: OpCode, line: u32) {
        self.write(op.into(), line);
    }

    /// Add a value to the constant pool and return its index.
    ///
    /// The caller picks the load opcode from the index's magnitude; see
    /// [`Chunk::write_constant`].
    pub fn add_constant(&mut self, value: Value) -> usize {
        self.constants.push(value);
        self.constants.len() - 1
    }

    /// Add a constant and emit the instruction that loads it.
    ///
    /// Indices up to 255 use `OP_CONSTANT`, larger ones `OP_CONSTANT_LONG`
    /// with a 24-bit little-endian operand.
    ///
    /// # Panics
    ///
    /// If the pool already holds [`MAX_CONSTANTS`] entries.
    pub fn write_constant(&mut self, value: Value, line: u32) -> usize {
        let index = self.add_constant(value);

        if index <= MAX_SHORT_CONSTANT {
            self.write_op(OpCode::Constant, line);
            self.write(index as u8, line);
        } else {
            assert!(
                index < MAX_CONSTANTS,
                "constant pool overflow: index {} does not fit in 24 bits",
                index
            );
            self.write_op(OpCode::ConstantLong, line);
            for byte in encode_long_index(index) {
                self.write(byte, line);
            }
        }

        index
    }

    // =========================================================================
    // Reading
    // =========================================================================

    pub fn code(&self) -> &[u8] {
        &self.code
    }

    pub fn constants(&self) -> &[Value] {
        &self.constants
    }

    pub fn constant(&self, index: usize) -> Option<&Value> {
        self.constants.get(index)
    }

    pub fn lines(&self) -> &[LineStart] {
        &self.lines
    }

    /// Number of code bytes.
    pub fn len(&self) -> usize {
        self.code.len()
    }

    pub fn is_empty(&self) -> bool {
        self.code.is_empty()
    }

    /// Source line of the byte at `code_index`.
    ///
    /// Returns the line of the last run starting at or before `code_index`.
    ///
    /// # Panics
    ///
    /// If nothing has been written yet: a chunk without a line table is
    /// malformed.
    pub fn get_line(&self, code_index: usize) -> u32 {
        assert!(
            !self.lines.is_empty(),
            "malformed chunk: line table is empty (looked up offset {})",
            code_index
        );

        let runs_started = self.lines.partition_point(|run| run.offset <= code_index);
        self.lines[runs_started.saturating_sub(1)].line
    }

    /// Decode the 24-bit operand starting at `offset`, if all three bytes exist.
    pub fn read_long_index(&self, offset: usize) -> Option<usize> {
        let bytes = self.code.get(offset..offset + 3)?;
        Some(decode_long_index([bytes[0], bytes[1], bytes[2]]))
    }
}

/// Split a constant index into `[low, mid, high]` bytes.
pub fn encode_long_index(index: usize) -> [u8; 3] {
    [
        (index & 0xff) as u8,
        ((index >> 8) & 0xff) as u8,
        ((index >> 16) & 0xff) as u8,
    ]
}

pub fn decode_long_index(bytes: [u8; 3]) -> usize {
    bytes[0] as usize | (bytes[1] as usize) << 8 | (bytes[2] as usize) << 16
}
