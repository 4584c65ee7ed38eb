use crate::bytecode::{Chunk, OpCode};
use std::collections::HashMap;

/// Print disassembly of a whole chunk under a `== name ==` header.
pub fn disassemble_chunk(chunk: &Chunk, name: &str) {
    print!("{}", disassemble_chunk_to_string(chunk, name));
}

/// Print the instruction at `offset` and return the offset of the next one.
///
/// # Panics
///
/// Same contract as [`disassemble_instruction_to_string`].
pub fn disassemble_instruction(chunk: &Chunk, offset: usize) -> usize {
    let (text, next) = disassemble_instruction_to_string(chunk, offset);
    println!("{}", text);
    next
}

// =============================================================================
// String output (for testing/tracing)
// =============================================================================

/// Return the full disassembly as a String, one instruction per line.
pub fn disassemble_chunk_to_string(chunk: &Chunk, name: &str) -> String {
    let mut output = format!("== {} ==\n", name);
    let mut offset = 0;

    while offset < chunk.len() {
        let (text, next) = disassemble_instruction_to_string(chunk, offset);
        output.push_str(&text);
        output.push('\n');
        offset = next;
    }

    output
}

/// Render one instruction without a trailing newline.
///
/// Returns the text and the next offset. Unknown bytes advance by one so a
/// partially understood stream can still be walked to the end.
///
/// # Panics
///
/// If `offset` is not inside the chunk's code. Callers walk offsets returned
/// by previous calls, starting at 0, while `offset < chunk.len()`.
pub fn disassemble_instruction_to_string(chunk: &Chunk, offset: usize) -> (String, usize) {
    let mut output = format!("{:04} ", offset);

    let line = chunk.get_line(offset);
    if offset > 0 && line == chunk.get_line(offset - 1) {
        output.push_str("   | ");
    } else {
        output.push_str(&format!("{:4} ", line));
    }

    let byte = chunk.code()[offset];
    let next = match OpCode::from_byte(byte) {
        Some(op @ OpCode::Constant) => {
            let index = chunk.code().get(offset + 1).map(|&b| b as usize);
            constant_instruction(chunk, op, index, offset, &mut output)
        }
        Some(op @ OpCode::ConstantLong) => {
            let index = chunk.read_long_index(offset + 1);
            constant_instruction(chunk, op, index, offset, &mut output)
        }
        Some(op @ (OpCode::Negate | OpCode::Return)) => simple_instruction(op, offset, &mut output),
        None => {
            output.push_str(&format!("Unknown opcode {}", byte));
            offset + 1
        }
    };

    (output, next)
}

fn simple_instruction(op: OpCode, offset: usize, output: &mut String) -> usize {
    output.push_str(op.name());
    offset + op.width()
}

fn constant_instruction(
    chunk: &Chunk,
    op: OpCode,
    index: Option<usize>,
    offset: usize,
    output: &mut String,
) -> usize {
    let Some(index) = index else {
        output.push_str(&format!("{:<16} <truncated>", op.name()));
        return chunk.len();
    };

    match chunk.constant(index) {
        Some(value) => output.push_str(&format!("{:<16} {:4} '{}'", op.name(), index, value)),
        None => output.push_str(&format!("{:<16} {:4} <no such constant>", op.name(), index)),
    }

    offset + op.width()
}

// =============================================================================
// Statistics
// =============================================================================

/// Summary of a chunk's contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChunkStats {
    pub bytes: usize,
    pub constants: usize,
    pub line_runs: usize,
    pub instructions: usize,
    /// Mnemonic frequency, most frequent first, ties by name.
    pub op_counts: Vec<(&'static str, usize)>,
}

pub fn chunk_stats(chunk: &Chunk) -> ChunkStats {
    let mut counts: HashMap<&'static str, usize> = HashMap::new();
    let mut instructions = 0;
    let mut offset = 0;

    while offset < chunk.len() {
        let (name, width) = match OpCode::from_byte(chunk.code()[offset]) {
            Some(op) => (op.name(), op.width()),
            None => ("UNKNOWN", 1),
        };
        *counts.entry(name).or_insert(0) += 1;
        instructions += 1;
        offset += width;
    }

    let mut op_counts: Vec<_> = counts.into_iter().collect();
    op_counts.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(b.0)));

    ChunkStats {
        bytes: chunk.len(),
        constants: chunk.constants().len(),
        line_runs: chunk.lines().len(),
        instructions,
        op_counts,
    }
}

/// Print chunk statistics.
pub fn print_chunk_stats(chunk: &Chunk, name: &str) {
    let stats = chunk_stats(chunk);

    println!("=== {} STATISTICS ===\n", name);
    println!("Bytes:        {}", stats.bytes);
    println!("Constants:    {}", stats.constants);
    println!("Line runs:    {}", stats.line_runs);
    println!("Instructions: {}", stats.instructions);
    println!();

    println!("Op frequency:");
    for (op, count) in &stats.op_counts {
        let pct = (*count as f64 / stats.instructions as f64) * 100.0;
        println!("  {:<18} {:>4} ({:>5.1}%)", op, count, pct);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lang::value::Value;
    use pretty_assertions::assert_eq;

    fn sample_chunk() -> Chunk {
        let mut chunk = Chunk::new();
        chunk.write_constant(Value::Number(1.2), 123);
        chunk.write_op(OpCode::Negate, 123);
        chunk.write_op(OpCode::Return, 124);
        chunk
    }

    #[test]
    fn test_disassemble_chunk_format() {
        let output = disassemble_chunk_to_string(&sample_chunk(), "test chunk");

        assert_eq!(
            output,
            "== test chunk ==\n\
             0000  123 OP_CONSTANT         0 '1.2'\n\
             0002    | OP_NEGATE\n\
             0003  124 OP_RETURN\n"
        );
    }

    #[test]
    fn test_instruction_widths() {
        let chunk = sample_chunk();
        assert_eq!(disassemble_instruction_to_string(&chunk, 0).1, 2);
        assert_eq!(disassemble_instruction_to_string(&chunk, 2).1, 3);
        assert_eq!(disassemble_instruction_to_string(&chunk, 3).1, 4);
    }

    #[test]
    fn test_long_constant() {
        let mut chunk = Chunk::new();
        for i in 0..300 {
            chunk.add_constant(Value::Number(i as f64));
        }
        chunk.write_constant(Value::Number(2.5), 1);

        let (text, next) = disassemble_instruction_to_string(&chunk, 0);
        assert_eq!(text, "0000    1 OP_CONSTANT_LONG  300 '2.5'");
        assert_eq!(next, 4);
    }

    #[test]
    fn test_unknown_opcode_continues() {
        let mut chunk = Chunk::new();
        chunk.write(123, 1);
        chunk.write(123, 1);

        let output = disassemble_chunk_to_string(&chunk, "bad");
        assert_eq!(
            output,
            "== bad ==\n0000    1 Unknown opcode 123\n0001    | Unknown opcode 123\n"
        );
    }

    #[test]
    #[should_panic]
    fn test_offset_past_end_panics() {
        let chunk = sample_chunk();
        disassemble_instruction_to_string(&chunk, chunk.len());
    }

    #[test]
    fn test_truncated_operand_stops_at_end() {
        let mut chunk = Chunk::new();
        chunk.write_op(OpCode::ConstantLong, 1);
        chunk.write(0, 1);

        let (text, next) = disassemble_instruction_to_string(&chunk, 0);
        assert!(text.contains("<truncated>"));
        assert_eq!(next, chunk.len());
    }

    #[test]
    fn test_missing_constant_reported() {
        let mut chunk = Chunk::new();
        chunk.write_op(OpCode::Constant, 1);
        chunk.write(9, 1);

        let (text, next) = disassemble_instruction_to_string(&chunk, 0);
        assert!(text.contains("<no such constant>"));
        assert_eq!(next, 2);
    }

    #[test]
    fn test_chunk_stats() {
        let mut chunk = sample_chunk();
        chunk.write(200, 125);

        let stats = chunk_stats(&chunk);
        assert_eq!(stats.bytes, 5);
        assert_eq!(stats.constants, 1);
        assert_eq!(stats.line_runs, 3);
        assert_eq!(stats.instructions, 4);
        assert_eq!(
            stats.op_counts,
            vec![
                ("OP_CONSTANT", 1),
                ("OP_NEGATE", 1),
                ("OP_RETURN", 1),
                ("UNKNOWN", 1),
            ]
        );
    }
}
