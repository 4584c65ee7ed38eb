use cinder::bytecode::disasm::{disassemble_chunk, print_chunk_stats};
use cinder::bytecode::{Chunk, OpCode};
use cinder::lang::value::Value;
use cinder::runtime::{Vm, VmConfig};
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    println!("demo mode");

    let chunk = demo_chunk();
    disassemble_chunk(&chunk, "test chunk");
    println!();
    print_chunk_stats(&chunk, "test chunk");
    println!();

    let mut vm = Vm::with_config(VmConfig::default().with_trace_execution(true));
    match vm.interpret(&chunk) {
        Ok(value) => println!("stack top: {}", value),
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    }
}

/// `-(1.2)` followed by a return, all on line 123.
fn demo_chunk() -> Chunk {
    let mut chunk = Chunk::new();
    chunk.write_constant(Value::Number(1.2), 123);
    chunk.write_op(OpCode::Negate, 123);
    chunk.write_op(OpCode::Return, 123);
    chunk
}
