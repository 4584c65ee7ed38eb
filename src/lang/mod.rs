//! # Cinder values
//!
//! Data that flows through the VM: constant pool entries and operand stack
//! slots.

pub mod value;
