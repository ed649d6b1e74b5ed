mod addressing_mode;
mod cpu_instruction;
mod instruction;
mod machine;
pub mod memory;
mod processing_unit;
mod registers;
mod syntax_validator;

pub use addressing_mode::{AddressingMode, ResolutionError};
pub use cpu_instruction::{CPUInstruction, LogLine, MicrocodeError};
pub use instruction::{Instruction, InstructionError, Operation};
pub use machine::Machine;
pub use memory::{Memory, MemoryError, CODE_SIZE, DATA_SIZE};
pub use processing_unit::*;
pub use registers::Registers;
pub use syntax_validator::{
    SyntaxError, SyntaxErrorKind, SyntaxValidator, ValidationReport, ValidationStatus,
};
