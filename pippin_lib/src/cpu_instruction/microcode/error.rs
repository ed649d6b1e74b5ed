use crate::addressing_mode::{AddressingMode, ResolutionError};
use crate::instruction::Operation;
use crate::memory::MemoryError;
use std::error;
use std::fmt;

#[derive(Debug, Eq, PartialEq, Copy, Clone)]
pub enum MicrocodeError {
    // ↓ the opcode has an odd number of bits set
    Parity(u8),
    IllegalInstruction(Operation, AddressingMode),
    UnknownOperation(u8), // opcode
    DivideByZero,
    Memory(MemoryError),
    Resolution(ResolutionError),
    // ↓ a step was requested after the machine halted
    Halted,
}

pub type Result<T> = std::result::Result<T, MicrocodeError>;

impl fmt::Display for MicrocodeError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            MicrocodeError::Parity(opcode) => write!(
                f,
                "this instruction is corrupted, opcode 0b{:08b} fails the parity check",
                opcode
            ),
            MicrocodeError::IllegalInstruction(operation, addressing_mode) => write!(
                f,
                "illegal flags for this instruction: {} ({})",
                operation, addressing_mode
            ),
            MicrocodeError::UnknownOperation(opcode) => write!(
                f,
                "opcode 0b{:08b} does not designate a known operation (group {})",
                opcode,
                opcode >> 3
            ),
            MicrocodeError::DivideByZero => write!(f, "cannot divide by zero"),
            MicrocodeError::Memory(e) => {
                write!(f, "memory error during microcode operation: {}", e)
            }
            MicrocodeError::Resolution(e) => {
                write!(f, "resolution error caught in microcode operation: {}", e)
            }
            MicrocodeError::Halted => {
                write!(f, "the machine is halted, it must be cleared before stepping")
            }
        }
    }
}

impl error::Error for MicrocodeError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        None
    }
}

impl std::convert::From<ResolutionError> for MicrocodeError {
    fn from(err: ResolutionError) -> MicrocodeError {
        MicrocodeError::Resolution(err)
    }
}

impl std::convert::From<MemoryError> for MicrocodeError {
    fn from(err: MemoryError) -> MicrocodeError {
        MicrocodeError::Memory(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_illegal_instruction_message() {
        let error = MicrocodeError::IllegalInstruction(Operation::Sto, AddressingMode::Immediate);

        assert_eq!("illegal flags for this instruction: STO (01)", error.to_string());
    }

    #[test]
    fn test_unknown_operation_message() {
        assert_eq!(
            "opcode 0b01110000 does not designate a known operation (group 14)",
            MicrocodeError::UnknownOperation(0b0111_0000).to_string()
        );
    }
}
