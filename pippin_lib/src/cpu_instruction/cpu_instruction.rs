use super::microcode::{MicrocodeError, Result as MicrocodeResult};
use crate::addressing_mode::AddressingMode;
use crate::instruction::{Instruction, Operation};
use crate::memory::Memory;
use crate::registers::Registers;
use std::fmt;

pub type Microcode =
    fn(&mut Memory, &mut Registers, &CPUInstruction) -> MicrocodeResult<LogLine>;

/// A fetched instruction bound to the microcode of its operation.
pub struct CPUInstruction {
    pub address: usize,
    pub instruction: Instruction,
    pub operation: Operation,
    pub addressing_mode: AddressingMode,
    pub microcode: Microcode,
}

impl CPUInstruction {
    pub fn new(
        address: usize,
        instruction: Instruction,
        operation: Operation,
        addressing_mode: AddressingMode,
        microcode: Microcode,
    ) -> CPUInstruction {
        CPUInstruction {
            address,
            instruction,
            operation,
            addressing_mode,
            microcode,
        }
    }

    pub fn execute(
        &self,
        memory: &mut Memory,
        registers: &mut Registers,
    ) -> MicrocodeResult<LogLine> {
        (self.microcode)(memory, registers, self)
    }

    pub fn arg(&self) -> i32 {
        self.instruction.arg
    }

    /*
     * check_addressing_mode
     * Every operation accepts its own set of addressing modes. This must be
     * checked before any side effect takes place.
     */
    pub fn check_addressing_mode(&self, legal_modes: &[AddressingMode]) -> MicrocodeResult<()> {
        if legal_modes.contains(&self.addressing_mode) {
            Ok(())
        } else {
            Err(MicrocodeError::IllegalInstruction(
                self.operation,
                self.addressing_mode,
            ))
        }
    }
}

impl fmt::Debug for CPUInstruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CPUInstruction")
            .field("address", &self.address)
            .field("instruction", &self.instruction)
            .field("operation", &self.operation)
            .field("addressing_mode", &self.addressing_mode)
            .finish_non_exhaustive()
    }
}

impl fmt::Display for CPUInstruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "#0x{:02X}: ({})  {}",
            self.address,
            self.instruction.bits(),
            self.instruction.text()
        )
    }
}

#[derive(Debug)]
pub struct LogLine {
    pub address: usize,
    pub instruction: Instruction,
    pub operation: Operation,
    pub addressing_mode: AddressingMode,
    pub outcome: String,
}

impl LogLine {
    pub fn new(cpu_instruction: &CPUInstruction, outcome: String) -> LogLine {
        LogLine {
            address: cpu_instruction.address,
            instruction: cpu_instruction.instruction,
            operation: cpu_instruction.operation,
            addressing_mode: cpu_instruction.addressing_mode,
            outcome,
        }
    }

    pub fn mnemonic(&self) -> &'static str {
        self.operation.mnemonic()
    }
}

impl fmt::Display for LogLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "#0x{:02X}: ({})  {: <14}{}",
            self.address,
            self.instruction.bits(),
            self.instruction.text(),
            self.outcome
        )
    }
}
