use super::cpu_instruction::microcode::{MicrocodeError, Result};
use super::cpu_instruction::LogLine;
use super::instruction::{Instruction, Operation};
use super::memory::{Memory, MemoryError};
use super::processing_unit::execute_step;
use super::registers::Registers;
use std::fmt;

type HaltCallback = Box<dyn FnMut()>;

/*
 * Machine
 * Owns the registers and the memory and drives them one step at a time. Once
 * halted, by a HALT instruction or by a fault, it refuses to step until it is
 * cleared. The halt callback is invoked exactly once per halt.
 */
#[derive(Default)]
pub struct Machine {
    registers: Registers,
    memory: Memory,
    halted: bool,
    halt_callback: Option<HaltCallback>,
}

impl Machine {
    pub fn new() -> Machine {
        Machine::default()
    }

    pub fn with_halt_callback(callback: impl FnMut() + 'static) -> Machine {
        let mut machine = Machine::new();
        machine.set_halt_callback(callback);

        machine
    }

    pub fn set_halt_callback(&mut self, callback: impl FnMut() + 'static) {
        self.halt_callback = Some(Box::new(callback));
    }

    pub fn step(&mut self) -> Result<LogLine> {
        if self.halted {
            return Err(MicrocodeError::Halted);
        }

        match execute_step(&mut self.registers, &mut self.memory) {
            Ok(log_line) => {
                if log_line.operation == Operation::Halt {
                    self.halt();
                }
                Ok(log_line)
            }
            Err(e) => {
                self.halt();
                Err(e)
            }
        }
    }

    fn halt(&mut self) {
        self.halted = true;
        if let Some(callback) = self.halt_callback.as_mut() {
            callback();
        }
    }

    /// Reset memory and registers, the machine can step again.
    pub fn clear(&mut self) {
        self.memory.clear_code();
        self.memory.clear_data();
        self.registers.initialize();
        self.halted = false;
    }

    pub fn is_halted(&self) -> bool {
        self.halted
    }

    pub fn registers(&self) -> &Registers {
        &self.registers
    }

    pub fn registers_mut(&mut self) -> &mut Registers {
        &mut self.registers
    }

    pub fn memory(&self) -> &Memory {
        &self.memory
    }

    pub fn memory_mut(&mut self) -> &mut Memory {
        &mut self.memory
    }

    pub fn accumulator(&self) -> i32 {
        self.registers.accumulator
    }

    pub fn set_accumulator(&mut self, value: i32) {
        self.registers.accumulator = value;
    }

    pub fn program_counter(&self) -> i32 {
        self.registers.program_counter
    }

    pub fn set_program_counter(&mut self, value: i32) {
        self.registers.program_counter = value;
    }

    pub fn read_data(&self, index: i32) -> std::result::Result<i32, MemoryError> {
        self.memory.read_data(index)
    }

    pub fn write_data(&mut self, index: i32, value: i32) -> std::result::Result<(), MemoryError> {
        self.memory.write_data(index, value)
    }

    pub fn read_code(&self, index: i32) -> std::result::Result<Instruction, MemoryError> {
        self.memory.read_code(index)
    }

    pub fn write_code(
        &mut self,
        index: usize,
        instruction: Instruction,
    ) -> std::result::Result<(), MemoryError> {
        self.memory.write_code(index, instruction)
    }

    pub fn program_size(&self) -> usize {
        self.memory.program_size()
    }

    pub fn changed_data_index(&self) -> Option<usize> {
        self.memory.changed_data_index()
    }
}

impl fmt::Debug for Machine {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "Machine {} halted={} {:?}",
            self.registers, self.halted, self.memory
        )
    }
}
