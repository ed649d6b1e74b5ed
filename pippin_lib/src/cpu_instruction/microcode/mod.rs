use crate::addressing_mode::AddressingMode;
use crate::cpu_instruction::{CPUInstruction, LogLine};
use crate::memory::Memory;
use crate::registers::Registers;

mod error;
pub use error::{MicrocodeError, Result};

mod add;
mod and;
mod cmpl;
mod cmpz;
mod div;
mod halt;
mod jmpz;
mod jump;
mod lod;
mod mul;
mod nop;
mod not;
mod sto;
mod sub;

pub use add::add;
pub use and::and;
pub use cmpl::cmpl;
pub use cmpz::cmpz;
pub use div::div;
pub use halt::halt;
pub use jmpz::jmpz;
pub use jump::jump;
pub use lod::lod;
pub use mul::mul;
pub use nop::nop;
pub use not::not;
pub use sto::sto;
pub use sub::sub;

/// Addressing modes designating a data operand.
const DATA_OPERAND_MODES: [AddressingMode; 3] = [
    AddressingMode::Direct,
    AddressingMode::Immediate,
    AddressingMode::Indirect,
];

/*
 * Destination of the jump family.
 * Direct:           pc + arg
 * Immediate:        arg
 * Indirect:         pc + data[arg]
 * IndirectAbsolute: data[arg]
 */
fn jump_target(
    memory: &Memory,
    registers: &Registers,
    cpu_instruction: &CPUInstruction,
) -> Result<i32> {
    let arg = cpu_instruction.arg();
    let target = match cpu_instruction.addressing_mode {
        AddressingMode::Direct => registers.program_counter.wrapping_add(arg),
        AddressingMode::Immediate => arg,
        AddressingMode::Indirect => registers
            .program_counter
            .wrapping_add(memory.read_data(arg)?),
        AddressingMode::IndirectAbsolute => {
            AddressingMode::IndirectAbsolute.solve(arg, memory)?.value
        }
    };

    Ok(target)
}
