use super::*;

/*
 * HALT
 * The program counter is left on the HALT instruction, the machine owning the
 * registers is responsible for the halted state.
 */
pub fn halt(
    _memory: &mut Memory,
    registers: &mut Registers,
    cpu_instruction: &CPUInstruction,
) -> Result<LogLine> {
    cpu_instruction.check_addressing_mode(&[AddressingMode::Direct])?;

    Ok(LogLine::new(cpu_instruction, registers.format()))
}
