use super::*;

pub fn nop(
    _memory: &mut Memory,
    registers: &mut Registers,
    cpu_instruction: &CPUInstruction,
) -> Result<LogLine> {
    cpu_instruction.check_addressing_mode(&[AddressingMode::Direct])?;
    registers.increment_program_counter();

    Ok(LogLine::new(cpu_instruction, registers.format()))
}
