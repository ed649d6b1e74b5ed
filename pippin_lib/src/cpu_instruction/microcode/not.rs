use super::*;

pub fn not(
    _memory: &mut Memory,
    registers: &mut Registers,
    cpu_instruction: &CPUInstruction,
) -> Result<LogLine> {
    cpu_instruction.check_addressing_mode(&[AddressingMode::Direct])?;
    registers.accumulator = if registers.accumulator == 0 { 1 } else { 0 };
    registers.increment_program_counter();

    Ok(LogLine::new(cpu_instruction, registers.format()))
}
