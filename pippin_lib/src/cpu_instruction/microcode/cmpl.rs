use super::*;

pub fn cmpl(
    memory: &mut Memory,
    registers: &mut Registers,
    cpu_instruction: &CPUInstruction,
) -> Result<LogLine> {
    cpu_instruction.check_addressing_mode(&[AddressingMode::Direct])?;
    let value = memory.read_data(cpu_instruction.arg())?;
    registers.accumulator = if value < 0 { 1 } else { 0 };
    registers.increment_program_counter();

    Ok(LogLine::new(cpu_instruction, registers.format()))
}
