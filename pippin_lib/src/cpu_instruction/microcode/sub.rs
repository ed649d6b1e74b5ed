use super::*;

pub fn sub(
    memory: &mut Memory,
    registers: &mut Registers,
    cpu_instruction: &CPUInstruction,
) -> Result<LogLine> {
    cpu_instruction.check_addressing_mode(&DATA_OPERAND_MODES)?;
    let resolution = cpu_instruction
        .addressing_mode
        .solve(cpu_instruction.arg(), memory)?;
    registers.accumulator = registers.accumulator.wrapping_sub(resolution.value);
    registers.increment_program_counter();

    Ok(LogLine::new(cpu_instruction, registers.format()))
}
