use super::*;

pub fn div(
    memory: &mut Memory,
    registers: &mut Registers,
    cpu_instruction: &CPUInstruction,
) -> Result<LogLine> {
    cpu_instruction.check_addressing_mode(&DATA_OPERAND_MODES)?;
    let divisor = cpu_instruction
        .addressing_mode
        .solve(cpu_instruction.arg(), memory)?
        .value;

    if divisor == 0 {
        return Err(MicrocodeError::DivideByZero);
    }
    registers.accumulator = registers.accumulator.wrapping_div(divisor);
    registers.increment_program_counter();

    Ok(LogLine::new(cpu_instruction, registers.format()))
}
