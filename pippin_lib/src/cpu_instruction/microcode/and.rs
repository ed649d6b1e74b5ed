use super::*;

pub fn and(
    memory: &mut Memory,
    registers: &mut Registers,
    cpu_instruction: &CPUInstruction,
) -> Result<LogLine> {
    cpu_instruction.check_addressing_mode(&[AddressingMode::Direct, AddressingMode::Immediate])?;
    let resolution = cpu_instruction
        .addressing_mode
        .solve(cpu_instruction.arg(), memory)?;
    registers.accumulator = if registers.accumulator != 0 && resolution.value != 0 {
        1
    } else {
        0
    };
    registers.increment_program_counter();

    Ok(LogLine::new(cpu_instruction, registers.format()))
}
