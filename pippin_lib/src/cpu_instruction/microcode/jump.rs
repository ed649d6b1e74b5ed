use super::*;

pub fn jump(
    memory: &mut Memory,
    registers: &mut Registers,
    cpu_instruction: &CPUInstruction,
) -> Result<LogLine> {
    registers.program_counter = jump_target(memory, registers, cpu_instruction)?;

    Ok(LogLine::new(cpu_instruction, registers.format()))
}
