use super::*;

pub fn jmpz(
    memory: &mut Memory,
    registers: &mut Registers,
    cpu_instruction: &CPUInstruction,
) -> Result<LogLine> {
    if registers.accumulator == 0 {
        registers.program_counter = jump_target(memory, registers, cpu_instruction)?;
    } else {
        registers.increment_program_counter();
    }

    Ok(LogLine::new(cpu_instruction, registers.format()))
}
