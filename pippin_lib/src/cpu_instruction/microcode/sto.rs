use super::*;

pub fn sto(
    memory: &mut Memory,
    registers: &mut Registers,
    cpu_instruction: &CPUInstruction,
) -> Result<LogLine> {
    cpu_instruction.check_addressing_mode(&[AddressingMode::Direct, AddressingMode::Indirect])?;
    let target_address = cpu_instruction
        .addressing_mode
        .solve(cpu_instruction.arg(), memory)?
        .target_address
        .unwrap_or_else(|| cpu_instruction.arg());
    memory.write_data(target_address, registers.accumulator)?;
    registers.increment_program_counter();

    Ok(LogLine::new(
        cpu_instruction,
        format!(
            "{}[#0x{:04x}=0x{:08x}]",
            registers.format(),
            target_address,
            registers.accumulator
        ),
    ))
}
