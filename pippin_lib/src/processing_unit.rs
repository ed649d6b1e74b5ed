use super::addressing_mode::AddressingMode;
use super::cpu_instruction::microcode::{self, MicrocodeError, Result};
use super::cpu_instruction::{CPUInstruction, LogLine, Microcode};
use super::instruction::{Instruction, Operation};
use super::memory::Memory;
use super::registers::Registers;

fn microcode_for(operation: Operation) -> Microcode {
    match operation {
        Operation::Nop => microcode::nop,
        Operation::Not => microcode::not,
        Operation::Halt => microcode::halt,
        Operation::Lod => microcode::lod,
        Operation::Sto => microcode::sto,
        Operation::Add => microcode::add,
        Operation::Sub => microcode::sub,
        Operation::Mul => microcode::mul,
        Operation::Div => microcode::div,
        Operation::And => microcode::and,
        Operation::Jump => microcode::jump,
        Operation::Jmpz => microcode::jmpz,
        Operation::Cmpl => microcode::cmpl,
        Operation::Cmpz => microcode::cmpz,
    }
}

/*
 * resolve_instruction
 * Parity is checked before the opcode is even decoded, a corrupted
 * instruction is never dispatched.
 */
pub fn resolve_instruction(address: usize, instruction: Instruction) -> Result<CPUInstruction> {
    if instruction.check_parity().is_err() {
        return Err(MicrocodeError::Parity(instruction.opcode));
    }
    let operation = Operation::try_from(instruction.group())
        .map_err(|_| MicrocodeError::UnknownOperation(instruction.opcode))?;
    let addressing_mode = AddressingMode::from_opcode(instruction.opcode);

    Ok(CPUInstruction::new(
        address,
        instruction,
        operation,
        addressing_mode,
        microcode_for(operation),
    ))
}

/// One fetch, decode and execute cycle at the program counter.
pub fn execute_step(registers: &mut Registers, memory: &mut Memory) -> Result<LogLine> {
    let address = registers.program_counter;
    let instruction = memory.read_code(address)?;
    let cpu_instruction = resolve_instruction(address as usize, instruction)?;

    cpu_instruction.execute(memory, registers)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryError;

    #[test]
    fn test_resolve_instruction() {
        let instruction = Instruction::assemble(Operation::Lod, AddressingMode::Indirect, 0x1a);
        let cpu_instruction = resolve_instruction(0x10, instruction).unwrap();

        assert_eq!(0x10, cpu_instruction.address);
        assert_eq!(Operation::Lod, cpu_instruction.operation);
        assert_eq!(AddressingMode::Indirect, cpu_instruction.addressing_mode);
    }

    #[test]
    fn test_resolve_corrupted_instruction() {
        let instruction = Instruction::new(0b0001_1001, 0);

        assert_eq!(
            MicrocodeError::Parity(0b0001_1001),
            resolve_instruction(0, instruction).unwrap_err()
        );
    }

    #[test]
    fn test_resolve_unknown_operation() {
        let instruction = Instruction::new(0b0111_0001, 0);

        assert_eq!(
            MicrocodeError::UnknownOperation(0b0111_0001),
            resolve_instruction(0, instruction).unwrap_err()
        );
    }

    #[test]
    fn test_legality_table() {
        use crate::addressing_mode::AddressingMode::*;
        let legal: [(Operation, &[AddressingMode]); 14] = [
            (Operation::Nop, &[Direct]),
            (Operation::Not, &[Direct]),
            (Operation::Halt, &[Direct]),
            (Operation::Lod, &[Direct, Immediate, Indirect]),
            (Operation::Sto, &[Direct, Indirect]),
            (Operation::Add, &[Direct, Immediate, Indirect]),
            (Operation::Sub, &[Direct, Immediate, Indirect]),
            (Operation::Mul, &[Direct, Immediate, Indirect]),
            (Operation::Div, &[Direct, Immediate, Indirect]),
            (Operation::And, &[Direct, Immediate]),
            (Operation::Jump, &[Direct, Immediate, Indirect, IndirectAbsolute]),
            (Operation::Jmpz, &[Direct, Immediate, Indirect, IndirectAbsolute]),
            (Operation::Cmpl, &[Direct]),
            (Operation::Cmpz, &[Direct]),
        ];

        for (operation, legal_modes) in legal.iter() {
            for addressing_mode in [Direct, Immediate, Indirect, IndirectAbsolute] {
                let mut memory = Memory::new();
                // non zero divisor wherever DIV looks for it
                memory.write_data(0x01, 0x01).unwrap();
                let mut registers = Registers::new(0);
                memory
                    .write_code(0, Instruction::assemble(*operation, addressing_mode, 0x01))
                    .unwrap();
                let result = execute_step(&mut registers, &mut memory);

                if legal_modes.contains(&addressing_mode) {
                    assert!(result.is_ok(), "{} ({}) should be legal", operation, addressing_mode);
                } else {
                    assert_eq!(
                        MicrocodeError::IllegalInstruction(*operation, addressing_mode),
                        result.unwrap_err()
                    );
                }
            }
        }
    }

    #[test]
    fn test_execute_step_nop() {
        let mut memory = Memory::new();
        memory
            .write_code(0, Instruction::assemble(Operation::Nop, AddressingMode::Direct, 0))
            .unwrap();
        let mut registers = Registers::new(0);
        registers.accumulator = 3;
        let log_line = execute_step(&mut registers, &mut memory).unwrap();

        assert_eq!(Operation::Nop, log_line.operation);
        assert_eq!(3, registers.accumulator);
        assert_eq!(1, registers.program_counter);
    }

    #[test]
    fn test_execute_step_out_of_code() {
        let mut memory = Memory::new();
        let mut registers = Registers::new(0x100);

        assert_eq!(
            MicrocodeError::Memory(MemoryError::CodeAccess(0x100)),
            execute_step(&mut registers, &mut memory).unwrap_err()
        );
        registers.program_counter = 0x02;
        assert_eq!(
            MicrocodeError::Memory(MemoryError::UnsetCode(0x02)),
            execute_step(&mut registers, &mut memory).unwrap_err()
        );
    }
}
