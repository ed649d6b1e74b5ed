use super::addressing_mode::AddressingMode;
use num_enum::{IntoPrimitive, TryFromPrimitive};
use std::error;
use std::fmt;
use strum_macros::{Display as StrumDisplay, EnumIter, EnumString, IntoStaticStr};

/*
 * Opcode layout
 * bits 7-3: operation group (0 to 13)
 * bits 2-1: addressing mode flags
 * bit 0:    parity bit, set so the opcode byte has an even number of ones
 */
pub const GROUP_SHIFT: u8 = 3;
pub const FLAGS_MASK: u8 = 0b0000_0110;
pub const PARITY_MASK: u8 = 0b0000_0001;

#[derive(Debug, Eq, PartialEq, Copy, Clone, Hash)]
pub enum InstructionError {
    InvalidOperationGroup(u8),
    InvalidAddressingFlags(u8),
    Parity(u8), // opcode
}

impl fmt::Display for InstructionError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            InstructionError::InvalidOperationGroup(group) => {
                write!(f, "operation group {} is not a known operation", group)
            }
            InstructionError::InvalidAddressingFlags(flags) => {
                write!(f, "addressing flags 0b{:b} do not fit in two bits", flags)
            }
            InstructionError::Parity(opcode) => write!(
                f,
                "this instruction is corrupted, opcode 0b{:08b} fails the parity check",
                opcode
            ),
        }
    }
}

impl error::Error for InstructionError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        None
    }
}

/// Operation groups of the machine, the discriminant is the top 5 bits of the opcode.
#[derive(
    StrumDisplay,
    EnumString,
    IntoStaticStr,
    EnumIter,
    TryFromPrimitive,
    IntoPrimitive,
    Debug,
    Eq,
    PartialEq,
    Copy,
    Clone,
    Hash,
)]
#[repr(u8)]
pub enum Operation {
    #[strum(serialize = "NOP")]
    Nop = 0,
    #[strum(serialize = "NOT")]
    Not = 1,
    #[strum(serialize = "HALT")]
    Halt = 2,
    #[strum(serialize = "LOD")]
    Lod = 3,
    #[strum(serialize = "STO")]
    Sto = 4,
    #[strum(serialize = "ADD")]
    Add = 5,
    #[strum(serialize = "SUB")]
    Sub = 6,
    #[strum(serialize = "MUL")]
    Mul = 7,
    #[strum(serialize = "DIV")]
    Div = 8,
    #[strum(serialize = "AND")]
    And = 9,
    #[strum(serialize = "JUMP")]
    Jump = 10,
    #[strum(serialize = "JMPZ")]
    Jmpz = 11,
    #[strum(serialize = "CMPL")]
    Cmpl = 12,
    #[strum(serialize = "CMPZ")]
    Cmpz = 13,
}

impl Operation {
    pub fn group(&self) -> u8 {
        Into::<u8>::into(*self)
    }

    pub fn mnemonic(&self) -> &'static str {
        <&'static str>::from(*self)
    }

    pub fn takes_argument(&self) -> bool {
        !matches!(self, Operation::Nop | Operation::Not | Operation::Halt)
    }
}

/// One machine word: the opcode byte and its argument.
#[derive(Debug, Eq, PartialEq, Copy, Clone, Hash)]
pub struct Instruction {
    pub opcode: u8,
    pub arg: i32,
}

impl Instruction {
    /// Raw instruction, as found in a binary image. It may be corrupted.
    pub fn new(opcode: u8, arg: i32) -> Instruction {
        Instruction { opcode, arg }
    }

    pub fn encode(group: u8, flags: u8, arg: i32) -> Result<Instruction, InstructionError> {
        let operation = Operation::try_from(group)
            .map_err(|_| InstructionError::InvalidOperationGroup(group))?;
        let addressing_mode = AddressingMode::try_from(flags)
            .map_err(|_| InstructionError::InvalidAddressingFlags(flags))?;

        Ok(Instruction::assemble(operation, addressing_mode, arg))
    }

    pub fn assemble(
        operation: Operation,
        addressing_mode: AddressingMode,
        arg: i32,
    ) -> Instruction {
        let opcode = (operation.group() << GROUP_SHIFT) | (addressing_mode.flags() << 1);
        let parity = (opcode.count_ones() % 2) as u8;

        Instruction::new(opcode | parity, arg)
    }

    pub fn group(&self) -> u8 {
        self.opcode >> GROUP_SHIFT
    }

    pub fn addressing_mode(&self) -> AddressingMode {
        AddressingMode::from_opcode(self.opcode)
    }

    pub fn parity_bit(&self) -> u8 {
        self.opcode & PARITY_MASK
    }

    pub fn decode(&self) -> Result<(Operation, AddressingMode), InstructionError> {
        let operation = Operation::try_from(self.group())
            .map_err(|_| InstructionError::InvalidOperationGroup(self.group()))?;

        Ok((operation, self.addressing_mode()))
    }

    pub fn check_parity(&self) -> Result<(), InstructionError> {
        if self.opcode.count_ones() % 2 == 1 {
            Err(InstructionError::Parity(self.opcode))
        } else {
            Ok(())
        }
    }

    /*
     * text
     * Assembly rendering: `MNEMONIC  <prefix><hex>`, upper case, the argument
     * keeps its sign: `LOD  #-1A`.
     */
    pub fn text(&self) -> String {
        let mnemonic = match Operation::try_from(self.group()) {
            Ok(operation) => operation.mnemonic(),
            Err(_) => "???",
        };
        let sign = if self.arg < 0 { "-" } else { "" };

        format!(
            "{}  {}{}{:X}",
            mnemonic,
            self.addressing_mode().prefix(),
            sign,
            self.arg.unsigned_abs()
        )
    }

    /// Binary opcode and hexadecimal argument as a 32 bits word.
    pub fn bits(&self) -> String {
        format!("{:08b}  {:X}", self.opcode, self.arg as u32)
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;
    use std::str::FromStr;
    use strum::IntoEnumIterator;

    const MODES: [AddressingMode; 4] = [
        AddressingMode::Direct,
        AddressingMode::Immediate,
        AddressingMode::Indirect,
        AddressingMode::IndirectAbsolute,
    ];

    #[test]
    fn test_mnemonics() {
        assert_eq!("NOP", Operation::Nop.to_string());
        assert_eq!("JMPZ", Operation::Jmpz.mnemonic());
        assert_eq!(Operation::Cmpl, Operation::from_str("CMPL").unwrap());
        assert!(Operation::from_str("cmpl").is_err());
        assert!(Operation::from_str("JMP").is_err());
        assert_eq!(14, Operation::iter().count());
    }

    #[test]
    fn test_groups_are_sequential() {
        for (index, operation) in Operation::iter().enumerate() {
            assert_eq!(index as u8, operation.group());
            assert_eq!(operation, Operation::try_from(index as u8).unwrap());
        }
        assert!(Operation::try_from(14).is_err());
    }

    #[test]
    fn test_takes_argument() {
        let no_argument: Vec<Operation> =
            Operation::iter().filter(|o| !o.takes_argument()).collect();

        assert_eq!(vec![Operation::Nop, Operation::Not, Operation::Halt], no_argument);
    }

    #[test]
    fn test_encode() {
        assert_eq!(0b00000000, Instruction::encode(0, 0, 0).unwrap().opcode);
        assert_eq!(0b00001001, Instruction::encode(1, 0, 0).unwrap().opcode);
        assert_eq!(0b00011000, Instruction::encode(3, 0, 12).unwrap().opcode);
        assert_eq!(0b00011011, Instruction::encode(3, 1, 12).unwrap().opcode);
        assert_eq!(0b00011101, Instruction::encode(3, 2, 3).unwrap().opcode);
        assert_eq!(0b00100100, Instruction::encode(4, 2, 2).unwrap().opcode);
        assert_eq!(0b01010110, Instruction::encode(10, 3, 0).unwrap().opcode);
        assert_eq!(12, Instruction::encode(3, 1, 12).unwrap().arg);
    }

    #[test]
    fn test_encode_invalid() {
        assert_eq!(
            InstructionError::InvalidOperationGroup(14),
            Instruction::encode(14, 0, 0).unwrap_err()
        );
        assert_eq!(
            InstructionError::InvalidAddressingFlags(4),
            Instruction::encode(3, 4, 0).unwrap_err()
        );
    }

    #[test]
    fn test_encode_decode_all_groups_and_flags() {
        for operation in Operation::iter() {
            for mode in MODES.iter() {
                let instruction = Instruction::encode(operation.group(), mode.flags(), -5).unwrap();

                assert_eq!(Ok(()), instruction.check_parity());
                assert_eq!(Ok((operation, *mode)), instruction.decode());
            }
        }
    }

    #[test]
    fn test_flipped_bit_fails_parity() {
        let mut rng = rand::thread_rng();

        for _ in 0..256 {
            let group: u8 = rng.gen_range(0u8, 14u8);
            let flags: u8 = rng.gen_range(0u8, 4u8);
            let arg: i32 = rng.gen();
            let instruction = Instruction::encode(group, flags, arg).unwrap();
            let bit: u8 = rng.gen_range(0u8, 8u8);
            let corrupted = Instruction::new(instruction.opcode ^ (1 << bit), arg);

            assert_eq!(Ok(()), instruction.check_parity());
            assert_eq!(
                Err(InstructionError::Parity(corrupted.opcode)),
                corrupted.check_parity()
            );
        }
    }

    #[test]
    fn test_decode_unknown_group() {
        let instruction = Instruction::new(0b01110000, 0);

        assert_eq!(
            InstructionError::InvalidOperationGroup(14),
            instruction.decode().unwrap_err()
        );
    }

    #[test]
    fn test_text() {
        let lod = Instruction::assemble(Operation::Lod, AddressingMode::Immediate, 0x1a);
        assert_eq!("LOD  #1A", lod.text());

        let sto = Instruction::assemble(Operation::Sto, AddressingMode::Indirect, 0x2f);
        assert_eq!("STO  @2F", sto.text());

        let jump = Instruction::assemble(Operation::Jump, AddressingMode::IndirectAbsolute, 5);
        assert_eq!("JUMP  &5", jump.text());

        let jmpz = Instruction::assemble(Operation::Jmpz, AddressingMode::Direct, -26);
        assert_eq!("JMPZ  -1A", jmpz.to_string());

        let halt = Instruction::assemble(Operation::Halt, AddressingMode::Direct, 0);
        assert_eq!("HALT  0", halt.text());

        assert_eq!("???  &0", Instruction::new(0b11111111, 0).text());
        assert_eq!("???  0", Instruction::new(0b01110000, 0).text());
    }

    #[test]
    fn test_bits() {
        let lod = Instruction::assemble(Operation::Lod, AddressingMode::Immediate, 0x1a);
        assert_eq!("00011011  1A", lod.bits());

        let jmpz = Instruction::assemble(Operation::Jmpz, AddressingMode::Direct, -1);
        assert_eq!("01011001  FFFFFFFF", jmpz.bits());
    }
}
