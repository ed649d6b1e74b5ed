use super::instruction::FLAGS_MASK;
use super::memory::{Memory, MemoryError};
use num_enum::{IntoPrimitive, TryFromPrimitive};
use std::error;
use std::fmt;

pub type Result<T> = std::result::Result<T, ResolutionError>;

#[derive(Debug, Eq, PartialEq, Copy, Clone, Hash)]
pub enum ResolutionError {
    Memory(MemoryError),
}

impl fmt::Display for ResolutionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            ResolutionError::Memory(e) => {
                write!(f, "memory error during addressing mode resolution: {}", e)
            }
        }
    }
}

impl error::Error for ResolutionError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        None
    }
}

impl std::convert::From<MemoryError> for ResolutionError {
    fn from(err: MemoryError) -> ResolutionError {
        ResolutionError::Memory(err)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AddressingModeResolution {
    pub addressing_mode: AddressingMode,
    pub target_address: Option<i32>,
    pub value: i32,
}

impl AddressingModeResolution {
    fn new(addressing_mode: AddressingMode, target_address: Option<i32>, value: i32) -> Self {
        AddressingModeResolution {
            addressing_mode,
            target_address,
            value,
        }
    }
}

/*
 * The two flag bits of the opcode (bits 2 and 1).
 * The `&` mode only means something to the jump family where it reads the
 * destination from the data memory.
 */
#[derive(Debug, Eq, PartialEq, Copy, Clone, Hash, TryFromPrimitive, IntoPrimitive)]
#[repr(u8)]
pub enum AddressingMode {
    Direct = 0,
    Immediate = 1,
    Indirect = 2,
    IndirectAbsolute = 3,
}

impl AddressingMode {
    pub fn from_opcode(opcode: u8) -> AddressingMode {
        match (opcode & FLAGS_MASK) >> 1 {
            0 => AddressingMode::Direct,
            1 => AddressingMode::Immediate,
            2 => AddressingMode::Indirect,
            _ => AddressingMode::IndirectAbsolute,
        }
    }

    pub fn flags(&self) -> u8 {
        Into::<u8>::into(*self)
    }

    /// Source text prefix of the argument.
    pub fn prefix(&self) -> &'static str {
        match *self {
            AddressingMode::Direct => "",
            AddressingMode::Immediate => "#",
            AddressingMode::Indirect => "@",
            AddressingMode::IndirectAbsolute => "&",
        }
    }

    pub fn from_prefix(token: &str) -> (AddressingMode, &str) {
        match token.chars().next() {
            Some('#') => (AddressingMode::Immediate, &token[1..]),
            Some('@') => (AddressingMode::Indirect, &token[1..]),
            Some('&') => (AddressingMode::IndirectAbsolute, &token[1..]),
            _ => (AddressingMode::Direct, token),
        }
    }

    /*
     * solve
     * Fetch the data cell designated by the argument. `&` designates the cell
     * at `arg` like Direct does, the jump family reads its destination there.
     */
    pub fn solve(&self, arg: i32, memory: &Memory) -> Result<AddressingModeResolution> {
        match *self {
            AddressingMode::Direct | AddressingMode::IndirectAbsolute => {
                Ok(AddressingModeResolution::new(
                    *self,
                    Some(arg),
                    memory.read_data(arg)?,
                ))
            }
            AddressingMode::Immediate => Ok(AddressingModeResolution::new(*self, None, arg)),
            AddressingMode::Indirect => {
                let target_address = memory.read_data(arg)?;

                Ok(AddressingModeResolution::new(
                    *self,
                    Some(target_address),
                    memory.read_data(target_address)?,
                ))
            }
        }
    }
}

impl fmt::Display for AddressingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02b}", self.flags())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_opcode() {
        assert_eq!(AddressingMode::Direct, AddressingMode::from_opcode(0b00011000));
        assert_eq!(AddressingMode::Immediate, AddressingMode::from_opcode(0b00011011));
        assert_eq!(AddressingMode::Indirect, AddressingMode::from_opcode(0b00011101));
        assert_eq!(AddressingMode::IndirectAbsolute, AddressingMode::from_opcode(0b01010110));
    }

    #[test]
    fn test_flag_bits() {
        assert_eq!("00", AddressingMode::Direct.to_string());
        assert_eq!("01", AddressingMode::Immediate.to_string());
        assert_eq!("10", AddressingMode::Indirect.to_string());
        assert_eq!("11", AddressingMode::IndirectAbsolute.to_string());
    }

    #[test]
    fn test_from_prefix() {
        assert_eq!((AddressingMode::Immediate, "1A"), AddressingMode::from_prefix("#1A"));
        assert_eq!((AddressingMode::Indirect, "1A"), AddressingMode::from_prefix("@1A"));
        assert_eq!((AddressingMode::IndirectAbsolute, "-3"), AddressingMode::from_prefix("&-3"));
        assert_eq!((AddressingMode::Direct, "1A"), AddressingMode::from_prefix("1A"));
        assert_eq!((AddressingMode::Immediate, ""), AddressingMode::from_prefix("#"));
    }

    #[test]
    fn test_solve() {
        let mut memory = Memory::new();
        memory.write_data(3, 7).unwrap();
        memory.write_data(7, 42).unwrap();

        let resolution = AddressingMode::Direct.solve(3, &memory).unwrap();
        assert_eq!(Some(3), resolution.target_address);
        assert_eq!(7, resolution.value);

        let resolution = AddressingMode::Immediate.solve(3, &memory).unwrap();
        assert_eq!(None, resolution.target_address);
        assert_eq!(3, resolution.value);

        let resolution = AddressingMode::Indirect.solve(3, &memory).unwrap();
        assert_eq!(Some(7), resolution.target_address);
        assert_eq!(42, resolution.value);

        let resolution = AddressingMode::IndirectAbsolute.solve(3, &memory).unwrap();
        assert_eq!(Some(3), resolution.target_address);
        assert_eq!(7, resolution.value);
    }

    #[test]
    fn test_solve_out_of_data_memory() {
        let memory = Memory::new();

        assert_eq!(
            ResolutionError::Memory(MemoryError::DataAccess(512)),
            AddressingMode::Direct.solve(512, &memory).unwrap_err()
        );
    }
}
