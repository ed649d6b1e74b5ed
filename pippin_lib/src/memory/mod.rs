use super::instruction::Instruction;
use std::fmt;

mod error;

pub use error::MemoryError;

pub const CODE_SIZE: usize = 256;
pub const DATA_SIZE: usize = 512;

pub type Result<T> = std::result::Result<T, MemoryError>;

/*
 * Memory
 * Two separate address spaces: the code space holds instructions, unset
 * slots are None; the data space holds signed words initialized to 0.
 */
pub struct Memory {
    code: Box<[Option<Instruction>; CODE_SIZE]>,
    data: Box<[i32; DATA_SIZE]>,
    program_size: usize,
    changed_data_index: Option<usize>,
}

impl Default for Memory {
    fn default() -> Self {
        Self::new()
    }
}

impl Memory {
    pub fn new() -> Memory {
        Memory {
            code: Box::new([None; CODE_SIZE]),
            data: Box::new([0; DATA_SIZE]),
            program_size: 0,
            changed_data_index: None,
        }
    }

    fn code_index(index: i32) -> Result<usize> {
        match usize::try_from(index) {
            Ok(addr) if addr < CODE_SIZE => Ok(addr),
            _ => Err(MemoryError::CodeAccess(index)),
        }
    }

    fn data_index(index: i32) -> Result<usize> {
        match usize::try_from(index) {
            Ok(addr) if addr < DATA_SIZE => Ok(addr),
            _ => Err(MemoryError::DataAccess(index)),
        }
    }

    pub fn read_code(&self, index: i32) -> Result<Instruction> {
        let addr = Self::code_index(index)?;

        self.code[addr].ok_or(MemoryError::UnsetCode(addr))
    }

    pub fn write_code(&mut self, index: usize, instruction: Instruction) -> Result<()> {
        if index >= CODE_SIZE {
            return Err(MemoryError::CodeAccess(
                i32::try_from(index).unwrap_or(i32::MAX),
            ));
        }
        self.code[index] = Some(instruction);
        self.program_size = self.program_size.max(index);

        Ok(())
    }

    pub fn read_code_range(&self, min: usize, max: usize) -> Result<Vec<Option<Instruction>>> {
        if min > max || max > CODE_SIZE {
            return Err(MemoryError::RangeAccess(min, max));
        }

        Ok(self.code[min..max].to_vec())
    }

    pub fn read_data(&self, index: i32) -> Result<i32> {
        Ok(self.data[Self::data_index(index)?])
    }

    pub fn write_data(&mut self, index: i32, value: i32) -> Result<()> {
        let addr = Self::data_index(index)?;
        self.data[addr] = value;
        self.changed_data_index = Some(addr);

        Ok(())
    }

    pub fn read_data_range(&self, min: usize, max: usize) -> Result<Vec<i32>> {
        if min > max || max > DATA_SIZE {
            return Err(MemoryError::RangeAccess(min, max));
        }

        Ok(self.data[min..max].to_vec())
    }

    pub fn clear_code(&mut self) {
        self.code.iter_mut().for_each(|slot| *slot = None);
        self.program_size = 0;
    }

    pub fn clear_data(&mut self) {
        self.data.iter_mut().for_each(|cell| *cell = 0);
        self.changed_data_index = None;
    }

    /// Highest code address written so far.
    pub fn program_size(&self) -> usize {
        self.program_size
    }

    pub fn set_program_size(&mut self, program_size: usize) {
        self.program_size = program_size;
    }

    /// Last data address written, for observers.
    pub fn changed_data_index(&self) -> Option<usize> {
        self.changed_data_index
    }
}

impl fmt::Debug for Memory {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "Memory code={} slots (program size {}), data={} words, last changed data={:?}",
            self.code.iter().filter(|slot| slot.is_some()).count(),
            self.program_size,
            DATA_SIZE,
            self.changed_data_index
        )
    }
}
