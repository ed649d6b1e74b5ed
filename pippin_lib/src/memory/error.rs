use std::error;
use std::fmt;

#[derive(Debug, Eq, PartialEq, Copy, Clone, Hash)]
pub enum MemoryError {
    CodeAccess(i32),           // code address out of range
    UnsetCode(usize),          // code address never written
    DataAccess(i32),           // data address out of range
    RangeAccess(usize, usize), // range start, range end
}

impl fmt::Display for MemoryError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            MemoryError::CodeAccess(addr) => write!(
                f,
                "illegal access to code at address {}, code address max is 0x{:02X}",
                addr,
                super::CODE_SIZE - 1
            ),
            MemoryError::UnsetCode(addr) => {
                write!(f, "illegal access to code at address 0x{:02X}, no instruction there", addr)
            }
            MemoryError::DataAccess(addr) => write!(
                f,
                "illegal access to data at address {}, data address max is 0x{:03X}",
                addr,
                super::DATA_SIZE - 1
            ),
            MemoryError::RangeAccess(min, max) => {
                write!(f, "could not READ range 0x{:03X} → 0x{:03X}", min, max)
            }
        }
    }
}

impl error::Error for MemoryError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        None
    }
}
