use std::fmt;

/*
 * CPU registers
 * accumulator: the general purpose signed register.
 * program counter: index of the next instruction in code memory. Execution
 * may set it out of the code address space, this is detected at the next fetch.
 */
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Registers {
    pub accumulator: i32,
    pub program_counter: i32,
}

impl Registers {
    pub fn new(program_counter: i32) -> Registers {
        Registers {
            accumulator: 0,
            program_counter,
        }
    }

    pub fn initialize(&mut self) {
        self.accumulator = 0;
        self.program_counter = 0;
    }

    pub fn increment_program_counter(&mut self) {
        self.program_counter = self.program_counter.wrapping_add(1);
    }

    pub fn format(&self) -> String {
        format!(
            "[A=0x{:08x}][PC=0x{:02x}]",
            self.accumulator, self.program_counter
        )
    }
}

impl fmt::Display for Registers {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "Registers [A={:>11}] [PC={:>4}]",
            self.accumulator, self.program_counter
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initialize() {
        let mut registers = Registers::new(0x12);
        registers.accumulator = -4;
        registers.initialize();

        assert_eq!(Registers::default(), registers);
    }

    #[test]
    fn test_format() {
        let mut registers = Registers::new(0x03);
        registers.accumulator = 12;
        assert_eq!("[A=0x0000000c][PC=0x03]", registers.format());

        registers.accumulator = -1;
        assert_eq!("[A=0xffffffff][PC=0x03]", registers.format());
    }

    #[test]
    fn test_display() {
        let registers = Registers::new(5);

        assert_eq!("Registers [A=          0] [PC=   5]", registers.to_string());
    }
}
