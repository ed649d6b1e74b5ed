use anyhow::anyhow;
use pippin_lib::{Instruction, Machine};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::utils::{parse_opcode, parse_word};
use crate::AppResult;

const CODE_DATA_SEPARATOR: &str = "-1";

/*
 * PippinBinary
 * Text image produced by the assembler: one `OPCODE ARG` line per code slot
 * starting at address 0, a `-1` separator line, then `ADDRESS VALUE` data
 * lines. All numbers are hexadecimal.
 */
#[derive(Debug, Default, PartialEq)]
pub struct PippinBinary {
    pub code: Vec<Instruction>,
    pub data: Vec<(i32, i32)>,
}

impl PippinBinary {
    pub fn from_file<P: AsRef<Path>>(path: P) -> AppResult<Self> {
        let file = File::open(path.as_ref())
            .map_err(|e| anyhow!("could not open '{}': {e}", path.as_ref().display()))?;

        Self::from_reader(BufReader::new(file))
    }

    pub fn from_reader<B: BufRead>(reader: B) -> AppResult<Self> {
        let mut binary = PippinBinary::default();
        let mut reading_code = true;

        for (index, line) in reader.lines().enumerate() {
            let line = line?;
            let line = line.trim();

            if line.is_empty() {
                continue;
            }
            if reading_code && line == CODE_DATA_SEPARATOR {
                reading_code = false;
                continue;
            }

            let parts: Vec<&str> = line.split_whitespace().collect();
            if parts.len() != 2 {
                return Err(anyhow!(
                    "line {}: expected 2 hexadecimal fields, got '{line}'",
                    index + 1
                ));
            }

            let at_line = |e: anyhow::Error| anyhow!("line {}: {e}", index + 1);

            if reading_code {
                let opcode = parse_opcode(parts[0]).map_err(at_line)?;
                let arg = parse_word(parts[1]).map_err(at_line)?;
                binary.code.push(Instruction::new(opcode, arg));
            } else {
                let address = parse_word(parts[0]).map_err(at_line)?;
                let value = parse_word(parts[1]).map_err(at_line)?;
                binary.data.push((address, value));
            }
        }

        Ok(binary)
    }

    /// Write the image in the machine memory, the program size is the number of code lines.
    pub fn load(&self, machine: &mut Machine) -> AppResult<()> {
        for (addr, instruction) in self.code.iter().enumerate() {
            machine.write_code(addr, *instruction)?;
        }
        for (address, value) in self.data.iter() {
            machine.write_data(*address, *value)?;
        }
        machine.memory_mut().set_program_size(self.code.len());

        Ok(())
    }
}
