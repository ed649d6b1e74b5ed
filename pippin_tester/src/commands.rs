use anyhow::anyhow;
use pippin_lib::{Instruction, Machine, SyntaxValidator};
use std::path::PathBuf;

use crate::{
    pippin_binary::PippinBinary,
    until_condition::{Assignment, BooleanExpression},
    AppResult,
};

pub const DEFAULT_MAX_STEPS: usize = 10_000;

#[derive(Debug)]
pub enum OutputToken {
    Assertion {
        failure: Option<String>,
        description: String,
    },
    Marker {
        description: String,
    },
    Failure {
        message: String,
    },
    Run {
        loglines: Vec<String>,
        fault: Option<String>,
    },
    Setup(Vec<String>),
}

pub trait Command {
    fn execute(&self, machine: &mut Machine) -> AppResult<OutputToken>;
}

#[derive(Debug)]
pub enum CliCommand {
    Assert(AssertCommand),
    Code(CodeCommand),
    Marker(String),
    Memory(MemoryCommand),
    None,
    Registers(RegisterCommand),
    Run(RunCommand),
    Source(SourceCommand),
}

impl Command for CliCommand {
    fn execute(&self, machine: &mut Machine) -> AppResult<OutputToken> {
        match self {
            Self::Assert(command) => command.execute(machine),
            Self::Code(command) => command.execute(machine),
            Self::Marker(comment) => Ok(OutputToken::Marker {
                description: comment.to_owned(),
            }),
            Self::Memory(command) => command.execute(machine),
            Self::None => Ok(OutputToken::Setup(Vec::new())),
            Self::Registers(command) => command.execute(machine),
            Self::Run(command) => command.execute(machine),
            Self::Source(command) => command.execute(machine),
        }
    }
}

#[derive(Debug)]
pub struct AssertCommand {
    pub condition: BooleanExpression,
    pub comment: String,
}

impl Command for AssertCommand {
    fn execute(&self, machine: &mut Machine) -> AppResult<OutputToken> {
        let token = OutputToken::Assertion {
            failure: self.condition.solve(machine)?,
            description: self.comment.to_owned(),
        };

        Ok(token)
    }
}

#[derive(Debug)]
pub struct RunCommand {
    pub stop_condition: BooleanExpression,
    pub start_address: Option<i32>,
    pub max_steps: usize,
}

impl Command for RunCommand {
    fn execute(&self, machine: &mut Machine) -> AppResult<OutputToken> {
        if let Some(addr) = self.start_address {
            machine.set_program_counter(addr);
        }

        let mut loglines: Vec<String> = Vec::new();
        let mut fault = None;

        while loglines.len() < self.max_steps {
            match machine.step() {
                Ok(log_line) => loglines.push(log_line.to_string()),
                Err(e) => {
                    fault = Some(e.to_string());
                    break;
                }
            }

            if machine.is_halted() || self.stop_condition.solve(machine)?.is_none() {
                break;
            }
        }

        Ok(OutputToken::Run { loglines, fault })
    }
}

#[derive(Debug)]
pub enum RegisterCommand {
    Flush,
    Set(Assignment),
}

impl Command for RegisterCommand {
    fn execute(&self, machine: &mut Machine) -> AppResult<OutputToken> {
        let output = match self {
            Self::Flush => {
                machine.registers_mut().initialize();
                Vec::new()
            }
            Self::Set(assignment) => assignment.execute(machine)?,
        };

        Ok(OutputToken::Setup(output))
    }
}

#[derive(Debug)]
pub enum MemoryCommand {
    Flush,
    Load(PathBuf),
    Write { address: usize, words: Vec<i32> },
}

impl Command for MemoryCommand {
    fn execute(&self, machine: &mut Machine) -> AppResult<OutputToken> {
        let output = match self {
            Self::Flush => {
                machine.clear();
                Vec::new()
            }
            Self::Load(filepath) => {
                let binary = PippinBinary::from_file(filepath)?;
                binary.load(machine)?;

                vec![format!(
                    "{} instructions and {} data words loaded from '{}'",
                    binary.code.len(),
                    binary.data.len(),
                    filepath.display()
                )]
            }
            Self::Write { address, words } => {
                for (offset, word) in words.iter().enumerate() {
                    let index = address
                        .checked_add(offset)
                        .and_then(|addr| i32::try_from(addr).ok())
                        .ok_or_else(|| {
                            anyhow!("data address #0x{address:04X} is out of range")
                        })?;
                    machine.write_data(index, *word)?;
                }

                match words.len() {
                    0 => vec!["nothing was written".to_string()],
                    1 => vec!["1 word written".to_string()],
                    n => vec![format!("{n} words written")],
                }
            }
        };

        Ok(OutputToken::Setup(output))
    }
}

#[derive(Debug)]
pub enum CodeCommand {
    Write {
        address: usize,
        instructions: Vec<Instruction>,
    },
}

impl Command for CodeCommand {
    fn execute(&self, machine: &mut Machine) -> AppResult<OutputToken> {
        let output = match self {
            Self::Write {
                address,
                instructions,
            } => {
                for (offset, instruction) in instructions.iter().enumerate() {
                    let index = address
                        .checked_add(offset)
                        .ok_or_else(|| {
                            anyhow!("code address #0x{address:02X} is out of range")
                        })?;
                    machine.write_code(index, *instruction)?;
                }

                match instructions.len() {
                    1 => vec!["1 instruction written".to_string()],
                    n => vec![format!("{n} instructions written")],
                }
            }
        };

        Ok(OutputToken::Setup(output))
    }
}

#[derive(Debug)]
pub enum SourceCommand {
    Check(PathBuf),
}

impl Command for SourceCommand {
    fn execute(&self, _machine: &mut Machine) -> AppResult<OutputToken> {
        match self {
            Self::Check(filepath) => {
                let report = SyntaxValidator::validate_file(filepath);
                let failure = if report.is_clean() {
                    None
                } else {
                    Some(report.messages())
                };

                Ok(OutputToken::Assertion {
                    failure,
                    description: format!("source '{}' is valid", filepath.display()),
                })
            }
        }
    }
}

#[cfg(test)]
mod assert_command_tests {
    use super::*;

    #[test]
    fn test_assert_command_ok() {
        let command = AssertCommand {
            condition: BooleanExpression::Value(true),
            comment: "nice comment".to_string(),
        };
        let mut machine = Machine::new();

        match command.execute(&mut machine).unwrap() {
            OutputToken::Assertion {
                failure,
                description,
            } => {
                assert!(failure.is_none());
                assert_eq!("nice comment", description);
            }
            token => panic!("unexpected token {token:?}"),
        };
    }

    #[test]
    fn test_assert_command_fails() {
        let command = AssertCommand {
            condition: BooleanExpression::Value(false),
            comment: "nice comment".to_string(),
        };
        let mut machine = Machine::new();
        let token = command.execute(&mut machine).unwrap();

        assert!(matches!(token, OutputToken::Assertion { failure, .. } if failure.is_some()));
    }
}


#[cfg(test)]
mod register_command_tests {
    use super::*;
    use crate::until_condition::{RegisterSource, Source};

    #[test]
    fn test_flush() {
        let command = RegisterCommand::Flush;
        let mut machine = Machine::new();
        machine.set_program_counter(0x12);
        machine.set_accumulator(-3);
        let token = command.execute(&mut machine).unwrap();

        assert!(matches!(token, OutputToken::Setup(lines) if lines.is_empty()));
        assert_eq!(0, machine.program_counter());
        assert_eq!(0, machine.accumulator());
    }

    #[test]
    fn test_set() {
        let command = RegisterCommand::Set(Assignment::new(
            Source::Value(0x0c),
            RegisterSource::Accumulator,
        ));
        let mut machine = Machine::new();
        let token = command.execute(&mut machine).unwrap();

        assert!(
            matches!(token, OutputToken::Setup(lines) if lines == vec!["register A set to 0x0000000c".to_string()])
        );
        assert_eq!(0x0c, machine.accumulator());
    }
}



#[cfg(test)]
mod cli_command_tests {
    use crate::CliCommandParser;

    use super::*;

    #[test]
    fn test_assertion() {
        let mut machine = Machine::new();
        let token = CliCommandParser::from("assert #0x0000 = 0x00 $$The first word is zero$$")
            .unwrap()
            .execute(&mut machine)
            .unwrap();

        assert!(
            matches!(token, OutputToken::Assertion { failure: None, description } if description == "The first word is zero")
        );
    }

    #[test]
    fn test_bad_assertion() {
        let mut machine = Machine::new();
        let token =
            CliCommandParser::from("assert #0x0000 = 0x01 $$The first word is one, really?$$")
                .unwrap()
                .execute(&mut machine)
                .unwrap();

        assert!(matches!(token, OutputToken::Assertion { failure: Some(_), .. }));
    }
}
