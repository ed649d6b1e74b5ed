use anyhow::anyhow;
use pippin_lib::Machine;
use std::fmt::{self};

use crate::AppResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegisterSource {
    Accumulator,
    ProgramCounter,
}

impl RegisterSource {
    pub fn get_value(&self, machine: &Machine) -> i32 {
        match self {
            Self::Accumulator => machine.accumulator(),
            Self::ProgramCounter => machine.program_counter(),
        }
    }
}

impl fmt::Display for RegisterSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Accumulator => write!(f, "A"),
            Self::ProgramCounter => write!(f, "PC"),
        }
    }
}

#[derive(Debug)]
pub struct Assignment {
    pub source: Source,
    pub destination: RegisterSource,
}

impl Assignment {
    pub fn new(source: Source, destination: RegisterSource) -> Self {
        Self {
            source,
            destination,
        }
    }

    pub fn execute(&self, machine: &mut Machine) -> AppResult<Vec<String>> {
        let val = self.source.get_value(machine)?;
        let output = match self.destination {
            RegisterSource::Accumulator => {
                machine.set_accumulator(val);

                format!("register A set to 0x{val:08x}")
            }
            RegisterSource::ProgramCounter => {
                machine.set_program_counter(val);

                format!("register PC set to #0x{val:02x}")
            }
        };

        Ok(vec![output])
    }
}


#[derive(Debug)]
pub enum Source {
    Register(RegisterSource),
    Memory(usize),
    Value(i32),
}

impl Source {
    pub fn get_value(&self, machine: &Machine) -> AppResult<i32> {
        match self {
            Self::Register(register_source) => Ok(register_source.get_value(machine)),
            Self::Memory(addr) => {
                let index = i32::try_from(*addr)
                    .map_err(|_| anyhow!("data address #0x{addr:04X} is out of range"))?;

                machine.read_data(index).map_err(|e| anyhow!(e))
            }
            Self::Value(data) => Ok(*data),
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Register(register_source) => write!(f, "{register_source}"),
            Self::Memory(addr) => write!(f, "#0x{addr:04X}"),
            Self::Value(data) => write!(f, "0x{data:02X}"),
        }
    }
}

#[derive(Debug)]
pub enum BooleanExpression {
    Equal(Source, Source),
    GreaterOrEqual(Source, Source),
    StrictlyGreater(Source, Source),
    LesserOrEqual(Source, Source),
    StrictlyLesser(Source, Source),
    Different(Source, Source),
    Value(bool),
    Halted,
    And(Box<BooleanExpression>, Box<BooleanExpression>),
    Or(Box<BooleanExpression>, Box<BooleanExpression>),
}

impl BooleanExpression {
    fn compare(
        &self,
        left: &Source,
        right: &Source,
        machine: &Machine,
        holds: fn(i32, i32) -> bool,
        relation: &str,
    ) -> AppResult<Option<String>> {
        let left_value = left.get_value(machine)?;
        let right_value = right.get_value(machine)?;

        if holds(left_value, right_value) {
            Ok(None)
        } else {
            Ok(Some(format!(
                "({self}) {left_value} is not {relation} {right_value}"
            )))
        }
    }

    /// Solve the boolean expression against the machine state.
    /// If the expression is true, None is returned. Otherwise, the failure message is returned.
    pub fn solve(&self, machine: &Machine) -> AppResult<Option<String>> {
        match self {
            BooleanExpression::Equal(left, right) => {
                self.compare(left, right, machine, |l, r| l == r, "equal to")
            }
            BooleanExpression::GreaterOrEqual(left, right) => self.compare(
                left,
                right,
                machine,
                |l, r| l >= r,
                "greater than or equal to",
            ),
            BooleanExpression::StrictlyGreater(left, right) => self.compare(
                left,
                right,
                machine,
                |l, r| l > r,
                "strictly greater than",
            ),
            BooleanExpression::LesserOrEqual(left, right) => self.compare(
                left,
                right,
                machine,
                |l, r| l <= r,
                "lesser than or equal to",
            ),
            BooleanExpression::StrictlyLesser(left, right) => self.compare(
                left,
                right,
                machine,
                |l, r| l < r,
                "strictly lesser than",
            ),
            BooleanExpression::Different(left, right) => {
                self.compare(left, right, machine, |l, r| l != r, "different than")
            }
            BooleanExpression::Value(val) => {
                if !*val {
                    Ok(Some("value is false".to_string()))
                } else {
                    Ok(None)
                }
            }
            BooleanExpression::Halted => {
                if machine.is_halted() {
                    Ok(None)
                } else {
                    Ok(Some("the machine is not halted".to_string()))
                }
            }
            BooleanExpression::And(expr1, expr2) => match expr1.solve(machine)? {
                Some(failure) => Ok(Some(failure)),
                None => expr2.solve(machine),
            },
            BooleanExpression::Or(expr1, expr2) => match expr1.solve(machine)? {
                None => Ok(None),
                Some(failure) => Ok(expr2
                    .solve(machine)?
                    .map(|other| format!("{failure} and {other}"))),
            },
        }
    }
}

impl fmt::Display for BooleanExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BooleanExpression::Equal(left, right) => write!(f, "{left} = {right}"),
            BooleanExpression::GreaterOrEqual(left, right) => {
                write!(f, "{left} ≥ {right}")
            }
            BooleanExpression::StrictlyGreater(left, right) => {
                write!(f, "{left} > {right}")
            }
            BooleanExpression::LesserOrEqual(left, right) => {
                write!(f, "{left} ≤ {right}")
            }
            BooleanExpression::StrictlyLesser(left, right) => {
                write!(f, "{left} < {right}")
            }
            BooleanExpression::Different(left, right) => {
                write!(f, "{left} ≠ {right}")
            }
            BooleanExpression::Value(val) => {
                write!(f, "{}", if *val { "true" } else { "false" })
            }
            BooleanExpression::Halted => write!(f, "halted"),
            BooleanExpression::And(expr1, expr2) => {
                write!(f, "{expr1} AND {expr2}")
            }
            BooleanExpression::Or(expr1, expr2) => {
                write!(f, "({expr1} OR {expr2})")
            }
        }
    }
}

#[cfg(test)]
mod tests_boolean_expression {
    use super::*;

    #[test]
    fn test_equal() {
        let boolex = BooleanExpression::Equal(
            Source::Register(RegisterSource::Accumulator),
            Source::Value(0x2a),
        );
        let mut machine = Machine::new();
        machine.set_accumulator(0x2a);

        assert!(boolex.solve(&machine).unwrap().is_none());
    }

    #[test]
    fn test_signed_comparison() {
        let boolex = BooleanExpression::StrictlyLesser(Source::Memory(0x01), Source::Value(0));
        let mut machine = Machine::new();
        machine.write_data(0x01, -5).unwrap();

        assert!(boolex.solve(&machine).unwrap().is_none());
    }

    #[test]
    fn test_failure_message() {
        let boolex = BooleanExpression::Different(
            Source::Register(RegisterSource::ProgramCounter),
            Source::Value(0),
        );
        let machine = Machine::new();

        assert_eq!(
            Some("(PC ≠ 0x00) 0 is not different than 0".to_string()),
            boolex.solve(&machine).unwrap()
        );
    }

    #[test]
    fn test_halted() {
        let machine = Machine::new();

        assert!(BooleanExpression::Halted.solve(&machine).unwrap().is_some());
    }

    #[test]
    fn test_and_or() {
        let machine = Machine::new();
        let and = BooleanExpression::And(
            Box::new(BooleanExpression::Value(true)),
            Box::new(BooleanExpression::Value(false)),
        );
        let or = BooleanExpression::Or(
            Box::new(BooleanExpression::Value(false)),
            Box::new(BooleanExpression::Value(true)),
        );

        assert!(and.solve(&machine).unwrap().is_some());
        assert!(or.solve(&machine).unwrap().is_none());
    }

    #[test]
    fn test_memory_out_of_range() {
        let boolex = BooleanExpression::Equal(Source::Memory(0x200), Source::Value(0));
        let machine = Machine::new();

        boolex
            .solve(&machine)
            .expect_err("data address 0x200 does not exist");
    }
}
