use anyhow::anyhow;
use pest::{
    iterators::{Pair, Pairs},
    Parser,
};
use pest_derive::Parser;
use pippin_lib::Instruction;
use std::path::PathBuf;

use crate::{
    commands::*,
    until_condition::{Assignment, BooleanExpression, RegisterSource, Source},
    utils::{parse_address, parse_opcode, parse_word},
    AppResult,
};

#[derive(Parser)]
#[grammar = "../rules.pest"]
struct PestParser;

fn next_pair<'a>(pairs: &mut Pairs<'a, Rule>, expected: &str) -> AppResult<Pair<'a, Rule>> {
    pairs
        .next()
        .ok_or_else(|| anyhow!("{expected} expected. Is the Pest grammar up to date?"))
}

fn unexpected<T>(pair: &Pair<'_, Rule>, expected: &str) -> AppResult<T> {
    Err(anyhow!(
        "unexpected node {:?} '{}', {expected} expected.",
        pair.as_rule(),
        pair.as_str()
    ))
}

fn parse_filename(pair: Pair<'_, Rule>) -> AppResult<PathBuf> {
    let text = next_pair(&mut pair.into_inner(), "a file name")?;

    Ok(PathBuf::from(text.as_str()))
}

pub struct MemoryCommandParser;

impl MemoryCommandParser {
    pub fn from_pairs(pairs: Pairs<'_, Rule>) -> AppResult<MemoryCommand> {
        let mut pairs = pairs;
        let pair = next_pair(&mut pairs, "memory_{load,flush,write}")?;

        let command = match pair.as_rule() {
            Rule::memory_flush => MemoryCommand::Flush,
            Rule::memory_load => {
                let filename = next_pair(&mut pair.into_inner(), "a file name")?;
                MemoryCommand::Load(parse_filename(filename)?)
            }
            Rule::memory_write => {
                let mut pairs = pair.into_inner();
                let address = parse_memory(&next_pair(&mut pairs, "a memory address")?)?;
                let words = next_pair(&mut pairs, "a list of words")?
                    .into_inner()
                    .map(|word| parse_word(word.as_str()))
                    .collect::<AppResult<Vec<i32>>>()?;

                MemoryCommand::Write { address, words }
            }
            _ => return unexpected(&pair, "memory_{load,flush,write}"),
        };

        Ok(command)
    }
}


pub struct CodeCommandParser;

impl CodeCommandParser {
    pub fn from_pairs(pairs: Pairs<'_, Rule>) -> AppResult<CodeCommand> {
        let mut pairs = pairs;
        let pair = next_pair(&mut pairs, "code_write")?;

        let command = match pair.as_rule() {
            Rule::code_write => {
                let mut pairs = pair.into_inner();
                let address = parse_memory(&next_pair(&mut pairs, "a code address")?)?;
                let instructions = next_pair(&mut pairs, "a list of instructions")?
                    .into_inner()
                    .map(parse_instruction)
                    .collect::<AppResult<Vec<Instruction>>>()?;

                CodeCommand::Write {
                    address,
                    instructions,
                }
            }
            _ => return unexpected(&pair, "code_write"),
        };

        Ok(command)
    }
}

fn parse_instruction(pair: Pair<'_, Rule>) -> AppResult<Instruction> {
    let mut pairs = pair.into_inner();
    let opcode = parse_opcode(next_pair(&mut pairs, "an opcode")?.as_str())?;
    let arg = parse_word(next_pair(&mut pairs, "an argument")?.as_str())?;

    Ok(Instruction::new(opcode, arg))
}

#[cfg(test)]
mod code_command_parser_tests {
    use super::*;

    #[test]
    fn test_code_write() {
        let input = "code write #0x00 0x(1b:0c, 10:-1)";
        let pairs = PestParser::parse(Rule::code_instruction, input)
            .unwrap()
            .next()
            .unwrap()
            .into_inner();
        let command = CodeCommandParser::from_pairs(pairs).unwrap();

        assert!(matches!(
            command,
            CodeCommand::Write { address, instructions }
                if address == 0 && instructions == vec![Instruction::new(0x1b, 0x0c), Instruction::new(0x10, -1)]
        ));
    }
}

pub struct RegisterCommandParser;

impl RegisterCommandParser {
    pub fn from_pairs(pairs: Pairs<'_, Rule>) -> AppResult<RegisterCommand> {
        let mut pairs = pairs;
        let pair = next_pair(&mut pairs, "registers_{flush,set}")?;

        let command = match pair.as_rule() {
            Rule::registers_flush => RegisterCommand::Flush,
            Rule::registers_set => {
                let mut pairs = pair.into_inner();
                let destination = parse_register(&next_pair(&mut pairs, "a register")?)?;
                let source = parse_source_value(&next_pair(&mut pairs, "a value")?)?;

                RegisterCommand::Set(Assignment::new(source, destination))
            }
            _ => return unexpected(&pair, "registers_{flush,set}"),
        };

        Ok(command)
    }
}


pub struct RunCommandParser;

impl RunCommandParser {
    pub fn from_pairs(pairs: Pairs<'_, Rule>) -> AppResult<RunCommand> {
        let mut start_address = None;
        let mut stop_condition = BooleanExpression::Value(false);

        for pair in pairs {
            match pair.as_rule() {
                Rule::memory_address => {
                    let address = parse_memory(&pair)?;
                    start_address = Some(
                        i32::try_from(address)
                            .map_err(|_| anyhow!("code address {address:#x} is out of range"))?,
                    );
                }
                Rule::run_until_condition => {
                    let condition = next_pair(&mut pair.into_inner(), "a boolean condition")?;
                    stop_condition = parse_boolean_condition(condition.into_inner())?;
                }
                _ => return unexpected(&pair, "memory address or until condition"),
            }
        }

        Ok(RunCommand {
            stop_condition,
            start_address,
            max_steps: DEFAULT_MAX_STEPS,
        })
    }
}


pub struct AssertCommandParser;

impl AssertCommandParser {
    pub fn from_pairs(mut pairs: Pairs<'_, Rule>) -> AppResult<AssertCommand> {
        let condition =
            parse_boolean_condition(next_pair(&mut pairs, "a boolean condition")?.into_inner())?;
        let description = next_pair(&mut pairs, "a description")?;
        let comment = next_pair(&mut description.into_inner(), "a description text")?
            .as_str()
            .to_string();

        Ok(AssertCommand { comment, condition })
    }
}


pub struct CliCommandParser;

impl CliCommandParser {
    pub fn from(line: &str) -> AppResult<CliCommand> {
        let line = line.trim();

        if line.is_empty() {
            return Ok(CliCommand::None);
        }

        let pair = next_pair(&mut PestParser::parse(Rule::sentence, line)?, "a sentence")?;

        // comments are ignored
        if pair.as_rule() == Rule::EOI {
            return Ok(CliCommand::None);
        }

        let pair = next_pair(&mut pair.into_inner(), "an instruction")?;

        let command = match pair.as_rule() {
            Rule::run_instruction => {
                CliCommand::Run(RunCommandParser::from_pairs(pair.into_inner())?)
            }
            Rule::assert_instruction => {
                CliCommand::Assert(AssertCommandParser::from_pairs(pair.into_inner())?)
            }
            Rule::marker => {
                let description = next_pair(&mut pair.into_inner(), "a description")?;
                let marker = next_pair(&mut description.into_inner(), "a description text")?;
                CliCommand::Marker(marker.as_str().to_owned())
            }
            Rule::registers_instruction => {
                CliCommand::Registers(RegisterCommandParser::from_pairs(pair.into_inner())?)
            }
            Rule::memory_instruction => {
                CliCommand::Memory(MemoryCommandParser::from_pairs(pair.into_inner())?)
            }
            Rule::code_instruction => {
                CliCommand::Code(CodeCommandParser::from_pairs(pair.into_inner())?)
            }
            Rule::source_instruction => {
                let filename = next_pair(&mut pair.into_inner(), "a file name")?;
                CliCommand::Source(SourceCommand::Check(parse_filename(filename)?))
            }
            _ => {
                return unexpected(
                    &pair,
                    "'registers|memory|code|source|run|assert|marker' instruction",
                )
            }
        };

        Ok(command)
    }
}


fn parse_memory(pair: &Pair<Rule>) -> AppResult<usize> {
    parse_address(&pair.as_str()[3..])
}

fn parse_register(pair: &Pair<Rule>) -> AppResult<RegisterSource> {
    match pair.as_str() {
        "A" => Ok(RegisterSource::Accumulator),
        "PC" => Ok(RegisterSource::ProgramCounter),
        v => Err(anyhow!("unknown register '{v}'.")),
    }
}

/*
 * parse_boolean_condition
 * AND and OR have the same precedence, the terms are folded from the left:
 * `a OR b AND c` reads `(a OR b) AND c`.
 */
pub fn parse_boolean_condition(mut nodes: Pairs<Rule>) -> AppResult<BooleanExpression> {
    let mut expression = parse_boolean_term(next_pair(&mut nodes, "a boolean term")?)?;

    while let Some(operator) = nodes.next() {
        let right = parse_boolean_term(next_pair(&mut nodes, "a boolean term")?)?;
        expression = match operator.as_str() {
            "AND" => BooleanExpression::And(Box::new(expression), Box::new(right)),
            "OR" => BooleanExpression::Or(Box::new(expression), Box::new(right)),
            _ => return unexpected(&operator, "AND|OR"),
        };
    }

    Ok(expression)
}

fn parse_boolean_term(node: Pair<Rule>) -> AppResult<BooleanExpression> {
    let expression = match node.as_rule() {
        Rule::boolean => BooleanExpression::Value(node.as_str() == "true"),
        Rule::halted => BooleanExpression::Halted,
        Rule::operation => parse_operation(node.into_inner())?,
        _ => return unexpected(&node, "a boolean, halted or a comparison"),
    };

    Ok(expression)
}

fn parse_source(node: &Pair<Rule>) -> AppResult<Source> {
    match node.as_rule() {
        Rule::register => Ok(Source::Register(parse_register(node)?)),
        Rule::memory_address => Ok(Source::Memory(parse_memory(node)?)),
        Rule::value => parse_source_value(node),
        _ => unexpected(node, "a register, a memory address or a value"),
    }
}

fn parse_operation(mut nodes: Pairs<Rule>) -> AppResult<BooleanExpression> {
    let lh = parse_source(&next_pair(&mut nodes, "a left operand")?)?;
    let middle_node = next_pair(&mut nodes, "a comparison operator")?;
    let rh = parse_source(&next_pair(&mut nodes, "a right operand")?)?;

    let expression = match middle_node.as_str() {
        "=" => BooleanExpression::Equal(lh, rh),
        ">=" => BooleanExpression::GreaterOrEqual(lh, rh),
        ">" => BooleanExpression::StrictlyGreater(lh, rh),
        "<=" => BooleanExpression::LesserOrEqual(lh, rh),
        "<" => BooleanExpression::StrictlyLesser(lh, rh),
        "!=" => BooleanExpression::Different(lh, rh),
        _ => return unexpected(&middle_node, "a comparison operator"),
    };

    Ok(expression)
}

fn parse_source_value(node: &Pair<Rule>) -> AppResult<Source> {
    Ok(Source::Value(parse_word(&node.as_str()[2..])?))
}
