use std::{
    io::{BufRead, Lines},
    sync::mpsc::Sender,
};

use anyhow::anyhow;
use pippin_lib::Machine;

use crate::{
    AppResult, CliCommand, CliCommandParser, Command, OutputToken, DEFAULT_MAX_STEPS,
};

#[derive(Debug)]
struct CommandIterator<B>
where
    B: BufRead,
{
    iterator: Lines<B>,
}

impl<B> CommandIterator<B>
where
    B: BufRead,
{
    pub fn new(iterator: Lines<B>) -> Self {
        Self { iterator }
    }
}

impl<B> Iterator for CommandIterator<B>
where
    B: BufRead,
{
    type Item = AppResult<CliCommand>;

    fn next(&mut self) -> Option<Self::Item> {
        self.iterator.next().map(|result| {
            result
                .map_err(|e| anyhow!(e))
                .and_then(|line| CliCommandParser::from(&line))
        })
    }
}

#[derive(Debug)]
pub struct ExecutorConfiguration {
    pub stop_on_failure: bool,
    pub max_steps: usize,
}

impl Default for ExecutorConfiguration {
    fn default() -> Self {
        Self {
            stop_on_failure: true,
            max_steps: DEFAULT_MAX_STEPS,
        }
    }
}

#[derive(Debug, Default)]
pub struct Executor {
    configuration: ExecutorConfiguration,
}

impl Executor {
    pub fn new(configuration: ExecutorConfiguration) -> Self {
        Self { configuration }
    }

    /*
     * run
     * Each marker starts a new test plan on a fresh machine. With
     * stop_on_failure, the first parse error, runtime fault or failed
     * assertion ends the script with an error; the token of a failed
     * assertion or of an aborted run is sent before. Otherwise errors are
     * sent as Failure tokens and the script goes on.
     */
    pub fn run<T: BufRead>(self, buffer: T, sender: Sender<OutputToken>) -> AppResult<()> {
        let mut machine = Machine::new();

        for result in CommandIterator::new(buffer.lines()) {
            let mut command = match result {
                Err(e) if self.configuration.stop_on_failure => return Err(e),
                Err(e) => {
                    sender.send(OutputToken::Failure {
                        message: e.to_string(),
                    })?;
                    continue;
                }
                Ok(c) => c,
            };

            match command {
                CliCommand::None => continue,
                CliCommand::Marker(_) => machine = Machine::new(),
                CliCommand::Run(ref mut run_command) => {
                    run_command.max_steps = self.configuration.max_steps
                }
                _ => (),
            }

            let token = match command.execute(&mut machine) {
                Err(e) if self.configuration.stop_on_failure => return Err(e),
                Err(e) => OutputToken::Failure {
                    message: e.to_string(),
                },
                Ok(token) => token,
            };
            let failure = match &token {
                OutputToken::Assertion {
                    failure: Some(failure),
                    description,
                } => Some(anyhow!("assertion '{description}' failed: {failure}")),
                OutputToken::Run {
                    fault: Some(fault), ..
                } => Some(anyhow!("run aborted: {fault}")),
                _ => None,
            };

            sender.send(token)?;

            if let Some(e) = failure {
                if self.configuration.stop_on_failure {
                    return Err(e);
                }
            }
        }

        Ok(())
    }
}
