use std::{io::Write, sync::mpsc::Receiver};

use crate::{AppResult, OutputToken};

pub trait Displayer {
    fn display(&mut self, receiver: Receiver<OutputToken>) -> AppResult<()>;
}

#[derive(Debug, Default)]
pub struct CliDisplayer<T>
where
    T: Write,
{
    output: T,
    verbose: bool,
}

impl<T> CliDisplayer<T>
where
    T: Write,
{
    pub fn new(output: T, verbose: bool) -> Self {
        Self { output, verbose }
    }
}

impl<T> Displayer for CliDisplayer<T>
where
    T: Write,
{
    fn display(&mut self, receiver: Receiver<OutputToken>) -> AppResult<()> {
        let mut i: u32 = 0;

        while let Ok(token) = receiver.recv() {
            match token {
                OutputToken::Assertion {
                    failure,
                    description,
                } => {
                    i += 1;
                    let line = match failure {
                        None => format!("{i:02} → {description} ✅\n"),
                        Some(failure) => format!("{i:02} → {description} ❌\n{failure}\n"),
                    };
                    self.output.write_all(line.as_bytes())?;
                }
                OutputToken::Marker { description } => {
                    self.output
                        .write_all(format!("♯ {description}\n").as_bytes())?;
                }
                OutputToken::Run { loglines, fault } => {
                    let mut content = String::new();
                    if self.verbose {
                        for line in loglines.iter() {
                            content.push_str(&format!("⚡ {line}\n"));
                        }
                    }
                    if let Some(fault) = fault {
                        content.push_str(&format!("💥 {fault}\n"));
                    }
                    self.output.write_all(content.as_bytes())?;
                }
                OutputToken::Failure { message } => {
                    self.output
                        .write_all(format!("💥 {message}\n").as_bytes())?;
                }
                OutputToken::Setup(lines) if self.verbose && !lines.is_empty() => {
                    let mut content = lines
                        .iter()
                        .map(|l| format!("🔧 {l}"))
                        .collect::<Vec<_>>()
                        .join("\n");
                    content.push('\n');
                    self.output.write_all(content.as_bytes())?;
                }
                _ => (),
            }
        }
        self.output.flush()?;

        Ok(())
    }
}
