use std::{
    fs::File,
    io::{stdin, stdout, BufRead, BufReader},
    path::PathBuf,
    sync::mpsc::channel,
    thread::spawn,
};

use anyhow::{anyhow, Result};
use clap::Parser;
use pippin_tester::{
    CliDisplayer, Displayer, Executor, ExecutorConfiguration, DEFAULT_MAX_STEPS,
};

/// Pippin code tester
/// This program allows step by step execution of Pippin programs and assertions
/// on memory or registers.
/// It takes script as parameter (or standard input) to execute tests.
#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
pub struct CommandLineArguments {
    /// Test script file location ("-" to read from standard input)
    #[arg(short, long)]
    filepath: PathBuf,

    /// Do not stop execution when an assertion fails
    #[arg(short, long)]
    continue_on_failure: bool,

    /// Display not only assertion results but also setup commands output
    #[arg(short, long)]
    verbose: bool,

    /// Maximum number of steps a run command may execute
    #[arg(short, long, default_value_t = DEFAULT_MAX_STEPS)]
    max_steps: usize,
}

fn main() -> Result<()> {
    let parameters = CommandLineArguments::parse();
    let buffer: Box<dyn BufRead> = if parameters.filepath == PathBuf::from("-") {
        Box::new(BufReader::new(stdin()))
    } else {
        let file = File::open(&parameters.filepath).map_err(|e| {
            anyhow!(
                "could not open script '{}': {e}",
                parameters.filepath.display()
            )
        })?;
        Box::new(BufReader::new(file))
    };
    let configuration = ExecutorConfiguration {
        stop_on_failure: !parameters.continue_on_failure,
        max_steps: parameters.max_steps,
    };

    let (sender, receiver) = channel();
    let mut displayer = CliDisplayer::new(stdout(), parameters.verbose);
    let display_thread = spawn(move || displayer.display(receiver));
    let result = Executor::new(configuration).run(buffer, sender);

    display_thread
        .join()
        .map_err(|_| anyhow!("the display thread panicked"))??;

    result
}
