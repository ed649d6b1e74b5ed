use super::instruction::Operation;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

const DATA_SEPARATOR: &str = "DATA";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyntaxErrorKind {
    IllegalBlankLine,
    LeadingWhiteSpace,
    MultipleDataSeparators,
    DataSeparatorCase,
    IllegalMnemonic,
    MnemonicCase,
    UnexpectedArgument,
    TooManyArguments,
    MissingArgument,
    ArgumentNotHex,
    DataLength,
    DataNotNumeric,
    Unreadable(String), // I/O error message
}

impl fmt::Display for SyntaxErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            SyntaxErrorKind::IllegalBlankLine => write!(f, "illegal blank line in the source file"),
            SyntaxErrorKind::LeadingWhiteSpace => write!(f, "line starts with illegal white space"),
            SyntaxErrorKind::MultipleDataSeparators => {
                write!(f, "file contains more than one DATA separator")
            }
            SyntaxErrorKind::DataSeparatorCase => {
                write!(f, "line does not have DATA in upper case")
            }
            SyntaxErrorKind::IllegalMnemonic => write!(f, "illegal mnemonic"),
            SyntaxErrorKind::MnemonicCase => write!(f, "mnemonic must be upper case"),
            SyntaxErrorKind::UnexpectedArgument => write!(f, "this mnemonic cannot take arguments"),
            SyntaxErrorKind::TooManyArguments => write!(f, "this mnemonic has too many arguments"),
            SyntaxErrorKind::MissingArgument => write!(f, "this mnemonic is missing an argument"),
            SyntaxErrorKind::ArgumentNotHex => write!(f, "argument is not a hex number"),
            SyntaxErrorKind::DataLength => write!(f, "data must have length 2"),
            SyntaxErrorKind::DataNotNumeric => write!(f, "data has non-numeric memory address"),
            SyntaxErrorKind::Unreadable(message) => {
                write!(f, "unable to read the source file: {}", message)
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxError {
    pub line: usize, // 1 indexed, 0 when the file could not be read
    pub kind: SyntaxErrorKind,
}

impl fmt::Display for SyntaxError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.line == 0 {
            write!(f, "Error: {}", self.kind)
        } else {
            write!(f, "Error on line {}: {}", self.line, self.kind)
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationStatus {
    Clean,
    Error(usize),
    Unreadable,
}

impl ValidationStatus {
    /// Summary code: 0 when clean, the error line, -1 when the source was not readable.
    pub fn code(&self) -> i32 {
        match *self {
            ValidationStatus::Clean => 0,
            ValidationStatus::Error(line) => line as i32,
            ValidationStatus::Unreadable => -1,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    pub diagnostics: Vec<SyntaxError>,
}

impl ValidationReport {
    /*
     * status
     * The summary designates the first error found, the source is handed to the
     * code generator only when it is Clean.
     */
    pub fn status(&self) -> ValidationStatus {
        if self
            .diagnostics
            .iter()
            .any(|e| matches!(e.kind, SyntaxErrorKind::Unreadable(_)))
        {
            return ValidationStatus::Unreadable;
        }

        match self.first_error_line() {
            Some(line) => ValidationStatus::Error(line),
            None => ValidationStatus::Clean,
        }
    }

    pub fn first_error_line(&self) -> Option<usize> {
        self.diagnostics.first().map(|e| e.line)
    }

    pub fn last_error_line(&self) -> Option<usize> {
        self.diagnostics.last().map(|e| e.line)
    }

    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }

    pub fn messages(&self) -> String {
        self.diagnostics
            .iter()
            .map(|e| e.to_string())
            .collect::<Vec<String>>()
            .join("\n")
    }
}

fn is_hex(token: &str) -> bool {
    i32::from_str_radix(token, 16).is_ok()
}

/*
 * SyntaxValidator
 * Line oriented checker for assembly sources. It never stops at the first
 * error, every problem of the source is reported in one pass.
 */
#[derive(Debug, Default)]
pub struct SyntaxValidator {
    reading_code: bool,
    data_found: bool,
    blank_line: Option<usize>,
    blank_line_reported: bool,
    diagnostics: Vec<SyntaxError>,
}

impl SyntaxValidator {
    fn new() -> SyntaxValidator {
        SyntaxValidator {
            reading_code: true,
            ..Default::default()
        }
    }

    pub fn validate(source: &str) -> ValidationReport {
        let mut validator = SyntaxValidator::new();
        for (index, line) in source.lines().enumerate() {
            validator.check_line(index + 1, line);
        }

        ValidationReport {
            diagnostics: validator.diagnostics,
        }
    }

    pub fn validate_file<P: AsRef<Path>>(path: P) -> ValidationReport {
        match std::fs::read_to_string(path) {
            Ok(source) => SyntaxValidator::validate(&source),
            Err(e) => ValidationReport {
                diagnostics: vec![SyntaxError {
                    line: 0,
                    kind: SyntaxErrorKind::Unreadable(e.to_string()),
                }],
            },
        }
    }

    fn report(&mut self, line: usize, kind: SyntaxErrorKind) {
        self.diagnostics.push(SyntaxError { line, kind });
    }

    fn check_line(&mut self, number: usize, line: &str) {
        let trimmed = line.trim();

        if trimmed.is_empty() {
            if self.blank_line.is_none() {
                self.blank_line = Some(number);
            }
            return;
        }
        if let Some(blank_line) = self.blank_line {
            if !self.blank_line_reported {
                self.blank_line_reported = true;
                self.report(blank_line, SyntaxErrorKind::IllegalBlankLine);
                return;
            }
        }

        if line.starts_with(' ') || line.starts_with('\t') {
            self.report(number, SyntaxErrorKind::LeadingWhiteSpace);
        }
        if trimmed.to_uppercase() == DATA_SEPARATOR {
            if !self.reading_code {
                self.report(number, SyntaxErrorKind::MultipleDataSeparators);
            } else if trimmed != DATA_SEPARATOR {
                self.report(number, SyntaxErrorKind::DataSeparatorCase);
            }
            self.reading_code = false;
        }

        let tokens: Vec<&str> = trimmed.split_whitespace().collect();
        if self.reading_code {
            self.check_code(number, &tokens);
        } else if self.data_found {
            self.check_data(number, &tokens);
        } else {
            // the separator line itself
            self.data_found = true;
        }
    }

    fn check_code(&mut self, number: usize, tokens: &[&str]) {
        let mnemonic = tokens[0].to_uppercase();
        let operation = match Operation::from_str(&mnemonic) {
            Ok(operation) => operation,
            Err(_) => {
                self.report(number, SyntaxErrorKind::IllegalMnemonic);
                return;
            }
        };
        if tokens[0] != mnemonic {
            self.report(number, SyntaxErrorKind::MnemonicCase);
        }

        if !operation.takes_argument() {
            if tokens.len() != 1 {
                self.report(number, SyntaxErrorKind::UnexpectedArgument);
            }
        } else if tokens.len() > 2 {
            self.report(number, SyntaxErrorKind::TooManyArguments);
        } else if tokens.len() < 2 {
            self.report(number, SyntaxErrorKind::MissingArgument);
        } else {
            let argument = tokens[1]
                .strip_prefix(&['#', '@', '&'][..])
                .unwrap_or(tokens[1]);
            if !is_hex(argument) {
                self.report(number, SyntaxErrorKind::ArgumentNotHex);
            }
        }
    }

    fn check_data(&mut self, number: usize, tokens: &[&str]) {
        if tokens.len() != 2 {
            self.report(number, SyntaxErrorKind::DataLength);
        } else if !(is_hex(tokens[0]) && is_hex(tokens[1])) {
            self.report(number, SyntaxErrorKind::DataNotNumeric);
        }
    }
}
