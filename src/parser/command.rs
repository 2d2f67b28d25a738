//! External command backend.
//!
//! Pipes text through a parser program (GiNZA by default) and reads the
//! CoNLL-U it prints.

use std::io::{ErrorKind, Write};
use std::process::{Command, Stdio};

use tracing::debug;

use super::{ConlluParser, DependencyParser, ParsedSentence};
use crate::error::{GraphError, Result};

/// Parser backend that runs an external program per document.
#[derive(Debug, Clone)]
pub struct CommandParser {
    model: String,
    program: String,
    args: Vec<String>,
    check_args: Vec<String>,
}

impl CommandParser {
    /// Create a backend for `program`, reporting itself as `model`.
    pub fn new(model: &str, program: &str) -> Self {
        Self {
            model: model.to_string(),
            program: program.to_string(),
            args: Vec::new(),
            check_args: vec!["--help".to_string()],
        }
    }

    /// Backend running the GiNZA command line with CoNLL-U output.
    pub fn ginza(program: &str, model: &str) -> Self {
        Self::new(model, program).with_args(["-m", model, "-f", "conllu"])
    }

    /// Set the arguments passed when parsing.
    pub fn with_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args = args.into_iter().map(Into::into).collect();
        self
    }

    /// Set the arguments used to check that the program runs.
    pub fn with_check_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.check_args = args.into_iter().map(Into::into).collect();
        self
    }

    /// Check that the program can be started.
    pub fn check(&self) -> Result<()> {
        let status = Command::new(&self.program)
            .args(&self.check_args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .map_err(|e| self.load_error(e.to_string()))?;

        if !status.success() {
            return Err(self.load_error(format!("availability check exited with {}", status)));
        }

        debug!(program = %self.program, model = %self.model, "Parser command available");
        Ok(())
    }

    fn load_error(&self, reason: String) -> GraphError {
        GraphError::ModelLoad {
            model: self.model.clone(),
            reason: format!("{}: {}", self.program, reason),
        }
    }
}

impl DependencyParser for CommandParser {
    fn name(&self) -> &str {
        &self.model
    }

    fn parse(&self, text: &str) -> Result<Vec<ParsedSentence>> {
        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()?;

        let mut stdin = child.stdin.take().ok_or_else(|| GraphError::Parse {
            line: 0,
            reason: "parser stdin unavailable".to_string(),
        })?;
        let input = text.to_string();
        // Write from another thread so a full stdout pipe cannot block us
        let writer = std::thread::spawn(move || stdin.write_all(input.as_bytes()));

        let output = child.wait_with_output()?;
        match writer.join() {
            Ok(Err(e)) if e.kind() != ErrorKind::BrokenPipe => return Err(e.into()),
            Err(_) => {
                return Err(GraphError::Parse {
                    line: 0,
                    reason: "parser stdin writer panicked".to_string(),
                })
            }
            _ => {}
        }

        if !output.status.success() {
            return Err(GraphError::Parse {
                line: 0,
                reason: format!(
                    "{} exited with {}: {}",
                    self.program,
                    output.status,
                    String::from_utf8_lossy(&output.stderr).trim()
                ),
            });
        }

        let conllu = String::from_utf8(output.stdout).map_err(|e| GraphError::Parse {
            line: 0,
            reason: format!("parser output is not UTF-8: {}", e),
        })?;

        ConlluParser::new().parse(&conllu)
    }
}
