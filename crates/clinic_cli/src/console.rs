//! Line-oriented prompt I/O over any reader/writer pair.

use clinic_core::RecordId;
use std::io::{self, BufRead, Write};

pub const INVALID_NUMBER: &str = "Please enter a valid number.";

/// Console session; `None` from a read means input has ended.
pub struct Console<'a> {
    input: &'a mut dyn BufRead,
    output: &'a mut dyn Write,
}

impl<'a> Console<'a> {
    pub fn new(input: &'a mut dyn BufRead, output: &'a mut dyn Write) -> Self {
        Self { input, output }
    }

    pub fn say(&mut self, text: &str) -> io::Result<()> {
        writeln!(self.output, "{text}")
    }

    /// Reads one line without its terminator.
    pub fn read_line(&mut self) -> io::Result<Option<String>> {
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        let trimmed_len = line.trim_end_matches(['\n', '\r']).len();
        line.truncate(trimmed_len);
        Ok(Some(line))
    }

    /// Writes `label` without a newline, then reads the answer.
    pub fn prompt(&mut self, label: &str) -> io::Result<Option<String>> {
        write!(self.output, "{label}")?;
        self.read_line()
    }

    /// Prompts until the answer parses as a record id.
    pub fn prompt_id(&mut self, label: &str) -> io::Result<Option<RecordId>> {
        loop {
            let Some(answer) = self.prompt(label)? else {
                return Ok(None);
            };
            match answer.trim().parse::<RecordId>() {
                Ok(id) => return Ok(Some(id)),
                Err(_) => self.say(INVALID_NUMBER)?,
            }
        }
    }
}
