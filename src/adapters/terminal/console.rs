//! [`ConsolePort`] over the process's stdin and stdout.

use std::io::{self, BufRead, Write};

use crate::ports::console_port::ConsolePort;

pub struct StdConsole {
    stdin: io::Stdin,
    stdout: io::Stdout,
}

impl StdConsole {
    pub fn new() -> Self {
        Self {
            stdin: io::stdin(),
            stdout: io::stdout(),
        }
    }
}

impl Default for StdConsole {
    fn default() -> Self {
        Self::new()
    }
}

impl ConsolePort for StdConsole {
    fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>> {
        let mut out = self.stdout.lock();
        out.write_all(prompt.as_bytes())?;
        out.flush()?;

        let mut line = String::new();
        if self.stdin.lock().read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }

    fn write(&mut self, text: &str) -> io::Result<()> {
        let mut out = self.stdout.lock();
        out.write_all(text.as_bytes())?;
        out.flush()
    }
}
