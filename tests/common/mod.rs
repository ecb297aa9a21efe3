#![allow(dead_code)]

use std::collections::VecDeque;
use std::io::{self, Write};

use swingacademy::domain::course::{Course, CourseSettings};
use swingacademy::ports::console_port::ConsolePort;

/// Console that replays scripted input lines and records everything written.
pub struct ScriptedConsole {
    pub input: VecDeque<String>,
    pub output: String,
    pub prompts: usize,
}

impl ScriptedConsole {
    pub fn new(lines: &[&str]) -> Self {
        Self {
            input: lines.iter().map(|l| l.to_string()).collect(),
            output: String::new(),
            prompts: 0,
        }
    }
}

impl ConsolePort for ScriptedConsole {
    fn read_line(&mut self, _prompt: &str) -> io::Result<Option<String>> {
        self.prompts += 1;
        Ok(self.input.pop_front())
    }

    fn write(&mut self, text: &str) -> io::Result<()> {
        self.output.push_str(text);
        Ok(())
    }
}

/// Console whose writes always fail.
pub struct BrokenConsole;

impl ConsolePort for BrokenConsole {
    fn read_line(&mut self, _prompt: &str) -> io::Result<Option<String>> {
        Ok(None)
    }

    fn write(&mut self, _text: &str) -> io::Result<()> {
        Err(io::Error::new(io::ErrorKind::BrokenPipe, "console closed"))
    }
}

pub fn seeded_course(seed: u64) -> Course {
    Course::load(CourseSettings {
        trend_seed: Some(seed),
        ..CourseSettings::default()
    })
}

pub fn write_temp_ini(content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

/// Correct option index for each quiz question, in order.
pub const ANSWER_KEY: [usize; 10] = [1, 1, 1, 3, 0, 1, 2, 1, 1, 1];
