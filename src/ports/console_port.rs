//! Line-oriented console port for the terminal tour.

use std::io;

pub trait ConsolePort {
    /// Reads one line of input without its trailing newline. `None` at end of input.
    fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>>;

    fn write(&mut self, text: &str) -> io::Result<()>;
}
