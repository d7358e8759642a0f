//! console interface the monitor talks to the operator through

use core::fmt::Write;

/// size of the line buffer handed to [`Console::readline`]
pub const LINE_BUF_SIZE: usize = 1024;

/// trait for the console the monitor runs on
///
/// output goes through [`core::fmt::Write`], input is line based
pub trait Console: Write {
    /// prints the prompt and blocks until a line of input is available, which is copied into `buf`
    ///
    /// returns the length of the line, or `None` if nothing could be read (read error, interrupted input, etc.)
    fn readline(&mut self, prompt: &str, buf: &mut [u8]) -> Option<usize>;
}
