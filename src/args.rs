//! splitting a command line into arguments

use crate::error::MonitorError;
use core::fmt;

/// characters that separate arguments
pub const WHITESPACE: &[char] = &['\t', '\r', '\n', ' '];

/// size of the argument vector, including the slot that terminates it
pub const MAX_ARGS: usize = 16;

/// the arguments of one command line, borrowed from the line
///
/// `args[0]` is the command name
#[derive(Clone, Copy)]
pub struct Args<'a> {
    args: [&'a str; MAX_ARGS - 1],
    len: usize,
}

impl<'a> Args<'a> {
    /// splits a line into arguments
    ///
    /// fails if the line has more arguments than fit in the argument vector, in which case the line must not be run
    pub fn parse(line: &'a str) -> Result<Self, MonitorError> {
        let mut args = Self { args: [""; MAX_ARGS - 1], len: 0 };

        for arg in line.split(WHITESPACE).filter(|arg| !arg.is_empty()) {
            if args.len == args.args.len() {
                return Err(MonitorError::TooManyArgs);
            }

            args.args[args.len] = arg;
            args.len += 1;
        }

        Ok(args)
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn get(&self, index: usize) -> Option<&'a str> {
        self.as_slice().get(index).copied()
    }

    /// the command name, if the line wasn't blank
    pub fn command(&self) -> Option<&'a str> {
        self.get(0)
    }

    pub fn as_slice(&self) -> &[&'a str] {
        &self.args[..self.len]
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a str> + '_ {
        self.as_slice().iter().copied()
    }

    /// makes sure exactly `count` arguments follow the command name, returning them
    pub fn operands(&self, count: usize, usage: &'static str) -> Result<&[&'a str], MonitorError> {
        match self.as_slice() {
            [_, rest @ ..] if rest.len() == count => Ok(rest),
            _ => Err(MonitorError::Usage(usage)),
        }
    }
}

impl fmt::Debug for Args<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}
