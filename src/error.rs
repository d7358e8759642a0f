//! errors a monitor command can run into

use crate::config::MonitorConfig;
use core::fmt;

/// an error that can be returned from a monitor command
///
/// whether it ends the session is decided by [`MonitorError::is_fatal`], everything else just gets printed
#[derive(Copy, Clone, PartialEq, Eq)]
pub enum MonitorError {
    /// wrong number of arguments, carries the usage text
    Usage(&'static str),

    /// an argument wasn't a hex literal
    InvalidHex,

    /// no page table entry could be found for this address, or it's outside of accessible memory
    NoMapping(u32),

    /// bad permission or operation selector given to `set`
    BadSelector,

    /// the line had more arguments than the monitor can hold
    TooManyArgs,

    /// no command with this name
    UnknownCommand,

    /// writing to the console failed
    Console(fmt::Error),
}

impl MonitorError {
    /// whether this error ends the monitor session instead of just the current command
    pub fn is_fatal(&self, config: &MonitorConfig) -> bool {
        match self {
            Self::Usage(_) => config.fatal_usage_errors,
            Self::InvalidHex | Self::Console(_) => true,
            Self::NoMapping(_) | Self::BadSelector | Self::TooManyArgs | Self::UnknownCommand => false,
        }
    }
}

impl From<fmt::Error> for MonitorError {
    fn from(err: fmt::Error) -> Self {
        Self::Console(err)
    }
}

impl fmt::Display for MonitorError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Usage(usage) => write!(f, "{usage}"),
            Self::InvalidHex => write!(f, "invalid HEX"),
            Self::NoMapping(_) => write!(f, "memory exception"),
            Self::BadSelector => write!(f, "error in command - back to command window"),
            Self::TooManyArgs => write!(f, "Too many arguments (max {})", crate::args::MAX_ARGS),
            Self::UnknownCommand => write!(f, "unknown command"),
            Self::Console(_) => write!(f, "console error"),
        }
    }
}

impl fmt::Debug for MonitorError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::NoMapping(addr) => write!(f, "MonitorError: \"{}\" @ {:#x}", self, addr),
            _ => write!(f, "MonitorError: \"{}\"", self),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fatality_follows_config() {
        let strict = MonitorConfig::default();
        let lenient = MonitorConfig {
            fatal_usage_errors: false,
            ..MonitorConfig::default()
        };

        assert!(MonitorError::Usage("usage").is_fatal(&strict));
        assert!(!MonitorError::Usage("usage").is_fatal(&lenient));
        assert!(MonitorError::InvalidHex.is_fatal(&lenient));
        assert!(!MonitorError::NoMapping(0).is_fatal(&strict));
        assert!(!MonitorError::BadSelector.is_fatal(&strict));
        assert!(!MonitorError::TooManyArgs.is_fatal(&strict));
    }

    #[test]
    fn messages() {
        assert_eq!(MonitorError::TooManyArgs.to_string(), "Too many arguments (max 16)");
        assert_eq!(MonitorError::NoMapping(0x1000).to_string(), "memory exception");
        assert_eq!(format!("{:?}", MonitorError::NoMapping(0x1000)), "MonitorError: \"memory exception\" @ 0x1000");
    }
}
