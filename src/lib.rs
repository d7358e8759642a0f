//! kmonitor: interactive kernel debugging monitor
//!
//! lets an operator poke at a halted kernel: walk the call stack, look at and edit page table entries, and dump
//! (and zero) raw memory. everything the monitor touches is reached through the collaborator traits in [`console`],
//! [`mm`] and [`debug`], so the kernel decides how lines are read, how page tables are walked and how symbols are
//! resolved

#![cfg_attr(not(test), no_std)]

pub mod args;
pub mod arch;
pub mod commands;
pub mod config;
pub mod console;
pub mod debug;
pub mod error;
pub mod hex;
pub mod logging;
pub mod mm;
pub mod monitor;
pub mod unwind;
pub mod util;


pub use args::Args;
pub use commands::{Command, Flow, COMMANDS};
pub use config::MonitorConfig;
pub use console::Console;
pub use debug::{DebugInfo, SymbolResolver};
pub use error::MonitorError;
pub use mm::{KernelLayout, Memory, PageWalker, RawMemory};
pub use monitor::Monitor;

pub const NAME: &str = env!("CARGO_PKG_NAME");
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
