//! the monitor's built in commands

pub mod backtrace;
pub mod dump;
pub mod mapping;

use crate::{args::Args, error::MonitorError, monitor::Monitor};
use core::fmt::Write;

/// what the monitor should do after a command has run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    /// keep reading commands
    Continue,
    /// leave the monitor and hand control back to the kernel
    Exit,
}

/// a command handler, gets the monitor and the full argument list (including the command name)
pub type Handler = fn(&mut Monitor<'_>, &Args<'_>) -> Result<Flow, MonitorError>;

/// an entry in the command table
pub struct Command {
    pub name: &'static str,
    pub desc: &'static str,
    pub func: Handler,
}

/// the default command table
pub static COMMANDS: &[Command] = &[
    Command {
        name: "help",
        desc: "Display this list of commands",
        func: help,
    },
    Command {
        name: "kerninfo",
        desc: "Display information about the kernel",
        func: kerninfo,
    },
    Command {
        name: "backtrace",
        desc: "Display information about our stack",
        func: backtrace::backtrace,
    },
    Command {
        name: "showmapping",
        desc: "display the physical page mappings and corresponding permission bits",
        func: mapping::showmapping,
    },
    Command {
        name: "set",
        desc: "change a virtual address flags:\n{P,W,U} => {Present,Writeable,User} : {0,1,2} => {clear,set,change}",
        func: mapping::set,
    },
    Command {
        name: "dump",
        desc: "{P,V} for addresses => range {start,end}",
        func: dump::dump,
    },
];

/// lists every command in the monitor's table
pub fn help(monitor: &mut Monitor<'_>, _args: &Args<'_>) -> Result<Flow, MonitorError> {
    for command in monitor.commands() {
        writeln!(monitor.console, "{} - {}", command.name, command.desc)?;
    }

    Ok(Flow::Continue)
}

/// prints where the kernel image was linked and loaded
pub fn kerninfo(monitor: &mut Monitor<'_>, _args: &Args<'_>) -> Result<Flow, MonitorError> {
    let layout = monitor.layout;
    let console = &mut *monitor.console;

    writeln!(console, "Special kernel symbols:")?;
    writeln!(console, "  _start                  {:08x} (phys)", layout.start)?;

    for (name, addr) in [("entry", layout.entry), ("etext", layout.etext), ("edata", layout.edata), ("end", layout.end)] {
        writeln!(console, "  {:<6} {:08x} (virt)  {:08x} (phys)", name, addr, layout.physical(addr))?;
    }

    writeln!(console, "Kernel executable memory footprint: {}KB", layout.footprint_kib())?;

    Ok(Flow::Continue)
}
