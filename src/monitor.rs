//! the monitor itself: reads lines, splits them up and runs commands

use crate::{
    args::Args,
    commands::{Command, Flow, COMMANDS},
    config::MonitorConfig,
    console::{Console, LINE_BUF_SIZE},
    debug::SymbolResolver,
    error::MonitorError,
    mm::{KernelLayout, Memory, PageWalker},
};
use core::fmt::Write;
use log::{debug, error, warn};

/// an interactive monitor session over a halted kernel
///
/// the monitor only borrows what it works with, the kernel keeps ownership of its console, page tables and memory
pub struct Monitor<'k> {
    pub console: &'k mut dyn Console,
    pub pages: &'k mut dyn PageWalker,
    pub memory: &'k mut dyn Memory,
    pub symbols: &'k dyn SymbolResolver,
    pub layout: KernelLayout,
    pub config: MonitorConfig,
    commands: &'static [Command],
    frame_source: Option<fn() -> u32>,
}

impl<'k> Monitor<'k> {
    pub fn new(
        console: &'k mut dyn Console,
        pages: &'k mut dyn PageWalker,
        memory: &'k mut dyn Memory,
        symbols: &'k dyn SymbolResolver,
    ) -> Self {
        Self {
            console,
            pages,
            memory,
            symbols,
            layout: KernelLayout::default(),
            config: MonitorConfig::default(),
            commands: COMMANDS,
            frame_source: None,
        }
    }

    /// sets the kernel image layout `kerninfo` reports
    pub fn with_layout(mut self, layout: KernelLayout) -> Self {
        self.layout = layout;
        self
    }

    pub fn with_config(mut self, config: MonitorConfig) -> Self {
        self.config = config;
        self
    }

    /// replaces the command table, e.g. to add commands on top of [`COMMANDS`]
    pub fn with_commands(mut self, commands: &'static [Command]) -> Self {
        self.commands = commands;
        self
    }

    /// overrides where `backtrace` gets the frame pointer to start from, instead of reading ebp itself
    pub fn with_frame_source(mut self, frame_source: fn() -> u32) -> Self {
        self.frame_source = Some(frame_source);
        self
    }

    pub fn commands(&self) -> &'static [Command] {
        self.commands
    }

    /// the frame pointer override set with [`Monitor::with_frame_source`], if any
    pub fn frame_source(&self) -> Option<fn() -> u32> {
        self.frame_source
    }

    /// runs the monitor until a command asks to leave it or something goes badly wrong
    ///
    /// errors returned from here are the fatal ones, it's up to the kernel whether that's worth a panic
    pub fn run(&mut self) -> Result<(), MonitorError> {
        debug!("{} v{}", crate::NAME, crate::VERSION);

        writeln!(self.console, "Welcome to the kernel monitor!")?;
        writeln!(self.console, "Type 'help' for a list of commands.")?;

        let mut buf = [0; LINE_BUF_SIZE];

        loop {
            let Some(len) = self.console.readline(self.config.prompt, &mut buf) else {
                continue;
            };

            let line = match core::str::from_utf8(&buf[..len.min(buf.len())]) {
                Ok(line) => line,
                Err(err) => {
                    warn!("ignoring line that isn't valid utf-8: {err}");
                    continue;
                }
            };

            if self.runcmd(line)? == Flow::Exit {
                debug!("leaving monitor");
                return Ok(());
            }
        }
    }

    /// runs a single command line
    ///
    /// recoverable errors are printed to the console and swallowed, only fatal ones are returned
    pub fn runcmd(&mut self, line: &str) -> Result<Flow, MonitorError> {
        let args = match Args::parse(line) {
            Ok(args) => args,
            Err(err) => return self.recover(err),
        };

        let Some(name) = args.command() else {
            return Ok(Flow::Continue);
        };

        match self.dispatch(name, &args) {
            Ok(flow) => Ok(flow),
            Err(MonitorError::UnknownCommand) => {
                writeln!(self.console, "Unknown command '{name}'")?;
                Ok(Flow::Continue)
            }
            Err(err) => self.recover(err),
        }
    }

    fn dispatch(&mut self, name: &str, args: &Args<'_>) -> Result<Flow, MonitorError> {
        let commands = self.commands;
        let command = commands.iter().find(|command| command.name == name).ok_or(MonitorError::UnknownCommand)?;

        debug!("running {args:?}");
        (command.func)(self, args)
    }

    fn recover(&mut self, err: MonitorError) -> Result<Flow, MonitorError> {
        if err.is_fatal(&self.config) {
            error!("{err:?}, leaving monitor");
            return Err(err);
        }

        writeln!(self.console, "{err}")?;
        Ok(Flow::Continue)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        arch::paging::PageTableEntry,
        commands::{self, Command},
        test::{Fixture, TestConsole},
    };

    fn exit(_monitor: &mut Monitor<'_>, _args: &Args<'_>) -> Result<Flow, MonitorError> {
        Ok(Flow::Exit)
    }

    static WITH_EXIT: &[Command] = &[
        Command {
            name: "help",
            desc: "Display this list of commands",
            func: commands::help,
        },
        Command {
            name: "set",
            desc: "change a virtual address flags",
            func: commands::mapping::set,
        },
        Command {
            name: "exit",
            desc: "Leave the monitor",
            func: exit,
        },
    ];

    #[test]
    fn frame_source_is_only_an_override() {
        let mut fixture = Fixture::new();

        let monitor = Monitor::new(&mut fixture.console, &mut fixture.pages, &mut fixture.memory, &fixture.symbols);
        assert!(monitor.frame_source().is_none());

        let monitor = monitor.with_frame_source(|| 0x1000);
        assert_eq!(monitor.frame_source().map(|source| source()), Some(0x1000));
    }

    #[test]
    fn blank_line_does_nothing() {
        let mut fixture = Fixture::new();

        assert_eq!(fixture.run("   \t"), Ok(Flow::Continue));
        assert_eq!(fixture.console.output, "");
    }

    #[test]
    fn unknown_command() {
        let mut fixture = Fixture::new();
        assert_eq!(fixture.run_line("frobnicate 0x1"), "Unknown command 'frobnicate'\n");
    }

    #[test]
    fn commands_are_case_sensitive() {
        let mut fixture = Fixture::new();
        assert_eq!(fixture.run_line("HELP"), "Unknown command 'HELP'\n");
    }

    #[test]
    fn too_many_arguments_runs_nothing() {
        let mut fixture = Fixture::new();
        fixture.pages.map(0x5000, PageTableEntry::from_raw(0x00123001));

        let line = format!("set 0x5000 w 1{}", " x".repeat(12));
        assert_eq!(fixture.run_line(&line), "Too many arguments (max 16)\n");
        assert_eq!(fixture.pages.entry(0x5000).raw(), 0x00123001);
    }

    #[test]
    fn usage_errors_can_be_made_recoverable() {
        let mut fixture = Fixture::new();
        fixture.config.fatal_usage_errors = false;

        assert_eq!(fixture.run_line("showmapping 0x1000"), "your command should be like showmapping Address1 Address2\n");
    }

    #[test]
    fn session_runs_until_exit() {
        let mut console = TestConsole::with_input(&["help", "", "bogus", "exit", "help"]);
        let mut fixture = Fixture::new();

        let result = {
            let mut monitor = Monitor::new(&mut console, &mut fixture.pages, &mut fixture.memory, &fixture.symbols)
                .with_commands(WITH_EXIT);
            monitor.run()
        };

        assert_eq!(result, Ok(()));
        assert!(console.output.starts_with("Welcome to the kernel monitor!\nType 'help' for a list of commands.\n"));
        assert!(console.output.contains("K> help\nhelp - Display this list of commands\n"));
        assert!(console.output.contains("K> bogus\nUnknown command 'bogus'\n"));
        assert!(console.output.ends_with("K> exit\n"));
        assert_eq!(console.remaining(), 1);
    }

    #[test]
    fn session_survives_recoverable_errors() {
        let mut console = TestConsole::with_input(&["set 0x5000 w 1", "set 0x5000 q 1", "exit"]);
        let mut fixture = Fixture::new();

        let result = {
            let mut monitor = Monitor::new(&mut console, &mut fixture.pages, &mut fixture.memory, &fixture.symbols)
                .with_commands(WITH_EXIT);
            monitor.run()
        };

        assert_eq!(result, Ok(()));
        assert!(console.output.contains("memory exception\n"));
        assert!(console.output.contains("error in command - back to command window\n"));
    }

    #[test]
    fn session_ends_on_fatal_error() {
        let mut console = TestConsole::with_input(&["set 10 w 1", "help"]);
        let mut fixture = Fixture::new();

        let result = {
            let mut monitor = Monitor::new(&mut console, &mut fixture.pages, &mut fixture.memory, &fixture.symbols)
                .with_commands(WITH_EXIT)
                .with_config(MonitorConfig { prompt: "AbtalELDigital> ", ..MonitorConfig::default() });
            monitor.run()
        };

        assert_eq!(result, Err(MonitorError::InvalidHex));
        assert!(console.output.ends_with("AbtalELDigital> set 10 w 1\n"));
        assert_eq!(console.remaining(), 1);
    }
}
