//! `backtrace`

use super::Flow;
use crate::{
    args::Args,
    arch::i586::frame_pointer,
    debug::DebugInfo,
    error::MonitorError,
    monitor::Monitor,
    unwind::StackFrames,
};
use core::fmt::Write;

/// prints every frame on the stack, from the current one outwards
///
/// ```text
/// ebp f0109e58 eip f0100a62 args 00000001 f0109e80 f0109e98 f0100ed2 00000031
///     kern/monitor.c:143: monitor+106
/// ```
pub fn backtrace(monitor: &mut Monitor<'_>, _args: &Args<'_>) -> Result<Flow, MonitorError> {
    // read here so the walk starts at this handler's own frame, which stays live until we return
    let frame_pointer = match monitor.frame_source() {
        Some(source) => source(),
        None => frame_pointer!(),
    };

    writeln!(monitor.console, "Stack backtrace:")?;

    for frame in StackFrames::new(&*monitor.memory, frame_pointer, monitor.config.max_frames) {
        let eip = frame.return_address;

        write!(monitor.console, "ebp {:x} eip {:x} args", frame.frame_pointer, eip)?;
        for arg in frame.args {
            write!(monitor.console, " {arg:08x}")?;
        }
        writeln!(monitor.console)?;

        let info = monitor.symbols.resolve(eip).unwrap_or(DebugInfo::unknown(eip));
        writeln!(monitor.console, "\t{}:{}: {}+{}", info.file, info.line, info.function(), info.offset(eip))?;
    }

    Ok(Flow::Continue)
}
