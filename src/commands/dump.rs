//! `dump`, which reads out memory and zeroes it as it goes

use super::Flow;
use crate::{
    args::Args,
    arch::WORD_SIZE,
    error::MonitorError,
    hex::parse_hex,
    monitor::Monitor,
};
use core::fmt::Write;

const DUMP_USAGE: &str = "invalid arguments, should be like dump {P,V} Address1 Address2";

/// `dump mode start end`: prints every word from `start` to `end` and then overwrites it with zero
///
/// with mode `V` (or `v`) the addresses are virtual and get translated through the page tables first, anything else
/// means they're physical. this is NOT a read only command, whatever it prints is gone afterwards
pub fn dump(monitor: &mut Monitor<'_>, args: &Args<'_>) -> Result<Flow, MonitorError> {
    let operands = args.operands(3, DUMP_USAGE)?;
    let virt = matches!(operands[0].bytes().next(), Some(b'V' | b'v'));
    let start = parse_hex(operands[1])?;
    let end = parse_hex(operands[2])?;
    let create = monitor.config.create_tables;

    let mut addr = start;
    while addr <= end {
        let phys = if virt {
            monitor.pages.walk(addr, create).ok_or(MonitorError::NoMapping(addr))?.translate(addr)
        } else {
            addr
        };

        let before = monitor.memory.read_word(phys).ok_or(MonitorError::NoMapping(phys))?;
        writeln!(monitor.console, "(before) address = {phys:x} value = {before:x}")?;

        monitor.memory.write_word(phys, 0).ok_or(MonitorError::NoMapping(phys))?;

        let after = monitor.memory.read_word(phys).ok_or(MonitorError::NoMapping(phys))?;
        writeln!(monitor.console, "(after) address = {phys:x} value = {after:x}")?;

        addr = match addr.checked_add(WORD_SIZE) {
            Some(next) => next,
            None => break,
        };
    }

    Ok(Flow::Continue)
}
