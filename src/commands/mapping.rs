//! `showmapping` and `set`, looking at and editing page table entries

use super::Flow;
use crate::{
    args::Args,
    arch::{paging::PageTableFlags, PAGE_SIZE},
    error::MonitorError,
    hex::parse_hex,
    monitor::Monitor,
};
use core::fmt::Write;
use log::trace;
use num_enum::TryFromPrimitive;

const SHOWMAPPING_USAGE: &str = "your command should be like showmapping Address1 Address2";
const SET_USAGE: &str = "invalid arguments, should be like set Address {P,W,U} {0,1,2}";

/// what `set` does to the selected bit
#[derive(Debug, Clone, Copy, PartialEq, Eq, TryFromPrimitive)]
#[repr(u8)]
pub enum BitOp {
    /// `0`
    Clear = 0x30,
    /// `1`
    Set = 0x31,
    /// `2`
    Toggle = 0x32,
}

impl BitOp {
    /// parses an operation selector, only its first character counts
    pub fn from_selector(selector: &str) -> Result<Self, MonitorError> {
        let c = selector.bytes().next().ok_or(MonitorError::BadSelector)?;
        Self::try_from(c).map_err(|_| MonitorError::BadSelector)
    }
}

/// parses a permission selector (`P`, `W` or `U`, in any case), only its first character counts
pub fn permission_from_selector(selector: &str) -> Result<PageTableFlags, MonitorError> {
    match selector.bytes().next().map(|c| c.to_ascii_uppercase()) {
        Some(b'P') => Ok(PageTableFlags::Present),
        Some(b'W') => Ok(PageTableFlags::ReadWrite),
        Some(b'U') => Ok(PageTableFlags::UserSupervisor),
        _ => Err(MonitorError::BadSelector),
    }
}

/// `showmapping begin end`: prints the physical address and permission bits of every page from `begin` to `end`
pub fn showmapping(monitor: &mut Monitor<'_>, args: &Args<'_>) -> Result<Flow, MonitorError> {
    let operands = args.operands(2, SHOWMAPPING_USAGE)?;
    let begin = parse_hex(operands[0])?;
    let end = parse_hex(operands[1])?;
    let create = monitor.config.create_tables;

    let mut addr = begin;
    while addr <= end {
        let entry = *monitor.pages.walk(addr, create).ok_or(MonitorError::NoMapping(addr))?;
        trace!("{addr:#x} -> {entry:?}");

        writeln!(monitor.console, "virtual address: {addr:x}")?;
        writeln!(monitor.console, "physical address: {:x}", entry.translate(addr))?;
        writeln!(monitor.console, "{}", entry.permissions())?;

        addr = match addr.checked_add(PAGE_SIZE as u32) {
            Some(next) => next,
            None => break,
        };
    }

    Ok(Flow::Continue)
}

/// `set addr perm op`: clears, sets or toggles one permission bit of the entry mapping `addr`
pub fn set(monitor: &mut Monitor<'_>, args: &Args<'_>) -> Result<Flow, MonitorError> {
    let operands = args.operands(3, SET_USAGE)?;
    let addr = parse_hex(operands[0])?;
    let flag = permission_from_selector(operands[1])?;
    let op = BitOp::from_selector(operands[2])?;
    let create = monitor.config.create_tables;

    let entry = monitor.pages.walk(addr, create).ok_or(MonitorError::NoMapping(addr))?;
    let original = *entry;
    writeln!(monitor.console, "original: virtual address: {addr:x} {}", original.permissions())?;

    match op {
        BitOp::Clear => entry.clear(flag),
        BitOp::Set => entry.set(flag),
        BitOp::Toggle => entry.toggle(flag),
    }

    let edited = *entry;
    trace!("{op:?} {flag:?} @ {addr:#x}: {original:?} -> {edited:?}");

    monitor.pages.invalidate(addr);

    writeln!(monitor.console, "edited: virtual address: {addr:x} {}", edited.permissions())?;

    Ok(Flow::Continue)
}
