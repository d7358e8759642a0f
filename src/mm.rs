//! memory the monitor can look at and scribble over
//!
//! the monitor doesn't own any of the memory it touches. page table entries are borrowed from the kernel's page
//! walker for the length of one access, and raw memory words go through a [`Memory`] implementation. [`RawMemory`] is
//! the one place where addresses get turned into pointers

use crate::arch::{paging::PageTableEntry, WORD_SIZE};
use core::ops::RangeInclusive;
use log::trace;
use volatile::Volatile;

/// access to the kernel's page tables
pub trait PageWalker {
    /// finds the page table entry that maps the page containing `addr`
    ///
    /// the page offset of `addr` is ignored. if `create` is set, missing intermediate tables may be allocated along
    /// the way. returns `None` if no entry exists (or couldn't be created)
    fn walk(&mut self, addr: u32, create: bool) -> Option<&mut PageTableEntry>;

    /// called after an entry has been edited so stale translations get dropped
    fn invalidate(&mut self, addr: u32) {
        crate::arch::flush_tlb(addr);
    }
}

/// word sized access to memory
pub trait Memory {
    /// reads the word at `addr`, or `None` if it isn't accessible
    fn read_word(&self, addr: u32) -> Option<u32>;

    /// writes a word to `addr`, or returns `None` if it isn't accessible
    fn write_word(&mut self, addr: u32, value: u32) -> Option<()>;
}

/// direct, volatile access to a range of the address space
///
/// every access is checked against the range given at construction, anything outside of it reads as inaccessible.
/// addresses in the range can be shifted by a fixed offset on their way to a pointer, for kernels that reach
/// physical memory through a window (e.g. everything mapped at `KERNBASE`)
pub struct RawMemory {
    range: RangeInclusive<u32>,
    offset: usize,
}

impl RawMemory {
    /// create a view over the given range of addresses
    ///
    /// # Safety
    ///
    /// every word in `range` must be mapped and safe to read and write for as long as this view exists, and nothing
    /// else may be running that could be using that memory (i.e. the rest of the kernel is halted)
    pub const unsafe fn new(range: RangeInclusive<u32>) -> Self {
        Self { range, offset: 0 }
    }

    /// create a view over the given range of addresses, each of which lives at `offset + addr`
    ///
    /// # Safety
    ///
    /// same as [`RawMemory::new`], for the shifted addresses
    pub const unsafe fn with_offset(range: RangeInclusive<u32>, offset: usize) -> Self {
        Self { range, offset }
    }

    fn contains(&self, addr: u32) -> bool {
        match addr.checked_add(WORD_SIZE - 1) {
            Some(last) => self.range.contains(&addr) && self.range.contains(&last),
            None => false,
        }
    }

    fn cell(&self, addr: u32) -> Option<Volatile<&'static mut u32>> {
        if !self.contains(addr) || addr % WORD_SIZE != 0 {
            trace!("{addr:#x} is outside of {:#x}..={:#x} or unaligned", self.range.start(), self.range.end());
            return None;
        }

        let ptr = self.offset.wrapping_add(addr as usize) as *mut u32;

        // checked above, and the caller of new() promised the range is mapped
        Some(Volatile::new(unsafe { &mut *ptr }))
    }
}

impl Memory for RawMemory {
    fn read_word(&self, addr: u32) -> Option<u32> {
        self.cell(addr).map(|cell| cell.read())
    }

    fn write_word(&mut self, addr: u32, value: u32) -> Option<()> {
        self.cell(addr).map(|mut cell| cell.write(value))
    }
}

/// addresses of the kernel image, as given by the linker
#[derive(Debug, Clone, Copy, Default)]
pub struct KernelLayout {
    /// physical address of the boot entry point
    pub start: u32,
    /// virtual address of the kernel entry point
    pub entry: u32,
    /// end of the text section
    pub etext: u32,
    /// end of the data section
    pub edata: u32,
    /// end of the kernel image
    pub end: u32,
    /// where the kernel is linked, virtual minus this is physical
    pub kernel_base: u32,
}

impl KernelLayout {
    /// converts one of the kernel's virtual addresses to the physical address it's loaded at
    pub const fn physical(&self, addr: u32) -> u32 {
        addr.wrapping_sub(self.kernel_base)
    }

    /// size of the kernel image in KiB, rounded up
    pub const fn footprint_kib(&self) -> u32 {
        let size = self.end.wrapping_sub(self.entry);
        size.div_ceil(1024)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raw_memory_reads_and_writes_inside_its_range() {
        let mut words = [0xdeadbeefu32, 0x12345678, 0];
        let base = 0x1000;

        // host pointers don't fit in a u32, so shift the window onto the array
        let offset = (words.as_mut_ptr() as usize).wrapping_sub(base as usize);
        let mut memory = unsafe { RawMemory::with_offset(base..=base + 11, offset) };

        assert_eq!(memory.read_word(base), Some(0xdeadbeef));
        assert_eq!(memory.read_word(base + 4), Some(0x12345678));
        assert_eq!(memory.write_word(base + 4, 0), Some(()));
        assert_eq!(memory.read_word(base + 4), Some(0));
        assert_eq!(memory.read_word(base + 12), None);
        assert_eq!(memory.read_word(base + 2), None);

        assert_eq!(words, [0xdeadbeef, 0, 0]);
    }

    #[test]
    fn raw_memory_rejects_words_crossing_the_end() {
        let memory = unsafe { RawMemory::new(0x1000..=0x1005) };

        assert_eq!(memory.read_word(0x1004), None);
        assert_eq!(memory.read_word(0xfffffffc), None);
    }

    #[test]
    fn layout_footprint() {
        let layout = KernelLayout {
            start: 0x0010000c,
            entry: 0xf010000c,
            etext: 0xf0101a75,
            edata: 0xf0112300,
            end: 0xf0112960,
            kernel_base: 0xf0000000,
        };

        assert_eq!(layout.physical(layout.entry), 0x0010000c);
        assert_eq!(layout.footprint_kib(), 75);
    }
}
