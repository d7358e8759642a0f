//! x86 non-PAE page table entries, as seen from the monitor

use bitmask_enum::bitmask;
use core::fmt;

/// mask of the frame address bits of an entry
const ADDR_MASK: u32 = 0xfffff000;

/// mask of the flag bits of an entry
const FLAGS_MASK: u32 = 0x00000fff;

/// entry in a page table
///
/// the monitor never owns these, it only gets a mutable view into a live table from a [`crate::mm::PageWalker`]
#[repr(transparent)]
#[derive(Copy, Clone, Default, PartialEq, Eq)]
pub struct PageTableEntry(u32);

impl PageTableEntry {
    /// create new page table entry
    pub fn new(addr: u32, flags: PageTableFlags) -> Self {
        Self((addr & ADDR_MASK) | (flags.bits() & FLAGS_MASK))
    }

    /// wraps a raw entry as read out of a table
    pub const fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    /// the raw 32 bit value of this entry
    pub const fn raw(&self) -> u32 {
        self.0
    }

    /// gets address of page table entry
    pub const fn get_address(&self) -> u32 {
        self.0 & ADDR_MASK
    }

    /// gets flags of page table entry
    pub const fn get_flags(&self) -> u32 {
        self.0 & FLAGS_MASK
    }

    /// checks whether the given flag is set
    pub fn has(&self, flag: PageTableFlags) -> bool {
        self.0 & flag.bits() != 0
    }

    /// the given flag as a 0 or 1
    pub fn bit(&self, flag: PageTableFlags) -> u32 {
        u32::from(self.has(flag))
    }

    pub fn clear(&mut self, flag: PageTableFlags) {
        self.0 &= !flag.bits();
    }

    pub fn set(&mut self, flag: PageTableFlags) {
        self.0 |= flag.bits();
    }

    pub fn toggle(&mut self, flag: PageTableFlags) {
        self.0 ^= flag.bits();
    }

    /// translates an address inside this entry's page to a physical address, keeping the address' page offset
    pub const fn translate(&self, addr: u32) -> u32 {
        self.get_address() | super::page_offset(addr)
    }

    /// formats the present/user/writable bits the way the monitor prints them
    pub fn permissions(&self) -> Permissions {
        Permissions(*self)
    }
}

impl fmt::Debug for PageTableEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PageTableEntry")
            .field("address", &crate::util::FormatHex(self.get_address()))
            .field("flags", &crate::util::FormatHex(self.get_flags()))
            .finish()
    }
}

/// page table entry flags the monitor cares about
#[bitmask(u32)]
pub enum PageTableFlags {
    /// page is present in memory and can be accessed
    Present = 1 << 0,

    /// code can read and write to page
    ///
    /// absence of this flag forces read only
    ReadWrite = 1 << 1,

    /// page is accessible in user mode
    ///
    /// absence of this flag only allows supervisor access
    UserSupervisor = 1 << 2,
}

/// `PTE_P : 1 PTE_U: 0 PTE_W: 1`
pub struct Permissions(PageTableEntry);

impl fmt::Display for Permissions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "PTE_P : {:x} PTE_U: {:x} PTE_W: {:x}",
            self.0.bit(PageTableFlags::Present),
            self.0.bit(PageTableFlags::UserSupervisor),
            self.0.bit(PageTableFlags::ReadWrite),
        )
    }
}
