//! i586 constants and register access

pub mod paging;

// various useful constants
pub const PAGE_SIZE: usize = 0x1000;
pub const INV_PAGE_SIZE: usize = !(PAGE_SIZE - 1);

/// size of a machine word in bytes
pub const WORD_SIZE: u32 = 4;

/// how many saved words after the return address get reported as call arguments
pub const FRAME_ARGS: usize = 5;

pub const MAX_STACK_FRAMES: usize = 1024;

/// offset of an address into its page
pub const fn page_offset(addr: u32) -> u32 {
    addr & !(INV_PAGE_SIZE as u32)
}

/// rounds an address down to the start of its page
pub const fn page_align(addr: u32) -> u32 {
    addr & INV_PAGE_SIZE as u32
}

/// reads ebp in place, giving the frame pointer of whatever function this is expanded in
///
/// this has to be a macro: a function would hand back its own frame, which is gone once it returns
#[cfg(target_arch = "x86")]
macro_rules! frame_pointer {
    () => {{
        let ebp: u32;

        unsafe {
            core::arch::asm!("mov {}, ebp", out(reg) ebp, options(nomem, nostack, preserves_flags));
        }

        ebp
    }};
}

/// there's no frame pointer chain we can safely walk on other architectures, so just report an empty stack
#[cfg(not(target_arch = "x86"))]
macro_rules! frame_pointer {
    () => {
        0u32
    };
}

pub(crate) use frame_pointer;

/// invalidates the tlb entry for the page containing the given address
#[cfg(target_arch = "x86")]
pub fn flush_tlb(addr: u32) {
    unsafe {
        x86::tlb::flush(addr as usize);
    }
}

#[cfg(not(target_arch = "x86"))]
pub fn flush_tlb(_addr: u32) {}
