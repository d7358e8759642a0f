//! frame pointer based stack unwinding
//!
//! every i586 frame built with frame pointers starts like this:
//!
//! ```text
//! fp + 8..  arguments pushed by the caller
//! fp + 4    return address
//! fp        caller's saved frame pointer
//! ```
//!
//! so the chain can be followed from the current frame pointer until a null one, which the kernel entry code pushes
//! as the outermost frame pointer. the callee's real arity isn't known, so a fixed number of argument words is reported

use crate::{
    arch::{FRAME_ARGS, WORD_SIZE},
    mm::Memory,
    util::FormatHex,
};
use core::fmt;
use log::warn;

/// one frame of the call stack
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Frame {
    /// where this frame lives on the stack
    pub frame_pointer: u32,
    /// address this frame's function will return to
    pub return_address: u32,
    /// the words above the return address, which are the call's arguments if it has that many
    pub args: [u32; FRAME_ARGS],
}

impl fmt::Debug for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Frame")
            .field("frame_pointer", &FormatHex(self.frame_pointer))
            .field("return_address", &FormatHex(self.return_address))
            .field("args", &self.args.map(FormatHex))
            .finish()
    }
}

/// iterator over the frames of a call stack, innermost first
pub struct StackFrames<'m, M: Memory + ?Sized> {
    memory: &'m M,
    frame_pointer: u32,
    remaining: usize,
}

impl<'m, M: Memory + ?Sized> StackFrames<'m, M> {
    /// start walking from the given frame pointer, giving up after `max_frames` frames
    pub fn new(memory: &'m M, frame_pointer: u32, max_frames: usize) -> Self {
        Self {
            memory,
            frame_pointer,
            remaining: max_frames,
        }
    }

    /// reads the `index`th word of the frame at `fp`
    fn word(&self, fp: u32, index: u32) -> Option<u32> {
        let addr = fp.checked_add(index * WORD_SIZE)?;
        self.memory.read_word(addr)
    }

    fn read_frame(&self, fp: u32) -> Option<(Frame, u32)> {
        let caller = self.word(fp, 0)?;
        let return_address = self.word(fp, 1)?;

        let mut args = [0; FRAME_ARGS];
        for (i, arg) in args.iter_mut().enumerate() {
            *arg = self.word(fp, 2 + i as u32)?;
        }

        Some((Frame { frame_pointer: fp, return_address, args }, caller))
    }
}

impl<M: Memory + ?Sized> Iterator for StackFrames<'_, M> {
    type Item = Frame;

    fn next(&mut self) -> Option<Frame> {
        let fp = self.frame_pointer;
        if fp == 0 {
            return None;
        }

        if self.remaining == 0 {
            warn!("stack trace cut off at {fp:#x}, frame chain is too long or cyclic");
            self.frame_pointer = 0;
            return None;
        }

        match self.read_frame(fp) {
            Some((frame, caller)) => {
                self.remaining -= 1;
                self.frame_pointer = caller;
                Some(frame)
            }
            None => {
                warn!("can't read stack frame at {fp:#x}, stopping");
                self.frame_pointer = 0;
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test::TestMemory;

    /// lays out a chain of frames at 0x1000, 0x1100, 0x1200, ... terminated by a null frame pointer
    fn build_chain(memory: &mut TestMemory, count: u32) {
        for i in 0..count {
            let fp = 0x1000 + i * 0x100;
            let caller = if i + 1 == count { 0 } else { fp + 0x100 };

            memory.poke(fp, caller);
            memory.poke(fp + 4, 0xf0100000 + i);
            for arg in 0..5 {
                memory.poke(fp + 8 + arg * 4, i * 0x10 + arg);
            }
        }
    }

    #[test]
    fn walks_whole_chain_in_order() {
        let mut memory = TestMemory::new();
        build_chain(&mut memory, 4);

        let frames: Vec<Frame> = StackFrames::new(&memory, 0x1000, 1024).collect();

        assert_eq!(frames.len(), 4);
        for (i, frame) in frames.iter().enumerate() {
            let i = i as u32;
            assert_eq!(frame.frame_pointer, 0x1000 + i * 0x100);
            assert_eq!(frame.return_address, 0xf0100000 + i);
            assert_eq!(frame.args, [i * 0x10, i * 0x10 + 1, i * 0x10 + 2, i * 0x10 + 3, i * 0x10 + 4]);
        }
    }

    #[test]
    fn null_frame_pointer_is_empty() {
        let memory = TestMemory::new();
        assert_eq!(StackFrames::new(&memory, 0, 1024).count(), 0);
    }

    #[test]
    fn cyclic_chain_is_capped() {
        let mut memory = TestMemory::new();
        memory.poke(0x2000, 0x2000);
        memory.poke(0x2004, 0xf0100000);
        for arg in 0..5 {
            memory.poke(0x2008 + arg * 4, arg);
        }

        assert_eq!(StackFrames::new(&memory, 0x2000, 16).count(), 16);
    }

    #[test]
    fn unreadable_frame_stops_walk() {
        let mut memory = TestMemory::new();
        build_chain(&mut memory, 2);
        // point the last frame somewhere with nothing in it
        memory.poke(0x1100, 0x9000);

        assert_eq!(StackFrames::new(&memory, 0x1000, 1024).count(), 2);
    }
}
