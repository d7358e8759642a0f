//! monitor settings

use crate::arch::MAX_STACK_FRAMES;

/// knobs the embedding kernel can turn when it sets up a [`crate::Monitor`]
#[derive(Debug, Clone, Copy)]
pub struct MonitorConfig {
    /// printed before every line read
    pub prompt: &'static str,

    /// most frames `backtrace` will walk before giving up, guards against corrupted or cyclic frame chains
    pub max_frames: usize,

    /// whether the page walker may allocate intermediate page tables while resolving addresses
    pub create_tables: bool,

    /// whether a wrong argument count ends the monitor session (the historical behavior) or just the command
    pub fatal_usage_errors: bool,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            prompt: "K> ",
            max_frames: MAX_STACK_FRAMES,
            create_tables: true,
            fatal_usage_errors: true,
        }
    }
}
