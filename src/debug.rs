//! symbolic debug info for instruction addresses

use core::fmt;

/// where an instruction address lives in the source, as reported by the kernel's symbol tables
#[derive(Clone, Copy)]
pub struct DebugInfo<'a> {
    /// source file name
    pub file: &'a str,
    /// source line number
    pub line: u32,
    /// name of the enclosing function, not necessarily ending where the name does (see `fn_name_len`)
    pub fn_name: &'a str,
    /// length of the function name inside `fn_name`
    pub fn_name_len: usize,
    /// start address of the enclosing function
    pub fn_addr: u32,
}

impl<'a> DebugInfo<'a> {
    /// placeholder info for addresses the resolver knows nothing about
    pub const fn unknown(eip: u32) -> Self {
        Self {
            file: "<unknown>",
            line: 0,
            fn_name: "<unknown>",
            fn_name_len: 9,
            fn_addr: eip,
        }
    }

    /// the function name, cut down to its reported length
    pub fn function(&self) -> &'a str {
        let len = self.fn_name_len.min(self.fn_name.len());
        self.fn_name.get(..len).unwrap_or(self.fn_name)
    }

    /// how far into its function an address is
    pub const fn offset(&self, eip: u32) -> u32 {
        eip.wrapping_sub(self.fn_addr)
    }
}

impl fmt::Debug for DebugInfo<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DebugInfo")
            .field("file", &self.file)
            .field("line", &self.line)
            .field("function", &self.function())
            .field("fn_addr", &crate::util::FormatHex(self.fn_addr))
            .finish()
    }
}

/// maps instruction addresses back to source locations
pub trait SymbolResolver {
    /// looks up the debug info for an instruction address, `None` if it isn't covered by any symbol
    fn resolve(&self, eip: u32) -> Option<DebugInfo<'_>>;
}

/// resolver for kernels without any symbol info, everything is unknown
pub struct NoSymbols;

impl SymbolResolver for NoSymbols {
    fn resolve(&self, _eip: u32) -> Option<DebugInfo<'_>> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn function_name_is_bounded_by_length() {
        let info = DebugInfo {
            file: "kern/monitor.c",
            line: 143,
            fn_name: "monitor:F(0,1)",
            fn_name_len: 7,
            fn_addr: 0xf0100900,
        };

        assert_eq!(info.function(), "monitor");
        assert_eq!(info.offset(0xf010096a), 106);
    }

    #[test]
    fn no_symbols_resolves_nothing() {
        assert!(NoSymbols.resolve(0xf0100000).is_none());
    }

    #[test]
    fn oversized_length_is_clamped() {
        let info = DebugInfo { fn_name_len: 100, ..DebugInfo::unknown(0) };
        assert_eq!(info.function(), "<unknown>");
    }
}
