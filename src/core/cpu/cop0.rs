// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 itsakeyfut
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

/// Coprocessor 0 (System Control)
///
/// COP0 owns the system control registers (status, cause, exception PC, TLB
/// state, ...). Only register reads and writes are modelled; TLB translation
/// and exception vectoring are outside this core, so no register has side
/// effects.
pub struct COP0 {
    /// COP0 registers (32 registers, 32-bit each)
    pub(super) regs: [u32; 32],
}

impl COP0 {
    /// TLB index
    pub const INDEX: usize = 0;
    /// TLB random index
    pub const RANDOM: usize = 1;
    /// TLB entry low (even page)
    pub const ENTRY_LO0: usize = 2;
    /// TLB entry low (odd page)
    pub const ENTRY_LO1: usize = 3;
    /// Page table context
    pub const CONTEXT: usize = 4;
    /// TLB page mask
    pub const PAGE_MASK: usize = 5;
    /// Wired TLB entries
    pub const WIRED: usize = 6;
    /// Bad virtual address
    pub const BAD_VADDR: usize = 8;
    /// Timer count
    pub const COUNT: usize = 9;
    /// TLB entry high
    pub const ENTRY_HI: usize = 10;
    /// Timer compare
    pub const COMPARE: usize = 11;
    /// Status register
    pub const SR: usize = 12;
    /// Cause register
    pub const CAUSE: usize = 13;
    /// Exception PC
    pub const EPC: usize = 14;
    /// Processor revision identifier
    pub const PRID: usize = 15;
    /// Configuration
    pub const CONFIG: usize = 16;
    /// Load-linked address
    pub const LL_ADDR: usize = 17;
    /// Watchpoint low
    pub const WATCH_LO: usize = 18;
    /// Watchpoint high
    pub const WATCH_HI: usize = 19;
    /// Parity error
    pub const ECC: usize = 26;
    /// Cache error
    pub const CACHE_ERR: usize = 27;
    /// Cache tag low
    pub const TAG_LO: usize = 28;
    /// Cache tag high
    pub const TAG_HI: usize = 29;
    /// Error exception PC
    pub const ERROR_EPC: usize = 30;

    /// Register names, indexed by register number
    pub const NAMES: [&'static str; 32] = [
        "Index", "Random", "EntryLo0", "EntryLo1", "Context", "PageMask", "Wired", "r7",
        "BadVAddr", "Count", "EntryHi", "Compare", "SR", "Cause", "EPC", "PRId",
        "Config", "LLAddr", "WatchLo", "WatchHi", "r20", "r21", "r22", "r23",
        "r24", "r25", "ECC", "CacheErr", "TagLo", "TagHi", "ErrorEPC", "r31",
    ];

    /// Create a new COP0 instance with all registers zeroed
    pub(super) fn new() -> Self {
        Self { regs: [0u32; 32] }
    }

    /// Reset COP0 registers to initial state
    pub(super) fn reset(&mut self) {
        self.regs = [0u32; 32];
    }
}
