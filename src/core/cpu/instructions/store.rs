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

use super::super::CPU;
use crate::core::error::Result;
use crate::core::memory::Memory;

impl CPU {
    // === Store Instructions ===

    /// SB: Store Byte
    ///
    /// Format: sb rt, offset(base)
    /// Operation: memory[base + offset] = rt[7:0]
    pub(crate) fn op_sb(&mut self, instruction: u32, bus: &mut dyn Memory) -> Result<()> {
        let (rt, addr) = self.effective_address(instruction);
        bus.write8(addr, self.reg_lo(rt) as u8)
    }

    /// SW: Store Word
    ///
    /// Format: sw rt, offset(base)
    /// Operation: memory[base + offset] = rt[31:0]
    pub(crate) fn op_sw(&mut self, instruction: u32, bus: &mut dyn Memory) -> Result<()> {
        let (rt, addr) = self.effective_address(instruction);
        bus.write32(addr, self.reg_lo(rt))
    }
}
