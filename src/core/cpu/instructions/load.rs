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

use super::super::decode::{decode_i_type, sign_extend_imm};
use super::super::CPU;
use crate::core::error::Result;
use crate::core::memory::Memory;

impl CPU {
    // === Load Instructions ===
    //
    // Results are visible to the very next instruction; there is no load
    // delay to model.

    /// LB: Load Byte
    ///
    /// Format: lb rt, offset(base)
    /// Operation: rt = sign_extend(memory[base + offset])
    pub(crate) fn op_lb(&mut self, instruction: u32, bus: &mut dyn Memory) -> Result<()> {
        let (rt, addr) = self.effective_address(instruction);
        let value = bus.read8(addr)? as i8 as i64 as u64;
        self.set_reg(rt, value);
        Ok(())
    }

    /// LBU: Load Byte Unsigned
    ///
    /// Format: lbu rt, offset(base)
    /// Operation: rt = zero_extend(memory[base + offset])
    pub(crate) fn op_lbu(&mut self, instruction: u32, bus: &mut dyn Memory) -> Result<()> {
        let (rt, addr) = self.effective_address(instruction);
        let value = bus.read8(addr)?;
        self.set_reg(rt, u64::from(value));
        Ok(())
    }

    /// LW: Load Word
    ///
    /// A load into r0 is dropped before memory is touched, so it can
    /// never fault.
    ///
    /// Format: lw rt, offset(base)
    /// Operation: rt = sign_extend(memory[base + offset])
    pub(crate) fn op_lw(&mut self, instruction: u32, bus: &mut dyn Memory) -> Result<()> {
        let (rt, addr) = self.effective_address(instruction);
        if rt == 0 {
            return Ok(());
        }
        let value = bus.read32(addr)?;
        self.set_reg_sign_extended(rt, value);
        Ok(())
    }

    /// LWU: Load Word Unsigned
    ///
    /// Format: lwu rt, offset(base)
    /// Operation: rt = zero_extend(memory[base + offset])
    pub(crate) fn op_lwu(&mut self, instruction: u32, bus: &mut dyn Memory) -> Result<()> {
        let (rt, addr) = self.effective_address(instruction);
        let value = bus.read32(addr)?;
        self.set_reg_zero_extended(rt, value);
        Ok(())
    }

    /// Decode base/offset addressing
    ///
    /// # Returns
    ///
    /// Tuple of (rt, address) where address is
    /// `base[31:0] + sign_extend(offset)` modulo 2^32
    pub(crate) fn effective_address(&self, instruction: u32) -> (u8, u32) {
        let (_, base, rt, imm) = decode_i_type(instruction);
        let addr = self.reg_lo(base).wrapping_add(sign_extend_imm(imm));
        (rt, addr)
    }
}
