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

use super::super::decode::{decode_j_type, jump_target};
use super::super::CPU;
use crate::core::error::Result;

impl CPU {
    // === Jump Instructions ===

    /// J: Jump
    ///
    /// The target keeps the upper 4 bits of the PC and replaces the rest
    /// with the 26-bit target field shifted left by 2.
    ///
    /// Format: j target
    /// Operation: branch to (PC & 0xF0000000) | (target << 2)
    pub(crate) fn op_j(&mut self, instruction: u32) -> Result<()> {
        let (_, target) = decode_j_type(instruction);
        self.branch_to(jump_target(self.pc, target))
    }

    /// JAL: Jump and Link
    ///
    /// Format: jal target
    /// Operation: ra = PC + 8; branch to (PC & 0xF0000000) | (target << 2)
    pub(crate) fn op_jal(&mut self, instruction: u32) -> Result<()> {
        let (_, target) = decode_j_type(instruction);
        self.link(Self::RA);
        self.branch_to(jump_target(self.pc, target))
    }

    /// JR: Jump Register
    ///
    /// Format: jr rs
    /// Operation: branch to rs[31:0]
    pub(crate) fn op_jr(&mut self, rs: u8) -> Result<()> {
        self.branch_to(self.reg_lo(rs))
    }

    /// JALR: Jump And Link Register
    ///
    /// The target is read before the link is written, so `jalr ra, ra`
    /// jumps to the old value.
    ///
    /// Format: jalr rd, rs
    /// Operation: rd = PC + 8; branch to rs[31:0]
    pub(crate) fn op_jalr(&mut self, rs: u8, rd: u8) -> Result<()> {
        let target = self.reg_lo(rs);
        self.link(rd);
        self.branch_to(target)
    }
}
