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

use super::super::{sign_extend, CPU};
use crate::core::error::Result;

impl CPU {
    // === Multiply Instructions ===

    /// MULT: Multiply (signed)
    ///
    /// Multiplies the low words of two registers as signed 32-bit integers.
    /// The low word of the 64-bit product goes to LO and the high word to
    /// HI, each sign-extended to 64 bits.
    ///
    /// Format: mult rs, rt
    /// Operation: (HI, LO) = rs[31:0] * rt[31:0]
    ///
    /// # Example
    ///
    /// ```ignore
    /// // -1 * 1 = -1
    /// // LO = 0xFFFFFFFF_FFFFFFFF, HI = 0xFFFFFFFF_FFFFFFFF
    /// cpu.set_reg_sign_extended(1, 0xFFFFFFFF);
    /// cpu.set_reg_sign_extended(2, 1);
    /// cpu.op_mult(1, 2);
    /// ```
    pub(crate) fn op_mult(&mut self, rs: u8, rt: u8) -> Result<()> {
        let a = self.reg_lo(rs) as i32 as i64;
        let b = self.reg_lo(rt) as i32 as i64;
        let result = a * b;

        self.lo = sign_extend(result as u32);
        self.hi = sign_extend((result >> 32) as u32);
        Ok(())
    }

    /// MULTU: Multiply Unsigned
    ///
    /// Shares the signed computation of MULT, so operands with bit 31 set
    /// produce a signed rather than an unsigned product.
    ///
    /// Format: multu rs, rt
    /// Operation: (HI, LO) = rs[31:0] * rt[31:0]
    pub(crate) fn op_multu(&mut self, rs: u8, rt: u8) -> Result<()> {
        self.op_mult(rs, rt)
    }

    /// MFHI: Move From HI
    ///
    /// Format: mfhi rd
    /// Operation: rd = HI
    pub(crate) fn op_mfhi(&mut self, rd: u8) -> Result<()> {
        self.set_reg(rd, self.hi);
        Ok(())
    }

    /// MFLO: Move From LO
    ///
    /// Format: mflo rd
    /// Operation: rd = LO
    pub(crate) fn op_mflo(&mut self, rd: u8) -> Result<()> {
        self.set_reg(rd, self.lo);
        Ok(())
    }
}
