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

impl CPU {
    // === Shift Instructions ===
    //
    // All 32-bit shifts operate on the low word and write the result
    // sign-extended. Variable shifts use the low 5 bits of rs.

    /// SLL: Shift Left Logical
    ///
    /// The all-zero encoding (NOP) is filtered out before dispatch.
    ///
    /// Format: sll rd, rt, sa
    /// Operation: rd = sign_extend(rt[31:0] << sa)
    pub(crate) fn op_sll(&mut self, rt: u8, rd: u8, sa: u8) -> Result<()> {
        let result = self.reg_lo(rt) << sa;
        self.set_reg_sign_extended(rd, result);
        Ok(())
    }

    /// SRL: Shift Right Logical (zero-fill)
    ///
    /// Format: srl rd, rt, sa
    /// Operation: rd = sign_extend(rt[31:0] >> sa)
    pub(crate) fn op_srl(&mut self, rt: u8, rd: u8, sa: u8) -> Result<()> {
        let result = self.reg_lo(rt) >> sa;
        self.set_reg_sign_extended(rd, result);
        Ok(())
    }

    /// SRA: Shift Right Arithmetic (sign-fill)
    ///
    /// Format: sra rd, rt, sa
    /// Operation: rd = sign_extend(rt[31:0] >>a sa)
    pub(crate) fn op_sra(&mut self, rt: u8, rd: u8, sa: u8) -> Result<()> {
        let result = ((self.reg_lo(rt) as i32) >> sa) as u32;
        self.set_reg_sign_extended(rd, result);
        Ok(())
    }

    /// SLLV: Shift Left Logical Variable
    ///
    /// Format: sllv rd, rt, rs
    /// Operation: rd = sign_extend(rt[31:0] << (rs & 0x1F))
    pub(crate) fn op_sllv(&mut self, rs: u8, rt: u8, rd: u8) -> Result<()> {
        let shamt = self.reg_lo(rs) & 0x1F;
        let result = self.reg_lo(rt) << shamt;
        self.set_reg_sign_extended(rd, result);
        Ok(())
    }

    /// SRLV: Shift Right Logical Variable
    ///
    /// Format: srlv rd, rt, rs
    /// Operation: rd = sign_extend(rt[31:0] >> (rs & 0x1F))
    pub(crate) fn op_srlv(&mut self, rs: u8, rt: u8, rd: u8) -> Result<()> {
        let shamt = self.reg_lo(rs) & 0x1F;
        let result = self.reg_lo(rt) >> shamt;
        self.set_reg_sign_extended(rd, result);
        Ok(())
    }

    /// SRAV: Shift Right Arithmetic Variable
    ///
    /// Format: srav rd, rt, rs
    /// Operation: rd = sign_extend(rt[31:0] >>a (rs & 0x1F))
    pub(crate) fn op_srav(&mut self, rs: u8, rt: u8, rd: u8) -> Result<()> {
        let shamt = self.reg_lo(rs) & 0x1F;
        let result = ((self.reg_lo(rt) as i32) >> shamt) as u32;
        self.set_reg_sign_extended(rd, result);
        Ok(())
    }
}
