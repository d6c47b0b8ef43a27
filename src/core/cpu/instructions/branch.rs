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

use super::super::decode::{branch_target, decode_i_type};
use super::super::CPU;
use crate::core::error::Result;

impl CPU {
    // === Branch Instructions ===
    //
    // Branch targets are relative to the delay slot. Nothing here writes the
    // PC: a taken branch schedules its target, a not-taken "likely" branch
    // annuls its delay slot.

    /// BEQ: Branch on Equal
    ///
    /// Compares the low words of rs and rt.
    ///
    /// Format: beq rs, rt, offset
    /// Operation: if (rs[31:0] == rt[31:0]) branch
    pub(crate) fn op_beq(&mut self, instruction: u32) -> Result<()> {
        let (_, rs, rt, _) = decode_i_type(instruction);
        self.branch_if(self.reg_lo(rs) == self.reg_lo(rt), instruction)
    }

    /// BNE: Branch on Not Equal
    ///
    /// Compares the low words of rs and rt.
    ///
    /// Format: bne rs, rt, offset
    /// Operation: if (rs[31:0] != rt[31:0]) branch
    pub(crate) fn op_bne(&mut self, instruction: u32) -> Result<()> {
        let (_, rs, rt, _) = decode_i_type(instruction);
        self.branch_if(self.reg_lo(rs) != self.reg_lo(rt), instruction)
    }

    /// BLEZ: Branch on Less Than or Equal to Zero
    ///
    /// Format: blez rs, offset
    /// Operation: if (rs <= 0) branch
    pub(crate) fn op_blez(&mut self, instruction: u32) -> Result<()> {
        let (_, rs, _, _) = decode_i_type(instruction);
        self.branch_if((self.reg(rs) as i64) <= 0, instruction)
    }

    /// BGTZ: Branch on Greater Than Zero
    ///
    /// Format: bgtz rs, offset
    /// Operation: if (rs > 0) branch
    pub(crate) fn op_bgtz(&mut self, instruction: u32) -> Result<()> {
        let (_, rs, _, _) = decode_i_type(instruction);
        self.branch_if((self.reg(rs) as i64) > 0, instruction)
    }

    /// BEQL: Branch on Equal Likely
    ///
    /// Compares the full 64-bit registers. Annuls the delay slot when the
    /// branch is not taken.
    ///
    /// Format: beql rs, rt, offset
    pub(crate) fn op_beql(&mut self, instruction: u32) -> Result<()> {
        let (_, rs, rt, _) = decode_i_type(instruction);
        self.branch_likely(self.reg(rs) == self.reg(rt), instruction)
    }

    /// BNEL: Branch on Not Equal Likely
    ///
    /// Format: bnel rs, rt, offset
    pub(crate) fn op_bnel(&mut self, instruction: u32) -> Result<()> {
        let (_, rs, rt, _) = decode_i_type(instruction);
        self.branch_likely(self.reg(rs) != self.reg(rt), instruction)
    }

    /// BLEZL: Branch on Less Than or Equal to Zero Likely
    ///
    /// Format: blezl rs, offset
    pub(crate) fn op_blezl(&mut self, instruction: u32) -> Result<()> {
        let (_, rs, _, _) = decode_i_type(instruction);
        self.branch_likely((self.reg(rs) as i64) <= 0, instruction)
    }

    /// BGTZL: Branch on Greater Than Zero Likely
    ///
    /// Format: bgtzl rs, offset
    pub(crate) fn op_bgtzl(&mut self, instruction: u32) -> Result<()> {
        let (_, rs, _, _) = decode_i_type(instruction);
        self.branch_likely((self.reg(rs) as i64) > 0, instruction)
    }

    /// BLTZ: Branch on Less Than Zero
    ///
    /// Format: bltz rs, offset
    pub(crate) fn op_bltz(&mut self, instruction: u32) -> Result<()> {
        let (_, rs, _, _) = decode_i_type(instruction);
        self.branch_if((self.reg(rs) as i64) < 0, instruction)
    }

    /// BGEZ: Branch on Greater Than or Equal to Zero
    ///
    /// Format: bgez rs, offset
    pub(crate) fn op_bgez(&mut self, instruction: u32) -> Result<()> {
        let (_, rs, _, _) = decode_i_type(instruction);
        self.branch_if((self.reg(rs) as i64) >= 0, instruction)
    }

    /// BLTZL: Branch on Less Than Zero Likely
    ///
    /// Format: bltzl rs, offset
    pub(crate) fn op_bltzl(&mut self, instruction: u32) -> Result<()> {
        let (_, rs, _, _) = decode_i_type(instruction);
        self.branch_likely((self.reg(rs) as i64) < 0, instruction)
    }

    /// BGEZL: Branch on Greater Than or Equal to Zero Likely
    ///
    /// Format: bgezl rs, offset
    pub(crate) fn op_bgezl(&mut self, instruction: u32) -> Result<()> {
        let (_, rs, _, _) = decode_i_type(instruction);
        self.branch_likely((self.reg(rs) as i64) >= 0, instruction)
    }

    /// BLTZAL: Branch on Less Than Zero And Link
    ///
    /// The return address (branch + 8) is written to ra whether or not the
    /// branch is taken.
    ///
    /// Format: bltzal rs, offset
    pub(crate) fn op_bltzal(&mut self, instruction: u32) -> Result<()> {
        let (_, rs, _, _) = decode_i_type(instruction);
        let condition = (self.reg(rs) as i64) < 0;
        self.link(Self::RA);
        self.branch_if(condition, instruction)
    }

    /// BGEZAL: Branch on Greater Than or Equal to Zero And Link
    ///
    /// Format: bgezal rs, offset
    pub(crate) fn op_bgezal(&mut self, instruction: u32) -> Result<()> {
        let (_, rs, _, _) = decode_i_type(instruction);
        let condition = (self.reg(rs) as i64) >= 0;
        self.link(Self::RA);
        self.branch_if(condition, instruction)
    }

    /// Schedule the PC-relative target of `instruction` if `condition` holds
    fn branch_if(&mut self, condition: bool, instruction: u32) -> Result<()> {
        if condition {
            let (_, _, _, imm) = decode_i_type(instruction);
            self.branch_to(branch_target(self.pc, imm))?;
        }
        Ok(())
    }

    /// Like `branch_if`, but annul the delay slot when not taken
    fn branch_likely(&mut self, condition: bool, instruction: u32) -> Result<()> {
        if condition {
            self.branch_if(true, instruction)
        } else {
            self.annul_delay_slot();
            Ok(())
        }
    }

    /// Schedule an absolute branch target
    pub(crate) fn branch_to(&mut self, target: u32) -> Result<()> {
        self.schedule_branch(i64::from(target))
    }

    /// Write the return address (current instruction + 8) to `reg`
    pub(crate) fn link(&mut self, reg: u8) {
        let return_address = self.pc.wrapping_add(2 * Self::INSTRUCTION_WIDTH);
        self.set_reg_sign_extended(reg, return_address);
    }
}
