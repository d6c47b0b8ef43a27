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

use super::super::{COP0, CPU};
use crate::core::error::Result;

impl CPU {
    // === COP0 Instructions ===

    /// MFC0: Move From Coprocessor 0
    ///
    /// Format: mfc0 rt, rd
    /// Operation: rt = sign_extend(cop0[rd])
    pub(crate) fn op_mfc0(&mut self, rt: u8, rd: u8) -> Result<()> {
        let value = self.cop0.regs[rd as usize];
        self.set_reg_sign_extended(rt, value);
        Ok(())
    }

    /// MTC0: Move To Coprocessor 0
    ///
    /// Writes the low word of rt. No register has side effects yet.
    ///
    /// Format: mtc0 rt, rd
    /// Operation: cop0[rd] = rt[31:0]
    pub(crate) fn op_mtc0(&mut self, rt: u8, rd: u8) -> Result<()> {
        let value = self.reg_lo(rt);
        log::debug!(
            "MTC0: {} = 0x{:08X}",
            COP0::NAMES[rd as usize],
            value
        );
        self.cop0.regs[rd as usize] = value;
        Ok(())
    }
}
