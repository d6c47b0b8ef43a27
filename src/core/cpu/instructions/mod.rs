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

//! CPU instruction implementations
//!
//! This module contains the instruction handlers, organized by instruction
//! family. Every handler returns `Result<()>`; an `Err` is an
//! instruction-level fault that unwinds to the run loop.

use super::decode::decode_r_type;
use super::opcode::Opcode;
use super::{Disassembler, CPU};
use crate::core::error::{EmulatorError, Result};
use crate::core::memory::Memory;

// Instruction modules organized by type
mod arithmetic;
mod branch;
mod cop0;
mod jump;
mod load;
mod logical;
mod multiply;
mod shift;
mod store;

impl CPU {
    /// Decode and execute one instruction
    ///
    /// The opcode is resolved through the dispatch tables, then matched to
    /// its handler. The match is exhaustive: every opcode either has real
    /// semantics or is listed as unimplemented.
    ///
    /// # Arguments
    ///
    /// * `instruction` - The 32-bit instruction word
    /// * `bus` - Memory interface for loads and stores
    pub(super) fn execute_instruction(
        &mut self,
        instruction: u32,
        bus: &mut dyn Memory,
    ) -> Result<()> {
        let (rs, rt, rd, sa, _) = decode_r_type(instruction);

        match Opcode::decode(instruction) {
            // Shifts
            Opcode::Sll if instruction == 0 => Ok(()), // NOP
            Opcode::Sll => self.op_sll(rt, rd, sa),
            Opcode::Srl => self.op_srl(rt, rd, sa),
            Opcode::Sra => self.op_sra(rt, rd, sa),
            Opcode::Sllv => self.op_sllv(rs, rt, rd),
            Opcode::Srlv => self.op_srlv(rs, rt, rd),
            Opcode::Srav => self.op_srav(rs, rt, rd),

            // Arithmetic (ADD/SUB never trap on overflow here)
            Opcode::Add | Opcode::Addu => self.op_addu(rs, rt, rd),
            Opcode::Sub | Opcode::Subu => self.op_subu(rs, rt, rd),
            Opcode::Addi | Opcode::Addiu => self.op_addiu(instruction),
            Opcode::Slt => self.op_slt(rs, rt, rd),
            Opcode::Sltu => self.op_sltu(rs, rt, rd),
            Opcode::Slti => self.op_slti(instruction),

            // Logical
            Opcode::And => self.op_and(rs, rt, rd),
            Opcode::Or => self.op_or(rs, rt, rd),
            Opcode::Xor => self.op_xor(rs, rt, rd),
            Opcode::Nor => self.op_nor(rs, rt, rd),
            Opcode::Andi => self.op_andi(instruction),
            Opcode::Ori => self.op_ori(instruction),
            Opcode::Xori => self.op_xori(instruction),
            Opcode::Lui => self.op_lui(instruction),

            // Multiply
            Opcode::Mult => self.op_mult(rs, rt),
            Opcode::Multu => self.op_multu(rs, rt),
            Opcode::Mfhi => self.op_mfhi(rd),
            Opcode::Mflo => self.op_mflo(rd),

            // Jumps
            Opcode::J => self.op_j(instruction),
            Opcode::Jal => self.op_jal(instruction),
            Opcode::Jr => self.op_jr(rs),
            Opcode::Jalr => self.op_jalr(rs, rd),

            // Branches
            Opcode::Beq => self.op_beq(instruction),
            Opcode::Bne => self.op_bne(instruction),
            Opcode::Blez => self.op_blez(instruction),
            Opcode::Bgtz => self.op_bgtz(instruction),
            Opcode::Beql => self.op_beql(instruction),
            Opcode::Bnel => self.op_bnel(instruction),
            Opcode::Blezl => self.op_blezl(instruction),
            Opcode::Bgtzl => self.op_bgtzl(instruction),
            Opcode::Bltz => self.op_bltz(instruction),
            Opcode::Bgez => self.op_bgez(instruction),
            Opcode::Bltzl => self.op_bltzl(instruction),
            Opcode::Bgezl => self.op_bgezl(instruction),
            Opcode::Bltzal => self.op_bltzal(instruction),
            Opcode::Bgezal => self.op_bgezal(instruction),

            // Loads and stores
            Opcode::Lb => self.op_lb(instruction, bus),
            Opcode::Lbu => self.op_lbu(instruction, bus),
            Opcode::Lw => self.op_lw(instruction, bus),
            Opcode::Lwu => self.op_lwu(instruction, bus),
            Opcode::Sb => self.op_sb(instruction, bus),
            Opcode::Sw => self.op_sw(instruction, bus),
            Opcode::Cache => Ok(()),

            // COP0
            Opcode::Mfc0 => self.op_mfc0(rt, rd),
            Opcode::Mtc0 => self.op_mtc0(rt, rd),

            // No semantics yet: divide, HI/LO writes, 64-bit ALU, traps,
            // exceptions, partial-word and doubleword memory, FPU, TLB
            Opcode::Mthi
            | Opcode::Mtlo
            | Opcode::Div
            | Opcode::Divu
            | Opcode::Dmult
            | Opcode::Dmultu
            | Opcode::Ddiv
            | Opcode::Ddivu
            | Opcode::Dadd
            | Opcode::Daddu
            | Opcode::Dsub
            | Opcode::Dsubu
            | Opcode::Daddi
            | Opcode::Daddiu
            | Opcode::Dsll
            | Opcode::Dsrl
            | Opcode::Dsra
            | Opcode::Dsll32
            | Opcode::Dsrl32
            | Opcode::Dsra32
            | Opcode::Dsllv
            | Opcode::Dsrlv
            | Opcode::Dsrav
            | Opcode::Sltiu
            | Opcode::Syscall
            | Opcode::Break
            | Opcode::Sync
            | Opcode::Tge
            | Opcode::Tgeu
            | Opcode::Tlt
            | Opcode::Tltu
            | Opcode::Teq
            | Opcode::Tne
            | Opcode::Tgei
            | Opcode::Tgeiu
            | Opcode::Tlti
            | Opcode::Tltiu
            | Opcode::Teqi
            | Opcode::Tnei
            | Opcode::Bltzall
            | Opcode::Bgezall
            | Opcode::Lh
            | Opcode::Lhu
            | Opcode::Lwl
            | Opcode::Lwr
            | Opcode::Ldl
            | Opcode::Ldr
            | Opcode::Ld
            | Opcode::Ll
            | Opcode::Lld
            | Opcode::Sh
            | Opcode::Swl
            | Opcode::Swr
            | Opcode::Sdl
            | Opcode::Sdr
            | Opcode::Sd
            | Opcode::Sc
            | Opcode::Scd
            | Opcode::Cop1
            | Opcode::Lwc1
            | Opcode::Swc1
            | Opcode::Ldc1
            | Opcode::Sdc1
            | Opcode::Ldc2
            | Opcode::Sdc2
            | Opcode::Tlb
            | Opcode::Unknown
            | Opcode::Special
            | Opcode::RegImm
            | Opcode::Cop0 => self.op_unimplemented(instruction),
        }
    }

    /// Raise an unimplemented-instruction fault for the current instruction
    ///
    /// The fault carries the instruction address, the raw word and its
    /// disassembly.
    pub(super) fn op_unimplemented(&self, instruction: u32) -> Result<()> {
        Err(EmulatorError::UnimplementedInstruction {
            address: self.pc,
            instruction,
            disassembly: Disassembler::disassemble(instruction, self.pc),
        })
    }
}
