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

//! MIPS instruction disassembler for debugging
//!
//! Renders instruction words as assembler text with ABI register names.
//! Operand layout is chosen from the decoded [`Opcode`], so every word the
//! dispatch tables recognise has a rendering.

use super::cop0::COP0;
use super::decode::{branch_target, decode_i_type, decode_j_type, decode_r_type, jump_target};
use super::opcode::Opcode;

/// ABI names of the general purpose registers, indexed by register number
pub const REGISTER_NAMES: [&str; 32] = [
    "r0", "at", "v0", "v1", "a0", "a1", "a2", "a3", //
    "t0", "t1", "t2", "t3", "t4", "t5", "t6", "t7", //
    "s0", "s1", "s2", "s3", "s4", "s5", "s6", "s7", //
    "t8", "t9", "k0", "k1", "gp", "sp", "s8", "ra",
];

/// Instruction disassembler
///
/// # Example
/// ```
/// use vr4300::core::cpu::Disassembler;
///
/// let disasm = Disassembler::disassemble(0x00000000, 0x80000000);
/// assert_eq!(disasm, "nop");
/// ```
pub struct Disassembler;

impl Disassembler {
    /// Disassemble a single instruction to human-readable format
    ///
    /// # Arguments
    ///
    /// * `instruction` - The 32-bit instruction to disassemble
    /// * `pc` - Address of the instruction (used for branch and jump targets)
    ///
    /// # Example
    /// ```
    /// use vr4300::core::cpu::Disassembler;
    ///
    /// let disasm = Disassembler::disassemble(0x3C011234, 0x80000000);
    /// assert_eq!(disasm, "lui at, 0x1234");
    /// ```
    pub fn disassemble(instruction: u32, pc: u32) -> String {
        if instruction == 0 {
            return "nop".to_string();
        }

        let op = Opcode::decode(instruction);
        let name = op.mnemonic();
        let (rs, rt, rd, sa, _) = decode_r_type(instruction);
        let (_, _, _, imm) = decode_i_type(instruction);
        let (rs, rt, rd) = (reg(rs), reg(rt), reg(rd));

        match op {
            Opcode::Sll
            | Opcode::Srl
            | Opcode::Sra
            | Opcode::Dsll
            | Opcode::Dsrl
            | Opcode::Dsra
            | Opcode::Dsll32
            | Opcode::Dsrl32
            | Opcode::Dsra32 => format!("{} {}, {}, {}", name, rd, rt, sa),

            Opcode::Sllv
            | Opcode::Srlv
            | Opcode::Srav
            | Opcode::Dsllv
            | Opcode::Dsrlv
            | Opcode::Dsrav => format!("{} {}, {}, {}", name, rd, rt, rs),

            Opcode::Jr | Opcode::Mthi | Opcode::Mtlo => format!("{} {}", name, rs),
            Opcode::Jalr => format!("{} {}, {}", name, rd, rs),
            Opcode::Mfhi | Opcode::Mflo => format!("{} {}", name, rd),
            Opcode::Syscall | Opcode::Break | Opcode::Sync => name.to_string(),

            Opcode::Mult
            | Opcode::Multu
            | Opcode::Div
            | Opcode::Divu
            | Opcode::Dmult
            | Opcode::Dmultu
            | Opcode::Ddiv
            | Opcode::Ddivu
            | Opcode::Tge
            | Opcode::Tgeu
            | Opcode::Tlt
            | Opcode::Tltu
            | Opcode::Teq
            | Opcode::Tne => format!("{} {}, {}", name, rs, rt),

            Opcode::Add
            | Opcode::Addu
            | Opcode::Sub
            | Opcode::Subu
            | Opcode::And
            | Opcode::Or
            | Opcode::Xor
            | Opcode::Nor
            | Opcode::Slt
            | Opcode::Sltu
            | Opcode::Dadd
            | Opcode::Daddu
            | Opcode::Dsub
            | Opcode::Dsubu => format!("{} {}, {}, {}", name, rd, rs, rt),

            Opcode::J | Opcode::Jal => {
                let (_, target) = decode_j_type(instruction);
                format!("{} 0x{:08X}", name, jump_target(pc, target))
            }

            Opcode::Beq | Opcode::Bne | Opcode::Beql | Opcode::Bnel => {
                format!("{} {}, {}, 0x{:08X}", name, rs, rt, branch_target(pc, imm))
            }

            Opcode::Blez
            | Opcode::Bgtz
            | Opcode::Blezl
            | Opcode::Bgtzl
            | Opcode::Bltz
            | Opcode::Bgez
            | Opcode::Bltzl
            | Opcode::Bgezl
            | Opcode::Bltzal
            | Opcode::Bgezal
            | Opcode::Bltzall
            | Opcode::Bgezall => format!("{} {}, 0x{:08X}", name, rs, branch_target(pc, imm)),

            Opcode::Tgei
            | Opcode::Tgeiu
            | Opcode::Tlti
            | Opcode::Tltiu
            | Opcode::Teqi
            | Opcode::Tnei => format!("{} {}, {}", name, rs, imm as i16),

            Opcode::Addi
            | Opcode::Addiu
            | Opcode::Slti
            | Opcode::Sltiu
            | Opcode::Daddi
            | Opcode::Daddiu => format!("{} {}, {}, {}", name, rt, rs, imm as i16),

            Opcode::Andi | Opcode::Ori | Opcode::Xori => {
                format!("{} {}, {}, 0x{:04X}", name, rt, rs, imm)
            }
            Opcode::Lui => format!("{} {}, 0x{:04X}", name, rt, imm),

            Opcode::Lb
            | Opcode::Lh
            | Opcode::Lwl
            | Opcode::Lw
            | Opcode::Lbu
            | Opcode::Lhu
            | Opcode::Lwr
            | Opcode::Lwu
            | Opcode::Ldl
            | Opcode::Ldr
            | Opcode::Ld
            | Opcode::Ll
            | Opcode::Lld
            | Opcode::Sb
            | Opcode::Sh
            | Opcode::Swl
            | Opcode::Sw
            | Opcode::Sdl
            | Opcode::Sdr
            | Opcode::Swr
            | Opcode::Sd
            | Opcode::Sc
            | Opcode::Scd => format!("{} {}, {}({})", name, rt, imm as i16, rs),

            // Coprocessor loads and stores name the coprocessor register
            Opcode::Lwc1
            | Opcode::Ldc1
            | Opcode::Ldc2
            | Opcode::Swc1
            | Opcode::Sdc1
            | Opcode::Sdc2 => {
                let (_, _, ft, _) = decode_i_type(instruction);
                format!("{} $f{}, {}({})", name, ft, imm as i16, rs)
            }
            Opcode::Cache => {
                let (_, _, cache_op, _) = decode_i_type(instruction);
                format!("{} 0x{:02X}, {}({})", name, cache_op, imm as i16, rs)
            }

            Opcode::Mfc0 | Opcode::Mtc0 => {
                let (_, _, cop_reg, _, _) = decode_r_type(instruction);
                format!("{} {}, {}", name, rt, COP0::NAMES[cop_reg as usize])
            }

            Opcode::Cop1
            | Opcode::Tlb
            | Opcode::Unknown
            | Opcode::Special
            | Opcode::RegImm
            | Opcode::Cop0 => format!("{} 0x{:08X}", name, instruction),
        }
    }
}

fn reg(index: u8) -> &'static str {
    REGISTER_NAMES[index as usize]
}
