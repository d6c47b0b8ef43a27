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

//! Opcode dispatch tables
//!
//! Instructions are resolved in up to two table lookups:
//!
//! | Primary opcode | Redirects through      | Table            | Size |
//! |----------------|------------------------|------------------|------|
//! | any            | bits [31:26]           | `PRIMARY_TABLE`  | 64   |
//! | 0x00 SPECIAL   | function field [5:0]   | `SPECIAL_TABLE`  | 64   |
//! | 0x01 REGIMM    | rt field [20:16]       | `REGIMM_TABLE`   | 32   |
//! | 0x10 COP0      | format field [25:21]   | `COP0_TABLE`     | 32   |
//!
//! Every slot of every table names an [`Opcode`]; combinations the
//! architecture leaves unassigned resolve to [`Opcode::Unknown`], which the
//! executor turns into an unimplemented-instruction fault. Table sizes are
//! checked at compile time.

/// Decoded instruction kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Opcode {
    // Redirect markers (primary table only, never returned by `decode`)
    Special,
    RegImm,
    Cop0,

    Unknown,

    // Primary
    J,
    Jal,
    Beq,
    Bne,
    Blez,
    Bgtz,
    Addi,
    Addiu,
    Slti,
    Sltiu,
    Andi,
    Ori,
    Xori,
    Lui,
    Cop1,
    Beql,
    Bnel,
    Blezl,
    Bgtzl,
    Daddi,
    Daddiu,
    Ldl,
    Ldr,
    Lb,
    Lh,
    Lwl,
    Lw,
    Lbu,
    Lhu,
    Lwr,
    Lwu,
    Sb,
    Sh,
    Swl,
    Sw,
    Sdl,
    Sdr,
    Swr,
    Cache,
    Ll,
    Lwc1,
    Lld,
    Ldc1,
    Ldc2,
    Ld,
    Sc,
    Swc1,
    Scd,
    Sdc1,
    Sdc2,
    Sd,

    // SPECIAL
    Sll,
    Srl,
    Sra,
    Sllv,
    Srlv,
    Srav,
    Jr,
    Jalr,
    Syscall,
    Break,
    Sync,
    Mfhi,
    Mthi,
    Mflo,
    Mtlo,
    Dsllv,
    Dsrlv,
    Dsrav,
    Mult,
    Multu,
    Div,
    Divu,
    Dmult,
    Dmultu,
    Ddiv,
    Ddivu,
    Add,
    Addu,
    Sub,
    Subu,
    And,
    Or,
    Xor,
    Nor,
    Slt,
    Sltu,
    Dadd,
    Daddu,
    Dsub,
    Dsubu,
    Tge,
    Tgeu,
    Tlt,
    Tltu,
    Teq,
    Tne,
    Dsll,
    Dsrl,
    Dsra,
    Dsll32,
    Dsrl32,
    Dsra32,

    // REGIMM
    Bltz,
    Bgez,
    Bltzl,
    Bgezl,
    Tgei,
    Tgeiu,
    Tlti,
    Tltiu,
    Teqi,
    Tnei,
    Bltzal,
    Bgezal,
    Bltzall,
    Bgezall,

    // COP0
    Mfc0,
    Mtc0,
    Tlb,
}

use Opcode::*;

/// Primary opcode table, indexed by bits [31:26]
pub(crate) const PRIMARY_TABLE: &[Opcode] = &[
    Special, RegImm, J, Jal, Beq, Bne, Blez, Bgtz, // 0x00
    Addi, Addiu, Slti, Sltiu, Andi, Ori, Xori, Lui, // 0x08
    Cop0, Cop1, Unknown, Unknown, Beql, Bnel, Blezl, Bgtzl, // 0x10
    Daddi, Daddiu, Ldl, Ldr, Unknown, Unknown, Unknown, Unknown, // 0x18
    Lb, Lh, Lwl, Lw, Lbu, Lhu, Lwr, Lwu, // 0x20
    Sb, Sh, Swl, Sw, Sdl, Sdr, Swr, Cache, // 0x28
    Ll, Lwc1, Unknown, Unknown, Lld, Ldc1, Ldc2, Ld, // 0x30
    Sc, Swc1, Unknown, Unknown, Scd, Sdc1, Sdc2, Sd, // 0x38
];

/// SPECIAL table, indexed by the function field
pub(crate) const SPECIAL_TABLE: &[Opcode] = &[
    Sll, Unknown, Srl, Sra, Sllv, Unknown, Srlv, Srav, // 0x00
    Jr, Jalr, Unknown, Unknown, Syscall, Break, Unknown, Sync, // 0x08
    Mfhi, Mthi, Mflo, Mtlo, Dsllv, Unknown, Dsrlv, Dsrav, // 0x10
    Mult, Multu, Div, Divu, Dmult, Dmultu, Ddiv, Ddivu, // 0x18
    Add, Addu, Sub, Subu, And, Or, Xor, Nor, // 0x20
    Unknown, Unknown, Slt, Sltu, Dadd, Daddu, Dsub, Dsubu, // 0x28
    Tge, Tgeu, Tlt, Tltu, Teq, Unknown, Tne, Unknown, // 0x30
    Dsll, Unknown, Dsrl, Dsra, Dsll32, Unknown, Dsrl32, Dsra32, // 0x38
];

/// REGIMM table, indexed by the rt field
pub(crate) const REGIMM_TABLE: &[Opcode] = &[
    Bltz, Bgez, Bltzl, Bgezl, Unknown, Unknown, Unknown, Unknown, // 0x00
    Tgei, Tgeiu, Tlti, Tltiu, Teqi, Unknown, Tnei, Unknown, // 0x08
    Bltzal, Bgezal, Bltzall, Bgezall, Unknown, Unknown, Unknown, Unknown, // 0x10
    Unknown, Unknown, Unknown, Unknown, Unknown, Unknown, Unknown, Unknown, // 0x18
];

/// COP0 table, indexed by the format field in the rs position
pub(crate) const COP0_TABLE: &[Opcode] = &[
    Mfc0, Unknown, Unknown, Unknown, Mtc0, Unknown, Unknown, Unknown, // 0x00
    Unknown, Unknown, Unknown, Unknown, Unknown, Unknown, Unknown, Unknown, // 0x08
    Tlb, Unknown, Unknown, Unknown, Unknown, Unknown, Unknown, Unknown, // 0x10
    Unknown, Unknown, Unknown, Unknown, Unknown, Unknown, Unknown, Unknown, // 0x18
];

const _: () = assert!(PRIMARY_TABLE.len() == 64, "primary table must have 64 entries");
const _: () = assert!(SPECIAL_TABLE.len() == 64, "special table must have 64 entries");
const _: () = assert!(REGIMM_TABLE.len() == 32, "regimm table must have 32 entries");
const _: () = assert!(COP0_TABLE.len() == 32, "cop0 table must have 32 entries");

impl Opcode {
    /// Resolve an instruction word to its opcode
    ///
    /// Total over all 32-bit inputs; never returns a redirect marker.
    ///
    /// # Example
    ///
    /// ```
    /// use vr4300::core::cpu::Opcode;
    ///
    /// assert_eq!(Opcode::decode(0x00000000), Opcode::Sll);
    /// assert_eq!(Opcode::decode(0x0C000000), Opcode::Jal);
    /// assert_eq!(Opcode::decode(0x04110000), Opcode::Bgezal);
    /// assert_eq!(Opcode::decode(0x40800000), Opcode::Mtc0);
    /// ```
    #[inline]
    pub fn decode(instruction: u32) -> Opcode {
        match PRIMARY_TABLE[(instruction >> 26) as usize] {
            Special => SPECIAL_TABLE[(instruction & 0x3F) as usize],
            RegImm => REGIMM_TABLE[((instruction >> 16) & 0x1F) as usize],
            Cop0 => COP0_TABLE[((instruction >> 21) & 0x1F) as usize],
            op => op,
        }
    }

    /// Lower-case assembler mnemonic
    pub fn mnemonic(self) -> &'static str {
        match self {
            Special => "special",
            RegImm => "regimm",
            Cop0 => "cop0",
            Unknown => "unknown",
            J => "j",
            Jal => "jal",
            Beq => "beq",
            Bne => "bne",
            Blez => "blez",
            Bgtz => "bgtz",
            Addi => "addi",
            Addiu => "addiu",
            Slti => "slti",
            Sltiu => "sltiu",
            Andi => "andi",
            Ori => "ori",
            Xori => "xori",
            Lui => "lui",
            Cop1 => "cop1",
            Beql => "beql",
            Bnel => "bnel",
            Blezl => "blezl",
            Bgtzl => "bgtzl",
            Daddi => "daddi",
            Daddiu => "daddiu",
            Ldl => "ldl",
            Ldr => "ldr",
            Lb => "lb",
            Lh => "lh",
            Lwl => "lwl",
            Lw => "lw",
            Lbu => "lbu",
            Lhu => "lhu",
            Lwr => "lwr",
            Lwu => "lwu",
            Sb => "sb",
            Sh => "sh",
            Swl => "swl",
            Sw => "sw",
            Sdl => "sdl",
            Sdr => "sdr",
            Swr => "swr",
            Cache => "cache",
            Ll => "ll",
            Lwc1 => "lwc1",
            Lld => "lld",
            Ldc1 => "ldc1",
            Ldc2 => "ldc2",
            Ld => "ld",
            Sc => "sc",
            Swc1 => "swc1",
            Scd => "scd",
            Sdc1 => "sdc1",
            Sdc2 => "sdc2",
            Sd => "sd",
            Sll => "sll",
            Srl => "srl",
            Sra => "sra",
            Sllv => "sllv",
            Srlv => "srlv",
            Srav => "srav",
            Jr => "jr",
            Jalr => "jalr",
            Syscall => "syscall",
            Break => "break",
            Sync => "sync",
            Mfhi => "mfhi",
            Mthi => "mthi",
            Mflo => "mflo",
            Mtlo => "mtlo",
            Dsllv => "dsllv",
            Dsrlv => "dsrlv",
            Dsrav => "dsrav",
            Mult => "mult",
            Multu => "multu",
            Div => "div",
            Divu => "divu",
            Dmult => "dmult",
            Dmultu => "dmultu",
            Ddiv => "ddiv",
            Ddivu => "ddivu",
            Add => "add",
            Addu => "addu",
            Sub => "sub",
            Subu => "subu",
            And => "and",
            Or => "or",
            Xor => "xor",
            Nor => "nor",
            Slt => "slt",
            Sltu => "sltu",
            Dadd => "dadd",
            Daddu => "daddu",
            Dsub => "dsub",
            Dsubu => "dsubu",
            Tge => "tge",
            Tgeu => "tgeu",
            Tlt => "tlt",
            Tltu => "tltu",
            Teq => "teq",
            Tne => "tne",
            Dsll => "dsll",
            Dsrl => "dsrl",
            Dsra => "dsra",
            Dsll32 => "dsll32",
            Dsrl32 => "dsrl32",
            Dsra32 => "dsra32",
            Bltz => "bltz",
            Bgez => "bgez",
            Bltzl => "bltzl",
            Bgezl => "bgezl",
            Tgei => "tgei",
            Tgeiu => "tgeiu",
            Tlti => "tlti",
            Tltiu => "tltiu",
            Teqi => "teqi",
            Tnei => "tnei",
            Bltzal => "bltzal",
            Bgezal => "bgezal",
            Bltzall => "bltzall",
            Bgezall => "bgezall",
            Mfc0 => "mfc0",
            Mtc0 => "mtc0",
            Tlb => "tlb",
        }
    }
}
