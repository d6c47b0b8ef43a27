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

//! Bit-field decoding of 32-bit instruction words
//!
//! Decoding is total: every word yields fields, meaning is assigned only by
//! the dispatch tables in [`super::opcode`].

/// Decode R-type instruction
///
/// Format: | op (6) | rs (5) | rt (5) | rd (5) | sa (5) | funct (6) |
///
/// # Returns
///
/// Tuple of (rs, rt, rd, sa, funct)
#[inline(always)]
pub(crate) fn decode_r_type(instr: u32) -> (u8, u8, u8, u8, u8) {
    let rs = ((instr >> 21) & 0x1F) as u8;
    let rt = ((instr >> 16) & 0x1F) as u8;
    let rd = ((instr >> 11) & 0x1F) as u8;
    let sa = ((instr >> 6) & 0x1F) as u8;
    let funct = (instr & 0x3F) as u8;
    (rs, rt, rd, sa, funct)
}

/// Decode I-type instruction
///
/// Format: | op (6) | rs (5) | rt (5) | immediate (16) |
///
/// # Returns
///
/// Tuple of (op, rs, rt, imm). The immediate is returned raw; use
/// [`sign_extend_imm`] or a plain widening cast per instruction.
#[inline(always)]
pub(crate) fn decode_i_type(instr: u32) -> (u8, u8, u8, u16) {
    let op = ((instr >> 26) & 0x3F) as u8;
    let rs = ((instr >> 21) & 0x1F) as u8;
    let rt = ((instr >> 16) & 0x1F) as u8;
    let imm = (instr & 0xFFFF) as u16;
    (op, rs, rt, imm)
}

/// Decode J-type instruction
///
/// Format: | op (6) | target (26) |
///
/// # Returns
///
/// Tuple of (op, target)
#[inline(always)]
pub(crate) fn decode_j_type(instr: u32) -> (u8, u32) {
    let op = ((instr >> 26) & 0x3F) as u8;
    let target = instr & 0x03FF_FFFF;
    (op, target)
}

/// Sign-extend a 16-bit immediate to 32 bits
#[inline(always)]
pub(crate) fn sign_extend_imm(imm: u16) -> u32 {
    imm as i16 as i32 as u32
}

/// Target of a PC-relative branch at `address`
///
/// The offset is counted in instructions from the delay slot:
/// `(address + 4) + sign_extend(imm) * 4`, modulo 2^32.
#[inline(always)]
pub(crate) fn branch_target(address: u32, imm: u16) -> u32 {
    address
        .wrapping_add(4)
        .wrapping_add(sign_extend_imm(imm) << 2)
}

/// Target of a J/JAL at `address`
///
/// Keeps the upper four bits of the current PC and replaces the rest with
/// the 26-bit target field shifted left by 2.
#[inline(always)]
pub(crate) fn jump_target(address: u32, target: u32) -> u32 {
    (address & 0xF000_0000) | (target << 2)
}
