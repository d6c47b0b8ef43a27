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

//! CPU test modules
//!
//! Tests are organized into the following categories:
//! - `basic`: CPU initialization, reset, register access, PC handling
//! - `decode`: Instruction field decoding and target arithmetic
//! - `dispatch`: Opcode tables and unimplemented-instruction faults
//! - `arithmetic`, `logical_shift`, `multiply`: ALU instruction semantics
//! - `branch`: Jumps, branches and the delay slot
//! - `load_store`: Memory instructions
//! - `cop0`: MFC0/MTC0
//! - `run_loop`: Run budget, halting and fault recovery
//! - `properties`: Property-based tests

mod branch;
mod run_loop;

use super::CPU;
use crate::core::memory::Bus;

/// Address test programs are loaded at (start of KSEG0)
const BASE: u32 = 0x8000_0000;

/// Load `program` at [`BASE`] and point the PC at it
fn setup(program: &[u32]) -> (CPU, Bus) {
    let mut bus = Bus::new();
    let bytes: Vec<u8> = program.iter().flat_map(|w| w.to_be_bytes()).collect();
    bus.load_bytes(BASE, &bytes).unwrap();

    let mut cpu = CPU::new();
    cpu.set_pc(BASE);
    (cpu, bus)
}

/// Encode a SPECIAL (R-type) instruction
fn r_type(rs: u8, rt: u8, rd: u8, sa: u8, funct: u8) -> u32 {
    ((rs as u32) << 21) | ((rt as u32) << 16) | ((rd as u32) << 11) | ((sa as u32) << 6) | funct as u32
}

/// Encode an I-type instruction
fn i_type(op: u8, rs: u8, rt: u8, imm: u16) -> u32 {
    ((op as u32) << 26) | ((rs as u32) << 21) | ((rt as u32) << 16) | imm as u32
}

/// Encode a J-type instruction
fn j_type(op: u8, target: u32) -> u32 {
    ((op as u32) << 26) | (target & 0x03FF_FFFF)
}
