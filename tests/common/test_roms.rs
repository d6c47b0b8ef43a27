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

//! Small test programs, assembled by hand
//!
//! All programs expect to be loaded at 0x80000000.

/// Register arithmetic
#[allow(dead_code)]
pub fn test_program_basic_arithmetic() -> Vec<u32> {
    vec![
        0x24010001, // ADDIU at, r0, 1      ; at = 1
        0x24020002, // ADDIU v0, r0, 2      ; v0 = 2
        0x00221821, // ADDU  v1, at, v0     ; v1 = 3
        0x00000000, // NOP
    ]
}

/// Load/Store through KSEG0
#[allow(dead_code)]
pub fn test_program_load_store() -> Vec<u32> {
    vec![
        0x3C018010, // LUI   at, 0x8010     ; at = 0x80100000
        0x240200AA, // ADDIU v0, r0, 0xAA   ; v0 = 0xAA
        0xAC220000, // SW    v0, 0(at)      ; Store to 0x80100000
        0x8C230000, // LW    v1, 0(at)      ; Load from 0x80100000
        0x00000000, // NOP
    ]
}

/// Call a leaf function and stop on SYSCALL
///
/// Retires 6 instructions, then halts at 0x8000000C with s0 = 10.
#[allow(dead_code)]
pub fn test_program_call() -> Vec<u32> {
    vec![
        0x0C000008, // 00: JAL   0x80000020
        0x24040005, // 04: ADDIU a0, r0, 5   ; delay slot
        0x00408021, // 08: ADDU  s0, v0, r0  ; return here
        0x0000000C, // 0C: SYSCALL           ; unimplemented, halts
        0x00000000, // 10: NOP
        0x00000000, // 14: NOP
        0x00000000, // 18: NOP
        0x00000000, // 1C: NOP
        0x00841021, // 20: ADDU  v0, a0, a0
        0x03E00008, // 24: JR    ra
        0x00000000, // 28: NOP               ; delay slot
    ]
}

/// Sum 1..=10 into v0 with a counted loop, then stop on BREAK
///
/// Retires 42 instructions, then halts at 0x80000018.
#[allow(dead_code)]
pub fn test_program_sum_loop() -> Vec<u32> {
    vec![
        0x2408000A, // 00: ADDIU t0, r0, 10
        0x00001021, // 04: ADDU  v0, r0, r0
        0x00481021, // 08: ADDU  v0, v0, t0  ; loop
        0x2508FFFF, // 0C: ADDIU t0, t0, -1
        0x1D00FFFD, // 10: BGTZ  t0, loop
        0x00000000, // 14: NOP               ; delay slot
        0x0000000D, // 18: BREAK             ; unimplemented, halts
    ]
}

/// Not-taken likely branch annuls its delay slot
#[allow(dead_code)]
pub fn test_program_likely_branch() -> Vec<u32> {
    vec![
        0x24080001, // ADDIU t0, r0, 1
        0x51000002, // BEQL  t0, r0, +2     ; not taken
        0x24090099, // ADDIU t1, r0, 0x99   ; annulled
        0x240A0042, // ADDIU t2, r0, 0x42
    ]
}
