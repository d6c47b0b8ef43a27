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

use super::super::*;
use super::{i_type, j_type, r_type, setup, BASE};
use crate::core::error::EmulatorError;

const J: u8 = 0x02;
const JAL: u8 = 0x03;
const BEQ: u8 = 0x04;
const BNE: u8 = 0x05;
const BLEZ: u8 = 0x06;
const BGTZ: u8 = 0x07;
const ADDIU: u8 = 0x09;
const BEQL: u8 = 0x14;
const BNEL: u8 = 0x15;
const BLEZL: u8 = 0x16;
const BGTZL: u8 = 0x17;
const REGIMM: u8 = 0x01;

const BLTZ: u8 = 0x00;
const BGEZ: u8 = 0x01;
const BLTZL: u8 = 0x02;
const BGEZL: u8 = 0x03;
const BLTZAL: u8 = 0x10;
const BGEZAL: u8 = 0x11;

const JR: u8 = 0x08;
const JALR: u8 = 0x09;

/// Branch offset used by the table-driven tests
const OFFSET: u16 = 0x10;
const TARGET: u32 = BASE + 4 + (OFFSET as u32) * 4;

/// addiu t0, r0, 1
const MARK: u32 = 0x2408_0001;

/// Execute a single branch with a0 = `a`, a1 = `b` and report the
/// scheduled target
fn first_step(instruction: u32, a: u64, b: u64) -> (CPU, Option<u32>) {
    let (mut cpu, mut bus) = setup(&[instruction, MARK]);
    cpu.set_reg(4, a);
    cpu.set_reg(5, b);
    cpu.step(&mut bus).unwrap();
    let scheduled = cpu.delay_pc();
    (cpu, scheduled)
}

#[test]
fn test_jump_takes_effect_after_delay_slot() {
    let target = 0x40; // 0x80000100
    let (mut cpu, mut bus) = setup(&[j_type(J, target), MARK]);

    cpu.step(&mut bus).unwrap();
    assert_eq!(cpu.pc(), BASE + 4);
    assert_eq!(cpu.delay_pc(), Some(0x8000_0100));
    assert_eq!(cpu.reg(8), 0);

    cpu.step(&mut bus).unwrap();
    assert_eq!(cpu.pc(), 0x8000_0100);
    assert_eq!(cpu.delay_pc(), None);
    assert_eq!(cpu.reg(8), 1, "delay slot must execute");
    assert_eq!(cpu.ops_executed(), 2);
}

#[test]
fn test_jal_links_past_delay_slot() {
    let (mut cpu, mut bus) = setup(&[j_type(JAL, 0x40), MARK]);

    cpu.step(&mut bus).unwrap();
    assert_eq!(cpu.reg(CPU::RA), 0xFFFF_FFFF_8000_0008);
    assert_eq!(cpu.pc(), BASE + 4);

    cpu.step(&mut bus).unwrap();
    assert_eq!(cpu.pc(), 0x8000_0100);
}

#[test]
fn test_jr_uses_low_word() {
    let (mut cpu, mut bus) = setup(&[r_type(31, 0, 0, 0, JR), 0]);
    cpu.set_reg(31, 0xFFFF_FFFF_8000_0200);

    cpu.step(&mut bus).unwrap();
    cpu.step(&mut bus).unwrap();

    assert_eq!(cpu.pc(), 0x8000_0200);
}

#[test]
fn test_jalr_reads_target_before_linking() {
    // jalr ra, ra
    let (mut cpu, mut bus) = setup(&[r_type(31, 0, 31, 0, JALR), 0]);
    cpu.set_reg(31, 0x8000_0300);

    cpu.step(&mut bus).unwrap();
    assert_eq!(cpu.reg(31), 0xFFFF_FFFF_8000_0008);

    cpu.step(&mut bus).unwrap();
    assert_eq!(cpu.pc(), 0x8000_0300);
}

#[test]
fn test_jalr_links_to_rd() {
    // jalr t9, t0
    let (mut cpu, mut bus) = setup(&[r_type(8, 0, 25, 0, JALR), 0]);
    cpu.set_reg(8, 0x8000_0400);

    cpu.step(&mut bus).unwrap();

    assert_eq!(cpu.reg(25), 0xFFFF_FFFF_8000_0008);
    assert_eq!(cpu.reg(31), 0);
    assert_eq!(cpu.delay_pc(), Some(0x8000_0400));
}

#[test]
fn test_conditional_branches() {
    let neg = u64::MAX;
    let cases: &[(&str, u32, u64, u64, bool)] = &[
        ("beq equal", i_type(BEQ, 4, 5, OFFSET), 7, 7, true),
        ("beq differ", i_type(BEQ, 4, 5, OFFSET), 7, 8, false),
        ("bne differ", i_type(BNE, 4, 5, OFFSET), 7, 8, true),
        ("bne equal", i_type(BNE, 4, 5, OFFSET), 7, 7, false),
        ("blez zero", i_type(BLEZ, 4, 0, OFFSET), 0, 0, true),
        ("blez negative", i_type(BLEZ, 4, 0, OFFSET), neg, 0, true),
        ("blez positive", i_type(BLEZ, 4, 0, OFFSET), 1, 0, false),
        ("bgtz positive", i_type(BGTZ, 4, 0, OFFSET), 1, 0, true),
        ("bgtz zero", i_type(BGTZ, 4, 0, OFFSET), 0, 0, false),
        ("bgtz negative", i_type(BGTZ, 4, 0, OFFSET), neg, 0, false),
        ("bltz negative", i_type(REGIMM, 4, BLTZ, OFFSET), neg, 0, true),
        ("bltz zero", i_type(REGIMM, 4, BLTZ, OFFSET), 0, 0, false),
        ("bgez zero", i_type(REGIMM, 4, BGEZ, OFFSET), 0, 0, true),
        ("bgez negative", i_type(REGIMM, 4, BGEZ, OFFSET), neg, 0, false),
    ];

    for &(name, instruction, a, b, taken) in cases {
        let (cpu, scheduled) = first_step(instruction, a, b);
        assert_eq!(scheduled, taken.then_some(TARGET), "{}", name);
        // Non-likely branches always fall through to the delay slot
        assert_eq!(cpu.pc(), BASE + 4, "{}", name);
    }
}

#[test]
fn test_likely_branches() {
    let neg = u64::MAX;
    let cases: &[(&str, u32, u64, u64, bool)] = &[
        ("beql equal", i_type(BEQL, 4, 5, OFFSET), 7, 7, true),
        ("beql differ", i_type(BEQL, 4, 5, OFFSET), 7, 8, false),
        ("bnel differ", i_type(BNEL, 4, 5, OFFSET), 7, 8, true),
        ("bnel equal", i_type(BNEL, 4, 5, OFFSET), 7, 7, false),
        ("blezl zero", i_type(BLEZL, 4, 0, OFFSET), 0, 0, true),
        ("blezl positive", i_type(BLEZL, 4, 0, OFFSET), 1, 0, false),
        ("bgtzl positive", i_type(BGTZL, 4, 0, OFFSET), 1, 0, true),
        ("bgtzl negative", i_type(BGTZL, 4, 0, OFFSET), neg, 0, false),
        ("bltzl negative", i_type(REGIMM, 4, BLTZL, OFFSET), neg, 0, true),
        ("bltzl positive", i_type(REGIMM, 4, BLTZL, OFFSET), 1, 0, false),
        ("bgezl zero", i_type(REGIMM, 4, BGEZL, OFFSET), 0, 0, true),
        ("bgezl negative", i_type(REGIMM, 4, BGEZL, OFFSET), neg, 0, false),
    ];

    for &(name, instruction, a, b, taken) in cases {
        let (cpu, scheduled) = first_step(instruction, a, b);
        if taken {
            assert_eq!(scheduled, Some(TARGET), "{}", name);
            assert_eq!(cpu.pc(), BASE + 4, "{}", name);
        } else {
            assert_eq!(scheduled, None, "{}", name);
            assert_eq!(cpu.pc(), BASE + 8, "{}: delay slot must be skipped", name);
        }
    }
}

#[test]
fn test_beql_false_skips_delay_slot() {
    // beql a0, a1 with a0 != a1, delay slot would set t0
    let (mut cpu, mut bus) = setup(&[i_type(BEQL, 4, 5, OFFSET), MARK, 0]);
    cpu.set_reg(4, 1);

    cpu.step(&mut bus).unwrap();
    assert_eq!(cpu.pc(), BASE + 8);
    assert_eq!(cpu.ops_executed(), 1);

    cpu.step(&mut bus).unwrap();
    assert_eq!(cpu.reg(8), 0);
    assert_eq!(cpu.pc(), BASE + 12);
}

#[test]
fn test_beql_true_executes_delay_slot() {
    let (mut cpu, mut bus) = setup(&[i_type(BEQL, 4, 5, OFFSET), MARK]);

    cpu.step(&mut bus).unwrap();
    cpu.step(&mut bus).unwrap();

    assert_eq!(cpu.reg(8), 1);
    assert_eq!(cpu.pc(), TARGET);
}

#[test]
fn test_beq_compares_low_words_beql_full_registers() {
    let a = 0x0000_0001_0000_0005;
    let b = 0x0000_0000_0000_0005;

    let (_, scheduled) = first_step(i_type(BEQ, 4, 5, OFFSET), a, b);
    assert_eq!(scheduled, Some(TARGET));

    let (_, scheduled) = first_step(i_type(BNE, 4, 5, OFFSET), a, b);
    assert_eq!(scheduled, None);

    let (cpu, scheduled) = first_step(i_type(BEQL, 4, 5, OFFSET), a, b);
    assert_eq!(scheduled, None);
    assert_eq!(cpu.pc(), BASE + 8);

    let (_, scheduled) = first_step(i_type(BNEL, 4, 5, OFFSET), a, b);
    assert_eq!(scheduled, Some(TARGET));
}

#[test]
fn test_and_link_branches_always_link() {
    // bltzal a0 with a0 >= 0: not taken, ra still written
    let (cpu, scheduled) = first_step(i_type(REGIMM, 4, BLTZAL, OFFSET), 1, 0);
    assert_eq!(scheduled, None);
    assert_eq!(cpu.reg(CPU::RA), 0xFFFF_FFFF_8000_0008);

    // bgezal r0: the classic "bal"
    let (cpu, scheduled) = first_step(i_type(REGIMM, 0, BGEZAL, OFFSET), 0, 0);
    assert_eq!(scheduled, Some(TARGET));
    assert_eq!(cpu.reg(CPU::RA), 0xFFFF_FFFF_8000_0008);
}

#[test]
fn test_backward_branch() {
    // loop: addiu t0, t0, -1 ; bne t0, r0, loop ; nop
    let program = [
        i_type(ADDIU, 8, 8, 0xFFFF),
        i_type(BNE, 8, 0, 0xFFFE),
        0,
    ];
    let (mut cpu, mut bus) = setup(&program);
    cpu.set_reg(8, 3);

    // Three iterations of three instructions each
    for _ in 0..9 {
        cpu.step(&mut bus).unwrap();
    }

    assert_eq!(cpu.reg(8), 0);
    assert_eq!(cpu.pc(), BASE + 12);
}

#[test]
fn test_branch_in_delay_slot_is_dropped() {
    // j 0x80000100 ; beq r0, r0, +0x10
    let (mut cpu, mut bus) = setup(&[j_type(J, 0x40), i_type(BEQ, 0, 0, OFFSET)]);

    cpu.step(&mut bus).unwrap();
    cpu.step(&mut bus).unwrap();

    assert_eq!(cpu.pc(), 0x8000_0100);
    assert_eq!(cpu.delay_pc(), None);
}

#[test]
fn test_schedule_branch_rejects_out_of_range() {
    let mut cpu = CPU::new();

    assert!(matches!(
        cpu.schedule_branch(-4),
        Err(EmulatorError::InvalidBranchTarget { target: -4 })
    ));
    assert!(matches!(
        cpu.schedule_branch(1 << 32),
        Err(EmulatorError::InvalidBranchTarget { .. })
    ));
    assert_eq!(cpu.delay_pc(), None);

    cpu.schedule_branch(0xFFFF_FFFC).unwrap();
    assert_eq!(cpu.delay_pc(), Some(0xFFFF_FFFC));
}
