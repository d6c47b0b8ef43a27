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
use super::{r_type, setup, BASE};
use crate::core::memory::Bus;

/// addiu t0, t0, 1
const INC: u32 = 0x2508_0001;
/// syscall
const SYSCALL: u32 = 0x0000_000C;

#[test]
fn test_run_exhausts_budget() {
    let (mut cpu, mut bus) = setup(&[INC, INC, INC, INC, INC]);

    let retired = cpu.run(&mut bus, 5);

    assert_eq!(retired, 5);
    assert_eq!(cpu.reg(8), 5);
    assert_eq!(cpu.pc(), BASE + 20);
    assert!(!cpu.is_halted());
    assert_eq!(cpu.halt_reason(), None);
}

#[test]
fn test_run_zero_budget() {
    let (mut cpu, mut bus) = setup(&[INC]);
    assert_eq!(cpu.run(&mut bus, 0), 0);
    assert_eq!(cpu.pc(), BASE);
    assert_eq!(cpu.ops_executed(), 0);
}

#[test]
fn test_fault_halts_and_keeps_progress() {
    let (mut cpu, mut bus) = setup(&[INC, INC, SYSCALL, INC]);

    let retired = cpu.run(&mut bus, 100);

    // The two increments retired; the syscall did not
    assert_eq!(retired, 2);
    assert_eq!(cpu.ops_executed(), 2);
    assert_eq!(cpu.reg(8), 2);
    assert_eq!(cpu.pc(), BASE + 8);
    assert!(cpu.is_halted());

    let reason = cpu.halt_reason().unwrap();
    assert!(reason.contains("0x0000000C"), "{}", reason);
    assert!(reason.contains("0x80000008"), "{}", reason);
    assert!(reason.contains("syscall"), "{}", reason);
}

#[test]
fn test_rerun_after_fault_retries_same_instruction() {
    let (mut cpu, mut bus) = setup(&[SYSCALL]);

    assert_eq!(cpu.run(&mut bus, 10), 0);
    assert!(cpu.is_halted());

    // The halt flag is cleared on entry, then the same fault recurs
    assert_eq!(cpu.run(&mut bus, 10), 0);
    assert!(cpu.is_halted());
    assert_eq!(cpu.pc(), BASE);
}

#[test]
fn test_run_resumes_after_host_repairs_program() {
    let (mut cpu, mut bus) = setup(&[SYSCALL, INC]);
    cpu.run(&mut bus, 10);
    assert!(cpu.is_halted());

    // Patch the faulting word with a NOP and continue
    bus.load_bytes(BASE, &[0, 0, 0, 0]).unwrap();
    let retired = cpu.run(&mut bus, 2);

    assert_eq!(retired, 2);
    assert!(!cpu.is_halted());
    assert_eq!(cpu.reg(8), 1);
}

#[test]
fn test_fetch_fault_halts() {
    let mut cpu = CPU::new();
    let mut bus = Bus::new();
    cpu.set_pc(0x8080_0000); // past the end of RDRAM

    assert_eq!(cpu.run(&mut bus, 10), 0);
    assert!(cpu.is_halted());
    assert!(cpu.halt_reason().unwrap().contains("Invalid memory access"));
}

#[test]
fn test_run_across_jump() {
    // j 0x80000010 ; inc ; inc (skipped) ; inc (skipped) ; inc
    let program = [0x0800_0004, INC, INC, INC, INC];
    let (mut cpu, mut bus) = setup(&program);

    let retired = cpu.run(&mut bus, 3);

    assert_eq!(retired, 3);
    assert_eq!(cpu.reg(8), 2);
    assert_eq!(cpu.pc(), BASE + 20);
}

#[test]
fn test_step_count_matches_run_one() {
    let (mut stepped, mut bus_a) = setup(&[INC, INC, INC]);
    let (mut ran, mut bus_b) = setup(&[INC, INC, INC]);

    for _ in 0..3 {
        stepped.step(&mut bus_a).unwrap();
        assert_eq!(ran.run(&mut bus_b, 1), 1);
    }

    assert_eq!(stepped.snapshot(), ran.snapshot());
}

#[test]
fn test_halt_request_stops_run() {
    let (mut cpu, mut bus) = setup(&[INC]);
    cpu.request_halt();
    assert!(cpu.is_halted());

    // A new run clears the request
    assert_eq!(cpu.run(&mut bus, 1), 1);
    assert!(!cpu.is_halted());
}

#[test]
fn test_traced_run_writes_lines() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("trace.log");
    let (mut cpu, mut bus) = setup(&[INC, INC, r_type(0, 0, 0, 0, 0x0D)]);

    let mut tracer = CpuTracer::new(&path).unwrap();
    let retired = cpu.run_traced(&mut bus, 10, Some(&mut tracer));
    tracer.flush().unwrap();

    assert_eq!(retired, 2);
    let contents = std::fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = contents.lines().collect();
    // The faulting instruction is traced before it executes
    assert_eq!(lines.len(), 3);
    assert!(lines[0].contains("addiu t0, t0, 1"));
    assert!(lines[2].contains("break"));
}

#[test]
fn test_invalid_branch_target_is_a_fault() {
    let mut cpu = CPU::new();
    let err = cpu.schedule_branch(-8).unwrap_err();
    assert!(err.is_instruction_fault());
}
