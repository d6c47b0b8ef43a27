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

use crate::core::error::{EmulatorError, Result};
use crate::core::memory::Memory;

/// CPU (MIPS R4300-class) interpreter core
///
/// # Specifications
/// - Architecture: MIPS III integer pipeline (scalar, single thread)
/// - Registers: 32 general-purpose 64-bit registers, HI/LO, 32 COP0 registers
/// - Branches take effect after one delay-slot instruction
///
/// The CPU owns no memory: every fetch, load and store goes through the
/// [`Memory`] passed to [`CPU::step`] or [`CPU::run`].
///
/// # Example
/// ```
/// use vr4300::core::cpu::CPU;
///
/// let mut cpu = CPU::new();
/// cpu.reset();
/// assert_eq!(cpu.reg(0), 0);
/// assert_eq!(cpu.pc(), 0);
/// ```
pub struct CPU {
    /// General purpose registers (r0-r31)
    ///
    /// r0 is hardwired to zero
    regs: [u64; 32],

    /// Address of the instruction about to be fetched
    pc: u32,

    /// Pending branch target, applied after the next instruction retires
    delay_pc: Option<u32>,

    /// Set by a not-taken "likely" branch to skip its delay slot
    annul_delay_slot: bool,

    /// HI accumulator (multiply result upper word)
    hi: u64,

    /// LO accumulator (multiply result lower word)
    lo: u64,

    /// Coprocessor 0 (System Control Unit)
    cop0: COP0,

    /// Execution-stop flag
    halted: bool,

    /// Diagnostic for the fault that last halted a run
    halt_reason: Option<String>,

    /// Instructions retired since reset
    ops_executed: u64,

    /// Current instruction (for debugging)
    current_instruction: u32,
}

// Module declarations
mod cop0;
mod decode;
mod disassembler;
mod instructions;
mod opcode;
mod state;
#[cfg(test)]
mod tests;
mod tracer;

// Re-exports
pub use cop0::COP0;
pub use disassembler::{Disassembler, REGISTER_NAMES};
pub use opcode::Opcode;
pub use state::CpuState;
pub use tracer::CpuTracer;

impl CPU {
    /// Width of one instruction in bytes
    pub const INSTRUCTION_WIDTH: u32 = 4;

    /// Link register (ra)
    pub const RA: u8 = 31;

    /// Create a new CPU instance with all state zeroed
    ///
    /// # Example
    /// ```
    /// use vr4300::core::cpu::CPU;
    ///
    /// let cpu = CPU::new();
    /// assert_eq!(cpu.ops_executed(), 0);
    /// ```
    pub fn new() -> Self {
        Self {
            regs: [0u64; 32],
            pc: 0,
            delay_pc: None,
            annul_delay_slot: false,
            hi: 0,
            lo: 0,
            cop0: COP0::new(),
            halted: false,
            halt_reason: None,
            ops_executed: 0,
            current_instruction: 0,
        }
    }

    /// Reset CPU to initial state
    ///
    /// Zeroes all general-purpose and control registers, HI/LO, the program
    /// counter, the delay-slot latch and the executed-instruction counter.
    pub fn reset(&mut self) {
        self.regs = [0u64; 32];
        self.pc = 0;
        self.delay_pc = None;
        self.annul_delay_slot = false;
        self.hi = 0;
        self.lo = 0;
        self.cop0.reset();
        self.halted = false;
        self.halt_reason = None;
        self.ops_executed = 0;
        self.current_instruction = 0;
    }

    /// Read a general purpose register as a 64-bit value
    ///
    /// # Example
    /// ```
    /// use vr4300::core::cpu::CPU;
    ///
    /// let mut cpu = CPU::new();
    /// cpu.set_reg(1, 0xFFFF_FFFF_8000_0000);
    /// assert_eq!(cpu.reg(1), 0xFFFF_FFFF_8000_0000);
    /// assert_eq!(cpu.reg(0), 0); // r0 is always 0
    /// ```
    #[inline(always)]
    pub fn reg(&self, index: u8) -> u64 {
        self.regs[index as usize]
    }

    /// Low 32 bits of a general purpose register
    #[inline(always)]
    pub fn reg_lo(&self, index: u8) -> u32 {
        self.regs[index as usize] as u32
    }

    /// High 32 bits of a general purpose register
    #[inline(always)]
    pub fn reg_hi(&self, index: u8) -> u32 {
        (self.regs[index as usize] >> 32) as u32
    }

    /// Write a full 64-bit value to a general purpose register
    ///
    /// Writes to r0 are ignored (r0 is always 0).
    #[inline(always)]
    pub fn set_reg(&mut self, index: u8, value: u64) {
        if index != 0 {
            self.regs[index as usize] = value;
        }
    }

    /// Write a 32-bit result, sign-extending it into the high half
    ///
    /// # Example
    /// ```
    /// use vr4300::core::cpu::CPU;
    ///
    /// let mut cpu = CPU::new();
    /// cpu.set_reg_sign_extended(2, 0x8000_0000);
    /// assert_eq!(cpu.reg_hi(2), 0xFFFF_FFFF);
    /// cpu.set_reg_sign_extended(2, 0x7FFF_FFFF);
    /// assert_eq!(cpu.reg_hi(2), 0);
    /// ```
    #[inline(always)]
    pub fn set_reg_sign_extended(&mut self, index: u8, value: u32) {
        self.set_reg(index, sign_extend(value));
    }

    /// Write a 32-bit result with a zeroed high half
    #[inline(always)]
    pub fn set_reg_zero_extended(&mut self, index: u8, value: u32) {
        self.set_reg(index, zero_extend(value));
    }

    /// Get current PC value
    pub fn pc(&self) -> u32 {
        self.pc
    }

    /// Set the address of the next instruction to fetch
    ///
    /// Any pending branch is discarded.
    pub fn set_pc(&mut self, pc: u32) {
        self.pc = pc;
        self.delay_pc = None;
        self.annul_delay_slot = false;
    }

    /// Pending branch target, if a branch has been scheduled
    pub fn delay_pc(&self) -> Option<u32> {
        self.delay_pc
    }

    /// HI accumulator
    pub fn hi(&self) -> u64 {
        self.hi
    }

    /// LO accumulator
    pub fn lo(&self) -> u64 {
        self.lo
    }

    /// Read a COP0 control register
    ///
    /// # Example
    /// ```
    /// use vr4300::core::cpu::{CPU, COP0};
    ///
    /// let cpu = CPU::new();
    /// assert_eq!(cpu.control(COP0::SR), 0);
    /// ```
    pub fn control(&self, index: usize) -> u32 {
        self.cop0.regs[index]
    }

    /// Number of instructions retired since the last reset
    pub fn ops_executed(&self) -> u64 {
        self.ops_executed
    }

    /// Whether the last run stopped on a fault or halt request
    pub fn is_halted(&self) -> bool {
        self.halted
    }

    /// Diagnostic message of the fault that halted the last run
    pub fn halt_reason(&self) -> Option<&str> {
        self.halt_reason.as_deref()
    }

    /// Ask the run loop to stop at the next instruction boundary
    pub fn request_halt(&mut self) {
        self.halted = true;
    }

    /// Raw word of the most recently fetched instruction
    pub fn current_instruction(&self) -> u32 {
        self.current_instruction
    }

    /// Schedule a branch to `target`
    ///
    /// Branch and jump handlers never write the PC themselves: the target is
    /// latched here and applied by [`CPU::step`] once the delay-slot
    /// instruction has retired.
    ///
    /// # Errors
    ///
    /// Returns `InvalidBranchTarget` if `target` is negative or does not fit
    /// in the 32-bit address space.
    pub fn schedule_branch(&mut self, target: i64) -> Result<()> {
        let target =
            u32::try_from(target).map_err(|_| EmulatorError::InvalidBranchTarget { target })?;
        self.delay_pc = Some(target);
        Ok(())
    }

    /// Skip the delay slot of the current instruction
    ///
    /// Used by not-taken "likely" branches: the PC advances by two
    /// instructions instead of one.
    pub(crate) fn annul_delay_slot(&mut self) {
        self.annul_delay_slot = true;
    }

    /// Execute one instruction
    ///
    /// This performs:
    /// 1. Snapshot of the PC and the pending branch
    /// 2. Instruction fetch from memory
    /// 3. Dispatch and execution
    /// 4. Delay-slot PC update
    ///
    /// A fault propagates to the caller with the PC still pointing at the
    /// faulting instruction and the op counter unchanged.
    ///
    /// # Example
    ///
    /// ```
    /// use vr4300::core::cpu::CPU;
    /// use vr4300::core::memory::{Bus, Memory};
    ///
    /// let mut cpu = CPU::new();
    /// let mut bus = Bus::new();
    ///
    /// // NOP at 0x00000000
    /// cpu.step(&mut bus).unwrap();
    /// assert_eq!(cpu.pc(), 4);
    /// ```
    pub fn step(&mut self, bus: &mut dyn Memory) -> Result<()> {
        let pc = self.pc;
        let pending = self.delay_pc;
        self.annul_delay_slot = false;

        let instruction = bus.read32(pc)?;
        self.current_instruction = instruction;

        self.execute_instruction(instruction, bus)?;
        log::trace!(
            "0x{:08X}: {:08X} {}",
            pc,
            instruction,
            Disassembler::disassemble(instruction, pc)
        );

        match pending {
            Some(target) => {
                self.delay_pc = None;
                self.pc = target;
            }
            None if self.annul_delay_slot => {
                self.pc = pc.wrapping_add(2 * Self::INSTRUCTION_WIDTH);
            }
            None => {
                self.pc = pc.wrapping_add(Self::INSTRUCTION_WIDTH);
            }
        }
        self.annul_delay_slot = false;

        self.ops_executed += 1;
        Ok(())
    }

    /// Execute up to `count` instructions or until halted
    ///
    /// Clears the halt flag, then steps. A fault ends the run early: the CPU
    /// is halted, the diagnostic is logged and kept in
    /// [`CPU::halt_reason`], and the rest of the budget is abandoned.
    ///
    /// # Returns
    ///
    /// Number of instructions retired during this run
    pub fn run(&mut self, bus: &mut dyn Memory, count: u64) -> u64 {
        self.run_traced(bus, count, None)
    }

    /// [`CPU::run`] with an optional execution tracer
    pub fn run_traced(
        &mut self,
        bus: &mut dyn Memory,
        count: u64,
        mut tracer: Option<&mut CpuTracer>,
    ) -> u64 {
        self.halted = false;
        self.halt_reason = None;
        let start = self.ops_executed;

        for _ in 0..count {
            if self.halted {
                break;
            }

            if let Some(tracer) = tracer.as_deref_mut() {
                if let Err(e) = tracer.trace(self, bus) {
                    log::warn!("Failed to write trace: {}", e);
                }
            }

            if let Err(e) = self.step(bus) {
                self.halt(e);
                break;
            }
        }

        self.ops_executed - start
    }

    /// Convert a fault into a halt
    fn halt(&mut self, error: EmulatorError) {
        if error.is_instruction_fault() {
            log::warn!("CPU halted at PC=0x{:08X}: {}", self.pc, error);
        } else {
            log::error!("CPU halted at PC=0x{:08X}: {}", self.pc, error);
        }
        self.halted = true;
        self.halt_reason = Some(error.to_string());
    }

    /// Copy of the architectural state for inspection
    pub fn snapshot(&self) -> CpuState {
        CpuState {
            gpr: self.regs,
            control: self.cop0.regs,
            hi: self.hi,
            lo: self.lo,
            pc: self.pc,
            delay_pc: self.delay_pc,
            halted: self.halted,
            ops_executed: self.ops_executed,
        }
    }

    /// Dump all CPU registers for debugging
    ///
    /// # Example
    ///
    /// ```no_run
    /// use vr4300::core::cpu::CPU;
    ///
    /// let cpu = CPU::new();
    /// cpu.dump_registers(); // Print all register values
    /// ```
    pub fn dump_registers(&self) {
        println!("CPU Registers:");
        match self.delay_pc {
            Some(target) => println!("PC: 0x{:08X}  Delay PC: 0x{:08X}", self.pc, target),
            None => println!("PC: 0x{:08X}  Delay PC: -", self.pc),
        }
        println!("HI: 0x{:016X}  LO: 0x{:016X}", self.hi, self.lo);
        println!("Ops executed: {}", self.ops_executed);
        println!();

        for i in 0..32u8 {
            if i % 2 == 0 && i > 0 {
                println!();
            }
            print!("{:>2}: 0x{:016X}  ", REGISTER_NAMES[i as usize], self.reg(i));
        }
        println!("\n");

        println!("COP0 Registers:");
        for index in [COP0::SR, COP0::CAUSE, COP0::EPC, COP0::BAD_VADDR, COP0::PRID] {
            println!("{:<8} 0x{:08X}", COP0::NAMES[index], self.cop0.regs[index]);
        }
    }
}

impl Default for CPU {
    fn default() -> Self {
        Self::new()
    }
}

/// Sign-extend a 32-bit value to 64 bits
///
/// The high half is all ones when bit 31 is set, all zeros otherwise.
#[inline(always)]
pub fn sign_extend(value: u32) -> u64 {
    value as i32 as i64 as u64
}

/// Zero-extend a 32-bit value to 64 bits
#[inline(always)]
pub fn zero_extend(value: u32) -> u64 {
    value as u64
}
