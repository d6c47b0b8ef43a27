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

//! CPU execution tracer for debugging
//!
//! Logs CPU execution state to a file for analysis and debugging.

use super::{Disassembler, CPU, REGISTER_NAMES};
use crate::core::error::Result;
use crate::core::memory::Memory;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// CPU execution tracer
///
/// Records CPU state before each instruction. Each line in the trace file
/// shows:
/// - Program counter
/// - Raw instruction encoding
/// - Disassembled instruction
/// - Values of a few registers (v0, v1, a0 by default)
///
/// Tracing stops silently once the line limit is reached.
///
/// # Example
/// ```no_run
/// use vr4300::core::cpu::{CPU, CpuTracer};
/// use vr4300::core::memory::Bus;
///
/// let mut cpu = CPU::new();
/// let mut bus = Bus::new();
/// let mut tracer = CpuTracer::new("trace.log").unwrap();
///
/// // Execute and trace
/// tracer.trace(&cpu, &bus).unwrap();
/// cpu.step(&mut bus).unwrap();
/// ```
pub struct CpuTracer {
    /// Enable/disable tracing
    enabled: bool,
    /// Output file handle
    output: BufWriter<File>,
    /// Registers shown on each line
    regs: Vec<u8>,
    /// Maximum number of lines, if any
    limit: Option<u64>,
    /// Lines written so far
    lines: u64,
}

impl CpuTracer {
    /// Registers shown when none are selected
    pub const DEFAULT_REGS: [u8; 3] = [2, 3, 4];

    /// Create a new CPU tracer
    ///
    /// Opens a file for writing trace output. If the file exists, it will be
    /// overwritten.
    ///
    /// # Errors
    ///
    /// Returns `Io` if file creation fails
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let output = BufWriter::new(File::create(path)?);
        Ok(Self {
            enabled: true,
            output,
            regs: Self::DEFAULT_REGS.to_vec(),
            limit: None,
            lines: 0,
        })
    }

    /// Stop writing after `limit` lines
    pub fn with_limit(mut self, limit: u64) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Select the registers shown on each line (at most 8 are kept)
    pub fn with_regs(mut self, regs: &[u8]) -> Self {
        self.regs = regs.iter().copied().filter(|&r| r < 32).take(8).collect();
        self
    }

    /// Enable or disable tracing
    ///
    /// When disabled, trace() calls return immediately without writing.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Check if tracing is enabled
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Number of lines written so far
    pub fn lines_written(&self) -> u64 {
        self.lines
    }

    /// Trace current CPU state
    ///
    /// Fetches the instruction at the current PC and writes one line. The
    /// fetch is a plain read and does not change the CPU or the memory.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails or the fetch faults
    pub fn trace(&mut self, cpu: &CPU, bus: &dyn Memory) -> Result<()> {
        if !self.enabled || self.limit.is_some_and(|limit| self.lines >= limit) {
            return Ok(());
        }

        let pc = cpu.pc();
        let instruction = bus.read32(pc)?;
        let disasm = Disassembler::disassemble(instruction, pc);

        write!(
            self.output,
            "PC=0x{:08X} [0x{:08X}] {:30} |",
            pc, instruction, disasm
        )?;
        for &reg in &self.regs {
            write!(
                self.output,
                " {}={:016X}",
                REGISTER_NAMES[reg as usize],
                cpu.reg(reg)
            )?;
        }
        writeln!(self.output)?;

        self.lines += 1;
        Ok(())
    }

    /// Flush the output buffer
    ///
    /// Forces any buffered trace data to be written to disk.
    pub fn flush(&mut self) -> Result<()> {
        self.output.flush()?;
        Ok(())
    }
}
