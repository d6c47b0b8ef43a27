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

//! System integration module
//!
//! This module ties the CPU to its memory bus and the display-refresh hook,
//! and provides the host-facing run loop.

use super::config::RunConfig;
use super::cpu::{CpuState, CpuTracer, CPU};
use super::error::Result;
use super::memory::Bus;

/// Display refresh collaborator
///
/// Called once at the end of every [`System::run`], whether the run used up
/// its budget or halted early. Implementations get read-only access to the
/// CPU so they can present registers or a framebuffer view.
pub trait DisplayRefresh {
    /// Refresh the display after a run
    fn refresh(&mut self, cpu: &CPU);
}

/// Display hook that does nothing
#[derive(Debug, Default, Clone, Copy)]
pub struct NullDisplay;

impl DisplayRefresh for NullDisplay {
    fn refresh(&mut self, _cpu: &CPU) {}
}

/// VR4300 System
///
/// Owns one CPU, its memory bus and a display hook. This is the surface a
/// host (the command-line runner, a debugger UI) drives.
///
/// # Example
/// ```
/// use vr4300::core::system::System;
///
/// let mut system = System::new();
/// // addiu v0, r0, 42 ; followed by NOPs
/// system.load_program(0x8000_0000, &[0x2402_002A]).unwrap();
/// system.cpu_mut().set_pc(0x8000_0000);
///
/// let retired = system.run(4);
/// assert_eq!(retired, 4);
/// assert_eq!(system.cpu().reg(2), 42);
/// ```
pub struct System {
    /// CPU instance
    cpu: CPU,
    /// Memory bus
    bus: Bus,
    /// Display refresh hook
    display: Box<dyn DisplayRefresh>,
    /// CPU tracer for debugging (optional)
    tracer: Option<CpuTracer>,
}

impl System {
    /// Create a new System with a [`NullDisplay`]
    pub fn new() -> Self {
        Self::with_display(Box::new(NullDisplay))
    }

    /// Create a new System that refreshes `display` after each run
    pub fn with_display(display: Box<dyn DisplayRefresh>) -> Self {
        Self {
            cpu: CPU::new(),
            bus: Bus::new(),
            display,
            tracer: None,
        }
    }

    /// Build a System from a run configuration
    ///
    /// Loads the image at the configured load address, points the PC at the
    /// entry point and opens the trace file if one is configured.
    pub fn from_config(config: &RunConfig, image: &str) -> Result<Self> {
        let mut system = Self::new();
        system.load_image(image, config.load_address)?;
        system.cpu.set_pc(config.entry_point());

        if let Some(path) = &config.trace_path {
            system.enable_tracing(path, config.trace_limit)?;
        }
        Ok(system)
    }

    /// Reset CPU and memory to power-on state
    ///
    /// Tracing stays enabled across a reset.
    pub fn reset(&mut self) {
        self.cpu.reset();
        self.bus.reset();
        log::info!("System reset");
    }

    /// Execute exactly one instruction (same as `run(1)`)
    ///
    /// # Returns
    ///
    /// Number of instructions retired (0 if the instruction faulted)
    pub fn step(&mut self) -> u64 {
        self.run(1)
    }

    /// Execute up to `count` instructions or until halted
    ///
    /// A fault halts the CPU; the diagnostic is available from
    /// [`CPU::halt_reason`]. The display hook is refreshed exactly once
    /// before returning.
    ///
    /// # Returns
    ///
    /// Number of instructions retired during this run
    pub fn run(&mut self, count: u64) -> u64 {
        let retired = self
            .cpu
            .run_traced(&mut self.bus, count, self.tracer.as_mut());

        if let Some(tracer) = self.tracer.as_mut() {
            if let Err(e) = tracer.flush() {
                log::warn!("Failed to flush trace: {}", e);
            }
        }

        log::debug!(
            "Run finished: {} retired, PC=0x{:08X}, refreshing display",
            retired,
            self.cpu.pc()
        );
        self.display.refresh(&self.cpu);
        retired
    }

    /// Load a raw program image from a file
    pub fn load_image(&mut self, path: &str, address: u32) -> Result<()> {
        log::info!("Loading image from: {}", path);
        self.bus.load_image(path, address)
    }

    /// Copy instruction words into memory, big-endian
    pub fn load_program(&mut self, address: u32, words: &[u32]) -> Result<()> {
        let bytes: Vec<u8> = words.iter().flat_map(|w| w.to_be_bytes()).collect();
        self.bus.load_bytes(address, &bytes)
    }

    /// Enable CPU execution tracing
    ///
    /// # Arguments
    ///
    /// * `path` - Trace file to create
    /// * `limit` - Maximum number of lines to write
    pub fn enable_tracing<P: AsRef<std::path::Path>>(&mut self, path: P, limit: u64) -> Result<()> {
        log::info!(
            "CPU tracing enabled: {} (limit {})",
            path.as_ref().display(),
            limit
        );
        self.tracer = Some(CpuTracer::new(path)?.with_limit(limit));
        Ok(())
    }

    /// Disable CPU execution tracing
    pub fn disable_tracing(&mut self) {
        if let Some(mut tracer) = self.tracer.take() {
            if let Err(e) = tracer.flush() {
                log::warn!("Failed to flush trace: {}", e);
            }
        }
    }

    /// Whether a tracer is attached
    pub fn is_tracing(&self) -> bool {
        self.tracer.is_some()
    }

    /// Get current PC value
    pub fn pc(&self) -> u32 {
        self.cpu.pc()
    }

    /// Query-only copy of the CPU state
    pub fn snapshot(&self) -> CpuState {
        self.cpu.snapshot()
    }

    /// Get reference to CPU
    pub fn cpu(&self) -> &CPU {
        &self.cpu
    }

    /// Get mutable reference to CPU
    pub fn cpu_mut(&mut self) -> &mut CPU {
        &mut self.cpu
    }

    /// Get reference to memory bus
    pub fn bus(&self) -> &Bus {
        &self.bus
    }

    /// Get mutable reference to memory bus
    pub fn bus_mut(&mut self) -> &mut Bus {
        &mut self.bus
    }
}

impl Default for System {
    fn default() -> Self {
        Self::new()
    }
}
