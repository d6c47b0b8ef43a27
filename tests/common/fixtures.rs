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

//! Test fixtures for common test scenarios

use std::io::Write;
use tempfile::NamedTempFile;
use vr4300::core::cpu::CPU;
use vr4300::core::memory::Bus;
use vr4300::core::system::System;

/// Address test programs are loaded at
pub const PROGRAM_BASE: u32 = 0x8000_0000;

/// Create a CPU with default memory bus for testing
#[allow(dead_code)]
pub fn create_cpu_with_bus() -> (CPU, Bus) {
    (CPU::new(), Bus::new())
}

/// Create a System with `program` loaded at [`PROGRAM_BASE`] and the PC
/// pointing at it
#[allow(dead_code)]
pub fn create_system_with_program(program: &[u32]) -> System {
    let mut system = System::new();
    system
        .load_program(PROGRAM_BASE, program)
        .expect("Failed to load program");
    system.cpu_mut().set_pc(PROGRAM_BASE);
    system
}

/// Load a test program into memory at specified address
#[allow(dead_code)]
pub fn load_test_program(bus: &mut Bus, start_addr: u32, program: &[u32]) {
    let bytes: Vec<u8> = program.iter().flat_map(|w| w.to_be_bytes()).collect();
    bus.load_bytes(start_addr, &bytes)
        .expect("Failed to write to memory");
}

/// Write `program` as a raw big-endian image file
#[allow(dead_code)]
pub fn write_image(program: &[u32]) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("Failed to create image file");
    for word in program {
        file.write_all(&word.to_be_bytes())
            .expect("Failed to write image");
    }
    file.flush().expect("Failed to flush image");
    file
}

/// Write a TOML run configuration file
#[allow(dead_code)]
pub fn write_config(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("Failed to create config file");
    file.write_all(contents.as_bytes())
        .expect("Failed to write config");
    file
}
