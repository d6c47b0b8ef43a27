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

//! Memory interface and flat RDRAM bus
//!
//! The CPU core never touches storage directly: every instruction fetch, load
//! and store goes through the [`Memory`] trait. [`Bus`] is the concrete
//! implementation used by the command-line runner, tests and benchmarks.
//!
//! # Memory Map
//!
//! | Physical Address Range | Region | Size  | Access |
//! |------------------------|--------|-------|--------|
//! | 0x00000000-0x007FFFFF  | RDRAM  | 8MB   | R/W    |
//!
//! # Address Translation
//!
//! The MIPS segments are folded onto physical memory by masking the upper
//! three bits, so KUSEG, KSEG0 and KSEG1 all mirror the same RDRAM:
//! - KUSEG (0x00000000-0x7FFFFFFF)
//! - KSEG0 (0x80000000-0x9FFFFFFF)
//! - KSEG1 (0xA0000000-0xBFFFFFFF)
//!
//! Words are stored big-endian, matching the VR4300 in its N64 configuration.
//!
//! # Example
//!
//! ```
//! use vr4300::core::memory::{Bus, Memory};
//!
//! let mut bus = Bus::new();
//!
//! // Write to RDRAM via KSEG0
//! bus.write32(0x80000000, 0x12345678).unwrap();
//!
//! // Read from same location via different segment (should mirror)
//! assert_eq!(bus.read32(0x00000000).unwrap(), 0x12345678);
//! assert_eq!(bus.read32(0xA0000000).unwrap(), 0x12345678);
//! assert_eq!(bus.read8(0xA0000000).unwrap(), 0x12);
//! ```

use crate::core::error::{EmulatorError, Result};
use std::fs::File;
use std::io::Read;

/// Memory interface consumed by the CPU
///
/// All four operations address a 32-bit space. Implementations may reject
/// an access (unmapped address, misalignment); the error then propagates
/// through the faulting instruction to the run loop like any other fault.
pub trait Memory {
    /// Read a byte
    fn read8(&self, addr: u32) -> Result<u8>;

    /// Read a 32-bit word
    fn read32(&self, addr: u32) -> Result<u32>;

    /// Write a byte
    fn write8(&mut self, addr: u32, value: u8) -> Result<()>;

    /// Write a 32-bit word
    fn write32(&mut self, addr: u32, value: u32) -> Result<()>;
}

/// Flat RDRAM memory bus
pub struct Bus {
    /// Main RDRAM (8MB)
    ///
    /// Physical address: 0x00000000-0x007FFFFF
    ram: Vec<u8>,
}

impl Bus {
    /// RDRAM size (8MB, expansion pak fitted)
    pub const RAM_SIZE: usize = 8 * 1024 * 1024;

    /// Create a new Bus instance with zeroed RDRAM
    ///
    /// # Example
    ///
    /// ```
    /// use vr4300::core::memory::Bus;
    ///
    /// let bus = Bus::new();
    /// ```
    pub fn new() -> Self {
        Self {
            ram: vec![0u8; Self::RAM_SIZE],
        }
    }

    /// Reset the bus to initial state
    ///
    /// Clears RDRAM to zero, simulating a power-cycle.
    pub fn reset(&mut self) {
        self.ram.fill(0);
    }

    /// Translate virtual address to physical address
    #[inline(always)]
    fn translate_address(&self, vaddr: u32) -> u32 {
        vaddr & 0x1FFF_FFFF
    }

    /// Resolve a virtual address range to an offset into RDRAM
    ///
    /// Fails with `InvalidMemoryAccess` when any byte of the range falls
    /// outside RDRAM.
    fn ram_offset(&self, vaddr: u32, len: usize) -> Result<usize> {
        let offset = self.translate_address(vaddr) as usize;
        if offset + len > self.ram.len() {
            return Err(EmulatorError::InvalidMemoryAccess { address: vaddr });
        }
        Ok(offset)
    }

    /// Copy a raw program image into memory
    ///
    /// # Arguments
    ///
    /// * `vaddr` - Virtual address of the first byte
    /// * `bytes` - Image contents, already in big-endian word order
    ///
    /// # Errors
    ///
    /// Returns `ImageTooLarge` if the image does not fit between `vaddr`
    /// and the end of RDRAM.
    pub fn load_bytes(&mut self, vaddr: u32, bytes: &[u8]) -> Result<()> {
        let offset = self.translate_address(vaddr) as usize;
        let capacity = self.ram.len().saturating_sub(offset);
        if bytes.len() > capacity {
            return Err(EmulatorError::ImageTooLarge {
                size: bytes.len(),
                capacity,
            });
        }

        self.ram[offset..offset + bytes.len()].copy_from_slice(bytes);
        log::debug!(
            "Loaded {} bytes at 0x{:08X} (physical 0x{:08X})",
            bytes.len(),
            vaddr,
            offset
        );
        Ok(())
    }

    /// Load a raw program image from a file
    ///
    /// # Example
    ///
    /// ```no_run
    /// use vr4300::core::memory::Bus;
    ///
    /// let mut bus = Bus::new();
    /// bus.load_image("program.bin", 0x80000000).unwrap();
    /// ```
    pub fn load_image(&mut self, path: &str, vaddr: u32) -> Result<()> {
        let mut file =
            File::open(path).map_err(|_| EmulatorError::ImageNotFound(path.to_string()))?;

        let mut buffer = Vec::new();
        file.read_to_end(&mut buffer)?;

        self.load_bytes(vaddr, &buffer)
    }
}

impl Memory for Bus {
    fn read8(&self, vaddr: u32) -> Result<u8> {
        let offset = self.ram_offset(vaddr, 1)?;
        Ok(self.ram[offset])
    }

    fn read32(&self, vaddr: u32) -> Result<u32> {
        if vaddr & 0x3 != 0 {
            return Err(EmulatorError::UnalignedAccess {
                address: vaddr,
                size: 4,
            });
        }

        let offset = self.ram_offset(vaddr, 4)?;
        let bytes = [
            self.ram[offset],
            self.ram[offset + 1],
            self.ram[offset + 2],
            self.ram[offset + 3],
        ];
        Ok(u32::from_be_bytes(bytes))
    }

    fn write8(&mut self, vaddr: u32, value: u8) -> Result<()> {
        let offset = self.ram_offset(vaddr, 1)?;
        self.ram[offset] = value;
        Ok(())
    }

    fn write32(&mut self, vaddr: u32, value: u32) -> Result<()> {
        if vaddr & 0x3 != 0 {
            return Err(EmulatorError::UnalignedAccess {
                address: vaddr,
                size: 4,
            });
        }

        let offset = self.ram_offset(vaddr, 4)?;
        self.ram[offset..offset + 4].copy_from_slice(&value.to_be_bytes());
        Ok(())
    }
}

impl Default for Bus {
    fn default() -> Self {
        Self::new()
    }
}
