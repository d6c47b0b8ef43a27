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

/// Emulator error types
use thiserror::Error;

/// Result type for emulator operations
pub type Result<T> = std::result::Result<T, EmulatorError>;

/// Main error type for the emulator
#[derive(Error, Debug)]
pub enum EmulatorError {
    #[error("Unimplemented op 0x{instruction:08X} at 0x{address:08X}: {disassembly}")]
    UnimplementedInstruction {
        address: u32,
        instruction: u32,
        disassembly: String,
    },

    #[error("Invalid branch target: {target}")]
    InvalidBranchTarget { target: i64 },

    #[error("Invalid memory access at 0x{address:08X}")]
    InvalidMemoryAccess { address: u32 },

    #[error("Unaligned memory access: {size}-byte access at 0x{address:08X}")]
    UnalignedAccess { address: u32, size: u8 },

    #[error("Program image not found: {0}")]
    ImageNotFound(String),

    #[error("Program image too large: {size} bytes (capacity {capacity})")]
    ImageTooLarge { size: usize, capacity: usize },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config error: {0}")]
    Config(#[from] toml::de::Error),

    #[error("Snapshot error: {0}")]
    Snapshot(#[from] serde_json::Error),
}

impl EmulatorError {
    /// Whether this error is an instruction-level fault
    ///
    /// Instruction-level faults are the ones the run loop converts into a halt:
    /// unimplemented opcodes, invalid branch targets and anything the memory
    /// interface rejects while an instruction executes.
    pub fn is_instruction_fault(&self) -> bool {
        matches!(
            self,
            EmulatorError::UnimplementedInstruction { .. }
                | EmulatorError::InvalidBranchTarget { .. }
                | EmulatorError::InvalidMemoryAccess { .. }
                | EmulatorError::UnalignedAccess { .. }
        )
    }
}
