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

//! Serializable CPU state snapshot

use serde::{Deserialize, Serialize};

/// Query-only copy of the architectural CPU state
///
/// Produced by [`super::CPU::snapshot`] for debuggers and front-ends that
/// must not hold a borrow of the live CPU while it runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CpuState {
    /// General purpose registers (r0-r31)
    pub gpr: [u64; 32],
    /// COP0 control registers
    pub control: [u32; 32],
    /// HI accumulator
    pub hi: u64,
    /// LO accumulator
    pub lo: u64,
    /// Address of the next instruction to fetch
    pub pc: u32,
    /// Pending branch target
    pub delay_pc: Option<u32>,
    /// Whether the last run halted
    pub halted: bool,
    /// Instructions retired since reset
    pub ops_executed: u64,
}

impl CpuState {
    /// Render the snapshot as pretty-printed JSON
    pub fn to_json(&self) -> crate::core::error::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
