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

//! MIPS R4300-class CPU interpreter core
//!
//! This library provides the instruction-execution core of a VR4300 (Nintendo 64)
//! interpreter: a 64-bit register model, a three-level opcode dispatch scheme,
//! the branch-delay-slot pipeline and a flat memory bus to run programs against.
//!
//! # Example
//!
//! ```
//! use vr4300::core::cpu::CPU;
//! use vr4300::core::memory::{Bus, Memory};
//!
//! let mut cpu = CPU::new();
//! let mut bus = Bus::new();
//!
//! // addiu v0, r0, 42
//! bus.write32(0x0000_0000, 0x2402_002A).unwrap();
//! cpu.step(&mut bus).unwrap();
//! assert_eq!(cpu.reg(2), 42);
//! ```

pub mod core;
