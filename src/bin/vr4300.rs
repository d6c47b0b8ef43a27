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

//! Command-line runner for the VR4300 interpreter
//!
//! Loads a raw big-endian program image into RDRAM, runs it for a number of
//! instructions and reports where execution stopped.

use clap::Parser;
use log::{error, info};
use std::path::PathBuf;
use vr4300::core::config::{parse_address, RunConfig};
use vr4300::core::error::Result;
use vr4300::core::system::System;

/// MIPS R4300-class interpreter
#[derive(Parser)]
#[command(name = "vr4300")]
#[command(about = "MIPS R4300 (VR4300) CPU interpreter", long_about = None)]
struct Args {
    /// Path to a raw program image (big-endian words)
    image: String,

    /// TOML run configuration; command-line flags take precedence
    #[arg(short = 'c', long)]
    config: Option<PathBuf>,

    /// Address the image is loaded at (hex with 0x prefix, or decimal)
    #[arg(long, value_parser = parse_address)]
    load_address: Option<u32>,

    /// First instruction to execute (defaults to the load address)
    #[arg(short = 'e', long, value_parser = parse_address)]
    entry: Option<u32>,

    /// Number of instructions to execute
    #[arg(short = 'n', long)]
    instructions: Option<u64>,

    /// Write an execution trace to this file
    #[arg(short = 't', long)]
    trace: Option<PathBuf>,

    /// Print the final CPU state as JSON
    #[arg(long)]
    dump_state: bool,
}

impl Args {
    /// Merge the configuration file (if any) with command-line overrides
    fn run_config(&self) -> Result<RunConfig> {
        let mut config = match &self.config {
            Some(path) => RunConfig::from_file(path)?,
            None => RunConfig::default(),
        };

        if let Some(address) = self.load_address {
            config.load_address = address;
        }
        if let Some(entry) = self.entry {
            config.entry_point = Some(entry);
        }
        if let Some(instructions) = self.instructions {
            config.instructions = instructions;
        }
        if let Some(trace) = &self.trace {
            config.trace_path = Some(trace.clone());
        }
        Ok(config)
    }
}

fn main() -> Result<()> {
    // Load .env file if present (RUST_LOG and friends)
    if let Err(e) = dotenvy::dotenv() {
        if !e.not_found() {
            eprintln!("Warning: Failed to load .env file: {}", e);
        }
    }

    // Initialize logger with default level INFO
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    info!("vr4300 v{}", env!("CARGO_PKG_VERSION"));

    let args = Args::parse();
    let config = args.run_config()?;

    info!(
        "Image: {} at 0x{:08X}, entry 0x{:08X}, budget {} instructions",
        args.image,
        config.load_address,
        config.entry_point(),
        config.instructions
    );

    let mut system = match System::from_config(&config, &args.image) {
        Ok(system) => system,
        Err(e) => {
            error!("Failed to start: {}", e);
            return Err(e);
        }
    };

    let retired = system.run(config.instructions);

    match system.cpu().halt_reason() {
        Some(reason) => {
            error!("Execution halted: {}", reason);
            system.cpu().dump_registers();
        }
        None => info!("Budget exhausted"),
    }
    info!("Instructions retired: {}", retired);
    info!("Final PC: 0x{:08X}", system.pc());

    if args.dump_state {
        println!("{}", system.snapshot().to_json()?);
    }

    Ok(())
}
