// Licensed under the Apache-2.0 license

//! `reggen`: compiles spreadsheet-style register descriptions into C source
//! artifacts for embedded firmware.
//!
//! Two table families are supported: the register table (compiled into a
//! constants header plus a C source with dense value/limits tables and
//! validation functions) and the bit matrix (compiled into a header of
//! `MASK`/`GET`/`SET` macros). The compilation logic lives in the
//! `regmap-generator` crate; this binary owns file I/O and presentation.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use log::LevelFilter;
use simple_logger::SimpleLogger;

mod commands;
mod input;

#[derive(Parser)]
#[command(about = "Register map and bit manipulation macro generator.", version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a register table without writing artifacts.
    Check {
        /// .csv input file (register-table family)
        file: PathBuf,
    },
    /// Compile a register table into the constants header and C source.
    Regmap {
        /// .csv input file (register-table family)
        file: PathBuf,
        /// Generated header path
        #[arg(long, default_value = "reg_map.h")]
        header: PathBuf,
        /// Generated source path
        #[arg(long, default_value = "mb_regs.c")]
        source: PathBuf,
        /// Stamp the artifacts with today's date
        #[arg(long)]
        date: bool,
    },
    /// Generate bit manipulation macros from a bit-matrix table.
    Bitfields {
        /// .csv input file (bit-matrix family)
        file: PathBuf,
        /// Generated header path
        #[arg(short, long, default_value = "bit_macro.h")]
        output: PathBuf,
        /// Stamp the artifact with today's date
        #[arg(long)]
        date: bool,
    },
}

fn main() -> Result<()> {
    SimpleLogger::new()
        .with_level(LevelFilter::Info)
        .without_timestamps()
        .init()?;

    match Cli::parse().command {
        Commands::Check { file } => commands::check(&file),
        Commands::Regmap {
            file,
            header,
            source,
            date,
        } => commands::regmap(&file, &header, &source, date),
        Commands::Bitfields { file, output, date } => commands::bitfields(&file, &output, date),
    }
}
