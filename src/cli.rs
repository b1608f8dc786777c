// twobit-reader: Reader and interactive query tool for .2bit files.
//
// Copyright 2025 Tommi Mäklin [tommi@maklin.fi].
//
// Copyrights in this project are retained by contributors. No copyright assignment
// is required to contribute to this project.
//
// Except as otherwise noted (below and/or in individual files), this
// project is licensed under the Apache License, Version 2.0
// <LICENSE-APACHE> or <http://www.apache.org/licenses/LICENSE-2.0> or
// the MIT license, <LICENSE-MIT> or <http://opensource.org/licenses/MIT>,
// at your option.
//
use std::path::PathBuf;

use clap::Parser;

#[derive(Parser)]
#[command(version)]
pub struct Cli {
    // Input .2bit file
    #[arg(group = "input", required = true, help = "Input .2bit file")]
    pub input_file: PathBuf,

    // Regions to print as FASTA instead of starting the interactive session
    #[arg(short = 'r', long = "region", required = false, help = "Print name[:start-end] as FASTA and exit")]
    pub regions: Vec<String>,

    // Rendering of N-blocks and mask blocks, defaults to raw
    #[arg(long = "rendering", default_value = "raw", help = "raw or annotated")]
    pub rendering: String,

    // Verbosity
    #[arg(long = "verbose", default_value_t = false)]
    pub verbose: bool,
}
