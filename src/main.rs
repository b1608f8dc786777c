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
use std::io::BufWriter;
use std::process::ExitCode;

use clap::Parser;
use log::error;

use twobit_reader::TwoBit;
use twobit_reader::decoder::blocks::Rendering;
use twobit_reader::query::run_session;
use twobit_reader::region::Region;
use twobit_reader::region::extract_regions;

mod cli;

type E = Box<dyn std::error::Error>;

/// Initializes the logger with verbosity given in `log_max_level`.
fn init_log(log_max_level: usize) {
    stderrlog::new()
    .module(module_path!())
    .quiet(false)
    .verbosity(log_max_level)
    .timestamp(stderrlog::Timestamp::Off)
    .init()
    .unwrap();
}

fn run(
    cli: &cli::Cli,
) -> Result<(), E> {
    let rendering: Rendering = cli.rendering.parse()?;
    let mut reader = TwoBit::open(&cli.input_file)?;

    if !cli.regions.is_empty() {
        let regions = cli.regions.iter().map(|region| region.parse::<Region>()).collect::<Result<Vec<Region>, String>>()?;
        let mut conn_out = BufWriter::new(std::io::stdout().lock());
        extract_regions(&regions, &mut reader, rendering, &mut conn_out)?;
        return Ok(());
    }

    let mut conn_in = std::io::stdin().lock();
    let mut conn_out = std::io::stdout().lock();
    run_session(&mut reader, &mut conn_in, &mut conn_out, rendering)?;

    Ok(())
}

fn main() -> ExitCode {
    let cli = cli::Cli::parse();
    init_log(if cli.verbose { 3 } else { 1 });

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{}: {}", cli.input_file.display(), err);
            ExitCode::FAILURE
        },
    }
}
