// SPDX-FileCopyrightText: 2021 Kent Gibson <warthog618@gmail.com>
//
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drive GPIO21 high and hold it there until interrupted.

use anyhow::{Context, Result};
use clap::Parser;
use lighton::{CdevGpio, Config, PinController};
use std::process::ExitCode;

mod interrupt;

fn main() -> ExitCode {
    match Opts::try_parse() {
        Ok(_opts) => match run() {
            Ok(()) => return ExitCode::SUCCESS,
            Err(e) => eprintln!("{:#}", e),
        },
        Err(e) => {
            // --help and --version land here too
            _ = e.print();
            if !e.use_stderr() {
                return ExitCode::SUCCESS;
            }
        }
    }
    ExitCode::FAILURE
}

#[derive(Parser)]
#[command(
    name = "lighton",
    about = "Drive GPIO21 (BCM numbering) high until interrupted with Ctrl-C.",
    version
)]
struct Opts {}

fn run() -> Result<()> {
    // installed before the claim so an early interrupt still releases the pin
    let interrupt = interrupt::channel().context("unable to install interrupt handler")?;
    let config = Config::default();
    let gpio = CdevGpio::from_config(&config);
    let mut ctrl = PinController::new(config, gpio);
    ctrl.run(&interrupt).with_context(|| {
        format!(
            "unable to drive pin {} ({} numbering) high",
            ctrl.config().pin,
            ctrl.config().numbering
        )
    })
}
