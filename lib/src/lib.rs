// SPDX-FileCopyrightText: 2022 Kent Gibson <warthog618@gmail.com>
//
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A library for holding a single GPIO line high until interrupted.
//!
//! The [`PinController`] claims one pin as an output, drives it high, then
//! blocks until a cancellation signal arrives, at which point it releases
//! the pin back to the system.
//!
//! The hardware is reached through the [`Gpio`] trait, which is implemented
//! for the Linux GPIO character device by [`CdevGpio`] and for an in-memory
//! simulator by [`SimGpio`].
//!
//! Pin ids are interpreted under an explicit [`Numbering`] scheme carried by
//! the [`Config`] - there is no process-wide numbering mode.
//!
//! ```no_run
//! # fn example() -> lighton::Result<()> {
//! use lighton::{CdevGpio, Config, PinController};
//! use std::sync::mpsc;
//!
//! let (tx, rx) = mpsc::channel();
//! let config = Config::default();
//! let mut ctrl = PinController::new(config.clone(), CdevGpio::from_config(&config));
//! // hand tx to whatever should end the hold, e.g. a signal handler...
//! # drop(tx);
//! ctrl.run(&rx)?;
//! # Ok(())
//! # }
//! ```
//!
//! [`CdevGpio`]: gpio::CdevGpio
//! [`SimGpio`]: gpio::SimGpio

/// The configuration of the controlled pin.
pub mod config;

/// The controller driving the pin through its lifecycle.
pub mod controller;

/// The hardware boundary and its implementations.
pub mod gpio;

/// Pin numbering schemes.
pub mod numbering;

pub use config::Config;
pub use controller::{PinController, State};
pub use gpio::{CdevGpio, Direction, Gpio, Level, SimChip, SimGpio};
pub use numbering::Numbering;

/// The identifier of a pin, as interpreted under a [`Numbering`] scheme.
pub type Pin = u32;

/// Errors returned by [`lighton`] functions.
///
/// [`lighton`]: crate
#[derive(Clone, Debug, thiserror::Error, Eq, PartialEq)]
pub enum Error {
    /// The pin could not be claimed.
    ///
    /// Either it is already held by another owner, or it does not exist
    /// under the selected numbering scheme on this host.
    #[error("pin {pin} is unavailable: {reason}")]
    ResourceUnavailable { pin: Pin, reason: String },

    /// The pin has not been claimed by this owner, or not in the required
    /// direction.
    #[error("pin {0} is not claimed as an output")]
    NotClaimed(Pin),

    /// A hardware call on a claimed pin failed.
    #[error("{0}")]
    Gpio(String),

    /// The controller was asked to perform an operation not valid in its
    /// current state.
    #[error("operation not valid in the {0} state")]
    InvalidState(State),
}

/// The result for [`lighton`] functions.
///
/// [`lighton`]: crate
pub type Result<T> = std::result::Result<T, Error>;
