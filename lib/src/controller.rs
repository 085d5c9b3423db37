// SPDX-FileCopyrightText: 2022 Kent Gibson <warthog618@gmail.com>
//
// SPDX-License-Identifier: Apache-2.0 OR MIT

use crate::gpio::{Direction, Gpio, Level};
use crate::{Config, Error, Result};
use std::fmt;
use std::sync::mpsc::Receiver;

/// The lifecycle of a [`PinController`].
///
/// Transitions are strictly sequential, with the exit from [`Waiting`]
/// triggered only by the cancellation signal.
///
/// [`Waiting`]: State::Waiting
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum State {
    /// Nothing has been claimed.
    #[default]
    Uninitialized,

    /// The pin is claimed as an output.
    Configured,

    /// The pin has been driven high.
    Driven,

    /// Blocked waiting for the cancellation signal.
    Waiting,

    /// The pin has been released.
    Released,

    /// The controller has finished.
    Terminated,
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            State::Uninitialized => "uninitialized",
            State::Configured => "configured",
            State::Driven => "driven",
            State::Waiting => "waiting",
            State::Released => "released",
            State::Terminated => "terminated",
        };
        write!(f, "{}", name)
    }
}

/// Holds a single pin high until cancelled.
///
/// The controller owns the [`Gpio`] it drives, and the pin remains claimed
/// from [`start`] until the cancellation signal is received in [`hold`].
///
/// If the process is killed without the signal being delivered the pin is
/// left as last set.
///
/// [`start`]: PinController::start
/// [`hold`]: PinController::hold
#[derive(Debug)]
pub struct PinController<G: Gpio> {
    config: Config,
    gpio: G,
    state: State,
}

impl<G: Gpio> PinController<G> {
    /// Create a controller for the configured pin.
    ///
    /// Nothing is claimed until the controller is started.
    pub fn new(config: Config, gpio: G) -> Self {
        PinController {
            config,
            gpio,
            state: State::Uninitialized,
        }
    }

    /// The configuration of the controlled pin.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// The hardware the pin is driven through.
    pub fn gpio(&self) -> &G {
        &self.gpio
    }

    /// The current lifecycle state.
    pub fn state(&self) -> State {
        self.state
    }

    /// Claim the pin as an output and drive it high.
    ///
    /// Fails with [`Error::ResourceUnavailable`] if the pin cannot be claimed,
    /// and [`Error::InvalidState`] if the controller has already been started.
    pub fn start(&mut self) -> Result<()> {
        if self.state != State::Uninitialized {
            return Err(Error::InvalidState(self.state));
        }
        let pin = self.config.pin;
        self.gpio.set_numbering(self.config.numbering)?;
        self.gpio.claim(pin, Direction::Output)?;
        self.state = State::Configured;
        if let Err(e) = self.gpio.write(pin, Level::High) {
            self.gpio.release_all();
            self.state = State::Released;
            return Err(e);
        }
        self.state = State::Driven;
        Ok(())
    }

    /// Block until cancelled, then release the pin.
    ///
    /// Cancellation is a message on, or the disconnection of, the channel.
    /// There is no timeout.
    pub fn hold(&mut self, cancel: &Receiver<()>) -> Result<()> {
        if self.state != State::Driven {
            return Err(Error::InvalidState(self.state));
        }
        self.state = State::Waiting;
        // disconnection also ends the wait
        _ = cancel.recv();
        self.gpio.release_all();
        self.state = State::Released;
        Ok(())
    }

    /// Drive the pin high, hold it until cancelled, then release it.
    pub fn run(&mut self, cancel: &Receiver<()>) -> Result<()> {
        self.start()?;
        self.hold(cancel)?;
        self.state = State::Terminated;
        Ok(())
    }
}
