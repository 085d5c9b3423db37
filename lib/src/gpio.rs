// SPDX-FileCopyrightText: 2022 Kent Gibson <warthog618@gmail.com>
//
// SPDX-License-Identifier: Apache-2.0 OR MIT

use crate::{Numbering, Pin, Result};

mod cdev;
mod sim;

pub use cdev::CdevGpio;
pub use sim::{SimChip, SimGpio};

/// The logical level of a line.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum Level {
    /// The line is low.
    #[default]
    Low,

    /// The line is high.
    High,
}

/// The direction of a claimed line.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum Direction {
    /// The line is an input.
    ///
    /// This is the state lines return to when released.
    #[default]
    Input,

    /// The line is an output.
    Output,
}

/// The hardware abstraction used by the [`PinController`].
///
/// Implementations own the lines they claim exclusively until they are
/// released.
///
/// [`PinController`]: crate::PinController
pub trait Gpio {
    /// Select the scheme used to interpret pin ids in subsequent calls.
    fn set_numbering(&mut self, numbering: Numbering) -> Result<()>;

    /// Claim a pin exclusively in the given direction.
    ///
    /// Outputs are claimed driven low.
    ///
    /// Fails with [`Error::ResourceUnavailable`] if no numbering scheme has
    /// been selected, the pin does not exist, or it is already claimed.
    ///
    /// [`Error::ResourceUnavailable`]: crate::Error::ResourceUnavailable
    fn claim(&mut self, pin: Pin, direction: Direction) -> Result<()>;

    /// Set the level of a pin claimed as an output.
    fn write(&mut self, pin: Pin, level: Level) -> Result<()>;

    /// Get the level of a claimed pin.
    fn read(&self, pin: Pin) -> Result<Level>;

    /// Whether the pin is currently claimed by any owner.
    fn is_claimed(&self, pin: Pin) -> Result<bool>;

    /// Release all pins claimed by this owner.
    ///
    /// Released lines revert to unclaimed inputs.
    fn release_all(&mut self);
}

// Resolve a pin id to its logical line, or explain why it can't be.
fn resolve(numbering: Option<Numbering>, pin: Pin) -> Result<Pin> {
    let numbering = numbering.ok_or_else(|| crate::Error::ResourceUnavailable {
        pin,
        reason: "no numbering scheme selected".into(),
    })?;
    numbering
        .to_line(pin)
        .ok_or_else(|| crate::Error::ResourceUnavailable {
            pin,
            reason: format!("not a GPIO under {} numbering", numbering),
        })
}
