// SPDX-FileCopyrightText: 2022 Kent Gibson <warthog618@gmail.com>
//
// SPDX-License-Identifier: Apache-2.0 OR MIT

use crate::{Numbering, Pin};
use std::path::PathBuf;

/// The pin held high when no other pin is configured.
pub const DEFAULT_PIN: Pin = 21;

/// The consumer label applied to claimed lines.
pub const DEFAULT_CONSUMER: &str = "lighton";

/// The configuration of the pin held by a [`PinController`].
///
/// The numbering scheme is part of the configuration rather than process
/// state, so controllers using different schemes can coexist.
///
/// ```
/// use lighton::{Config, Numbering};
///
/// // header pin 40 is BCM line 21
/// let mut cfg = Config::default();
/// cfg.with_numbering(Numbering::Board).with_pin(40);
/// assert_eq!(cfg.line(), Some(21));
/// ```
///
/// [`PinController`]: crate::PinController
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Config {
    /// The scheme used to interpret `pin`.
    pub numbering: Numbering,

    /// The pin to drive high.
    pub pin: Pin,

    /// The GPIO chip hosting the line.
    ///
    /// If None the line is located by its `GPIO<n>` name across all chips.
    pub chip: Option<PathBuf>,

    /// The label identifying this program as the owner of the line.
    pub consumer: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            numbering: Numbering::Bcm,
            pin: DEFAULT_PIN,
            chip: None,
            consumer: DEFAULT_CONSUMER.into(),
        }
    }
}

impl Config {
    /// Set the numbering scheme used to interpret the pin.
    pub fn with_numbering(&mut self, numbering: Numbering) -> &mut Self {
        self.numbering = numbering;
        self
    }

    /// Set the pin to drive.
    pub fn with_pin(&mut self, pin: Pin) -> &mut Self {
        self.pin = pin;
        self
    }

    /// Locate the line by offset on a particular chip, rather than by name.
    pub fn on_chip<P: Into<PathBuf>>(&mut self, path: P) -> &mut Self {
        self.chip = Some(path.into());
        self
    }

    /// Set the consumer label applied to the claimed line.
    pub fn with_consumer<N: Into<String>>(&mut self, consumer: N) -> &mut Self {
        self.consumer = consumer.into();
        self
    }

    /// The logical line named by the configured pin, if any.
    pub fn line(&self) -> Option<Pin> {
        self.numbering.to_line(self.pin)
    }
}
