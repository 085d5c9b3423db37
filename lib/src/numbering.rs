// SPDX-FileCopyrightText: 2022 Kent Gibson <warthog618@gmail.com>
//
// SPDX-License-Identifier: Apache-2.0 OR MIT

use crate::Pin;
use std::fmt;

/// The convention used to interpret a pin id.
///
/// The default, and the scheme used by the `lighton` binary, is [`Bcm`].
///
/// [`Bcm`]: Numbering::Bcm
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum Numbering {
    /// Logical numbering - the SoC GPIO line, independent of the connector.
    ///
    /// On a Raspberry Pi the line `GPIO21` is pin 21.
    #[default]
    Bcm,

    /// Physical numbering - the pin position on the 40-pin header.
    Board,
}

// BCM line for each physical header pin, indexed by pin - 1.
// None for power and ground pins.
const BOARD_TO_BCM: [Option<Pin>; 40] = [
    None,     // 1  3V3
    None,     // 2  5V
    Some(2),  // 3
    None,     // 4  5V
    Some(3),  // 5
    None,     // 6  GND
    Some(4),  // 7
    Some(14), // 8
    None,     // 9  GND
    Some(15), // 10
    Some(17), // 11
    Some(18), // 12
    Some(27), // 13
    None,     // 14 GND
    Some(22), // 15
    Some(23), // 16
    None,     // 17 3V3
    Some(24), // 18
    Some(10), // 19
    None,     // 20 GND
    Some(9),  // 21
    Some(25), // 22
    Some(11), // 23
    Some(8),  // 24
    None,     // 25 GND
    Some(7),  // 26
    Some(0),  // 27 ID_SD
    Some(1),  // 28 ID_SC
    Some(5),  // 29
    None,     // 30 GND
    Some(6),  // 31
    Some(12), // 32
    Some(13), // 33
    None,     // 34 GND
    Some(19), // 35
    Some(16), // 36
    Some(26), // 37
    Some(20), // 38
    None,     // 39 GND
    Some(21), // 40
];

impl Numbering {
    /// Map a pin id to the logical (BCM) GPIO line it names.
    ///
    /// Returns None if the id does not name a GPIO line under this scheme,
    /// such as a power or ground pin on the header.
    pub fn to_line(self, pin: Pin) -> Option<Pin> {
        match self {
            Numbering::Bcm => Some(pin),
            Numbering::Board => {
                let idx = usize::try_from(pin).ok()?.checked_sub(1)?;
                BOARD_TO_BCM.get(idx).copied().flatten()
            }
        }
    }
}

impl fmt::Display for Numbering {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Numbering::Bcm => write!(f, "BCM"),
            Numbering::Board => write!(f, "BOARD"),
        }
    }
}
