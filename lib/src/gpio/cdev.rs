// SPDX-FileCopyrightText: 2022 Kent Gibson <warthog618@gmail.com>
//
// SPDX-License-Identifier: Apache-2.0 OR MIT

use super::{resolve, Direction, Gpio, Level};
use crate::{Config, Error, Numbering, Pin, Result};
use gpiocdev::chip::Chip;
use gpiocdev::line::{Offset, Value};
use gpiocdev::Request;
use std::collections::HashMap;
use std::path::PathBuf;

/// A [`Gpio`] backed by the Linux GPIO character device.
///
/// Each claimed pin is held as a separate line request, so the kernel
/// enforces exclusivity against other processes.
/// Releasing a pin drops its request.
///
/// Lines are located either by offset on an explicit chip, or by the
/// `GPIO<n>` line name that Raspberry Pi kernels assign to BCM lines.
#[derive(Debug)]
pub struct CdevGpio {
    chip: Option<PathBuf>,
    consumer: String,
    numbering: Option<Numbering>,
    // keyed by logical line rather than pin id
    claims: HashMap<Pin, Claim>,
}

#[derive(Debug)]
struct Claim {
    req: Request,
    offset: Offset,
    direction: Direction,
}

impl CdevGpio {
    /// Create a GPIO that locates lines by name across all chips.
    pub fn new<N: Into<String>>(consumer: N) -> Self {
        CdevGpio {
            chip: None,
            consumer: consumer.into(),
            numbering: None,
            claims: HashMap::new(),
        }
    }

    /// Create a GPIO with the chip and consumer label from the config.
    ///
    /// The numbering scheme is still selected via [`Gpio::set_numbering`].
    pub fn from_config(config: &Config) -> Self {
        let mut gpio = CdevGpio::new(config.consumer.as_str());
        gpio.chip = config.chip.clone();
        gpio
    }

    /// Locate lines by offset on the given chip, rather than by name.
    pub fn on_chip<P: Into<PathBuf>>(&mut self, path: P) -> &mut Self {
        self.chip = Some(path.into());
        self
    }

    // Find the chip and offset of the line named by the pin.
    fn locate(&self, pin: Pin) -> Result<(PathBuf, Offset)> {
        let line = resolve(self.numbering, pin)?;
        match &self.chip {
            Some(path) => Ok((path.clone(), line)),
            None => {
                let name = format!("GPIO{}", line);
                let fl = gpiocdev::find_named_line(&name).ok_or_else(|| {
                    Error::ResourceUnavailable {
                        pin,
                        reason: format!("cannot find line '{}'", name),
                    }
                })?;
                Ok((fl.chip, fl.info.offset))
            }
        }
    }

    fn claimed(&self, pin: Pin) -> Result<&Claim> {
        let line = resolve(self.numbering, pin).map_err(|_| Error::NotClaimed(pin))?;
        self.claims.get(&line).ok_or(Error::NotClaimed(pin))
    }
}

impl Gpio for CdevGpio {
    fn set_numbering(&mut self, numbering: Numbering) -> Result<()> {
        self.numbering = Some(numbering);
        Ok(())
    }

    fn claim(&mut self, pin: Pin, direction: Direction) -> Result<()> {
        let line = resolve(self.numbering, pin)?;
        if self.claims.contains_key(&line) {
            return Err(Error::ResourceUnavailable {
                pin,
                reason: "already claimed".into(),
            });
        }
        let (chip, offset) = self.locate(pin)?;
        let mut builder = Request::builder();
        builder
            .on_chip(chip.as_path())
            .with_consumer(self.consumer.as_str())
            .with_line(offset);
        match direction {
            Direction::Input => builder.as_input(),
            Direction::Output => builder.as_output(Value::Inactive),
        };
        let req = builder
            .request()
            .map_err(|e| Error::ResourceUnavailable {
                pin,
                reason: format!("request for line {} on {} failed: {}", offset, chip.display(), e),
            })?;
        self.claims.insert(
            line,
            Claim {
                req,
                offset,
                direction,
            },
        );
        Ok(())
    }

    fn write(&mut self, pin: Pin, level: Level) -> Result<()> {
        let claim = self.claimed(pin)?;
        if claim.direction != Direction::Output {
            return Err(Error::NotClaimed(pin));
        }
        claim
            .req
            .set_value(claim.offset, level_to_value(level))
            .map_err(|e| Error::Gpio(e.to_string()))
    }

    fn read(&self, pin: Pin) -> Result<Level> {
        let claim = self.claimed(pin)?;
        let value = claim
            .req
            .value(claim.offset)
            .map_err(|e| Error::Gpio(e.to_string()))?;
        Ok(value_to_level(value))
    }

    fn is_claimed(&self, pin: Pin) -> Result<bool> {
        if self.claimed(pin).is_ok() {
            return Ok(true);
        }
        let (path, offset) = self.locate(pin)?;
        let chip = Chip::from_path(&path).map_err(|e| Error::Gpio(e.to_string()))?;
        let info = chip
            .line_info(offset)
            .map_err(|e| Error::Gpio(e.to_string()))?;
        Ok(info.used)
    }

    fn release_all(&mut self) {
        // dropping the requests returns the lines to the kernel
        self.claims.clear();
    }
}

fn level_to_value(level: Level) -> Value {
    match level {
        Level::Low => Value::Inactive,
        Level::High => Value::Active,
    }
}

fn value_to_level(value: Value) -> Level {
    match value {
        Value::Inactive => Level::Low,
        Value::Active => Level::High,
    }
}
