// SPDX-FileCopyrightText: 2022 Kent Gibson <warthog618@gmail.com>
//
// SPDX-License-Identifier: Apache-2.0 OR MIT

use super::{resolve, Direction, Gpio, Level};
use crate::{Error, Numbering, Pin, Result};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

/// A simulated GPIO chip.
///
/// The chip is the shared hardware - clones refer to the same lines.
/// Owners are created with [`SimChip::gpio`], each playing the part of a
/// separate process, and the state of the lines can be inspected and driven
/// from outside those owners, much as the gpio-sim kernel module allows.
///
/// Lines are numbered by their logical (BCM) line number.
#[derive(Clone, Debug)]
pub struct SimChip(Arc<Mutex<Lines>>);

#[derive(Debug)]
struct Lines {
    num_lines: u32,
    lines: HashMap<Pin, Line>,
}

#[derive(Clone, Debug, Default)]
struct Line {
    owner: Option<u64>,
    direction: Direction,
    level: Level,
    pull: Level,
}

static NEXT_OWNER: AtomicU64 = AtomicU64::new(1);

impl SimChip {
    /// Create a chip with lines 0 to `num_lines - 1`, all unclaimed inputs
    /// pulled low.
    pub fn new(num_lines: u32) -> Self {
        SimChip(Arc::new(Mutex::new(Lines {
            num_lines,
            lines: HashMap::new(),
        })))
    }

    /// Create a new owner of lines on the chip.
    pub fn gpio(&self) -> SimGpio {
        SimGpio {
            chip: self.clone(),
            owner: NEXT_OWNER.fetch_add(1, Ordering::Relaxed),
            numbering: None,
            claims: HashMap::new(),
        }
    }

    /// The current level of the line.
    ///
    /// Returns None if the line does not exist.
    pub fn level(&self, line: Pin) -> Option<Level> {
        let lines = self.lock();
        lines.exists(line).then(|| lines.get(line).level)
    }

    /// The direction of the line.
    ///
    /// Returns None if the line does not exist.
    pub fn direction(&self, line: Pin) -> Option<Direction> {
        let lines = self.lock();
        lines.exists(line).then(|| lines.get(line).direction)
    }

    /// Whether the line is held by any owner.
    ///
    /// Lines that do not exist are never claimed.
    pub fn is_claimed(&self, line: Pin) -> bool {
        let lines = self.lock();
        lines.exists(line) && lines.get(line).owner.is_some()
    }

    /// Set the pull on the line, which sets the level of unclaimed lines and
    /// of lines claimed as inputs.
    ///
    /// Lines that do not exist are ignored.
    pub fn set_pull(&self, line: Pin, pull: Level) {
        let mut lines = self.lock();
        if !lines.exists(line) {
            return;
        }
        let l = lines.get_mut(line);
        l.pull = pull;
        if l.direction == Direction::Input {
            l.level = pull;
        }
    }

    fn lock(&self) -> MutexGuard<'_, Lines> {
        // every update completes under the lock, so poisoned state is valid
        self.0.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl Lines {
    fn exists(&self, line: Pin) -> bool {
        line < self.num_lines
    }

    fn get(&self, line: Pin) -> Line {
        self.lines.get(&line).cloned().unwrap_or_default()
    }

    fn get_mut(&mut self, line: Pin) -> &mut Line {
        self.lines.entry(line).or_default()
    }

    fn release(&mut self, line: Pin, owner: u64) {
        let l = self.get_mut(line);
        if l.owner == Some(owner) {
            l.owner = None;
        }
    }
}

/// An owner of lines on a [`SimChip`].
///
/// Dropping the owner releases any lines it still holds but, like a process
/// exiting without cleanup, leaves their direction and level as last set.
#[derive(Debug)]
pub struct SimGpio {
    chip: SimChip,
    owner: u64,
    numbering: Option<Numbering>,
    // claimed lines, keyed by line rather than pin id
    claims: HashMap<Pin, Direction>,
}

impl SimGpio {
    // The line named by the pin under the current numbering, if claimed.
    fn claimed(&self, pin: Pin) -> Result<(Pin, Direction)> {
        let line = resolve(self.numbering, pin).map_err(|_| Error::NotClaimed(pin))?;
        match self.claims.get(&line) {
            Some(direction) => Ok((line, *direction)),
            None => Err(Error::NotClaimed(pin)),
        }
    }
}

impl Gpio for SimGpio {
    fn set_numbering(&mut self, numbering: Numbering) -> Result<()> {
        self.numbering = Some(numbering);
        Ok(())
    }

    fn claim(&mut self, pin: Pin, direction: Direction) -> Result<()> {
        let line = resolve(self.numbering, pin)?;
        let mut lines = self.chip.lock();
        if !lines.exists(line) {
            return Err(Error::ResourceUnavailable {
                pin,
                reason: format!("line {} does not exist", line),
            });
        }
        let l = lines.get_mut(line);
        if l.owner.is_some() {
            return Err(Error::ResourceUnavailable {
                pin,
                reason: format!("line {} is busy", line),
            });
        }
        l.owner = Some(self.owner);
        l.direction = direction;
        l.level = match direction {
            Direction::Input => l.pull,
            Direction::Output => Level::Low,
        };
        self.claims.insert(line, direction);
        Ok(())
    }

    fn write(&mut self, pin: Pin, level: Level) -> Result<()> {
        let (line, direction) = self.claimed(pin)?;
        if direction != Direction::Output {
            return Err(Error::NotClaimed(pin));
        }
        self.chip.lock().get_mut(line).level = level;
        Ok(())
    }

    fn read(&self, pin: Pin) -> Result<Level> {
        let (line, _) = self.claimed(pin)?;
        Ok(self.chip.lock().get(line).level)
    }

    fn is_claimed(&self, pin: Pin) -> Result<bool> {
        let line = resolve(self.numbering, pin)?;
        Ok(self.chip.is_claimed(line))
    }

    fn release_all(&mut self) {
        let mut lines = self.chip.lock();
        for line in self.claims.keys() {
            lines.release(*line, self.owner);
            let l = lines.get_mut(*line);
            l.direction = Direction::Input;
            l.level = l.pull;
        }
        self.claims.clear();
    }
}

impl Drop for SimGpio {
    fn drop(&mut self) {
        let mut lines = self.chip.lock();
        for line in self.claims.keys() {
            lines.release(*line, self.owner);
        }
    }
}
