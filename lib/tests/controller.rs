// SPDX-FileCopyrightText: 2022 Kent Gibson <warthog618@gmail.com>
//
// SPDX-License-Identifier: Apache-2.0 OR MIT

// Controller behaviour against the in-memory simulator, with the controller
// running in its own thread to stand in for the process.

use lighton::{Config, Error, Gpio, Level, PinController, SimChip, SimGpio, State};
use std::sync::mpsc::{self, Sender};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

const HOLD_PERIOD: Duration = Duration::from_millis(200);

struct Running {
    cancel: Sender<()>,
    handle: JoinHandle<(PinController<SimGpio>, lighton::Result<()>)>,
}

impl Running {
    fn interrupt(self) -> (PinController<SimGpio>, lighton::Result<()>) {
        self.cancel.send(()).unwrap();
        self.handle.join().unwrap()
    }
}

// Start a controller and wait until it has driven the pin.
fn spawn(chip: &SimChip) -> Running {
    let mut ctrl = PinController::new(Config::default(), chip.gpio());
    let (tx, rx) = mpsc::channel();
    let (started_tx, started_rx) = mpsc::channel();
    let handle = thread::spawn(move || {
        if let Err(e) = ctrl.start() {
            started_tx.send(()).unwrap();
            return (ctrl, Err(e));
        }
        started_tx.send(()).unwrap();
        let res = ctrl.hold(&rx);
        (ctrl, res)
    });
    started_rx.recv_timeout(Duration::from_secs(1)).unwrap();
    Running { cancel: tx, handle }
}

#[test]
fn drives_high_for_whole_hold() {
    let chip = SimChip::new(32);
    let r = spawn(&chip);

    let end = Instant::now() + HOLD_PERIOD;
    while Instant::now() < end {
        assert!(chip.is_claimed(21));
        assert_eq!(chip.level(21), Some(Level::High));
        thread::sleep(Duration::from_millis(10));
    }

    let (ctrl, res) = r.interrupt();
    assert_eq!(res, Ok(()));
    assert_eq!(ctrl.state(), State::Released);
}

#[test]
fn second_instance_unavailable() {
    let chip = SimChip::new(32);
    let r = spawn(&chip);

    let mut second = PinController::new(Config::default(), chip.gpio());
    assert_eq!(
        second.start(),
        Err(Error::ResourceUnavailable {
            pin: 21,
            reason: "line 21 is busy".into()
        })
    );
    assert_eq!(second.state(), State::Uninitialized);

    // the failed start does not disturb the first
    assert_eq!(chip.level(21), Some(Level::High));

    let (_, res) = r.interrupt();
    assert_eq!(res, Ok(()));
}

#[test]
fn release_allows_reclaim() {
    let chip = SimChip::new(32);
    let (_, res) = spawn(&chip).interrupt();
    assert_eq!(res, Ok(()));
    assert!(!chip.is_claimed(21));

    let mut next = PinController::new(Config::default(), chip.gpio());
    next.start().unwrap();
    assert_eq!(next.state(), State::Driven);
    assert_eq!(chip.level(21), Some(Level::High));
}

#[test]
fn no_exit_without_interrupt() {
    let chip = SimChip::new(32);
    let r = spawn(&chip);

    thread::sleep(HOLD_PERIOD);
    assert!(!r.handle.is_finished());
    assert!(chip.is_claimed(21));

    let (_, res) = r.interrupt();
    assert_eq!(res, Ok(()));
}

#[test]
fn hold_then_interrupt() {
    let chip = SimChip::new(32);
    let r = spawn(&chip);

    assert_eq!(chip.level(21), Some(Level::High));

    let start = Instant::now();
    let (ctrl, res) = r.interrupt();
    assert!(start.elapsed() < Duration::from_secs(1));
    assert_eq!(res, Ok(()));
    assert_eq!(ctrl.state(), State::Released);
    assert_eq!(ctrl.gpio().is_claimed(21), Ok(false));
    assert!(!chip.is_claimed(21));
}

#[test]
fn run_to_termination() {
    let chip = SimChip::new(32);
    let mut ctrl = PinController::new(Config::default(), chip.gpio());
    let (tx, rx) = mpsc::channel();
    let probe = chip.clone();
    let handle = thread::spawn(move || {
        let res = ctrl.run(&rx);
        (ctrl, res)
    });

    let deadline = Instant::now() + Duration::from_secs(1);
    while probe.level(21) != Some(Level::High) {
        assert!(Instant::now() < deadline, "pin not driven high");
        thread::sleep(Duration::from_millis(5));
    }

    tx.send(()).unwrap();
    let (ctrl, res) = handle.join().unwrap();
    assert_eq!(res, Ok(()));
    assert_eq!(ctrl.state(), State::Terminated);
    assert!(!chip.is_claimed(21));
}

#[test]
fn run_unavailable_fails_fast() {
    // no line 21 on this chip
    let chip = SimChip::new(16);
    let mut ctrl = PinController::new(Config::default(), chip.gpio());
    let (_tx, rx) = mpsc::channel();
    let res = ctrl.run(&rx);
    assert!(matches!(res, Err(Error::ResourceUnavailable { pin: 21, .. })));
    assert_eq!(ctrl.state(), State::Uninitialized);
}
