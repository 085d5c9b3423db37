// SPDX-FileCopyrightText: 2021 Kent Gibson <warthog618@gmail.com>
//
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::sync::mpsc::{self, Receiver};

/// Route SIGINT to a channel.
///
/// Each interrupt delivers one message on the returned receiver, and the
/// process is no longer terminated by the signal.
/// Only one handler may be installed per process.
pub fn channel() -> Result<Receiver<()>, ctrlc::Error> {
    let (tx, rx) = mpsc::channel();
    ctrlc::set_handler(move || {
        // the receiver only goes away as the process exits
        _ = tx.send(());
    })?;
    Ok(rx)
}
