//! Periodic tick driver — a cancellable clock emitting AdvanceTick
//! actions into a channel.
//!
//! The engine itself is driver-agnostic; this is the one optional
//! real-time piece. `stop()` joins the worker thread before
//! returning, so once it returns no further action can be emitted.
//! Dropping the driver stops it (scoped acquisition/release).

use crate::action::Action;
use std::{
    sync::{
        atomic::{AtomicBool, Ordering},
        mpsc::Sender,
        Arc,
    },
    thread,
    time::Duration,
};

pub struct TickDriver {
    stop_flag: Arc<AtomicBool>,
    worker: Option<thread::JoinHandle<()>>,
}

impl TickDriver {
    /// Start emitting `Action::AdvanceTick` into `sender` every
    /// `interval`, beginning after the first full interval.
    pub fn start(interval: Duration, sender: Sender<Action>) -> Self {
        let stop_flag = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&stop_flag);
        let worker = thread::spawn(move || loop {
            thread::sleep(interval);
            if flag.load(Ordering::SeqCst) {
                break;
            }
            if sender.send(Action::AdvanceTick).is_err() {
                // Receiver gone; nothing left to drive.
                break;
            }
        });
        log::debug!("tick driver started, interval={interval:?}");
        Self {
            stop_flag,
            worker: Some(worker),
        }
    }

    /// Stop the driver. Blocks until the worker has exited; after
    /// this returns no further AdvanceTick is ever sent.
    pub fn stop(&mut self) {
        self.stop_flag.store(true, Ordering::SeqCst);
        if let Some(worker) = self.worker.take() {
            let _ = worker.join();
            log::debug!("tick driver stopped");
        }
    }
}

impl Drop for TickDriver {
    fn drop(&mut self) {
        self.stop();
    }
}
