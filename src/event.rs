//! Input listening: resize and cancellation signals for the watch loop.
//!
//! A listener thread blocks on terminal events and forwards them through a
//! single-slot channel. Resizes arriving while one is still unconsumed are
//! coalesced, not queued; cancellation is a one-shot flag shared with the
//! command runner so an in-flight child can be killed, plus a best-effort
//! wakeup signal for the loop itself.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, SyncSender};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use crossterm::event::{self, Event as CrosstermEvent, KeyCode, KeyEvent, KeyModifiers};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Signal {
    /// Terminal was resized to (width, height).
    Resize(u16, u16),
    /// User asked to quit.
    Cancel,
}

/// Signal feed consumed by the watch loop.
pub struct SignalSource {
    rx: Receiver<Signal>,
    cancel: Arc<AtomicBool>,
    _listener: Option<thread::JoinHandle<()>>,
}

impl SignalSource {
    /// Spawn the terminal listener thread.
    pub fn spawn() -> Self {
        let cancel = Arc::new(AtomicBool::new(false));
        let (tx, rx) = mpsc::sync_channel(1);
        let listener = thread::spawn({
            let cancel = cancel.clone();
            move || listen(tx, cancel)
        });
        Self {
            rx,
            cancel,
            _listener: Some(listener),
        }
    }

    /// A source fed by hand instead of by a terminal. Lets the loop be
    /// driven without a tty.
    pub fn manual() -> (SyncSender<Signal>, Self) {
        let (tx, rx) = mpsc::sync_channel(1);
        let source = Self {
            rx,
            cancel: Arc::new(AtomicBool::new(false)),
            _listener: None,
        };
        (tx, source)
    }

    /// The shared cancellation flag; handed to the command runner and to
    /// signal handlers.
    pub fn cancel_flag(&self) -> Arc<AtomicBool> {
        self.cancel.clone()
    }

    pub fn cancelled(&self) -> bool {
        self.cancel.load(Ordering::SeqCst)
    }

    /// Wait for the next signal; `None` means the deadline passed.
    pub fn wait(&self, timeout: Duration) -> Option<Signal> {
        match self.rx.recv_timeout(timeout) {
            Ok(signal) => Some(signal),
            Err(RecvTimeoutError::Timeout) => None,
            Err(RecvTimeoutError::Disconnected) => Some(Signal::Cancel),
        }
    }
}

fn listen(tx: SyncSender<Signal>, cancel: Arc<AtomicBool>) {
    loop {
        match event::read() {
            Ok(CrosstermEvent::Key(key)) if is_quit(&key) => {
                cancel.store(true, Ordering::SeqCst);
                let _ = tx.try_send(Signal::Cancel);
                break;
            }
            Ok(CrosstermEvent::Resize(width, height)) => {
                // try_send on the full slot drops the older geometry; only
                // the latest resize matters.
                let _ = tx.try_send(Signal::Resize(width, height));
            }
            Ok(_) => {}
            Err(_) => {
                cancel.store(true, Ordering::SeqCst);
                let _ = tx.try_send(Signal::Cancel);
                break;
            }
        }
    }
}

fn is_quit(key: &KeyEvent) -> bool {
    key.code == KeyCode::Char('q')
        || key.code == KeyCode::Esc
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}
