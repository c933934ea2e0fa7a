//! Cancellable shell command execution.
//!
//! The command line is passed to `/bin/sh -c` unmodified; shell
//! interpretation happens entirely in the shell. Execution is synchronous
//! from the caller's perspective, but the child is killed as soon as the
//! cancellation flag fires.

use std::io::Read;
use std::process::{Command, Stdio};
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use tracing::debug;

const POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Run `command_line` to completion and return its combined output.
///
/// Spawn failure, non-zero exit and cancellation all come back as errors;
/// the next scheduled cycle is the retry policy.
pub fn run(command_line: &str, cancel: &AtomicBool) -> Result<String> {
    debug!(target: "exec", command = command_line, "running");

    let mut child = Command::new("/bin/sh")
        .arg("-c")
        .arg(command_line)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .with_context(|| format!("failed to spawn {command_line:?}"))?;

    // Drain both pipes off-thread so a chatty child never blocks on a full
    // pipe while we wait for it.
    let stdout = drain(child.stdout.take());
    let stderr = drain(child.stderr.take());

    let status = loop {
        if cancel.load(Ordering::SeqCst) {
            let _ = child.kill();
        }
        match child.try_wait().context("failed to wait for command")? {
            Some(status) => break status,
            None => thread::sleep(POLL_INTERVAL),
        }
    };

    let mut output = stdout.join().unwrap_or_default();
    output.extend(stderr.join().unwrap_or_default());

    if cancel.load(Ordering::SeqCst) {
        bail!("cancelled");
    }
    if !status.success() {
        bail!("{status}");
    }

    Ok(String::from_utf8_lossy(&output).into_owned())
}

fn drain<R: Read + Send + 'static>(pipe: Option<R>) -> thread::JoinHandle<Vec<u8>> {
    thread::spawn(move || {
        let mut collected = Vec::new();
        if let Some(mut pipe) = pipe {
            let _ = pipe.read_to_end(&mut collected);
        }
        collected
    })
}
