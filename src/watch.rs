//! The watch loop: render on a fixed interval, re-render on resize, stop on
//! cancellation.
//!
//! The loop is strictly sequential. A slow command delays the next tick and
//! the next resize redraw equally; that trade-off is deliberate, so there is
//! never more than one command in flight.

use std::time::Instant;

use anyhow::Result;
use tracing::{debug, info};

use crate::event::{Signal, SignalSource};
use crate::render::{render_cycle, RenderOptions};
use crate::rules::RuleSet;
use crate::screen::Surface;

/// Drive render cycles until cancellation.
///
/// One cycle runs immediately, then the loop waits on whichever comes
/// first: the tick deadline, a resize signal, or cancellation. Render
/// errors are surface errors and abort the loop.
pub fn run(
    surface: &mut dyn Surface,
    signals: &SignalSource,
    command: &str,
    rules: &RuleSet,
    options: &RenderOptions,
) -> Result<()> {
    let cancel = signals.cancel_flag();
    render_cycle(surface, command, rules, options, &cancel)?;

    let mut next_tick = Instant::now() + options.interval;
    loop {
        if signals.cancelled() {
            break;
        }
        let timeout = next_tick.saturating_duration_since(Instant::now());
        match signals.wait(timeout) {
            Some(Signal::Cancel) => break,
            Some(Signal::Resize(width, height)) => {
                debug!(target: "watch", width, height, "resize");
                render_cycle(surface, command, rules, options, &cancel)?;
            }
            None => {
                render_cycle(surface, command, rules, options, &cancel)?;
                next_tick += options.interval;
                // A cycle slower than the interval skips the missed ticks
                // instead of replaying them back-to-back.
                let now = Instant::now();
                if next_tick <= now {
                    next_tick = now + options.interval;
                }
            }
        }
    }

    info!(target: "watch", "cancelled");
    Ok(())
}
