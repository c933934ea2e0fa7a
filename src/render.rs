//! One render cycle: header, command execution, highlighted output.

use std::ffi::CStr;
use std::sync::atomic::AtomicBool;
use std::time::Duration;

use anyhow::Result;
use tracing::debug;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::exec;
use crate::highlight::highlight;
use crate::rules::RuleSet;
use crate::screen::Surface;
use crate::style::Style;

const TAB_STOP: usize = 8;

/// Per-run settings that shape every cycle.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Delay between scheduled runs, shown in the header.
    pub interval: Duration,
    /// Suppress the header line; content then starts at row 0.
    pub no_title: bool,
}

/// Run `command` once and draw its highlighted output onto `surface`.
///
/// Command failures are rendered as a single error line and are not
/// propagated; only surface failures bubble up.
pub fn render_cycle(
    surface: &mut dyn Surface,
    command: &str,
    rules: &RuleSet,
    options: &RenderOptions,
    cancel: &AtomicBool,
) -> Result<()> {
    surface.clear();
    let group = rules.select(command);
    let (width, height) = surface.size();
    debug!(target: "render", command, width, height, styled = group.is_some(), "cycle");

    let mut top = 0;
    if !options.no_title {
        draw_header(surface, command, options.interval, width, height);
        top = 2;
    }

    let output = match exec::run(command, cancel) {
        Ok(output) => output,
        Err(err) => {
            write_text(surface, 0, top, &format!("ERROR: failed to run {command:?}: {err}"));
            return surface.present();
        }
    };

    let mut row = top;
    'lines: for line in output.split('\n') {
        let mut col = 0;
        for cell in highlight(line, group) {
            if cell.ch == '\t' {
                // Tabs advance the cursor without writing a glyph.
                col = (col / TAB_STOP + 1) * TAB_STOP;
            } else {
                surface.set_cell(col, row, cell.ch, cell.style);
                col += cell.ch.width().unwrap_or(0);
            }
            if col >= width {
                col = 0;
                row += 1;
                if row >= height {
                    break 'lines;
                }
            }
        }
        row += 1;
        if row >= height {
            break;
        }
    }

    surface.present()
}

/// Draw `Every {interval}: {command}` on the left and
/// `{hostname}: {timestamp}` on the right of row 0, and park the cursor in
/// the bottom-right corner.
fn draw_header(
    surface: &mut dyn Surface,
    command: &str,
    interval: Duration,
    width: usize,
    height: usize,
) {
    let timestamp = chrono::Local::now().format("%a %b %e %H:%M:%S %Y");
    let right = format!("{}: {}", hostname(), timestamp);
    write_text(surface, width.saturating_sub(right.width()), 0, &right);

    let prefix = format!("Every {}: ", format_interval(interval));
    // -1 for the gap before the right side, -3 for the ellipsis.
    let budget =
        width as i64 - right.chars().count() as i64 - prefix.chars().count() as i64 - 1 - 3;
    let shown: String = if budget <= 0 {
        String::new()
    } else if command.chars().count() > budget as usize {
        let mut cut: String = command.chars().take(budget as usize).collect();
        cut.push_str("...");
        cut
    } else {
        command.to_string()
    };
    write_text(surface, 0, 0, &format!("{prefix}{shown}"));

    surface.set_cursor(width.saturating_sub(1), height.saturating_sub(1));
}

/// Write default-styled text, advancing by display width.
fn write_text(surface: &mut dyn Surface, col: usize, row: usize, text: &str) {
    let mut col = col;
    for ch in text.chars() {
        surface.set_cell(col, row, ch, Style::default());
        col += ch.width().unwrap_or(0);
    }
}

fn format_interval(interval: Duration) -> String {
    let total = interval.as_secs();
    let (hours, minutes, seconds) = (total / 3600, (total % 3600) / 60, total % 60);

    let mut out = String::new();
    if hours > 0 {
        out.push_str(&format!("{hours}h"));
    }
    if minutes > 0 {
        out.push_str(&format!("{minutes}m"));
    }
    if seconds > 0 || out.is_empty() {
        out.push_str(&format!("{seconds}s"));
    }
    out
}

fn hostname() -> String {
    let mut buf = [0 as libc::c_char; 256];
    let ok = unsafe { libc::gethostname(buf.as_mut_ptr(), buf.len() - 1) } == 0;
    if ok {
        buf[buf.len() - 1] = 0;
        let name = unsafe { CStr::from_ptr(buf.as_ptr()) };
        if let Ok(name) = name.to_str() {
            if !name.is_empty() {
                return name.to_string();
            }
        }
    }
    std::env::var("HOSTNAME").unwrap_or_default()
}
