//! Writer thread that owns stdout so frame and overlay paints never interleave.

use crossbeam_channel::{Receiver, Sender, TrySendError};
use crossterm::terminal::size as terminal_size;
use dubterm::log_debug;
use std::io::{self, Write};
use std::thread;

/// Mode 2026 brackets for synchronized output: everything written between
/// the pair is displayed in one shot, and terminals without the feature
/// ignore both sequences.
const SYNC_BEGIN: &[u8] = b"\x1b[?2026h";
const SYNC_END: &[u8] = b"\x1b[?2026l";
const CURSOR_HIDE: &[u8] = b"\x1b[?25l";

#[derive(Debug)]
pub(crate) enum WriterMessage {
    /// Full frame, one string per terminal row, top-anchored.
    Screen { lines: Vec<String> },
    ShowOverlay {
        content: String,
        height: usize,
        width: usize,
    },
    ClearOverlay,
    Resize { rows: u16, cols: u16 },
    Shutdown,
}

#[derive(Debug, Clone)]
struct Overlay {
    content: String,
    height: usize,
    width: usize,
}

/// Best-effort send that drops the update when the writer backlog is full.
pub(crate) fn try_send_message(writer_tx: &Sender<WriterMessage>, message: WriterMessage) -> bool {
    match writer_tx.try_send(message) {
        Ok(()) => true,
        Err(TrySendError::Full(_)) => {
            log_debug("writer channel full, dropping update");
            false
        }
        Err(TrySendError::Disconnected(_)) => false,
    }
}

pub(crate) fn spawn_writer_thread(rx: Receiver<WriterMessage>) -> thread::JoinHandle<()> {
    thread::spawn(move || {
        let mut painter = Painter::new();
        while let Ok(message) = rx.recv() {
            if !painter.apply(message) {
                break;
            }
        }
    })
}

struct Painter {
    stdout: io::Stdout,
    rows: u16,
    cols: u16,
    /// Last painted frame, used to line-diff steady-state repaints.
    screen_lines: Vec<String>,
    overlay: Option<Overlay>,
    force_full_redraw: bool,
}

impl Painter {
    fn new() -> Self {
        Self {
            stdout: io::stdout(),
            rows: 0,
            cols: 0,
            screen_lines: Vec::new(),
            overlay: None,
            force_full_redraw: false,
        }
    }

    fn apply(&mut self, message: WriterMessage) -> bool {
        match message {
            WriterMessage::Screen { lines } => {
                self.fill_missing_geometry();
                let previous = if self.force_full_redraw {
                    None
                } else {
                    Some(self.screen_lines.as_slice())
                };
                let changed = match paint_frame(&mut self.stdout, &lines, self.rows, previous) {
                    Ok(changed) => changed,
                    Err(err) => {
                        log_debug(&format!("stdout write_all failed: {err}"));
                        return false;
                    }
                };
                self.screen_lines = lines;
                self.force_full_redraw = false;
                // Screen rows under the panel were just rewritten; put it back on top.
                if changed {
                    if let Some(panel) = self.overlay.as_ref() {
                        if let Err(err) =
                            paint_overlay(&mut self.stdout, panel, self.rows, self.cols)
                        {
                            log_debug(&format!("overlay repaint failed: {err}"));
                            return false;
                        }
                    }
                }
                if let Err(err) = self.stdout.flush() {
                    log_debug(&format!("stdout flush failed: {err}"));
                }
            }
            WriterMessage::ShowOverlay {
                content,
                height,
                width,
            } => {
                self.fill_missing_geometry();
                let replacing = self
                    .overlay
                    .as_ref()
                    .is_some_and(|current| current.height != height || current.width != width);
                if replacing {
                    // Scrub the old panel rows via a full underlying repaint.
                    let _ = paint_frame(&mut self.stdout, &self.screen_lines, self.rows, None);
                }
                let panel = Overlay {
                    content,
                    height,
                    width,
                };
                if let Err(err) = paint_overlay(&mut self.stdout, &panel, self.rows, self.cols)
                {
                    log_debug(&format!("overlay paint failed: {err}"));
                    return false;
                }
                self.overlay = Some(panel);
                if let Err(err) = self.stdout.flush() {
                    log_debug(&format!("stdout flush failed: {err}"));
                }
            }
            WriterMessage::ClearOverlay => {
                if self.overlay.take().is_some() {
                    if let Err(err) =
                        paint_frame(&mut self.stdout, &self.screen_lines, self.rows, None)
                    {
                        log_debug(&format!("overlay clear repaint failed: {err}"));
                        return false;
                    }
                    if let Err(err) = self.stdout.flush() {
                        log_debug(&format!("stdout flush failed: {err}"));
                    }
                }
            }
            WriterMessage::Resize { rows, cols } => {
                if self.rows == rows && self.cols == cols {
                    return true;
                }
                // Cached lines were built for the old width; blank the screen and
                // wait for the event loop's rebuilt frame instead of repainting them.
                if !self.screen_lines.is_empty() || self.overlay.is_some() {
                    let _ = self.stdout.write_all(b"\x1b[2J");
                    let _ = self.stdout.flush();
                }
                self.rows = rows;
                self.cols = cols;
                self.force_full_redraw = true;
            }
            WriterMessage::Shutdown => return false,
        }
        true
    }

    fn fill_missing_geometry(&mut self) {
        if self.rows == 0 || self.cols == 0 {
            if let Ok((cols, rows)) = terminal_size() {
                self.rows = rows;
                self.cols = cols;
            }
        }
    }
}

fn begin_frame(sequence: &mut Vec<u8>) {
    sequence.extend_from_slice(SYNC_BEGIN);
    sequence.extend_from_slice(CURSOR_HIDE);
}

fn end_frame(sequence: &mut Vec<u8>) {
    sequence.extend_from_slice(SYNC_END);
}

/// Paint a full frame, diffing against the previous one when provided.
/// Returns whether any row was rewritten.
fn paint_frame(
    stdout: &mut dyn Write,
    lines: &[String],
    rows: u16,
    previous: Option<&[String]>,
) -> io::Result<bool> {
    if rows == 0 {
        return Ok(false);
    }
    let mut sequence = Vec::new();
    let mut any_changed = false;
    for idx in 0..rows as usize {
        let line = lines.get(idx).map_or("", String::as_str);
        if previous
            .and_then(|prev| prev.get(idx))
            .is_some_and(|prev| prev == line)
        {
            continue;
        }
        if !any_changed {
            begin_frame(&mut sequence);
            any_changed = true;
        }
        let row = idx as u16 + 1;
        sequence.extend_from_slice(format!("\x1b[{row};1H").as_bytes());
        sequence.extend_from_slice(line.as_bytes());
        // Erase-to-end after the text, never before it, so the row is blank
        // for at most one write.
        sequence.extend_from_slice(b"\x1b[K");
    }
    if !any_changed {
        return Ok(false);
    }
    end_frame(&mut sequence);
    stdout.write_all(&sequence)?;
    Ok(true)
}

fn overlay_start_row(rows: u16, height: usize) -> u16 {
    let height = height.min(rows as usize) as u16;
    (rows - height) / 2 + 1
}

fn overlay_start_col(cols: u16, width: usize) -> u16 {
    let width = width.min(cols as usize) as u16;
    (cols - width) / 2 + 1
}

fn paint_overlay(
    stdout: &mut dyn Write,
    panel: &Overlay,
    rows: u16,
    cols: u16,
) -> io::Result<()> {
    if rows == 0 || cols == 0 {
        return Ok(());
    }
    let lines: Vec<&str> = panel.content.lines().collect();
    let height = panel.height.min(lines.len()).min(rows as usize);
    let start_row = overlay_start_row(rows, height);
    let start_col = overlay_start_col(cols, panel.width);
    let mut sequence = Vec::new();
    begin_frame(&mut sequence);
    for (idx, line) in lines.iter().take(height).enumerate() {
        let row = start_row + idx as u16;
        sequence.extend_from_slice(format!("\x1b[{row};{start_col}H").as_bytes());
        sequence.extend_from_slice(line.as_bytes());
    }
    end_frame(&mut sequence);
    stdout.write_all(&sequence)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(lines: &[&str]) -> Vec<String> {
        lines.iter().map(|line| (*line).to_string()).collect()
    }

    #[test]
    fn paint_frame_covers_every_row_when_there_is_no_previous_frame() {
        let mut buf = Vec::new();
        let changed = paint_frame(&mut buf, &strings(&["alpha", "beta"]), 3, None).unwrap();
        assert!(changed);
        let output = String::from_utf8_lossy(&buf);
        assert!(output.contains("\u{1b}[1;1Halpha"));
        assert!(output.contains("\u{1b}[2;1Hbeta"));
        // Row 3 has no content but still gets cleared.
        assert!(output.contains("\u{1b}[3;1H"));
        assert!(output.contains("\u{1b}[K"));
    }

    #[test]
    fn paint_frame_rewrites_only_rows_that_changed() {
        let mut buf = Vec::new();
        let previous = strings(&["top", "mid old", "bottom"]);
        let changed = paint_frame(
            &mut buf,
            &strings(&["top", "mid new", "bottom"]),
            3,
            Some(&previous),
        )
        .unwrap();
        assert!(changed);
        let output = String::from_utf8_lossy(&buf);
        assert!(output.contains("\u{1b}[2;1H"));
        assert!(!output.contains("\u{1b}[1;1H"));
        assert!(!output.contains("\u{1b}[3;1H"));
    }

    #[test]
    fn paint_frame_emits_nothing_for_an_identical_frame() {
        let mut buf = Vec::new();
        let frame = strings(&["same", "same again"]);
        let changed = paint_frame(&mut buf, &frame, 2, Some(&frame)).unwrap();
        assert!(!changed);
        assert!(buf.is_empty());
    }

    #[test]
    fn frames_are_wrapped_in_synchronized_output_markers() {
        let mut buf = Vec::new();
        paint_frame(&mut buf, &strings(&["x"]), 1, None).unwrap();
        let output = String::from_utf8_lossy(&buf);
        assert!(output.starts_with("\u{1b}[?2026h"));
        assert!(output.ends_with("\u{1b}[?2026l"));
    }

    #[test]
    fn overlay_anchors_center_the_panel() {
        assert_eq!(overlay_start_row(24, 10), 8);
        assert_eq!(overlay_start_col(80, 40), 21);
        // Panels taller than the terminal clamp to the top row.
        assert_eq!(overlay_start_row(5, 9), 1);
    }

    #[test]
    fn paint_overlay_positions_each_line_at_the_centered_anchor() {
        let mut buf = Vec::new();
        let panel = Overlay {
            content: "one\ntwo\nthree".to_string(),
            height: 3,
            width: 40,
        };
        paint_overlay(&mut buf, &panel, 24, 80).unwrap();
        let output = String::from_utf8_lossy(&buf);
        assert!(output.contains("\u{1b}[11;21H"));
        assert!(output.contains("\u{1b}[12;21H"));
        assert!(output.contains("\u{1b}[13;21H"));
        assert!(output.contains("two"));
    }

    #[test]
    fn resize_with_unchanged_geometry_changes_nothing() {
        let mut painter = Painter::new();
        painter.rows = 40;
        painter.cols = 120;
        assert!(painter.apply(WriterMessage::Resize {
            rows: 40,
            cols: 120
        }));
        assert!(!painter.force_full_redraw);
    }

    #[test]
    fn resize_adopts_the_new_geometry_and_forces_a_repaint() {
        let mut painter = Painter::new();
        painter.rows = 24;
        painter.cols = 80;
        assert!(painter.apply(WriterMessage::Resize {
            rows: 30,
            cols: 100
        }));
        assert_eq!(painter.rows, 30);
        assert_eq!(painter.cols, 100);
        assert!(painter.force_full_redraw);
    }
}
