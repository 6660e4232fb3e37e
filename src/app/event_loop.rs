use std::io::{Write, stdout};
use std::rc::Rc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event;
use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;
use ratatui::DefaultTerminal;

use crate::app::{App, Message, Model, update};
use crate::blocks::Block;

const RESIZE_SETTLE_MS: u64 = 100;

/// Resize waiting for the terminal to settle.
#[derive(Debug, Clone, Copy)]
struct PendingResize {
    size: (u16, u16),
    queued_at_ms: u64,
}

/// Coalesces a burst of resize events into one relayout.
pub(super) struct ResizeDebouncer {
    delay_ms: u64,
    pending: Option<PendingResize>,
}

impl ResizeDebouncer {
    pub(super) const fn new(delay_ms: u64) -> Self {
        Self {
            delay_ms,
            pending: None,
        }
    }

    /// Record a resize; a later one replaces it and restarts the delay.
    pub(super) const fn queue(&mut self, width: u16, height: u16, now_ms: u64) {
        self.pending = Some(PendingResize {
            size: (width, height),
            queued_at_ms: now_ms,
        });
    }

    /// The settled size once `delay_ms` has passed since the last resize.
    pub(super) fn take_ready(&mut self, now_ms: u64) -> Option<(u16, u16)> {
        let pending = self.pending?;
        if now_ms.saturating_sub(pending.queued_at_ms) < self.delay_ms {
            return None;
        }
        self.pending = None;
        Some(pending.size)
    }

    pub(super) const fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

impl App {
    /// Run the main event loop and return the final block sequence.
    ///
    /// # Errors
    ///
    /// Returns an error if terminal initialization or the event loop
    /// encounters an I/O failure.
    pub fn run(&self) -> Result<Rc<[Block]>> {
        let mut terminal = ratatui::try_init()
            .context("Failed to initialize terminal - roteiro requires an interactive terminal")?;
        let size = terminal.size()?;
        tracing::info!(width = size.width, height = size.height, "editor started");

        let mut model = Model::new(self.title.clone(), (size.width, size.height));
        model.mouse_enabled = self.mouse_enabled;

        let result = Self::event_loop(&mut terminal, &mut model);

        if model.mouse_enabled {
            let _ = set_mouse_motion_tracking(false);
            let _ = execute!(stdout(), DisableMouseCapture);
        }
        ratatui::restore();

        result.map(|()| model.store.snapshot())
    }

    fn event_loop(terminal: &mut DefaultTerminal, model: &mut Model) -> Result<()> {
        let start = Instant::now();
        let elapsed_ms = || u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);
        let mut resize_debouncer = ResizeDebouncer::new(RESIZE_SETTLE_MS);
        let mut needs_render = true;

        if model.mouse_enabled {
            execute!(stdout(), EnableMouseCapture)?;
            set_mouse_motion_tracking(true)?;
        }

        loop {
            if model.expire_toast(Instant::now()) {
                needs_render = true;
            }

            if let Some((width, height)) = resize_debouncer.take_ready(elapsed_ms()) {
                Self::dispatch(model, Message::Resize(width, height));
                needs_render = true;
            }

            let poll_ms = if needs_render {
                0
            } else if resize_debouncer.is_pending() {
                10
            } else {
                250
            };
            if event::poll(Duration::from_millis(poll_ms))? {
                // Drain everything queued so a burst of pointer motion
                // renders once.
                loop {
                    let event = event::read()?;
                    if let Some(msg) =
                        Self::handle_event(&event, model, elapsed_ms(), &mut resize_debouncer)
                    {
                        Self::dispatch(model, msg);
                        needs_render = true;
                    }
                    if !event::poll(Duration::from_millis(0))? {
                        break;
                    }
                }
            }

            if needs_render {
                terminal.draw(|frame| crate::ui::render(model, frame))?;
                needs_render = false;
            }

            if model.should_quit {
                break;
            }
        }
        Ok(())
    }

    /// Apply one message: pure update, then its side effects.
    pub(super) fn dispatch(model: &mut Model, msg: Message) {
        tracing::trace!(?msg, "message");
        let effect = msg.clone();
        *model = update(std::mem::take(model), msg);
        Self::handle_message_side_effects(model, &effect);
    }
}

fn set_mouse_motion_tracking(enable: bool) -> std::io::Result<()> {
    // Request any-event mouse motion reporting (1003) with SGR encoding (1006)
    // so drag motion arrives even between cells.
    let mut out = stdout();
    if enable {
        out.write_all(b"\x1b[?1003h\x1b[?1006h")?;
    } else {
        out.write_all(b"\x1b[?1003l\x1b[?1006l")?;
    }
    out.flush()
}
