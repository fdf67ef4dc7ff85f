use crossterm::event::{self, Event as CEvent, KeyEvent, KeyEventKind};
use std::time::Duration;
use tokio::sync::mpsc;

pub enum AppEvent {
    Key(KeyEvent),
    Resize(u16, u16),
}

/// Polls crossterm on a dedicated thread and forwards key presses and
/// resizes to the event loop.
pub struct EventHandler {
    rx: mpsc::UnboundedReceiver<AppEvent>,
}

impl EventHandler {
    pub fn new(poll_rate: Duration) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        std::thread::spawn(move || loop {
            if !event::poll(poll_rate).unwrap_or(false) {
                if tx.is_closed() {
                    break;
                }
                continue;
            }
            let forwarded = match event::read() {
                Ok(CEvent::Key(key)) if key.kind != KeyEventKind::Release => {
                    Some(AppEvent::Key(key))
                }
                Ok(CEvent::Resize(w, h)) => Some(AppEvent::Resize(w, h)),
                _ => None,
            };
            if let Some(evt) = forwarded {
                if tx.send(evt).is_err() {
                    break;
                }
            }
        });
        Self { rx }
    }

    pub async fn next(&mut self) -> Option<AppEvent> {
        self.rx.recv().await
    }
}
