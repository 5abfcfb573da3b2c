//! Timed notification banner. Only the latest message is ever shown.

use crate::palette::{self, Rgb};

pub const VISIBLE_MS: f64 = 3000.0;
pub const FADE_MS: f64 = 300.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Info,
}

impl NotificationKind {
    pub const fn color(self) -> Rgb {
        match self {
            Self::Success => palette::GREEN,
            Self::Info => palette::CYAN,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Visibility {
    Visible,
    /// Opacity from 1.0 down to 0.0.
    Fading(f64),
    Dismissed,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub message: String,
    pub kind: NotificationKind,
    pub shown_at_ms: f64,
}

impl Notification {
    pub fn visibility(&self, now_ms: f64) -> Visibility {
        let age = (now_ms - self.shown_at_ms).max(0.0);
        if age < VISIBLE_MS {
            Visibility::Visible
        } else if age < VISIBLE_MS + FADE_MS {
            Visibility::Fading(1.0 - (age - VISIBLE_MS) / FADE_MS)
        } else {
            Visibility::Dismissed
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Notifier {
    current: Option<Notification>,
}

impl Notifier {
    pub fn show(&mut self, message: impl Into<String>, kind: NotificationKind, now_ms: f64) {
        let message = message.into();
        tracing::info!(%message, "notification");
        self.current = Some(Notification {
            message,
            kind,
            shown_at_ms: now_ms,
        });
    }

    /// The banner still on screen at `now_ms`, dropping it once dismissed.
    pub fn current(&mut self, now_ms: f64) -> Option<(&Notification, Visibility)> {
        let visibility = self.current.as_ref()?.visibility(now_ms);
        if visibility == Visibility::Dismissed {
            self.current = None;
            return None;
        }
        self.current.as_ref().map(|notification| (notification, visibility))
    }
}
