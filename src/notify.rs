//! Transient player messages
//!
//! Fire-and-forget toasts; nothing in the game logic consumes a result
//! from them, so the trait takes `&self` and returns nothing. The browser
//! implementation lives in the front end; the sim only sees the trait.

/// Visual weight of a message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Normal,
    Destructive,
}

/// Show a short-lived message to the player
pub trait Notifier {
    fn show(&self, title: &str, body: &str, severity: Severity);
}

impl<T: Notifier + ?Sized> Notifier for &T {
    fn show(&self, title: &str, body: &str, severity: Severity) {
        (**self).show(title, body, severity);
    }
}

/// Drops messages, logging them at debug level
#[derive(Debug, Default)]
pub struct NullNotifier;

impl Notifier for NullNotifier {
    fn show(&self, title: &str, body: &str, severity: Severity) {
        log::debug!("toast [{severity:?}] {title}: {body}");
    }
}
