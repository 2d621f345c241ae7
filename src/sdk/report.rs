use crate::sdk::routing::error::RouteError;
use std::sync::{Arc, Mutex, PoisonError};

/// The user-facing failure channel. Implementations decide how "blocking" the
/// notice is; the reporter only hands over the message.
pub trait Notifier: Send + Sync {
    fn notify(&self, message: &str);
}

/// Prints notices on stderr.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify(&self, message: &str) {
        eprintln!("[!] {}", message);
    }
}

/// Keeps every notice in memory.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    messages: Mutex<Vec<String>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> Vec<String> {
        self.messages
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, message: &str) {
        self.messages
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(message.to_string());
    }
}

/// Single sink for pipeline failures: one notice for the user, one log line
/// with the technical detail. No retry, no queueing.
#[derive(Clone)]
pub struct ErrorReporter {
    notifier: Arc<dyn Notifier>,
}

impl ErrorReporter {
    pub fn new(notifier: Arc<dyn Notifier>) -> Self {
        Self { notifier }
    }

    pub fn report(&self, error: &RouteError) {
        log::error!("[{:?}] {}", error.kind(), error);
        self.notifier.notify(&error.user_message());
    }
}
