//! Toast notifications.
//!
//! A short status message that clears itself after a fixed delay without
//! blocking the operation that raised it. Each message carries a generation
//! number; the clear timer of an older message does nothing once a newer
//! message has been pushed, so the newest message always gets its full time
//! on screen.

use std::sync::{Arc, Mutex, MutexGuard};
use std::thread;
use std::time::{Duration, Instant};
use tracing::debug;

/// How long a toast stays visible
pub const TOAST_DURATION: Duration = Duration::from_secs(1);

/// Toast notification variant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastVariant {
    Success,
    Info,
    Warning,
    Error,
}

impl ToastVariant {
    /// Get the icon for this variant
    pub fn icon(&self) -> &'static str {
        match self {
            ToastVariant::Success => "\u{2714}", // ✔
            ToastVariant::Info => "\u{2139}",    // ℹ
            ToastVariant::Warning => "\u{26A0}", // ⚠
            ToastVariant::Error => "\u{2718}",   // ✘
        }
    }
}

/// Toast notification data
#[derive(Debug, Clone)]
pub struct Toast {
    /// The message to display
    pub message: String,
    /// The variant (success, info, warning, error)
    pub variant: ToastVariant,
    /// When the toast was created
    pub created_at: Instant,
}

impl Toast {
    /// Create a new toast notification
    pub fn new(message: impl Into<String>, variant: ToastVariant) -> Self {
        Self {
            message: message.into(),
            variant,
            created_at: Instant::now(),
        }
    }

    /// Message followed by the variant icon
    pub fn display_text(&self) -> String {
        format!("{} {}", self.message, self.variant.icon())
    }
}

#[derive(Debug, Default)]
struct Slot {
    current: Option<Toast>,
    generation: u64,
}

/// Holds the single visible toast and schedules its clearing.
///
/// Cloning yields another handle to the same toast slot, so a front end can
/// poll it from elsewhere.
#[derive(Debug, Clone)]
pub struct ToastManager {
    slot: Arc<Mutex<Slot>>,
    duration: Duration,
}

impl Default for ToastManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ToastManager {
    /// Create a new toast manager with the default one second duration
    pub fn new() -> Self {
        Self::with_duration(TOAST_DURATION)
    }

    /// Create a toast manager with a custom duration
    pub fn with_duration(duration: Duration) -> Self {
        Self {
            slot: Arc::new(Mutex::new(Slot::default())),
            duration,
        }
    }

    fn lock(&self) -> MutexGuard<'_, Slot> {
        self.slot.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Show a toast, replacing any existing one, and schedule it to clear
    pub fn push(&self, toast: Toast) {
        debug!("Toast: {}", toast.message);
        let generation = {
            let mut slot = self.lock();
            slot.generation = slot.generation.wrapping_add(1);
            slot.current = Some(toast);
            slot.generation
        };

        let handle = Arc::clone(&self.slot);
        let duration = self.duration;
        thread::spawn(move || {
            thread::sleep(duration);
            let mut slot = handle.lock().unwrap_or_else(|e| e.into_inner());
            if slot.generation == generation {
                slot.current = None;
            }
        });
    }

    /// Add a success toast
    pub fn success(&self, message: impl Into<String>) {
        self.push(Toast::new(message, ToastVariant::Success));
    }

    /// Add an info toast
    pub fn info(&self, message: impl Into<String>) {
        self.push(Toast::new(message, ToastVariant::Info));
    }

    /// Add a warning toast
    pub fn warning(&self, message: impl Into<String>) {
        self.push(Toast::new(message, ToastVariant::Warning));
    }

    /// Add an error toast
    pub fn error(&self, message: impl Into<String>) {
        self.push(Toast::new(message, ToastVariant::Error));
    }

    /// Get the current toast (if any)
    pub fn current(&self) -> Option<Toast> {
        self.lock().current.clone()
    }

    /// Visible status text; empty once the toast has cleared
    pub fn message(&self) -> String {
        self.lock()
            .current
            .as_ref()
            .map(|t| t.message.clone())
            .unwrap_or_default()
    }

    /// Check if there is an active toast
    pub fn has_toast(&self) -> bool {
        self.lock().current.is_some()
    }

    /// Clear the toast now; any pending timer becomes a no-op
    pub fn clear(&self) {
        let mut slot = self.lock();
        slot.generation = slot.generation.wrapping_add(1);
        slot.current = None;
    }
}
