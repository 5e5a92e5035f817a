//! Platform capability flags.
//!
//! Some hosts reset the caret asynchronously after a value change, or do not
//! expose pasted text reliably. Rather than detecting the platform, the host
//! decides these flags once at startup and hands them to the input.

use serde::{Deserialize, Serialize};

/// Behavioral flags for the host platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct PlatformQuirks {
    /// After a change, restore the caret only on the next tick.
    pub defer_cursor_restore: bool,
    /// Capture the pre-paste state on paste and apply the paste on the following change.
    pub buffer_paste: bool,
    /// Re-apply every caret placement once more on the next tick.
    pub reassert_cursor: bool,
}

impl Default for PlatformQuirks {
    fn default() -> Self {
        Self {
            defer_cursor_restore: false,
            buffer_paste: false,
            reassert_cursor: true,
        }
    }
}

impl PlatformQuirks {
    /// No workarounds at all; the caret is placed exactly once.
    pub fn none() -> Self {
        Self {
            defer_cursor_restore: false,
            buffer_paste: false,
            reassert_cursor: false,
        }
    }

    /// Enable or disable deferred caret restoration after changes.
    pub fn defer_cursor_restore(mut self, enabled: bool) -> Self {
        self.defer_cursor_restore = enabled;
        self
    }

    /// Enable or disable paste buffering.
    pub fn buffer_paste(mut self, enabled: bool) -> Self {
        self.buffer_paste = enabled;
        self
    }

    /// Enable or disable next-tick caret reassertion.
    pub fn reassert_cursor(mut self, enabled: bool) -> Self {
        self.reassert_cursor = enabled;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets() {
        assert!(PlatformQuirks::default().reassert_cursor);
        assert_eq!(
            PlatformQuirks::none(),
            PlatformQuirks::default().reassert_cursor(false)
        );
        let quirks = PlatformQuirks::none().buffer_paste(true).defer_cursor_restore(true);
        assert!(quirks.buffer_paste && quirks.defer_cursor_restore);
    }
}
