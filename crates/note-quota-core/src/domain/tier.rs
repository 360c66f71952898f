use chrono::{DateTime, Duration, Utc};

/// Note quota for a subscription tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NoteTierLimits {
    /// Maximum edits per rolling window.
    pub max_edits: u32,
    /// Length of the rolling window.
    pub count_edits_over: Duration,
}

impl NoteTierLimits {
    pub fn new(max_edits: u32, count_edits_over: Duration) -> Self {
        Self {
            max_edits,
            count_edits_over,
        }
    }

    /// Oldest creation time still counted against the quota at `now`.
    pub fn window_start(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        now.checked_sub_signed(self.count_edits_over)
            .unwrap_or(DateTime::<Utc>::MIN_UTC)
    }

    /// Edits left after `edit_count` edits in the window. Saturates at zero
    /// when the limit was overshot.
    pub fn remaining_after(&self, edit_count: u64) -> u32 {
        // Bounded by max_edits, so the narrowing cannot truncate.
        u64::from(self.max_edits).saturating_sub(edit_count) as u32
    }
}

/// Limits attached to a subscription tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TierInformation {
    pub notes: NoteTierLimits,
}
