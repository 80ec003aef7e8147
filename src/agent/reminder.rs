//! Todo reminders
//!
//! Two fixed texts in a `<reminder>` envelope. The initial one opens every
//! session; the nag is appended after a round once the model has gone too
//! many rounds without a successful todo update.

/// Injected once, before the first model call of a session
pub const INITIAL_REMINDER: &str = "<reminder>You have a TodoWrite tool for tracking your work. \
Use it to plan multi-step tasks: break the work into items, keep exactly one item in_progress, \
and mark items completed as you finish them.</reminder>";

/// Injected after a run of rounds with no todo update
pub const NAG_REMINDER: &str = "<reminder>You have not updated your todo list for several rounds. \
Review it now with TodoWrite: mark finished items completed and set the item you are working \
on to in_progress.</reminder>";

/// Rounds without a todo update tolerated before nagging
pub const DEFAULT_NAG_THRESHOLD: usize = 3;

/// Decides when the nag is due
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReminderPolicy {
    pub nag_threshold: usize,
}

impl ReminderPolicy {
    pub fn new(nag_threshold: usize) -> Self {
        Self { nag_threshold }
    }

    /// Nag text to append after this round, if any
    ///
    /// Fires once the counter is strictly above the threshold. The caller
    /// resets the counter after appending.
    pub fn check(&self, rounds_without_todo_update: usize) -> Option<&'static str> {
        (rounds_without_todo_update > self.nag_threshold).then_some(NAG_REMINDER)
    }
}

impl Default for ReminderPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_NAG_THRESHOLD)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reminder_envelope() {
        for text in [INITIAL_REMINDER, NAG_REMINDER] {
            assert!(text.starts_with("<reminder>"));
            assert!(text.ends_with("</reminder>"));
        }
        assert!(NAG_REMINDER.to_lowercase().contains("todo"));
        assert!(INITIAL_REMINDER.contains("TodoWrite"));
    }

    #[test]
    fn test_check_threshold() {
        let policy = ReminderPolicy::default();
        for counter in 0..=3 {
            assert_eq!(policy.check(counter), None);
        }
        assert_eq!(policy.check(4), Some(NAG_REMINDER));

        let eager = ReminderPolicy::new(0);
        assert_eq!(eager.check(0), None);
        assert_eq!(eager.check(1), Some(NAG_REMINDER));
    }
}
