// ── Confirmation gate ──
//
// Two-step guard in front of a destructive action. Owns only whether
// its prompt is open; the action itself is fired by the caller.

/// Keyboard modifiers held while clicking.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub shift: bool,
}

impl Modifiers {
    pub const NONE: Self = Self { shift: false };
    pub const SHIFT: Self = Self { shift: true };
}

/// Prompt contents shown before a gated action fires.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Confirmation {
    pub title: String,
    pub message: String,
    /// Label of the positive button.
    pub confirm_label: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateOutcome {
    /// Run the action now.
    Fire,
    /// The prompt is open; wait for confirm or cancel.
    Prompt,
    /// Nothing to do.
    Ignored,
}

#[derive(Debug, Default)]
pub struct ConfirmGate {
    open: bool,
}

impl ConfirmGate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// A plain click opens the prompt; a shift click fires immediately.
    pub fn click(&mut self, modifiers: Modifiers) -> GateOutcome {
        if modifiers.shift {
            GateOutcome::Fire
        } else {
            self.open = true;
            GateOutcome::Prompt
        }
    }

    /// Positive answer: closes the prompt and fires once.
    pub fn confirm(&mut self) -> GateOutcome {
        if self.open {
            self.open = false;
            GateOutcome::Fire
        } else {
            GateOutcome::Ignored
        }
    }

    pub fn cancel(&mut self) {
        self.open = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_click_prompts() {
        let mut gate = ConfirmGate::new();
        assert_eq!(gate.click(Modifiers::NONE), GateOutcome::Prompt);
        assert!(gate.is_open());
    }

    #[test]
    fn shift_click_fires_without_prompt() {
        let mut gate = ConfirmGate::new();
        assert_eq!(gate.click(Modifiers::SHIFT), GateOutcome::Fire);
        assert!(!gate.is_open());
    }

    #[test]
    fn confirm_fires_exactly_once_and_closes() {
        let mut gate = ConfirmGate::new();
        gate.click(Modifiers::NONE);
        assert_eq!(gate.confirm(), GateOutcome::Fire);
        assert!(!gate.is_open());
        assert_eq!(gate.confirm(), GateOutcome::Ignored);
    }

    #[test]
    fn cancel_fires_nothing() {
        let mut gate = ConfirmGate::new();
        gate.click(Modifiers::NONE);
        gate.cancel();
        assert!(!gate.is_open());
        assert_eq!(gate.confirm(), GateOutcome::Ignored);
    }
}
