//! Interaction modes.

/// Which handler owns the keyboard. Overlays (groups, about) sit on top of
/// whatever mode is active and are tracked separately.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    Browsing,
    ValueFocused,
    Editing,
    PatternDeletePrompt,
    ConfirmSingleDelete(String),
    ConfirmPatternDelete(String),
}

impl Mode {
    /// Modes that show a prompt on the status line and return to the mode
    /// they were opened from.
    pub const fn is_prompt(&self) -> bool {
        matches!(
            self,
            Self::PatternDeletePrompt | Self::ConfirmSingleDelete(_) | Self::ConfirmPatternDelete(_)
        )
    }

    pub const fn value_focused(&self) -> bool {
        matches!(self, Self::ValueFocused | Self::Editing)
    }

    pub const fn label(&self) -> &'static str {
        match self {
            Self::Browsing => "BROWSE",
            Self::ValueFocused => "VALUE",
            Self::Editing => "EDIT",
            Self::PatternDeletePrompt => "PATTERN",
            Self::ConfirmSingleDelete(_) | Self::ConfirmPatternDelete(_) => "CONFIRM",
        }
    }
}
