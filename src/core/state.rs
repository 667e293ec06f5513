//! State trait and the tooltip's lifecycle phases.
//!
//! All state machine states implement [`State`], which provides pure
//! methods for inspecting state properties without side effects.

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt::Debug;
use std::hash::Hash;

/// Trait for state machine states.
///
/// All methods are pure. States are small `Copy` values that describe the
/// current position in a state machine and can be used as table keys.
///
/// # Required Traits
///
/// - `Copy` + `Eq` + `Hash`: states index transition tables
/// - `Debug`: states must be debuggable for diagnostics
/// - `Serialize` + `Deserialize`: states appear in snapshots and history
pub trait State:
    Copy + Eq + Hash + Debug + Serialize + DeserializeOwned + Send + Sync + 'static
{
    /// Get the state's name for display/logging.
    fn name(&self) -> &str;

    /// The state a fresh machine starts in, and the one every recovery
    /// returns to.
    fn initial() -> Self;

    /// Check if this is the initial state.
    fn is_initial(&self) -> bool {
        *self == Self::initial()
    }

    /// Check if the machine shows something to the user in this state.
    ///
    /// Default implementation returns `false`.
    fn is_visible(&self) -> bool {
        false
    }
}

crate::state_enum! {
    /// Lifecycle phase of a tooltip.
    ///
    /// `Inactive` is both the initial state and the end of every display
    /// cycle. A box exists exactly while the phase is visible.
    pub enum Phase {
        /// Nothing shown, waiting for the pointer.
        Inactive,
        /// Pointer is over the surface; waiting for it to rest.
        Pause,
        /// Box exists and opacity is rising.
        FadeIn,
        /// Box fully shown; display timer running.
        Display,
        /// Box exists and opacity is falling.
        FadeOut,
    }
    initial: Inactive
    visible: [FadeIn, Display, FadeOut]
}

impl Default for Phase {
    fn default() -> Self {
        <Self as State>::initial()
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phase_names_match_variants() {
        assert_eq!(Phase::Inactive.name(), "Inactive");
        assert_eq!(Phase::Pause.name(), "Pause");
        assert_eq!(Phase::FadeIn.name(), "FadeIn");
        assert_eq!(Phase::Display.name(), "Display");
        assert_eq!(Phase::FadeOut.name(), "FadeOut");
    }

    #[test]
    fn inactive_is_initial() {
        assert_eq!(Phase::default(), Phase::Inactive);
        assert!(Phase::Inactive.is_initial());
        assert!(!Phase::Pause.is_initial());
    }

    #[test]
    fn only_fading_and_display_phases_are_visible() {
        assert!(!Phase::Inactive.is_visible());
        assert!(!Phase::Pause.is_visible());
        assert!(Phase::FadeIn.is_visible());
        assert!(Phase::Display.is_visible());
        assert!(Phase::FadeOut.is_visible());
    }

    #[test]
    fn unknown_names_do_not_resolve() {
        assert_eq!(Phase::from_name("FadeOut"), Some(Phase::FadeOut));
        assert_eq!(Phase::from_name("Hidden"), None);
        assert_eq!(Phase::from_name(""), None);
    }

    #[test]
    fn phase_serializes_correctly() {
        let json = serde_json::to_string(&Phase::FadeIn).unwrap();
        assert_eq!(json, "\"FadeIn\"");
        let deserialized: Phase = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized, Phase::FadeIn);
    }

    #[test]
    fn display_uses_name() {
        assert_eq!(Phase::Display.to_string(), "Display");
    }
}
