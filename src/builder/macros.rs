//! Macros for declaring state enums.

/// Generate a `State` implementation for a fieldless enum.
///
/// Besides the trait impl, the macro adds an `ALL` constant listing every
/// variant in declaration order and a `from_name` lookup that inverts
/// `State::name`.
///
/// # Example
///
/// ```
/// use fadetip::state_enum;
/// use fadetip::core::State;
///
/// state_enum! {
///     pub enum Light {
///         Off,
///         Dimmed,
///         On,
///     }
///     initial: Off
///     visible: [Dimmed, On]
/// }
///
/// assert_eq!(Light::initial(), Light::Off);
/// assert_eq!(Light::from_name("Dimmed"), Some(Light::Dimmed));
/// assert!(Light::On.is_visible());
/// assert_eq!(Light::ALL.len(), 3);
/// ```
#[macro_export]
macro_rules! state_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident
            ),* $(,)?
        }

        initial: $initial:ident
        $(visible: [$($visible:ident),* $(,)?])?
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, serde::Serialize, serde::Deserialize)]
        $vis enum $name {
            $(
                $(#[$variant_meta])*
                $variant
            ),*
        }

        impl $name {
            /// Every variant, in declaration order.
            pub const ALL: &'static [Self] = &[$(Self::$variant),*];

            /// Look a variant up by its name.
            pub fn from_name(name: &str) -> Option<Self> {
                $(
                    if name == stringify!($variant) {
                        return Some(Self::$variant);
                    }
                )*
                None
            }
        }

        impl $crate::core::State for $name {
            fn name(&self) -> &str {
                match self {
                    $(Self::$variant => stringify!($variant)),*
                }
            }

            fn initial() -> Self {
                Self::$initial
            }

            #[allow(unreachable_patterns)]
            fn is_visible(&self) -> bool {
                match self {
                    $($(Self::$visible => true,)*)?
                    _ => false,
                }
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use crate::core::State;

    state_enum! {
        enum TestState {
            Idle,
            Warming,
            Shown,
        }
        initial: Idle
        visible: [Shown]
    }

    #[test]
    fn state_enum_macro_generates_trait() {
        assert_eq!(TestState::Idle.name(), "Idle");
        assert_eq!(TestState::initial(), TestState::Idle);
        assert!(TestState::Idle.is_initial());
        assert!(!TestState::Warming.is_initial());
        assert!(TestState::Shown.is_visible());
        assert!(!TestState::Warming.is_visible());
    }

    #[test]
    fn from_name_inverts_name() {
        for state in TestState::ALL {
            assert_eq!(TestState::from_name(state.name()), Some(*state));
        }
        assert_eq!(TestState::from_name("Hidden"), None);
        assert_eq!(TestState::from_name("idle"), None);
    }

    #[test]
    fn state_enum_works_without_visible_list() {
        state_enum! {
            pub enum MinimalState {
                One,
                Two,
            }
            initial: Two
        }

        assert!(!MinimalState::One.is_visible());
        assert!(MinimalState::Two.is_initial());
    }
}
