//! Macros for declaring state-like enums.

/// Declare a fieldless enum and implement [`State`](crate::core::State) for it.
///
/// The generated enum derives the traits `State` requires.
///
/// # Example
///
/// ```
/// use authflow::state_enum;
/// use authflow::core::State;
///
/// state_enum! {
///     pub enum Light {
///         Red,
///         Green,
///     }
/// }
///
/// assert_eq!(Light::Green.name(), "Green");
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
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, serde::Serialize, serde::Deserialize)]
        $vis enum $name {
            $(
                $(#[$variant_meta])*
                $variant
            ),*
        }

        impl $crate::core::State for $name {
            fn name(&self) -> &str {
                match self {
                    $(Self::$variant => stringify!($variant)),*
                }
            }
        }
    };
}
