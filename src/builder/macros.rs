//! Macros for ergonomic state and input definitions.

/// Generate a state enum and its `State` implementation.
///
/// The enum derives `Clone`, `Copy`, `PartialEq`, `Eq`, `Hash`, `Debug`
/// and serde's `Serialize`/`Deserialize`, so the calling crate needs
/// `serde` with the `derive` feature. `name()` returns the variant name.
/// `ALL` lists every variant and `FINAL` the ones given in `final: [...]`.
///
/// # Example
///
/// ```
/// use switchyard::state_enum;
/// use switchyard::core::State;
///
/// state_enum! {
///     pub enum WorkflowState {
///         Start,
///         Processing,
///         Done,
///         Failed,
///     }
///     final: [Done, Failed]
/// }
///
/// assert_eq!(WorkflowState::Processing.name(), "Processing");
/// assert_eq!(WorkflowState::ALL.len(), 4);
/// assert_eq!(WorkflowState::FINAL, &[WorkflowState::Done, WorkflowState::Failed]);
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

        $(final: [$($final:ident),* $(,)?])?
    ) => {
        $(#[$meta])*
        #[derive(
            Clone, Copy, PartialEq, Eq, Hash, Debug, serde::Serialize, serde::Deserialize,
        )]
        $vis enum $name {
            $(
                $(#[$variant_meta])*
                $variant
            ),*
        }

        impl $name {
            /// Every variant, in declaration order.
            pub const ALL: &'static [Self] = &[$(Self::$variant),*];

            /// Variants declared final.
            pub const FINAL: &'static [Self] = &[$($(Self::$final),*)?];
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

/// Generate an input enum and its `Input` implementation.
///
/// Same derives as [`state_enum!`]. `ALL` lists every variant.
///
/// # Example
///
/// ```
/// use switchyard::input_enum;
/// use switchyard::core::Input;
///
/// input_enum! {
///     pub enum DoorInput {
///         Open,
///         Close,
///     }
/// }
///
/// assert_eq!(DoorInput::Close.name(), "Close");
/// ```
#[macro_export]
macro_rules! input_enum {
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
        #[derive(
            Clone, Copy, PartialEq, Eq, Hash, Debug, serde::Serialize, serde::Deserialize,
        )]
        $vis enum $name {
            $(
                $(#[$variant_meta])*
                $variant
            ),*
        }

        impl $name {
            /// Every variant, in declaration order.
            pub const ALL: &'static [Self] = &[$(Self::$variant),*];
        }

        impl $crate::core::Input for $name {
            fn name(&self) -> &str {
                match self {
                    $(Self::$variant => stringify!($variant)),*
                }
            }
        }
    };
}
