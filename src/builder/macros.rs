//! Macros for ergonomic state machine construction.

/// Generate a state identifier enum and its `StateId` implementation.
///
/// Variants are indexed in declaration order, starting at zero. The enum
/// derives `Clone`, `Copy`, `PartialEq`, `Eq`, `Hash`, `Debug` and serde's
/// `Serialize`/`Deserialize`.
///
/// # Example
///
/// ```
/// use statehook::core::StateId;
/// use statehook::state_id;
///
/// state_id! {
///     pub enum Locomotion {
///         Idle,
///         Walk,
///         Run,
///     }
/// }
///
/// assert_eq!(Locomotion::COUNT, 3);
/// assert_eq!(Locomotion::Run.index(), 2);
/// assert_eq!(Locomotion::Walk.name(), "Walk");
/// ```
#[macro_export]
macro_rules! state_id {
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

        impl $crate::core::StateId for $name {
            const COUNT: usize = <[&str]>::len(&[$(stringify!($variant)),*]);

            fn index(self) -> usize {
                match self {
                    $(Self::$variant => Self::$variant as usize),*
                }
            }

            fn from_index(index: usize) -> Option<Self> {
                const ALL: &[$name] = &[$($name::$variant),*];
                ALL.get(index).copied()
            }

            fn name(&self) -> &str {
                match *self {
                    $(Self::$variant => stringify!($variant)),*
                }
            }
        }
    };
}

/// Declare which lifecycle hooks a state type implements.
///
/// Generates a `DeclaredHooks` implementation; hook names are variants of
/// [`Hook`](crate::core::Hook). An empty list declares a state that never
/// has a hook dispatched.
///
/// # Example
///
/// ```
/// use statehook::core::{Behavior, DeclaredHooks, Hook};
/// use statehook::declare_hooks;
///
/// struct Patrol;
///
/// impl Behavior<()> for Patrol {
///     fn enter(&mut self, _: &mut ()) {}
///     fn update(&mut self, _: &mut ()) {}
/// }
///
/// declare_hooks!(Patrol => [Enter, Update]);
///
/// assert!(Patrol::HOOKS.contains(Hook::Update));
/// assert!(!Patrol::HOOKS.contains(Hook::Exit));
/// ```
#[macro_export]
macro_rules! declare_hooks {
    ($ty:ty => [$($hook:ident),* $(,)?]) => {
        impl $crate::core::DeclaredHooks for $ty {
            const HOOKS: $crate::core::HookSet =
                $crate::core::HookSet::of(&[$($crate::core::Hook::$hook),*]);
        }
    };
}
