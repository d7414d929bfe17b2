//! The behavior attached to one state identifier.

/// Lifecycle hooks of one behavior state.
///
/// Every hook has a no-op default, so a state only writes the hooks it
/// cares about. Which hooks the machine actually calls is decided by the
/// state's [`HookSet`](crate::core::HookSet), not by which methods are
/// overridden.
///
/// `T` is the parent context shared by every state of one machine; it is
/// owned by the machine and lent to each hook for the duration of the call.
///
/// # Example
///
/// ```rust
/// use statehook::core::Behavior;
/// use statehook::declare_hooks;
///
/// struct Actor {
///     speed: f32,
/// }
///
/// struct Walk;
///
/// impl Behavior<Actor> for Walk {
///     fn enter(&mut self, actor: &mut Actor) {
///         actor.speed = 1.5;
///     }
///
///     fn exit(&mut self, actor: &mut Actor) {
///         actor.speed = 0.0;
///     }
/// }
///
/// declare_hooks!(Walk => [Enter, Exit]);
/// ```
pub trait Behavior<T> {
    /// Called once for every registered state, from `initialize`.
    fn initialize(&mut self, _parent: &mut T) {}

    fn enter(&mut self, _parent: &mut T) {}

    fn update(&mut self, _parent: &mut T) {}

    fn fixed_update(&mut self, _parent: &mut T) {}

    fn late_update(&mut self, _parent: &mut T) {}

    fn exit(&mut self, _parent: &mut T) {}
}
