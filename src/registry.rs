//! Shared, stateless state singletons.
//!
//! The machine never allocates a state per transition: it swaps one
//! `&'static SafeState` for another. The singletons carry no per-context
//! data, so any number of contexts on any number of threads may alias them.

use crate::core::{State, StateTag};
use std::fmt;

/// An operating state: the policy object that decides how each event is
/// handled while it is active.
///
/// Behaviour lives in [`crate::effects::handlers`]; this type only names
/// the variant.
#[derive(PartialEq, Eq, Debug)]
pub struct SafeState {
    tag: StateTag,
}

static DAY: SafeState = SafeState { tag: StateTag::Day };
static NIGHT: SafeState = SafeState {
    tag: StateTag::Night,
};

impl SafeState {
    pub fn tag(&self) -> StateTag {
        self.tag
    }

    pub fn name(&self) -> &str {
        self.tag.name()
    }
}

impl fmt::Display for SafeState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag.name())
    }
}

/// Look up the singleton for a tag.
///
/// Total and pure: the same tag always yields the same instance.
///
/// # Example
///
/// ```rust
/// use safewatch::core::StateTag;
/// use safewatch::registry;
///
/// let day = registry::get(StateTag::Day);
/// assert!(std::ptr::eq(day, registry::get(StateTag::Day)));
/// assert_eq!(day.tag(), StateTag::Day);
/// ```
pub fn get(tag: StateTag) -> &'static SafeState {
    match tag {
        StateTag::Day => &DAY,
        StateTag::Night => &NIGHT,
    }
}

/// Every singleton, in tag declaration order.
pub fn all() -> [&'static SafeState; 2] {
    StateTag::ALL.map(get)
}
