//! Per-state event handlers.
//!
//! Each handler is an exhaustive match over the variant set. A handler
//! reads the context, decides, and returns a [`Reaction`]; it never
//! mutates anything itself.
//!
//! | State | Event | Outcome |
//! |---|---|---|
//! | Day | tick outside window | log transition, go to Night |
//! | Night | tick inside window | log transition, go to Day |
//! | either | tick, no window change | log tick |
//! | Day | use safe | log |
//! | Night | use safe | log, security call |
//! | either | alarm | log, security call |
//! | Day | phone | log |
//! | Night | phone | log, security call instead of the call |

use crate::core::{Hour, State, StateTag};
use crate::effects::machine::Context;
use crate::effects::reaction::Reaction;
use crate::registry::SafeState;

pub const SAFE_USED_AT_NIGHT: &str = "emergency: safe used at night";
pub const ALARM_TRIGGERED: &str = "emergency: alarm triggered";
pub const CALL_REFUSED_AT_NIGHT: &str = "non-emergency call refused at night";

impl SafeState {
    /// The clock moved to `hour`. `hour` is already validated and the
    /// context already reflects it.
    pub fn on_clock(&self, ctx: &Context, hour: Hour) -> Reaction {
        let open = ctx.open_hours().contains(hour);
        match (self.tag(), open) {
            (StateTag::Day, false) => {
                Reaction::log(format!("Day→Night at {hour}")).transition_to(StateTag::Night)
            }
            (StateTag::Night, true) => {
                Reaction::log(format!("Night→Day at {hour}")).transition_to(StateTag::Day)
            }
            (StateTag::Day, true) | (StateTag::Night, false) => {
                Reaction::log(format!("clock {hour} ({})", self.tag()))
            }
        }
    }

    /// Unsupervised states escalate safe use to the security center.
    pub fn on_use(&self, ctx: &Context) -> Reaction {
        let tag = self.tag();
        let reaction = Reaction::log(format!("safe used ({}) at {}", tag.label(), ctx.hour()));
        if tag.is_supervised() {
            reaction
        } else {
            reaction.and_call(SAFE_USED_AT_NIGHT)
        }
    }

    pub fn on_alarm(&self, ctx: &Context) -> Reaction {
        let log = match self.tag() {
            StateTag::Day => format!("alarm bell (day) at {}", ctx.hour()),
            StateTag::Night => format!("alarm bell (night) at {}", ctx.hour()),
        };
        Reaction::log(log).and_call(ALARM_TRIGGERED)
    }

    /// Outside supervision the call is refused and reported instead.
    pub fn on_phone(&self, ctx: &Context) -> Reaction {
        let tag = self.tag();
        if tag.is_supervised() {
            Reaction::log(format!("call placed ({}) at {}", tag.label(), ctx.hour()))
        } else {
            Reaction::log(format!("call refused ({}) at {}", tag.label(), ctx.hour()))
                .and_call(CALL_REFUSED_AT_NIGHT)
        }
    }
}
