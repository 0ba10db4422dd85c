//! Call-flow state machine
//!
//! Pure logic behind the webhook handlers: menu routing (`routing`) and the
//! per-department collection script (`script`). Handlers stay thin; the
//! decisions about what comes next live here.

mod routing;
mod script;

pub use routing::{route_menu, RouteDecision};
pub use script::{
    after, intro, store_value, NextAction, Step, AFTER_HOURS_CLOSING, CLOSED_MESSAGE, GREETING,
    MENU_PROMPT, MENU_REPROMPT,
};
