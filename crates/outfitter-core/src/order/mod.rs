mod command;
mod state;

pub use command::Command;
pub use state::{AddOutcome, OrderProgress, OrderState};
