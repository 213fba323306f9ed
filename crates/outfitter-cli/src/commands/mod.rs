pub mod completion;
pub mod open;
pub mod order;
pub mod roster;
