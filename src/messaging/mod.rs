mod bus;
mod types;

pub use bus::ToneBus;
pub use types::ToneMessage;
