pub mod clock;
pub mod input_adapter;
pub mod timer;

pub use clock::Clock;
pub use input_adapter::{Action, WinitInput};
pub use timer::{Throttled, TimerId, TimerQueue};
