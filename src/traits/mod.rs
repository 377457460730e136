pub mod camera;
pub mod fog;
pub mod observer;

pub use camera::*;
pub use fog::*;
pub use observer::*;
