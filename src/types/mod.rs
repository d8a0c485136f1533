pub mod account;
pub mod bot;
pub mod timestamp;

pub use account::*;
pub use bot::*;
