pub mod controller;
pub mod page;
pub mod poller;
pub mod render;
pub mod state;

pub use controller::*;
pub use page::Page;
pub use poller::{start_polling, PollHandle};
pub use state::{DashboardData, SyncPhase};
