pub mod scroll_lock;
pub mod session;
pub mod touch;
pub mod transform;
pub mod viewer;

pub use scroll_lock::ScrollLockHandle;
pub use session::ViewerSession;
pub use viewer::{GestureOutcome, ViewerState};
