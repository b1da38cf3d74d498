// One open/close cycle of the zoom viewer.

use std::rc::Rc;

use yew::Callback;

use crate::config::GestureConfig;

use super::scroll_lock::{ScrollLock, ScrollLockGuard};
use super::viewer::ViewerState;

pub struct ViewerSession {
    state: ViewerState,
    lock: Option<ScrollLockGuard>,
    on_close: Option<Callback<()>>,
}

impl ViewerSession {
    /// Open a session. A scroll lock that cannot be taken is logged and
    /// skipped; the viewer stays usable and closable without it.
    pub fn open(config: GestureConfig, lock: Option<Rc<dyn ScrollLock>>, on_close: Callback<()>) -> Self {
        let lock = lock.and_then(|lock| match ScrollLockGuard::acquire(lock) {
            Ok(guard) => Some(guard),
            Err(e) => {
                log::warn!("Opening viewer without scroll lock: {}", e);
                None
            }
        });
        log::debug!("Viewer session opened");
        Self {
            state: ViewerState::new(config),
            lock,
            on_close: Some(on_close),
        }
    }

    pub fn state(&self) -> &ViewerState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut ViewerState {
        &mut self.state
    }

    /// End of the exit transition: release the lock and notify the host.
    /// Later calls do nothing.
    pub fn finish_close(&mut self) {
        let _ = self.state.request_close();
        self.lock = None;
        if let Some(on_close) = self.on_close.take() {
            log::debug!("Viewer session closed");
            on_close.emit(());
        }
    }
}
