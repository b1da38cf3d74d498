// Page scroll locking while an overlay is open. The host provides the lock
// through context; each viewer session holds a guard that releases on drop.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::error::ViewerError;

pub trait ScrollLock {
    fn acquire(&self) -> Result<(), ViewerError>;
    fn release(&self);
}

/// Sets `overflow: hidden` on `<body>` while at least one holder is active.
#[derive(Default)]
pub struct BodyScrollLock {
    holders: Cell<u32>,
    previous_overflow: RefCell<String>,
}

fn body() -> Result<web_sys::HtmlElement, ViewerError> {
    let window = web_sys::window().ok_or(ViewerError::NoWindow)?;
    let document = window.document().ok_or(ViewerError::NoDocument)?;
    document.body().ok_or(ViewerError::NoBody)
}

impl ScrollLock for BodyScrollLock {
    fn acquire(&self) -> Result<(), ViewerError> {
        if self.holders.get() == 0 {
            let style = body()?.style();
            let previous = style.get_property_value("overflow")?;
            style.set_property("overflow", "hidden")?;
            *self.previous_overflow.borrow_mut() = previous;
            log::debug!("Page scroll locked");
        }
        self.holders.set(self.holders.get() + 1);
        Ok(())
    }

    fn release(&self) {
        let holders = self.holders.get();
        if holders == 0 {
            log::warn!("Scroll lock released more times than acquired");
            return;
        }
        self.holders.set(holders - 1);
        if holders > 1 {
            return;
        }
        let previous = std::mem::take(&mut *self.previous_overflow.borrow_mut());
        let restored = body().and_then(|body| {
            let style = body.style();
            if previous.is_empty() {
                style.remove_property("overflow").map(|_| ())?;
            } else {
                style.set_property("overflow", &previous)?;
            }
            Ok(())
        });
        match restored {
            Ok(()) => log::debug!("Page scroll unlocked"),
            Err(e) => log::warn!("Failed to restore page scroll: {}", e),
        }
    }
}

/// One acquisition of a [`ScrollLock`]; released exactly once, on drop.
pub struct ScrollLockGuard {
    lock: Rc<dyn ScrollLock>,
}

impl ScrollLockGuard {
    pub fn acquire(lock: Rc<dyn ScrollLock>) -> Result<Self, ViewerError> {
        lock.acquire()?;
        Ok(Self { lock })
    }
}

impl Drop for ScrollLockGuard {
    fn drop(&mut self) {
        self.lock.release();
    }
}

/// Context value carrying the host's scroll lock.
#[derive(Clone)]
pub struct ScrollLockHandle(pub Rc<dyn ScrollLock>);

impl ScrollLockHandle {
    pub fn body() -> Self {
        Self(Rc::new(BodyScrollLock::default()))
    }
}

impl PartialEq for ScrollLockHandle {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}


#[cfg(all(test, target_arch = "wasm32"))]
mod browser_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn overflow() -> String {
        body().unwrap().style().get_property_value("overflow").unwrap()
    }

    #[wasm_bindgen_test]
    fn nested_holders_restore_original_overflow() {
        body().unwrap().style().set_property("overflow", "auto").unwrap();
        let lock = BodyScrollLock::default();
        lock.acquire().unwrap();
        lock.acquire().unwrap();
        assert_eq!(overflow(), "hidden");
        lock.release();
        assert_eq!(overflow(), "hidden");
        lock.release();
        assert_eq!(overflow(), "auto");
    }
}
