use std::rc::Rc;

/// Pointer capture provided by the windowing layer.
pub trait PointerCapture {
    fn capture(&self);
    fn release(&self);
}

/// Capture that does nothing, for headless use.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoPointerCapture;

impl PointerCapture for NoPointerCapture {
    fn capture(&self) {}
    fn release(&self) {}
}

/// Holds the pointer captured until dropped.
pub struct CaptureGuard {
    capture: Rc<dyn PointerCapture>,
}

impl CaptureGuard {
    pub fn acquire(capture: Rc<dyn PointerCapture>) -> Self {
        capture.capture();
        Self { capture }
    }
}

impl Drop for CaptureGuard {
    fn drop(&mut self) {
        self.capture.release();
    }
}

impl std::fmt::Debug for CaptureGuard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CaptureGuard").finish_non_exhaustive()
    }
}
