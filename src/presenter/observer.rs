use std::path::Path;
use std::sync::Arc;

use crate::data::Block;

/// Notification sink for the UI and data layers.
///
/// Every method has a no-op default so implementors only pick what they need.
pub trait PresenterObserver {
    /// A node was clicked. `toggle` is set for additive multi-select.
    fn selection_changed(&mut self, _block: &Arc<Block>, _toggle: bool) {}

    /// A manipulation was committed; `new_block` replaces `old_block`.
    fn data_manipulated(&mut self, _new_block: &Arc<Block>, _old_block: &Arc<Block>) {}

    /// The user asked to open a system file.
    fn file_open_requested(&mut self, _path: &Path) {}

    /// A selected system was clicked again in the universe map. The UI
    /// usually offers to open `path`.
    fn system_context_requested(&mut self, _block: &Arc<Block>, _path: &Path) {}
}

/// Observer that ignores everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullObserver;

impl PresenterObserver for NullObserver {}
