use std::sync::Arc;
use std::thread;

use futures::channel::oneshot;
use log::{debug, warn};

use super::analyzer::{analyze, UniverseConnection};
use crate::data::Block;
use crate::error::{DesignerError, Result};

/// Universe analysis running off the interactive thread.
///
/// The worker only reads its own snapshot of the system blocks; results come
/// back through a one-shot channel and are applied by whoever polls.
#[derive(Debug)]
pub struct AnalysisTask {
    receiver: oneshot::Receiver<Vec<UniverseConnection>>,
}

impl AnalysisTask {
    pub fn spawn(systems: Vec<Arc<Block>>) -> Self {
        let (sender, receiver) = oneshot::channel();

        let spawned = thread::Builder::new()
            .name("universe-analysis".into())
            .spawn(move || {
                let _ = sender.send(analyze(&systems));
            });

        match spawned {
            Ok(_) => debug!("Universe analysis started"),
            // the sender went down with the closure, so polling reports cancellation
            Err(err) => warn!("Could not start universe analysis thread: {}", err),
        }

        Self { receiver }
    }

    /// Run the analysis on the calling thread; used when no worker is wanted.
    pub fn immediate(systems: &[Arc<Block>]) -> Self {
        let (sender, receiver) = oneshot::channel();
        let _ = sender.send(analyze(systems));
        Self { receiver }
    }

    /// Non-blocking check. `None` while still running.
    pub fn try_take(&mut self) -> Option<Result<Vec<UniverseConnection>>> {
        match self.receiver.try_recv() {
            Ok(Some(connections)) => Some(Ok(connections)),
            Ok(None) => None,
            Err(_) => Some(Err(DesignerError::AnalysisCancelled)),
        }
    }

    /// Block until the worker is done.
    pub fn wait(self) -> Result<Vec<UniverseConnection>> {
        futures::executor::block_on(self.receiver).map_err(|_| DesignerError::AnalysisCancelled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{ContentType, JumpKind};

    fn systems() -> Vec<Arc<Block>> {
        vec![
            Arc::new(Block::new(1, 0, "a", ContentType::System).with_jump(1, JumpKind::Gate)),
            Arc::new(Block::new(2, 1, "b", ContentType::System).with_jump(0, JumpKind::Gate)),
        ]
    }

    #[test]
    fn test_background_analysis() {
        let task = AnalysisTask::spawn(systems());
        let connections = task.wait().unwrap();
        assert_eq!(connections.len(), 1);
    }

    #[test]
    fn test_immediate_is_ready() {
        let mut task = AnalysisTask::immediate(&systems());
        let connections = task.try_take().unwrap().unwrap();
        assert_eq!(connections[0].key(), (0, 1));
    }
}
