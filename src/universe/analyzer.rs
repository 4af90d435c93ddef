use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;

use log::{info, warn};

use crate::data::{Block, ContentType, JumpKind};
use crate::gfx::scene::ConnectionType;

/// One end of a derived connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConnectionPart {
    /// System block index.
    pub index: usize,
    pub jump_gate: bool,
    pub jump_hole: bool,
}

impl ConnectionPart {
    fn new(index: usize) -> Self {
        Self {
            index,
            jump_gate: false,
            jump_hole: false,
        }
    }

    fn record(&mut self, kind: JumpKind) {
        match kind {
            JumpKind::Gate => self.jump_gate = true,
            JumpKind::Hole => self.jump_hole = true,
        }
    }

    pub fn connection_type(&self) -> ConnectionType {
        ConnectionType::from_flags(self.jump_gate, self.jump_hole)
    }
}

/// Link between two systems; `from` is the system with the lower index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UniverseConnection {
    pub from: ConnectionPart,
    pub to: ConnectionPart,
}

impl UniverseConnection {
    fn new(a: usize, b: usize) -> Self {
        Self {
            from: ConnectionPart::new(a.min(b)),
            to: ConnectionPart::new(a.max(b)),
        }
    }

    /// Unordered pair of system indices.
    pub fn key(&self) -> (usize, usize) {
        (self.from.index, self.to.index)
    }

    pub fn part_mut(&mut self, index: usize) -> Option<&mut ConnectionPart> {
        if index == self.from.index {
            Some(&mut self.from)
        } else if index == self.to.index {
            Some(&mut self.to)
        } else {
            None
        }
    }
}

/// Derive one connection per linked pair of systems.
///
/// Each endpoint's flags come from the jumps that system itself declares,
/// so a gate declared on one side only leaves the other side at `None`.
/// Links to unknown systems and self links are skipped.
pub fn analyze(systems: &[Arc<Block>]) -> Vec<UniverseConnection> {
    let known: HashSet<usize> = systems
        .iter()
        .filter(|block| block.object_type == ContentType::System)
        .map(|block| block.index)
        .collect();

    let mut connections: BTreeMap<(usize, usize), UniverseConnection> = BTreeMap::new();

    for system in systems.iter().filter(|block| block.object_type == ContentType::System) {
        for jump in &system.jumps {
            if jump.target == system.index {
                warn!("System {} links to itself, skipping", system.name);
                continue;
            }
            if !known.contains(&jump.target) {
                warn!("System {} links to unknown system index {}", system.name, jump.target);
                continue;
            }

            let connection = UniverseConnection::new(system.index, jump.target);
            let entry = connections.entry(connection.key()).or_insert(connection);
            if let Some(part) = entry.part_mut(system.index) {
                part.record(jump.kind);
            }
        }
    }

    info!(
        "Universe analysis found {} connection(s) between {} system(s)",
        connections.len(),
        known.len()
    );
    connections.into_values().collect()
}
