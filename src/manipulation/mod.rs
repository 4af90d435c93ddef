//! # Manipulation State Machine
//!
//! A [`Manipulator`] is either idle or running one session on a single
//! axis. The presenter feeds it [`Command`]s and applies the returned
//! [`Outcome`]; the manipulator itself only ever touches the node it is
//! handed.
//!
//! Drag deltas arrive in world space and are moved into the node's rotated
//! frame before the axis constraint is applied, so a handle always moves the
//! node along its own local axis.

pub mod capture;

use std::rc::Rc;

use cgmath::{InnerSpace, Matrix, Vector3};
use log::debug;

pub use capture::{CaptureGuard, NoPointerCapture, PointerCapture};

use crate::data::{Placement, ViewerType};
pub use crate::gfx::gizmos::Axis;
use crate::gfx::scene::ContentNode;
use crate::gfx::transform;
use crate::settings::DesignerSettings;

/// Which transform the handles edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ManipulationMode {
    #[default]
    None,
    Translate,
    Rotate,
    Scale,
}

/// Input to the state machine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    /// A handle was grabbed; `cursor` is the unprojected grab point.
    Begin { axis: Axis, cursor: Option<Vector3<f32>> },
    /// Pointer moved to a new unprojected cursor position.
    Drag { cursor: Option<Vector3<f32>> },
    /// Keyboard nudge in world space.
    Offset(Vector3<f32>),
    Commit,
    Cancel,
}

/// What the presenter has to apply after a command.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Outcome {
    Unchanged,
    Started(Axis),
    /// The node's transform changed; overlays need a refresh.
    Moved,
    /// Write these values back into a modified clone of the block.
    Committed(Placement),
    /// The node was reverted to its block.
    Cancelled,
}

/// Public view of the state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ManipulationState {
    Idle,
    Manipulating { axis: Axis, mode: ManipulationMode },
}

#[derive(Debug)]
struct Session {
    axis: Axis,
    last_cursor: Option<Vector3<f32>>,
    _capture: CaptureGuard,
}

pub struct Manipulator {
    mode: ManipulationMode,
    session: Option<Session>,
    offset_pending: bool,
    capture: Rc<dyn PointerCapture>,
    rotation_step: f32,
    min_scale: f32,
}

impl Manipulator {
    pub fn new(capture: Rc<dyn PointerCapture>, settings: &DesignerSettings) -> Self {
        Self {
            mode: ManipulationMode::None,
            session: None,
            offset_pending: false,
            capture,
            rotation_step: settings.rotation_step,
            min_scale: settings.min_scale(),
        }
    }

    pub fn mode(&self) -> ManipulationMode {
        self.mode
    }

    /// Change the mode. An active session must be cancelled by the caller first.
    pub fn set_mode(&mut self, mode: ManipulationMode) {
        self.mode = mode;
    }

    pub fn state(&self) -> ManipulationState {
        match &self.session {
            Some(session) => ManipulationState::Manipulating {
                axis: session.axis,
                mode: self.mode,
            },
            None => ManipulationState::Idle,
        }
    }

    pub fn is_manipulating(&self) -> bool {
        self.session.is_some()
    }

    /// Whether a commit or cancel would do anything.
    pub fn has_pending_change(&self) -> bool {
        self.session.is_some() || self.offset_pending
    }

    pub fn min_scale(&self) -> f32 {
        self.min_scale
    }

    pub fn handle(&mut self, command: Command, node: &mut ContentNode, viewer: ViewerType) -> Outcome {
        match command {
            Command::Begin { axis, cursor } => self.begin(axis, cursor),
            Command::Drag { cursor } => self.drag(cursor, node),
            Command::Offset(offset) => {
                node.set_position(node.position() + offset);
                self.offset_pending = true;
                Outcome::Moved
            }
            Command::Commit => {
                if self.finish() {
                    debug!("Committing manipulation of {:?}", node.block().id);
                    Outcome::Committed(node.placement())
                } else {
                    Outcome::Unchanged
                }
            }
            Command::Cancel => {
                if self.finish() {
                    debug!("Cancelling manipulation of {:?}", node.block().id);
                    node.revert(viewer);
                    Outcome::Cancelled
                } else {
                    Outcome::Unchanged
                }
            }
        }
    }

    fn begin(&mut self, axis: Axis, cursor: Option<Vector3<f32>>) -> Outcome {
        if self.mode == ManipulationMode::None {
            return Outcome::Unchanged;
        }
        if self.session.take().is_some() {
            debug!("Dropping session that was still active");
        }

        debug!("Manipulation started: {:?} on {:?}", self.mode, axis);
        self.session = Some(Session {
            axis,
            last_cursor: cursor,
            _capture: CaptureGuard::acquire(self.capture.clone()),
        });
        Outcome::Started(axis)
    }

    /// Ends the session and any pending nudge; the capture is released here.
    fn finish(&mut self) -> bool {
        let had_session = self.session.take().is_some();
        let had_offset = std::mem::take(&mut self.offset_pending);
        had_session || had_offset
    }

    fn drag(&mut self, cursor: Option<Vector3<f32>>, node: &mut ContentNode) -> Outcome {
        let Some(session) = self.session.as_mut() else {
            return Outcome::Unchanged;
        };
        let Some(cursor) = cursor else {
            return Outcome::Unchanged;
        };
        let Some(last) = session.last_cursor.replace(cursor) else {
            return Outcome::Unchanged;
        };

        let axis = session.axis;
        let rotation = transform::rotation_matrix(node.rotation());
        // pure rotation: the transpose is the inverse
        let local = transform::transform_vector(&rotation.transpose(), cursor - last);

        match self.mode {
            ManipulationMode::None => return Outcome::Unchanged,
            ManipulationMode::Translate => {
                let delta = axis.constrain(local);
                node.set_position(node.position() + transform::transform_vector(&rotation, delta));
            }
            ManipulationMode::Rotate => {
                let length = local.magnitude();
                if length <= f32::EPSILON {
                    return Outcome::Unchanged;
                }
                let delta = axis.constrain(local * (self.rotation_step / length));
                let combined = rotation * transform::rotation_matrix(delta);
                node.set_rotation(transform::rotation_from_matrix(&combined));
            }
            ManipulationMode::Scale => {
                let axis_count = node.block().object_type.axis_count();
                let delta = scale_delta(local, axis, axis_count);
                node.set_scale(apply_scale_floor(node.scale(), delta, self.min_scale));
            }
        }

        Outcome::Moved
    }
}

/// Spread a scale delta over the axes a kind cannot scale on its own.
///
/// One legal axis scales uniformly; with two, the X handle also drives Z.
fn scale_delta(local: Vector3<f32>, axis: Axis, axis_count: usize) -> Vector3<f32> {
    match (axis_count, axis) {
        (1, _) => Vector3::new(local.x, local.x, local.x),
        (2, Axis::X) => Vector3::new(local.x, 0.0, local.x),
        _ => axis.constrain(local),
    }
}

/// Per axis: a delta that would end at or below `min` is dropped.
fn apply_scale_floor(scale: Vector3<f32>, delta: Vector3<f32>, min: f32) -> Vector3<f32> {
    let axis = |current: f32, delta: f32| {
        let next = current + delta;
        if next > min || delta >= 0.0 {
            next
        } else {
            current
        }
    };
    Vector3::new(
        axis(scale.x, delta.x),
        axis(scale.y, delta.y),
        axis(scale.z, delta.z),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{Block, ContentType};
    use rand::{rngs::StdRng, Rng, SeedableRng};
    use std::cell::Cell;
    use std::sync::Arc;

    #[derive(Default)]
    struct CountingCapture {
        captured: Cell<u32>,
        released: Cell<u32>,
    }

    impl PointerCapture for CountingCapture {
        fn capture(&self) {
            self.captured.set(self.captured.get() + 1);
        }
        fn release(&self) {
            self.released.set(self.released.get() + 1);
        }
    }

    fn setup(object_type: ContentType, mode: ManipulationMode) -> (Manipulator, ContentNode, Rc<CountingCapture>) {
        let capture = Rc::new(CountingCapture::default());
        let mut manipulator = Manipulator::new(capture.clone(), &DesignerSettings::default());
        manipulator.set_mode(mode);
        let block = Arc::new(Block::new(1, 0, "node", object_type));
        let node = ContentNode::new(block, ViewerType::System).unwrap();
        (manipulator, node, capture)
    }

    fn drag(manipulator: &mut Manipulator, node: &mut ContentNode, axis: Axis, to: Vector3<f32>) -> Outcome {
        manipulator.handle(
            Command::Begin {
                axis,
                cursor: Some(Vector3::new(0.0, 0.0, 0.0)),
            },
            node,
            ViewerType::System,
        );
        manipulator.handle(Command::Drag { cursor: Some(to) }, node, ViewerType::System)
    }

    fn assert_vec_eq(a: Vector3<f32>, b: Vector3<f32>) {
        assert!((a - b).magnitude() < 1e-4, "{:?} != {:?}", a, b);
    }

    #[test]
    fn test_translate_uses_local_axis() {
        let (mut manipulator, mut node, _) = setup(ContentType::Station, ManipulationMode::Translate);
        node.set_rotation(Vector3::new(0.0, 0.0, 90.0));

        // local +X points along world +Y
        assert_eq!(drag(&mut manipulator, &mut node, Axis::X, Vector3::new(0.0, 5.0, 0.0)), Outcome::Moved);
        assert_vec_eq(node.position(), Vector3::new(0.0, 5.0, 0.0));

        // movement across the axis is ignored
        manipulator.handle(
            Command::Drag {
                cursor: Some(Vector3::new(3.0, 5.0, 0.0)),
            },
            &mut node,
            ViewerType::System,
        );
        assert_vec_eq(node.position(), Vector3::new(0.0, 5.0, 0.0));
    }

    #[test]
    fn test_rotate_step_is_normalized() {
        let (mut manipulator, mut node, _) = setup(ContentType::Station, ManipulationMode::Rotate);
        drag(&mut manipulator, &mut node, Axis::X, Vector3::new(100.0, 0.0, 0.0));
        assert_vec_eq(node.rotation(), Vector3::new(2.0, 0.0, 0.0));
    }

    #[test]
    fn test_scale_single_axis_is_uniform() {
        let (mut manipulator, mut node, _) = setup(ContentType::ZoneSphere, ManipulationMode::Scale);
        drag(&mut manipulator, &mut node, Axis::X, Vector3::new(0.5, 0.0, 0.0));
        assert_vec_eq(node.scale(), Vector3::new(1.5, 1.5, 1.5));
    }

    #[test]
    fn test_scale_two_axes_mirrors_x_into_z() {
        let (mut manipulator, mut node, _) = setup(ContentType::ZoneRing, ManipulationMode::Scale);
        drag(&mut manipulator, &mut node, Axis::X, Vector3::new(0.5, 0.0, 0.0));
        assert_vec_eq(node.scale(), Vector3::new(1.5, 1.0, 1.5));
    }

    #[test]
    fn test_scale_never_reaches_floor() {
        let (mut manipulator, mut node, _) = setup(ContentType::ZoneBox, ManipulationMode::Scale);
        let min = manipulator.min_scale();
        let mut rng = StdRng::seed_from_u64(7);

        for _ in 0..50 {
            let axis = Axis::ALL[rng.random_range(0..3)];
            manipulator.handle(
                Command::Begin {
                    axis,
                    cursor: Some(Vector3::new(0.0, 0.0, 0.0)),
                },
                &mut node,
                ViewerType::System,
            );
            for _ in 0..20 {
                let cursor = Vector3::new(
                    rng.random_range(-3.0..3.0),
                    rng.random_range(-3.0..3.0),
                    rng.random_range(-3.0..3.0),
                );
                manipulator.handle(Command::Drag { cursor: Some(cursor) }, &mut node, ViewerType::System);
                let scale = node.scale();
                assert!(scale.x > min && scale.y > min && scale.z > min, "{:?}", scale);
            }
            manipulator.handle(Command::Commit, &mut node, ViewerType::System);
        }
    }

    #[test]
    fn test_cancel_restores_exactly() {
        let (mut manipulator, mut node, capture) = setup(ContentType::ZoneBox, ManipulationMode::Translate);
        let block = Block::new(1, 0, "node", ContentType::ZoneBox)
            .with_position(1.5, -2.25, 3.125)
            .with_rotation(10.0, 20.0, 30.0)
            .with_scale(2.0, 3.0, 4.0);
        node.apply_block(Arc::new(block), ViewerType::System);
        let before = node.transform();
        let mut rng = StdRng::seed_from_u64(11);

        for mode in [ManipulationMode::Translate, ManipulationMode::Rotate, ManipulationMode::Scale] {
            manipulator.set_mode(mode);
            drag(&mut manipulator, &mut node, Axis::Y, Vector3::new(0.3, 0.7, -0.2));
            for _ in 0..10 {
                let cursor = Vector3::new(rng.random_range(-1.0..1.0), rng.random_range(-1.0..1.0), 0.0);
                manipulator.handle(Command::Drag { cursor: Some(cursor) }, &mut node, ViewerType::System);
            }
            assert_eq!(manipulator.handle(Command::Cancel, &mut node, ViewerType::System), Outcome::Cancelled);
            assert_eq!(node.transform(), before);
        }

        assert_eq!(capture.captured.get(), 3);
        assert_eq!(capture.released.get(), 3);
    }

    #[test]
    fn test_commit_releases_capture() {
        let (mut manipulator, mut node, capture) = setup(ContentType::Planet, ManipulationMode::Translate);
        drag(&mut manipulator, &mut node, Axis::Z, Vector3::new(0.0, 0.0, 4.0));
        assert!(manipulator.is_manipulating());
        assert_eq!(capture.released.get(), 0);

        let outcome = manipulator.handle(Command::Commit, &mut node, ViewerType::System);
        match outcome {
            Outcome::Committed(placement) => assert_vec_eq(placement.position, Vector3::new(0.0, 0.0, 4.0)),
            other => panic!("unexpected outcome {:?}", other),
        }
        assert_eq!(manipulator.state(), ManipulationState::Idle);
        assert_eq!(capture.released.get(), 1);

        assert_eq!(manipulator.handle(Command::Commit, &mut node, ViewerType::System), Outcome::Unchanged);
    }

    #[test]
    fn test_dropping_mid_session_releases_capture() {
        let (mut manipulator, mut node, capture) = setup(ContentType::Planet, ManipulationMode::Translate);
        drag(&mut manipulator, &mut node, Axis::X, Vector3::new(1.0, 0.0, 0.0));
        drop(manipulator);
        assert_eq!(capture.released.get(), 1);
    }

    #[test]
    fn test_no_session_without_mode() {
        let (mut manipulator, mut node, capture) = setup(ContentType::Planet, ManipulationMode::None);
        let outcome = manipulator.handle(
            Command::Begin {
                axis: Axis::X,
                cursor: None,
            },
            &mut node,
            ViewerType::System,
        );
        assert_eq!(outcome, Outcome::Unchanged);
        assert_eq!(capture.captured.get(), 0);
    }

    #[test]
    fn test_offset_then_commit() {
        let (mut manipulator, mut node, _) = setup(ContentType::Planet, ManipulationMode::None);
        let outcome = manipulator.handle(Command::Offset(Vector3::new(0.0, 0.025, 0.0)), &mut node, ViewerType::System);
        assert_eq!(outcome, Outcome::Moved);
        assert!(manipulator.has_pending_change());

        match manipulator.handle(Command::Commit, &mut node, ViewerType::System) {
            Outcome::Committed(placement) => assert_vec_eq(placement.position, Vector3::new(0.0, 0.025, 0.0)),
            other => panic!("unexpected outcome {:?}", other),
        }
        assert!(!manipulator.has_pending_change());
    }
}
