//! # Presenter
//!
//! Owns the scene, the camera, the model cache and the manipulation state
//! machine, and exposes the operations the UI calls: add, delete, change
//! values, select, focus, track. Pointer and keyboard events are mapped in
//! [`input`].
//!
//! ## Usage
//!
//! ```rust
//! use std::sync::Arc;
//! use sysdesigner::prelude::*;
//!
//! let mut presenter = Presenter::new(ViewerType::System, DesignerSettings::default());
//! let planet = Arc::new(Block::new(1, 0, "Planet", ContentType::Planet));
//! let id = presenter.add_block(planet).unwrap();
//! presenter.set_selected(Some(id));
//! presenter.set_manipulation_mode(ManipulationMode::Translate);
//! assert!(presenter.title().is_some());
//! ```

pub mod input;
pub mod observer;

use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::sync::Arc;
use std::time::Duration;

use cgmath::{InnerSpace, Vector3};
use log::{debug, info, warn};

pub use input::{KeyInput, PointerInput};
pub use observer::{NullObserver, PresenterObserver};

use crate::data::{Block, BlockId, ContentKind, ContentType, ViewerType};
use crate::error::{DesignerError, Result};
use crate::gfx::camera::{CameraController, FlyCamera};
use crate::gfx::geometry::GeometryHandle;
use crate::gfx::gizmos::{handle_count, Axis, ManipulatorLine};
use crate::gfx::picking::{Aabb, ObjectPicker, PickOutcome};
use crate::gfx::resources::{GeometryLoader, ModelCache, ObjLoader};
use crate::gfx::scene::overlay::{SELECTION_COLOR, TRACKED_COLOR, TRACKED_LINE_COLOR};
use crate::gfx::scene::{
    Connection, ContentNode, Lighting, NodeId, Overlay, OverlaySlot, Scene, SceneNode, SelectionBox,
    TrackedLine,
};
use crate::gfx::transform;
use crate::manipulation::{
    Command, ManipulationMode, ManipulationState, Manipulator, NoPointerCapture, Outcome, PointerCapture,
};
use crate::settings::DesignerSettings;
use crate::universe::{AnalysisTask, UniverseConnection};

/// Whole degrees of `atan(ratio)`, without a negative zero.
fn bearing(ratio: f32) -> f32 {
    let degrees = ratio.atan().to_degrees().round();
    if degrees == 0.0 {
        0.0
    } else {
        degrees
    }
}

pub struct Presenter {
    viewer_type: ViewerType,
    settings: DesignerSettings,
    scene: Scene,
    camera: FlyCamera,
    controller: CameraController,
    cache: ModelCache,
    loader: Box<dyn GeometryLoader>,
    observer: Box<dyn PresenterObserver>,
    manipulator: Manipulator,
    picker: ObjectPicker,
    selected: Option<NodeId>,
    /// Block of the selection; survives the node being hidden and re-added.
    selected_block: Option<BlockId>,
    tracked: Option<NodeId>,
    pending_universe: Option<AnalysisTask>,
}

impl Presenter {
    pub fn new(viewer_type: ViewerType, settings: DesignerSettings) -> Self {
        let mut camera = FlyCamera::default();
        camera.fly_speed = settings.fly_speed;
        camera.set_animation_duration(settings.camera_animation);

        let mut scene = Scene::new();
        scene.set_overlay(OverlaySlot::Lighting, Some(Overlay::Lighting(Lighting::default())));

        Self {
            viewer_type,
            scene,
            camera,
            controller: CameraController::new(),
            cache: ModelCache::new(),
            loader: Box::new(ObjLoader),
            observer: Box::new(NullObserver),
            manipulator: Manipulator::new(Rc::new(NoPointerCapture), &settings),
            picker: ObjectPicker::new(settings.handle_screen_fraction),
            selected: None,
            selected_block: None,
            tracked: None,
            pending_universe: None,
            settings,
        }
    }

    pub fn with_observer(mut self, observer: impl PresenterObserver + 'static) -> Self {
        self.observer = Box::new(observer);
        self
    }

    pub fn with_loader(mut self, loader: impl GeometryLoader + 'static) -> Self {
        self.loader = Box::new(loader);
        self
    }

    pub fn with_pointer_capture(mut self, capture: Rc<dyn PointerCapture>) -> Self {
        let mode = self.manipulator.mode();
        self.manipulator = Manipulator::new(capture, &self.settings);
        self.manipulator.set_mode(mode);
        self
    }

    /// Replace the camera; the configured animation duration is kept.
    pub fn with_camera(mut self, mut camera: FlyCamera) -> Self {
        camera.set_animation_duration(self.camera.animation_duration());
        camera.fly_speed = self.settings.fly_speed;
        self.camera = camera;
        self
    }

    pub fn viewer_type(&self) -> ViewerType {
        self.viewer_type
    }

    pub fn settings(&self) -> &DesignerSettings {
        &self.settings
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn camera(&self) -> &FlyCamera {
        &self.camera
    }

    pub fn camera_mut(&mut self) -> &mut FlyCamera {
        &mut self.camera
    }

    pub fn model_cache(&self) -> &ModelCache {
        &self.cache
    }

    pub fn selected(&self) -> Option<NodeId> {
        self.selected
    }

    pub fn tracked(&self) -> Option<NodeId> {
        self.tracked
    }

    pub fn manipulation_mode(&self) -> ManipulationMode {
        self.manipulator.mode()
    }

    pub fn manipulation_state(&self) -> ManipulationState {
        self.manipulator.state()
    }

    /// Advance camera animation and flying, and apply finished background work.
    pub fn update(&mut self, dt: Duration) {
        self.camera.update(dt);
        if let Some(rejected) = self.poll_universe() {
            for err in rejected {
                debug!("{}", err);
            }
        }
    }

    // ---- content ----

    /// Add one block. Camera animation is suppressed while adding.
    pub fn add_block(&mut self, block: Arc<Block>) -> Option<NodeId> {
        let animation = self.suspend_animation();
        let id = self.add_content(block);
        self.camera.set_animation_duration(animation);
        id
    }

    /// Add every visible block.
    pub fn add_blocks<I>(&mut self, blocks: I) -> Vec<NodeId>
    where
        I: IntoIterator<Item = Arc<Block>>,
    {
        let animation = self.suspend_animation();
        let ids: Vec<NodeId> = blocks.into_iter().filter_map(|block| self.add_content(block)).collect();
        self.camera.set_animation_duration(animation);

        info!("Added {} node(s) to the {:?} view", ids.len(), self.viewer_type);
        ids
    }

    fn suspend_animation(&mut self) -> Duration {
        let animation = self.camera.animation_duration();
        self.camera.set_animation_duration(Duration::ZERO);
        animation
    }

    fn add_content(&mut self, block: Arc<Block>) -> Option<NodeId> {
        if !block.visibility {
            return None;
        }

        let Some(mut node) = ContentNode::new(block.clone(), self.viewer_type) else {
            debug!("Block {} has no scene representation", block.name);
            return None;
        };
        node.set_model(self.resolve_model(&node));

        let id = self.scene.add_content(node);
        debug!("Added {} as {:?}", block.name, id);

        // the selected block was hidden and has come back
        if self.selected.is_none() && self.selected_block == Some(block.id) {
            self.set_selected(Some(id));
        }
        Some(id)
    }

    /// Remove a node, and first every connection of a System node.
    pub fn delete(&mut self, id: NodeId) -> Result<()> {
        let connections = match self.scene.content(id) {
            Some(node) => node.connections().to_vec(),
            None => return Err(DesignerError::UnknownNode(id)),
        };

        if self.selected == Some(id) {
            self.cancel_manipulation();
            self.selected = None;
        }
        if self.tracked == Some(id) {
            self.tracked = None;
        }

        for connection in connections {
            self.delete_connection(connection);
        }
        self.scene.remove(id);
        self.refresh_selection();
        Ok(())
    }

    fn delete_connection(&mut self, id: NodeId) {
        if let Some(SceneNode::Connection(connection)) = self.scene.remove(id) {
            for end in [connection.from, connection.to] {
                if let Some(node) = self.scene.content_mut(end) {
                    node.remove_connection(id);
                }
            }
        }
    }

    /// Re-derive a node from an updated block.
    ///
    /// An invalid or hidden block removes the node. A block whose kind moved
    /// to another content variant gets a fresh node. Returns the node that
    /// now represents the block.
    pub fn change_values(&mut self, id: NodeId, block: Arc<Block>) -> Result<Option<NodeId>> {
        let kind = match self.scene.content(id) {
            Some(node) => node.kind(),
            None => return Err(DesignerError::UnknownNode(id)),
        };

        if block.object_type == ContentType::None || !block.visibility {
            if self.selected == Some(id) && block.object_type == ContentType::None {
                self.set_selected(None);
            }
            self.delete(id)?;
            return Ok(None);
        }

        if block.object_type.content_kind() != Some(kind) {
            self.delete(id)?;
            return Ok(self.add_content(block));
        }

        if self.selected == Some(id) {
            self.cancel_manipulation();
        }

        let viewer = self.viewer_type;
        let model_changed = match self.scene.content_mut(id) {
            Some(node) => node.apply_block(block, viewer),
            None => return Err(DesignerError::UnknownNode(id)),
        };
        if model_changed {
            self.reload_model(id);
        }

        self.after_move(id);
        Ok(Some(id))
    }

    /// Resolve geometry again for every node that uses a real model.
    pub fn reload_models(&mut self) {
        let ids: Vec<NodeId> = self
            .scene
            .contents()
            .filter(|(_, node)| node.block().is_real_model())
            .map(|(id, _)| id)
            .collect();

        for id in &ids {
            self.reload_model(*id);
        }
        info!("Reloaded models for {} node(s)", ids.len());

        if self.selected.is_some_and(|selected| ids.contains(&selected)) {
            self.refresh_selection();
        }
    }

    /// Switch between loaded models and placeholder shapes.
    pub fn set_model_mode(&mut self, enabled: bool) {
        if self.settings.model_mode == enabled {
            return;
        }
        self.settings.model_mode = enabled;
        debug!("Model mode {}", if enabled { "on" } else { "off" });
        self.reload_models();
    }

    /// Point model loading at another data directory.
    ///
    /// Cached models are keyed by relative path and stay in the cache.
    pub fn set_data_path(&mut self, path: impl Into<PathBuf>) {
        self.settings.data_path = path.into();
        debug!("Data path set to {}", self.settings.data_path.display());
        self.reload_models();
    }

    fn reload_model(&mut self, id: NodeId) {
        let model = self.scene.content(id).and_then(|node| self.resolve_model(node));
        if let Some(node) = self.scene.content_mut(id) {
            node.set_model(model);
        }
    }

    /// Geometry for a node, `None` when the placeholder shape is used.
    fn resolve_model(&self, node: &ContentNode) -> Option<GeometryHandle> {
        if !self.settings.model_mode || !node.block().is_real_model() {
            return None;
        }
        let path = node.block().model_path()?;

        match self.load_model(path) {
            Ok(model) => Some(model),
            Err(err) => {
                warn!("{}; using placeholder for {}", err, node.block().name);
                None
            }
        }
    }

    /// Load a model below the data path. Only the system view shares models
    /// through the cache.
    pub fn load_model(&self, path: &str) -> Result<GeometryHandle> {
        let use_cache = self.viewer_type == ViewerType::System;
        if use_cache {
            if let Some(model) = self.cache.get(path) {
                return Ok(model);
            }
        }

        let file = self.settings.data_path.join(path.replace('\\', "/"));
        let extension = file
            .extension()
            .and_then(|extension| extension.to_str())
            .unwrap_or_default()
            .to_ascii_lowercase();
        if !self.loader.supports(&extension) {
            return Err(DesignerError::UnsupportedModelFormat(file));
        }

        let model = self.loader.load(&file)?;
        Ok(if use_cache {
            self.cache.insert(path, model)
        } else {
            GeometryHandle::new(model)
        })
    }

    /// Local bounds of a node: loaded model, then cached model, then shape.
    pub fn bounds(&self, node: &ContentNode) -> Aabb {
        if self.settings.model_mode && node.block().is_real_model() {
            if let Some(model) = node.model() {
                return model.bounds();
            }
            if let Some(model) = node.block().model_path().and_then(|path| self.cache.get(path)) {
                return model.bounds();
            }
        }
        node.shape_bounds()
    }

    /// World bounds of all content and connections.
    pub fn all_bounds(&self) -> Option<Aabb> {
        let content = self
            .scene
            .contents()
            .map(|(_, node)| self.bounds(node).transform(&node.transform()));
        let connections = self
            .scene
            .connections()
            .map(|(_, connection)| Aabb::unit().transform(&connection.transform()));

        content.chain(connections).reduce(|a, b| a.union(&b))
    }

    pub fn find_content(&self, block: BlockId) -> Option<NodeId> {
        self.scene.find_by_block(block)
    }

    /// Number of overlay nodes ahead of the content.
    pub fn content_start(&self) -> usize {
        self.scene.content_start()
    }

    /// Empty the scene. Selection and tracking go with it.
    pub fn clear_display(&mut self, keep_lighting: bool) {
        self.cancel_manipulation();
        self.selected = None;
        self.selected_block = None;
        self.tracked = None;
        self.pending_universe = None;
        self.scene.clear(keep_lighting);
        debug!("Display cleared");
    }

    // ---- selection ----

    /// Handle a click on a node.
    ///
    /// A plain click selects the node. Clicking an already selected system
    /// in the universe map asks the UI for its context action instead.
    pub fn select(&mut self, id: NodeId, toggle: bool) -> Result<()> {
        let block = match self.scene.content(id) {
            Some(node) => node.block().clone(),
            None => return Err(DesignerError::UnknownNode(id)),
        };

        if !toggle {
            if self.selected == Some(id) {
                if self.viewer_type == ViewerType::Universe && block.object_type == ContentType::System {
                    if let Some(path) = &block.path {
                        self.observer.system_context_requested(&block, path);
                    }
                }
            } else {
                self.set_selected(Some(id));
            }
        }

        self.observer.selection_changed(&block, toggle);
        Ok(())
    }

    /// Set the selection. An active session on another node is cancelled.
    pub fn set_selected(&mut self, id: Option<NodeId>) {
        let id = id.filter(|id| self.scene.content(*id).is_some());
        if self.selected != id {
            self.cancel_manipulation();
        }

        self.selected = id;
        self.selected_block = id.and_then(|id| self.scene.content(id)).map(|node| node.block().id);
        self.refresh_selection();
    }

    pub fn set_tracked(&mut self, id: Option<NodeId>) {
        self.tracked = id.filter(|id| self.scene.content(*id).is_some());
        self.update_selection_box();
        self.update_tracked_line();
    }

    /// Toggle tracking of the selection. System view only.
    pub fn track_selected(&mut self) {
        if self.viewer_type != ViewerType::System {
            return;
        }
        if self.selected == self.tracked {
            self.set_tracked(None);
        } else {
            self.set_tracked(self.selected);
        }
    }

    pub fn set_manipulation_mode(&mut self, mode: ManipulationMode) {
        if self.manipulator.mode() != mode {
            self.cancel_manipulation();
        }
        self.manipulator.set_mode(mode);
        self.update_manipulator_lines();
    }

    /// Selected name, plus distance and bearing to the tracked node.
    pub fn title(&self) -> Option<String> {
        let selected = self.selected.and_then(|id| self.scene.content(id))?;
        let mut lines = vec![selected.block().name.clone()];

        let tracked = self
            .tracked
            .filter(|tracked| Some(*tracked) != self.selected)
            .and_then(|id| self.scene.content(id));

        if let Some(tracked) = tracked {
            let delta = (tracked.position() - selected.position()) / self.settings.system_scale;
            let (x_angle, y_angle) = if delta.y == 0.0 {
                (0.0, 0.0)
            } else {
                (bearing(-delta.z / delta.y), bearing(-delta.x / delta.y))
            };
            let z_angle = if delta.x == 0.0 { 0.0 } else { bearing(delta.z / delta.x) };

            lines.push(String::new());
            lines.push(tracked.block().name.clone());
            lines.push(format!("Distance: {}", delta.magnitude().round()));
            lines.push(format!("Angles: {}, {}, {}", x_angle, y_angle, z_angle));
        }

        Some(lines.join("\n"))
    }

    // ---- camera ----

    pub fn look_at(&mut self, id: NodeId) -> Result<()> {
        let position = self
            .scene
            .content(id)
            .map(ContentNode::position)
            .ok_or(DesignerError::UnknownNode(id))?;
        self.camera.look_at(position);
        Ok(())
    }

    pub fn look_at_selected(&mut self) {
        if let Some(id) = self.selected {
            if let Err(err) = self.look_at(id) {
                debug!("Look at selection failed: {}", err);
            }
        }
    }

    /// Look at the selection and zoom to fit it.
    pub fn focus_selected(&mut self) {
        if let Some(id) = self.selected {
            let zoom = self.settings.focus_zoom(self.viewer_type);
            self.look_at_and_zoom(id, zoom);
        }
    }

    fn look_at_and_zoom(&mut self, id: NodeId, zoom: f32) {
        let Some(node) = self.scene.content(id) else {
            return;
        };
        let bounds = self.bounds(node);
        let matrix = node.transform();

        let center = transform::transform_point(&matrix, bounds.center());
        let corner = transform::transform_point(&matrix, bounds.center() + bounds.size());
        let extent = corner - center;
        let distance = extent.x.abs().max(extent.y.abs()).max(extent.z.abs());

        self.camera.zoom_extents(center, distance * 0.5 * zoom);
    }

    /// Back to the default camera, then frame everything immediately.
    pub fn reset_camera(&mut self) {
        self.camera.reset();
        if let Some(bounds) = self.all_bounds() {
            let animation = self.suspend_animation();
            self.camera.zoom_extents(bounds.center(), bounds.size().magnitude() * 0.5);
            self.camera.set_animation_duration(animation);
        }
    }

    // ---- hit testing and manipulation ----

    /// Resolve a screen point. A handle hit starts a manipulation session.
    pub fn hit_test(&mut self, screen: (f32, f32), prefer_farthest: bool, allow_handles: bool) -> PickOutcome {
        let outcome = self
            .picker
            .pick(screen, &self.camera, &self.scene, prefer_farthest, allow_handles);
        if let PickOutcome::Handle(axis) = outcome {
            self.begin_manipulation(axis, screen);
        }
        outcome
    }

    /// Start a session on the selected node.
    pub fn begin_manipulation(&mut self, axis: Axis, screen: (f32, f32)) {
        if self.manipulator.is_manipulating() {
            self.run_command(Command::Commit);
        }
        let cursor = self.unproject_at_selection(screen);
        self.run_command(Command::Begin { axis, cursor });
    }

    /// Cursor on the plane through the selection facing the camera.
    fn unproject_at_selection(&self, screen: (f32, f32)) -> Option<Vector3<f32>> {
        let node = self.selected.and_then(|id| self.scene.content(id))?;
        self.camera
            .unproject(screen, node.position(), self.camera.look_direction)
    }

    fn cancel_manipulation(&mut self) {
        if self.manipulator.has_pending_change() {
            self.run_command(Command::Cancel);
        }
    }

    fn run_command(&mut self, command: Command) -> Outcome {
        let Some(id) = self.selected else {
            return Outcome::Unchanged;
        };
        let viewer = self.viewer_type;
        let Some(node) = self.scene.content_mut(id) else {
            return Outcome::Unchanged;
        };

        let outcome = self.manipulator.handle(command, node, viewer);
        self.apply_outcome(id, outcome);
        outcome
    }

    fn apply_outcome(&mut self, id: NodeId, outcome: Outcome) {
        match outcome {
            Outcome::Unchanged => {}
            Outcome::Started(axis) => {
                if let Some(Overlay::Handle(line)) = self.scene.overlay_mut(OverlaySlot::Handle(axis)) {
                    line.set_active(true);
                }
            }
            Outcome::Moved => self.after_move(id),
            Outcome::Committed(placement) => {
                self.deactivate_handles();
                if let Some(node) = self.scene.content_mut(id) {
                    let old = node.block().clone();
                    let new = Arc::new(old.modified_with(placement));
                    node.set_block(new.clone());
                    debug!("Committed {} at {:?}", new.name, placement.position);
                    self.observer.data_manipulated(&new, &old);
                }
                self.after_move(id);
            }
            Outcome::Cancelled => {
                self.deactivate_handles();
                self.after_move(id);
            }
        }
    }

    fn deactivate_handles(&mut self) {
        for axis in Axis::ALL {
            if let Some(Overlay::Handle(line)) = self.scene.overlay_mut(OverlaySlot::Handle(axis)) {
                line.set_active(false);
            }
        }
    }

    /// Keep connections and overlays in step with a node's transform.
    fn after_move(&mut self, id: NodeId) {
        if self.viewer_type == ViewerType::Universe {
            self.update_connections(id);
        }
        if self.selected == Some(id) || self.tracked == Some(id) {
            self.refresh_selection();
        }
    }

    // ---- overlays ----

    fn refresh_selection(&mut self) {
        self.update_selection_box();
        self.update_tracked_line();
        self.update_manipulator_lines();
    }

    fn update_selection_box(&mut self) {
        let overlay = self.selected.and_then(|id| self.scene.content(id)).map(|node| {
            let color = if self.tracked == self.selected {
                TRACKED_COLOR
            } else {
                SELECTION_COLOR
            };
            Overlay::SelectionBox(SelectionBox {
                bounds: self.bounds(node),
                transform: node.transform(),
                color,
            })
        });
        self.scene.set_overlay(OverlaySlot::SelectionBox, overlay);
    }

    fn update_tracked_line(&mut self) {
        let line = match (self.selected, self.tracked) {
            (Some(selected), Some(tracked)) if selected != tracked => {
                match (self.scene.content(selected), self.scene.content(tracked)) {
                    (Some(a), Some(b)) => Some(Overlay::TrackedLine(TrackedLine {
                        from: a.position(),
                        to: b.position(),
                        color: TRACKED_LINE_COLOR,
                    })),
                    _ => None,
                }
            }
            _ => None,
        };
        self.scene.set_overlay(OverlaySlot::TrackedLine, line);
    }

    fn update_manipulator_lines(&mut self) {
        if !self.viewer_type.supports_manipulation() {
            return;
        }

        let (count, position, rotation) = match self.selected.and_then(|id| self.scene.content(id)) {
            Some(node) => (
                handle_count(self.viewer_type, self.manipulator.mode(), node.block().object_type),
                node.position(),
                node.rotation(),
            ),
            None => (0, Vector3::new(0.0, 0.0, 0.0), Vector3::new(0.0, 0.0, 0.0)),
        };

        for axis in Axis::ALL {
            let slot = OverlaySlot::Handle(axis);
            if axis.index() >= count {
                self.scene.set_overlay(slot, None);
                continue;
            }
            if let Some(Overlay::Handle(line)) = self.scene.overlay_mut(slot) {
                line.update(position, rotation);
                continue;
            }
            let line = ManipulatorLine::new(axis, position, rotation);
            self.scene.set_overlay(slot, Some(Overlay::Handle(line)));
        }
    }

    // ---- universe ----

    /// Start the connection analysis for the given blocks in the background.
    pub fn display_universe(&mut self, blocks: &[Arc<Block>]) {
        let systems: Vec<Arc<Block>> = blocks
            .iter()
            .filter(|block| block.object_type == ContentType::System)
            .cloned()
            .collect();
        self.pending_universe = Some(if self.settings.background_analysis {
            AnalysisTask::spawn(systems)
        } else {
            AnalysisTask::immediate(&systems)
        });
    }

    /// Apply the analysis result if it is ready.
    ///
    /// Returns the connections that could not be placed.
    pub fn poll_universe(&mut self) -> Option<Vec<DesignerError>> {
        let result = self.pending_universe.as_mut()?.try_take()?;
        self.pending_universe = None;
        Some(self.finish_universe(result))
    }

    /// Block until the analysis is done and apply it.
    pub fn wait_universe(&mut self) -> Option<Vec<DesignerError>> {
        let task = self.pending_universe.take()?;
        Some(self.finish_universe(task.wait()))
    }

    fn finish_universe(&mut self, result: Result<Vec<UniverseConnection>>) -> Vec<DesignerError> {
        match result {
            Ok(connections) => self.apply_connections(&connections),
            Err(err) => {
                warn!("{}", err);
                vec![err]
            }
        }
    }

    /// Add connection nodes between the matching System nodes.
    ///
    /// A connection needs exactly two System nodes with its block indices;
    /// otherwise it is rejected and reported.
    pub fn apply_connections(&mut self, connections: &[UniverseConnection]) -> Vec<DesignerError> {
        let mut rejected = Vec::new();
        let mut added = 0;

        for universe_connection in connections {
            let (from_index, to_index) = (universe_connection.from.index, universe_connection.to.index);
            let mut from = None;
            let mut to = None;

            for (id, node) in self.scene.contents() {
                if node.kind() != ContentKind::System {
                    continue;
                }
                if from.is_none() && node.block().index == from_index {
                    from = Some(id);
                } else if to.is_none() && node.block().index == to_index {
                    to = Some(id);
                }
                if from.is_some() && to.is_some() {
                    break;
                }
            }

            let (Some(from), Some(to)) = (from, to) else {
                let err = DesignerError::UnresolvedConnection {
                    from: from_index,
                    to: to_index,
                    found: usize::from(from.is_some()) + usize::from(to.is_some()),
                };
                warn!("{}", err);
                rejected.push(err);
                continue;
            };

            let connection = Connection::new(
                from,
                to,
                universe_connection.from.connection_type(),
                universe_connection.to.connection_type(),
            );
            let id = self.scene.add_connection(connection);
            for end in [from, to] {
                if let Some(node) = self.scene.content_mut(end) {
                    node.add_connection(id);
                }
            }
            self.place_connection(id);
            added += 1;
        }

        info!("Added {} universe connection(s), {} rejected", added, rejected.len());
        rejected
    }

    fn update_connections(&mut self, id: NodeId) {
        let connections = match self.scene.content(id) {
            Some(node) => node.connections().to_vec(),
            None => return,
        };
        for connection in connections {
            self.place_connection(connection);
        }
    }

    fn place_connection(&mut self, id: NodeId) {
        let Some(connection) = self.scene.connection(id) else {
            return;
        };
        let width = if connection.is_double() {
            self.settings.double_connection_width
        } else {
            self.settings.connection_width
        };
        let ends = (
            self.scene.content(connection.from).map(ContentNode::position),
            self.scene.content(connection.to).map(ContentNode::position),
        );

        if let ((Some(from), Some(to)), Some(connection)) = (ends, self.scene.connection_mut(id)) {
            connection.place(from, to, width);
        }
    }

    /// Pass an "open this file" request on to the UI.
    pub fn request_file_open(&mut self, path: &Path) {
        self.observer.file_open_requested(path);
    }
}
