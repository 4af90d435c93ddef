//! # Designer Demo
//!
//! Headless walk through the presenter: builds a small universe, waits for
//! the connection analysis, then opens one system, selects a station and
//! nudges it with the keyboard.
//!
//! ## Usage:
//! ```bash
//! cargo run --bin designer_demo
//! cargo run --bin designer_demo -- path/to/data   # load .obj models from a data directory
//! ```

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{bail, Context};
use log::info;
use winit::keyboard::KeyCode;

use sysdesigner::prelude::*;

/// Logs everything the presenter reports.
struct LogObserver;

impl PresenterObserver for LogObserver {
    fn selection_changed(&mut self, block: &Arc<Block>, toggle: bool) {
        info!("selection: {} (toggle: {})", block.name, toggle);
    }

    fn data_manipulated(&mut self, new_block: &Arc<Block>, old_block: &Arc<Block>) {
        info!(
            "{} moved from {:?} to {:?}",
            new_block.name, old_block.placement.position, new_block.placement.position
        );
    }

    fn file_open_requested(&mut self, path: &Path) {
        info!("open requested: {}", path.display());
    }

    fn system_context_requested(&mut self, block: &Arc<Block>, path: &Path) {
        info!("context for {}: {}", block.name, path.display());
    }
}

fn universe_blocks() -> Vec<Arc<Block>> {
    vec![
        Block::new(1, 0, "Li01", ContentType::System)
            .with_path("systems/li01.ini")
            .with_jump(1, JumpKind::Gate)
            .with_jump(2, JumpKind::Hole),
        Block::new(2, 1, "Li02", ContentType::System)
            .with_position(40.0, 10.0, 0.0)
            .with_jump(0, JumpKind::Gate),
        Block::new(3, 2, "Li03", ContentType::System)
            .with_position(-25.0, 30.0, 0.0)
            .with_jump(0, JumpKind::Hole)
            .with_jump(0, JumpKind::Gate),
        // declared link to a system that does not exist
        Block::new(4, 3, "Br01", ContentType::System)
            .with_position(70.0, -20.0, 0.0)
            .with_jump(9, JumpKind::Gate),
    ]
    .into_iter()
    .map(Arc::new)
    .collect()
}

fn system_blocks() -> Vec<Arc<Block>> {
    vec![
        Block::new(10, 0, "Li01_Sun", ContentType::Sun).with_scale(5.0, 5.0, 5.0),
        Block::new(11, 1, "Li01_Planet", ContentType::Planet).with_position(60.0, 0.0, 0.0),
        Block::new(12, 2, "Li01_Station", ContentType::Station)
            .with_position(60.0, 12.0, 0.0)
            .with_archetype(Archetype::new("station", Some("solar\\station.obj"))),
        Block::new(13, 3, "Zone_Li01_Field", ContentType::ZoneSphere).with_scale(20.0, 20.0, 20.0),
    ]
    .into_iter()
    .map(Arc::new)
    .collect()
}

fn run_universe() -> anyhow::Result<()> {
    let mut presenter =
        Presenter::new(ViewerType::Universe, DesignerSettings::default()).with_observer(LogObserver);

    let blocks = universe_blocks();
    let ids = presenter.add_blocks(blocks.clone());
    presenter.display_universe(&blocks);

    let rejected = presenter
        .wait_universe()
        .context("universe analysis was not started")?;
    info!(
        "universe: {} systems, {} connections, {} rejected",
        ids.len(),
        presenter.scene().connections().count(),
        rejected.len()
    );

    // clicking a selected system asks for its file
    let first = ids.first().copied().context("no systems were added")?;
    presenter.select(first, false)?;
    presenter.select(first, false)?;
    Ok(())
}

fn run_system(data_path: Option<&str>) -> anyhow::Result<()> {
    let mut settings = DesignerSettings::default().with_camera_animation(Duration::from_millis(250));
    if let Some(path) = data_path {
        if !Path::new(path).is_dir() {
            bail!("data path {} is not a directory", path);
        }
        settings = settings.with_model_mode(true).with_data_path(path);
    }

    let mut presenter = Presenter::new(ViewerType::System, settings).with_observer(LogObserver);
    let ids = presenter.add_blocks(system_blocks());
    info!(
        "system: {} nodes, {} cached models",
        ids.len(),
        presenter.model_cache().len()
    );

    let station = presenter
        .find_content(BlockId(12))
        .context("station was not added")?;
    presenter.set_selected(Some(station));
    presenter.set_manipulation_mode(ManipulationMode::Translate);

    presenter.key_input(&KeyInput::pressed(KeyCode::KeyD).with_caps_lock());
    presenter.key_input(&KeyInput::released(KeyCode::KeyD).with_caps_lock());

    presenter.key_input(&KeyInput::pressed(KeyCode::KeyF));
    for _ in 0..30 {
        presenter.update(Duration::from_millis(16));
    }
    info!("camera target: {:?}", presenter.camera().target());

    let planet = presenter
        .find_content(BlockId(11))
        .context("planet was not added")?;
    presenter.set_tracked(Some(planet));
    if let Some(title) = presenter.title() {
        info!("title:\n{}", title);
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    sysdesigner::init_logging();

    let data_path = std::env::args().nth(1);
    run_universe()?;
    run_system(data_path.as_deref())?;
    Ok(())
}
