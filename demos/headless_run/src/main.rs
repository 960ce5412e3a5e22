use std::{env, fs, path::PathBuf, time::Duration};

use anyhow::{Context, Result};
use echoes::{
    AssetManager, AudioSystem, CommandBuffer, ConfigSource, DirConfigSource, DirLevelSource,
    Engine, Key, ScriptedInput, Session,
};

const FRAMES: u64 = 300;

/// Walk right, jump, clap, switch to the second level and walk into the big
/// enemy there.
fn script() -> ScriptedInput {
    ScriptedInput::new()
        .press(10, Key::Right)
        .press(40, Key::Space)
        .press(60, Key::E)
        .release(66, Key::E)
        .release(120, Key::Right)
        .press(150, Key::Digit(2))
        .press(160, Key::D)
        .press(200, Key::E)
        .release(210, Key::E)
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let root = env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data"));

    let config = DirConfigSource::new(&root);
    let game_config = config.section("game")?;

    let manifest_path = root.join("assets.json");
    let manifest = fs::read_to_string(&manifest_path)
        .with_context(|| format!("reading {}", manifest_path.display()))?;
    let mut assets = AssetManager::new();
    assets.load_manifest(&manifest)?;

    let levels = DirLevelSource::new(root.join("levels"));
    let mut session = Session::new(&game_config, &config, assets, Box::new(levels))?;

    let mut renderer = CommandBuffer::new();
    let mut audio = AudioSystem::new();
    let frames = Engine::new()
        .with_max_frames(FRAMES)
        .with_frame_time(Duration::from_secs_f32(1.0 / 60.0))
        .run(&mut session, &mut renderer, &mut script(), &mut audio)?;

    let player = session.player();
    log::info!(
        "Ran {} frames on `{}`: player at ({:.1}, {:.1}), {} enemies left, {} waves, {} draw calls in last frame",
        frames,
        session.level().name(),
        player.x(),
        player.y(),
        session.level().entities().len(),
        session.waves().len(),
        renderer.commands().len()
    );
    Ok(())
}
