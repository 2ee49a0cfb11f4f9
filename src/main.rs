use std::path::PathBuf;

use clap::Parser;
use tracing::{debug, error, info};
use tracing_subscriber::EnvFilter;

use chess3d::{Board, Direction, RecordingBackend, Scene, ThemeConfig, Themes};

/// Load a theme, play one move and record the frames.
#[derive(Parser, Debug)]
#[command(name = "chess3d")]
struct Args {
    /// Directory holding `pieces/` and `boards/`.
    #[arg(long, default_value = "data")]
    data_dir: PathBuf,

    /// Theme file; the built-in defaults are used without one.
    #[arg(long)]
    themes: Option<PathBuf>,

    /// Theme to pick from the theme file.
    #[arg(long)]
    theme: Option<String>,

    #[arg(long, default_value_t = 90)]
    frames: u32,

    /// Simulated milliseconds per frame.
    #[arg(long, default_value_t = 16)]
    frame_ms: u64,

    #[arg(long)]
    reflections: bool,
}

fn pick_theme(args: &Args) -> chess3d::Result<ThemeConfig> {
    let Some(path) = &args.themes else {
        return Ok(ThemeConfig::default());
    };

    let themes = Themes::load(path)?;
    match &args.theme {
        Some(name) => themes.find(name).cloned(),
        None => Ok(themes.themes.into_iter().next().unwrap_or_default()),
    }
}

fn run(args: &Args) -> chess3d::Result<()> {
    let theme = pick_theme(args)?;

    let mut backend = RecordingBackend::new();
    let mut scene = Scene::new();
    scene.load_theme(&mut backend, &theme, &args.data_dir)?;

    // e2-e4: the board already shows the result, the animation slides the
    // pawn into place.
    let mut board = Board::standard();
    board.move_piece(12, 28)?;
    scene.start_piece_move(12, 28, 0)?;
    scene.select_square(Some(28))?;

    let mut draws = 0;
    let mut bytes = 0;
    let mut finished_at = None;

    for frame in 0..args.frames {
        let now = frame as u64 * args.frame_ms;

        scene.move_camera(0.0, -1.0);
        if frame % 30 == 29 {
            scene.move_selector(Direction::Up);
        }

        scene.render_frame(&mut backend, &board, args.reflections, now);

        let frame_draws = backend.draws().count();
        debug!("frame {frame}: {frame_draws} draws, {} vertex bytes", backend.vertex_bytes());
        draws += frame_draws;
        bytes += backend.vertex_bytes();
        backend.take_commands();

        if finished_at.is_none() && scene.is_piece_move_done() {
            finished_at = Some(now);
        }
    }

    match finished_at {
        Some(ms) => info!("move finished after {ms} ms"),
        None => info!("move still in flight after {} frames", args.frames),
    }
    info!(
        "{} frames, {draws} draws, {bytes} vertex bytes, camera pitch {} yaw {}",
        args.frames,
        scene.camera().pitch(),
        scene.camera().yaw(),
    );

    scene.unload_resources(&mut backend);
    Ok(())
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();
    if let Err(e) = run(&args) {
        error!("{e}");
        std::process::exit(1);
    }
}
