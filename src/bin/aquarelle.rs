use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use rand::{Rng, SeedableRng};

#[derive(Parser, Debug)]
#[command(name = "aquarelle", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Paint a random scattering of blooms and write a PNG.
    Paint(PaintArgs),
    /// Render a scene JSON to a PNG.
    Scene(SceneArgs),
}

#[derive(Parser, Debug)]
struct PaintArgs {
    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// Canvas width in pixels.
    #[arg(long, default_value_t = 1024)]
    width: u32,

    /// Canvas height in pixels.
    #[arg(long, default_value_t = 768)]
    height: u32,

    /// Number of paint events.
    #[arg(long, default_value_t = 12)]
    strokes: u32,

    /// Determinism seed; omitted means a fresh random painting each run.
    #[arg(long)]
    seed: Option<u64>,

    /// Brush configuration JSON (all fields optional).
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct SceneArgs {
    /// Input scene JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match cli.cmd {
        Command::Paint(args) => cmd_paint(args),
        Command::Scene(args) => cmd_scene(args),
    }
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path, what: &str) -> anyhow::Result<T> {
    let f = File::open(path).with_context(|| format!("open {what} '{}'", path.display()))?;
    let r = BufReader::new(f);
    serde_json::from_reader(r).with_context(|| format!("parse {what} JSON"))
}

fn cmd_paint(args: PaintArgs) -> anyhow::Result<()> {
    let brush = match &args.config {
        Some(path) => read_json::<aquarelle::BrushConfig>(path, "brush config")?,
        None => aquarelle::BrushConfig::default(),
    };
    brush.validate()?;

    let canvas = aquarelle::CanvasSize::new(args.width, args.height)?;
    let seed = args.seed.unwrap_or_else(|| rand::rng().random());

    // Scatter the strokes with the same seeded generator family the
    // renderer uses, so --seed reproduces the whole painting.
    let palette = aquarelle::Palette::default();
    let mut rng = rand_pcg::Pcg32::seed_from_u64(seed ^ 0x5EED);
    let margin = f64::from(args.width.min(args.height)) * 0.1;
    let strokes = (0..args.strokes)
        .map(|_| aquarelle::StrokeEvent {
            x: rng.random_range(margin..f64::from(args.width) - margin),
            y: rng.random_range(margin..f64::from(args.height) - margin),
            color: palette.color(rng.random_range(0..palette.len())),
        })
        .collect();

    let scene = aquarelle::Scene {
        canvas,
        background: aquarelle::Rgba8::opaque(250, 247, 240),
        seed,
        brush,
        strokes,
    };

    let surface = aquarelle::render_scene(&scene)?;
    write_png(&surface, &args.out)?;
    eprintln!("wrote {} (seed {seed})", args.out.display());
    Ok(())
}

fn cmd_scene(args: SceneArgs) -> anyhow::Result<()> {
    let scene: aquarelle::Scene = read_json(&args.in_path, "scene")?;
    scene.validate()?;

    let surface = aquarelle::render_scene(&scene)?;
    write_png(&surface, &args.out)?;
    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn write_png(surface: &aquarelle::PaintSurface, out: &Path) -> anyhow::Result<()> {
    if let Some(parent) = out.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    surface
        .write_png(out)
        .with_context(|| format!("write png '{}'", out.display()))?;
    Ok(())
}
