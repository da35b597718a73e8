use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "pixmill", version)]
struct Cli {
    /// Log encoder activity to stderr (repeat for more detail).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a scene as a PNG.
    Frame(FrameArgs),
    /// Render a scene as a YUV4MPEG2 video, shifting its shapes every frame.
    Video(VideoArgs),
}

#[derive(Parser, Debug)]
struct FrameArgs {
    /// Input scene JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct VideoArgs {
    /// Input scene JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output Y4M path.
    #[arg(long)]
    out: PathBuf,

    /// Number of frames to write.
    #[arg(long, default_value_t = 30)]
    frames: u32,

    /// Frames per second (numerator).
    #[arg(long, default_value_t = 30)]
    fps: u32,

    /// Frame rate denominator.
    #[arg(long, default_value_t = 1)]
    fps_den: u32,

    /// Horizontal shape offset added per frame, in pixels.
    #[arg(long, default_value_t = 1, allow_hyphen_values = true)]
    dx: i32,

    /// Vertical shape offset added per frame, in pixels.
    #[arg(long, default_value_t = 0, allow_hyphen_values = true)]
    dy: i32,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    match cli.cmd {
        Command::Frame(args) => cmd_frame(args),
        Command::Video(args) => cmd_video(args),
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let scene = pixmill::Scene::from_path(&args.in_path)?;
    let canvas = scene.render()?;

    pixmill::write_canvas_png(&args.out, &canvas)
        .with_context(|| format!("write png '{}'", args.out.display()))?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_video(args: VideoArgs) -> anyhow::Result<()> {
    let scene = pixmill::Scene::from_path(&args.in_path)?;
    let fps = pixmill::Fps::new(args.fps, args.fps_den)?;
    let mut canvas = pixmill::Canvas::new(scene.canvas.width, scene.canvas.height)?;

    let mut writer =
        pixmill::Y4mWriter::create(&args.out, canvas.width(), canvas.height(), fps)
            .with_context(|| format!("open y4m '{}'", args.out.display()))?;
    for frame in 0..args.frames {
        let step = i32::try_from(frame).unwrap_or(i32::MAX);
        scene.draw_offset(
            &mut canvas,
            args.dx.saturating_mul(step),
            args.dy.saturating_mul(step),
        );
        writer.write_frame(&canvas)?;
    }
    writer.close()?;

    eprintln!(
        "wrote {} ({} frames, {:.2}s)",
        args.out.display(),
        args.frames,
        fps.frames_to_secs(u64::from(args.frames))
    );
    Ok(())
}
