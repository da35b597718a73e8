//! Five seconds of a circle sliding across the frame, as YUV4MPEG2.
use pixmill::{Canvas, Color, Fps, Y4mWriter, draw};

const WIDTH: u32 = 1600;
const HEIGHT: u32 = 900;
const FPS: u32 = 30;
const DURATION_SECS: u32 = 5;
const RADIUS: i32 = 50;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let mut c = Canvas::new(WIDTH, HEIGHT)?;
    let mut writer = Y4mWriter::create(
        "target/demos/basic_video.y4m",
        WIDTH,
        HEIGHT,
        Fps::whole(FPS)?,
    )?;

    let total = FPS * DURATION_SECS;
    let travel = (WIDTH as i32 - 2 * RADIUS) as f32;
    for frame in 0..total {
        let t = frame as f32 / (total - 1) as f32;
        c.clear(Color(0x0322_2DFF));
        let x = RADIUS + (t * travel) as i32;
        draw::circle_fill(&mut c, x, HEIGHT as i32 / 2, RADIUS, Color(0xFFFF_00FF));
        writer.write_frame(&c)?;
    }
    writer.close()?;

    eprintln!("wrote target/demos/basic_video.y4m ({total} frames)");
    Ok(())
}
