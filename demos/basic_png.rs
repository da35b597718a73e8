//! Clear a 1600x900 canvas and save it as a PNG.
use pixmill::{Canvas, Color};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let mut c = Canvas::new(1600, 900)?;
    c.clear(Color(0x0022_2DFF));
    pixmill::write_canvas_png("target/demos/basic_png.png", &c)?;
    eprintln!("wrote target/demos/basic_png.png");
    Ok(())
}
