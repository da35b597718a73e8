//! Draw every primitive once into caller-owned storage.
use pixmill::{Canvas, Color, Rect, draw};

const WIDTH: u32 = 1600;
const HEIGHT: u32 = 900;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let mut storage = vec![0u32; (WIDTH * HEIGHT) as usize];
    let mut c = Canvas::from_slice(WIDTH, HEIGHT, &mut storage[..])?;
    c.clear(Color(0x0022_2DFF));

    let magenta = Color(0xFF00_FFFF);
    let yellow = Color::rgb(255, 255, 0);
    let cyan = Color::rgb(0, 255, 255);

    draw::rect(&mut c, Rect::new(0, 0, 200, 200), magenta);
    draw::rect_fill(&mut c, Rect::new(250, 50, 300, 150), Color::rgb(200, 40, 40));
    draw::line(&mut c, 0, 899, 1599, 0, Color::WHITE);
    draw::circle(&mut c, 800, 450, 120, yellow);
    draw::circle_fill(&mut c, 1300, 200, 90, cyan);
    draw::triangle(&mut c, 100, 800, 400, 500, 600, 850, yellow);
    draw::triangle_fill(&mut c, 1000, 850, 1250, 550, 1550, 820, magenta);
    // Partly off-canvas shapes are clipped.
    draw::circle_fill(&mut c, 1600, 900, 150, Color::rgb(40, 200, 40));

    pixmill::write_canvas_png("target/demos/basic_shapes.png", &c)?;
    eprintln!("wrote target/demos/basic_shapes.png");
    Ok(())
}
