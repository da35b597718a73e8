//! Smooth-colored Mandelbrot set.
use pixmill::{Canvas, Color};

const WIDTH: u32 = 1600;
const HEIGHT: u32 = 900;
const MAX_ITERS: u32 = 1000;

fn palette(t: f64) -> Color {
    let tau = std::f64::consts::TAU;
    let channel = |phase: f64| ((0.5 + 0.5 * (tau * (t + phase)).cos()).clamp(0.0, 1.0) * 255.0) as u8;
    Color::rgb(channel(0.0), channel(0.33), channel(0.67))
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let mut c = Canvas::new(WIDTH, HEIGHT)?;
    let (xc, yc, xr) = (-0.75, 0.0, 1.75);
    let yr = xr * f64::from(HEIGHT) / f64::from(WIDTH);

    for y in 0..HEIGHT {
        let ci = yc + ((f64::from(y) / f64::from(HEIGHT - 1)) * 2.0 - 1.0) * yr;
        for x in 0..WIDTH {
            let cr = xc + ((f64::from(x) / f64::from(WIDTH - 1)) * 2.0 - 1.0) * xr;

            let (mut zr, mut zi) = (0.0f64, 0.0f64);
            let mut n = 0;
            while n < MAX_ITERS {
                let (zr2, zi2) = (zr * zr, zi * zi);
                if zr2 + zi2 > 4.0 {
                    break;
                }
                zi = 2.0 * zr * zi + ci;
                zr = zr2 - zi2 + cr;
                n += 1;
            }

            let color = if n == MAX_ITERS {
                Color::BLACK
            } else {
                let log_zn = 0.5 * (zr * zr + zi * zi).ln();
                let nu = f64::from(n) + 1.0 - log_zn.ln() / std::f64::consts::LN_2;
                palette(nu / f64::from(MAX_ITERS))
            };
            c.set(x as i32, y as i32, color);
        }
    }

    pixmill::write_canvas_png("target/demos/mandelbrot.png", &c)?;
    eprintln!("wrote target/demos/mandelbrot.png");
    Ok(())
}
