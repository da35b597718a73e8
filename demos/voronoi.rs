//! Nearest-sample Voronoi regions with the samples marked.
use pixmill::{Canvas, Color, draw};

const WIDTH: u32 = 1600;
const HEIGHT: u32 = 900;
const SAMPLE_RADIUS: u32 = 10;
const N_SAMPLES: usize = 4;

struct Sample {
    x: u32,
    y: u32,
    color: Color,
}

/// splitmix64, seeded from the clock.
struct Rng(u64);

impl Rng {
    fn next(&mut self) -> u64 {
        self.0 = self.0.wrapping_add(0x9E37_79B9_7F4A_7C15);
        let mut z = self.0;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^ (z >> 31)
    }

    fn below(&mut self, n: u32) -> u32 {
        (self.next() % u64::from(n)) as u32
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let seed = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0x5EED);
    let mut rng = Rng(seed);

    let samples: Vec<Sample> = (0..N_SAMPLES)
        .map(|_| Sample {
            x: SAMPLE_RADIUS + rng.below(WIDTH - 2 * SAMPLE_RADIUS),
            y: SAMPLE_RADIUS + rng.below(HEIGHT - 2 * SAMPLE_RADIUS),
            color: Color::rgb(rng.below(256) as u8, rng.below(256) as u8, rng.below(256) as u8),
        })
        .collect();

    let mut c = Canvas::new(WIDTH, HEIGHT)?;
    c.clear(Color::WHITE);
    for y in 0..HEIGHT {
        for x in 0..WIDTH {
            let nearest = samples.iter().min_by_key(|s| {
                let dx = i64::from(x) - i64::from(s.x);
                let dy = i64::from(y) - i64::from(s.y);
                dx * dx + dy * dy
            });
            if let Some(s) = nearest {
                c.set(x as i32, y as i32, s.color);
            }
        }
    }
    for s in &samples {
        draw::circle_fill(&mut c, s.x as i32, s.y as i32, SAMPLE_RADIUS as i32, Color::BLACK);
    }

    pixmill::write_canvas_png("target/demos/voronoi.png", &c)?;
    eprintln!("wrote target/demos/voronoi.png");
    Ok(())
}
