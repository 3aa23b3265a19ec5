//! Generate a deterministic sample time-series CSV for trying out the tool:
//!
//! ```text
//! cargo run --bin generate_sample [output.csv]
//! ```
//!
//! One year of daily readings with a seasonal temperature curve and a noisy
//! flow column, plus a few pre-existing gaps.

use anyhow::{Context, Result};
use chrono::NaiveDate;

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }
}

fn main() -> Result<()> {
    let out = std::env::args().nth(1).unwrap_or_else(|| "sample.csv".to_string());
    let mut rng = SimpleRng::new(42);

    let start = NaiveDate::from_ymd_opt(2024, 1, 1).context("invalid start date")?;
    let n_days = 366;

    let mut writer = csv::Writer::from_path(&out)
        .with_context(|| format!("creating {out}"))?;
    writer.write_record(["date", "temperature", "flow"])?;

    for day in 0..n_days {
        let date = start + chrono::Days::new(day);
        let season = (day as f64 / 365.25) * std::f64::consts::TAU;

        let temperature = 12.0 - 9.0 * season.cos() + rng.gauss(0.0, 1.2);
        let flow = (35.0 + 20.0 * (season + 1.0).sin() + rng.gauss(0.0, 4.0)).max(0.0);

        // Leave an occasional gap so the loaded file already shows some.
        let temperature_field = if rng.next_f64() < 0.02 {
            String::new()
        } else {
            format!("{temperature:.2}")
        };

        writer.write_record([
            date.format("%Y-%m-%d").to_string(),
            temperature_field,
            format!("{flow:.2}"),
        ])?;
    }

    writer.flush().context("flushing CSV")?;
    println!("Wrote {n_days} rows to {out}");
    Ok(())
}
