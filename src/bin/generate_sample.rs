use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::Serialize;

/// One survey row, serialized with the public dataset's header names.
#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct SurveyRow {
    #[serde(rename = "Student_ID")]
    student_id: u32,
    age: u32,
    gender: &'static str,
    #[serde(rename = "Academic_Level")]
    academic_level: &'static str,
    country: &'static str,
    #[serde(rename = "Avg_Daily_Usage_Hours")]
    avg_daily_usage_hours: f64,
    #[serde(rename = "Most_Used_Platform")]
    most_used_platform: &'static str,
    #[serde(rename = "Affects_Academic_Performance")]
    affects_academic_performance: &'static str,
    #[serde(rename = "Sleep_Hours_Per_Night")]
    sleep_hours_per_night: f64,
    #[serde(rename = "Mental_Health_Score")]
    mental_health_score: u32,
    #[serde(rename = "Conflicts_Over_Social_Media")]
    conflicts_over_social_media: u32,
    #[serde(rename = "Addicted_Score")]
    addicted_score: u32,
}

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

    fn pick<T: Copy>(&mut self, items: &[T]) -> T {
        items[(self.next_u64() % items.len() as u64) as usize]
    }
}

const GENDERS: [&str; 2] = ["Female", "Male"];
const LEVELS: [(&str, u32, u32); 3] = [
    ("High School", 16, 18),
    ("Undergraduate", 18, 22),
    ("Graduate", 22, 26),
];
const COUNTRIES: [&str; 8] = [
    "Bangladesh", "India", "USA", "UK", "Canada", "Germany", "Japan", "Brazil",
];
/// (platform, extra daily hours on top of the baseline)
const PLATFORMS: [(&str, f64); 7] = [
    ("Instagram", 1.0),
    ("TikTok", 1.4),
    ("Facebook", 0.2),
    ("YouTube", 0.6),
    ("Twitter", 0.0),
    ("Snapchat", 0.8),
    ("LinkedIn", -1.0),
];

const ROWS: u32 = 500;

fn main() -> Result<()> {
    let output_path = std::env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("sample_students.csv"));

    let mut rng = SimpleRng::new(42);
    let mut writer = csv::Writer::from_path(&output_path)
        .with_context(|| format!("creating {}", output_path.display()))?;

    for id in 1..=ROWS {
        let (level, min_age, max_age) = rng.pick(&LEVELS);
        let (platform, extra) = rng.pick(&PLATFORMS);
        let age = min_age + (rng.next_u64() % u64::from(max_age - min_age + 1)) as u32;

        let usage = (rng.gauss(4.2, 1.1) + extra).clamp(1.0, 9.0);
        // Sleep and mental health fall as usage rises.
        let sleep = (9.2 - 0.55 * usage + rng.gauss(0.0, 0.5)).clamp(3.5, 9.5);
        let mental = (10.5 - 0.9 * usage + rng.gauss(0.0, 0.6)).round().clamp(3.0, 9.0) as u32;
        let addicted = (1.3 * usage - 0.5 + rng.gauss(0.0, 0.7)).round().clamp(1.0, 10.0) as u32;
        let conflicts = ((usage - 2.0) * 0.8 + rng.gauss(0.0, 0.5)).round().clamp(0.0, 5.0) as u32;

        writer
            .serialize(SurveyRow {
                student_id: id,
                age,
                gender: rng.pick(&GENDERS),
                academic_level: level,
                country: rng.pick(&COUNTRIES),
                avg_daily_usage_hours: (usage * 10.0).round() / 10.0,
                most_used_platform: platform,
                affects_academic_performance: if usage > 4.5 { "Yes" } else { "No" },
                sleep_hours_per_night: (sleep * 10.0).round() / 10.0,
                mental_health_score: mental,
                conflicts_over_social_media: conflicts,
                addicted_score: addicted,
            })
            .with_context(|| format!("writing row {id}"))?;
    }
    writer.flush().context("flushing CSV")?;

    println!("Wrote {ROWS} students to {}", output_path.display());
    Ok(())
}
