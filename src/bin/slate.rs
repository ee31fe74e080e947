//! Headless composition demo: renders one sample stroke per pen preset to a
//! PNG file.

use std::fs::File;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use inkslate::draw::{PenProfile, TouchSample, profile::ProfileSet};
use inkslate::pen::SimplePen;
use inkslate::render::{NormalRenderer, RenderContext, Renderer};

#[derive(Parser, Debug)]
#[command(name = "slate")]
#[command(version, about = "Composite demo strokes to a PNG image")]
struct Cli {
    /// Canvas width in pixels
    #[arg(long, default_value_t = 800)]
    width: i32,

    /// Canvas height in pixels
    #[arg(long, default_value_t = 600)]
    height: i32,

    /// Output PNG path
    #[arg(long, short = 'o', default_value = "slate.png")]
    output: PathBuf,

    /// Optional TOML file with [[profiles]] entries overriding the stock pens
    #[arg(long)]
    profiles: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let profiles = match &cli.profiles {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("reading profiles from {}", path.display()))?;
            ProfileSet::from_toml(&text).context("parsing pen profiles")?
        }
        None => PenProfile::default_profiles(),
    };

    let shapes: Vec<_> = profiles
        .iter()
        .enumerate()
        .map(|(row, profile)| demo_stroke(profile, row, cli.width, cli.height, profiles.len()))
        .collect();

    let pen = SimplePen::new();
    let renderer = NormalRenderer::new();
    let mut ctx = RenderContext::new(cli.width, cli.height)?;
    renderer.render_to_bitmap(&shapes, &mut ctx, &pen)?;

    let buffer = ctx.into_buffer();
    let mut file = File::create(&cli.output)
        .with_context(|| format!("creating {}", cli.output.display()))?;
    buffer
        .surface()
        .write_to_png(&mut file)
        .context("encoding PNG")?;

    log::info!(
        "wrote {} strokes to {}",
        shapes.len(),
        cli.output.display()
    );
    Ok(())
}

/// One wavy stroke across the canvas with a pressure swell in the middle.
fn demo_stroke(
    profile: &PenProfile,
    row: usize,
    width: i32,
    height: i32,
    rows: usize,
) -> inkslate::draw::Shape {
    let mut shape = profile.make_shape();
    let band = f64::from(width.max(1));
    let y_base = (row as f64 + 0.5) / rows.max(1) as f64;
    let steps = 64;
    for i in 0..=steps {
        let t = i as f64 / steps as f64;
        let x = 20.0 + t * (band - 40.0);
        let y = y_base * f64::from(height.max(1)) + (t * std::f64::consts::TAU * 2.0).sin() * 18.0;
        let pressure = 4096.0 * (0.3 + 0.7 * (t * std::f64::consts::PI).sin());
        shape.push_sample(TouchSample::new(x, y, pressure, i as u64 * 4));
    }
    shape
}
