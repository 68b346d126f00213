use anyhow::anyhow;
use clap::Parser;
use globe_views::config::{load_lines, load_scene};
use globe_views::crossview::reproject_line;
use globe_views::export::paths as export_paths;
use globe_views::projection::Projection;
use globe_views::scene::SceneState;
use std::path::{Path, PathBuf};

/// Reproject every line of a scene into each view and export the paths as CSV.
#[derive(Parser, Debug)]
#[command(author, version, about = "Cross-view line reprojection (CSV)")]
struct Cli {
    /// Scene manifest (TOML or YAML)
    #[arg(long, default_value = "configs/scene.toml")]
    scene: PathBuf,

    /// Line catalog replacing the scene's own lines (YAML list, TOML file or directory)
    #[arg(long)]
    lines: Option<PathBuf>,

    /// Samples per line (defaults to the scene setting)
    #[arg(long)]
    samples: Option<usize>,

    /// Target views (repeatable; defaults to all)
    #[arg(long = "target")]
    targets: Vec<Projection>,

    /// Output CSV file (use '-' for stdout)
    #[arg(long, default_value = "artifacts/lines.csv")]
    output: PathBuf,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();

    let mut config = load_scene(&cli.scene)?;
    if let Some(catalog) = &cli.lines {
        config.lines = load_lines(catalog)?;
    }
    if config.lines.is_empty() {
        return Err(anyhow!("no lines to reproject in {}", cli.scene.display()));
    }
    let scene = SceneState::from_config(&config)?;
    let samples = cli.samples.unwrap_or(scene.samples()).max(1);
    let targets: Vec<Projection> = if cli.targets.is_empty() {
        Projection::ALL.to_vec()
    } else {
        cli.targets.clone()
    };

    let to_stdout = cli.output.as_path() == Path::new("-");
    if !to_stdout {
        println!("=== Lines ({samples} samples) ===");
        println!(
            "{:<24} {:<10} {:>12} {:>12} {:>8}",
            "name", "drawn on", "geodesic km", "drawn km", "ratio"
        );
    }

    let mut writer = export_paths::create(&cli.output)?;
    export_paths::write_header(&mut writer)?;

    for line in scene.lines() {
        let segment = &line.segment;
        if !to_stdout {
            let report = segment.report(samples);
            println!(
                "{:<24} {:<10} {:>12.1} {:>12.1} {:>8.3}",
                line.name,
                segment.source().label(),
                report.geodesic_km,
                report.drawn_path_km,
                report.detour_ratio
            );
        }

        for &target in &targets {
            let path = reproject_line(segment, target, samples);
            if path.is_empty() {
                log::warn!("line '{}' has no path on the {target} view", line.name);
            }
            for (segment_idx, points) in path.segments.iter().enumerate() {
                for (index, point) in points.iter().enumerate() {
                    let [x, y, z] = point.xyz();
                    let record = export_paths::Record {
                        line: &line.name,
                        source: segment.source().label(),
                        target: target.label(),
                        segment: segment_idx,
                        index,
                        x,
                        y,
                        z,
                    };
                    record.write_to(&mut writer)?;
                }
            }
        }
    }

    writer.flush()?;
    Ok(())
}
