use clap::Parser;
use globe_views::config::{load_outlines, load_scene};
use globe_views::core::{GeoCoordinate, SimulatedInstant};
use globe_views::crossview::{ProjectedPath, outline, reproject_line};
use globe_views::projection::{ProjectedPoint, Projection};
use globe_views::scene::SceneState;
use globe_views::solar;
use plotters::coord::types::RangedCoordf64;
use plotters::prelude::*;
use std::f64::consts::PI;
use std::fs;
use std::path::PathBuf;

/// Render the Mercator, flat-Earth and globe views of a scene side by side.
#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Render the three synchronized map views of a scene to PNG"
)]
struct Cli {
    /// Scene manifest (TOML or YAML)
    #[arg(long, default_value = "configs/scene.toml")]
    scene: PathBuf,
    #[arg(long, default_value = "artifacts/views.png")]
    output: PathBuf,
    /// Override the scene's day of the year
    #[arg(long)]
    day: Option<i64>,
    /// Override the scene's hour of the day
    #[arg(long)]
    hour: Option<f64>,
    /// Longitude the globe view is centred on
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    globe_lon: f64,
    #[arg(long, default_value_t = 1800)]
    width: u32,
    #[arg(long, default_value_t = 640)]
    height: u32,
}

/// Which panel a path is being drawn into.
#[derive(Debug, Clone, Copy)]
enum Panel {
    Mercator,
    Azimuthal,
    /// Orthographic view of the globe from above the given longitude.
    Globe { center_lon_rad: f64 },
}

impl Panel {
    fn projection(self) -> Projection {
        match self {
            Panel::Mercator => Projection::Mercator,
            Panel::Azimuthal => Projection::Azimuthal,
            Panel::Globe { .. } => Projection::Sphere,
        }
    }

    fn title(self) -> &'static str {
        match self {
            Panel::Mercator => "Mercator",
            Panel::Azimuthal => "Flat Earth (azimuthal equidistant)",
            Panel::Globe { .. } => "Globe",
        }
    }

    fn extent(self) -> (f64, f64) {
        match self {
            Panel::Mercator => (PI, PI),
            Panel::Azimuthal | Panel::Globe { .. } => (1.05, 1.05),
        }
    }

    /// Screen position of a projected point, or `None` on the far side of the globe.
    fn screen(self, point: &ProjectedPoint) -> Option<(f64, f64)> {
        match (self, point) {
            (Panel::Globe { center_lon_rad }, ProjectedPoint::Space(v)) => {
                // camera looks down on center_lon from outside; screen x runs east
                let (s, c) = center_lon_rad.sin_cos();
                let depth = v[0] * c - v[2] * s;
                if depth < 0.0 {
                    return None;
                }
                Some((-v[0] * s - v[2] * c, v[1]))
            }
            (_, ProjectedPoint::Plane(p)) => Some((p.x, p.y)),
            _ => None,
        }
    }

    /// Screen polylines for a path, broken where the globe hides part of it.
    fn polylines(self, path: &ProjectedPath) -> Vec<Vec<(f64, f64)>> {
        let mut out = Vec::new();
        for segment in &path.segments {
            let mut current = Vec::new();
            for point in segment {
                match self.screen(point) {
                    Some(p) => current.push(p),
                    None if !current.is_empty() => out.push(std::mem::take(&mut current)),
                    None => {}
                }
            }
            if !current.is_empty() {
                out.push(current);
            }
        }
        out
    }
}

const LINE_COLORS: [RGBColor; 6] = [
    RGBColor(214, 39, 40),
    RGBColor(31, 119, 180),
    RGBColor(44, 160, 44),
    RGBColor(148, 103, 189),
    RGBColor(255, 127, 14),
    RGBColor(23, 190, 207),
];

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();

    let config = load_scene(&cli.scene)?;
    let mut scene = SceneState::from_config(&config)?;
    if cli.day.is_some() || cli.hour.is_some() {
        let current = scene.instant();
        scene.set_instant(SimulatedInstant::new(
            cli.day.unwrap_or(current.day_of_year() as i64),
            cli.hour.unwrap_or(current.hour_of_day()),
        ));
    }
    let outlines = match &config.outlines {
        Some(path) => load_outlines(path)?,
        None => Vec::new(),
    };
    log::info!(
        "rendering {} line(s) and {} outline ring(s) at {}",
        scene.lines().len(),
        outlines.len(),
        scene.instant()
    );

    if let Some(parent) = cli.output.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let output_str = cli
        .output
        .to_str()
        .ok_or_else(|| anyhow::anyhow!("Output path contains invalid UTF-8"))?;
    let root = BitMapBackend::new(output_str, (cli.width, cli.height)).into_drawing_area();
    root.fill(&WHITE)?;

    let panels = [
        Panel::Mercator,
        Panel::Azimuthal,
        Panel::Globe {
            center_lon_rad: cli.globe_lon.to_radians(),
        },
    ];
    let areas = root.split_evenly((1, panels.len()));
    let font_family = select_font_family();

    let graticule = graticule_rings();
    let sun = solar::subsolar_point(&scene.instant());
    let terminator = solar::terminator(&scene.instant(), 180);

    for (panel, area) in panels.iter().zip(areas.iter()) {
        let panel = *panel;
        let target = panel.projection();
        let (half_w, half_h) = panel.extent();
        let caption = format!("{} | {}", panel.title(), scene.instant());
        let mut chart = ChartBuilder::on(area)
            .margin(12)
            .caption(caption, FontDesc::new(font_family, 18.0, FontStyle::Bold))
            .build_cartesian_2d(-half_w..half_w, -half_h..half_h)?;

        match panel {
            Panel::Mercator => {
                draw_polyline(
                    &mut chart,
                    vec![(-PI, -PI), (PI, -PI), (PI, PI), (-PI, PI), (-PI, -PI)],
                    &BLACK,
                    1,
                )?;
            }
            Panel::Azimuthal | Panel::Globe { .. } => {
                let rim = (0..=360)
                    .map(|deg| {
                        let (s, c) = (deg as f64).to_radians().sin_cos();
                        (c, s)
                    })
                    .collect();
                draw_polyline(&mut chart, rim, &BLACK, 1)?;
            }
        }

        for ring in &graticule {
            let path = outline::project_ring(ring, target);
            for poly in panel.polylines(&path) {
                draw_polyline(&mut chart, poly, &RGBColor(200, 200, 200), 1)?;
            }
        }

        for path in outline::project_rings(outlines.iter().map(Vec::as_slice), target) {
            for poly in panel.polylines(&path) {
                draw_polyline(&mut chart, poly, &RGBColor(90, 120, 90), 1)?;
            }
        }

        let night_edge = outline::project_ring(&terminator, target);
        for poly in panel.polylines(&night_edge) {
            draw_polyline(&mut chart, poly, &RGBColor(40, 40, 40), 2)?;
        }

        if let Some(pos) = panel.screen(&target.forward(&sun)) {
            chart.draw_series(std::iter::once(Circle::new(
                pos,
                7,
                RGBColor(250, 190, 0).filled(),
            )))?;
        }

        for (idx, line) in scene.lines().iter().enumerate() {
            let color = LINE_COLORS[idx % LINE_COLORS.len()];
            let path = reproject_line(&line.segment, target, scene.samples());
            for poly in panel.polylines(&path) {
                draw_polyline(&mut chart, poly, &color, 2)?;
            }
            if let Some(pos) = panel.screen(&target.forward(&line.segment.start())) {
                chart.draw_series(std::iter::once(Text::new(
                    line.name.clone(),
                    pos,
                    FontDesc::new(font_family, 14.0, FontStyle::Normal).color(&color),
                )))?;
            }
        }
    }

    root.present()?;
    Ok(())
}

fn draw_polyline<DB: DrawingBackend>(
    chart: &mut ChartContext<DB, Cartesian2d<RangedCoordf64, RangedCoordf64>>,
    points: Vec<(f64, f64)>,
    color: &RGBColor,
    width: u32,
) -> Result<(), DrawingAreaErrorKind<DB::ErrorType>> {
    if points.len() < 2 {
        return Ok(());
    }
    chart.draw_series(std::iter::once(PathElement::new(
        points,
        ShapeStyle::from(color).stroke_width(width),
    )))?;
    Ok(())
}

/// Parallels and meridians every 30°, densified so they curve correctly in every view.
fn graticule_rings() -> Vec<Vec<GeoCoordinate>> {
    let mut rings = Vec::new();
    for lat in [-60.0, -30.0, 0.0, 30.0, 60.0] {
        rings.push(
            (0..=180)
                .map(|i| GeoCoordinate::new(lat, -180.0 + i as f64 * 2.0))
                .collect(),
        );
    }
    for k in 0..12 {
        let lon = -180.0 + k as f64 * 30.0;
        rings.push(
            (0..=90)
                .map(|i| GeoCoordinate::new(-90.0 + i as f64 * 2.0, lon))
                .collect(),
        );
    }
    rings
}

fn select_font_family() -> FontFamily<'static> {
    if cfg!(target_os = "macos") {
        FontFamily::Name("Helvetica")
    } else if cfg!(target_os = "windows") {
        FontFamily::Name("Arial")
    } else {
        FontFamily::Name("DejaVu Sans")
    }
}
