//! Tile render command.
//!
//! Renders a travel-time tile over a synthetic lattice network, or a legend
//! strip, and writes it to disk as an image.

mod network;

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{bail, Context, Result};
use clap::{Args as ClapArgs, Parser, Subcommand};
use tracing::{debug, info};
use tracing_subscriber::{fmt, EnvFilter};

use analyst_common::{
    BoundingBox, CrsCode, GridGeometry, LinearCombination, RenderRequest, RenderStyle,
    TileRequest,
};
use projection::transform_point;
use renderer::{
    ColorRampSet, DynamicSamples, LegendFont, LegendRenderer, Surface, TileRenderer,
};

use network::LatticeNetwork;

#[derive(Parser, Debug)]
#[command(name = "tile-render")]
#[command(about = "Render travel-time tiles and legends")]
struct Args {
    /// Log level
    #[arg(long, default_value = "info", env = "RUST_LOG")]
    log_level: String,

    /// Emit logs as JSON
    #[arg(long, env = "LOG_JSON")]
    json: bool,

    /// JSON file with color ramps overriding the built-in ones
    #[arg(long, env = "RAMP_FILE")]
    ramps: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a tile of travel times from one origin, or the difference between two
    Tile(TileArgs),
    /// Render the legend of a style
    Legend(LegendArgs),
}

#[derive(ClapArgs, Debug)]
struct TileArgs {
    /// Bounding box as minx,miny,maxx,maxy
    #[arg(long, env = "TILE_BBOX", default_value = "-122.75,45.45,-122.55,45.60")]
    bbox: String,

    #[arg(long, env = "TILE_CRS", default_value = "EPSG:4326")]
    crs: String,

    #[arg(long, env = "TILE_WIDTH", default_value_t = 256)]
    width: u32,

    #[arg(long, env = "TILE_HEIGHT", default_value_t = 256)]
    height: u32,

    #[arg(long, env = "TILE_STYLE", default_value = "temporal")]
    style: String,

    /// Origin as lon,lat (defaults to the tile center)
    #[arg(long, value_parser = parse_lon_lat)]
    origin: Option<(f64, f64)>,

    /// Second origin as lon,lat; renders the difference between the two
    #[arg(long, value_parser = parse_lon_lat)]
    compare: Option<(f64, f64)>,

    /// Lattice vertices per side
    #[arg(long, default_value_t = 120)]
    lattice: u32,

    /// Travel speed in meters per second
    #[arg(long, default_value_t = 5.0)]
    speed: f64,

    /// Vertices further than this are unreached
    #[arg(long, default_value_t = 90)]
    max_minutes: i64,

    #[arg(short, long, env = "OUTPUT", default_value = "tile.png")]
    output: PathBuf,
}

#[derive(ClapArgs, Debug)]
struct LegendArgs {
    #[arg(long, env = "TILE_STYLE", default_value = "temporal")]
    style: String,

    #[arg(long, default_value_t = 140)]
    width: u32,

    #[arg(long, default_value_t = 25)]
    height: u32,

    /// TrueType font for labels; without one only the color strip is drawn
    #[arg(long, env = "LEGEND_FONT")]
    font: Option<PathBuf>,

    #[arg(short, long, env = "OUTPUT", default_value = "legend.png")]
    output: PathBuf,
}

fn parse_lon_lat(s: &str) -> Result<(f64, f64), String> {
    let parts: Vec<&str> = s.split(',').map(str::trim).collect();
    if parts.len() != 2 {
        return Err(format!("expected lon,lat but got '{}'", s));
    }
    let lon = parts[0].parse::<f64>().map_err(|e| e.to_string())?;
    let lat = parts[1].parse::<f64>().map_err(|e| e.to_string())?;
    Ok((lon, lat))
}

fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let args = Args::parse();

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));
    if args.json {
        fmt().with_env_filter(filter).with_target(true).json().init();
    } else {
        fmt().with_env_filter(filter).with_target(true).init();
    }

    let ramps = match &args.ramps {
        Some(path) => ColorRampSet::from_file(path)
            .with_context(|| format!("Failed to load color ramps from {}", path.display()))?,
        None => ColorRampSet::builtin(),
    };

    match &args.command {
        Command::Tile(tile) => render_tile(tile, &ramps),
        Command::Legend(legend) => render_legend(legend, &ramps),
    }
}

/// WGS84 extent of a grid, from its corners.
fn geographic_extent(grid: &GridGeometry) -> Result<BoundingBox> {
    let bbox = grid.bbox();
    let (min_x, min_y) = transform_point((bbox.min_x, bbox.min_y), grid.crs(), CrsCode::Epsg4326)?;
    let (max_x, max_y) = transform_point((bbox.max_x, bbox.max_y), grid.crs(), CrsCode::Epsg4326)?;
    Ok(BoundingBox::new(min_x, min_y, max_x, max_y))
}

fn render_tile(args: &TileArgs, ramps: &ColorRampSet) -> Result<()> {
    let started = Instant::now();

    let request = TileRequest::parse(&args.bbox, &args.crs, args.width, args.height)?;
    let grid = GridGeometry::from_request(&request)?;
    let style: RenderStyle = args.style.parse()?;

    let extent = geographic_extent(&grid).context("Tile CRS has no transform to WGS84")?;
    let network = LatticeNetwork::new(extent, args.lattice, args.lattice);
    let center = (
        (extent.min_x + extent.max_x) / 2.0,
        (extent.min_y + extent.max_y) / 2.0,
    );
    let origin = args.origin.unwrap_or(center);
    let max_seconds = args.max_minutes * 60;
    let surface = network.travel_times(origin, args.speed, max_seconds);

    info!(
        bbox = %args.bbox,
        crs = %request.crs,
        width = request.width,
        height = request.height,
        style = %style,
        vertices = network.vertex_count(),
        "Rendering tile"
    );

    let provider = DynamicSamples::new(&network);
    let renderer = TileRenderer::new(grid, &provider).with_ramps(ramps);
    let raster = match args.compare {
        Some(second) => {
            let other = network.travel_times(second, args.speed, max_seconds);
            let request = RenderRequest::combined(style, LinearCombination::difference());
            renderer.render(&request, &surface, Some(&other as &dyn Surface))?
        }
        None => renderer.render(&RenderRequest::single(style), &surface, None)?,
    };

    raster
        .to_rgba()
        .save(&args.output)
        .with_context(|| format!("Failed to write {}", args.output.display()))?;

    info!(
        output = %args.output.display(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "Tile written"
    );
    Ok(())
}

fn render_legend(args: &LegendArgs, ramps: &ColorRampSet) -> Result<()> {
    let style: RenderStyle = args.style.parse()?;

    let font = match &args.font {
        Some(path) => Some(
            LegendFont::from_file(path)
                .with_context(|| format!("Failed to load font {}", path.display()))?,
        ),
        None => None,
    };

    let mut renderer = LegendRenderer::new().with_ramps(ramps);
    if let Some(font) = &font {
        renderer = renderer.with_font(font);
    }

    let Some(legend) = renderer.render(style, args.width, args.height) else {
        bail!("No legend available for style '{}'", style);
    };

    for label in &legend.labels {
        debug!(x = label.x, y = label.y, text = %label.text, "Legend label");
    }

    legend
        .image
        .save(&args.output)
        .with_context(|| format!("Failed to write {}", args.output.display()))?;

    info!(
        style = %style,
        width = legend.image.width(),
        height = legend.image.height(),
        output = %args.output.display(),
        "Legend written"
    );
    Ok(())
}
