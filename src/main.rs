use std::path::PathBuf;

use clap::Parser;
use dotenv::dotenv;
use geo::{Point, point};
use inkroute::config::Config;
use inkroute::extract::{Pixel, SkeletonStrategy};
use inkroute::matching::{RoadSource, StaticRoads};
use inkroute::pipeline::{Hints, Pipeline};
use inkroute_geo::BoundingBox;

/// Extracts a drawn route from a map image, and ranks candidate roads
/// against it. The result is printed as JSON.
#[derive(Parser, Debug)]
#[command(name = "inkroute", version, about)]
struct Cli {
    /// The route image.
    #[arg(long)]
    image: PathBuf,

    #[arg(long, allow_negative_numbers = true)]
    north: f64,
    #[arg(long, allow_negative_numbers = true)]
    south: f64,
    #[arg(long, allow_negative_numbers = true)]
    east: f64,
    #[arg(long, allow_negative_numbers = true)]
    west: f64,

    /// Candidate roads, one `[id;name;]LINESTRING (...)` per line.
    #[arg(long)]
    roads: Option<PathBuf>,

    /// A point on the route, as `lat,lng`. May be repeated.
    #[arg(long = "anchor", value_parser = parse_anchor, allow_hyphen_values = true)]
    anchors: Vec<Point>,

    /// A numbered marker in pixel space, as `x,y,value`. May be repeated.
    #[arg(long = "marker", value_parser = parse_marker)]
    markers: Vec<(Pixel, i64)>,

    /// A JSON configuration file. Flags below override its values.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Meters to grow the bounding box by when looking up roads.
    #[arg(long)]
    padding: Option<f64>,

    /// Directory to write intermediate stage images into.
    #[arg(long)]
    debug_dir: Option<PathBuf>,

    #[arg(long)]
    skeleton: Option<SkeletonStrategy>,

    /// Pretty-print the output.
    #[arg(long)]
    pretty: bool,

    /// Increase log verbosity, repeatable.
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn parse_anchor(value: &str) -> Result<Point, String> {
    let (lat, lng) = value
        .split_once(',')
        .ok_or_else(|| format!("expected `lat,lng`, given {value:?}"))?;

    let lat = lat.trim().parse::<f64>().map_err(|e| e.to_string())?;
    let lng = lng.trim().parse::<f64>().map_err(|e| e.to_string())?;

    Ok(point! { x: lng, y: lat })
}

fn parse_marker(value: &str) -> Result<(Pixel, i64), String> {
    let parts = value.split(',').map(str::trim).collect::<Vec<_>>();
    let [x, y, number] = parts.as_slice() else {
        return Err(format!("expected `x,y,value`, given {value:?}"));
    };

    let x = x.parse::<u32>().map_err(|e| e.to_string())?;
    let y = y.parse::<u32>().map_err(|e| e.to_string())?;
    let number = number.parse::<i64>().map_err(|e| e.to_string())?;

    Ok((Pixel::new(x, y), number))
}

fn initialize_logging(verbose: u8) {
    #[cfg(feature = "tracing")]
    {
        let _ = verbose;
        inkroute::util::trace::initialize_tracer();
    }

    #[cfg(not(feature = "tracing"))]
    {
        let level = match verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        };

        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // A `.env` file is optional
    dotenv().ok();

    let cli = Cli::parse();
    initialize_logging(cli.verbose);

    let mut config = match &cli.config {
        Some(path) => Config::from_json_file(path)?,
        None => Config::default(),
    };

    if let Some(padding) = cli.padding {
        config.padding_meters = padding;
    }
    if let Some(strategy) = cli.skeleton {
        config.extract.skeleton.strategy = strategy;
    }
    if cli.debug_dir.is_some() {
        config.extract.debug_dir = cli.debug_dir.clone();
    }

    let bbox = BoundingBox::new(cli.north, cli.south, cli.east, cli.west)?;
    let roads = cli.roads.as_ref().map(StaticRoads::from_wkt_file).transpose()?;

    let hints = Hints {
        anchors: cli.anchors,
        markers: cli.markers,
    };

    let image = image::open(&cli.image)?;
    let output = Pipeline::new(config).trace(
        &image,
        &bbox,
        roads.as_ref().map(|roads| roads as &dyn RoadSource),
        &hints,
    )?;

    let json = if cli.pretty {
        serde_json::to_string_pretty(&output)?
    } else {
        serde_json::to_string(&output)?
    };

    println!("{json}");
    Ok(())
}
