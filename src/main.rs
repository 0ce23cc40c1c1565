use std::error::Error;
use std::path::{Path, PathBuf};

use clap::Parser;
use tileroute::dataset::SqliteDataset;
use tileroute::{
    trace_route, Algorithm, CancelToken, GeoOrigin, MapOptions, OffsetPoint, RoadMap,
    SearchOutcome,
};

#[derive(Debug, thiserror::Error)]
#[error("{0}: {1}")]
struct GraphLoadError(PathBuf, #[source] tileroute::Error);

#[derive(Parser)]
#[command(allow_negative_numbers = true)]
struct Cli {
    /// The path to the map database
    map_file: PathBuf,

    /// Latitude of the start point
    start_lat: f64,

    /// Longitude of the start point
    start_lon: f64,

    /// Latitude of the end point
    end_lat: f64,

    /// Longitude of the end point
    end_lon: f64,

    /// Length of a map tile edge, in degrees
    #[arg(long, default_value_t = 0.01)]
    tile_size: f64,

    /// Rings of neighboring tiles searched for the nearest node
    #[arg(long, default_value_t = 0)]
    radius: u32,

    /// Shortest path algorithm: dijkstra or astar
    #[arg(long, default_value_t = Algorithm::Dijkstra)]
    algorithm: Algorithm,

    /// Longitude of the left map edge; positions are treated as offsets if not given
    #[arg(long, requires = "origin_top")]
    origin_left: Option<f64>,

    /// Latitude of the top map edge; positions are treated as offsets if not given
    #[arg(long, requires = "origin_left")]
    origin_top: Option<f64>,
}

impl Cli {
    fn options(&self) -> MapOptions {
        let options = MapOptions::new(self.tile_size).with_search_radius(self.radius);
        match (self.origin_left, self.origin_top) {
            (Some(left), Some(top)) => options.with_origin(GeoOrigin { left, top }),
            _ => options,
        }
    }
}

pub fn main() -> Result<(), Box<dyn Error>> {
    colog::init();
    let cli = Cli::parse();
    let options = cli.options();

    let dataset = open_dataset(&cli.map_file)?;
    let map = RoadMap::new(options);
    map.load_from(&dataset)
        .map_err(|e| GraphLoadError(cli.map_file.clone(), e))?;

    let to_offset = |lat: f64, lon: f64| match options.origin {
        Some(origin) => origin.to_offset(lon, lat),
        None => OffsetPoint::new(lon, lat),
    };
    let to_output = |p: OffsetPoint| match options.origin {
        Some(origin) => origin.to_absolute(p),
        None => (p.lon, p.lat),
    };

    let outcome = map.find_shortest_path(
        to_offset(cli.start_lat, cli.start_lon),
        to_offset(cli.end_lat, cli.end_lon),
        cli.algorithm,
        &CancelToken::new(),
    )?;

    if outcome == SearchOutcome::Unreachable {
        log::warn!("no route between the given points");
    }
    let weight = outcome
        .route()
        .map_or_else(|| "null".to_string(), |r| r.weight.to_string());
    let points = trace_route(map.graph()?, &dataset, outcome.edges())?;

    println!("{{");
    println!("  \"type\": \"FeatureCollection\",");
    println!("  \"features\": [");
    println!("    {{");
    println!("      \"type\": \"Feature\",");
    println!(
        "      \"properties\": {{\"algorithm\": \"{}\", \"weight\": {}}},",
        cli.algorithm, weight
    );

    println!("      \"geometry\": {{");
    println!("        \"type\": \"LineString\",");
    println!("        \"coordinates\": [");

    let mut points = points.into_iter().map(to_output).peekable();
    while let Some((lon, lat)) = points.next() {
        let suffix = if points.peek().is_some() { "," } else { "" };
        println!("          [{}, {}]{}", lon, lat, suffix);
    }

    println!("        ]");
    println!("      }}");
    println!("    }}");
    println!("  ]");
    println!("}}");

    Ok(())
}

fn open_dataset<P: AsRef<Path>>(path: P) -> Result<SqliteDataset, GraphLoadError> {
    SqliteDataset::open(path.as_ref()).map_err(|e| GraphLoadError(PathBuf::from(path.as_ref()), e))
}
