use std::error::Error;
use std::path::{Path, PathBuf};

use clap::{Parser, ValueEnum};
use roadroute::osm;

#[derive(Debug, thiserror::Error)]
#[error("{0}: {1}")]
struct GraphLoadError(PathBuf, #[source] osm::Error);

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Auto,
    Xml,
    XmlGz,
    XmlBz2,
}

impl From<Format> for osm::FileFormat {
    fn from(f: Format) -> Self {
        match f {
            Format::Auto => osm::FileFormat::Unknown,
            Format::Xml => osm::FileFormat::Xml,
            Format::XmlGz => osm::FileFormat::XmlGz,
            Format::XmlBz2 => osm::FileFormat::XmlBz2,
        }
    }
}

/// Finds the shortest road route between two positions and prints it as GeoJSON.
#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// The path to the OSM file
    osm_file: PathBuf,

    /// Longitude of the start point
    #[arg(allow_negative_numbers = true)]
    start_lon: f64,

    /// Latitude of the start point
    #[arg(allow_negative_numbers = true)]
    start_lat: f64,

    /// Longitude of the end point
    #[arg(allow_negative_numbers = true)]
    end_lon: f64,

    /// Latitude of the end point
    #[arg(allow_negative_numbers = true)]
    end_lat: f64,

    /// Format of the OSM file
    #[arg(long, value_enum, default_value_t = Format::Auto)]
    format: Format,

    /// Only load nodes within MIN_LON,MIN_LAT,MAX_LON,MAX_LAT
    #[arg(long, value_delimiter = ',', allow_hyphen_values = true)]
    bbox: Option<Vec<f64>>,

    /// Route over footpaths instead of roads
    #[arg(long)]
    foot: bool,

    /// Give up after expanding that many vertices
    #[arg(long, default_value_t = roadroute::DEFAULT_STEP_LIMIT)]
    step_limit: usize,

    /// Only print the vertex nearest to the start point
    #[arg(long)]
    nearest: bool,

    /// Increase logging verbosity
    #[arg(short, long, action = clap::ArgAction::Count, conflicts_with = "quiet")]
    verbose: u8,

    /// Only log errors
    #[arg(short, long)]
    quiet: bool,
}

impl Cli {
    fn log_level(&self) -> log::LevelFilter {
        match (self.quiet, self.verbose) {
            (true, _) => log::LevelFilter::Error,
            (false, 0) => log::LevelFilter::Info,
            (false, 1) => log::LevelFilter::Debug,
            (false, _) => log::LevelFilter::Trace,
        }
    }

    fn bbox(&self) -> [f64; 4] {
        match self.bbox.as_deref() {
            Some(&[min_lon, min_lat, max_lon, max_lat]) => [min_lon, min_lat, max_lon, max_lat],
            Some(other) => {
                log::warn!("ignoring --bbox with {} values (expected 4)", other.len());
                [0.0; 4]
            }
            None => [0.0; 4],
        }
    }
}

pub fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    let mut logger = colog::default_builder();
    logger.filter_level(cli.log_level());
    logger.init();

    let g = load_graph(&cli)?;

    if cli.nearest {
        let vertex = g.nearest_vertex(cli.start_lon, cli.start_lat)?;
        let (lon, lat) = g.coordinate_of(vertex)?;
        print_point(vertex, lon, lat);
        return Ok(());
    }

    let route = roadroute::shortest_path_with_limit(
        &g,
        cli.start_lon,
        cli.start_lat,
        cli.end_lon,
        cli.end_lat,
        cli.step_limit,
    )?;
    let distance = g.path_length(&route)?;
    log::info!("found route over {} vertices, {:.3} mi", route.len(), distance);

    let coordinates = route
        .iter()
        .map(|&id| g.coordinate_of(id))
        .collect::<Result<Vec<_>, _>>()?;
    print_line_string(&coordinates, distance);

    Ok(())
}

fn load_graph(cli: &Cli) -> Result<roadroute::Graph, GraphLoadError> {
    let mut g = roadroute::Graph::default();
    let options = osm::Options {
        profile: if cli.foot {
            &osm::FOOT_PROFILE
        } else {
            &osm::ROAD_PROFILE
        },
        file_format: cli.format.into(),
        bbox: cli.bbox(),
    };
    let path: &Path = &cli.osm_file;
    match osm::add_features_from_file(&mut g, &options, path) {
        Ok(()) => Ok(g),
        Err(e) => Err(GraphLoadError(PathBuf::from(path), e)),
    }
}

fn print_point(id: i64, lon: f64, lat: f64) {
    println!("{{");
    println!("  \"type\": \"Feature\",");
    println!("  \"properties\": {{\"id\": {}}},", id);
    println!("  \"geometry\": {{");
    println!("    \"type\": \"Point\",");
    println!("    \"coordinates\": [{}, {}]", lon, lat);
    println!("  }}");
    println!("}}");
}

fn print_line_string(coordinates: &[(f64, f64)], distance: f64) {
    println!("{{");
    println!("  \"type\": \"FeatureCollection\",");
    println!("  \"features\": [");
    println!("    {{");
    println!("      \"type\": \"Feature\",");
    println!("      \"properties\": {{\"distance_miles\": {}}},", distance);

    println!("      \"geometry\": {{");
    println!("        \"type\": \"LineString\",");
    println!("        \"coordinates\": [");

    let mut points = coordinates.iter().peekable();
    while let Some((lon, lat)) = points.next() {
        let suffix = if points.peek().is_some() { "," } else { "" };
        println!("          [{}, {}]{}", lon, lat, suffix);
    }

    println!("        ]");
    println!("      }}");
    println!("    }}");
    println!("  ]");
    println!("}}");
}
