use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use wayside_core::config::{parse_positive_meters, parse_profile, CliConfigOverrides};
use wayside_core::models::{Coordinate, TransportProfile};

#[derive(Parser)]
#[command(name = "wayside")]
#[command(about = "Plan cycling and walking routes and find detours along them", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Output in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Configuration file (TOML)
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[command(flatten)]
    pub services: ServiceArgs,

    #[command(subcommand)]
    pub command: Commands,
}

/// Overrides for the external services, accepted by every command
#[derive(Args, Debug, Default)]
pub struct ServiceArgs {
    /// Overpass API endpoint
    #[arg(long, global = true, value_name = "URL")]
    pub overpass_url: Option<String>,

    /// OSRM server base URL
    #[arg(long, global = true, value_name = "URL")]
    pub osrm_url: Option<String>,

    /// Request timeout in seconds for both services
    #[arg(long, global = true, value_name = "SECS")]
    pub timeout: Option<u64>,
}

impl ServiceArgs {
    pub fn apply(&self, overrides: &mut CliConfigOverrides) {
        overrides.overpass_url = self.overpass_url.clone();
        overrides.osrm_url = self.osrm_url.clone();
        overrides.request_timeout_secs = self.timeout;
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create a route between two points and save it as GeoJSON
    Route(RouteArgs),

    /// Find detours along a route and save the detour report
    Analyze(AnalyzeArgs),

    /// List amenities along a route that match travel needs
    Needs(NeedsArgs),

    /// List amenities of specific types along a route
    Amenities(AmenitiesArgs),

    /// Find the best detour point of a given type
    Find(FindArgs),

    /// Create a route from start to end through a detour point
    Detour(DetourArgs),

    /// Filter a saved detour report by travel needs
    Filter(FilterArgs),

    /// Show the resolved configuration and where each value came from
    Config,
}

#[derive(Args)]
pub struct RouteArgs {
    /// Start point as "lat,lon"
    #[arg(long, value_parser = parse_coordinate, allow_hyphen_values = true)]
    pub from: Coordinate,

    /// End point as "lat,lon"
    #[arg(long, value_parser = parse_coordinate, allow_hyphen_values = true)]
    pub to: Coordinate,

    /// Intermediate waypoints as "lat,lon" (repeatable)
    #[arg(long, value_parser = parse_coordinate, allow_hyphen_values = true)]
    pub via: Vec<Coordinate>,

    /// Travel mode (bicycle or foot)
    #[arg(long, value_parser = parse_profile_arg)]
    pub profile: Option<TransportProfile>,

    /// Try to route around motorways, trunk and primary roads
    #[arg(long)]
    pub avoid_highways: bool,

    /// With --avoid-highways, also save the direct route for comparison
    #[arg(long, requires = "avoid_highways")]
    pub compare: bool,

    /// Write summary properties and snapped waypoints
    #[arg(long)]
    pub extended: bool,

    /// Output GeoJSON file
    #[arg(short, long, default_value = "route.geojson")]
    pub output: PathBuf,
}

/// Options shared by every command that analyzes a route file
#[derive(Args)]
pub struct AnalysisArgs {
    /// Route GeoJSON file (Feature or FeatureCollection with a LineString)
    pub route: PathBuf,

    /// Distance between sample points in meters
    #[arg(long, value_parser = parse_meters)]
    pub spacing: Option<f64>,

    /// Search radius around each sample point in meters
    #[arg(long, value_parser = parse_meters)]
    pub radius: Option<f64>,

    /// Sample points searched at once
    #[arg(long)]
    pub concurrency: Option<usize>,
}

impl AnalysisArgs {
    pub fn overrides(&self) -> CliConfigOverrides {
        CliConfigOverrides {
            sample_spacing_m: self.spacing,
            detour_radius_m: self.radius,
            concurrency: self.concurrency,
            ..CliConfigOverrides::default()
        }
    }
}

#[derive(Args)]
pub struct AnalyzeArgs {
    #[command(flatten)]
    pub analysis: AnalysisArgs,

    /// Report file to write
    #[arg(short, long, default_value = wayside_analysis::DEFAULT_REPORT_FILE)]
    pub output: PathBuf,

    /// Do not write the report file
    #[arg(long)]
    pub no_save: bool,
}

#[derive(Args)]
pub struct NeedsArgs {
    #[command(flatten)]
    pub analysis: AnalysisArgs,

    /// What the traveller is looking for, e.g. coffee water repair
    #[arg(long, num_args = 1.., value_delimiter = ',')]
    pub needs: Vec<String>,
}

#[derive(Args)]
pub struct AmenitiesArgs {
    #[command(flatten)]
    pub analysis: AnalysisArgs,

    /// Amenity types to look for, e.g. cafe,toilets
    #[arg(long = "type", required = true, num_args = 1.., value_delimiter = ',')]
    pub types: Vec<String>,
}

#[derive(Args)]
pub struct FindArgs {
    /// Route GeoJSON file
    pub route: PathBuf,

    /// Amenity type, e.g. cafe or bicycle_repair_station
    pub amenity_type: String,

    /// Only consider amenities whose name contains this text
    #[arg(long)]
    pub name: Option<String>,

    /// Farthest acceptable detour in meters
    #[arg(long, default_value_t = wayside_analysis::lookup::DEFAULT_MAX_DETOUR_M, value_parser = parse_meters)]
    pub max_detour: f64,
}

#[derive(Args)]
pub struct DetourArgs {
    /// Start point as "lat,lon"
    #[arg(long, value_parser = parse_coordinate, allow_hyphen_values = true)]
    pub from: Coordinate,

    /// Detour point as "lat,lon"
    #[arg(long, value_parser = parse_coordinate, allow_hyphen_values = true)]
    pub via: Coordinate,

    /// End point as "lat,lon"
    #[arg(long, value_parser = parse_coordinate, allow_hyphen_values = true)]
    pub to: Coordinate,

    /// Travel mode (bicycle or foot)
    #[arg(long, value_parser = parse_profile_arg)]
    pub profile: Option<TransportProfile>,

    /// Output GeoJSON file
    #[arg(short, long, default_value = "detour_route.geojson")]
    pub output: PathBuf,
}

#[derive(Args)]
pub struct FilterArgs {
    /// Saved detour report
    #[arg(default_value = wayside_analysis::DEFAULT_REPORT_FILE)]
    pub report: PathBuf,

    /// Needs to filter by; omit for the general summary
    #[arg(long, num_args = 1.., value_delimiter = ',')]
    pub needs: Vec<String>,
}

/// Parse "lat,lon"
pub fn parse_coordinate(s: &str) -> Result<Coordinate, String> {
    let (lat, lon) = s
        .split_once(',')
        .ok_or_else(|| format!("expected \"lat,lon\", got '{}'", s))?;

    let lat: f64 = lat.trim().parse().map_err(|_| format!("invalid latitude '{}'", lat))?;
    let lon: f64 = lon.trim().parse().map_err(|_| format!("invalid longitude '{}'", lon))?;

    let coordinate = Coordinate::new(lat, lon);
    if !coordinate.is_finite() || !coordinate.in_range() {
        return Err(format!("coordinate out of range: {}", s));
    }
    Ok(coordinate)
}

fn parse_profile_arg(s: &str) -> Result<TransportProfile, String> {
    parse_profile(s).map_err(|e| e.to_string())
}

fn parse_meters(s: &str) -> Result<f64, String> {
    parse_positive_meters("distance", s).map_err(|e| e.to_string())
}
