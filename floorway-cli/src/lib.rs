//! Command-line front end: list waypoints and find routes on a floor map.

use std::error::Error;
use std::io::Write;
use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand};
use floorway_map::MapSource;
use floorway_paths::{Exclusions, MapGraph, Path, Point, Router, RouterConfig, numbered};
use serde::Serialize;

#[derive(Debug, Parser)]
#[command(name = "floorway", version, about = "Shortest walking routes on a building floor")]
pub struct Cli {
    /// More log output (repeat for more).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List waypoints and their positions.
    Nodes(MapArgs),
    /// Find a route between two waypoints.
    Route(RouteArgs),
}

#[derive(Debug, Args)]
pub struct MapArgs {
    /// Map document (nodes and edges).
    #[arg(long)]
    pub map: PathBuf,
    /// Polyline corridors saved by the corridor editor.
    #[arg(long)]
    pub polylines: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub struct RouteArgs {
    #[command(flatten)]
    pub map: MapArgs,
    #[arg(long)]
    pub from: String,
    #[arg(long)]
    pub to: String,
    /// Treat the corridor A:B as closed for this query. Repeatable.
    #[arg(long = "block", value_name = "A:B", value_parser = parse_block)]
    pub blocked: Vec<(String, String)>,
    /// Give up after this many node expansions.
    #[arg(long)]
    pub step_limit: Option<usize>,
    /// Print a JSON report instead of text.
    #[arg(long)]
    pub json: bool,
}

/// Parse `A:B` into a corridor endpoint pair.
pub fn parse_block(s: &str) -> Result<(String, String), String> {
    match s.split_once(':') {
        Some((a, b)) if !a.is_empty() && !b.is_empty() => Ok((a.to_string(), b.to_string())),
        _ => Err(format!("expected A:B, got \u{201c}{s}\u{201d}")),
    }
}

/// Log level for a `-v` count.
pub fn log_level(verbose: u8) -> log::LevelFilter {
    match verbose {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    }
}

/// JSON shape of a route answer.
#[derive(Debug, Serialize)]
pub struct RouteReport {
    pub found: bool,
    pub from: String,
    pub to: String,
    pub path: Vec<String>,
    pub cost: Option<f64>,
    pub itinerary: Vec<String>,
    pub polyline: Vec<Point>,
}

impl RouteReport {
    fn new(graph: &MapGraph, args: &RouteArgs, path: Option<&Path>) -> Self {
        let mut report = Self {
            found: path.is_some(),
            from: args.from.clone(),
            to: args.to.clone(),
            path: Vec::new(),
            cost: None,
            itinerary: Vec::new(),
            polyline: Vec::new(),
        };
        if let Some(p) = path {
            report.path = p.names(graph).map(str::to_string).collect();
            report.cost = Some(p.cost());
            report.itinerary = p.itinerary(graph).iter().map(ToString::to_string).collect();
            report.polyline = p.polyline(graph);
        }
        report
    }
}

fn load(args: &MapArgs) -> Result<MapGraph, Box<dyn Error>> {
    let mut source = MapSource::from_path(&args.map)?;
    if let Some(p) = &args.polylines {
        source = source.with_polylines_path(p)?;
    }
    Ok(source.build()?)
}

/// Execute a parsed command, writing results to `out`.
pub fn run(cli: &Cli, out: &mut impl Write) -> Result<(), Box<dyn Error>> {
    match &cli.command {
        Command::Nodes(args) => nodes(args, out),
        Command::Route(args) => route(args, out),
    }
}

fn nodes(args: &MapArgs, out: &mut impl Write) -> Result<(), Box<dyn Error>> {
    let graph = load(args)?;
    for (_, w) in graph.waypoints() {
        writeln!(out, "{}\t{}", w.name(), w.pos())?;
    }
    Ok(())
}

fn route(args: &RouteArgs, out: &mut impl Write) -> Result<(), Box<dyn Error>> {
    let graph = load(&args.map)?;
    let from = graph.require(&args.from)?;
    let to = graph.require(&args.to)?;
    let exclusions = Exclusions::resolve(
        &graph,
        args.blocked.iter().map(|(a, b)| (a.as_str(), b.as_str())),
    )?;

    let mut router = Router::new(RouterConfig {
        step_limit: args.step_limit,
    });
    let path = router.find_path(&graph.view(&exclusions), from, to);

    if args.json {
        let report = RouteReport::new(&graph, args, path.as_ref());
        serde_json::to_writer_pretty(&mut *out, &report)?;
        writeln!(out)?;
        return Ok(());
    }

    let Some(path) = path else {
        writeln!(out, "No path from {} to {}", args.from, args.to)?;
        return Ok(());
    };
    let names: Vec<&str> = path.names(&graph).collect();
    writeln!(out, "Path: {}", names.join(" \u{2192} "))?;
    writeln!(out, "Cost: {:.2}", path.cost())?;
    for line in numbered(&path.itinerary(&graph)) {
        writeln!(out, "{line}")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture(name: &str) -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR"))
            .join("tests")
            .join("data")
            .join(name)
    }

    fn run_args(args: &[&str]) -> Result<String, Box<dyn Error>> {
        let map = fixture("floor.json");
        let mut argv = vec!["floorway".to_string()];
        for a in args {
            argv.push(a.replace("{map}", &map.to_string_lossy()));
        }
        let cli = Cli::try_parse_from(argv)?;
        let mut out = Vec::new();
        run(&cli, &mut out)?;
        Ok(String::from_utf8(out)?)
    }

    #[test]
    fn block_syntax() {
        assert_eq!(parse_block("A:B"), Ok(("A".into(), "B".into())));
        assert_eq!(
            parse_block("Room 1:Hall"),
            Ok(("Room 1".into(), "Hall".into()))
        );
        assert!(parse_block("AB").is_err());
        assert!(parse_block(":B").is_err());
    }

    #[test]
    fn verbosity_levels() {
        assert_eq!(log_level(0), log::LevelFilter::Warn);
        assert_eq!(log_level(2), log::LevelFilter::Debug);
        assert_eq!(log_level(9), log::LevelFilter::Trace);
    }

    #[test]
    fn text_route() {
        let out = run_args(&["route", "--map", "{map}", "--from", "Entrance", "--to", "Lab"]).unwrap();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(
            lines,
            [
                "Path: Entrance \u{2192} Lobby \u{2192} Corridor1 \u{2192} Lab",
                "Cost: 400.00",
                "1. Continue straight",
                "2. Turn right",
                "3. Arrive at Lab",
            ]
        );
    }

    #[test]
    fn blocked_route_reports_no_path() {
        let out = run_args(&[
            "route", "--map", "{map}", "--from", "Entrance", "--to", "Lab", "--block",
            "Lab:Corridor1",
        ])
        .unwrap();
        assert_eq!(out.trim(), "No path from Entrance to Lab");
    }

    #[test]
    fn json_route() {
        let out = run_args(&[
            "route", "--map", "{map}", "--from", "Lobby", "--to", "Lobby", "--json",
        ])
        .unwrap();
        let v: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(v["found"], true);
        assert_eq!(v["path"], serde_json::json!(["Lobby"]));
        assert_eq!(v["cost"], 0.0);
        assert_eq!(v["itinerary"], serde_json::json!(["Arrive at Lobby"]));
        assert_eq!(v["polyline"][0]["x"], 160.0);
    }

    #[test]
    fn unknown_waypoint_is_an_error() {
        let err = run_args(&["route", "--map", "{map}", "--from", "Entrance", "--to", "Moon"])
            .unwrap_err();
        assert!(err.to_string().contains("Moon"));

        let err = run_args(&[
            "route", "--map", "{map}", "--from", "Entrance", "--to", "Lab", "--block", "Lab:Moon",
        ])
        .unwrap_err();
        assert!(err.to_string().contains("Moon"));
    }

    #[test]
    fn nodes_lists_sorted_names() {
        let out = run_args(&["nodes", "--map", "{map}"]).unwrap();
        let names: Vec<&str> = out
            .lines()
            .map(|l| l.split('\t').next().unwrap())
            .collect();
        assert_eq!(
            names,
            ["Cafe", "Corridor1", "Entrance", "Lab", "Library", "Lobby", "Stairs"]
        );
        assert!(out.contains("Library\t(480, 300)"));
    }
}
