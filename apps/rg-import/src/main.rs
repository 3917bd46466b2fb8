//! `rg-import` — load an OSM PBF extract into a routable nodes/edges store.
//!
//! Parses the extract, builds the directed road graph in memory, then
//! replaces the contents of the destination in 5 000-row batches.
//!
//! Run with:
//!   cargo run -p rg-import --release -- --pbf monaco-latest.osm.pbf --db routing.db
//!
//! Progress goes to stderr through `env_logger`; set `RUST_LOG` to override
//! the level chosen by `--verbose`.

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use log::{LevelFilter, error, info};
use memory_stats::memory_stats;

use rg_graph::RoadGraph;
use rg_graph::osm::build_from_pbf;
use rg_store::{BulkLoader, CsvStore, DEFAULT_BATCH_SIZE, GraphStore, LoadConfig, LoadSummary, SqliteStore};

// ── Command line ──────────────────────────────────────────────────────────────

/// Destination backend.
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum Format {
    /// SQLite database file with `nodes` and `edges` tables.
    Sqlite,
    /// Directory receiving `nodes.csv` and `edges.csv`.
    Csv,
}

/// Import an OSM PBF extract into a routable graph store.
#[derive(Parser, Debug)]
#[command(name = "rg-import", version)]
struct Cli {
    /// OSM PBF extract to read
    #[arg(long)]
    pbf: PathBuf,

    /// Destination: database file (sqlite) or output directory (csv)
    #[arg(long)]
    db: PathBuf,

    /// Destination backend
    #[arg(long, value_enum, default_value_t = Format::Sqlite)]
    format: Format,

    /// Rows per committed batch
    #[arg(long, default_value_t = DEFAULT_BATCH_SIZE)]
    batch_size: usize,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(&cli) {
        error!("import failed: {e:#}");
        std::process::exit(1);
    }
}

fn init_logging(verbose: bool) {
    let level = if verbose { LevelFilter::Debug } else { LevelFilter::Info };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .target(env_logger::Target::Stderr)
        .init();
}

fn run(cli: &Cli) -> Result<()> {
    let t0 = Instant::now();

    info!("parsing {}", cli.pbf.display());
    let graph = build_from_pbf(&cli.pbf)
        .with_context(|| format!("reading {}", cli.pbf.display()))?;
    info!("parse complete in {:.1}s ({:.0} MB resident)", t0.elapsed().as_secs_f64(), mem_mb());
    info!("nodes: {}", graph.node_count());
    info!("edges: {}", graph.edge_count());

    let config = LoadConfig { batch_size: cli.batch_size };
    let summary = write_graph(&graph, cli.format, &cli.db, config)?;

    info!(
        "import finished in {:.1}s: {} nodes in {} batches, {} edges in {} batches",
        t0.elapsed().as_secs_f64(),
        summary.nodes,
        summary.node_batches,
        summary.edges,
        summary.edge_batches,
    );
    Ok(())
}

/// Open the destination for `format` at `dest` and bulk-load `graph` into it.
fn write_graph(graph: &RoadGraph, format: Format, dest: &Path, config: LoadConfig) -> Result<LoadSummary> {
    // Opening a SQLite file creates it; fail on bad settings before that.
    config.validate().context("invalid load settings")?;

    // The store is dropped (and its connection closed) on every return path.
    let mut store: Box<dyn GraphStore> = match format {
        Format::Sqlite => Box::new(
            SqliteStore::open(dest).with_context(|| format!("opening {}", dest.display()))?,
        ),
        Format::Csv => Box::new(
            CsvStore::new(dest).with_context(|| format!("creating {}", dest.display()))?,
        ),
    };

    let nodes = graph.node_rows();
    BulkLoader::new(config)
        .load(store.as_mut(), &nodes, &graph.edges)
        .with_context(|| format!("loading into {}", dest.display()))
}

fn mem_mb() -> f64 {
    memory_stats()
        .map(|s| s.physical_mem as f64 / (1024.0 * 1024.0))
        .unwrap_or(0.0)
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use clap::Parser;
    use tempfile::TempDir;

    use rg_core::{Coordinate, OsmNodeId};
    use rg_graph::{GraphBuilder, RoadGraph};
    use rg_store::{LoadConfig, SqliteStore};

    use super::{Cli, Format, write_graph};

    fn tmp() -> TempDir {
        tempfile::tempdir().expect("create temp dir")
    }

    /// nodes {1:(0,0), 2:(0,1), 3:(0,2)}, way [1,2,3] highway=secondary.
    fn secondary_line() -> RoadGraph {
        let mut b = GraphBuilder::new();
        b.on_node(OsmNodeId(1), Coordinate::new(0.0, 0.0));
        b.on_node(OsmNodeId(2), Coordinate::new(0.0, 1.0));
        b.on_node(OsmNodeId(3), Coordinate::new(0.0, 2.0));
        b.on_way(&[OsmNodeId(1), OsmNodeId(2), OsmNodeId(3)], &[("highway", "secondary")]);
        b.finish()
    }

    #[test]
    fn cli_defaults() {
        let cli = Cli::try_parse_from(["rg-import", "--pbf", "a.osm.pbf", "--db", "routing.db"]).unwrap();
        assert_eq!(cli.format, Format::Sqlite);
        assert_eq!(cli.batch_size, 5_000);
        assert!(!cli.verbose);
    }

    #[test]
    fn cli_requires_pbf() {
        assert!(Cli::try_parse_from(["rg-import", "--db", "routing.db"]).is_err());
    }

    #[test]
    fn cli_csv_format() {
        let cli = Cli::try_parse_from([
            "rg-import", "--pbf", "a.osm.pbf", "--db", "out", "--format", "csv", "--batch-size", "100", "-v",
        ]).unwrap();
        assert_eq!(cli.format, Format::Csv);
        assert_eq!(cli.batch_size, 100);
        assert!(cli.verbose);
    }

    #[test]
    fn end_to_end_sqlite() {
        let dir = tmp();
        let db = dir.path().join("routing.db");
        let graph = secondary_line();

        // An earlier import that must disappear.
        {
            let store = SqliteStore::open(&db).unwrap();
            store.connection().execute_batch(
                "INSERT INTO nodes (node_id, lat, lon) VALUES (42, 9.0, 9.0);
                 INSERT INTO edges (src_node, dst_node, distance_m, speed_kmph) VALUES (42, 43, 1, 1);",
            ).unwrap();
        }

        let summary = write_graph(&graph, Format::Sqlite, &db, LoadConfig::default()).unwrap();
        assert_eq!(summary.nodes, 3);
        assert_eq!(summary.edges, 4);

        let store = SqliteStore::open(&db).unwrap();
        assert_eq!(store.node_count().unwrap(), 3);
        assert_eq!(store.edge_count().unwrap(), 4);
        let bad: i64 = store.connection().query_row(
            "SELECT COUNT(*) FROM edges WHERE speed_kmph != 60 OR closed != 0 OR src_node = 42",
            [],
            |r| r.get(0),
        ).unwrap();
        assert_eq!(bad, 0);
    }

    #[test]
    fn end_to_end_csv() {
        let dir = tmp();
        let out = dir.path().join("graph");
        let summary = write_graph(&secondary_line(), Format::Csv, &out, LoadConfig { batch_size: 1 }).unwrap();
        assert_eq!(summary.node_batches, 3);
        assert_eq!(summary.edge_batches, 4);
        assert!(out.join("nodes.csv").exists());
        assert!(out.join("edges.csv").exists());
    }

    #[test]
    fn zero_batch_size_is_an_error() {
        let dir = tmp();
        let db = dir.path().join("routing.db");
        let err = write_graph(&secondary_line(), Format::Sqlite, &db, LoadConfig { batch_size: 0 });
        assert!(err.is_err());
        assert!(!db.exists(), "no database file is created for rejected settings");
    }

    #[test]
    fn zero_batch_size_keeps_existing_csv_export() {
        let dir = tmp();
        let out = dir.path().join("graph");
        write_graph(&secondary_line(), Format::Csv, &out, LoadConfig::default()).unwrap();
        let read = |name: &str| std::fs::read_to_string(out.join(name)).unwrap();
        let (nodes, edges) = (read("nodes.csv"), read("edges.csv"));
        assert_eq!(nodes.lines().count(), 4); // header + 3 rows

        let err = write_graph(&secondary_line(), Format::Csv, &out, LoadConfig { batch_size: 0 });
        assert!(err.is_err());
        assert_eq!(read("nodes.csv"), nodes);
        assert_eq!(read("edges.csv"), edges);
    }
}
