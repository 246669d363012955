use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use polyzone::config::{FileConfig, default_store_path};
use polyzone::domain::{Zone, parse_coordinates};
use polyzone::sensor::ZoneSensor;
use polyzone::store::ZoneStore;
use polyzone::wizard::{MIN_VERTICES, PolygonBuilder};

/// Manage polygonal geofence zones and check device positions against them
///
/// Examples:
///   # Build a zone interactively, one vertex per line
///   polyzone create --name "Work" --device device_tracker.james_phone
///
///   # Import a zone from a JSON coordinate list
///   polyzone import --name "Yard" --device device_tracker.james_phone \
///       --coordinates '[[37.77, -122.42], [37.78, -122.42], [37.78, -122.41]]'
///
///   # Check a position against a stored zone
///   polyzone check "Work" --lat 37.775 --lon -122.415
#[derive(Parser, Debug)]
#[command(name = "polyzone")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path of the zone store file (defaults to the platform config dir)
    #[arg(long)]
    store: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short = 'v', long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Build a new zone interactively, one vertex per wizard step
    Create {
        /// Zone name
        #[arg(short, long)]
        name: String,
        /// Tracked device entity id (e.g. device_tracker.james_phone)
        #[arg(short, long)]
        device: String,
    },
    /// Create a zone from a JSON list of [lat, lon] pairs
    Import {
        #[arg(short, long)]
        name: String,
        #[arg(short, long)]
        device: String,
        /// Coordinates as JSON, e.g. '[[0,0],[0,2],[2,2]]'
        #[arg(short, long)]
        coordinates: String,
    },
    /// List stored zones
    List,
    /// Check a device position against a stored zone
    Check {
        /// Zone name
        name: String,
        #[arg(long, allow_hyphen_values = true)]
        lat: f64,
        #[arg(long, allow_hyphen_values = true)]
        lon: f64,
    },
    /// Remove a stored zone
    Remove {
        /// Zone name
        name: String,
    },
}

fn main() -> Result<()> {
    let args = Args::parse();
    let file_config = FileConfig::load();

    let verbose = args.verbose || file_config.as_ref().map(|c| c.verbose).unwrap_or(false);

    let mut logger = env_logger::Builder::from_default_env();
    if verbose {
        logger.filter_level(log::LevelFilter::Debug);
    }
    logger.init();

    let store_path = args
        .store
        .clone()
        .or_else(|| file_config.as_ref().and_then(|c| c.store.clone()))
        .unwrap_or_else(default_store_path);
    let store = ZoneStore::new(store_path);

    match args.command {
        Command::Create { name, device } => {
            let stdin = io::stdin();
            create_zone(&store, &name, &device, &mut stdin.lock())
        }
        Command::Import {
            name,
            device,
            coordinates,
        } => import_zone(&store, &name, &device, &coordinates),
        Command::List => list_zones(&store),
        Command::Check { name, lat, lon } => check_zone(&store, &name, lat, lon),
        Command::Remove { name } => remove_zone(&store, &name),
    }
}

/// Drive the vertex-at-a-time wizard over a line-based input stream.
fn create_zone(store: &ZoneStore, name: &str, device: &str, input: &mut dyn BufRead) -> Result<()> {
    println!("Building zone '{}' for {}", name, device);
    println!("Enter one vertex per line as 'lat lon' (or 'lat, lon').");
    println!(
        "Type 'done' to finish (needs at least {} points), 'quit' to abort.",
        MIN_VERTICES
    );

    let mut builder = PolygonBuilder::new();

    loop {
        print!("> ");
        io::stdout().flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            bail!("Input ended before the zone was finished");
        }
        let line = line.trim();

        match line {
            "" => continue,
            "quit" => bail!("Zone setup aborted"),
            "done" => match builder.finish() {
                Ok(polygon) => {
                    let zone = Zone::new(name, device, polygon)?;
                    store.add(zone)?;
                    println!("Zone '{}' saved to {:?}", name, store.path());
                    return Ok(());
                }
                Err(err) => {
                    println!("Cannot finish yet: {}", err);
                    continue;
                }
            },
            _ => {}
        }

        let (lat, lon) = match parse_vertex_line(line) {
            Some(pair) => pair,
            None => {
                println!("Could not read '{}' as 'lat lon'", line);
                continue;
            }
        };

        match builder.add_point(lat, lon) {
            Ok(step) => {
                let hint = if step.can_finish {
                    " (type 'done' to finish)"
                } else {
                    ""
                };
                println!(
                    "{} point(s) - {}{}",
                    step.point_count, step.shape_label, hint
                );
            }
            Err(err) => println!("Point rejected: {}", err),
        }
    }
}

/// Parse a wizard line like "37.77 -122.42" or "37.77, -122.42".
fn parse_vertex_line(line: &str) -> Option<(f64, f64)> {
    let mut parts = line.split(|c| c == ',' || c == ' ').filter(|s| !s.is_empty());
    let lat = parts.next()?.parse().ok()?;
    let lon = parts.next()?.parse().ok()?;
    if parts.next().is_some() {
        return None;
    }
    Some((lat, lon))
}

fn import_zone(store: &ZoneStore, name: &str, device: &str, coordinates: &str) -> Result<()> {
    let polygon = parse_coordinates(coordinates).context("Invalid coordinate list")?;
    let count = polygon.len();
    let zone = Zone::new(name, device, polygon)?;
    store.add(zone)?;
    println!(
        "Zone '{}' ({}) saved with {} vertices",
        name,
        polyzone::shape_label(count),
        count
    );
    Ok(())
}

fn list_zones(store: &ZoneStore) -> Result<()> {
    let zones = store.load()?;
    if zones.is_empty() {
        println!("No zones stored in {:?}", store.path());
        return Ok(());
    }
    for zone in zones {
        println!(
            "{} - {} ({}, {} vertices)",
            zone.name,
            zone.device,
            polyzone::shape_label(zone.polygon.len()),
            zone.polygon.len()
        );
    }
    Ok(())
}

fn check_zone(store: &ZoneStore, name: &str, lat: f64, lon: f64) -> Result<()> {
    let zone = store
        .find(name)?
        .with_context(|| format!("No zone named '{}'", name))?;

    let mut sensor = ZoneSensor::new(zone);
    sensor.update(Some((lat, lon)));

    println!("{}: {}", sensor.entity_id(), sensor.state());
    println!("{}", serde_json::to_string_pretty(&sensor.attributes())?);
    Ok(())
}

fn remove_zone(store: &ZoneStore, name: &str) -> Result<()> {
    if store.remove(name)? {
        println!("Removed zone '{}'", name);
        Ok(())
    } else {
        bail!("No zone named '{}'", name);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_parse_vertex_line() {
        assert_eq!(parse_vertex_line("1.5 2.5"), Some((1.5, 2.5)));
        assert_eq!(parse_vertex_line("1.5, -2.5"), Some((1.5, -2.5)));
        assert_eq!(parse_vertex_line("1.5,2.5"), Some((1.5, 2.5)));
        assert_eq!(parse_vertex_line("1.5"), None);
        assert_eq!(parse_vertex_line("1.5 2.5 3.5"), None);
        assert_eq!(parse_vertex_line("abc def"), None);
    }

    #[test]
    fn test_create_zone_from_scripted_input() {
        let dir = tempdir().unwrap();
        let store = ZoneStore::new(dir.path().join("zones.json"));

        let mut input: &[u8] = b"0 0\n0 2\ndone\n2 2\n2 0\ndone\n";
        create_zone(&store, "Yard", "device_tracker.phone", &mut input).unwrap();

        let zone = store.find("Yard").unwrap().unwrap();
        assert_eq!(zone.polygon.len(), 4);
    }

    #[test]
    fn test_create_zone_aborts_on_quit() {
        let dir = tempdir().unwrap();
        let store = ZoneStore::new(dir.path().join("zones.json"));

        let mut input: &[u8] = b"0 0\nquit\n";
        assert!(create_zone(&store, "Yard", "device_tracker.phone", &mut input).is_err());
        assert!(store.find("Yard").unwrap().is_none());
    }

    #[test]
    fn test_import_and_check_flow() {
        let dir = tempdir().unwrap();
        let store = ZoneStore::new(dir.path().join("zones.json"));

        import_zone(
            &store,
            "Work",
            "device_tracker.phone",
            "[[0,0],[0,2],[2,2],[2,0]]",
        )
        .unwrap();
        check_zone(&store, "Work", 1.0, 1.0).unwrap();
        assert!(check_zone(&store, "Nowhere", 1.0, 1.0).is_err());
    }
}
