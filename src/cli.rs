use anyhow::{anyhow, Context as _, Result};
use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use emap_core::{app::Msg, entities::*, marker::MarkerId};
use std::{
    fmt::Write as _,
    fs,
    path::{Path, PathBuf},
};

use crate::{
    config::{self, Config},
    events::load_events,
    headless::{self, HeadlessEventMap},
    records::{
        self,
        generate::{self, RecordKind},
    },
    view,
};

const DEFAULT_PAGE_TITLE: &str = "Veranstaltungen";

#[derive(Parser)]
#[command(author, version, about = "Renders and inspects an interactive event map")]
pub struct Cli {
    /// Configuration file
    #[arg(long, value_name = "FILE", env = "EVENTMAP_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Event data: a JSON file or a directory of record files
    #[arg(long, value_name = "PATH", env = "EVENTMAP_EVENTS", global = true)]
    pub events: Option<PathBuf>,

    /// Override the initial map center
    #[arg(long, value_name = "LAT,LNG", global = true)]
    pub center: Option<MapPoint>,

    /// Increase the log level (-v: debug, -vv: trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Load the configuration and all events and report problems
    Check,
    /// Render the static map page
    Build {
        /// Output file, stdout if missing
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
        #[arg(long, default_value = DEFAULT_PAGE_TITLE)]
        title: String,
    },
    /// Apply filters without a browser and print the result
    Preview(PreviewArgs),
    /// List the record files of the events directory
    List {
        #[arg(long, value_enum, default_value_t = ListFormat::Table)]
        format: ListFormat,
    },
    /// Compare two record files
    Diff {
        old: PathBuf,
        new: PathBuf,
        #[arg(long, value_enum, default_value_t = DiffFormat::Text)]
        format: DiffFormat,
    },
    /// Merge the fields of one record file into another
    Merge {
        base: PathBuf,
        updates: PathBuf,
        /// Only merge these fields (all if missing)
        #[arg(short, long, value_delimiter = ',')]
        fields: Option<Vec<String>>,
        #[arg(short, long, value_name = "FILE")]
        output: PathBuf,
    },
    /// Write random test records
    Generate {
        #[arg(short = 'n', long, default_value_t = 1)]
        count: usize,
        #[arg(short = 't', long = "type", value_enum, default_value_t = RecordKind::Concert)]
        kind: RecordKind,
        /// Target directory, the events directory if missing
        #[arg(short, long, value_name = "DIR")]
        output_dir: Option<PathBuf>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ListFormat {
    Table,
    Json,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DiffFormat {
    Text,
    Json,
}

#[derive(Args, Default)]
pub struct PreviewArgs {
    #[arg(long)]
    pub category: Option<String>,
    #[arg(long)]
    pub time: Option<String>,
    #[arg(long)]
    pub distance: Option<String>,
    #[arg(long)]
    pub location: Option<String>,
    /// Show the details of the N-th displayed marker (starting at 0)
    #[arg(long, value_name = "N")]
    pub activate: Option<usize>,
}

impl PreviewArgs {
    fn messages(&self) -> Vec<Msg> {
        let Self {
            category,
            time,
            distance,
            location,
            activate: _,
        } = self;
        [
            category.clone().map(Msg::CategoryChanged),
            time.clone().map(Msg::TimeWindowChanged),
            distance.clone().map(Msg::DistanceChanged),
            location.clone().map(Msg::LocationChanged),
        ]
        .into_iter()
        .flatten()
        .collect()
    }
}

pub fn run(cli: Cli) -> Result<()> {
    let Cli {
        config,
        events: events_path,
        center,
        verbose: _,
        command,
    } = cli;
    let mut cfg = Config::try_load_from_file_or_default(config)?;
    if let Some(path) = events_path {
        cfg.events.path = path;
    }
    if let Some(center) = center {
        cfg.map.viewport.center = center;
    }

    match command {
        Command::Check => {
            let events = load_events(&cfg.events.path)?;
            let placeable = events.iter().filter(|e| e.is_placeable()).count();
            let total = events.len();
            let problems = check(&cfg.map, &events);
            for problem in &problems {
                log::warn!("{problem}");
            }
            // Logs the startup diagnostic
            headless::init(cfg.map, events);
            println!(
                "{total} events, {placeable} with coordinates, {} problems",
                problems.len()
            );
        }
        Command::Build { output, title } => {
            let events = load_events(&cfg.events.path)?;
            let map = headless::init(cfg.map.clone(), events.clone());
            let page = view::map_page(&title, &cfg.map, &events, map.matching_count())?;
            let html = page.into_string();
            match output {
                Some(file) => {
                    fs::write(&file, html)
                        .with_context(|| format!("Unable to write {}", file.display()))?;
                    log::info!("Wrote map page to {}", file.display());
                }
                None => println!("{html}"),
            }
        }
        Command::Preview(args) => {
            let events = load_events(&cfg.events.path)?;
            let mut map = headless::init(cfg.map, events);
            print!("{}", preview(&mut map, &args)?);
        }
        Command::List { format } => {
            print!("{}", list(&cfg.events.path, format)?);
        }
        Command::Diff { old, new, format } => {
            print!("{}", diff(&old, &new, format)?);
        }
        Command::Merge {
            base,
            updates,
            fields,
            output,
        } => {
            let base = records::read_record_object(&base)?;
            let updates = records::read_record_object(&updates)?;
            let merged =
                records::merge_records(base, &updates, fields.as_deref(), Timestamp::now());
            records::write_record(&output, &merged)?;
            println!("Merged records into {}", output.display());
            if let Some(fields) = fields {
                println!("Updated fields: {}", fields.join(", "));
            }
        }
        Command::Generate {
            count,
            kind,
            output_dir,
        } => {
            let dir = output_dir.unwrap_or_else(|| cfg.events.path.clone());
            let mut rng = rand::thread_rng();
            let written = generate_records(
                &mut rng,
                &dir,
                kind,
                count,
                cfg.map.viewport.center,
                Timestamp::now(),
            )?;
            for (file, title) in &written {
                println!("{file} - {title}");
            }
            println!("{} records written to {}", written.len(), dir.display());
        }
    }
    Ok(())
}

/// Problems with the configuration and the events.
///
/// Every event without coordinates is reported, regardless of the
/// default filter selection.
pub fn check(config: &MapConfig, events: &[Event]) -> Vec<String> {
    let mut problems = config::dangling_defaults(config);
    problems.extend(
        events
            .iter()
            .filter(|e| !e.is_placeable())
            .map(|e| format!("Event missing coordinates: {}", e.title)),
    );
    problems
}

pub fn list(dir: &Path, format: ListFormat) -> Result<String> {
    if !dir.is_dir() {
        return Err(anyhow!("{} is not a directory", dir.display()));
    }
    let files = records::list_record_files(dir)?;
    let mut out = String::new();
    match format {
        ListFormat::Json => {
            let paths: Vec<_> = files.iter().map(|f| f.display().to_string()).collect();
            writeln!(out, "{}", serde_json::to_string_pretty(&paths)?)?;
        }
        ListFormat::Table => {
            writeln!(out, "{:<40} {:>10}", "File", "Size")?;
            writeln!(out, "{}", "-".repeat(51))?;
            for file in &files {
                let size = fs::metadata(file)
                    .with_context(|| format!("Unable to read {}", file.display()))?
                    .len();
                let name = file
                    .file_name()
                    .map(|name| name.to_string_lossy())
                    .unwrap_or_default();
                writeln!(out, "{name:<40} {size:>8} B")?;
            }
            writeln!(out, "Total: {} events", files.len())?;
        }
    }
    Ok(out)
}

pub fn diff(old: &Path, new: &Path, format: DiffFormat) -> Result<String> {
    let old = records::read_record_object(old)?;
    let new = records::read_record_object(new)?;
    let diff = records::compare_records(&old, &new);
    let mut out = String::new();
    match format {
        DiffFormat::Json => {
            writeln!(out, "{}", serde_json::to_string_pretty(&diff)?)?;
        }
        DiffFormat::Text => {
            if diff.identical {
                writeln!(out, "Records are identical")?;
                return Ok(out);
            }
            writeln!(out, "Records differ")?;
            if !diff.added_fields.is_empty() {
                writeln!(out, "Added fields: {}", diff.added_fields.join(", "))?;
            }
            if !diff.removed_fields.is_empty() {
                writeln!(out, "Removed fields: {}", diff.removed_fields.join(", "))?;
            }
            if !diff.modified_fields.is_empty() {
                writeln!(out, "Modified fields:")?;
                for (field, change) in &diff.modified_fields {
                    writeln!(out, "  {field}:")?;
                    writeln!(out, "    old: {}", change.old)?;
                    writeln!(out, "    new: {}", change.new)?;
                }
            }
        }
    }
    Ok(out)
}

/// Write `count` test records and return their file names and titles.
pub fn generate_records<R: rand::Rng>(
    rng: &mut R,
    dir: &Path,
    kind: RecordKind,
    count: usize,
    center: MapPoint,
    now: Timestamp,
) -> Result<Vec<(String, String)>> {
    let mut written = Vec::with_capacity(count);
    for index in 0..count {
        let record = generate::generate_record(rng, kind, center, now);
        let file_name = generate::file_name(kind, index);
        records::write_record(&dir.join(&file_name), &record)?;
        written.push((file_name, record.title));
    }
    log::debug!("Generated {count} {} records", kind.as_str());
    Ok(written)
}

/// Apply the given selections in a fixed order and describe the result.
pub fn preview(map: &mut HeadlessEventMap, args: &PreviewArgs) -> Result<String> {
    for msg in args.messages() {
        map.update(msg);
    }
    let mut out = String::new();
    writeln!(out, "{}", map.counter().label())?;
    for marker in map.map().markers() {
        writeln!(
            out,
            "[{}] {} ({})",
            marker.id.to_index(),
            marker.title,
            marker.pos
        )?;
    }
    if let Some(index) = args.activate {
        let displayed = map.map().markers().len();
        if index >= displayed {
            return Err(anyhow!(
                "Cannot activate marker {index}: only {displayed} markers are displayed"
            ));
        }
        map.update(Msg::MarkerActivated(MarkerId::new(index)));
        let html = map
            .panel()
            .view()
            .html()
            .ok_or_else(|| anyhow!("The detail panel has not been rendered"))?;
        writeln!(out, "{html}")?;
    }
    Ok(out)
}
