use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::Context;
use colored::Colorize;
use oum_sdk::{FileStore, OpenUrbanMap};
use oum_server::config::ENV_DATA_PATH;
use oum_server::{OumServer, ServerConfig};
use serde_json::json;

use crate::cli::*;

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    let Cli { command, data, format, .. } = cli;
    match command {
        Command::Get => cmd_get(&open_store(data), &format),
        Command::Put(args) => cmd_put(&open_store(data), &args.input, &format),
        Command::Export(args) => match args.kind {
            ExportKind::Kmz { output } => cmd_export_kmz(&open_store(data), output, &format),
            ExportKind::Geojson { output } => {
                cmd_export_geojson(&open_store(data), output, &format)
            }
        },
        Command::Serve(args) => cmd_serve(args, data),
    }
}

fn open_store(flag: Option<PathBuf>) -> OpenUrbanMap {
    OpenUrbanMap::open(data_path(flag))
}

/// `--data`, then `$OUM_DATA_PATH`, then the default store location.
fn data_path(flag: Option<PathBuf>) -> PathBuf {
    flag.or_else(|| std::env::var_os(ENV_DATA_PATH).map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from(FileStore::DEFAULT_PATH))
}

fn cmd_get(oum: &OpenUrbanMap, format: &OutputFormat) -> anyhow::Result<()> {
    let document = oum.get()?;
    if let OutputFormat::Json = format {
        println!("{}", serde_json::to_string_pretty(&document)?);
        return Ok(());
    }

    println!("Store: {}", oum.store().path().display().to_string().bold());
    println!("Lines: {}", document.line_count().to_string().bold());
    for (i, line) in document.lines().enumerate() {
        let name = line.name();
        let label = if name.is_truthy() {
            name.to_string()
        } else {
            "(unnamed)".dimmed().to_string()
        };
        let hidden = if line.visible() { "" } else { " hidden" };
        println!(
            "  {:>3}. {} ({} points){}",
            i + 1,
            label,
            line.coordinates().len(),
            hidden.dimmed()
        );
    }
    println!("Traffic lights: {}", document.traffic_light_count().to_string().bold());
    for (i, light) in document.traffic_lights().enumerate() {
        println!("  {:>3}. {}", i + 1, light.position().to_string().cyan());
    }
    Ok(())
}

fn read_input(input: &str) -> anyhow::Result<String> {
    if input == "-" {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .context("reading document from stdin")?;
        Ok(text)
    } else {
        std::fs::read_to_string(input).with_context(|| format!("reading {input}"))
    }
}

fn cmd_put(oum: &OpenUrbanMap, input: &str, format: &OutputFormat) -> anyhow::Result<()> {
    let text = read_input(input)?;
    oum.put_json(&text)?;
    let document = oum.get()?;
    match format {
        OutputFormat::Json => println!(
            "{}",
            json!({
                "ok": true,
                "lines": document.line_count(),
                "trafficLights": document.traffic_light_count(),
            })
        ),
        OutputFormat::Text => println!(
            "{} Saved {} lines and {} traffic lights to {}",
            "✓".green().bold(),
            document.line_count(),
            document.traffic_light_count(),
            oum.store().path().display()
        ),
    }
    Ok(())
}

fn write_output(path: &Path, bytes: &[u8], format: &OutputFormat) -> anyhow::Result<()> {
    std::fs::write(path, bytes).with_context(|| format!("writing {}", path.display()))?;
    match format {
        OutputFormat::Json => println!(
            "{}",
            json!({ "ok": true, "path": path.display().to_string(), "bytes": bytes.len() })
        ),
        OutputFormat::Text => println!(
            "{} Wrote {} ({} bytes)",
            "✓".green().bold(),
            path.display().to_string().bold(),
            bytes.len()
        ),
    }
    Ok(())
}

fn cmd_export_kmz(
    oum: &OpenUrbanMap,
    output: Option<PathBuf>,
    format: &OutputFormat,
) -> anyhow::Result<()> {
    let export = oum.export_kmz()?;
    let path = output.unwrap_or_else(|| PathBuf::from(&export.filename));
    write_output(&path, &export.bytes, format)
}

fn cmd_export_geojson(
    oum: &OpenUrbanMap,
    output: Option<PathBuf>,
    format: &OutputFormat,
) -> anyhow::Result<()> {
    let collection = oum.export_geojson()?;
    let text = serde_json::to_string_pretty(&collection)?;
    match output {
        Some(path) => write_output(&path, text.as_bytes(), format),
        None => {
            println!("{text}");
            Ok(())
        }
    }
}

fn cmd_serve(args: ServeArgs, data: Option<PathBuf>) -> anyhow::Result<()> {
    let mut config = ServerConfig::load(&args.config)?;
    config.apply_env()?;
    if let Some(data) = data {
        config.data_path = data;
    }
    if let Some(bind) = args.bind {
        config.bind_addr = bind
            .parse()
            .with_context(|| format!("invalid bind address {bind}"))?;
    }
    if config.map.api_token.is_empty() {
        tracing::warn!("MAPBOX_TOKEN is not set; the drawing page will have no base map");
    }

    println!(
        "OpenUrbanMap server on {} (data: {})",
        config.bind_addr.to_string().bold(),
        config.data_path.display()
    );
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(OumServer::new(config).serve())?;
    Ok(())
}
