//! impactkit - color palettes and station table conversion
//!
//! This is the main entry point for the impactkit command-line tool.

use std::path::Path;
use std::time::Instant;

use anyhow::{bail, Context};
use tracing::{error, info};

use impactkit::config::Command;
use impactkit::logging::{
    init_tracing, log_error, log_operation_end, log_operation_start, log_timed_operation,
};
use impactkit::palette::ColorPalette;
use impactkit::{read_workbook, write_json, write_xml, Config};

fn main() -> anyhow::Result<()> {
    let (config, command) = Config::load().context("Failed to load configuration")?;
    config.validate().context("Invalid configuration")?;

    init_tracing(&config.log_level);
    info!("Starting impactkit v{}", env!("CARGO_PKG_VERSION"));

    match command {
        Command::Presets => {
            for name in ColorPalette::presets() {
                println!("{}", name);
            }
        }
        Command::Color {
            preset,
            file,
            vmin,
            vmax,
            values,
        } => {
            let mut palette = match (&preset, &file) {
                (_, Some(path)) => ColorPalette::from_file(path)
                    .with_context(|| format!("Failed to load palette {}", path.display()))?,
                (Some(name), None) => ColorPalette::from_preset(name)?,
                (None, None) => ColorPalette::from_preset(&config.palette.default_preset)?,
            };
            if let Some(vmin) = vmin {
                palette.set_vmin(vmin);
            }
            if let Some(vmax) = vmax {
                palette.set_vmax(vmax);
            }

            for value in values {
                let [r, g, b, a] = palette.color_for(value)?;
                println!("{}\t{:.4} {:.4} {:.4} {:.4}", value, r, g, b, a);
            }
        }
        Command::Convert { input, json, xml } => {
            if json.is_none() && xml.is_none() {
                bail!("Nothing to do: pass --json and/or --xml");
            }
            convert(&config, &input, json.as_deref(), xml.as_deref())?;
        }
    }

    Ok(())
}

fn convert(config: &Config, input: &Path, json: Option<&Path>, xml: Option<&Path>) -> anyhow::Result<()> {
    let start = Instant::now();
    log_operation_start("convert", Some(&input.display().to_string()));

    let result = (|| -> anyhow::Result<()> {
        let parsed = read_workbook(input)
            .map_err(|e| {
                log_error(&e, "read_workbook");
                e
            })
            .with_context(|| format!("Failed to read station workbook {}", input.display()))?;

        if let Some(path) = json {
            log_timed_operation("write_json", || write_json(&parsed.table, path, &config.export))
                .with_context(|| format!("Failed to write {}", path.display()))?;
        }
        if let Some(path) = xml {
            log_timed_operation("write_xml", || {
                write_xml(&parsed.table, path, parsed.reference.as_deref(), &config.export)
            })
            .with_context(|| format!("Failed to write {}", path.display()))?;
        }
        Ok(())
    })();

    if let Err(e) = &result {
        error!("Conversion failed: {:#}", e);
    }
    log_operation_end("convert", start, result.is_ok());
    result
}
