//! `srcset show`: print a module's resolved compilation units.

use std::fmt::Write as _;

use srcset_properties::PropertiesFile;

use crate::pipeline::{resolve_module, resolve_project_root};
use crate::{GlobalArgs, ShowArgs, ShowFormat};

/// Runs the show command, printing to stdout.
pub fn run(args: &ShowArgs, global: &GlobalArgs) -> Result<i32, Box<dyn std::error::Error>> {
    let project_dir = resolve_project_root(global)?;
    let config = srcset_config::load_config(&project_dir)?;
    let file = resolve_module(&config, &args.module)?;

    let output = match args.format {
        ShowFormat::Text => render_text(&file),
        ShowFormat::Json => srcset_properties::encode(&file)?,
    };
    print!("{output}");
    Ok(0)
}

/// Renders a properties file as an indented listing.
fn render_text(file: &PropertiesFile) -> String {
    let mut out = String::new();
    for db in &file.databases {
        let _ = writeln!(out, "{} -> {}", db.package_name, db.output_directory);
        for unit in &db.compilation_units {
            let _ = writeln!(out, "  {}", unit.name);
            for folder in &unit.source_folders {
                let _ = writeln!(out, "    {folder}");
            }
        }
    }
    out
}
