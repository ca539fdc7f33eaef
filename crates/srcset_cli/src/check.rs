//! `srcset check`: verify stored properties files match a fresh resolution.

use srcset_properties::{PropertiesFile, PropertiesStore, StoreError};

use crate::pipeline::{resolve_modules, resolve_project_root, select_modules};
use crate::{GlobalArgs, ModuleArgs};

/// State of a module's stored properties file relative to a fresh resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Freshness {
    Current,
    Missing,
    Malformed,
    Outdated,
}

/// Runs the check command.
///
/// Returns exit code 1 if any module fails to resolve or its stored file is
/// missing, malformed or out of date. Nothing is written.
pub fn run(args: &ModuleArgs, global: &GlobalArgs) -> Result<i32, Box<dyn std::error::Error>> {
    let project_dir = resolve_project_root(global)?;
    let config = srcset_config::load_config(&project_dir)?;
    let modules = select_modules(&config, &args.modules)?;

    let mut code = 0;
    for outcome in resolve_modules(&config, &modules) {
        let file = match outcome.result {
            Ok(file) => file,
            Err(e) => {
                eprintln!("error: {e}");
                code = 1;
                continue;
            }
        };

        let store = PropertiesStore::for_module(&project_dir, &outcome.module);
        let label = match freshness(&store, &file) {
            Ok(Freshness::Current) => {
                if !global.quiet {
                    eprintln!("         Ok {}", outcome.module);
                }
                continue;
            }
            Ok(Freshness::Missing) => "Missing",
            Ok(Freshness::Malformed) => "Malformed",
            Ok(Freshness::Outdated) => "Outdated",
            Err(e) => {
                eprintln!("error: module '{}': {e}", outcome.module);
                code = 1;
                continue;
            }
        };
        eprintln!(
            "{label:>11} {} ({})",
            outcome.module,
            store.path().display()
        );
        code = 1;
    }
    Ok(code)
}

fn freshness(store: &PropertiesStore, file: &PropertiesFile) -> Result<Freshness, StoreError> {
    if store.is_up_to_date(file)? {
        return Ok(Freshness::Current);
    }
    match store.load() {
        Ok(None) => Ok(Freshness::Missing),
        Ok(Some(_)) => Ok(Freshness::Outdated),
        Err(StoreError::Codec { .. }) => Ok(Freshness::Malformed),
        Err(e) => Err(e),
    }
}
