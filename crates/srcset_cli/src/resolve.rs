//! `srcset resolve`: write each module's properties file when it changed.

use srcset_properties::{PropertiesFile, PropertiesStore, StoreError, WriteOutcome};

use crate::pipeline::{resolve_modules, resolve_project_root, select_modules};
use crate::{GlobalArgs, ModuleArgs};

/// Runs the resolve command. Returns exit code 1 if any module failed.
///
/// A module that fails to resolve or to persist is reported and skipped; the
/// remaining modules are still written.
pub fn run(args: &ModuleArgs, global: &GlobalArgs) -> Result<i32, Box<dyn std::error::Error>> {
    let project_dir = resolve_project_root(global)?;
    let config = srcset_config::load_config(&project_dir)?;
    let modules = select_modules(&config, &args.modules)?;

    if !global.quiet {
        eprintln!(
            "   Resolving {} ({} module(s))",
            config.project.name,
            modules.len()
        );
    }

    let mut failed = 0usize;
    for outcome in resolve_modules(&config, &modules) {
        let file = match outcome.result {
            Ok(file) => file,
            Err(e) => {
                eprintln!("error: {e}");
                failed += 1;
                continue;
            }
        };

        let store = PropertiesStore::for_module(&project_dir, &outcome.module);
        let status = match persist(&store, &file) {
            Ok(status) => status,
            Err(e) => {
                eprintln!("error: module '{}': {e}", outcome.module);
                failed += 1;
                continue;
            }
        };
        if !global.quiet {
            eprintln!(
                "{status:>11} {} ({} database(s))",
                outcome.module,
                file.databases.len()
            );
        }
    }

    if failed > 0 {
        eprintln!("error: {failed} module(s) failed");
        return Ok(1);
    }
    Ok(0)
}

/// Writes `file` if needed and returns the status word to print.
fn persist(store: &PropertiesStore, file: &PropertiesFile) -> Result<&'static str, StoreError> {
    let had_baseline = store.load_baseline()?.is_some();
    Ok(match store.write_if_changed(file)? {
        WriteOutcome::Unchanged => "Fresh",
        WriteOutcome::Written if had_baseline => "Updated",
        WriteOutcome::Written => "Created",
    })
}
