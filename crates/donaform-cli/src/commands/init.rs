use crate::support::{print_json, yes_no};
use donaform_kernel::FormValues;
use serde_json::json;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct InitOutcome {
    pub values_path: PathBuf,
    pub overwritten: bool,
}

pub fn write_blank_form(path: impl AsRef<Path>, force: bool) -> Result<InitOutcome, String> {
    let values_path = path.as_ref().to_path_buf();

    let exists = values_path.exists();
    if exists && !values_path.is_file() {
        return Err(format!(
            "values path exists but is not a file: {}",
            values_path.display()
        ));
    }
    if exists && !force {
        return Err(format!(
            "values file already exists: {} (pass --force to overwrite)",
            values_path.display()
        ));
    }

    if let Some(parent) = values_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .map_err(|e| format!("failed to create {}: {e}", parent.display()))?;
    }

    let payload = serde_json::to_vec_pretty(&FormValues::default())
        .map_err(|e| format!("failed to serialize blank form: {e}"))?;
    fs::write(&values_path, payload)
        .map_err(|e| format!("failed to write {}: {e}", values_path.display()))?;

    Ok(InitOutcome {
        values_path,
        overwritten: exists,
    })
}

pub fn run(path: String, force: bool, json_output: bool) {
    let outcome = write_blank_form(&path, force).unwrap_or_else(|e| {
        eprintln!("error: {e}");
        std::process::exit(1);
    });

    if json_output {
        print_json(&json!({
            "valuesPath": outcome.values_path.display().to_string(),
            "overwritten": outcome.overwritten,
        }));
    } else {
        println!("donaform init {path}");
        println!();
        println!("  values path: {}", outcome.values_path.display());
        println!("  overwritten: {}", yes_no(outcome.overwritten));
    }
}
