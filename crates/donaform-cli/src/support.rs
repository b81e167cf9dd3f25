use donaform_kernel::{FormConfig, FormValues, ValidationResult};
use serde::Serialize;
use std::fs;
use std::io::IsTerminal;
use std::process;
use tracing_subscriber::EnvFilter;

/// Log to stderr. Kernel events show at `info` unless `RUST_LOG` says otherwise.
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn,donaform_kernel=info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .try_init();
}

pub fn load_config_or_exit(config: Option<&str>, delay_ms: Option<u64>) -> FormConfig {
    let mut loaded = match config {
        Some(path) => FormConfig::load(path).unwrap_or_else(|e| {
            eprintln!("error: failed to load config {path}: {e}");
            process::exit(1);
        }),
        None => FormConfig::default(),
    };
    if let Some(delay_ms) = delay_ms {
        loaded.submit.delay_ms = delay_ms;
    }
    loaded
}

pub fn load_values_or_exit(path: &str) -> FormValues {
    let raw = fs::read_to_string(path).unwrap_or_else(|e| {
        eprintln!("error: failed to read {path}: {e}");
        process::exit(1);
    });
    serde_json::from_str(&raw).unwrap_or_else(|e| {
        eprintln!("error: failed to parse form values {path}: {e}");
        process::exit(1);
    })
}

pub fn runtime_or_exit() -> tokio::runtime::Runtime {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .unwrap_or_else(|e| {
            eprintln!("error: failed to create tokio runtime: {e}");
            process::exit(1);
        })
}

pub fn print_json<T: Serialize>(payload: &T) {
    println!(
        "{}",
        serde_json::to_string_pretty(payload).expect("json serialization")
    );
}

pub fn print_error_block(errors: &ValidationResult) {
    if errors.is_empty() {
        return;
    }

    println!("  Errors ({}):", errors.message_count());
    for path in errors.paths() {
        for message in errors.messages(path) {
            println!("    - {path}: {message}");
        }
    }
}

pub fn yes_no(ok: bool) -> &'static str {
    if ok { "yes" } else { "no" }
}
