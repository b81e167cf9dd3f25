use crate::commands::submit::state_label;
use crate::support::{
    load_config_or_exit, load_values_or_exit, print_error_block, print_json, runtime_or_exit,
    yes_no,
};
use donaform_kernel::{EventOutcome, FormConfig, FormEvent, FormSession, FormValues};
use serde_json::json;
use std::fs;
use std::process;

pub struct Args {
    pub events: String,
    pub values: Option<String>,
    pub config: Option<String>,
    pub delay_ms: Option<u64>,
    pub json: bool,
}

/// Parse a JSONL event stream; blank lines are skipped.
pub fn parse_events(raw: &str) -> Result<Vec<FormEvent>, String> {
    raw.lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(i, line)| {
            serde_json::from_str(line).map_err(|e| format!("line {}: invalid event: {e}", i + 1))
        })
        .collect()
}

pub fn run(args: Args) {
    let config = load_config_or_exit(args.config.as_deref(), args.delay_ms);
    let values = args
        .values
        .as_deref()
        .map(load_values_or_exit)
        .unwrap_or_default();

    let raw = fs::read_to_string(&args.events).unwrap_or_else(|e| {
        eprintln!("error: failed to read {}: {e}", args.events);
        process::exit(1);
    });
    let events = parse_events(&raw).unwrap_or_else(|e| {
        eprintln!("error: {}: {e}", args.events);
        process::exit(1);
    });

    let runtime = runtime_or_exit();
    let (session, outcomes) = runtime.block_on(replay(values, &config, events));

    let view = session.view();
    if args.json {
        print_json(&json!({
            "source": args.events,
            "eventCount": outcomes.len(),
            "outcomes": outcomes,
            "view": view,
        }));
    } else {
        let submitted = outcomes
            .iter()
            .filter(|o| matches!(o, EventOutcome::Submitted { .. }))
            .count();
        println!("donaform replay {}", args.events);
        println!("  Events: {}", outcomes.len());
        println!("  Entries: {}", view.values.donations.len());
        println!("  Valid: {}", yes_no(view.valid));
        println!("  Submit attempts: {}", view.submit_count);
        println!("  Submitted: {submitted}");
        println!("  State: {}", state_label(view.submission));
        print_error_block(&view.errors);
    }
}

async fn replay(
    values: FormValues,
    config: &FormConfig,
    events: Vec<FormEvent>,
) -> (FormSession, Vec<EventOutcome>) {
    let mut session = FormSession::from_config(values, config);
    let mut outcomes = Vec::with_capacity(events.len());

    for (i, event) in events.into_iter().enumerate() {
        match session.dispatch(event).await {
            Ok(outcome) => outcomes.push(outcome),
            Err(e) => {
                eprintln!("error: event {}: {e}", i + 1);
                process::exit(1);
            }
        }
    }

    (session, outcomes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_events_and_skips_blank_lines() {
        let raw = r#"{"type":"setField","path":"fullName","value":"Jane"}

{"type":"addEntry"}
{"type":"submit"}
"#;
        let events = parse_events(raw).expect("events parse");
        assert_eq!(events.len(), 3);
        assert_eq!(events[1], FormEvent::AddEntry);
        assert_eq!(events[2], FormEvent::Submit);
    }

    #[test]
    fn reports_line_of_bad_event() {
        let raw = "{\"type\":\"addEntry\"}\n{\"type\":\"explode\"}\n";
        let err = parse_events(raw).expect_err("unknown event type");
        assert!(err.starts_with("line 2:"), "{err}");
    }
}
