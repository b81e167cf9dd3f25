use crate::support::{
    load_config_or_exit, load_values_or_exit, print_error_block, print_json, runtime_or_exit,
};
use donaform_kernel::{FormStore, LoggingSubmitter, RuleSet, SubmissionController, SubmissionState};
use serde_json::json;

pub fn run(values: String, config: Option<String>, delay_ms: Option<u64>, json_output: bool) {
    let config = load_config_or_exit(config.as_deref(), delay_ms);
    let form = load_values_or_exit(&values);
    let store = FormStore::new(form, RuleSet::from_limits(&config.limits));
    let controller = SubmissionController::new();
    let submitter = LoggingSubmitter::new(config.submit.delay());

    let runtime = runtime_or_exit();
    let result = runtime.block_on(controller.submit(&store, &submitter));

    match result {
        Ok(receipt) => {
            if json_output {
                print_json(&json!({
                    "source": values,
                    "submitted": true,
                    "state": controller.state(),
                    "receipt": receipt,
                }));
            } else {
                println!("donaform submit {values}");
                println!("  Submission: {}", receipt.id);
                println!("  Started: {}", receipt.started_at.to_rfc3339());
                println!("  Finished: {}", receipt.finished_at.to_rfc3339());
                println!("  State: {}", state_label(controller.state()));
            }
        }
        Err(e) => {
            if json_output {
                print_json(&json!({
                    "source": values,
                    "submitted": false,
                    "reason": e.to_string(),
                    "errors": store.errors(),
                }));
            } else {
                println!("donaform submit {values}");
                println!("  Refused: {e}");
                print_error_block(store.errors());
            }
            std::process::exit(1);
        }
    }
}

pub fn state_label(state: SubmissionState) -> &'static str {
    match state {
        SubmissionState::Idle => "idle",
        SubmissionState::Submitting => "submitting",
    }
}
