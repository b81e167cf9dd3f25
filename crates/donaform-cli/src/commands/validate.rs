use crate::support::{
    load_config_or_exit, load_values_or_exit, print_error_block, print_json, yes_no,
};
use donaform_kernel::{FormStore, RuleSet};
use serde_json::json;

pub fn run(values: String, config: Option<String>, json_output: bool) {
    let config = load_config_or_exit(config.as_deref(), None);
    let form = load_values_or_exit(&values);
    let store = FormStore::new(form, RuleSet::from_limits(&config.limits));
    let valid = store.is_valid();

    if json_output {
        print_json(&json!({
            "source": values,
            "valid": valid,
            "errorCount": store.errors().message_count(),
            "errors": store.errors(),
            "rules": store.rules(),
        }));
    } else {
        println!("donaform validate {values}");
        println!("  Entries: {}", store.entry_count());
        println!("  Valid: {}", yes_no(valid));
        print_error_block(store.errors());
    }

    if !valid {
        std::process::exit(1);
    }
}
