//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `assignboard_core` linkage.
//! - Keep output deterministic for quick local sanity checks.

use assignboard_core::{CountryCatalog, FieldValidator, FormField, FormRecord};
use std::sync::Arc;

fn main() {
    println!("assignboard_core ping={}", assignboard_core::ping());
    println!("assignboard_core version={}", assignboard_core::core_version());

    // One rule per argument pair, e.g. `assignboard_cli email a@b.co`.
    let args: Vec<String> = std::env::args().skip(1).collect();
    let validator = FieldValidator::new(Arc::new(CountryCatalog::builtin()));
    let record = FormRecord::default();
    for pair in args.chunks(2) {
        let [name, value] = pair else {
            eprintln!("missing value for `{}`", pair[0]);
            std::process::exit(2);
        };
        let Some(field) = FormField::parse(name) else {
            eprintln!("unknown field `{name}`");
            std::process::exit(2);
        };
        let message = validator.validate(field, value, &record);
        if message.is_empty() {
            println!("{}=ok", field.as_str());
        } else {
            println!("{}=invalid message={message}", field.as_str());
        }
    }
}
