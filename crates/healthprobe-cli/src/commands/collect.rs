use std::path::Path;

use healthprobe_core::{Collector, CollectorConfig};
use uuid::Uuid;

pub fn run(config: &CollectorConfig, output: Option<&Path>) {
    let session_id = Uuid::new_v4().to_string();
    log::info!("starting collection session {session_id}");

    let collector = Collector::new(config.clone());
    let report = collector.collect_all(&session_id);

    let json = match serde_json::to_string_pretty(&report) {
        Ok(json) => json,
        Err(e) => {
            eprintln!("Failed to serialize report: {e}");
            std::process::exit(1);
        }
    };

    match output {
        Some(path) => {
            if let Err(e) = std::fs::write(path, &json) {
                eprintln!("Failed to write {}: {e}", path.display());
                std::process::exit(1);
            }
            println!("Report written to {}", path.display());
        }
        None => println!("{json}"),
    }
}
