use healthprobe_core::{CollectorConfig, default_probes};

pub fn run(config: &CollectorConfig) {
    let probes = default_probes(config);

    println!("{} health probe(s):\n", probes.len());
    for probe in &probes {
        let info = probe.info();
        let mark = if probe.is_available() { "ok" } else { "--" };
        println!(
            "  [{mark}] {:<20} ({:<7}) {}",
            info.name, info.category, info.description
        );
    }
}
