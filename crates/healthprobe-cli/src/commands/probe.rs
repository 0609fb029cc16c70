use healthprobe_core::{CollectorConfig, default_probes, is_known};

pub fn run(config: &CollectorConfig, name: &str) {
    let probes = default_probes(config);

    let Some(probe) = probes.iter().find(|p| p.name().contains(name)) else {
        eprintln!("Unknown probe: {name}. Use `healthprobe scan` to list probes.");
        std::process::exit(1);
    };

    let info = probe.info();
    println!("{} — {}", info.name, info.description);
    if !probe.is_available() {
        println!("  (not available on this machine)");
    }

    let score = probe.run();
    if is_known(score) {
        println!("  score: {score}/100");
    } else {
        println!("  score: unknown");
    }
}
