//! Plugin discovery report.

use anyhow::Result;

use replcalc::plugins::DiscoveryReport;
use replcalc::{App, Config};

/// Run discovery once and print what it found.
pub(crate) fn cmd_plugins(config: &Config) -> Result<()> {
    let app = App::bootstrap(config);
    println!("Plugin directory: {}", config.plugins_dir().display());
    println!("Discovery: {:?}", config.discovery);
    println!();
    for line in render_report(app.report()) {
        println!("{}", line);
    }
    Ok(())
}

fn render_report(report: &DiscoveryReport) -> Vec<String> {
    let mut lines = vec![format!("Loaded ({}):", report.loaded.len())];
    lines.extend(
        report
            .loaded
            .iter()
            .enumerate()
            .map(|(i, name)| format!("  {}. {}", i + 1, name)),
    );

    if !report.skipped.is_empty() {
        lines.push(format!("Skipped ({}):", report.skipped.len()));
        lines.extend(report.skipped.iter().map(|name| format!("  - {}", name)));
    }

    if !report.failures.is_empty() {
        lines.push(format!("Failed ({}):", report.failures.len()));
        lines.extend(
            report
                .failures
                .iter()
                .map(|f| format!("  - {}: {}", f.candidate, f.error)),
        );
    }

    lines
}
