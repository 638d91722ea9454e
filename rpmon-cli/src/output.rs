//! Terminal output formatting.

use colored::Colorize;
use rpmon_core::{ChainDescriptor, MonitoringRuleSpec};

/// Print a success message.
pub fn success(msg: &str) {
    println!("{} {}", "✓".green().bold(), msg.green());
}

/// Print an error message.
pub fn error(msg: &str) {
    eprintln!("{} {}", "✗".red().bold(), msg.red());
}

/// Print an info message.
pub fn info(msg: &str) {
    println!("{} {}", "→".cyan(), msg);
}

/// Print a header.
pub fn header(msg: &str) {
    println!("\n{}", msg.white().bold());
    println!("{}", "─".repeat(msg.chars().count()).dimmed());
}

/// Print a key-value pair.
pub fn kv(key: &str, value: &str) {
    println!("  {} {}", format!("{}:", key).dimmed(), value);
}

/// Print a helpful hint.
pub fn hint(msg: &str) {
    println!("{} {}", "💡".dimmed(), msg.dimmed());
}

/// Print the resolved chain.
pub fn chain(descriptor: &ChainDescriptor, registry_key: &str) {
    header(&format!("{} (chain {})", descriptor.name, descriptor.id));
    kv("RPC", descriptor.default_rpc().unwrap_or("-"));
    if let Some(explorer) = &descriptor.block_explorer {
        kv("Explorer", &format!("{} ({})", explorer.name, explorer.url));
        kv("Explorer API", explorer.api_url.as_deref().unwrap_or("-"));
    }
    kv("Registry key", registry_key);
}

/// Print one derived rule.
pub fn rule(spec: &MonitoringRuleSpec) {
    let def = spec.definition();
    header(&def.agent_name);
    kv("Kind", spec.kind().as_str());
    kv("Rule", &def.rule);
    kv("Targets", if def.alias.is_empty() { "(none)" } else { &def.alias });
}
