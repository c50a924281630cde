//! Human-readable terminal renderer.

use std::path::Path;

use autodock_common::{ContainerRecord, ContainerStatus, DetectionReport, InfoOutput};
use owo_colors::OwoColorize as _;

use crate::domain::AutodockConfig;
use crate::output::OutputContext;

/// Renders domain types as human-readable terminal output using `OutputContext`.
pub struct HumanRenderer<'a> {
    ctx: &'a OutputContext,
}

impl<'a> HumanRenderer<'a> {
    /// Create a new `HumanRenderer` wrapping the given output context.
    #[must_use]
    pub fn new(ctx: &'a OutputContext) -> Self {
        Self { ctx }
    }

    /// Render the CLI version information.
    pub fn render_version(&self, version: &str) {
        if self.ctx.quiet {
            return;
        }
        self.ctx.info(&format!("autodock v{version}"));
    }

    pub fn render_detection(&self, report: &DetectionReport) {
        self.ctx.header("Detected project");
        self.ctx.kv("Type:     ", report.project_type.friendly_name());
        self.ctx.kv("Port:     ", &report.port.to_string());
        if let Some(entry) = &report.entry {
            self.ctx.kv("Entry:    ", entry);
        }
        self.ctx
            .kv("Datastore:", if report.datastore { "MongoDB" } else { "none" });
        self.ctx.kv("Container:", &report.name);
    }

    pub fn render_deployed(&self, record: &ContainerRecord, container_id: &str) {
        let short_id: String = container_id.chars().take(12).collect();
        self.ctx
            .success(&format!("{} is running ({short_id})", record.name));
        self.ctx
            .info(&format!("Open http://localhost:{}", record.port));
    }

    /// Render container status and the stored record.
    pub fn render_info(&self, info: &InfoOutput) {
        let style = match info.status {
            ContainerStatus::Running => self.ctx.styles.running,
            ContainerStatus::Stopped | ContainerStatus::NotFound => self.ctx.styles.stopped,
        };
        self.ctx.kv("Container:", &info.name);
        self.ctx
            .kv("Status:   ", &info.status.as_str().style(style).to_string());
        match &info.record {
            Some(record) => {
                self.ctx.kv("Type:     ", record.project_type.friendly_name());
                self.ctx.kv("Port:     ", &record.port.to_string());
                if let Some(entry) = &record.entry {
                    self.ctx.kv("Entry:    ", entry);
                }
                self.ctx.kv(
                    "Created:  ",
                    &record.created_at.format("%Y-%m-%d %H:%M:%S UTC").to_string(),
                );
            }
            None => self.ctx.info("No container record for this project."),
        }
    }

    pub fn render_deleted(&self, name: &str, removed: bool, record_cleared: bool) {
        if removed {
            self.ctx.success(&format!("Removed {name}"));
        } else {
            self.ctx.warn(&format!("No container named {name}"));
        }
        if record_cleared {
            self.ctx.info("Container record cleared.");
        }
    }

    /// Pass the engine's listing through unchanged.
    pub fn render_listing(&self, listing: &str) {
        if !self.ctx.quiet {
            print!("{listing}");
        }
    }

    /// Render the current configuration.
    pub fn render_config(&self, config: &AutodockConfig, path: &Path) {
        println!();
        println!(
            "  {}",
            format!("Configuration ({})", path.display()).style(self.ctx.styles.header)
        );
        println!();
        println!("  {:<20} {}", "engine.binary:", config.engine.binary);
        println!("  {:<20} {}", "logs.tail:", config.logs.tail);
        println!("  {:<20} {}", "images.node:", config.images.node);
        println!("  {:<20} {}", "images.python:", config.images.python);
        println!("  {:<20} {}", "images.nginx:", config.images.nginx);
        println!();
        println!("  {}", "Environment:".style(self.ctx.styles.bold));
        for var in ["AUTODOCK_CONFIG", "AUTODOCK_ENGINE", "NO_COLOR"] {
            println!(
                "    {:<18} {}",
                format!("{var}:"),
                std::env::var(var).unwrap_or_else(|_| "(not set)".to_string())
            );
        }
        println!();
    }
}
