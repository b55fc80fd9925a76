//! JSON output formatter for machine processing

use crate::output::{OutputFormatter, Report};
use crate::pipeline::FetchOutcome;
use serde::Serialize;
use std::io::Write;

/// JSON formatter for machine-readable output
#[derive(Default)]
pub struct JsonFormatter;

impl JsonFormatter {
    /// Create a new JSON formatter
    pub fn new() -> Self {
        Self
    }
}

/// JSON representation of a report
#[derive(Serialize)]
#[serde(tag = "command", rename_all = "snake_case")]
enum JsonOutput<'a> {
    Init {
        manifest: String,
        target_dir: &'a str,
    },
    Fetch {
        target_dir: &'a str,
        dependencies: &'a [FetchOutcome],
    },
}

impl OutputFormatter for JsonFormatter {
    fn format(&self, report: &Report, writer: &mut dyn Write) -> std::io::Result<()> {
        let output = match report {
            Report::Initialized {
                manifest_path,
                target_dir,
            } => JsonOutput::Init {
                manifest: manifest_path.display().to_string(),
                target_dir,
            },
            Report::Fetched {
                target_dir,
                outcomes,
            } => JsonOutput::Fetch {
                target_dir,
                dependencies: outcomes,
            },
        };

        serde_json::to_writer_pretty(&mut *writer, &output)?;
        writeln!(writer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::manifest::ResolvedDependency;
    use std::path::PathBuf;

    fn render(report: &Report) -> serde_json::Value {
        let mut out = Vec::new();
        JsonFormatter::new().format(report, &mut out).unwrap();
        serde_json::from_slice(&out).unwrap()
    }

    #[test]
    fn test_init_json() {
        let value = render(&Report::Initialized {
            manifest_path: PathBuf::from("pkgit.req"),
            target_dir: "vendor".to_string(),
        });
        assert_eq!(value["command"], "init");
        assert_eq!(value["manifest"], "pkgit.req");
        assert_eq!(value["target_dir"], "vendor");
    }

    #[test]
    fn test_fetch_json_uses_manifest_field_names() {
        let value = render(&Report::Fetched {
            target_dir: "vendor".to_string(),
            outcomes: vec![FetchOutcome {
                tag: "v1.0.0".to_string(),
                dependency: ResolvedDependency::new("1.0.0", "abc", "a/b@1.0.0"),
                previous: None,
                files: 2,
            }],
        });

        assert_eq!(value["command"], "fetch");
        let dep = &value["dependencies"][0];
        assert_eq!(dep["tag"], "v1.0.0");
        assert_eq!(dep["files"], 2);
        assert_eq!(dep["dependency"]["Semver"], "1.0.0");
        assert_eq!(dep["dependency"]["Repo"], "a/b@1.0.0");
        assert!(dep.get("previous").is_none());
    }
}
