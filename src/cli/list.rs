//! List installed releases.
//!
//! ```bash
//! grab list                 # one line per package
//! grab list --format json   # the state document
//! ```

use anyhow::Result;
use clap::{Args, ValueEnum};
use colored::Colorize;

use crate::config::GrabConfig;
use crate::state::{Owners, StateStore};

/// Output format of `grab list`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ListFormat {
    /// `owner/repo  version  path`, sorted by owner then repo
    Text,
    /// The state document, pretty-printed
    Json,
}

/// Arguments of `grab list`.
#[derive(Args, Debug)]
pub struct ListCommand {
    /// Output format
    #[arg(long, value_enum, default_value_t = ListFormat::Text)]
    format: ListFormat,
}

impl ListCommand {
    pub fn execute(self, config: &GrabConfig) -> Result<()> {
        let owners = StateStore::new(&config.state_file).list()?;
        println!("{}", render(&owners, self.format)?);
        Ok(())
    }
}

/// Render the installed releases in `format`.
pub fn render(owners: &Owners, format: ListFormat) -> Result<String> {
    match format {
        ListFormat::Json => Ok(serde_json::to_string_pretty(owners)?),
        ListFormat::Text => {
            let releases: Vec<_> = owners.values().flat_map(|repos| repos.values()).collect();
            if releases.is_empty() {
                return Ok("No packages installed".to_string());
            }

            let width = releases.iter().map(|r| r.slug().len()).max().unwrap_or(0);
            let lines: Vec<String> = releases
                .iter()
                .map(|r| {
                    format!(
                        "{:<width$}  {}  {}",
                        r.slug(),
                        r.version.green(),
                        r.installed_path.display()
                    )
                })
                .collect();
            Ok(lines.join("\n"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Release;
    use std::path::PathBuf;

    fn owners() -> Owners {
        let mut owners = Owners::new();
        for (owner, repo, version) in
            [("globex", "zap", "v0.1.0"), ("acme", "tool", "v1.0.0"), ("acme", "cli", "v2.3.4")]
        {
            owners.entry(owner.to_string()).or_default().insert(
                repo.to_string(),
                Release {
                    owner: owner.to_string(),
                    repo: repo.to_string(),
                    version: version.to_string(),
                    url: format!("https://dl.test/{repo}_linux"),
                    installed_path: PathBuf::from(format!("grab/bin/{repo}_linux")),
                },
            );
        }
        owners
    }

    #[test]
    fn test_render_text_sorted() {
        colored::control::set_override(false);

        let text = render(&owners(), ListFormat::Text).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("acme/cli "));
        assert!(lines[1].starts_with("acme/tool "));
        assert!(lines[2].starts_with("globex/zap"));
        assert!(lines[1].contains("v1.0.0"));
        assert!(lines[1].ends_with("grab/bin/tool_linux"));
    }

    #[test]
    fn test_render_text_empty() {
        assert_eq!(render(&Owners::new(), ListFormat::Text).unwrap(), "No packages installed");
    }

    #[test]
    fn test_render_json_is_state_document() {
        let json = render(&owners(), ListFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["acme"]["tool"]["version"], "v1.0.0");
        assert_eq!(value["globex"]["zap"]["installed_path"], "grab/bin/zap_linux");
    }
}
