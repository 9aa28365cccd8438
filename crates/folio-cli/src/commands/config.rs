use folio_config::FolioConfig;

use crate::cli::{GlobalFlags, OutputFormat};
use crate::output::output;

/// Handle `folio config`. Text output is TOML, ready for `.folio/config.toml`.
pub fn handle(config: &FolioConfig, flags: &GlobalFlags) -> anyhow::Result<()> {
    match flags.format {
        OutputFormat::Text => {
            print!("{}", toml::to_string_pretty(config)?);
            Ok(())
        }
        format => output(config, format),
    }
}

#[cfg(test)]
mod tests {
    use folio_config::FolioConfig;

    #[test]
    fn effective_config_round_trips_through_toml() {
        let rendered = toml::to_string_pretty(&FolioConfig::default()).unwrap();
        assert!(rendered.contains("[proxy]"));
        assert!(rendered.contains("interval_minutes = 30"));

        let parsed: FolioConfig = toml::from_str(&rendered).unwrap();
        assert_eq!(parsed.baseline.reads, "1243");
        assert_eq!(parsed.proxy.endpoints.len(), 3);
    }
}
