//! Runtime settings.
//!
//! Settings are read from an optional `invoice-gen.toml` in the working directory and
//! then from `INVOICE_GEN__*` environment variables (a `.env` file is loaded first),
//! e.g. `INVOICE_GEN__ARTIFACTS_DIR=/srv/invoices`. Every key has a default, so no
//! configuration at all is a valid configuration. Page, margin and type sizes that
//! can't hold an invoice are rejected when loading.

use crate::layout::{LayoutSettings, Margins};
use crate::pagesize::PaperFormat;
use crate::units::Pt;
use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Directory finished invoices are written to
    pub artifacts_dir: PathBuf,
    /// Prefix of the retrieval path handed back to callers
    pub retrieval_prefix: String,
    pub page_size: PaperFormat,
    /// Margin on all four sides, in points
    pub margin: f32,
    pub body_font_size: f32,
    pub title_font_size: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            artifacts_dir: PathBuf::from("invoices"),
            retrieval_prefix: "/invoices".to_string(),
            page_size: PaperFormat::Letter,
            margin: 72.0,
            body_font_size: 12.0,
            title_font_size: 20.0,
        }
    }
}

impl Settings {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::build(File::with_name("invoice-gen").required(false))
    }

    /// Load from a specific file (whose format is taken from its extension), still
    /// letting the environment override it
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        Self::build(File::from(path.as_ref()).required(true))
    }

    fn build<S>(file: S) -> Result<Self, ConfigError>
    where
        S: config::Source + Send + Sync + 'static,
    {
        let config = Config::builder()
            .add_source(file)
            .add_source(
                Environment::with_prefix("INVOICE_GEN")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let settings: Settings = config.try_deserialize()?;
        settings.layout().validate().map_err(ConfigError::Message)?;
        Ok(settings)
    }

    pub fn layout(&self) -> LayoutSettings {
        LayoutSettings {
            page_size: self.page_size.size(),
            margins: Margins::all(Pt(self.margin)),
            body_font_size: Pt(self.body_font_size),
            title_font_size: Pt(self.title_font_size),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_match_the_standard_layout() {
        let settings = Settings::default();
        assert_eq!(settings.artifacts_dir, PathBuf::from("invoices"));
        assert_eq!(settings.retrieval_prefix, "/invoices");
        assert_eq!(settings.layout(), LayoutSettings::default());
    }

    #[test]
    fn reads_a_partial_file() {
        let mut file = tempfile::Builder::new()
            .suffix(".toml")
            .tempfile()
            .expect("can create temp file");
        writeln!(file, "artifacts_dir = \"/srv/invoices\"").unwrap();
        writeln!(file, "page_size = \"a4\"").unwrap();
        writeln!(file, "margin = 36").unwrap();

        let settings = Settings::load_from(file.path()).expect("settings load");
        assert_eq!(settings.artifacts_dir, PathBuf::from("/srv/invoices"));
        assert_eq!(settings.page_size, PaperFormat::A4);
        assert_eq!(settings.layout().margins, Margins::all(Pt(36.0)));
        // untouched keys keep their defaults
        assert_eq!(settings.retrieval_prefix, "/invoices");
        assert_eq!(settings.body_font_size, 12.0);
    }

    #[test]
    fn rejects_unknown_paper() {
        let mut file = tempfile::Builder::new()
            .suffix(".toml")
            .tempfile()
            .expect("can create temp file");
        writeln!(file, "page_size = \"tabloid\"").unwrap();
        assert!(Settings::load_from(file.path()).is_err());
    }

    fn load_toml(lines: &[&str]) -> Result<Settings, ConfigError> {
        let mut file = tempfile::Builder::new()
            .suffix(".toml")
            .tempfile()
            .expect("can create temp file");
        for line in lines {
            writeln!(file, "{line}").unwrap();
        }
        Settings::load_from(file.path())
    }

    #[test]
    fn rejects_paper_too_narrow_for_the_item_table() {
        assert!(load_toml(&["page_size = \"a5\""]).is_err());
        // a4 only fits with reasonable margins
        assert!(load_toml(&["page_size = \"a4\"", "margin = 150"]).is_err());
    }

    #[test]
    fn rejects_degenerate_margins_and_type_sizes() {
        for lines in [
            ["margin = -5"],
            ["margin = 400"],
            ["body_font_size = 0"],
            ["title_font_size = -20"],
        ] {
            match load_toml(&lines) {
                Err(ConfigError::Message(_)) => {}
                other => panic!("{lines:?} should be rejected, got {other:?}"),
            }
        }
        assert!(load_toml(&["margin = 0"]).is_ok());
    }
}
