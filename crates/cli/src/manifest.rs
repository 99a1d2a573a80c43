use anyhow::{Context, Result, bail};
use cmdline::{Declaration, StrView};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variable naming an option manifest to load.
pub const OPTIONS_ENV: &str = "CMDLINE_OPTIONS";
pub const MANIFEST_SCHEMA_VERSION: u32 = 1;

/// Extra options declared in a JSON file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptionManifest {
    #[serde(default)]
    pub schema_version: Option<u32>,

    #[serde(default)]
    pub options: Vec<OptionSpec>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptionSpec {
    #[serde(default)]
    pub short: Option<String>,
    /// Entries without a long name are dropped at registration.
    #[serde(default)]
    pub long: Option<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub default: Option<String>,
}

impl OptionSpec {
    /// A declaration that prints `<long>=<value>` when matched.
    pub fn declaration(&self) -> Declaration<'_> {
        let long: &str = self.long.as_deref().unwrap_or_default();
        Declaration {
            short: self.short.as_deref().map(StrView::from),
            long: self.long.as_deref().map(StrView::from),
            description: self.description.as_str().into(),
            required: self.required,
            default: self.default.as_deref().unwrap_or_default().into(),
            ..Declaration::default()
        }
        .on_match(move |p, value| {
            p.print(&[long.into(), "=".into(), value.clone(), "\n".into()]);
        })
    }
}

impl OptionManifest {
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read option manifest: {}", path.display()))?;
        let manifest: OptionManifest = serde_json::from_str(&contents).with_context(|| {
            format!("failed to parse option manifest JSON: {}", path.display())
        })?;

        if let Some(version) = manifest.schema_version {
            if version != MANIFEST_SCHEMA_VERSION {
                bail!(
                    "unsupported option manifest schemaVersion {version} in {} (expected {MANIFEST_SCHEMA_VERSION})",
                    path.display()
                );
            }
        }
        Ok(manifest)
    }
}

/// Load the manifest named by `CMDLINE_OPTIONS`, if set.
pub fn load_from_env() -> Result<Option<OptionManifest>> {
    let Some(raw) = std::env::var_os(OPTIONS_ENV) else {
        return Ok(None);
    };
    if raw.is_empty() {
        return Ok(None);
    }

    let cwd = std::env::current_dir().context("failed to get current directory")?;
    let path = resolve_against(&cwd, Path::new(&raw));
    tracing::debug!(path = %path.display(), "loading option manifest");
    OptionManifest::from_file(&path).map(Some)
}

fn resolve_against(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}
