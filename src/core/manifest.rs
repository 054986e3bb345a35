use std::{fs, path::Path};

use anyhow::{Context, Result};

use super::translations::TranslationIndex;

/// Render the manifest with 2-space indentation and a trailing newline.
pub fn render_manifest(index: &TranslationIndex) -> Result<String> {
    let content = serde_json::to_string_pretty(index).context("Failed to serialize manifest")?;
    Ok(format!("{}\n", content))
}

/// Write the manifest to `path`, creating parent directories as needed.
pub fn write_manifest(path: &Path, index: &TranslationIndex) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    let content = render_manifest(index)?;
    fs::write(path, content)
        .with_context(|| format!("Failed to write file: {}", path.display()))?;

    Ok(())
}
