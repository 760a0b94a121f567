use crate::app::cli::ArchiveArgs;
use crate::app::models::Config;
use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

#[derive(Deserialize, Debug)]
struct PresetsFile {
    #[serde(flatten)]
    presets: HashMap<String, PresetConfig>,
}

#[derive(Deserialize, Debug, Clone, Default)]
struct PresetConfig {
    exclude: Option<Vec<String>>,
    include: Option<Vec<String>>,
}

fn load_presets_file() -> Result<HashMap<String, PresetConfig>> {
    let home = dirs::home_dir().context("Could not determine home directory")?;
    let config_path = home
        .join(".config")
        .join("code_archive")
        .join("presets.toml");

    if !config_path.exists() {
        return Ok(HashMap::new());
    }

    let content = fs::read_to_string(&config_path)
        .context(format!("Failed to read config at {:?}", config_path))?;

    let parsed: PresetsFile = toml::from_str(&content).context("Failed to parse presets.toml")?;

    Ok(parsed.presets)
}

fn merge_vecs(preset_vec: Option<Vec<String>>, cli_vec: Option<Vec<String>>) -> Vec<String> {
    let mut combined = preset_vec.unwrap_or_default();
    if let Some(mut cli_items) = cli_vec {
        combined.append(&mut cli_items);
    }
    // Deduplicate while keeping order
    let mut seen = std::collections::HashSet::new();
    combined.retain(|item| seen.insert(item.clone()));
    combined
}

pub fn resolve_config(args: ArchiveArgs) -> Result<Config> {
    let source_path = args.source.unwrap_or_else(|| PathBuf::from("."));

    let source_meta = fs::metadata(&source_path)
        .context(format!("Cannot access source path {:?}", source_path))?;
    if !source_meta.is_dir() {
        bail!("Source path {:?} is not a directory", source_path);
    }
    // Entry-level errors inside the tree are recoverable later; an unreadable
    // root is not.
    fs::read_dir(&source_path)
        .context(format!("Cannot read source directory {:?}", source_path))?;

    let project_name = source_path
        .canonicalize()
        .ok()
        .and_then(|p| p.file_name().map(|n| n.to_string_lossy().into_owned()));

    let presets = load_presets_file()?;

    // Determine preset to use: CLI flag > Auto-detect by project name > None
    let preset_key = args.preset.as_deref().or(project_name.as_deref());
    let preset = preset_key
        .and_then(|k| presets.get(k))
        .cloned()
        .unwrap_or_default();

    let output_file = args.output.unwrap_or_else(|| {
        PathBuf::from(format!(
            "{}.zip",
            project_name.as_deref().unwrap_or("archive")
        ))
    });

    Ok(Config {
        source_path,
        output_file,
        include_hidden: args.include_hidden,
        include_binary: args.include_binary,
        override_file: args.rules,
        exclude_patterns: merge_vecs(preset.exclude, args.exclude),
        include_patterns: merge_vecs(preset.include, args.include),
        verbose: args.verbose,
        dry_run: args.dry_run,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merge_keeps_order_and_dedupes() {
        let merged = merge_vecs(
            Some(vec![String::from("a"), String::from("b")]),
            Some(vec![String::from("b"), String::from("c")]),
        );
        assert_eq!(merged, vec!["a", "b", "c"]);
    }

    #[test]
    fn merge_handles_missing_sides() {
        assert!(merge_vecs(None, None).is_empty());
        assert_eq!(
            merge_vecs(None, Some(vec![String::from("x")])),
            vec!["x"]
        );
    }
}
