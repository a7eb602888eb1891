use super::defaults::DefaultsConfig;
use super::file::FileConfig;
use super::models::AppConfig;
use crate::cli::FragmentationOptions;
use crate::error::{CliError, Result};
use lipifrag::engine::config as core_config;
use std::path::Path;
use std::str::FromStr;

/// Resolves the final configuration: command-line flags win over `--set`
/// values, which win over the config file, which wins over the defaults.
pub fn build_config(
    input: &Path,
    output: &Path,
    options: &FragmentationOptions,
) -> Result<AppConfig> {
    let defaults = DefaultsConfig::default();

    let file_config = if let Some(config_path) = &options.config {
        FileConfig::from_file(config_path)?
    } else {
        FileConfig::default()
    };

    let mut file_config = apply_set_values(file_config, &options.set_values)?;

    let capping = file_config.capping.take().unwrap_or_default();
    let extraction = file_config.extraction.take().unwrap_or_default();

    let enabled = |disabled_by_flag: bool, file_val: Option<bool>, default: bool| {
        !disabled_by_flag && file_val.unwrap_or(default)
    };

    let core_config = core_config::FragmentationConfigBuilder::new()
        .carbon_bond_length(
            capping
                .carbon_bond_length
                .unwrap_or(defaults.carbon_bond_length),
        )
        .hydrogen_bond_length(
            capping
                .hydrogen_bond_length
                .unwrap_or(defaults.hydrogen_bond_length),
        )
        .add_cap_hydrogens(
            capping
                .add_cap_hydrogens
                .unwrap_or(defaults.add_cap_hydrogens),
        )
        .single_fragments(enabled(
            options.no_singles,
            extraction.single_fragments,
            defaults.single_fragments,
        ))
        .double_fragments(enabled(
            options.no_doubles,
            extraction.double_fragments,
            defaults.double_fragments,
        ))
        .dimers(enabled(
            options.no_dimers,
            extraction.dimers,
            defaults.dimers,
        ))
        .build()
        .map_err(|e| CliError::Config(e.to_string()))?;

    Ok(AppConfig {
        input_path: input.to_path_buf(),
        output_dir: output.to_path_buf(),
        core_config,
    })
}

fn parse_value<T: FromStr>(key: &str, value: &str, kind: &str) -> Result<T> {
    value
        .parse()
        .map_err(|_| CliError::Config(format!("Invalid {} value for {}: {}", kind, key, value)))
}

fn apply_set_values(mut config: FileConfig, set_values: &[String]) -> Result<FileConfig> {
    for kv_pair in set_values {
        let Some((key, value_str)) = kv_pair.split_once('=') else {
            return Err(CliError::Config(format!(
                "Invalid --set format: '{}'. Expected KEY=VALUE.",
                kv_pair
            )));
        };
        let key = key.trim();
        let value_str = value_str.trim();

        match key {
            "capping.carbon-bond-length" => {
                config
                    .capping
                    .get_or_insert_with(Default::default)
                    .carbon_bond_length = Some(parse_value(key, value_str, "float")?);
            }
            "capping.hydrogen-bond-length" => {
                config
                    .capping
                    .get_or_insert_with(Default::default)
                    .hydrogen_bond_length = Some(parse_value(key, value_str, "float")?);
            }
            "capping.add-cap-hydrogens" => {
                config
                    .capping
                    .get_or_insert_with(Default::default)
                    .add_cap_hydrogens = Some(parse_value(key, value_str, "boolean")?);
            }
            "extraction.single-fragments" => {
                config
                    .extraction
                    .get_or_insert_with(Default::default)
                    .single_fragments = Some(parse_value(key, value_str, "boolean")?);
            }
            "extraction.double-fragments" => {
                config
                    .extraction
                    .get_or_insert_with(Default::default)
                    .double_fragments = Some(parse_value(key, value_str, "boolean")?);
            }
            "extraction.dimers" => {
                config
                    .extraction
                    .get_or_insert_with(Default::default)
                    .dimers = Some(parse_value(key, value_str, "boolean")?);
            }
            _ => {
                return Err(CliError::Config(format!(
                    "Unsupported configuration key for --set: '{}'",
                    key
                )));
            }
        }
    }
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::tempdir;

    fn build(options: &FragmentationOptions) -> Result<core_config::FragmentationConfig> {
        build_config(Path::new("in.txyz"), Path::new("out"), options).map(|app| app.core_config)
    }

    fn write_config(dir: &Path, toml: &str) -> PathBuf {
        let path = dir.join("config.toml");
        fs::write(&path, toml).unwrap();
        path
    }

    #[test]
    fn defaults_apply_without_file_or_overrides() {
        let app = build_config(
            Path::new("in.txyz"),
            Path::new("out"),
            &FragmentationOptions::default(),
        )
        .unwrap();

        assert_eq!(app.input_path, PathBuf::from("in.txyz"));
        assert_eq!(app.output_dir, PathBuf::from("out"));
        assert_eq!(app.core_config, core_config::FragmentationConfig::default());
    }

    #[test]
    fn file_values_are_merged() {
        let dir = tempdir().unwrap();
        let options = FragmentationOptions {
            config: Some(write_config(
                dir.path(),
                r#"
                [capping]
                carbon-bond-length = 1.50
                hydrogen-bond-length = 1.09

                [extraction]
                double-fragments = false
                "#,
            )),
            ..Default::default()
        };

        let config = build(&options).unwrap();
        assert_eq!(config.capping.carbon_bond_length, 1.50);
        assert_eq!(config.capping.hydrogen_bond_length, 1.09);
        assert!(config.capping.add_cap_hydrogens);
        assert!(config.extraction.single_fragments);
        assert!(!config.extraction.double_fragments);
        assert!(config.extraction.dimers);
    }

    #[test]
    fn set_values_override_the_file() {
        let dir = tempdir().unwrap();
        let options = FragmentationOptions {
            config: Some(write_config(
                dir.path(),
                "[capping]\ncarbon-bond-length = 1.50\n",
            )),
            set_values: vec![
                "capping.carbon-bond-length=1.60".to_string(),
                "capping.add-cap-hydrogens=false".to_string(),
                "extraction.single-fragments = false".to_string(),
            ],
            ..Default::default()
        };

        let config = build(&options).unwrap();
        assert!((config.capping.carbon_bond_length - 1.60).abs() < 1e-12);
        assert!(!config.capping.add_cap_hydrogens);
        assert!(!config.extraction.single_fragments);
    }

    #[test]
    fn disabling_flags_win_over_file_and_set_values() {
        let dir = tempdir().unwrap();
        let options = FragmentationOptions {
            config: Some(write_config(dir.path(), "[extraction]\ndimers = true\n")),
            no_singles: true,
            no_dimers: true,
            set_values: vec!["extraction.single-fragments=true".to_string()],
            ..Default::default()
        };

        let config = build(&options).unwrap();
        assert!(!config.extraction.single_fragments);
        assert!(config.extraction.double_fragments);
        assert!(!config.extraction.dimers);
    }

    #[test]
    fn malformed_set_values_are_rejected() {
        for bad in [
            "capping.carbon-bond-length",
            "capping.carbon-bond-length=long",
            "extraction.dimers=maybe",
            "capping.cap-length=1.5",
        ] {
            let options = FragmentationOptions {
                set_values: vec![bad.to_string()],
                ..Default::default()
            };
            assert!(
                matches!(build(&options), Err(CliError::Config(_))),
                "accepted '{}'",
                bad
            );
        }
    }

    #[test]
    fn invalid_bond_length_fails_validation() {
        let options = FragmentationOptions {
            set_values: vec!["capping.hydrogen-bond-length=-1.0".to_string()],
            ..Default::default()
        };
        let Err(CliError::Config(message)) = build(&options) else {
            panic!("negative bond length was accepted");
        };
        assert!(message.contains("hydrogen_bond_length"));
    }
}
