//! Init command implementation

use rodar_common::cli::{styles, Cli as Flags};
use rodar_common::{Result, RodarError};

use crate::config::{InitArgs, PipelineConfig};
use crate::io::write_text;

/// Default configuration as commented YAML.
pub fn default_config_yaml() -> Result<String> {
    let body = PipelineConfig::default().to_yaml()?;
    Ok(format!(
        "# rodar pipeline configuration\n# Relative paths resolve against `root`.\n{body}"
    ))
}

pub fn run_init(args: &InitArgs, flags: Flags) -> Result<()> {
    if args.output.exists() && !args.force {
        return Err(RodarError::ConfigValue {
            field: "output".into(),
            message: format!("{} already exists", args.output.display()),
            suggestion: "Pass --force to overwrite it".into(),
        });
    }

    write_text(&args.output, &default_config_yaml()?)?;

    if !flags.is_quiet() {
        println!("{}", styles::success(&format!("Wrote {}", args.output.display())));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigValidator;
    use std::path::Path;

    #[test]
    fn test_default_config_yaml_parses_to_default() {
        let yaml = default_config_yaml().unwrap();
        assert!(yaml.starts_with("# rodar"));
        let parsed = PipelineConfig::from_yaml(&yaml, Path::new("rodar.yaml")).unwrap();
        assert_eq!(parsed, PipelineConfig::default());
        assert!(ConfigValidator::validate(&parsed).is_ok());
    }

    #[test]
    fn test_init_refuses_to_overwrite() {
        let dir = tempfile::TempDir::new().unwrap();
        let output = dir.path().join("rodar.yaml");
        std::fs::write(&output, "keep me").unwrap();

        let args = InitArgs { output: output.clone(), force: false };
        let quiet = Flags { quiet: true, ..Default::default() };
        assert!(run_init(&args, quiet).is_err());
        assert_eq!(std::fs::read_to_string(&output).unwrap(), "keep me");

        let args = InitArgs { output: output.clone(), force: true };
        run_init(&args, quiet).unwrap();
        assert!(std::fs::read_to_string(&output).unwrap().contains("split_day: 20"));
    }
}
