use aigc_tag::config::Config;
use std::error::Error;
use std::process::Command;

pub fn handle_config_view() -> Result<(), Box<dyn Error>> {
    let config = Config::load()?;

    println!("Current aigc-tag configuration:");
    println!("  label: {}", config.label);
    println!("  content_producer: {}", config.content_producer);
    println!("  content_propagator: {}", config.content_propagator);
    println!("  reserved_code1: {}", config.reserved_code1);
    println!("  reserved_code2: {}", config.reserved_code2);
    println!("  output_suffix: {}", config.output_suffix);
    println!("  replace_existing: {}", config.replace_existing);

    Ok(())
}

pub fn handle_config_set(key: &str, value: &str) -> Result<(), Box<dyn Error>> {
    let mut config = Config::load()?;

    config.set_value(key, value)?;
    config.save()?;

    println!("Configuration updated: {key} = {value}");

    Ok(())
}

pub fn handle_config_edit() -> Result<(), Box<dyn Error>> {
    // Write defaults first so the editor opens a complete file
    if !Config::exists()? {
        Config::new().save()?;
    }

    let config_path = Config::config_path()?;
    let editor = std::env::var("EDITOR").unwrap_or_else(|_| "vi".to_string());

    println!("Opening {} in {}", config_path.display(), editor);

    let status = Command::new(&editor)
        .arg(&config_path)
        .status()
        .map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                format!("Editor '{editor}' not found. Set $EDITOR to a valid editor path.")
            } else {
                format!("Failed to launch editor '{editor}': {e}")
            }
        })?;

    if !status.success() {
        return Err(format!("Editor '{editor}' exited with error").into());
    }

    let config = Config::load().map_err(|e| {
        format!(
            "{} is not valid TOML for aigc-tag: {e}",
            config_path.display()
        )
    })?;
    config
        .validate()
        .map_err(|e| format!("{}: {e}", config_path.display()))?;

    println!("Configuration saved; new tags will use label {:?}", config.label);

    Ok(())
}
