use crate::config::Config;
use crate::tagging::Field;
use std::error::Error;
use std::process::Command;

pub fn handle_config_view() -> Result<(), Box<dyn Error>> {
    let config = Config::load()?;

    println!("Current keytag configuration:");
    println!("  what_to_write: {}", config.what_to_write);
    println!("  field_delimiter: {:?}", config.field_delimiter);
    println!("  skip_tagged_files: {}", config.skip_tagged_files);
    for field in Field::ALL {
        println!(
            "  write.{}: {}",
            field.name(),
            config.write.behavior(field)
        );
    }
    println!("  custom_codes_major: {:?}", config.custom_codes_major);
    println!("  custom_codes_minor: {:?}", config.custom_codes_minor);
    println!("  custom_code_silence: {:?}", config.custom_code_silence);

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
    // Ensure config exists
    if !Config::exists()? {
        return Err("keytag not initialized. Run 'keytag init' first.".into());
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

    // Validate the config after editing
    match Config::load() {
        Ok(_) => println!("Configuration saved successfully"),
        Err(e) => {
            return Err(format!("Configuration validation failed: {e}").into());
        }
    }

    Ok(())
}
