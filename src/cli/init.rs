use crate::config::Config;
use owo_colors::OwoColorize;
use std::error::Error;

pub fn handle_init() -> Result<(), Box<dyn Error>> {
    // Check if already initialized
    if Config::exists()? {
        return Err(format!(
            "keytag is already initialized at {}. Use 'keytag config edit' to change preferences.",
            Config::config_path()?.display()
        )
        .into());
    }

    let config = Config::new();
    config.save()?;

    println!("{} keytag initialized", "✓".green().bold());
    println!(
        "{} {}",
        "Configuration saved to:".bright_black(),
        Config::config_path()?.display().to_string().cyan()
    );
    println!(
        "{}",
        "By default only the comment field is written (overwrite). Adjust with 'keytag config set'."
            .bright_black()
    );

    Ok(())
}
