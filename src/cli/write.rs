//! Write command: apply a musical key to one or more files using the
//! configured per-field behaviors.

use dialoguer::{Confirm, theme::ColorfulTheme};
use owo_colors::OwoColorize;
use std::error::Error;

use crate::config::Config;
use crate::key::Key;
use crate::tagging::{Field, TagPatch, Tagger};
use crate::utils::progress::create_progress_bar;

use super::read::gather_files;

pub fn handle_write(
    key: Key,
    paths: &[String],
    dry_run: bool,
    assume_yes: bool,
) -> Result<(), Box<dyn Error>> {
    let config = Config::load()?;
    let files = gather_files(paths)?;

    if files.is_empty() {
        return Err("No audio files found".into());
    }

    if files.len() > 1 && !dry_run && !assume_yes {
        let proceed = Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt(format!(
                "Write key '{}' to {} files?",
                key.to_string().cyan(),
                files.len()
            ))
            .default(true)
            .interact()?;
        if !proceed {
            println!("Aborted");
            return Ok(());
        }
    }

    let progress = (files.len() > 1 && !dry_run).then(|| create_progress_bar(files.len() as u64));

    let mut written = 0;
    let mut skipped = 0;
    let mut failed = 0;

    for file in &files {
        if let Some(pb) = &progress {
            pb.set_message(
                file.file_name()
                    .map(|name| name.to_string_lossy().to_string())
                    .unwrap_or_default(),
            );
        }

        let result = Tagger::open(file, config.clone());
        let mut tagger = match result {
            Ok(tagger) => tagger,
            Err(e) => {
                let message = format!("{} {e}", "Error:".red().bold());
                match &progress {
                    Some(pb) => pb.println(message),
                    None => eprintln!("{message}"),
                }
                failed += 1;
                if let Some(pb) = &progress {
                    pb.inc(1);
                }
                continue;
            }
        };

        if config.skip_tagged_files && tagger.already_tagged() {
            log::debug!("{}: already tagged, skipping", file.display());
            skipped += 1;
            if let Some(pb) = &progress {
                pb.inc(1);
            }
            continue;
        }

        if dry_run {
            print_preview(file.display().to_string(), &tagger.interpret(key));
            continue;
        }

        match tagger.write_tags(key) {
            Ok(patch) if patch.is_empty() => skipped += 1,
            Ok(_) => written += 1,
            Err(e) => {
                let message = format!("{} {e}", "Error:".red().bold());
                match &progress {
                    Some(pb) => pb.println(message),
                    None => eprintln!("{message}"),
                }
                failed += 1;
            }
        }
        if let Some(pb) = &progress {
            pb.inc(1);
        }
    }

    if let Some(pb) = &progress {
        pb.finish_and_clear();
    }

    if dry_run {
        return Ok(());
    }

    println!("\n{} Write complete!", "✓".green().bold());
    println!("  Written: {written} file(s)");
    println!("  Skipped: {skipped} file(s) (already tagged or nothing to write)");
    if failed > 0 {
        println!("  Failed:  {failed} file(s)");
        return Err(format!("{failed} file(s) were not updated").into());
    }

    Ok(())
}

fn print_preview(file: String, patch: &TagPatch) {
    println!("{}", file.cyan());
    if patch.is_empty() {
        println!("  {}", "nothing to write".bright_black());
        return;
    }
    for field in Field::ALL {
        if let Some(value) = patch.get(field) {
            println!("  {:>8}: {}", field.name().yellow(), value);
        }
    }
}
