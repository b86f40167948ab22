use crate::config::{Config, ModeName, DEFAULT_CONFIG_NAME};
use anyhow::{anyhow, Result};
use clap::Args;
use colored::Colorize;
use gotex_board::GameRecord;
use gotex_compiler_tex::{export as export_document, write_document, DiagramKind, ExportOptions};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use walkdir::WalkDir;

#[derive(Debug, Args)]
pub struct ExportArgs {
    /// Game record (.json) or directory of records
    #[arg(default_value = ".")]
    pub path: String,

    /// Export the final position instead of the move sequence
    #[arg(short, long)]
    pub position: bool,

    /// Title placed above the diagram (overrides the record's title)
    #[arg(short, long)]
    pub title: Option<String>,

    /// Avoid \pass so the output works with psgo 0.12
    #[arg(long)]
    pub no_pass: bool,

    /// Sequence mode (overrides config)
    #[arg(short, long, value_enum)]
    pub mode: Option<ModeName>,

    /// Output to stdout instead of files
    #[arg(long)]
    pub stdout: bool,

    /// Output directory (overrides config)
    #[arg(short, long)]
    pub out_dir: Option<String>,
}

pub fn export(args: ExportArgs, cwd: &str) -> Result<()> {
    let config = Config::load(cwd)?;
    let input = PathBuf::from(cwd).join(&args.path);

    if !input.exists() {
        return Err(anyhow!("Input path does not exist: {}", input.display()));
    }

    let (base_dir, records) = if input.is_dir() {
        (input.clone(), find_record_files(&input))
    } else {
        let parent = input.parent().map(Path::to_path_buf).unwrap_or_default();
        (parent, vec![input.clone()])
    };

    if records.is_empty() {
        eprintln!("{}", "⚠️  No game records found".yellow());
        return Ok(());
    }

    if !args.stdout {
        println!("{}", "🔨 Exporting diagrams...".bright_blue().bold());
        println!("Found {} records", records.len());
    }

    let out_dir = match &args.out_dir {
        Some(out) => PathBuf::from(cwd).join(out),
        None => config.get_out_dir(cwd),
    };

    let mut success_count = 0;
    let mut error_count = 0;

    for record_path in &records {
        let relative_path = record_path.strip_prefix(&base_dir).unwrap_or(record_path);
        match export_file(record_path, relative_path, &args, &config, &out_dir) {
            Ok(output) => {
                success_count += 1;
                if !args.stdout {
                    println!(
                        "  {} {} → {}",
                        "✓".green(),
                        relative_path.display(),
                        output
                    );
                }
            }
            Err(e) => {
                error_count += 1;
                eprintln!(
                    "  {} {} - {}",
                    "✗".red(),
                    relative_path.display(),
                    e.to_string().red()
                );
            }
        }
    }

    info!(success_count, error_count, "Export finished");
    if args.stdout {
        return if error_count == 0 {
            Ok(())
        } else {
            Err(anyhow!("{} records failed to export", error_count))
        };
    }

    println!();
    if error_count == 0 {
        println!(
            "{} Exported {} records successfully",
            "✅".green(),
            success_count
        );
    } else {
        println!(
            "{} Exported {} records, {} errors",
            "⚠️".yellow(),
            success_count,
            error_count
        );
    }

    Ok(())
}

fn find_record_files(dir: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = WalkDir::new(dir)
        .follow_links(true)
        .into_iter()
        .filter_map(|e| e.ok())
        .map(|entry| entry.path().to_path_buf())
        .filter(|path| path.extension().and_then(|s| s.to_str()) == Some("json"))
        .filter(|path| path.file_name().and_then(|s| s.to_str()) != Some(DEFAULT_CONFIG_NAME))
        .collect();
    files.sort();
    files
}

fn export_options(args: &ExportArgs, config: &Config, record: &GameRecord) -> ExportOptions {
    let kind = if args.position || config.position {
        DiagramKind::Position
    } else {
        DiagramKind::Sequence
    };

    ExportOptions {
        title: args.title.clone().or_else(|| record.title.clone()),
        use_pass: config.use_pass && !args.no_pass,
        mode: args.mode.unwrap_or(config.mode).into(),
        kind,
    }
}

fn export_file(
    record_path: &Path,
    relative_path: &Path,
    args: &ExportArgs,
    config: &Config,
    out_dir: &Path,
) -> Result<String> {
    let source = fs::read_to_string(record_path)?;
    let record = GameRecord::from_json(&source)?;
    let overlays = record.overlay_grid()?;
    let options = export_options(args, config, &record);
    debug!(path = %record_path.display(), ?options, "Exporting record");

    let document = export_document(&record, Some(&overlays), &options)?;

    if args.stdout {
        println!("{}", document);
        return Ok("stdout".to_string());
    }

    let output_file = out_dir.join(relative_path).with_extension("tex");
    if let Some(parent) = output_file.parent() {
        fs::create_dir_all(parent)?;
    }
    write_document(&output_file, &document)?;

    Ok(output_file.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    const RECORD: &str = r#"{
        "size": 9,
        "title": "Club game",
        "moves": [
            { "color": "black", "point": "C3" },
            { "color": "white", "point": "G7" },
            { "color": "black" },
            { "color": "white", "point": "C3" }
        ]
    }"#;

    fn args(path: &str) -> ExportArgs {
        ExportArgs {
            path: path.to_string(),
            position: false,
            title: None,
            no_pass: false,
            mode: None,
            stdout: false,
            out_dir: None,
        }
    }

    #[test]
    fn test_export_single_record() {
        let dir = tempfile::tempdir().unwrap();
        let cwd = dir.path().to_str().unwrap();
        fs::write(dir.path().join("game.json"), RECORD).unwrap();

        export(args("game.json"), cwd).unwrap();

        let output = fs::read_to_string(dir.path().join("dist").join("game.tex")).unwrap();
        assert!(output.contains("\\section*{Club game}"));
        assert!(output.contains("\\move{c}{3}\n\\move{g}{7}\n\\end{psgoboard}"));
    }

    #[test]
    fn test_export_directory_with_config() {
        let dir = tempfile::tempdir().unwrap();
        let cwd = dir.path().to_str().unwrap();
        fs::create_dir_all(dir.path().join("games").join("club")).unwrap();
        fs::write(dir.path().join("games").join("club").join("one.json"), RECORD).unwrap();
        fs::write(dir.path().join("games").join("broken.json"), "{ not json").unwrap();
        fs::write(
            dir.path().join(DEFAULT_CONFIG_NAME),
            r#"{ "outDir": "tex", "mode": "annotated", "usePass": false }"#,
        )
        .unwrap();

        export(args("games"), cwd).unwrap();

        let output =
            fs::read_to_string(dir.path().join("tex").join("club").join("one.tex")).unwrap();
        assert!(output.contains("% version 0.12 or newer"));
        assert!(output.contains("\\toggleblackmove\\addtocounter{gomove}{1} % pass"));
        assert!(output.contains(
            "\\stone[3]{black} pass \\enspace\n\\stone[4]{white} at \\stone[1]{black}"
        ));
        assert!(!dir.path().join("tex").join("broken.tex").exists());
    }

    #[test]
    fn test_cli_flags_override_config() {
        let config = Config::default();
        let record = GameRecord::from_json(RECORD).unwrap();
        let mut args = args("game.json");
        args.position = true;
        args.no_pass = true;
        args.title = Some("Override".to_string());
        args.mode = Some(ModeName::Strict);

        let options = export_options(&args, &config, &record);
        assert_eq!(options.kind, DiagramKind::Position);
        assert!(!options.use_pass);
        assert_eq!(options.title.as_deref(), Some("Override"));
        assert_eq!(options.mode, gotex_compiler_tex::ModeSelection::Strict);
    }

    #[test]
    fn test_missing_input_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let cwd = dir.path().to_str().unwrap();
        assert!(export(args("nope.json"), cwd).is_err());
    }
}
