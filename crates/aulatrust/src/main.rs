//! `aulat` - CLI for aulatrust
//!
//! This binary hosts the worksheet submission lifecycle on the command
//! line: it loads section state from a student-edited TOML file, stores
//! timestamped submissions, and manages the stored documents.

#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

use anyhow::Context;
use clap::Parser;

use aulatrust::cli::{
    ArchiveCommand, CasesCommand, Cli, CleanCommand, Command, ConfigCommand, ExportCommand,
    ListCommand, SaveCommand, ShowCommand, TemplateCommand, TopicArg,
};
use aulatrust::worksheet::TrustModel;
use aulatrust::{
    assemble, content, init_logging, Config, Folder, Section, Worksheet, WorksheetState,
};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity
    init_logging(cli.verbosity());

    // Load configuration
    let config = Config::load_from(cli.config.clone())?;
    let sheet = Worksheet::new(&config);

    // Execute the command
    match cli.command {
        Command::Save(save_cmd) => handle_save(&sheet, &save_cmd),
        Command::Guide => handle_guide(&sheet),
        Command::List(list_cmd) => handle_list(&sheet, &list_cmd),
        Command::Export(export_cmd) => handle_export(&sheet, &export_cmd),
        Command::Archive(archive_cmd) => handle_archive(&sheet, &archive_cmd),
        Command::Clean(clean_cmd) => {
            handle_clean(&sheet, &clean_cmd);
            Ok(())
        }
        Command::Cases(cases_cmd) => handle_cases(&sheet, &cases_cmd),
        Command::Template(template_cmd) => handle_template(&template_cmd),
        Command::Show(show_cmd) => {
            handle_show(&show_cmd);
            Ok(())
        }
        Command::Config(config_cmd) => handle_config(&config, config_cmd),
    }
}

fn handle_save(sheet: &Worksheet, cmd: &SaveCommand) -> anyhow::Result<()> {
    let state = WorksheetState::load(&cmd.state)?;
    let section = Section::from(cmd.section);

    // A failed write is an inline notice, not a crash; the worksheet can
    // simply be saved again.
    match sheet.save(section, &state) {
        Ok(saved) => {
            println!("Saved {}/{}", saved.folder, saved.name);
            if section == Section::Matrix {
                let totals = state.matrix.totals();
                println!("Aggregate profile:");
                for (model, total) in TrustModel::ALL.iter().zip(totals.iter()) {
                    println!("  {model:<13} {total}");
                }
            }
        }
        Err(err) => eprintln!("Could not save the submission: {err}"),
    }
    Ok(())
}

fn handle_guide(sheet: &Worksheet) -> anyhow::Result<()> {
    match sheet.save(Section::Reading, &WorksheetState::default()) {
        Ok(saved) => println!("Saved {}/{}", saved.folder, saved.name),
        Err(err) => eprintln!("Could not save the reading guide: {err}"),
    }
    Ok(())
}

fn folder_for(materials: bool) -> Folder {
    if materials {
        Folder::Materials
    } else {
        Folder::Submissions
    }
}

fn handle_list(sheet: &Worksheet, cmd: &ListCommand) -> anyhow::Result<()> {
    let folder = folder_for(cmd.materials);
    let names = sheet.store().list(folder);

    if cmd.json {
        println!("{}", serde_json::to_string_pretty(&names)?);
    } else if names.is_empty() {
        println!("No documents stored in {folder} yet.");
    } else {
        for name in names {
            // Annotate names that follow the timestamp convention; anything
            // else in the folder is listed as-is.
            match assemble::parse_document_name(&name) {
                Ok((_, stamp)) => {
                    println!("{name}  {}", stamp.format("%Y-%m-%d %H:%M:%S"));
                }
                Err(_) => println!("{name}"),
            }
        }
    }
    Ok(())
}

fn handle_export(sheet: &Worksheet, cmd: &ExportCommand) -> anyhow::Result<()> {
    let folder = folder_for(cmd.materials);
    let download = sheet.export_document(folder, &cmd.name)?;

    if let Some(path) = &cmd.output {
        std::fs::write(path, &download.bytes)
            .with_context(|| format!("failed to write {}", path.display()))?;
        println!(
            "Wrote {} ({}, {} bytes)",
            path.display(),
            download.content_type,
            download.bytes.len()
        );
    } else {
        print!("{}", String::from_utf8_lossy(&download.bytes));
    }
    Ok(())
}

fn handle_archive(sheet: &Worksheet, cmd: &ArchiveCommand) -> anyhow::Result<()> {
    let folder = folder_for(cmd.materials);
    let count = sheet.store().list(folder).len();
    let download = sheet.export_archive(folder)?;

    let path = cmd
        .output
        .clone()
        .unwrap_or_else(|| download.filename.clone().into());
    std::fs::write(&path, &download.bytes)
        .with_context(|| format!("failed to write {}", path.display()))?;
    println!(
        "Wrote {} ({}, {} document(s))",
        path.display(),
        download.content_type,
        count
    );
    Ok(())
}

fn handle_clean(sheet: &Worksheet, cmd: &CleanCommand) {
    if !cmd.yes {
        println!("This will delete every stored submission from the server.");
        println!("Download your work first, then use --yes to confirm.");
        return;
    }

    let removed = sheet.delete_all_submissions(true);
    if removed > 0 {
        println!("Removed {removed} document(s) from entregas.");
    } else {
        println!("There were no documents to remove.");
    }
}

fn handle_cases(sheet: &Worksheet, cmd: &CasesCommand) -> anyhow::Result<()> {
    let cases = sheet.cases();
    if cmd.json {
        println!("{}", serde_json::to_string_pretty(cases.cases())?);
    } else {
        for case in cases.cases() {
            println!("{}", case.name);
            println!("    {}", case.description);
        }
    }
    Ok(())
}

fn handle_template(cmd: &TemplateCommand) -> anyhow::Result<()> {
    let template = WorksheetState::template()?;
    if let Some(path) = &cmd.output {
        std::fs::write(path, &template)
            .with_context(|| format!("failed to write {}", path.display()))?;
        println!("Wrote worksheet template to {}", path.display());
    } else {
        print!("{template}");
    }
    Ok(())
}

fn handle_show(cmd: &ShowCommand) {
    let text = match cmd.topic {
        TopicArg::Theory => content::THEORY,
        TopicArg::Debate => content::DEBATE_PROMPT,
        TopicArg::Reading => content::READING,
        TopicArg::Rubric => content::RUBRIC,
    };
    print!("{text}");
}

fn handle_config(config: &Config, cmd: ConfigCommand) -> anyhow::Result<()> {
    match cmd {
        ConfigCommand::Show { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(config)?);
            } else {
                println!("Current Configuration");
                println!("=====================");
                println!();
                println!("[Storage]");
                println!("  Base directory:   {}", config.base_dir().display());
                println!(
                    "  Submissions:      {}",
                    config.base_dir().join("entregas").display()
                );
                println!(
                    "  Materials:        {}",
                    config.base_dir().join("materiales").display()
                );
                println!();
                println!("[Cases]");
                println!("  Case file:        {}", config.cases_path().display());
            }
        }
        ConfigCommand::Path => {
            println!("{}", Config::default_config_path().display());
        }
        ConfigCommand::Validate { file } => {
            let path = file.unwrap_or_else(Config::default_config_path);
            println!("Validating configuration: {}", path.display());
            match Config::load_from(Some(path)) {
                Ok(_) => println!("Configuration is valid."),
                Err(e) => println!("Configuration error: {e}"),
            }
        }
    }
    Ok(())
}
