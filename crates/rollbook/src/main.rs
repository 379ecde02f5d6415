//! `rollbook` - CLI for the registration desk
//!
//! Each invocation opens the store, runs one workflow, and renders its
//! outcome. The hand-off slots in the store connect consecutive invocations
//! the way page navigation would: `submit` points at `last`, and the
//! listing's edit action points back at `submit`.

#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

use clap::Parser;

use rollbook::cli::{
    Cli, Command, ConfigCommand, DeleteCommand, EditCommand, LastCommand, ListCommand,
    OutputFormat, SubmitCommand,
};
use rollbook::workflow::register::{Mode, RegisterWorkflow, SubmitOutcome};
use rollbook::workflow::roster::RosterWorkflow;
use rollbook::workflow::{confirm, Destination};
use rollbook::{init_logging, Config, Error, Registration, Slot, Store};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity
    init_logging(cli.verbosity());

    // Load configuration
    let config = Config::load_from(cli.config.clone())?;

    // Execute the command
    match cli.command {
        Command::Submit(cmd) => handle_submit(&config, &cmd),
        Command::Last(cmd) => handle_last(&config, &cmd),
        Command::List(cmd) => handle_list(&config, &cmd),
        Command::Edit(cmd) => handle_edit(&config, &cmd),
        Command::Delete(cmd) => handle_delete(&config, &cmd),
        Command::Status(cmd) => handle_status(&config, cmd.json),
        Command::Config(cmd) => handle_config(&config, cmd),
    }
}

fn handle_submit(config: &Config, cmd: &SubmitCommand) -> anyhow::Result<()> {
    let store = Store::open(config.database_path())?;
    let workflow = RegisterWorkflow::start(&store)?;

    if let Mode::Edit { target } = workflow.mode() {
        println!("Updating registration {target}; omitted fields keep their stored values.");
        println!();
    }

    let mut form = workflow.form().clone();
    cmd.apply_to(&mut form);

    match workflow.submit(&store, &form)? {
        SubmitOutcome::Saved(record) => {
            match workflow.mode() {
                Mode::Create => println!("Registration {} saved.", record.id),
                Mode::Edit { .. } => println!("Registration {} updated.", record.id),
            }
            println!("View it with `{}`.", command_hint(Destination::Confirmation));
            Ok(())
        }
        SubmitOutcome::Rejected { report, pulses } => {
            println!("Submission rejected; fix these fields:");
            for pulse in &pulses {
                println!("  {}: {}", pulse.field.label(), pulse.field.requirement());
            }
            if let Some(first) = report.first_invalid() {
                println!();
                println!("Start with {}.", first.label());
            }
            if let Mode::Edit { target } = workflow.mode() {
                requeue_edit(&store, target)?;
                println!("The edit is still queued; submit again with corrected fields.");
            }
            Err(Error::Validation(report).into())
        }
    }
}

/// Put a rejected edit back in the hand-off slot so the next submit can
/// retry it.
fn requeue_edit(store: &Store, target: i64) -> rollbook::Result<()> {
    let records = store.load_all()?;
    if let Some(record) = records.iter().find(|record| record.id == target) {
        store.set_handoff(Slot::EditingSubmission, Some(record))?;
    }
    Ok(())
}

fn handle_last(config: &Config, cmd: &LastCommand) -> anyhow::Result<()> {
    let store = Store::open(config.database_path())?;

    match confirm::take_confirmation(&store)? {
        Some(record) => {
            if cmd.json {
                println!("{}", serde_json::to_string_pretty(&record)?);
            } else {
                println!("Application submitted successfully!");
                println!();
                println!("Submission Details");
                println!("==================");
                print_record(&record, &config.display.time_format);
                println!();
                println!(
                    "Register another: `{}`",
                    command_hint(Destination::Registration)
                );
                println!("View all submissions: `{}`", command_hint(Destination::Listing));
            }
        }
        None => {
            println!("Nothing awaiting confirmation.");
            println!(
                "Submit a registration first: `{}`",
                command_hint(Destination::Registration)
            );
        }
    }
    Ok(())
}

fn handle_list(config: &Config, cmd: &ListCommand) -> anyhow::Result<()> {
    let store = Store::open(config.database_path())?;
    let mut roster = RosterWorkflow::open(&store)?;

    if let Some(term) = &cmd.search {
        roster.search(term.clone());
    }

    let visible = roster.visible();
    if cmd.format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(&visible)?);
        return Ok(());
    }

    println!("All Submissions");
    println!("Total Registrations: {}", roster.total());
    if !roster.term().is_empty() {
        println!("Showing {} matching \"{}\"", visible.len(), roster.term());
    }
    println!();

    if let Some(message) = roster.empty_state() {
        println!("{message}");
        return Ok(());
    }

    if cmd.format == OutputFormat::Table {
        print_table(&visible, &config.display.time_format);
    } else {
        for record in &visible {
            println!(
                "{}  {} <{}>  {}",
                record.id,
                record.full_name,
                record.email,
                record.course.title()
            );
        }
    }
    Ok(())
}

fn handle_edit(config: &Config, cmd: &EditCommand) -> anyhow::Result<()> {
    let store = Store::open(config.database_path())?;
    let roster = RosterWorkflow::open(&store)?;

    let record = roster.request_edit(&store, cmd.id)?;
    println!("Registration {} is queued for editing:", record.id);
    println!();
    print_record(&record, &config.display.time_format);
    println!();
    println!(
        "Update it with `{}`; omitted fields keep the values above.",
        command_hint(Destination::Registration)
    );
    Ok(())
}

fn handle_delete(config: &Config, cmd: &DeleteCommand) -> anyhow::Result<()> {
    if !cmd.yes {
        println!("This will permanently delete registration {}.", cmd.id);
        println!("Use --yes to confirm.");
        return Ok(());
    }

    let store = Store::open(config.database_path())?;
    let mut roster = RosterWorkflow::open(&store)?;

    if roster.delete(&store, cmd.id)? {
        println!("Registration {} deleted.", cmd.id);
    } else {
        println!("No registration with id {}.", cmd.id);
    }
    Ok(())
}

fn handle_status(config: &Config, json: bool) -> anyhow::Result<()> {
    let store = Store::open(config.database_path())?;
    let stats = store.stats()?;

    if json {
        let status = serde_json::json!({
            "database_path": store.path(),
            "total_records": stats.total_records,
            "newest_submission": stats.newest_submission,
            "pending_edit": stats.pending_edit,
            "pending_confirmation": stats.pending_confirmation,
            "db_size_bytes": stats.db_size_bytes,
        });
        println!("{}", serde_json::to_string_pretty(&status)?);
    } else {
        println!("rollbook status");
        println!("---------------");
        println!("Database:             {}", store.path().display());
        println!("Registrations:        {}", stats.total_records);
        match stats.newest_submission {
            Some(at) => println!(
                "Newest submission:    {}",
                at.format(&config.display.time_format)
            ),
            None => println!("Newest submission:    -"),
        }
        println!(
            "Pending edit:         {}",
            if stats.pending_edit { "yes" } else { "no" }
        );
        println!(
            "Pending confirmation: {}",
            if stats.pending_confirmation { "yes" } else { "no" }
        );
        println!("Database size:        {} bytes", stats.db_size_bytes);
    }
    Ok(())
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
                println!("  Database path: {}", config.database_path().display());
                println!();
                println!("[Display]");
                println!("  Time format:   {}", config.display.time_format);
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

/// The command that reaches a destination.
fn command_hint(destination: Destination) -> &'static str {
    match destination {
        Destination::Registration => "rollbook submit",
        Destination::Confirmation => "rollbook last",
        Destination::Listing => "rollbook list",
    }
}

fn print_record(record: &Registration, time_format: &str) {
    println!("  Id:           {}", record.id);
    println!("  Full Name:    {}", record.full_name);
    println!("  Email:        {}", record.email);
    println!("  Phone:        {}", record.phone);
    println!("  Gender:       {}", record.gender.label());
    println!("  Course:       {}", record.course.title());
    println!("  Address:      {}", record.address);
    println!(
        "  Submitted At: {}",
        record.submitted_at.format(time_format)
    );
}

fn print_table(records: &[&Registration], time_format: &str) {
    println!(
        "{:<15}  {:<20}  {:<26}  {:<12}  {:<8}  {:<22}  {:<24}  SUBMITTED",
        "ID", "NAME", "EMAIL", "PHONE", "GENDER", "COURSE", "ADDRESS"
    );
    for record in records {
        println!(
            "{:<15}  {:<20}  {:<26}  {:<12}  {:<8}  {:<22}  {:<24}  {}",
            record.id,
            truncate(&record.full_name, 20),
            truncate(&record.email, 26),
            truncate(&record.phone, 12),
            record.gender.label(),
            truncate(record.course.title(), 22),
            truncate(&record.address, 24),
            record.submitted_at.format(time_format),
        );
    }
}

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        let head: String = text.chars().take(max.saturating_sub(3)).collect();
        format!("{head}...")
    }
}
