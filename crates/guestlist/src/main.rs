//! `guestlist` - CLI for the event and guest registry
//!
//! This binary provides one-shot commands over the registry and the
//! interactive menu.

#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{anyhow, bail, Context};
use clap::Parser;

use guestlist::cli::{Cli, Command, ConfigCommand, EventCommand, GuestCommand, OutputFormat};
use guestlist::console::tables;
use guestlist::model::non_blank;
use guestlist::{
    init_logging, Config, Console, Database, Event, EventDraft, EventId, Guest, GuestDraft,
    GuestId, InvitationService, QrPayload,
};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity
    init_logging(cli.verbosity());

    // Config commands must work even when the config itself is broken
    if let Command::Config(cmd) = cli.command {
        return handle_config(cli.config, cmd);
    }

    let config = Config::load_from(cli.config.clone()).context("failed to load configuration")?;
    let db = Database::open(config.database_path())?;

    match cli.command {
        Command::Event(cmd) => handle_event(&config, &db, cmd),
        Command::Guest(cmd) => handle_guest(&config, &db, cmd),
        Command::Menu => handle_menu(&config, &db),
        Command::Status(cmd) => handle_status(&db, cmd.json),
        Command::Config(_) => Ok(()),
    }
}

fn handle_event(config: &Config, db: &Database, cmd: EventCommand) -> anyhow::Result<()> {
    let events = db.events();
    let mut out = io::stdout().lock();

    match cmd {
        EventCommand::Create {
            name,
            location,
            date,
            time,
            description,
        } => {
            let draft = EventDraft {
                name,
                location,
                date,
                time,
                description,
            };
            let id = events.create(&draft)?;
            writeln!(out, "Created event {id}: {}", draft.name)?;
        }
        EventCommand::List { format } => {
            let list = events.list()?;
            match format {
                OutputFormat::Json => writeln!(out, "{}", serde_json::to_string_pretty(&list)?)?,
                OutputFormat::Table if list.is_empty() => writeln!(out, "No events registered.")?,
                OutputFormat::Table => {
                    tables::write_events(&mut out, &list, &config.display.date_format)?;
                }
            }
        }
        EventCommand::Show { id, format } => {
            let event = find_event(db, id)?;
            match format {
                OutputFormat::Json => writeln!(out, "{}", serde_json::to_string_pretty(&event)?)?,
                OutputFormat::Table => {
                    tables::write_event_details(&mut out, &event, &config.display.date_format)?;
                }
            }
        }
        EventCommand::Update {
            id,
            name,
            location,
            date,
            time,
            description,
        } => {
            let mut draft = find_event(db, id)?.to_draft();
            if let Some(name) = name {
                draft.name = name;
            }
            if let Some(location) = location {
                draft.location = non_blank(Some(&location)).map(str::to_string);
            }
            if date.is_some() {
                draft.date = date;
            }
            if time.is_some() {
                draft.time = time;
            }
            if let Some(description) = description {
                draft.description = non_blank(Some(&description)).map(str::to_string);
            }

            if !events.update(id, &draft)? {
                bail!("event {id} not found");
            }
            writeln!(out, "Updated event {id}")?;
        }
        EventCommand::Delete { id } => {
            if !events.delete(id)? {
                bail!("event {id} not found");
            }
            writeln!(out, "Deleted event {id} and its guests")?;
        }
    }
    Ok(())
}

fn handle_guest(config: &Config, db: &Database, cmd: GuestCommand) -> anyhow::Result<()> {
    let guests = db.guests();
    let mut out = io::stdout().lock();

    match cmd {
        GuestCommand::Add {
            event,
            name,
            email,
            phone,
            status,
            invite,
            url,
        } => {
            let draft = GuestDraft {
                name,
                contact: email,
                phone,
                status,
            };
            let id = guests.create(event, &draft)?;
            writeln!(out, "Created guest {id}: {}", draft.name)?;

            if invite {
                write_invitation(config, db, &mut out, id, url)?;
            }
        }
        GuestCommand::List { event, format } => {
            let list = match event {
                Some(event_id) => {
                    find_event(db, event_id)?;
                    guests.list_by_event(event_id)?
                }
                None => guests.list_all()?,
            };
            match format {
                OutputFormat::Json => writeln!(out, "{}", serde_json::to_string_pretty(&list)?)?,
                OutputFormat::Table if list.is_empty() => writeln!(out, "No guests registered.")?,
                OutputFormat::Table if event.is_some() => tables::write_guests(&mut out, &list)?,
                OutputFormat::Table => tables::write_all_guests(&mut out, &list)?,
            }
        }
        GuestCommand::Show { id, format } => {
            let guest = find_guest(db, id)?;
            match format {
                OutputFormat::Json => writeln!(out, "{}", serde_json::to_string_pretty(&guest)?)?,
                OutputFormat::Table => tables::write_guest_details(&mut out, &guest)?,
            }
        }
        GuestCommand::Update {
            id,
            name,
            email,
            phone,
            status,
        } => {
            let mut draft = find_guest(db, id)?.to_draft();
            if let Some(name) = name {
                draft.name = name;
            }
            if email.is_some() {
                draft.contact = email;
            }
            if let Some(phone) = phone {
                draft.phone = non_blank(Some(&phone)).map(str::to_string);
            }
            if let Some(status) = status {
                draft.status = status;
            }

            if !guests.update(id, &draft)? {
                bail!("guest {id} not found");
            }
            writeln!(out, "Updated guest {id}")?;
        }
        GuestCommand::Delete { id } => {
            if !guests.delete(id)? {
                bail!("guest {id} not found");
            }
            writeln!(out, "Deleted guest {id}")?;
        }
        GuestCommand::Invite { id, url } => {
            write_invitation(config, db, &mut out, id, url)?;
        }
    }
    Ok(())
}

fn write_invitation(
    config: &Config,
    db: &Database,
    out: &mut impl Write,
    guest_id: GuestId,
    url: Option<String>,
) -> anyhow::Result<()> {
    let guest = find_guest(db, guest_id)?;
    let event = find_event(db, guest.event_id)?;
    let payload = url.map_or(QrPayload::Details, QrPayload::Url);

    let files = InvitationService::from_config(config).generate(&event, &guest, &payload)?;
    writeln!(out, "QR code:    {}", files.image.display())?;
    writeln!(out, "Invitation: {}", files.document.display())?;
    Ok(())
}

fn find_event(db: &Database, id: EventId) -> anyhow::Result<Event> {
    db.events()
        .get_by_id(id)?
        .ok_or_else(|| anyhow!("event {id} not found"))
}

fn find_guest(db: &Database, id: GuestId) -> anyhow::Result<Guest> {
    db.guests()
        .get_by_id(id)?
        .ok_or_else(|| anyhow!("guest {id} not found"))
}

fn handle_menu(config: &Config, db: &Database) -> anyhow::Result<()> {
    let service = InvitationService::from_config(config);
    let mut console = Console::new(
        db,
        &service,
        &config.display.date_format,
        io::stdin().lock(),
        io::stdout().lock(),
    );
    console.run()?;
    Ok(())
}

fn handle_status(db: &Database, json: bool) -> anyhow::Result<()> {
    let stats = db.stats()?;

    if json {
        let status = serde_json::json!({
            "database_path": db.path(),
            "stats": stats,
        });
        println!("{}", serde_json::to_string_pretty(&status)?);
    } else {
        println!("guestlist status");
        println!("----------------");
        println!("Database:      {}", db.path().display());
        println!("Size:          {} bytes", stats.db_size_bytes);
        println!("Events:        {}", stats.events);
        println!(
            "Guests:        {} ({} pending, {} present, {} absent)",
            stats.guests, stats.pending, stats.present, stats.absent
        );
    }
    Ok(())
}

fn handle_config(config_path: Option<PathBuf>, cmd: ConfigCommand) -> anyhow::Result<()> {
    match cmd {
        ConfigCommand::Show { json } => {
            let config = Config::load_from(config_path)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&config)?);
            } else {
                println!("Current Configuration");
                println!("=====================");
                println!();
                println!("[Storage]");
                println!("  Database path:      {}", config.database_path().display());
                println!();
                println!("[Invitations]");
                println!("  Output directory:   {}", config.output_dir().display());
                println!(
                    "  QR module pixels:   {}",
                    config.invitations.qr_module_pixels
                );
                println!();
                println!("[Display]");
                println!("  Date format:        {}", config.display.date_format);
            }
        }
        ConfigCommand::Path => {
            let path = config_path.unwrap_or_else(Config::default_config_path);
            println!("{}", path.display());
        }
        ConfigCommand::Validate { file } => {
            let path = file
                .or(config_path)
                .unwrap_or_else(Config::default_config_path);
            println!("Validating configuration: {}", path.display());
            match Config::load_from(Some(path)) {
                Ok(_) => println!("Configuration is valid."),
                Err(e) => bail!("configuration error: {e}"),
            }
        }
    }
    Ok(())
}
