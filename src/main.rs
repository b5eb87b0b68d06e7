use anyhow::Context;
use clap::Parser;
use rose_records::config::cli::{AppointmentCommand, Command, ContactCommand};
use rose_records::config::{self, StorageBackend, TomlConfig};
use rose_records::utils::logger;
use rose_records::{
    AppointmentId, AppointmentRecord, AppointmentService, CliConfig, ContactId, ContactRecord,
    ContactService, JsonFileStore, MemoryStore, NewAppointment, NewContact, RecordError,
    RecordStore,
};
use serde::Serialize;
use std::fmt::Display;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    let settings = config::resolve(cli.config.as_deref(), cli.data_dir.as_deref(), cli.memory)
        .with_context(|| match cli.config.as_deref() {
            Some(path) => format!("failed to load configuration from '{}'", path),
            None => "invalid command-line configuration".to_string(),
        })?;

    // 初始化日誌
    let level = settings.logging.level.as_deref();
    if settings.logging.json {
        logger::init_json_logger(cli.verbose, level);
    } else {
        logger::init_cli_logger(cli.verbose, level);
    }
    tracing::debug!("Resolved settings: {:?}", settings);

    if let Err(e) = run(cli.command, &settings).await {
        tracing::error!("❌ Command failed: {} (Category: {:?})", e, e.category());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(e.exit_code());
    }

    Ok(())
}

async fn run(command: Command, settings: &TomlConfig) -> rose_records::Result<()> {
    match settings.storage.backend {
        StorageBackend::Memory => {
            tracing::warn!("In-memory backend: records are discarded on exit");
            dispatch(command, MemoryStore::new(), MemoryStore::new()).await
        }
        StorageBackend::File => {
            let dir = &settings.storage.data_dir;
            let contacts = JsonFileStore::open(dir).await?;
            let appointments = JsonFileStore::open(dir).await?;
            dispatch(command, contacts, appointments).await
        }
    }
}

async fn dispatch<C, A>(command: Command, contacts: C, appointments: A) -> rose_records::Result<()>
where
    C: RecordStore<ContactRecord>,
    A: RecordStore<AppointmentRecord>,
{
    match command {
        Command::Contact(cmd) => contact(cmd, ContactService::new(contacts)).await,
        Command::Appointment(cmd) => appointment(cmd, AppointmentService::new(appointments)).await,
    }
}

async fn contact<S: RecordStore<ContactRecord>>(
    command: ContactCommand,
    service: ContactService<S>,
) -> rose_records::Result<()> {
    match command {
        ContactCommand::Add(f) => {
            let record = service
                .create(NewContact::new(f.name, f.email, f.subject, f.message))
                .await?;
            print_record(&record)
        }
        ContactCommand::Show { id } => {
            let record = service.get(ContactId(id)).await?;
            println!("{}", record);
            print_record(&record)
        }
        ContactCommand::List => print_json(&service.list().await?),
        ContactCommand::Update { id, fields } => {
            let id = ContactId(id);
            let current = service.get(id).await?.to_draft();
            let draft = NewContact {
                name: fields.name.unwrap_or(current.name),
                email: fields.email.unwrap_or(current.email),
                subject: fields.subject.unwrap_or(current.subject),
                message: fields.message.unwrap_or(current.message),
            };
            print_record(&service.update(id, draft).await?)
        }
        ContactCommand::Remove { id } => {
            service.delete(ContactId(id)).await?;
            println!("🗑️ Removed contact {}", id);
            Ok(())
        }
    }
}

async fn appointment<S: RecordStore<AppointmentRecord>>(
    command: AppointmentCommand,
    service: AppointmentService<S>,
) -> rose_records::Result<()> {
    match command {
        AppointmentCommand::Add(f) => {
            let record = service
                .create(NewAppointment::new(
                    f.full_name,
                    f.email,
                    f.phone,
                    f.date,
                    f.time,
                ))
                .await?;
            print_record(&record)
        }
        AppointmentCommand::Show { id } => {
            let record = service.get(AppointmentId(id)).await?;
            println!("{}", record);
            print_record(&record)
        }
        AppointmentCommand::List => print_json(&service.list().await?),
        AppointmentCommand::Update { id, fields } => {
            let id = AppointmentId(id);
            let current = service.get(id).await?.to_draft();
            let draft = NewAppointment {
                full_name: fields.full_name.unwrap_or(current.full_name),
                email: fields.email.unwrap_or(current.email),
                phone: fields.phone.unwrap_or(current.phone),
                date: fields.date.unwrap_or(current.date),
                time: fields.time.unwrap_or(current.time),
            };
            print_record(&service.update(id, draft).await?)
        }
        AppointmentCommand::Remove { id } => {
            service.delete(AppointmentId(id)).await?;
            println!("🗑️ Removed appointment {}", id);
            Ok(())
        }
    }
}

fn print_record<T: Serialize + Display>(record: &T) -> rose_records::Result<()> {
    tracing::debug!("Printing {}", record);
    print_json(record)
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> rose_records::Result<()> {
    let rendered = serde_json::to_string_pretty(value).map_err(RecordError::from)?;
    println!("{}", rendered);
    Ok(())
}
