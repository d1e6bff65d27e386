//! Picko CLI
//!
//! Command-line interface for the Picko gateway:
//! - Create events and send notification emails
//! - Register participants
//! - Check personal status and reveal assignments
//! - Manage the dark-mode preference

use anyhow::{bail, Context};
use clap::{Parser, Subcommand, ValueEnum};
use picko::client::{path_segment, ApiClient, ClientError};
use picko::models::{
    transform_assignment, transform_event, transform_my_status, transform_registration_event,
    AssignmentData, BackendAssignment, BackendEvent, BackendMyStatus, CreateEventRequest,
    EventData, MyStatusData, ParticipantRegistered, ParticipantUpdated, RegisterParticipantRequest,
    RegistrationEventData, SendEmailsResponse, UpdateParticipantRequest, DEFAULT_CURRENCY,
};
use picko::ui::{format_date_long, DarkMode, FilePreferenceStore};
use serde::Serialize;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "picko-cli")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Organize a Secret Santa through the Picko gateway")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Gateway URL
    #[arg(long, default_value = "http://localhost:3000", global = true)]
    pub url: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table", global = true)]
    pub format: OutputFormat,

    /// Language for dates (en, pl)
    #[arg(long, default_value = "en", global = true)]
    pub lang: String,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Organizer commands
    Event {
        #[command(subcommand)]
        command: EventCommand,
    },

    /// Registration link commands
    Register {
        #[command(subcommand)]
        command: RegisterCommand,
    },

    /// Participant commands
    Participant {
        #[command(subcommand)]
        command: ParticipantCommand,
    },

    /// Show your status from a personal link token
    My {
        token: String,
    },

    /// Reveal who you are buying a gift for
    Reveal {
        token: String,
    },

    /// Dark-mode preference
    Theme {
        #[command(subcommand)]
        command: ThemeCommand,
    },

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
pub enum EventCommand {
    /// Create an event
    Create {
        name: String,
        /// Registration deadline (ISO 8601)
        #[arg(short, long)]
        deadline: String,
        /// Event date (YYYY-MM-DD)
        #[arg(long)]
        date: Option<String>,
        /// Gift budget
        #[arg(short, long)]
        max_amount: Option<i64>,
        #[arg(short, long, default_value = DEFAULT_CURRENCY)]
        currency: String,
    },

    /// Show an event with its participants
    Show { id: String },

    /// Email every participant their link
    SendEmails { id: String },
}

#[derive(Subcommand)]
pub enum RegisterCommand {
    /// Show the event behind a registration link
    Show { token: String },

    /// Join an event
    Join {
        token: String,
        name: String,
        #[arg(short, long)]
        email: Option<String>,
        #[arg(short, long, default_value = "en")]
        language: String,
        #[arg(short, long)]
        wishlist: Option<String>,
    },
}

#[derive(Subcommand)]
pub enum ParticipantCommand {
    /// Set or change a participant's email
    SetEmail { id: String, email: String },
}

#[derive(Subcommand)]
pub enum ThemeCommand {
    /// Print the current preference
    Show,
    /// Flip dark mode
    Toggle,
    /// Set dark mode on or off
    Set {
        #[arg(action = clap::ArgAction::Set)]
        enabled: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    ensure_language(&cli.lang)?;
    let client = ApiClient::new(cli.url.clone());

    match cli.command {
        Commands::Event { command } => match command {
            EventCommand::Create {
                name,
                deadline,
                date,
                max_amount,
                currency,
            } => {
                let request = CreateEventRequest {
                    name,
                    max_amount,
                    date,
                    currency: Some(currency),
                    registration_deadline: deadline,
                };
                request.validate()?;

                let backend: BackendEvent = client
                    .post_json("/api/event", &request)
                    .await
                    .map_err(|e| describe(e, "Event not found", "Failed to create event"))?;
                let event = transform_event(&backend);

                output(cli.format, &event, || {
                    println!("Created event {} ({})", event.name, event.id);
                    println!();
                    println!("Share this registration link:");
                    println!("  {}/register/{}", cli.url, event.registration_token);
                    println!("Dashboard:");
                    println!("  {}/event/{}", cli.url, event.id);
                })?;
            }

            EventCommand::Show { id } => {
                let backend: BackendEvent = client
                    .get_json(&format!("/api/event/{}", path_segment(&id)))
                    .await
                    .map_err(|e| describe(e, "Event not found", "Failed to load event"))?;
                let event = transform_event(&backend);

                output(cli.format, &event, || print_event(&event, &cli.url, &cli.lang))?;
            }

            EventCommand::SendEmails { id } => {
                let result: SendEmailsResponse = client
                    .post_empty(&format!("/api/event/{}/send-emails", path_segment(&id)))
                    .await
                    .map_err(|e| describe(e, "Event not found", "Failed to send emails"))?;

                output(cli.format, &result, || {
                    println!("Sent: {}", result.sent_count);
                    println!("Skipped (no email): {}", result.skipped_count);
                    for address in &result.sent_to {
                        println!("  {}", address);
                    }
                })?;
            }
        },

        Commands::Register { command } => match command {
            RegisterCommand::Show { token } => {
                let backend: BackendEvent = client
                    .get_json(&format!("/api/event/register/{}", path_segment(&token)))
                    .await
                    .map_err(|e| describe(e, "Event not found", "Failed to load event"))?;
                let event = transform_registration_event(&backend);

                output(cli.format, &event, || print_registration(&event, &cli.lang))?;
            }

            RegisterCommand::Join {
                token,
                name,
                email,
                language,
                wishlist,
            } => {
                let request = RegisterParticipantRequest {
                    name,
                    email,
                    language,
                    wishlist,
                };
                request.validate()?;

                let registered: ParticipantRegistered = client
                    .post_json(
                        &format!("/api/event/register/{}", path_segment(&token)),
                        &request,
                    )
                    .await
                    .map_err(|e| describe(e, "Event not found", "Failed to register"))?;

                output(cli.format, &registered, || {
                    println!("Registered {} (participant {})", registered.name, registered.id);
                    println!();
                    println!("Keep your personal link:");
                    println!("  {}/my/{}", cli.url, registered.access_token);
                })?;
            }
        },

        Commands::Participant { command } => match command {
            ParticipantCommand::SetEmail { id, email } => {
                let request = UpdateParticipantRequest { email: Some(email) };
                let updated: ParticipantUpdated = client
                    .patch_json(&format!("/api/participant/{}", path_segment(&id)), &request)
                    .await
                    .map_err(|e| {
                        describe(e, "Participant not found", "Failed to update participant")
                    })?;

                output(cli.format, &updated, || {
                    println!(
                        "Updated {}: {}",
                        updated.name,
                        updated.email.as_deref().unwrap_or("-")
                    );
                })?;
            }
        },

        Commands::My { token } => {
            let backend: BackendMyStatus = client
                .get_json(&format!("/api/participant/me/{}", path_segment(&token)))
                .await
                .map_err(|e| {
                    describe(
                        e,
                        "Your link is invalid or has expired.",
                        "Failed to load your status",
                    )
                })?;
            let status = transform_my_status(&backend);

            output(cli.format, &status, || print_my_status(&status, &cli.lang))?;
        }

        Commands::Reveal { token } => {
            let backend: BackendAssignment = client
                .get_json(&format!("/api/draw/reveal/{}", path_segment(&token)))
                .await
                .map_err(|e| {
                    describe(
                        e,
                        "Assignment not found. The link may be invalid or the draw hasn't happened yet.",
                        "Failed to load assignment",
                    )
                })?;
            let assignment = transform_assignment(&backend);

            output(cli.format, &assignment, || {
                print_assignment(&assignment, &cli.lang)
            })?;
        }

        Commands::Theme { command } => {
            let store = FilePreferenceStore::open(FilePreferenceStore::default_path())?;
            let mut mode = DarkMode::load(store);

            let enabled = match command {
                ThemeCommand::Show => mode.is_enabled(),
                ThemeCommand::Toggle => mode.toggle()?,
                ThemeCommand::Set { enabled } => mode.set(enabled)?,
            };
            println!("Dark mode: {}", if enabled { "on" } else { "off" });
        }

        Commands::Config { output } => {
            let config = picko::config::generate_default_config();

            match output {
                Some(path) => {
                    // Create parent directory if needed
                    if let Some(parent) = path.parent() {
                        std::fs::create_dir_all(parent)?;
                    }
                    std::fs::write(&path, &config)
                        .with_context(|| format!("writing config to {:?}", path))?;
                    println!("Config written to {:?}", path);
                }
                None => {
                    print!("{}", config);
                }
            }
        }
    }

    Ok(())
}

/// Turn a client error into a user-facing message
fn describe(err: ClientError, not_found: &str, failed: &str) -> anyhow::Error {
    if err.is_not_found() {
        return anyhow::anyhow!("{}", not_found);
    }

    match err {
        ClientError::Status {
            status, body_text, ..
        } if body_text.is_empty() => anyhow::anyhow!("{} ({})", failed, status),
        ClientError::Status {
            status, body_text, ..
        } => anyhow::anyhow!("{} ({}): {}", failed, status, body_text),
        other => anyhow::Error::new(other).context(failed.to_string()),
    }
}

fn output<T: Serialize>(
    format: OutputFormat,
    value: &T,
    table: impl FnOnce(),
) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(value)?),
        OutputFormat::Table => table(),
    }
    Ok(())
}

fn budget(max_amount: Option<i64>, currency: Option<&str>) -> String {
    match max_amount {
        Some(amount) => format!("{} {}", amount, currency.unwrap_or(DEFAULT_CURRENCY)),
        None => "-".to_string(),
    }
}

fn print_event(event: &EventData, url: &str, lang: &str) {
    println!("{} (#{})", event.name, event.id);
    println!("  Date:       {}", format_date_long(event.date.as_deref(), lang, "-"));
    println!(
        "  Deadline:   {}",
        format_date_long(Some(&event.registration_deadline), lang, "-")
    );
    println!("  Budget:     {}", budget(event.max_amount, event.currency.as_deref()));
    println!(
        "  Draw:       {}",
        if event.is_draw_complete { "complete" } else { "pending" }
    );
    println!("  Register:   {}/register/{}", url, event.registration_token);
    println!();

    if event.participants.is_empty() {
        println!("No participants yet.");
        return;
    }

    println!("{:<6} {:<24} {:<30} {:<5} {}", "ID", "Name", "Email", "Lang", "Link");
    println!("{}", "-".repeat(90));
    for participant in &event.participants {
        let link = if event.is_draw_complete {
            format!("{}/join/{}", url, EventData::share_token_for(participant))
        } else {
            "-".to_string()
        };
        println!(
            "{:<6} {:<24} {:<30} {:<5} {}",
            participant.id,
            participant.name,
            participant.email.as_deref().unwrap_or("-"),
            participant.language,
            link
        );
    }
}

fn print_registration(event: &RegistrationEventData, lang: &str) {
    println!("{}", event.name);
    println!("  Date:       {}", format_date_long(event.date.as_deref(), lang, "-"));
    println!(
        "  Deadline:   {}",
        format_date_long(Some(&event.registration_deadline), lang, "-")
    );
    println!("  Budget:     {}", budget(event.max_amount, event.currency.as_deref()));

    if event.is_draw_complete {
        println!();
        println!("Registration is closed: the draw has already happened.");
    }

    println!();
    println!("Participants ({}):", event.participants.len());
    for participant in &event.participants {
        match participant.wishlist.as_deref() {
            Some(wishlist) if !wishlist.is_empty() => {
                println!("  {} - {}", participant.name, wishlist)
            }
            _ => println!("  {}", participant.name),
        }
    }
}

fn print_my_status(status: &MyStatusData, lang: &str) {
    let event = &status.event;
    println!("Hi {}!", status.participant_name);
    println!();
    println!("{}", event.name);
    println!("  Date:       {}", format_date_long(event.date.as_deref(), lang, "-"));
    println!("  Budget:     {}", budget(event.max_amount, event.currency.as_deref()));
    println!();

    match &status.assignment {
        Some(assignment) => {
            println!("You are buying a gift for: {}", assignment.receiver_name);
            if let Some(wishlist) = assignment.receiver_wishlist.as_deref() {
                println!("Their wishlist: {}", wishlist);
            }
        }
        None if event.is_draw_complete => println!("The draw is complete."),
        None => println!(
            "The draw hasn't happened yet. Registration closes {}.",
            format_date_long(Some(&event.registration_deadline), lang, "soon")
        ),
    }
}

fn print_assignment(assignment: &AssignmentData, lang: &str) {
    let event = &assignment.event;
    println!("{}, you are buying a gift for:", assignment.giver_name);
    println!();
    println!("  {}", assignment.receiver_name);
    if let Some(wishlist) = assignment.receiver_wishlist.as_deref() {
        println!();
        println!("Wishlist: {}", wishlist);
    }
    println!();
    println!("{}", event.name);
    println!("  Date:       {}", format_date_long(event.date.as_deref(), lang, "-"));
    println!("  Budget:     {}", budget(event.max_amount, event.currency.as_deref()));
}

fn ensure_language(lang: &str) -> anyhow::Result<()> {
    if !picko::models::LANGUAGES.contains(&lang) {
        bail!("Unsupported language: {}", lang);
    }
    Ok(())
}
