// Rust guideline compliant 2026-10-19

//! Chairbook CLI Application
//!
//! Command-line interface for the Chairbook barbershop booking core.

use chairbook_app::{parse_datetime, DataDir};
use chairbook_cli::commands::{self, hours::SetHours, list::ListArgs, Context};
use chairbook_cli::logging::init_tracing;
use chairbook_cli::{create_formatter, print_error, should_use_color};
use chairbook_core::OutputFormat;
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(
    name = "chb",
    version,
    about = "Chairbook: barbershop appointment booking",
    long_about = "Chairbook computes bookable slots from barbers' working hours and manages the appointment lifecycle, refusing to confirm two overlapping appointments for the same barber.",
    after_help = "Examples:\n  chb init\n  chb hours set joe mon 09:00 17:00 --lunch-start 12:00 --lunch-end 13:00\n  chb service add Haircut --price-cents 4000 --duration 30\n  chb slots joe 2026-03-02 --service svc-abc\n  chb request ana joe svc-abc 2026-03-02T10:00\n  chb confirm apt-def --barber joe\n  chb cancel apt-def --by client:ana\n"
)]
struct Cli {
    /// Enable JSON output
    #[arg(long, global = true)]
    json: bool,

    /// Output format
    #[arg(long, value_enum, global = true)]
    format: Option<FormatArg>,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    /// Data directory (default: ./.chairbook)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    /// Append JSON logs to this file instead of stderr
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    /// Evaluate the command as of this shop-local time (YYYY-MM-DDTHH:MM)
    #[arg(long, global = true)]
    at: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum FormatArg {
    Json,
    Table,
    Plain,
}

impl From<FormatArg> for OutputFormat {
    fn from(value: FormatArg) -> Self {
        match value {
            FormatArg::Json => OutputFormat::Json,
            FormatArg::Table => OutputFormat::Table,
            FormatArg::Plain => OutputFormat::Plain,
        }
    }
}

#[derive(Debug, clap::Subcommand)]
enum Commands {
    /// Initialize a Chairbook data directory
    Init,

    /// Manage barbers' working hours
    Hours {
        #[command(subcommand)]
        action: HoursAction,
    },

    /// Manage the service catalog
    Service {
        #[command(subcommand)]
        action: ServiceAction,
    },

    /// Show bookable slots for a barber on a date
    Slots {
        /// Barber ID
        barber: String,

        /// Date (YYYY-MM-DD)
        date: String,

        /// Service whose duration sets the slot length
        #[arg(long)]
        service: Option<String>,

        /// Slot length in minutes
        #[arg(long)]
        duration: Option<u32>,
    },

    /// Request an appointment for a client
    Request {
        /// Client ID
        client: String,

        /// Barber ID
        barber: String,

        /// Service ID (full or partial)
        service: String,

        /// Start time (YYYY-MM-DDTHH:MM)
        start: String,
    },

    /// Confirm a pending appointment
    Confirm {
        /// Appointment ID (full or partial)
        id: String,

        /// Confirming barber
        #[arg(long)]
        barber: String,
    },

    /// Reject an appointment as its barber
    Reject {
        /// Appointment ID (full or partial)
        id: String,

        /// Rejecting barber
        #[arg(long)]
        barber: String,
    },

    /// Cancel an appointment
    Cancel {
        /// Appointment ID (full or partial)
        id: String,

        /// Acting party (client:<id> or barber:<id>)
        #[arg(long)]
        by: String,
    },

    /// Mark a past appointment as completed
    Complete {
        /// Appointment ID (full or partial)
        id: String,

        /// Acting party (barber:<id> or system)
        #[arg(long, default_value = "system")]
        by: String,
    },

    /// Mark a past appointment as a no-show
    NoShow {
        /// Appointment ID (full or partial)
        id: String,

        /// Acting party (barber:<id> or system)
        #[arg(long, default_value = "system")]
        by: String,
    },

    /// List appointments
    List {
        /// Filter by barber
        #[arg(long)]
        barber: Option<String>,

        /// Filter by client
        #[arg(long)]
        client: Option<String>,

        /// Filter by status
        #[arg(long)]
        status: Option<String>,

        /// Filter by date (YYYY-MM-DD)
        #[arg(long)]
        date: Option<String>,
    },

    /// Show an appointment and its history
    Show {
        /// Appointment ID (full or partial)
        id: String,
    },
}

#[derive(Debug, clap::Subcommand)]
enum HoursAction {
    /// Set working hours for one weekday
    Set {
        /// Barber ID
        barber: String,

        /// Weekday (mon..sun)
        weekday: String,

        /// Opening time (HH:MM)
        open: String,

        /// Closing time (HH:MM)
        close: String,

        /// Lunch start (HH:MM)
        #[arg(long)]
        lunch_start: Option<String>,

        /// Lunch end (HH:MM)
        #[arg(long)]
        lunch_end: Option<String>,

        /// Mark the day as closed
        #[arg(long)]
        closed: bool,
    },

    /// Show a barber's weekly hours
    Show {
        /// Barber ID
        barber: String,
    },
}

#[derive(Debug, clap::Subcommand)]
enum ServiceAction {
    /// Add a service
    Add {
        /// Display name
        name: String,

        /// Price in cents
        #[arg(long)]
        price_cents: u64,

        /// Duration in minutes
        #[arg(long)]
        duration: u32,
    },

    /// List services
    List,

    /// Allow booking of a service
    Enable {
        /// Service ID (full or partial)
        id: String,
    },

    /// Stop booking of a service
    Disable {
        /// Service ID (full or partial)
        id: String,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let use_color = !cli.no_color && should_use_color();
    let formatter = create_formatter(resolve_format(&cli));

    let _guard = match init_tracing(&cli.log_level, cli.log_file.as_deref()) {
        Ok(guard) => guard,
        Err(err) => {
            print_error(&formatter.format_error(&err), use_color);
            return ExitCode::FAILURE;
        }
    };

    match run(cli, formatter.as_ref()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            print_error(&formatter.format_error(&err), use_color);
            ExitCode::FAILURE
        }
    }
}

/// Picks the output format: flags first, then the data directory's config.
fn resolve_format(cli: &Cli) -> OutputFormat {
    if let Some(format) = cli.format {
        return format.into();
    }
    if cli.json {
        return OutputFormat::Json;
    }
    DataDir::locate(cli.data_dir.as_deref())
        .and_then(|data_dir| data_dir.load_config())
        .map(|config| config.output_format)
        .unwrap_or_default()
}

fn run(cli: Cli, formatter: &dyn chairbook_cli::OutputFormatter) -> anyhow::Result<()> {
    let at = cli.at.as_deref().map(parse_datetime).transpose()?;
    let ctx = Context::new(cli.data_dir, at, formatter);

    match cli.command {
        Some(Commands::Init) => commands::init::execute(&ctx),
        Some(Commands::Hours { action }) => match action {
            HoursAction::Set {
                barber,
                weekday,
                open,
                close,
                lunch_start,
                lunch_end,
                closed,
            } => commands::hours::set(
                &ctx,
                SetHours {
                    barber,
                    weekday,
                    open,
                    close,
                    lunch_start,
                    lunch_end,
                    closed,
                },
            ),
            HoursAction::Show { barber } => commands::hours::show(&ctx, &barber),
        },
        Some(Commands::Service { action }) => match action {
            ServiceAction::Add {
                name,
                price_cents,
                duration,
            } => commands::service::add(&ctx, &name, price_cents, duration),
            ServiceAction::List => commands::service::list(&ctx),
            ServiceAction::Enable { id } => commands::service::set_active(&ctx, &id, true),
            ServiceAction::Disable { id } => commands::service::set_active(&ctx, &id, false),
        },
        Some(Commands::Slots {
            barber,
            date,
            service,
            duration,
        }) => commands::slots::execute(&ctx, &barber, &date, service.as_deref(), duration),
        Some(Commands::Request {
            client,
            barber,
            service,
            start,
        }) => commands::request::execute(&ctx, &client, &barber, &service, &start),
        Some(Commands::Confirm { id, barber }) => commands::confirm::execute(&ctx, &id, &barber),
        Some(Commands::Reject { id, barber }) => commands::cancel::reject(&ctx, &id, &barber),
        Some(Commands::Cancel { id, by }) => commands::cancel::execute(&ctx, &id, &by),
        Some(Commands::Complete { id, by }) => commands::complete::execute(&ctx, &id, &by),
        Some(Commands::NoShow { id, by }) => commands::complete::no_show(&ctx, &id, &by),
        Some(Commands::List {
            barber,
            client,
            status,
            date,
        }) => commands::list::execute(
            &ctx,
            ListArgs {
                barber,
                client,
                status,
                date,
            },
        ),
        Some(Commands::Show { id }) => commands::show::execute(&ctx, &id),
        None => {
            println!("Use --help for usage information");
            Ok(())
        }
    }
}
