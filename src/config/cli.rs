use crate::domain::model::time_of_day;
use chrono::{NaiveDate, NaiveTime};
use clap::{Args, Parser, Subcommand};

#[derive(Debug, Clone, Parser)]
#[command(name = "rose-records")]
#[command(about = "Store and inspect contact messages and appointment bookings")]
pub struct CliConfig {
    /// Path to a TOML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Directory holding the JSON tables (overrides the config file)
    #[arg(long)]
    pub data_dir: Option<String>,

    /// Keep records in memory only for this run
    #[arg(long)]
    pub memory: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Contact-form submissions
    #[command(subcommand)]
    Contact(ContactCommand),

    /// Appointment bookings
    #[command(subcommand)]
    Appointment(AppointmentCommand),
}

#[derive(Debug, Clone, Subcommand)]
pub enum ContactCommand {
    Add(ContactFields),
    Show { id: i64 },
    List,
    Update {
        id: i64,
        #[command(flatten)]
        fields: ContactPatch,
    },
    Remove { id: i64 },
}

#[derive(Debug, Clone, Subcommand)]
pub enum AppointmentCommand {
    Add(AppointmentFields),
    Show { id: i64 },
    List,
    Update {
        id: i64,
        #[command(flatten)]
        fields: AppointmentPatch,
    },
    Remove { id: i64 },
}

#[derive(Debug, Clone, Args)]
pub struct ContactFields {
    #[arg(long)]
    pub name: String,
    #[arg(long)]
    pub email: String,
    #[arg(long)]
    pub subject: String,
    #[arg(long)]
    pub message: String,
}

#[derive(Debug, Clone, Args)]
pub struct ContactPatch {
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub email: Option<String>,
    #[arg(long)]
    pub subject: Option<String>,
    #[arg(long)]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Args)]
pub struct AppointmentFields {
    #[arg(long)]
    pub full_name: String,
    #[arg(long)]
    pub email: String,
    #[arg(long)]
    pub phone: String,
    /// YYYY-MM-DD
    #[arg(long)]
    pub date: NaiveDate,
    /// HH:MM or HH:MM:SS
    #[arg(long, value_parser = parse_time)]
    pub time: NaiveTime,
}

#[derive(Debug, Clone, Args)]
pub struct AppointmentPatch {
    #[arg(long)]
    pub full_name: Option<String>,
    #[arg(long)]
    pub email: Option<String>,
    #[arg(long)]
    pub phone: Option<String>,
    #[arg(long)]
    pub date: Option<NaiveDate>,
    #[arg(long, value_parser = parse_time)]
    pub time: Option<NaiveTime>,
}

fn parse_time(value: &str) -> Result<NaiveTime, String> {
    time_of_day::parse(value).ok_or_else(|| format!("`{}` is not HH:MM or HH:MM:SS", value))
}
