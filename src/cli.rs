use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "barber")]
#[command(about = "Barbershop appointment desk - live appointment board over PostgreSQL")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to config file (default: .barber/config.toml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[arg(long, global = true)]
    pub database_url: Option<String>,

    #[arg(long, global = true, value_enum, default_value = "json")]
    pub output: OutputFormat,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Apply the database schema
    InitDb {
        #[arg(short, long)]
        url: Option<String>,
    },

    /// Show the appointment board
    Appointments {
        /// active, cancelled or completed (default: config or active)
        #[arg(short, long)]
        filter: Option<String>,

        /// Keep printing the board every time it changes
        #[arg(short, long, default_value_t = false)]
        watch: bool,
    },

    /// Show the customer list
    Customers {
        #[arg(short, long, default_value_t = false)]
        watch: bool,
    },

    /// Apply a swipe gesture to an appointment
    Swipe { id: String, direction: String },

    /// Print the status transition table
    Transitions,
}

impl Commands {
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::InitDb { .. } => "init-db",
            Self::Appointments { .. } => "appointments",
            Self::Customers { .. } => "customers",
            Self::Swipe { .. } => "swipe",
            Self::Transitions => "transitions",
        }
    }
}

#[derive(Clone, Debug, ValueEnum, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}
