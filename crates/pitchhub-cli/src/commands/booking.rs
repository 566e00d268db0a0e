//! Booking inspection commands.

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use pitchhub_core::config::AppConfig;
use pitchhub_core::error::AppError;
use pitchhub_core::types::pagination::PageRequest;
use pitchhub_database::repositories::BookingRepository;
use pitchhub_database::BookingFilter;
use pitchhub_entity::booking::{BookingDetail, BookingStatus};

use crate::output::{self, OutputFormat};

/// Arguments for booking commands
#[derive(Debug, Args)]
pub struct BookingArgs {
    /// Booking subcommand
    #[command(subcommand)]
    pub command: BookingCommand,
}

/// Booking subcommands
#[derive(Debug, Subcommand)]
pub enum BookingCommand {
    /// List bookings, newest first
    List {
        /// Filter by status (pending, confirmed, rejected, cancelled)
        #[arg(short, long)]
        status: Option<String>,
        /// Page number
        #[arg(long, default_value_t = 1)]
        page: u64,
    },
}

/// Booking display row for table output
#[derive(Debug, Serialize, Tabled)]
struct BookingRow {
    id: String,
    user: String,
    pitch: String,
    date: String,
    slot: String,
    price: String,
    status: String,
}

impl From<&BookingDetail> for BookingRow {
    fn from(d: &BookingDetail) -> Self {
        let b = &d.booking;
        Self {
            id: b.id.to_string(),
            user: d.username.clone(),
            pitch: d.pitch_name.clone(),
            date: b.booking_date.format("%d/%m/%Y").to_string(),
            slot: format!(
                "{} - {}",
                b.start_time.format("%H:%M"),
                b.end_time.format("%H:%M")
            ),
            price: b.final_price.to_string(),
            status: b.status.to_string(),
        }
    }
}

/// Execute booking commands
pub async fn execute(
    args: &BookingArgs,
    config: &AppConfig,
    format: OutputFormat,
) -> Result<(), AppError> {
    let pool = super::create_db_pool(config).await?;
    let booking_repo = BookingRepository::new(pool);

    match &args.command {
        BookingCommand::List { status, page } => {
            let status = status
                .as_deref()
                .map(str::parse::<BookingStatus>)
                .transpose()?;
            let filter = BookingFilter {
                user_id: None,
                status,
            };
            let bookings = booking_repo
                .find_all(
                    &filter,
                    &PageRequest::new(*page, config.booking.bookings_page_size),
                )
                .await?;

            let rows: Vec<BookingRow> = bookings.items.iter().map(BookingRow::from).collect();
            output::print_list(&rows, format);
            if format == OutputFormat::Table {
                println!(
                    "Page {} of {} ({} bookings)",
                    bookings.page, bookings.total_pages, bookings.total_items
                );
            }
        }
    }

    Ok(())
}
