//! Voucher management commands.

use chrono::NaiveDate;
use clap::{Args, Subcommand};
use rust_decimal::Decimal;
use serde::Serialize;
use tabled::Tabled;

use pitchhub_core::config::AppConfig;
use pitchhub_core::error::AppError;
use pitchhub_core::types::pagination::PageRequest;
use pitchhub_database::repositories::VoucherRepository;
use pitchhub_entity::voucher::{CreateVoucher, Voucher};
use pitchhub_service::voucher::CreateVoucherRequest;

use crate::output::{self, OutputFormat};

/// Arguments for voucher commands
#[derive(Debug, Args)]
pub struct VoucherArgs {
    /// Voucher subcommand
    #[command(subcommand)]
    pub command: VoucherCommand,
}

/// Voucher subcommands
#[derive(Debug, Subcommand)]
pub enum VoucherCommand {
    /// Create a voucher
    Create {
        /// Code customers type at checkout
        code: String,
        /// Discount percentage (0-100)
        #[arg(short = 'p', long)]
        percent: i32,
        /// Maximum number of redemptions
        #[arg(short, long)]
        limit: Option<i32>,
        /// First valid day (YYYY-MM-DD)
        #[arg(long)]
        from: Option<NaiveDate>,
        /// Last valid day (YYYY-MM-DD)
        #[arg(long)]
        until: Option<NaiveDate>,
        /// Description
        #[arg(short, long)]
        description: Option<String>,
        /// Minimum order value
        #[arg(long)]
        min_order: Option<Decimal>,
        /// Create the voucher disabled
        #[arg(long)]
        inactive: bool,
    },
    /// List vouchers
    List {
        /// Page number
        #[arg(long, default_value_t = 1)]
        page: u64,
    },
}

/// Voucher display row for table output
#[derive(Debug, Serialize, Tabled)]
struct VoucherRow {
    code: String,
    discount: String,
    used: String,
    valid: String,
    active: bool,
}

impl From<&Voucher> for VoucherRow {
    fn from(v: &Voucher) -> Self {
        let day = |d: Option<NaiveDate>| d.map(|d| d.to_string()).unwrap_or_else(|| "-".into());
        Self {
            code: v.code.clone(),
            discount: format!("{}%", v.discount_percent),
            used: match v.usage_limit {
                Some(limit) => format!("{}/{}", v.used_count, limit),
                None => v.used_count.to_string(),
            },
            valid: format!("{} .. {}", day(v.start_date), day(v.end_date)),
            active: v.is_active,
        }
    }
}

/// Execute voucher commands
pub async fn execute(
    args: &VoucherArgs,
    config: &AppConfig,
    format: OutputFormat,
) -> Result<(), AppError> {
    let pool = super::create_db_pool(config).await?;
    let voucher_repo = VoucherRepository::new(pool);

    match &args.command {
        VoucherCommand::Create {
            code,
            percent,
            limit,
            from,
            until,
            description,
            min_order,
            inactive,
        } => {
            let req = CreateVoucherRequest {
                code: code.clone(),
                description: description.clone(),
                discount_percent: *percent,
                min_order_value: *min_order,
                usage_limit: *limit,
                start_date: *from,
                end_date: *until,
                is_active: !inactive,
            };
            req.validate()?;

            let voucher = voucher_repo
                .create(&CreateVoucher {
                    code: req.code,
                    description: req.description,
                    discount_percent: req.discount_percent,
                    min_order_value: req.min_order_value,
                    usage_limit: req.usage_limit,
                    start_date: req.start_date,
                    end_date: req.end_date,
                    is_active: req.is_active,
                })
                .await?;

            output::print_success(&format!("Voucher '{}' created", voucher.code));
            output::print_kv("Discount", &format!("{}%", voucher.discount_percent));
            output::print_kv("ID", &voucher.id.to_string());
        }
        VoucherCommand::List { page } => {
            let vouchers = voucher_repo
                .find_all(&PageRequest::new(*page, config.booking.bookings_page_size))
                .await?;
            let rows: Vec<VoucherRow> = vouchers.items.iter().map(VoucherRow::from).collect();
            output::print_list(&rows, format);
        }
    }

    Ok(())
}
