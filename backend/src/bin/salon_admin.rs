//! Operator console for bookings, staff ratings, and the shop catalogue.
#![cfg_attr(not(any(test, doctest)), deny(clippy::unwrap_used))]
#![cfg_attr(not(any(test, doctest)), deny(clippy::expect_used))]

use std::io;
use std::sync::Arc;

use chrono::{DateTime, NaiveTime, Utc};
use clap::{Parser, Subcommand};
use mockable::DefaultClock;
use rust_decimal::Decimal;
use serde::Serialize;
use tokio::runtime::Builder;
use tracing::debug;

use salon_backend::domain::ports::{AppointmentListQuery, Page};
use salon_backend::domain::{
    AppointmentId, AppointmentStatus, BookAppointmentRequest, BookingService, CategoryId,
    PaymentMethod, Rating, ServiceId, ShopService, StaffRatingService, UserId,
};
use salon_backend::outbound::persistence::{
    DbPool, DieselAppointmentRepository, DieselProfileRepository,
    DieselServiceCatalogueRepository, DieselShopRepository,
};
use salon_backend::settings::SalonSettings;
use salon_backend::telemetry;

/// `salon-admin` command arguments.
#[derive(Debug, Parser)]
#[command(
    name = "salon-admin",
    about = "Manage salon bookings, staff ratings, and the shop catalogue",
    version
)]
struct CliArgs {
    /// Database connection URL. Falls back to `SALON_DATABASE_URL`.
    #[arg(long = "database-url", value_name = "url", global = true)]
    database_url: Option<String>,
    /// Emit logs as JSON lines.
    #[arg(long = "json-logs", global = true)]
    json_logs: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Book a service for a customer with a staff member.
    Book {
        #[arg(long, value_name = "uuid")]
        customer: UserId,
        #[arg(long, value_name = "uuid")]
        staff: UserId,
        #[arg(long, value_name = "uuid")]
        service: ServiceId,
        /// Appointment date as RFC 3339; defaults to now.
        #[arg(long, value_name = "timestamp")]
        date: Option<DateTime<Utc>>,
        /// Start time as `HH:MM`.
        #[arg(long, value_name = "HH:MM", value_parser = parse_time)]
        time: Option<NaiveTime>,
        #[arg(long, default_value = "")]
        notes: String,
        #[arg(long = "payment-method", default_value = "cash")]
        payment_method: PaymentMethod,
        /// Agreed total; omitted or zero takes the service's final price.
        #[arg(long = "total-price", value_name = "amount")]
        total_price: Option<Decimal>,
    },
    /// Move an appointment to another status.
    SetStatus {
        #[arg(long, value_name = "uuid")]
        id: AppointmentId,
        #[arg(long)]
        status: AppointmentStatus,
    },
    /// Cancel an appointment that has not started.
    Cancel {
        #[arg(long, value_name = "uuid")]
        id: AppointmentId,
    },
    /// List appointments, newest first.
    Appointments {
        #[arg(long)]
        status: Option<AppointmentStatus>,
        #[arg(long, value_name = "uuid")]
        staff: Option<UserId>,
        #[arg(long, value_name = "uuid")]
        customer: Option<UserId>,
        /// Matches customer username, phone, or service name.
        #[arg(long)]
        search: Option<String>,
        #[arg(long, default_value_t = 50)]
        limit: u32,
        #[arg(long, default_value_t = 0)]
        offset: u32,
    },
    /// Record a review score for a staff member.
    RateStaff {
        #[arg(long, value_name = "uuid")]
        user: UserId,
        /// Score between 0 and 5.
        #[arg(long, value_parser = parse_rating)]
        score: Rating,
    },
    /// Report products that are low on stock or sold out.
    StockReport,
    /// Print the category hierarchy, or the descendants of one category.
    CategoryTree {
        #[arg(long, value_name = "uuid")]
        root: Option<CategoryId>,
    },
}

fn parse_time(raw: &str) -> Result<NaiveTime, String> {
    NaiveTime::parse_from_str(raw, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(raw, "%H:%M:%S"))
        .map_err(|error| format!("expected HH:MM: {error}"))
}

fn parse_rating(raw: &str) -> Result<Rating, String> {
    let value: Decimal = raw
        .trim()
        .parse()
        .map_err(|error| format!("score must be a number: {error}"))?;
    Rating::new(value).map_err(|error| error.to_string())
}

fn main() -> io::Result<()> {
    let runtime = Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(|error| io::Error::other(format!("create Tokio runtime: {error}")))?;
    runtime.block_on(async_main())
}

async fn async_main() -> io::Result<()> {
    let CliArgs {
        database_url,
        json_logs,
        command,
    } = CliArgs::try_parse().map_err(io::Error::other)?;
    let settings = SalonSettings::from_environment().map_err(io::Error::other)?;
    telemetry::init(json_logs || settings.json_logs);

    let database_url = database_url
        .or_else(|| settings.database_url.clone())
        .ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                "missing database URL; pass --database-url or set SALON_DATABASE_URL",
            )
        })?;
    let pool = DbPool::new(settings.pool_config(database_url))
        .await
        .map_err(|error| io::Error::other(format!("create database pool: {error}")))?;
    debug!("database pool ready");

    run(command, &pool).await
}

async fn run(command: Command, pool: &DbPool) -> io::Result<()> {
    let booking = || {
        BookingService::new(
            Arc::new(DieselAppointmentRepository::new(pool.clone())),
            Arc::new(DieselServiceCatalogueRepository::new(pool.clone())),
            Arc::new(DefaultClock),
        )
    };
    let shop = || ShopService::new(Arc::new(DieselShopRepository::new(pool.clone())));

    match command {
        Command::Book {
            customer,
            staff,
            service,
            date,
            time,
            notes,
            payment_method,
            total_price,
        } => {
            let request = BookAppointmentRequest {
                customer_id: customer,
                staff_id: staff,
                service_id: service,
                appointment_date: date,
                appointment_time: time,
                notes,
                payment_method,
                total_price,
            };
            print_json(&booking().book(request).await.map_err(io::Error::other)?)
        }
        Command::SetStatus { id, status } => print_json(
            &booking()
                .update_status(id, status)
                .await
                .map_err(io::Error::other)?,
        ),
        Command::Cancel { id } => {
            print_json(&booking().cancel(id).await.map_err(io::Error::other)?)
        }
        Command::Appointments {
            status,
            staff,
            customer,
            search,
            limit,
            offset,
        } => {
            let query = AppointmentListQuery {
                status,
                staff_id: staff,
                customer_id: customer,
                page: Page::new(limit, offset),
                ..AppointmentListQuery::default()
            }
            .with_search(search);
            print_json(&booking().list(&query).await.map_err(io::Error::other)?)
        }
        Command::RateStaff { user, score } => {
            let ratings =
                StaffRatingService::new(Arc::new(DieselProfileRepository::new(pool.clone())));
            print_json(&ratings.rate(user, score).await.map_err(io::Error::other)?)
        }
        Command::StockReport => {
            print_json(&shop().stock_report().await.map_err(io::Error::other)?)
        }
        Command::CategoryTree { root: Some(root) } => print_json(
            &shop()
                .category_descendants(root)
                .await
                .map_err(io::Error::other)?,
        ),
        Command::CategoryTree { root: None } => {
            let tree = shop().category_tree().await.map_err(io::Error::other)?;
            for category in tree.categories() {
                let label = tree
                    .label(category.id())
                    .unwrap_or_else(|| category.name().to_owned());
                println!("{}\t{label}", category.id());
            }
            Ok(())
        }
    }
}

fn print_json<T: Serialize>(value: &T) -> io::Result<()> {
    let rendered = serde_json::to_string_pretty(value)
        .map_err(|error| io::Error::other(format!("render output: {error}")))?;
    println!("{rendered}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("09:30", NaiveTime::from_hms_opt(9, 30, 0))]
    #[case("16:00:00", NaiveTime::from_hms_opt(16, 0, 0))]
    fn times_accept_minutes_and_seconds(#[case] raw: &str, #[case] expected: Option<NaiveTime>) {
        assert_eq!(parse_time(raw).ok(), expected);
    }

    #[rstest]
    #[case("5.5")]
    #[case("4.555")]
    #[case("great")]
    fn invalid_scores_are_rejected(#[case] raw: &str) {
        assert!(parse_rating(raw).is_err());
    }

    #[rstest]
    fn book_arguments_parse() {
        let customer = UserId::random();
        let staff = UserId::random();
        let service = ServiceId::random();
        let args = CliArgs::try_parse_from([
            "salon-admin".to_owned(),
            "book".to_owned(),
            format!("--customer={customer}"),
            format!("--staff={staff}"),
            format!("--service={service}"),
            "--time=16:00".to_owned(),
            "--payment-method=wallet".to_owned(),
        ])
        .expect("arguments should parse");

        let Command::Book {
            time,
            payment_method,
            total_price,
            ..
        } = args.command
        else {
            panic!("expected the book command");
        };
        assert_eq!(time, NaiveTime::from_hms_opt(16, 0, 0));
        assert_eq!(payment_method, PaymentMethod::Wallet);
        assert_eq!(total_price, None);
    }

    #[rstest]
    fn rate_staff_arguments_parse() {
        let user = UserId::random();
        let args = CliArgs::try_parse_from([
            "salon-admin".to_owned(),
            "rate-staff".to_owned(),
            format!("--user={user}"),
            "--score=4.5".to_owned(),
        ])
        .expect("arguments should parse");

        let Command::RateStaff { user: parsed, score } = args.command else {
            panic!("expected the rate-staff command");
        };
        assert_eq!(parsed, user);
        assert_eq!(score, Rating::new(Decimal::new(45, 1)).expect("rating"));
    }

    #[rstest]
    fn malformed_user_ids_are_rejected() {
        let result = CliArgs::try_parse_from(["salon-admin", "rate-staff", "--user=42", "--score=3"]);
        assert!(result.is_err());
    }
}
