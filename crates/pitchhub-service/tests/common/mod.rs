//! Shared fixtures for service tests.

#![allow(dead_code)]

use std::sync::Arc;

use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

use pitchhub_auth::rbac::RbacEnforcer;
use pitchhub_core::config::{BookingConfig, MailConfig};
use pitchhub_database::store::{BookingStore, MemoryBookingStore};
use pitchhub_entity::booking::{Booking, BookingStatus};
use pitchhub_entity::pitch::Pitch;
use pitchhub_entity::slot::{PitchTimeSlot, TimeSlot};
use pitchhub_entity::user::{User, UserRole};
use pitchhub_entity::voucher::Voucher;
use pitchhub_service::booking::{BookingService, CreateBookingRequest};
use pitchhub_service::context::RequestContext;
use pitchhub_service::notification::{BookingNotifier, MemoryMailer};

/// Wall clock every test runs at: 2030-05-01 10:00 UTC.
pub fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2030, 5, 1, 10, 0, 0).unwrap()
}

pub fn today() -> NaiveDate {
    now().date_naive()
}

pub fn date(days_from_today: i64) -> NaiveDate {
    today() + chrono::Duration::days(days_from_today)
}

pub fn time(h: u32, m: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, 0).unwrap()
}

pub fn dec(s: &str) -> Decimal {
    s.parse().unwrap()
}

pub fn user(username: &str, role: UserRole) -> User {
    User {
        id: Uuid::now_v7(),
        username: username.to_string(),
        email: format!("{username}@example.com"),
        full_name: String::new(),
        phone_number: String::new(),
        password_hash: String::new(),
        role,
        is_active: true,
        activation_token: None,
        activation_expiry: None,
        created_at: now(),
        updated_at: now(),
    }
}

pub fn voucher(code: &str, percent: i32) -> Voucher {
    Voucher {
        id: Uuid::now_v7(),
        code: code.to_string(),
        description: None,
        discount_percent: percent,
        min_order_value: None,
        usage_limit: None,
        used_count: 0,
        start_date: None,
        end_date: None,
        is_active: true,
        created_at: now(),
    }
}

pub fn ctx(user: &User) -> RequestContext {
    RequestContext::new(user.id, user.role, &user.username).at(now())
}

/// One pitch at 100,000 per hour with a 2-hour morning slot and a
/// 1.5-hour evening slot, plus a user, an admin and a guest.
pub struct Fixture {
    pub store: MemoryBookingStore,
    pub mailer: MemoryMailer,
    pub service: BookingService,
    pub user: User,
    pub other: User,
    pub admin: User,
    pub guest: User,
    pub pitch: Pitch,
    /// 07:00 - 09:00
    pub morning: PitchTimeSlot,
    /// 17:00 - 18:30
    pub evening: PitchTimeSlot,
}

impl Fixture {
    pub async fn new() -> Self {
        Self::with_store(MemoryBookingStore::new(), None).await
    }

    /// Build the fixture over `store`, optionally wrapped by another
    /// [`BookingStore`] handed to the service.
    pub async fn with_store(
        store: MemoryBookingStore,
        wrapper: Option<Arc<dyn BookingStore>>,
    ) -> Self {
        let user = self::user("minh", UserRole::User);
        let other = self::user("lan", UserRole::User);
        let admin = self::user("admin", UserRole::Admin);
        let guest = self::user("visitor", UserRole::Guest);
        for u in [&user, &other, &admin, &guest] {
            store.put_user(u.clone()).await;
        }

        let pitch = Pitch {
            id: Uuid::now_v7(),
            name: "Thong Nhat 7".into(),
            address: "138 Dao Duy Tu".into(),
            description: None,
            pitch_type_id: Uuid::now_v7(),
            base_price_per_hour: dec("100000"),
            images: Vec::new(),
            is_available: true,
            created_at: now(),
            updated_at: now(),
        };
        store.put_pitch(pitch.clone()).await;

        let morning_slot = TimeSlot {
            id: Uuid::now_v7(),
            name: "Morning".into(),
            start_time: time(7, 0),
            end_time: time(9, 0),
        };
        let evening_slot = TimeSlot {
            id: Uuid::now_v7(),
            name: "Evening".into(),
            start_time: time(17, 0),
            end_time: time(18, 30),
        };
        store.put_time_slot(morning_slot.clone()).await;
        store.put_time_slot(evening_slot.clone()).await;
        let morning = store.attach_slot(pitch.id, morning_slot.id, true).await;
        let evening = store.attach_slot(pitch.id, evening_slot.id, true).await;

        let mailer = MemoryMailer::new();
        let notifier = Arc::new(BookingNotifier::new(
            Arc::new(mailer.clone()),
            MailConfig::default(),
        ));
        let backing: Arc<dyn BookingStore> = match wrapper {
            Some(wrapper) => wrapper,
            None => Arc::new(store.clone()),
        };
        let service = BookingService::new(
            backing,
            notifier,
            Arc::new(RbacEnforcer::new()),
            BookingConfig::default(),
        );

        Self {
            store,
            mailer,
            service,
            user,
            other,
            admin,
            guest,
            pitch,
            morning,
            evening,
        }
    }

    pub fn request(&self, slot: &PitchTimeSlot, days_from_today: i64) -> CreateBookingRequest {
        CreateBookingRequest {
            pitch_id: self.pitch.id,
            time_slot_id: slot.id,
            booking_date: date(days_from_today),
            voucher_code: None,
            note: None,
        }
    }

    /// Store a historical booking in `status` without going through the service.
    pub async fn seed_booking(
        &self,
        owner: &User,
        slot: &PitchTimeSlot,
        days_from_today: i64,
        status: BookingStatus,
    ) -> Booking {
        let booking = Booking {
            id: Uuid::now_v7(),
            user_id: owner.id,
            pitch_id: self.pitch.id,
            pitch_time_slot_id: slot.id,
            booking_date: date(days_from_today),
            start_time: time(7, 0),
            end_time: time(9, 0),
            duration_hours: dec("2.00"),
            final_price: dec("200000.00"),
            voucher_id: None,
            note: None,
            status,
            rejection_reason: None,
            created_at: now(),
            updated_at: now(),
        };
        self.store.put_booking(booking.clone()).await;
        booking
    }
}
