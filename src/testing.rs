// In-memory doubles for the storage and mail seams, used by unit and router tests

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use std::sync::Mutex;

use crate::auth::{
    error::AuthError,
    models::{NewUser, ProfileUpdate, Role, User},
    password::PasswordService,
    repository::UserStore,
};
use crate::bookings::{
    models::{Booking, BookingStatus},
    repository::BookingStore,
};
use crate::catalog::{
    models::{CreateDestination, CreateService, Destination, Service, UpdateDestination, UpdateService},
    repository::{DestinationStore, ServiceStore},
};
use crate::error::ApiError;
use crate::notifications::{Mailer, NotificationError};

#[derive(Default)]
pub struct InMemoryUserStore {
    users: Mutex<Vec<User>>,
}

impl InMemoryUserStore {
    /// Insert a verified user directly, bypassing registration
    pub fn seed(&self, email: &str, password: &str, role: Role) -> User {
        let mut users = self.users.lock().unwrap();
        let now = Utc::now();
        let user = User {
            id: users.len() as i32 + 1,
            email: email.to_string(),
            password_hash: PasswordService::hash_password(password).unwrap(),
            first_name: "Seeded".to_string(),
            last_name: role.as_str().to_string(),
            phone: None,
            role,
            email_verified: true,
            verification_code: None,
            created_at: now,
            updated_at: now,
        };
        users.push(user.clone());
        user
    }

    pub fn remove(&self, user_id: i32) {
        self.users.lock().unwrap().retain(|u| u.id != user_id);
    }
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AuthError> {
        let users = self.users.lock().unwrap();
        Ok(users.iter().find(|u| u.email.eq_ignore_ascii_case(email)).cloned())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<User>, AuthError> {
        Ok(self.users.lock().unwrap().iter().find(|u| u.id == id).cloned())
    }

    async fn create_user(&self, user: NewUser) -> Result<User, AuthError> {
        let mut users = self.users.lock().unwrap();
        if users.iter().any(|u| u.email.eq_ignore_ascii_case(&user.email)) {
            return Err(AuthError::DuplicateUser);
        }
        let now = Utc::now();
        let created = User {
            id: users.iter().map(|u| u.id).max().unwrap_or(0) + 1,
            email: user.email,
            password_hash: user.password_hash,
            first_name: user.first_name,
            last_name: user.last_name,
            phone: user.phone,
            role: user.role,
            email_verified: false,
            verification_code: Some(user.verification_code),
            created_at: now,
            updated_at: now,
        };
        users.push(created.clone());
        Ok(created)
    }

    async fn update_verification_code(&self, user_id: i32, code: &str) -> Result<(), AuthError> {
        let mut users = self.users.lock().unwrap();
        if let Some(user) = users.iter_mut().find(|u| u.id == user_id) {
            user.verification_code = Some(code.to_string());
        }
        Ok(())
    }

    async fn verify_email(&self, email: &str, code: &str) -> Result<bool, AuthError> {
        let mut users = self.users.lock().unwrap();
        match users
            .iter_mut()
            .find(|u| u.email.eq_ignore_ascii_case(email) && u.verification_code.as_deref() == Some(code))
        {
            Some(user) => {
                user.email_verified = true;
                user.verification_code = None;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn list_users(&self) -> Result<Vec<User>, AuthError> {
        Ok(self.users.lock().unwrap().clone())
    }

    async fn list_by_role(&self, role: Role) -> Result<Vec<User>, AuthError> {
        Ok(self.users.lock().unwrap().iter().filter(|u| u.role == role).cloned().collect())
    }

    async fn update_profile(&self, user_id: i32, update: &ProfileUpdate) -> Result<Option<User>, AuthError> {
        let mut users = self.users.lock().unwrap();
        Ok(users.iter_mut().find(|u| u.id == user_id).map(|user| {
            if let Some(first) = &update.first_name {
                user.first_name = first.clone();
            }
            if let Some(last) = &update.last_name {
                user.last_name = last.clone();
            }
            if let Some(phone) = &update.phone {
                user.phone = Some(phone.clone());
            }
            user.clone()
        }))
    }

    async fn update_role(&self, user_id: i32, role: Role) -> Result<Option<User>, AuthError> {
        let mut users = self.users.lock().unwrap();
        Ok(users.iter_mut().find(|u| u.id == user_id).map(|user| {
            user.role = role;
            user.clone()
        }))
    }

    async fn delete_user(&self, user_id: i32) -> Result<bool, AuthError> {
        let mut users = self.users.lock().unwrap();
        let before = users.len();
        users.retain(|u| u.id != user_id);
        Ok(users.len() < before)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SentMail {
    Verification { to: String, code: String },
    Welcome { to: String },
}

/// Records every send; can be switched to fail
#[derive(Default)]
pub struct RecordingMailer {
    sent: Mutex<Vec<SentMail>>,
    failing: Mutex<bool>,
}

impl RecordingMailer {
    pub fn fail_all(&self) {
        *self.failing.lock().unwrap() = true;
    }

    pub fn verification_codes_for(&self, to: &str) -> Vec<String> {
        self.sent
            .lock()
            .unwrap()
            .iter()
            .filter_map(|m| match m {
                SentMail::Verification { to: t, code } if t == to => Some(code.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn welcome_count_for(&self, to: &str) -> usize {
        self.sent
            .lock()
            .unwrap()
            .iter()
            .filter(|m| matches!(m, SentMail::Welcome { to: t } if t == to))
            .count()
    }

    fn check(&self) -> Result<(), NotificationError> {
        if *self.failing.lock().unwrap() {
            Err(NotificationError::Transport("relay unreachable".to_string()))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl Mailer for RecordingMailer {
    async fn send_verification(&self, to: &str, _first_name: &str, code: &str) -> Result<(), NotificationError> {
        self.check()?;
        self.sent.lock().unwrap().push(SentMail::Verification {
            to: to.to_string(),
            code: code.to_string(),
        });
        Ok(())
    }

    async fn send_welcome(&self, to: &str, _first_name: &str) -> Result<(), NotificationError> {
        self.check()?;
        self.sent.lock().unwrap().push(SentMail::Welcome { to: to.to_string() });
        Ok(())
    }
}

#[derive(Default)]
pub struct InMemoryDestinationStore {
    destinations: Mutex<Vec<Destination>>,
}

#[async_trait]
impl DestinationStore for InMemoryDestinationStore {
    async fn list(&self) -> Result<Vec<Destination>, ApiError> {
        Ok(self.destinations.lock().unwrap().clone())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Destination>, ApiError> {
        Ok(self.destinations.lock().unwrap().iter().find(|d| d.id == id).cloned())
    }

    async fn create(&self, input: &CreateDestination) -> Result<Destination, ApiError> {
        let mut destinations = self.destinations.lock().unwrap();
        let now = Utc::now();
        let destination = Destination {
            id: destinations.iter().map(|d| d.id).max().unwrap_or(0) + 1,
            name: input.name.clone(),
            country: input.country.clone(),
            city: input.city.clone(),
            description: input.description.clone(),
            image_url: input.image_url.clone(),
            rating: input.rating.unwrap_or(0.0),
            deals_count: input.deals_count.unwrap_or(0),
            created_at: now,
            updated_at: now,
        };
        destinations.push(destination.clone());
        Ok(destination)
    }

    async fn update(&self, id: i32, input: &UpdateDestination) -> Result<Option<Destination>, ApiError> {
        let mut destinations = self.destinations.lock().unwrap();
        Ok(destinations.iter_mut().find(|d| d.id == id).map(|d| {
            if let Some(name) = &input.name {
                d.name = name.clone();
            }
            if let Some(country) = &input.country {
                d.country = country.clone();
            }
            if let Some(city) = &input.city {
                d.city = city.clone();
            }
            if let Some(description) = &input.description {
                d.description = Some(description.clone());
            }
            if let Some(image_url) = &input.image_url {
                d.image_url = Some(image_url.clone());
            }
            if let Some(rating) = input.rating {
                d.rating = rating;
            }
            if let Some(deals) = input.deals_count {
                d.deals_count = deals;
            }
            d.updated_at = Utc::now();
            d.clone()
        }))
    }

    async fn delete(&self, id: i32) -> Result<bool, ApiError> {
        let mut destinations = self.destinations.lock().unwrap();
        let before = destinations.len();
        destinations.retain(|d| d.id != id);
        Ok(destinations.len() < before)
    }
}

#[derive(Default)]
pub struct InMemoryServiceStore {
    services: Mutex<Vec<Service>>,
}

impl InMemoryServiceStore {
    /// Insert a service directly, without an owning provider
    pub fn seed(&self, name: &str, price: Decimal, availability: bool) -> Service {
        let mut services = self.services.lock().unwrap();
        let now = Utc::now();
        let service = Service {
            id: services.iter().map(|s| s.id).max().unwrap_or(0) + 1,
            provider_id: None,
            service_type_id: 1,
            name: name.to_string(),
            description: None,
            price,
            availability,
            created_at: now,
            updated_at: now,
        };
        services.push(service.clone());
        service
    }
}

#[async_trait]
impl ServiceStore for InMemoryServiceStore {
    async fn list(&self, service_type_id: Option<i32>) -> Result<Vec<Service>, ApiError> {
        let services = self.services.lock().unwrap();
        Ok(services
            .iter()
            .filter(|s| service_type_id.map_or(true, |t| s.service_type_id == t))
            .cloned()
            .collect())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Service>, ApiError> {
        Ok(self.services.lock().unwrap().iter().find(|s| s.id == id).cloned())
    }

    async fn create(&self, provider_id: Option<i32>, input: &CreateService) -> Result<Service, ApiError> {
        let mut services = self.services.lock().unwrap();
        let now = Utc::now();
        let service = Service {
            id: services.iter().map(|s| s.id).max().unwrap_or(0) + 1,
            provider_id,
            service_type_id: input.service_type_id,
            name: input.name.clone(),
            description: input.description.clone(),
            price: input.price,
            availability: input.availability.unwrap_or(true),
            created_at: now,
            updated_at: now,
        };
        services.push(service.clone());
        Ok(service)
    }

    async fn update(&self, id: i32, input: &UpdateService) -> Result<Option<Service>, ApiError> {
        let mut services = self.services.lock().unwrap();
        Ok(services.iter_mut().find(|s| s.id == id).map(|s| {
            if let Some(kind) = input.service_type_id {
                s.service_type_id = kind;
            }
            if let Some(name) = &input.name {
                s.name = name.clone();
            }
            if let Some(description) = &input.description {
                s.description = Some(description.clone());
            }
            if let Some(price) = input.price {
                s.price = price;
            }
            if let Some(availability) = input.availability {
                s.availability = availability;
            }
            s.updated_at = Utc::now();
            s.clone()
        }))
    }

    async fn delete(&self, id: i32) -> Result<bool, ApiError> {
        let mut services = self.services.lock().unwrap();
        let before = services.len();
        services.retain(|s| s.id != id);
        Ok(services.len() < before)
    }
}

#[derive(Default)]
pub struct InMemoryBookingStore {
    bookings: Mutex<Vec<Booking>>,
}

#[async_trait]
impl BookingStore for InMemoryBookingStore {
    async fn create(
        &self,
        user_id: i32,
        service_id: i32,
        start: NaiveDate,
        end: NaiveDate,
        total_price: Decimal,
    ) -> Result<Booking, ApiError> {
        let mut bookings = self.bookings.lock().unwrap();
        let now = Utc::now();
        let booking = Booking {
            id: bookings.iter().map(|b| b.id).max().unwrap_or(0) + 1,
            user_id,
            service_id,
            booking_date_start: start,
            booking_date_end: end,
            total_price,
            status: BookingStatus::Pending,
            created_at: now,
            updated_at: now,
        };
        bookings.push(booking.clone());
        Ok(booking)
    }

    async fn find_by_user(&self, user_id: i32) -> Result<Vec<Booking>, ApiError> {
        let bookings = self.bookings.lock().unwrap();
        Ok(bookings.iter().rev().filter(|b| b.user_id == user_id).cloned().collect())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Booking>, ApiError> {
        Ok(self.bookings.lock().unwrap().iter().find(|b| b.id == id).cloned())
    }

    async fn update_status(&self, id: i32, status: BookingStatus) -> Result<Option<Booking>, ApiError> {
        let mut bookings = self.bookings.lock().unwrap();
        Ok(bookings.iter_mut().find(|b| b.id == id).map(|b| {
            b.status = status;
            b.updated_at = Utc::now();
            b.clone()
        }))
    }
}
