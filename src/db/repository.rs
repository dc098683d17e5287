//! Contact repository.
//!
//! Plain persistence over the `contacts` table. Business rules live in the service layer.

use chrono::Utc;
use sqlx::{Row, SqlitePool};
use uuid::fmt::Hyphenated;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::{Contact, CreateContactRequest};

const CONTACT_COLUMNS: &str = "id, name, email, phone, title, address, status, photo_url";

/// Ordering used by every listing: name ascending, ties in insertion order.
const ORDER_BY_NAME: &str = "ORDER BY name ASC, created_at ASC, id ASC";

/// Database repository for contact records.
#[derive(Clone)]
pub struct ContactRepository {
    pool: SqlitePool,
}

impl ContactRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Fetch one page of contacts sorted by name, along with the total count.
    pub async fn find_page(&self, page: u32, size: u32) -> Result<(Vec<Contact>, u64), AppError> {
        let offset = i64::from(page) * i64::from(size);

        let rows = sqlx::query(&format!(
            "SELECT {CONTACT_COLUMNS} FROM contacts {ORDER_BY_NAME} LIMIT ? OFFSET ?"
        ))
        .bind(i64::from(size))
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        let contacts = rows
            .iter()
            .map(contact_from_row)
            .collect::<Result<Vec<_>, _>>()?;

        Ok((contacts, self.count().await?))
    }

    /// Count all contacts.
    pub async fn count(&self) -> Result<u64, AppError> {
        let row = sqlx::query("SELECT COUNT(*) AS total FROM contacts")
            .fetch_one(&self.pool)
            .await?;
        let total: i64 = row.get("total");
        Ok(total.max(0) as u64)
    }

    /// Get a contact by ID.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Contact>, AppError> {
        let row = sqlx::query(&format!(
            "SELECT {CONTACT_COLUMNS} FROM contacts WHERE id = ?"
        ))
        .bind(id.hyphenated())
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(contact_from_row).transpose()
    }

    /// Find a contact sharing the given email or phone. `None` values never match.
    pub async fn find_duplicate(
        &self,
        email: Option<&str>,
        phone: Option<&str>,
    ) -> Result<Option<Contact>, AppError> {
        if email.is_none() && phone.is_none() {
            return Ok(None);
        }

        let row = sqlx::query(&format!(
            "SELECT {CONTACT_COLUMNS} FROM contacts WHERE email = ? OR phone = ? LIMIT 1"
        ))
        .bind(email)
        .bind(phone)
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(contact_from_row).transpose()
    }

    /// Insert a new contact with a freshly generated ID.
    ///
    /// A duplicate email or phone is rejected by the unique indexes and
    /// surfaces as `AppError::Conflict`.
    pub async fn insert(&self, request: &CreateContactRequest) -> Result<Contact, AppError> {
        let contact = Contact {
            id: Uuid::new_v4(),
            name: request.name.clone(),
            email: request.email.clone(),
            phone: request.phone.clone(),
            title: request.title.clone(),
            address: request.address.clone(),
            status: request.status.clone(),
            photo_url: None,
        };
        let now = Utc::now().to_rfc3339();

        sqlx::query(&format!(
            "INSERT INTO contacts ({CONTACT_COLUMNS}, created_at) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)"
        ))
        .bind(contact.id.hyphenated())
        .bind(&contact.name)
        .bind(&contact.email)
        .bind(&contact.phone)
        .bind(&contact.title)
        .bind(&contact.address)
        .bind(&contact.status)
        .bind(&contact.photo_url)
        .bind(&now)
        .execute(&self.pool)
        .await?;

        Ok(contact)
    }

    /// Set the photo URL of a contact. Returns `false` when no such contact exists.
    pub async fn update_photo_url(&self, id: Uuid, photo_url: &str) -> Result<bool, AppError> {
        let result = sqlx::query("UPDATE contacts SET photo_url = ? WHERE id = ?")
            .bind(photo_url)
            .bind(id.hyphenated())
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Delete a contact. Returns `false` when no such contact exists.
    pub async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM contacts WHERE id = ?")
            .bind(id.hyphenated())
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

fn contact_from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Contact, AppError> {
    let id: Hyphenated = row.try_get("id")?;
    Ok(Contact {
        id: id.into_uuid(),
        name: row.try_get("name")?,
        email: row.try_get("email")?,
        phone: row.try_get("phone")?,
        title: row.try_get("title")?,
        address: row.try_get("address")?,
        status: row.try_get("status")?,
        photo_url: row.try_get("photo_url")?,
    })
}
