//! Contact business rules: duplicate detection, pagination and photo uploads.

use std::sync::Arc;

use uuid::Uuid;

use crate::db::ContactRepository;
use crate::errors::AppError;
use crate::models::{Contact, CreateContactRequest, Page};
use crate::photos::{self, PhotoStorage};

/// Contact service. Shares the repository, owns the photo storage handle.
#[derive(Clone)]
pub struct ContactService {
    repo: Arc<ContactRepository>,
    photos: PhotoStorage,
}

impl ContactService {
    pub fn new(repo: Arc<ContactRepository>, photos: PhotoStorage) -> Self {
        Self { repo, photos }
    }

    /// Return one page of contacts sorted by name ascending.
    pub async fn list_contacts(&self, page: u32, size: u32) -> Result<Page<Contact>, AppError> {
        if size == 0 {
            return Err(AppError::Validation(
                "Page size must be at least 1".to_string(),
            ));
        }

        let (contacts, total) = self.repo.find_page(page, size).await?;
        Ok(Page::new(contacts, page, size, total))
    }

    pub async fn get_contact(&self, id: Uuid) -> Result<Contact, AppError> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Contact {} not found", id)))
    }

    /// Create a contact, rejecting a duplicate non-empty email or phone.
    pub async fn create_contact(&self, request: CreateContactRequest) -> Result<Contact, AppError> {
        let request = request.normalized();

        if let Some(existing) = self
            .repo
            .find_duplicate(request.email.as_deref(), request.phone.as_deref())
            .await?
        {
            let field = if existing.email.is_some() && existing.email == request.email {
                "email"
            } else {
                "phone"
            };
            tracing::warn!("Rejected contact with duplicate {}", field);
            return Err(AppError::Conflict(format!(
                "A contact with this {} already exists",
                field
            )));
        }

        // A concurrent insert can still win the race; the unique indexes turn
        // that into a Conflict as well.
        let contact = self.repo.insert(&request).await?;
        tracing::info!("Created contact {}", contact.id);
        Ok(contact)
    }

    /// Delete a contact. Not routed.
    #[allow(dead_code)]
    pub async fn delete_contact(&self, contact: Option<&Contact>) -> Result<(), AppError> {
        let contact =
            contact.ok_or_else(|| AppError::NotFound("Contact not found".to_string()))?;

        if !self.repo.delete(contact.id).await? {
            return Err(AppError::NotFound(format!(
                "Contact {} not found",
                contact.id
            )));
        }

        tracing::info!("Deleted contact {}", contact.id);
        Ok(())
    }

    /// Store a photo for a contact and record its URL.
    ///
    /// `base_url` is the scheme and authority the returned link is rooted at.
    /// Nothing is written to disk when the contact does not exist.
    pub async fn upload_photo(
        &self,
        id: Uuid,
        bytes: &[u8],
        original_filename: &str,
        base_url: &str,
    ) -> Result<String, AppError> {
        let contact = self.get_contact(id).await?;

        let file_name = format!("{}{}", contact.id, photos::file_extension(original_filename));
        self.photos.save(&file_name, bytes).await?;

        let photo_url = format!(
            "{}/contacts/image/{}",
            base_url.trim_end_matches('/'),
            file_name
        );

        // If the contact vanished after the write, the file stays behind.
        if !self.repo.update_photo_url(contact.id, &photo_url).await? {
            return Err(AppError::NotFound(format!("Contact {} not found", id)));
        }

        tracing::info!("Stored photo for contact {} as {}", id, file_name);
        Ok(photo_url)
    }

    /// Read a stored photo and its content type.
    pub async fn read_photo(&self, file_name: &str) -> Result<(Vec<u8>, &'static str), AppError> {
        let bytes = self.photos.read(file_name).await?;
        Ok((bytes, photos::content_type(file_name)))
    }
}
