//! Contact repository for vendors and customers.

use std::sync::Arc;

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
    QueryOrder, Set,
};
use uuid::Uuid;

use crate::entities::{contacts, sea_orm_active_enums::ContactType};

/// Error types for contact operations.
#[derive(Debug, thiserror::Error)]
pub enum ContactError {
    /// Contact not found.
    #[error("Contact not found: {0}")]
    NotFound(Uuid),

    /// A contact with this email already exists.
    #[error("A contact with email {0} already exists")]
    DuplicateEmail(String),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Input for creating a contact.
#[derive(Debug, Clone)]
pub struct CreateContactInput {
    /// Contact name.
    pub name: String,
    /// Contact email, unique across all contacts.
    pub email: String,
    /// Vendor, customer, or both.
    pub contact_type: ContactType,
    /// Phone number.
    pub phone: Option<String>,
    /// City.
    pub city: Option<String>,
    /// State or province.
    pub state: Option<String>,
    /// Country.
    pub country: Option<String>,
    /// Postal code.
    pub pincode: Option<String>,
}

/// Input for updating a contact.
#[derive(Debug, Clone, Default)]
pub struct UpdateContactInput {
    /// New name.
    pub name: Option<String>,
    /// New email.
    pub email: Option<String>,
    /// New contact type.
    pub contact_type: Option<ContactType>,
    /// New phone number.
    pub phone: Option<String>,
    /// New city.
    pub city: Option<String>,
    /// New state or province.
    pub state: Option<String>,
    /// New country.
    pub country: Option<String>,
    /// New postal code.
    pub pincode: Option<String>,
}

/// Contact repository.
#[derive(Debug, Clone)]
pub struct ContactRepository {
    db: Arc<DatabaseConnection>,
}

impl ContactRepository {
    /// Creates a new contact repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Lists active contacts ordered by name, optionally filtered by type.
    /// Contacts typed `All` match both vendor and customer filters.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_active(
        &self,
        contact_type: Option<ContactType>,
    ) -> Result<Vec<contacts::Model>, ContactError> {
        let mut query = contacts::Entity::find()
            .filter(contacts::Column::Active.eq(true))
            .order_by_asc(contacts::Column::Name);

        if let Some(wanted) = contact_type {
            query = query.filter(
                Condition::any()
                    .add(contacts::Column::ContactType.eq(wanted))
                    .add(contacts::Column::ContactType.eq(ContactType::All)),
            );
        }

        Ok(query.all(&*self.db).await?)
    }

    /// Finds a contact by id.
    ///
    /// # Errors
    ///
    /// Returns `ContactError::NotFound` if no such contact exists.
    pub async fn find_by_id(&self, id: Uuid) -> Result<contacts::Model, ContactError> {
        contacts::Entity::find_by_id(id)
            .one(&*self.db)
            .await?
            .ok_or(ContactError::NotFound(id))
    }

    /// Creates a new contact.
    ///
    /// # Errors
    ///
    /// Returns `ContactError::DuplicateEmail` when the email is taken.
    pub async fn create(&self, input: CreateContactInput) -> Result<contacts::Model, ContactError> {
        let existing = contacts::Entity::find()
            .filter(contacts::Column::Email.eq(&input.email))
            .one(&*self.db)
            .await?;

        if existing.is_some() {
            return Err(ContactError::DuplicateEmail(input.email));
        }

        let now = Utc::now().into();
        let contact = contacts::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(input.name),
            email: Set(input.email),
            contact_type: Set(input.contact_type),
            phone: Set(input.phone),
            city: Set(input.city),
            state: Set(input.state),
            country: Set(input.country),
            pincode: Set(input.pincode),
            active: Set(true),
            created_at: Set(now),
            updated_at: Set(now),
        };

        Ok(contact.insert(&*self.db).await?)
    }

    /// Updates a contact.
    ///
    /// # Errors
    ///
    /// Returns `ContactError::NotFound` if no such contact exists, or
    /// `ContactError::DuplicateEmail` when changing to a taken email.
    pub async fn update(
        &self,
        id: Uuid,
        input: UpdateContactInput,
    ) -> Result<contacts::Model, ContactError> {
        let contact = contacts::Entity::find_by_id(id)
            .one(&*self.db)
            .await?
            .ok_or(ContactError::NotFound(id))?;

        if let Some(ref email) = input.email {
            if *email != contact.email {
                let taken = contacts::Entity::find()
                    .filter(contacts::Column::Email.eq(email))
                    .one(&*self.db)
                    .await?;
                if taken.is_some() {
                    return Err(ContactError::DuplicateEmail(email.clone()));
                }
            }
        }

        let mut active: contacts::ActiveModel = contact.into();

        if let Some(name) = input.name {
            active.name = Set(name);
        }
        if let Some(email) = input.email {
            active.email = Set(email);
        }
        if let Some(contact_type) = input.contact_type {
            active.contact_type = Set(contact_type);
        }
        if let Some(phone) = input.phone {
            active.phone = Set(Some(phone));
        }
        if let Some(city) = input.city {
            active.city = Set(Some(city));
        }
        if let Some(state) = input.state {
            active.state = Set(Some(state));
        }
        if let Some(country) = input.country {
            active.country = Set(Some(country));
        }
        if let Some(pincode) = input.pincode {
            active.pincode = Set(Some(pincode));
        }
        active.updated_at = Set(Utc::now().into());

        Ok(active.update(&*self.db).await?)
    }

    /// Archives a contact by clearing its active flag.
    ///
    /// # Errors
    ///
    /// Returns `ContactError::NotFound` if no such contact exists.
    pub async fn archive(&self, id: Uuid) -> Result<(), ContactError> {
        let contact = contacts::Entity::find_by_id(id)
            .one(&*self.db)
            .await?
            .ok_or(ContactError::NotFound(id))?;

        let mut active: contacts::ActiveModel = contact.into();
        active.active = Set(false);
        active.updated_at = Set(Utc::now().into());
        active.update(&*self.db).await?;

        Ok(())
    }
}
