//! In-memory data shared by every session.

pub mod seed;

use chrono::{DateTime, Utc};
use std::collections::HashMap;
use tokio::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use uuid::Uuid;

use crate::models::{Bill, Complaint, Property, SupportMessage, User, UserRole};

#[derive(Debug, Clone)]
pub struct StoredFile {
    pub content_type: String,
    pub file_name: String,
    pub data: Vec<u8>,
    pub uploaded_by: Uuid,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Default)]
pub struct StoreData {
    pub users: Vec<User>,
    pub properties: Vec<Property>,
    pub bills: Vec<Bill>,
    /// Newest first.
    pub complaints: Vec<Complaint>,
    pub support_threads: HashMap<Uuid, Vec<SupportMessage>>,
    pub files: HashMap<String, StoredFile>,
}

#[derive(Debug, Default)]
pub struct Store {
    data: RwLock<StoreData>,
}

impl Store {
    pub fn new(data: StoreData) -> Self {
        Self {
            data: RwLock::new(data),
        }
    }

    pub async fn read(&self) -> RwLockReadGuard<'_, StoreData> {
        self.data.read().await
    }

    pub async fn write(&self) -> RwLockWriteGuard<'_, StoreData> {
        self.data.write().await
    }
}

impl StoreData {
    pub fn user(&self, id: Uuid) -> Option<&User> {
        self.users.iter().find(|user| user.id == id)
    }

    pub fn user_mut(&mut self, id: Uuid) -> Option<&mut User> {
        self.users.iter_mut().find(|user| user.id == id)
    }

    pub fn user_by_email(&self, email: &str) -> Option<&User> {
        self.users
            .iter()
            .find(|user| user.email.eq_ignore_ascii_case(email))
    }

    pub fn user_name(&self, id: Uuid) -> Option<String> {
        self.user(id).map(|user| user.name.clone())
    }

    pub fn property(&self, id: Uuid) -> Option<&Property> {
        self.properties.iter().find(|property| property.id == id)
    }

    pub fn property_name(&self, id: Uuid) -> Option<String> {
        self.property(id).map(|property| property.name.clone())
    }

    pub fn property_of_tenant(&self, tenant_id: Uuid) -> Option<&Property> {
        self.properties
            .iter()
            .find(|property| property.tenant_id == Some(tenant_id))
    }

    pub fn properties_of_landlord(&self, landlord_id: Uuid) -> Vec<&Property> {
        self.properties
            .iter()
            .filter(|property| property.landlord_id == landlord_id)
            .collect()
    }

    fn landlord_property_ids(&self, landlord_id: Uuid) -> Vec<Uuid> {
        self.properties_of_landlord(landlord_id)
            .into_iter()
            .map(|property| property.id)
            .collect()
    }

    pub fn tenants_of_landlord(&self, landlord_id: Uuid) -> Vec<&User> {
        self.properties_of_landlord(landlord_id)
            .into_iter()
            .filter_map(|property| property.tenant_id)
            .filter_map(|tenant_id| self.user(tenant_id))
            .filter(|user| user.role == UserRole::Tenant)
            .collect()
    }

    pub fn bills_of_tenant(&self, tenant_id: Uuid) -> Vec<&Bill> {
        self.bills
            .iter()
            .filter(|bill| bill.tenant_id == tenant_id)
            .collect()
    }

    pub fn bills_of_landlord(&self, landlord_id: Uuid) -> Vec<&Bill> {
        let property_ids = self.landlord_property_ids(landlord_id);
        self.bills
            .iter()
            .filter(|bill| property_ids.contains(&bill.property_id))
            .collect()
    }

    pub fn tenant_bill(&self, tenant_id: Uuid, bill_id: Uuid) -> Option<&Bill> {
        self.bills
            .iter()
            .find(|bill| bill.id == bill_id && bill.tenant_id == tenant_id)
    }

    pub fn tenant_bill_mut(&mut self, tenant_id: Uuid, bill_id: Uuid) -> Option<&mut Bill> {
        self.bills
            .iter_mut()
            .find(|bill| bill.id == bill_id && bill.tenant_id == tenant_id)
    }

    pub fn landlord_bills_mut(&mut self, landlord_id: Uuid) -> Vec<&mut Bill> {
        let property_ids = self.landlord_property_ids(landlord_id);
        self.bills
            .iter_mut()
            .filter(|bill| property_ids.contains(&bill.property_id))
            .collect()
    }

    pub fn complaints_of_tenant(&self, tenant_id: Uuid) -> Vec<&Complaint> {
        self.complaints
            .iter()
            .filter(|complaint| complaint.tenant_id == tenant_id)
            .collect()
    }

    pub fn complaints_of_landlord(&self, landlord_id: Uuid) -> Vec<&Complaint> {
        let property_ids = self.landlord_property_ids(landlord_id);
        self.complaints
            .iter()
            .filter(|complaint| property_ids.contains(&complaint.property_id))
            .collect()
    }

    pub fn tenant_complaint(&self, tenant_id: Uuid, complaint_id: Uuid) -> Option<&Complaint> {
        self.complaints
            .iter()
            .find(|complaint| complaint.id == complaint_id && complaint.tenant_id == tenant_id)
    }

    pub fn landlord_complaint(&self, landlord_id: Uuid, complaint_id: Uuid) -> Option<&Complaint> {
        let property_ids = self.landlord_property_ids(landlord_id);
        self.complaints.iter().find(|complaint| {
            complaint.id == complaint_id && property_ids.contains(&complaint.property_id)
        })
    }

    pub fn landlord_complaint_mut(
        &mut self,
        landlord_id: Uuid,
        complaint_id: Uuid,
    ) -> Option<&mut Complaint> {
        let property_ids = self.landlord_property_ids(landlord_id);
        self.complaints.iter_mut().find(|complaint| {
            complaint.id == complaint_id && property_ids.contains(&complaint.property_id)
        })
    }
}
