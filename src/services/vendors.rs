// Vendor directory service. Vendors are shared across properties, so no
// property filter applies here.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::schema::VENDORS;
use crate::store::TableStore;
use crate::types::{Category, Vendor};

/// Form payload for a new directory entry.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewVendor {
    pub company_name: String,
    pub service: Category,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub email: String,
}

/// Result of loading the vendor directory.
#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum VendorResult {
    Success { data: Vec<Vendor> },
    Empty { message: String },
    Error { message: String },
}

/// Append one vendor to the directory.
pub fn add_vendor(store: &TableStore, new: NewVendor) -> Result<Vendor, String> {
    if new.company_name.trim().is_empty() {
        return Err("Company name is required".to_string());
    }

    let vendor = Vendor {
        id: Uuid::new_v4().to_string(),
        company_name: new.company_name.trim().to_string(),
        service: new.service,
        name: new.name.trim().to_string(),
        phone: new.phone.trim().to_string(),
        email: new.email.trim().to_string(),
    };

    store
        .append(VENDORS.name, vendor.to_row())
        .map_err(|e| e.to_string())?;
    log::info!("Added vendor {:?} ({})", vendor.company_name, vendor.id);
    Ok(vendor)
}

/// The full directory, sorted by company name.
pub fn list_vendors(store: &TableStore) -> VendorResult {
    let table = match store.fetch(VENDORS.name) {
        Ok(table) => table,
        Err(e) => {
            return VendorResult::Error {
                message: e.to_string(),
            }
        }
    };

    if table.is_empty() {
        return VendorResult::Empty {
            message: "No vendors in the directory yet.".to_string(),
        };
    }

    let mut vendors: Vec<Vendor> = table.rows.iter().map(Vendor::from_row).collect();
    vendors.sort_by(|a, b| a.company_name.to_lowercase().cmp(&b.company_name.to_lowercase()));
    VendorResult::Success { data: vendors }
}
