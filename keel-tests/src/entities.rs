use keel::{DbEnum, Entity};
use rust_decimal::Decimal;
use time::{Date, PrimitiveDateTime};
use uuid::Uuid;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, DbEnum)]
#[repr(i16)]
pub enum CustomerStatus {
    #[default]
    Inactive = 0,
    Active = 1,
    Suspended = 2,
}

/// Identifier generated by the database.
#[derive(Debug, Default, Clone, PartialEq, Entity)]
#[keel(table = "Customers")]
pub struct Customer {
    #[keel(column = "Id", identifier = "DbGenerated")]
    pub id: i32,
    #[keel(column = "Name")]
    pub name: String,
    #[keel(column = "DateOfBirth")]
    pub date_of_birth: Option<Date>,
    #[keel(column = "StatusId")]
    pub status: CustomerStatus,
    #[keel(column = "CreditLimit")]
    pub credit_limit: Option<Decimal>,
    #[keel(column = "Created", update = false)]
    pub created: Option<PrimitiveDateTime>,
    #[keel(column = "Updated", insert = false)]
    pub updated: Option<PrimitiveDateTime>,
    #[keel(ignore)]
    pub notes: Vec<String>,
}

/// Identifier read from a sequence, rows guarded by a version column.
#[derive(Debug, Default, Clone, PartialEq, Entity)]
#[keel(table = "Invoices", schema = "Sales")]
pub struct Invoice {
    #[keel(column = "InvoiceId", identifier = "Sequence", sequence = "InvoiceIdSequence")]
    pub id: i64,
    #[keel(column = "CustomerId")]
    pub customer_id: i32,
    #[keel(column = "Total")]
    pub total: Decimal,
    #[keel(column = "Version", version)]
    pub version: i32,
}

/// Identifier generated on the client.
#[derive(Debug, Default, Clone, PartialEq, Entity)]
#[keel(table = "Documents")]
pub struct Document {
    #[keel(column = "DocumentId", identifier = "GuidComb")]
    pub id: Uuid,
    #[keel(column = "Title")]
    pub title: String,
}

/// Identifier assigned by the application.
#[derive(Debug, Default, Clone, PartialEq, Entity)]
#[keel(table = "Countries")]
pub struct Country {
    #[keel(column = "Code", identifier = "Assigned")]
    pub code: String,
    #[keel(column = "Name")]
    pub name: String,
}

/// No identifier, rows can only be read.
#[derive(Debug, Default, Clone, PartialEq, Entity)]
#[keel(table = "CustomerTotals")]
pub struct CustomerTotal {
    #[keel(column = "CustomerId")]
    pub customer_id: i32,
    #[keel(column = "Total")]
    pub total: Option<Decimal>,
}
