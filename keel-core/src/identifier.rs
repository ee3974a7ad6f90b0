use crate::{Entity, IdentifierStrategy, KeelError, Result, TableInfo, TypeConverters, Value};
use log::debug;
use time::OffsetDateTime;
use uuid::Uuid;

fn not_set(table: &TableInfo, property: &str) -> crate::Error {
    KeelError::IdentifierNotSet {
        type_name: table.type_name().to_string(),
        property: property.to_string(),
    }
    .into()
}

fn already_set(table: &TableInfo, property: &str) -> crate::Error {
    KeelError::IdentifierAlreadySet {
        type_name: table.type_name().to_string(),
        property: property.to_string(),
    }
    .into()
}

/// Checks the identifier before an insert, generating it on the client when the strategy asks so.
pub fn prepare_insert_identifier(table: &TableInfo, entity: &mut dyn Entity) -> Result<()> {
    let column = table.require_identifier()?;
    let current = entity.get_value(column.property_name)?;
    match table.identifier_strategy() {
        IdentifierStrategy::Assigned => {
            if current.is_default() {
                return Err(not_set(table, column.property_name));
            }
        }
        IdentifierStrategy::DbGenerated | IdentifierStrategy::Sequence => {
            if !current.is_default() {
                return Err(already_set(table, column.property_name));
            }
        }
        strategy @ (IdentifierStrategy::Guid | IdentifierStrategy::GuidComb) => {
            if !current.is_default() {
                return Err(already_set(table, column.property_name));
            }
            let uuid = if strategy == IdentifierStrategy::GuidComb {
                new_comb_uuid()
            } else {
                Uuid::new_v4()
            };
            debug!(
                "Generated identifier {} for `{}`",
                uuid,
                table.type_name()
            );
            entity.set_value(column.property_name, Value::Uuid(Some(uuid)))?;
        }
    }
    Ok(())
}

/// Assigns the identifier returned by the database after an insert.
///
/// Only the strategies where the database generates the value assign it, the scalar is converted
/// to the type of the identifier property.
pub fn assign_inserted_identifier(
    table: &TableInfo,
    entity: &mut dyn Entity,
    identifier: Value,
    converters: &TypeConverters,
) -> Result<()> {
    if !table.identifier_strategy().is_generated_by_database() {
        return Ok(());
    }
    let column = table.require_identifier()?;
    if identifier.is_null() {
        return Err(KeelError::mapping(
            table.type_name(),
            "the database did not return the generated identifier",
        )
        .into());
    }
    let value = converters.from_wire(identifier, &column.value)?;
    debug!(
        "Assigning identifier {:?} to `{}.{}`",
        value,
        table.type_name(),
        column.property_name
    );
    entity.set_value(column.property_name, value)
}

/// Updates and deletes address the row by identifier, whatever the strategy.
pub fn require_identifier_set(table: &TableInfo, entity: &dyn Entity) -> Result<Value> {
    let column = table.require_identifier()?;
    let current = entity.get_value(column.property_name)?;
    if current.is_default() {
        return Err(not_set(table, column.property_name));
    }
    Ok(current)
}

/// Version 4 uuid whose last six bytes are the current UTC time in milliseconds, big endian.
///
/// Consecutive values sort by creation time on products comparing uuids from the last bytes.
pub fn new_comb_uuid() -> Uuid {
    let mut bytes = *Uuid::new_v4().as_bytes();
    let millis = (OffsetDateTime::now_utc().unix_timestamp_nanos() / 1_000_000) as u64;
    bytes[10..].copy_from_slice(&millis.to_be_bytes()[2..]);
    Uuid::from_bytes(bytes)
}
