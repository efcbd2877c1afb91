//! Vault registry: domain operations over the config store.
//!
//! # Responsibility
//! - Provide the add/delete/list/property/active operations the screens
//!   are built from.
//! - Enforce record consistency on every write path.
//!
//! # Invariants
//! - At most one record is active at any time; `set_active_vault` updates
//!   all records in a single read-modify-write.
//! - The first record ever added becomes active.
//! - Mapping keys always equal record names.
//! - Reads of absent vaults/properties degrade to `None`; only malformed
//!   input is an error.

use crate::model::vault::{PathProperty, VaultRecord};
use crate::store::{ConfigStore, StoreError, StoreResult, VaultMap};
use log::info;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type RegistryResult<T> = Result<T, RegistryError>;

/// Registry-layer error for vault mutations and queries.
#[derive(Debug)]
pub enum RegistryError {
    /// Vault name missing or blank on an operation that requires one.
    EmptyVaultName,
    /// Property value missing or blank on a setter.
    EmptyPropertyValue {
        vault: String,
        property: PathProperty,
    },
    /// Property setter targeted a vault that was never added.
    UnknownVault(String),
    /// Underlying store failure.
    Store(StoreError),
}

impl Display for RegistryError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyVaultName => write!(f, "vault name is not specified"),
            Self::EmptyPropertyValue { vault, property } => {
                write!(f, "empty value for `{property}` of vault `{vault}`")
            }
            Self::UnknownVault(name) => write!(f, "unknown vault `{name}`"),
            Self::Store(err) => write!(f, "{err}"),
        }
    }
}

impl Error for RegistryError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Store(err) => Some(err),
            _ => None,
        }
    }
}

impl From<StoreError> for RegistryError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

/// Domain operations over one config store handle.
///
/// The store handle is passed in explicitly; the registry holds no other
/// state, so every operation observes the latest persisted mapping.
pub struct VaultRegistry {
    store: ConfigStore,
}

impl VaultRegistry {
    pub fn new(store: ConfigStore) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &ConfigStore {
        &self.store
    }

    /// Full vault mapping in name order. No side effects.
    pub fn list_vaults(&self) -> StoreResult<VaultMap> {
        self.store.load()
    }

    pub fn has_vaults(&self) -> StoreResult<bool> {
        Ok(!self.store.load()?.is_empty())
    }

    /// Adds a vault with a fresh record, overwriting any record with the
    /// same name. The first record ever added becomes active.
    pub fn add_vault(&self, name: &str) -> RegistryResult<()> {
        let name = name.trim();
        if name.is_empty() {
            return Err(RegistryError::EmptyVaultName);
        }

        let mut vaults = self.store.load()?;
        let mut record = VaultRecord::new(name);
        record.is_active = vaults.is_empty();
        vaults.insert(name.to_string(), record);
        self.store.save(&vaults)?;

        info!("event=vault_add module=registry status=ok vault={name}");
        Ok(())
    }

    /// Removes a vault. Absent names are a no-op.
    ///
    /// Deleting the active vault does NOT promote another record; the
    /// registry is left with no active vault until the user picks one.
    pub fn delete_vault(&self, name: &str) -> RegistryResult<()> {
        let name = name.trim();
        if name.is_empty() {
            return Err(RegistryError::EmptyVaultName);
        }

        let mut vaults = self.store.load()?;
        if vaults.remove(name).is_some() {
            self.store.save(&vaults)?;
            info!("event=vault_delete module=registry status=ok vault={name}");
        }
        Ok(())
    }

    /// Marks `name` active and every other record inactive, in one write.
    ///
    /// A name with no matching record deactivates everything; the screens
    /// only offer this action for existing vaults.
    pub fn set_active_vault(&self, name: &str) -> RegistryResult<()> {
        let mut vaults = self.store.load()?;
        for (vault_name, record) in vaults.iter_mut() {
            record.is_active = vault_name == name;
        }
        self.store.save(&vaults)?;

        info!("event=vault_set_active module=registry status=ok vault={name}");
        Ok(())
    }

    /// First active record by name order, `None` when nothing is active.
    pub fn get_active_vault(&self) -> StoreResult<Option<String>> {
        let vaults = self.store.load()?;
        Ok(vaults
            .values()
            .find(|record| record.is_active)
            .map(|record| record.name.clone()))
    }

    pub fn is_vault_active(&self, name: &str) -> StoreResult<bool> {
        let vaults = self.store.load()?;
        Ok(vaults.get(name).is_some_and(|record| record.is_active))
    }

    /// Reads one path property; absent vault or unset property is `None`.
    pub fn get_vault_property(
        &self,
        name: &str,
        property: PathProperty,
    ) -> StoreResult<Option<String>> {
        let vaults = self.store.load()?;
        Ok(vaults
            .get(name)
            .and_then(|record| record.property(property))
            .map(str::to_string))
    }

    /// Writes one path property of an existing vault.
    pub fn set_vault_property(
        &self,
        name: &str,
        property: PathProperty,
        value: &str,
    ) -> RegistryResult<()> {
        let name = name.trim();
        if name.is_empty() {
            return Err(RegistryError::EmptyVaultName);
        }
        if value.trim().is_empty() {
            return Err(RegistryError::EmptyPropertyValue {
                vault: name.to_string(),
                property,
            });
        }

        let mut vaults = self.store.load()?;
        let record = vaults
            .get_mut(name)
            .ok_or_else(|| RegistryError::UnknownVault(name.to_string()))?;
        record.set_property(property, value);
        self.store.save(&vaults)?;

        info!(
            "event=vault_set_property module=registry status=ok vault={name} property={property}"
        );
        Ok(())
    }

    pub fn is_vault_property_set(&self, name: &str, property: PathProperty) -> StoreResult<bool> {
        let vaults = self.store.load()?;
        Ok(vaults
            .get(name)
            .is_some_and(|record| record.is_property_set(property)))
    }

    /// Drops the whole vault mapping. Reset/debugging aid.
    pub fn clear(&self) -> RegistryResult<()> {
        self.store.save(&VaultMap::new())?;
        info!("event=vault_clear module=registry status=ok");
        Ok(())
    }
}
