//! Record codec: entities <-> store attribute maps.
//!
//! Key and equip field names come from the [`KeySchema`]; the remaining
//! field names are fixed. Unknown attributes are ignored on decode so that
//! records can grow new fields without breaking readers.

use armory_domain::{
    Character, CharacterDataId, CharacterName, EntityKind, EquipSlot, KeySchema, PlayerId,
    Weapon, WeaponDataId, WeaponName,
};
use chrono::{DateTime, Utc};
use serde_json::Value;

use crate::infrastructure::ports::{Attributes, ItemKey, StoreError, StoredItem};

const CHARACTER_DATA_ID: &str = "character_data_id";
const CHARACTER_NAME: &str = "character_name";
const WEAPON_DATA_ID: &str = "weapon_data_id";
const WEAPON_NAME: &str = "weapon_name";
const CREATED_AT: &str = "created_at";

pub fn item_key(schema: &KeySchema, player_id: &PlayerId, kind: EntityKind, local_id: &str) -> ItemKey {
    ItemKey::new(player_id.as_str(), schema.sort_key(kind, local_id))
}

fn base_attributes(schema: &KeySchema, key: &ItemKey) -> Attributes {
    let mut attributes = Attributes::new();
    attributes.insert(
        schema.partition_key_field().to_string(),
        Value::String(key.partition.clone()),
    );
    attributes.insert(
        schema.sort_key_field().to_string(),
        Value::String(key.sort.clone()),
    );
    attributes
}

pub fn encode_character(schema: &KeySchema, character: &Character) -> StoredItem {
    let key = item_key(
        schema,
        character.player_id(),
        EntityKind::Character,
        character.id().as_str(),
    );
    let mut attributes = base_attributes(schema, &key);
    attributes.insert(
        CHARACTER_DATA_ID.to_string(),
        Value::String(character.character_data_id().to_string()),
    );
    attributes.insert(
        CHARACTER_NAME.to_string(),
        Value::String(character.name().to_string()),
    );
    attributes.insert(
        schema.equip_field(EntityKind::Character).to_string(),
        Value::String(character.equipped().as_stored().to_string()),
    );
    attributes.insert(
        CREATED_AT.to_string(),
        Value::String(character.created_at().to_rfc3339()),
    );
    StoredItem { key, attributes }
}

pub fn encode_weapon(schema: &KeySchema, weapon: &Weapon) -> StoredItem {
    let key = item_key(
        schema,
        weapon.player_id(),
        EntityKind::Weapon,
        weapon.id().as_str(),
    );
    let mut attributes = base_attributes(schema, &key);
    attributes.insert(
        WEAPON_DATA_ID.to_string(),
        Value::String(weapon.weapon_data_id().to_string()),
    );
    attributes.insert(
        WEAPON_NAME.to_string(),
        Value::String(weapon.name().to_string()),
    );
    attributes.insert(
        schema.equip_field(EntityKind::Weapon).to_string(),
        Value::String(weapon.equipped_on().as_stored().to_string()),
    );
    attributes.insert(
        CREATED_AT.to_string(),
        Value::String(weapon.created_at().to_rfc3339()),
    );
    StoredItem { key, attributes }
}

pub fn decode_character(schema: &KeySchema, item: &StoredItem) -> Result<Character, StoreError> {
    let reader = Reader::new(item);
    let local_id = reader.local_id(schema, EntityKind::Character)?;

    Ok(Character::from_parts(
        reader.player_id()?,
        reader.parse_value(local_id)?,
        reader.field::<CharacterDataId>(CHARACTER_DATA_ID)?,
        reader.field::<CharacterName>(CHARACTER_NAME)?,
        reader.slot(schema.equip_field(EntityKind::Character))?,
        reader.created_at()?,
    ))
}

pub fn decode_weapon(schema: &KeySchema, item: &StoredItem) -> Result<Weapon, StoreError> {
    let reader = Reader::new(item);
    let local_id = reader.local_id(schema, EntityKind::Weapon)?;

    Ok(Weapon::from_parts(
        reader.player_id()?,
        reader.parse_value(local_id)?,
        reader.field::<WeaponDataId>(WEAPON_DATA_ID)?,
        reader.field::<WeaponName>(WEAPON_NAME)?,
        reader.slot(schema.equip_field(EntityKind::Weapon))?,
        reader.created_at()?,
    ))
}

/// Field access with corrupt-record errors that name the offending key.
struct Reader<'a> {
    item: &'a StoredItem,
}

impl<'a> Reader<'a> {
    fn new(item: &'a StoredItem) -> Self {
        Self { item }
    }

    fn corrupt(&self, message: impl ToString) -> StoreError {
        StoreError::corrupt(self.item.key.clone(), message)
    }

    fn string(&self, field: &str) -> Result<&'a str, StoreError> {
        match self.item.attributes.get(field) {
            Some(Value::String(value)) => Ok(value.as_str()),
            Some(other) => Err(self.corrupt(format!("field {field} is not a string: {other}"))),
            None => Err(self.corrupt(format!("missing field {field}"))),
        }
    }

    fn parse_value<T>(&self, raw: &str) -> Result<T, StoreError>
    where
        T: TryFrom<String>,
        T::Error: std::fmt::Display,
    {
        T::try_from(raw.to_string()).map_err(|e| self.corrupt(e))
    }

    fn field<T>(&self, field: &str) -> Result<T, StoreError>
    where
        T: TryFrom<String>,
        T::Error: std::fmt::Display,
    {
        self.parse_value(self.string(field)?)
    }

    fn player_id(&self) -> Result<PlayerId, StoreError> {
        self.parse_value(&self.item.key.partition)
    }

    fn local_id(&self, schema: &KeySchema, expected: EntityKind) -> Result<&'a str, StoreError> {
        match schema.split_sort_key(&self.item.key.sort) {
            Some((kind, local_id)) if kind == expected => Ok(local_id),
            _ => Err(self.corrupt(format!("sort key is not a {expected} key"))),
        }
    }

    fn slot<T>(&self, field: &str) -> Result<EquipSlot<T>, StoreError>
    where
        T: std::str::FromStr<Err = armory_domain::DomainError>,
    {
        EquipSlot::parse_stored(self.string(field)?).map_err(|e| self.corrupt(e))
    }

    /// Records written before `created_at` existed decode with the epoch.
    fn created_at(&self) -> Result<DateTime<Utc>, StoreError> {
        match self.item.attributes.get(CREATED_AT) {
            None => Ok(DateTime::<Utc>::default()),
            Some(_) => {
                let raw = self.string(CREATED_AT)?;
                DateTime::parse_from_rfc3339(raw)
                    .map(|dt| dt.with_timezone(&Utc))
                    .map_err(|e| self.corrupt(format!("invalid {CREATED_AT}: {e}")))
            }
        }
    }
}
