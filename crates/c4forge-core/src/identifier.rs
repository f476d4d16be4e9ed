//! Identifier management using string interning for efficient storage and comparison
//!
//! This module provides the [`Id`] type with an efficient string-interner based
//! approach, plus the [`clean`] derivation rule that turns display names into
//! Mermaid-safe identifiers.

use std::{
    fmt,
    sync::{Mutex, OnceLock},
};

use string_interner::{DefaultStringInterner, DefaultSymbol};

/// Global string interner for efficient identifier storage.
///
/// # Thread Safety
///
/// This uses `Mutex` for thread-safe access to the string interner.
static INTERNER: OnceLock<Mutex<DefaultStringInterner>> = OnceLock::new();

/// Derive a Mermaid-safe identifier fragment from a display name.
///
/// Every character outside `[A-Za-z0-9]` is removed. Empty and
/// all-punctuation names therefore yield an empty string; the model's id
/// allocator is responsible for keeping the final identifiers unique.
///
/// # Examples
///
/// ```
/// use c4forge_core::identifier::clean;
///
/// assert_eq!(clean("Online Shop"), "OnlineShop");
/// assert_eq!(clean("API (v2)"), "APIv2");
/// assert_eq!(clean("!!!"), "");
/// ```
pub fn clean(text: &str) -> String {
    text.chars().filter(|c| c.is_ascii_alphanumeric()).collect()
}

/// Efficient identifier type using string interning
///
/// This type provides efficient storage and comparison of string identifiers
/// through string interning. Identifiers for nested entities are derived from
/// their parent with an underscore separator, matching the generated Mermaid
/// element ids.
///
/// # Examples
///
/// ```
/// use c4forge_core::identifier::Id;
///
/// // Create identifiers from cleaned names
/// let shop_id = Id::new("Shop");
///
/// // Create child identifiers
/// let container_id = shop_id.create_child("WebApp");
/// assert_eq!(container_id, "Shop_WebApp");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Id(DefaultSymbol);

impl Id {
    /// Creates an `Id` from &str.
    ///
    /// # Arguments
    ///
    /// * `name` - The string representation of the identifier
    ///
    /// # Examples
    ///
    /// ```
    /// use c4forge_core::identifier::Id;
    ///
    /// let system_id = Id::new("Shop");
    /// let person_id = Id::new("Customer");
    /// ```
    pub fn new(name: &str) -> Self {
        let mut interner = INTERNER
            .get_or_init(|| Mutex::new(DefaultStringInterner::new()))
            .lock()
            .expect("Failed to acquire interner lock");
        let symbol = interner.get_or_intern(name);
        Self(symbol)
    }

    /// Creates a child ID by appending a local name with an `_` separator.
    ///
    /// # Arguments
    ///
    /// * `local` - The already-cleaned local name to append.
    ///
    /// # Examples
    ///
    /// ```
    /// use c4forge_core::identifier::Id;
    ///
    /// let system = Id::new("Shop");
    /// let container = system.create_child("Api");
    /// assert_eq!(container, "Shop_Api");
    /// ```
    pub fn create_child(&self, local: &str) -> Self {
        let mut interner = INTERNER
            .get_or_init(|| Mutex::new(DefaultStringInterner::new()))
            .lock()
            .expect("Failed to acquire interner lock");
        let parent_str = interner
            .resolve(self.0)
            .expect("Parent ID should exist in interner");
        let child_name = format!("{parent_str}_{local}");
        let symbol = interner.get_or_intern(&child_name);
        Self(symbol)
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let interner = INTERNER
            .get_or_init(|| Mutex::new(DefaultStringInterner::new()))
            .lock()
            .expect("Failed to acquire interner lock");
        let str_value = interner
            .resolve(self.0)
            .expect("Symbol should exist in interner");
        write!(f, "{}", str_value)
    }
}

impl From<&str> for Id {
    /// Creates an `Id` from a string slice
    ///
    /// This is a convenience implementation that calls `Id::new`.
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl PartialEq<str> for Id {
    /// Allows direct comparison with string slices: `id == "string"`
    fn eq(&self, other: &str) -> bool {
        let interner = INTERNER
            .get_or_init(|| Mutex::new(DefaultStringInterner::new()))
            .lock()
            .expect("Failed to acquire interner lock");
        let self_str = interner
            .resolve(self.0)
            .expect("Symbol should exist in interner");
        self_str == other
    }
}

impl PartialEq<&str> for Id {
    /// Allows direct comparison with string references: `id == &string`
    fn eq(&self, other: &&str) -> bool {
        self == *other
    }
}
