// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Orthowire-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Orthowire and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::borrow::Borrow;
use std::fmt;
use std::marker::PhantomData;
use std::str::FromStr;

use smol_str::{format_smolstr, SmolStr};

/// A stable identifier for circuit objects.
///
/// Ids are short strings (`c:3`, `c:3:pos`, `w:12`) that get cloned on every
/// back-reference, so they are stored inline as a `SmolStr`. The only rule
/// enforced is that an id is a non-empty path segment (no `/`), which keeps
/// them usable as file and JSON keys.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Id<T> {
    value: SmolStr,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Id<T> {
    pub fn new(value: impl AsRef<str>) -> Result<Self, IdError> {
        let value = value.as_ref();
        validate_id_segment(value)?;
        Ok(Self { value: SmolStr::new(value), _marker: PhantomData })
    }

    /// Wraps a value built from already valid parts.
    fn from_valid(value: SmolStr) -> Self {
        debug_assert!(validate_id_segment(&value).is_ok(), "invalid id {value:?}");
        Self { value, _marker: PhantomData }
    }

    pub fn as_str(&self) -> &str {
        &self.value
    }

    pub fn into_string(self) -> String {
        self.value.to_string()
    }
}

impl<T> fmt::Display for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

impl<T> AsRef<str> for Id<T> {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl<T> Borrow<str> for Id<T> {
    fn borrow(&self) -> &str {
        self.as_str()
    }
}

impl<T> FromStr for Id<T> {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl<T> TryFrom<String> for Id<T> {
    type Error = IdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdError {
    Empty,
    ContainsSlash,
}

impl fmt::Display for IdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => f.write_str("id must not be empty"),
            Self::ContainsSlash => f.write_str("id must not contain '/'"),
        }
    }
}

impl std::error::Error for IdError {}

fn validate_id_segment(value: &str) -> Result<(), IdError> {
    if value.is_empty() {
        return Err(IdError::Empty);
    }
    if value.contains('/') {
        return Err(IdError::ContainsSlash);
    }
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ComponentIdTag {}
pub type ComponentId = Id<ComponentIdTag>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TerminalIdTag {}
pub type TerminalId = Id<TerminalIdTag>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum WireIdTag {}
pub type WireId = Id<WireIdTag>;

impl ComponentId {
    /// The `n`-th allocated component id, `c:<n>`.
    pub fn nth(n: u64) -> Self {
        Self::from_valid(format_smolstr!("c:{n}"))
    }

    /// Id of the terminal `<component>:<suffix>`; `suffix` is a fixed catalog name.
    pub(crate) fn terminal_id(&self, suffix: &'static str) -> TerminalId {
        TerminalId::from_valid(format_smolstr!("{}:{suffix}", self.value))
    }
}

impl WireId {
    /// The `n`-th allocated wire id, `w:<n>`.
    pub fn nth(n: u64) -> Self {
        Self::from_valid(format_smolstr!("w:{n}"))
    }
}
