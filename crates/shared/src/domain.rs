use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::error::UnknownTag;

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(
            Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl $name {
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }
    };
}

id_newtype!(ChecklistId);
id_newtype!(ItemId);
id_newtype!(OptionId);

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ChecklistStatus {
    Pending,
    InProgress,
    Other(String),
}

impl ChecklistStatus {
    pub fn as_wire(&self) -> &str {
        match self {
            Self::Pending => "Ag execucao",
            Self::InProgress => "Em execucao",
            Self::Other(text) => text,
        }
    }
}

impl From<String> for ChecklistStatus {
    fn from(value: String) -> Self {
        match value.as_str() {
            "Ag execucao" => Self::Pending,
            "Em execucao" => Self::InProgress,
            _ => Self::Other(value),
        }
    }
}

impl From<ChecklistStatus> for String {
    fn from(value: ChecklistStatus) -> Self {
        value.as_wire().to_string()
    }
}

impl Default for ChecklistStatus {
    fn default() -> Self {
        Self::Other(String::new())
    }
}

impl fmt::Display for ChecklistStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_wire())
    }
}

/// Discriminator selecting which value rules apply to a checklist item.
///
/// The service encodes it as a numeric string (`"1"` through `"7"`). Tags the
/// client does not know deserialize as [`FieldType::Text`], which keeps the
/// plain pass-through behavior for them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FieldType {
    Numeric,
    Text,
    Date,
    List,
    Table,
    Boolean,
    Photo,
}

impl FieldType {
    pub const ALL: [FieldType; 7] = [
        Self::Numeric,
        Self::Text,
        Self::Date,
        Self::List,
        Self::Table,
        Self::Boolean,
        Self::Photo,
    ];

    pub fn tag(self) -> &'static str {
        match self {
            Self::Numeric => "1",
            Self::Text => "2",
            Self::Date => "3",
            Self::List => "4",
            Self::Table => "5",
            Self::Boolean => "6",
            Self::Photo => "7",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Numeric => "Campo Numérico",
            Self::Text => "Campo Texto",
            Self::Date => "Campo Data",
            Self::List => "Campo Lista",
            Self::Table => "Campo Tabela",
            Self::Boolean => "Campo Lógico",
            Self::Photo => "Campo de Foto",
        }
    }
}

impl Default for FieldType {
    fn default() -> Self {
        Self::Text
    }
}

impl FromStr for FieldType {
    type Err = UnknownTag;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|field_type| field_type.tag() == s.trim())
            .ok_or_else(|| UnknownTag::new("field type", s))
    }
}

impl From<String> for FieldType {
    fn from(value: String) -> Self {
        value.parse().unwrap_or(Self::Text)
    }
}

impl From<FieldType> for String {
    fn from(value: FieldType) -> Self {
        value.tag().to_string()
    }
}

/// Layout of a date field, as named by the service's `FORMATODATA` descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DateFormat {
    /// `dd/MM/yyyy HH:mm:ss`
    DateTimeSeconds,
    /// `MM/yyyy HH:mm`
    MonthYearTime,
    /// `dd/MM/yyyy`
    DateOnly,
    /// `HH:mm`
    TimeOnly,
}

impl DateFormat {
    pub const ALL: [DateFormat; 4] = [
        Self::DateTimeSeconds,
        Self::MonthYearTime,
        Self::DateOnly,
        Self::TimeOnly,
    ];

    pub fn descriptor(self) -> &'static str {
        match self {
            Self::DateTimeSeconds => "Dia, mes e ano Hora, minuto e segundo",
            Self::MonthYearTime => "Mes e ano Hora e minuto",
            Self::DateOnly => "Dia, mes e ano",
            Self::TimeOnly => "Hora e minuto",
        }
    }

    pub fn from_descriptor(descriptor: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|format| format.descriptor() == descriptor.trim())
    }
}
