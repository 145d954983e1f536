//! Per-field-type conversion between wire content and editable values.
//!
//! [`FieldCodec`] is a closed dispatch over the field types. Decoding and
//! encoding are total: malformed content degrades to an empty or unchanged
//! value and never produces an error.

use shared::{
    domain::{DateFormat, FieldType},
    protocol::{ChecklistItem, ListOption, WireValue},
};

use crate::{date, numeric};

const YES_WIRE: &str = "SIM";
const NO_WIRE: &str = "NAO";
pub const YES: &str = "S";
pub const NO: &str = "N";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldCodec<'a> {
    Numeric,
    Text,
    Date(Option<DateFormat>),
    List(&'a [ListOption]),
    Table,
    Boolean,
    Photo,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Decoded {
    pub value: String,
    pub option_name: Option<String>,
}

impl Decoded {
    fn plain(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            option_name: None,
        }
    }
}

impl<'a> FieldCodec<'a> {
    pub fn for_item(item: &'a ChecklistItem) -> Self {
        match item.field_type {
            FieldType::Numeric => Self::Numeric,
            FieldType::Text => Self::Text,
            FieldType::Date => Self::Date(item.date_format),
            FieldType::List => Self::List(&item.options),
            FieldType::Table => Self::Table,
            FieldType::Boolean => Self::Boolean,
            FieldType::Photo => Self::Photo,
        }
    }

    pub fn field_type(&self) -> FieldType {
        match self {
            Self::Numeric => FieldType::Numeric,
            Self::Text => FieldType::Text,
            Self::Date(_) => FieldType::Date,
            Self::List(_) => FieldType::List,
            Self::Table => FieldType::Table,
            Self::Boolean => FieldType::Boolean,
            Self::Photo => FieldType::Photo,
        }
    }

    pub fn decode(&self, wire: Option<&str>) -> Decoded {
        let wire = wire.unwrap_or_default();
        match self {
            Self::Numeric if wire.is_empty() => Decoded::default(),
            Self::Numeric => Decoded::plain(numeric::decode_numeric(wire)),
            Self::Boolean => Decoded::plain(match wire {
                YES_WIRE => YES,
                NO_WIRE => NO,
                _ => "",
            }),
            Self::Date(_) if wire.is_empty() => Decoded::default(),
            Self::Date(format) => Decoded::plain(date::decode_date(*format, wire)),
            Self::List(options) => decode_list(options, wire),
            Self::Text | Self::Table | Self::Photo => Decoded::plain(wire),
        }
    }

    /// Editable value to the submitted wire value; `None` means the value is
    /// left out of the execution record.
    pub fn encode(&self, editable: &str) -> Option<WireValue> {
        match self {
            Self::Boolean => match editable {
                YES => Some(WireValue::Flag(true)),
                NO => Some(WireValue::Flag(false)),
                _ => None,
            },
            Self::Numeric => Some(WireValue::Text(numeric::encode_numeric(editable))),
            Self::Date(_) | Self::List(_) | Self::Text | Self::Table | Self::Photo => {
                (!editable.is_empty()).then(|| WireValue::Text(editable.to_string()))
            }
        }
    }
}

/// A flagged option wins; otherwise free-text content naming an option
/// selects it; otherwise the raw content stays as the value.
fn decode_list(options: &[ListOption], wire: &str) -> Decoded {
    let effective = options.iter().find(|option| option.selected).or_else(|| {
        (!wire.is_empty())
            .then(|| options.iter().find(|option| option.name == wire))
            .flatten()
    });
    match effective {
        Some(option) => Decoded {
            value: option.id.to_string(),
            option_name: Some(option.name.clone()),
        },
        None => Decoded::plain(wire),
    }
}

pub fn photo_display<'n>(names: impl IntoIterator<Item = &'n str>) -> String {
    names.into_iter().collect::<Vec<_>>().join(", ")
}

#[cfg(test)]
#[path = "tests/codec_tests.rs"]
mod tests;
