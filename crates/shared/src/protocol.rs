//! Wire shapes exchanged with the inspection-management service.
//!
//! Field names follow the service's JSON keys through `serde(rename)`. The
//! service is loose about scalar types (numbers and nulls show up where
//! strings are documented), so text fields go through lenient deserializers
//! that never reject a payload over a scalar mismatch.

use std::cmp::Ordering;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::domain::{ChecklistId, ChecklistStatus, DateFormat, FieldType, ItemId, OptionId};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataEnvelope<T> {
    #[serde(rename = "Dados", default = "Vec::new")]
    pub data: Vec<T>,
}

impl<T> Default for DataEnvelope<T> {
    fn default() -> Self {
        Self { data: Vec::new() }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChecklistSummary {
    #[serde(rename = "Handle", deserialize_with = "lenient")]
    pub id: ChecklistId,
    #[serde(rename = "Codigo", deserialize_with = "lenient")]
    pub code: String,
    #[serde(rename = "NUMEROREFERENCIA", deserialize_with = "lenient")]
    pub reference_number: String,
    #[serde(rename = "NUMEROPEDIDO", deserialize_with = "lenient")]
    pub order_number: String,
    #[serde(rename = "NUMEROCONTROLE", deserialize_with = "lenient")]
    pub control_number: String,
    #[serde(rename = "DATA", deserialize_with = "lenient")]
    pub date: String,
    #[serde(rename = "DATAINICIO", deserialize_with = "lenient")]
    pub started_at: String,
    #[serde(rename = "DATATERMINO", deserialize_with = "lenient")]
    pub finished_at: String,
    #[serde(rename = "TRANSPORTADORA", deserialize_with = "lenient")]
    pub carrier: String,
    #[serde(rename = "HISTORICO", deserialize_with = "lenient")]
    pub history: String,
    #[serde(rename = "ROTEIRO", deserialize_with = "lenient")]
    pub route: String,
    #[serde(rename = "USUARIO", deserialize_with = "lenient")]
    pub user: String,
    #[serde(rename = "DATAALTERACAO", deserialize_with = "lenient")]
    pub modified_at: String,
    #[serde(rename = "STATUS", deserialize_with = "lenient")]
    pub status: ChecklistStatus,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ListOption {
    #[serde(rename = "HANDLE", deserialize_with = "lenient")]
    pub id: OptionId,
    #[serde(rename = "NOME", deserialize_with = "lenient")]
    pub name: String,
    #[serde(
        rename = "MARCADO",
        deserialize_with = "marked_flag",
        serialize_with = "serialize_marked_flag"
    )]
    pub selected: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChecklistItem {
    #[serde(rename = "HANDLE", deserialize_with = "lenient")]
    pub id: ItemId,
    #[serde(rename = "ORDEM", deserialize_with = "lenient")]
    pub order: String,
    #[serde(rename = "NOME", deserialize_with = "lenient")]
    pub name: String,
    #[serde(rename = "STATUS", deserialize_with = "lenient")]
    pub status: String,
    #[serde(rename = "TIPOCAMPO", deserialize_with = "lenient")]
    pub field_type: FieldType,
    #[serde(rename = "HANDLESTATUS", deserialize_with = "lenient")]
    pub status_id: String,
    #[serde(rename = "CONTEUDO", deserialize_with = "lenient_opt")]
    pub content: Option<String>,
    #[serde(
        rename = "FORMATODATA",
        deserialize_with = "date_format",
        serialize_with = "serialize_date_format"
    )]
    pub date_format: Option<DateFormat>,
    #[serde(rename = "OBSERVACAO", deserialize_with = "lenient_opt")]
    pub observation: Option<String>,
    #[serde(rename = "Lista", deserialize_with = "nullable_list")]
    pub options: Vec<ListOption>,
}

impl ChecklistItem {
    /// Numeric sort key. An empty order counts as zero and an unparsable one
    /// sorts after every numbered item.
    pub fn display_order(&self) -> f64 {
        let raw = self.order.trim();
        if raw.is_empty() {
            return 0.0;
        }
        match raw.parse::<f64>() {
            Ok(order) if order.is_finite() => order,
            _ => f64::INFINITY,
        }
    }

    pub fn cmp_display_order(&self, other: &Self) -> Ordering {
        self.display_order().total_cmp(&other.display_order())
    }

    pub fn content(&self) -> &str {
        self.content.as_deref().unwrap_or_default()
    }

    pub fn selected_option(&self) -> Option<&ListOption> {
        self.options.iter().find(|option| option.selected)
    }

    pub fn option(&self, id: &OptionId) -> Option<&ListOption> {
        self.options.iter().find(|option| &option.id == id)
    }
}

/// Value slot of an execution record: booleans travel as JSON booleans,
/// every other field type as a string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum WireValue {
    Flag(bool),
    Text(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemRecord {
    #[serde(rename = "handleChecklistItem")]
    pub item_id: ItemId,
    #[serde(rename = "observacao", default)]
    pub observation: String,
    #[serde(
        rename = "valorTexto",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub value: Option<WireValue>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignatureAttachment {
    #[serde(rename = "nomeArquivo")]
    pub file_name: String,
    #[serde(rename = "handleAssinatura")]
    pub signature_id: String,
    #[serde(rename = "arquivoBase64")]
    pub content_b64: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecutionRequest {
    pub checklist: ChecklistId,
    #[serde(rename = "checklistItem")]
    pub items: Vec<ItemRecord>,
    #[serde(rename = "anexoAssinaturaChecklist", default)]
    pub signature_attachments: Vec<SignatureAttachment>,
    #[serde(rename = "anexoChecklist", default)]
    pub attachments: Vec<serde_json::Value>,
}

impl ExecutionRequest {
    /// Attachments are never transmitted; both attachment arrays stay empty.
    pub fn new(checklist: ChecklistId, items: Vec<ItemRecord>) -> Self {
        Self {
            checklist,
            items,
            signature_attachments: Vec::new(),
            attachments: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    #[serde(rename = "retorno", default)]
    pub grants: Vec<AuthGrant>,
}

impl AuthResponse {
    pub fn token(&self) -> Option<&str> {
        self.grants
            .first()
            .map(|grant| grant.token.as_str())
            .filter(|token| !token.is_empty())
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthGrant {
    #[serde(rename = "codigo", deserialize_with = "lenient")]
    pub code: String,
    #[serde(deserialize_with = "lenient")]
    pub token: String,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Scalar {
    Text(String),
    Integer(i64),
    Float(f64),
    Flag(bool),
}

impl From<Scalar> for String {
    fn from(value: Scalar) -> Self {
        match value {
            Scalar::Text(text) => text,
            Scalar::Integer(n) => n.to_string(),
            Scalar::Float(n) => n.to_string(),
            Scalar::Flag(flag) => flag.to_string(),
        }
    }
}

fn lenient_opt<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Scalar>::deserialize(deserializer)?.map(String::from))
}

fn lenient<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: From<String>,
{
    Ok(T::from(lenient_opt(deserializer)?.unwrap_or_default()))
}

fn nullable_list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

fn marked_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = lenient_opt(deserializer)?.unwrap_or_default();
    Ok(raw.trim().eq_ignore_ascii_case("S") || raw.trim() == "true")
}

fn serialize_marked_flag<S>(selected: &bool, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(if *selected { "S" } else { "N" })
}

fn date_format<'de, D>(deserializer: D) -> Result<Option<DateFormat>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient_opt(deserializer)?.and_then(|raw| DateFormat::from_descriptor(&raw)))
}

fn serialize_date_format<S>(format: &Option<DateFormat>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(format.map(DateFormat::descriptor).unwrap_or_default())
}

#[cfg(test)]
#[path = "tests/protocol_tests.rs"]
mod tests;
