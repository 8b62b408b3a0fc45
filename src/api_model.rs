use crate::database_api::Rowid;
use crate::error::Error;
use crate::error::Result;
use crate::item_collection::Page;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde::Serialize;

/// The request-routing key, taken from the `a` query parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Add,
    Update,
    List,
}

impl Action {
    /// Case-insensitive lookup, `None` for unknown names.
    pub fn from_name(name: &str) -> Option<Action> {
        match name.to_ascii_lowercase().as_str() {
            "add" => Some(Action::Add),
            "update" => Some(Action::Update),
            "list" => Some(Action::List),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Action::Add => "add",
            Action::Update => "update",
            Action::List => "list",
        }
    }
}

/// Query string of a dispatcher request.
/// Everything is kept as text so that a malformed value never makes the whole query
/// unparseable; the handlers decide what is valid.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct ActionQuery {
    pub a: Option<String>,
    pub offset: Option<String>,
    pub count: Option<String>,
}

impl ActionQuery {
    /// Parse a raw query string. Repeated keys are allowed, the last one wins,
    /// and unknown keys are ignored.
    pub fn from_query_string(raw: &str) -> Result<ActionQuery> {
        let pairs: Vec<(String, String)> = serde_urlencoded::from_str(raw)?;
        let mut query = ActionQuery::default();
        for (key, value) in pairs {
            match key.as_str() {
                "a" => query.a = Some(value),
                "offset" => query.offset = Some(value),
                "count" => query.count = Some(value),
                _ => {}
            }
        }
        Ok(query)
    }

    pub fn action(&self) -> Option<Action> {
        self.a.as_deref().and_then(Action::from_name)
    }

    pub fn page(&self) -> Result<Page> {
        let offset = parse_page_number("offset", self.offset.as_deref())?.unwrap_or(0);
        let count = parse_page_number("count", self.count.as_deref())?;
        Ok(Page { offset, count })
    }
}

fn parse_page_number(name: &str, value: Option<&str>) -> Result<Option<u32>> {
    match value {
        None => Ok(None),
        Some(v) if v.is_empty() => Ok(None),
        Some(v) => v.parse().map(Some).map_err(|err| {
            Error::bad_request(format!("Query parameter {}={} is invalid, {}", name, v, err))
        }),
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct AddItem {
    pub text: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct UpdateItem {
    pub id: Rowid,
    pub text: String,
    pub is_complete: bool,
}

/// Form-encoded shape of [`UpdateItem`] as sent by older page scripts.
#[derive(Deserialize, Debug)]
pub struct UpdateItemForm {
    pub id: String,
    pub text: String,
    pub is_complete: String,
}

impl From<UpdateItemForm> for UpdateItem {
    fn from(form: UpdateItemForm) -> UpdateItem {
        UpdateItem {
            id: coerce_integer(&form.id),
            text: form.text,
            is_complete: form.is_complete == "true",
        }
    }
}

/// Body of every error response.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ErrorBody {
    pub error: String,
}

/// Integer prefix of `input`, ignoring leading whitespace.
/// `"12abc"` gives 12, input without leading digits gives 0,
/// values out of range saturate.
pub fn coerce_integer(input: &str) -> i64 {
    let input = input.trim_start();
    let (negative, rest) = match input.as_bytes().first() {
        Some(b'-') => (true, &input[1..]),
        Some(b'+') => (false, &input[1..]),
        _ => (false, input),
    };
    let digits_end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or_else(|| rest.len());
    let digits = &rest[..digits_end];
    if digits.is_empty() {
        return 0;
    }
    let signed = if negative {
        format!("-{}", digits)
    } else {
        digits.to_string()
    };
    signed.parse().unwrap_or(if negative { i64::MIN } else { i64::MAX })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyFormat {
    Json,
    Form,
}

impl BodyFormat {
    /// Anything that does not declare JSON is treated as a form submission.
    pub fn from_content_type(content_type: Option<&str>) -> BodyFormat {
        match content_type {
            Some(ct) if ct.trim().to_ascii_lowercase().starts_with("application/json") => {
                BodyFormat::Json
            }
            _ => BodyFormat::Form,
        }
    }
}

/// A request body that can arrive either as JSON or as form fields.
pub trait Payload: Sized {
    fn decode(format: BodyFormat, body: &[u8]) -> Result<Self>;
}

fn decode_json<T: DeserializeOwned>(body: &[u8]) -> Result<T> {
    let mut json = serde_json::Deserializer::from_slice(body);
    let value = serde_path_to_error::deserialize(&mut json)?;
    json.end()?;
    Ok(value)
}

impl Payload for AddItem {
    fn decode(format: BodyFormat, body: &[u8]) -> Result<AddItem> {
        match format {
            BodyFormat::Json => decode_json(body),
            BodyFormat::Form => Ok(serde_urlencoded::from_bytes(body)?),
        }
    }
}

impl Payload for UpdateItem {
    fn decode(format: BodyFormat, body: &[u8]) -> Result<UpdateItem> {
        match format {
            BodyFormat::Json => decode_json(body),
            BodyFormat::Form => {
                let form: UpdateItemForm = serde_urlencoded::from_bytes(body)?;
                Ok(form.into())
            }
        }
    }
}
