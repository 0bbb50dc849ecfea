//! Firestore typed value encoding.
//!
//! Firestore's REST API wraps every field in a one-key object naming its
//! type, e.g. `{"stringValue": "pikachu"}` or `{"integerValue": "112"}`
//! (64-bit integers travel as decimal strings). These helpers convert
//! team documents to and from that form.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::StoreError;
use crate::models::{Member, NewTeam, Team, TeamId};

/// A single Firestore value
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub enum Value {
    NullValue(Option<String>),
    BooleanValue(bool),
    IntegerValue(String),
    DoubleValue(f64),
    StringValue(String),
    TimestampValue(String),
    /// Base64 encoded bytes
    BytesValue(String),
    /// Resource name of another document
    ReferenceValue(String),
    GeoPointValue(LatLng),
    ArrayValue(ArrayValue),
    MapValue(MapValue),
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct LatLng {
    #[serde(default)]
    pub latitude: f64,
    #[serde(default)]
    pub longitude: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ArrayValue {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub values: Vec<Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct MapValue {
    #[serde(default)]
    pub fields: Fields,
}

pub type Fields = BTreeMap<String, Value>;

/// A document as returned by the `documents` endpoints
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    /// Full resource name, `projects/{p}/databases/{d}/documents/teams/{id}`
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(default)]
    pub fields: Fields,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub create_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub update_time: Option<String>,
}

impl Document {
    /// Last path segment of the resource name
    pub fn id(&self) -> Option<&str> {
        self.name.rsplit('/').next().filter(|s| !s.is_empty())
    }
}

/// Body of a `documents.list` response
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListDocumentsResponse {
    #[serde(default)]
    pub documents: Vec<Document>,
    #[serde(default)]
    pub next_page_token: Option<String>,
}

impl Value {
    pub fn string(s: &str) -> Self {
        Value::StringValue(s.to_string())
    }

    pub fn integer(n: i64) -> Self {
        Value::IntegerValue(n.to_string())
    }

    fn as_str(&self) -> Option<&str> {
        match self {
            Value::StringValue(s) => Some(s),
            _ => None,
        }
    }

    fn as_u32(&self) -> Option<u32> {
        match self {
            Value::IntegerValue(s) => s
                .parse::<i64>()
                .ok()
                .and_then(|n| u32::try_from(n.max(0)).ok()),
            Value::DoubleValue(d) if *d >= 0.0 && *d <= f64::from(u32::MAX) => {
                Some(d.round() as u32)
            }
            _ => None,
        }
    }
}

pub fn member_to_value(member: &Member) -> Value {
    let mut fields = Fields::new();
    fields.insert("name".to_string(), Value::string(&member.name));
    fields.insert("type".to_string(), Value::string(&member.type_));
    fields.insert(
        "image".to_string(),
        match &member.image {
            Some(url) => Value::string(url),
            None => Value::NullValue(None),
        },
    );
    fields.insert(
        "base_experience".to_string(),
        Value::integer(i64::from(member.base_experience)),
    );
    Value::MapValue(MapValue { fields })
}

pub fn members_to_value(members: &[Member]) -> Value {
    Value::ArrayValue(ArrayValue {
        values: members.iter().map(member_to_value).collect(),
    })
}

/// Fields for a new team document
pub fn new_team_fields(team: &NewTeam) -> Fields {
    let mut fields = Fields::new();
    fields.insert("name".to_string(), Value::string(&team.name));
    fields.insert("pokemons".to_string(), members_to_value(&team.pokemons));
    fields
}

fn member_from_value(value: &Value) -> Result<Member, StoreError> {
    let fields = match value {
        Value::MapValue(map) => &map.fields,
        other => {
            return Err(StoreError::Malformed(format!(
                "expected member map, got {:?}",
                other
            )))
        }
    };

    let name = fields
        .get("name")
        .and_then(Value::as_str)
        .ok_or_else(|| StoreError::Malformed("member without name".to_string()))?;

    Ok(Member {
        name: name.to_string(),
        type_: fields
            .get("type")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string(),
        image: fields
            .get("image")
            .and_then(Value::as_str)
            .map(str::to_string),
        base_experience: fields
            .get("base_experience")
            .and_then(Value::as_u32)
            .unwrap_or(0),
    })
}

/// Decode a stored document into a team
pub fn team_from_document(doc: &Document) -> Result<Team, StoreError> {
    let id = doc
        .id()
        .ok_or_else(|| StoreError::Malformed(format!("document without id: {:?}", doc.name)))?;

    let name = doc
        .fields
        .get("name")
        .and_then(Value::as_str)
        .ok_or_else(|| StoreError::Malformed(format!("team {} has no name", id)))?;

    let pokemons = match doc.fields.get("pokemons") {
        Some(Value::ArrayValue(array)) => array
            .values
            .iter()
            .map(member_from_value)
            .collect::<Result<Vec<_>, _>>()?,
        Some(Value::NullValue(_)) | None => Vec::new(),
        Some(other) => {
            return Err(StoreError::Malformed(format!(
                "team {}: pokemons is {:?}",
                id, other
            )))
        }
    };

    Ok(Team {
        id: TeamId::new(id),
        name: name.to_string(),
        pokemons,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_value_wire_format() {
        assert_eq!(
            serde_json::to_value(Value::string("pikachu")).unwrap(),
            json!({"stringValue": "pikachu"})
        );
        assert_eq!(
            serde_json::to_value(Value::integer(112)).unwrap(),
            json!({"integerValue": "112"})
        );
        assert_eq!(
            serde_json::to_value(members_to_value(&[])).unwrap(),
            json!({"arrayValue": {}})
        );
    }

    #[test]
    fn test_decode_list_response() {
        let body = json!({
            "documents": [{
                "name": "projects/p/databases/(default)/documents/teams/abc123",
                "fields": {
                    "name": {"stringValue": "Kanto"},
                    "pokemons": {"arrayValue": {"values": [{
                        "mapValue": {"fields": {
                            "name": {"stringValue": "bulbasaur"},
                            "type": {"stringValue": "grass, poison"},
                            "image": {"stringValue": "https://img/1.png"},
                            "base_experience": {"integerValue": "64"}
                        }}
                    }]}}
                },
                "createTime": "2024-01-01T00:00:00Z",
                "updateTime": "2024-01-01T00:00:00Z"
            }, {
                "name": "projects/p/databases/(default)/documents/teams/empty",
                "fields": {
                    "name": {"stringValue": "Empty"},
                    "pokemons": {"arrayValue": {}}
                }
            }],
            "nextPageToken": "tok"
        });

        let page: ListDocumentsResponse = serde_json::from_value(body).unwrap();
        assert_eq!(page.next_page_token.as_deref(), Some("tok"));

        let team = team_from_document(&page.documents[0]).unwrap();
        assert_eq!(team.id, TeamId::new("abc123"));
        assert_eq!(team.name, "Kanto");
        assert_eq!(
            team.pokemons,
            vec![Member::new("bulbasaur", "grass, poison", 64).with_image("https://img/1.png")]
        );

        let empty = team_from_document(&page.documents[1]).unwrap();
        assert!(empty.pokemons.is_empty());
    }

    #[test]
    fn test_new_team_fields_decode_back() {
        let draft = NewTeam {
            name: "Kanto".to_string(),
            pokemons: vec![Member::new("ditto", "normal", 101)],
        };
        let doc = Document {
            name: "projects/p/databases/(default)/documents/teams/x1".to_string(),
            fields: new_team_fields(&draft),
            create_time: None,
            update_time: None,
        };
        let team = team_from_document(&doc).unwrap();
        assert_eq!(team, draft.into_team(TeamId::new("x1")));
    }

    #[test]
    fn test_document_without_name_is_malformed() {
        let doc = Document {
            name: "projects/p/databases/(default)/documents/teams/x1".to_string(),
            fields: Fields::new(),
            create_time: None,
            update_time: None,
        };
        assert!(matches!(
            team_from_document(&doc),
            Err(StoreError::Malformed(_))
        ));
    }

    #[test]
    fn test_foreign_value_types_decode() {
        let body = json!({
            "documents": [{
                "name": "projects/p/databases/(default)/documents/teams/t1",
                "fields": {
                    "name": {"stringValue": "Kanto"},
                    "owner": {"referenceValue": "projects/p/databases/(default)/documents/users/u1"},
                    "badge": {"bytesValue": "AAEC"},
                    "gym": {"geoPointValue": {"latitude": 35.6, "longitude": 139.7}},
                    "pokemons": {"arrayValue": {}}
                }
            }]
        });
        let page: ListDocumentsResponse = serde_json::from_value(body).unwrap();
        let team = team_from_document(&page.documents[0]).unwrap();
        assert_eq!(team.name, "Kanto");
        assert_eq!(
            page.documents[0].fields.get("gym"),
            Some(&Value::GeoPointValue(LatLng {
                latitude: 35.6,
                longitude: 139.7
            }))
        );
    }

    #[test]
    fn test_out_of_range_experience_is_dropped() {
        assert_eq!(Value::integer(i64::from(u32::MAX) + 1).as_u32(), None);
        assert_eq!(Value::integer(-5).as_u32(), Some(0));
        assert_eq!(Value::integer(112).as_u32(), Some(112));
        assert_eq!(Value::DoubleValue(1e12).as_u32(), None);
    }
}
