//! RDAP response objects (RFC 9083 domain object subset)

use serde::ser::{SerializeSeq, SerializeTuple};
use serde::{Serialize, Serializer};
use std::collections::BTreeMap;

/// Media type of every RDAP response
pub const RDAP_MEDIA_TYPE: &str = "application/rdap+json";

/// Conformance tags carried by every response, including errors
pub const RDAP_CONFORMANCE: [&str; 3] = [
    "rdap_level_0",
    "icann_rdap_technical_implementation_guide_0",
    "icann_rdap_response_profile_0",
];

fn conformance() -> Vec<String> {
    RDAP_CONFORMANCE.iter().map(|s| s.to_string()).collect()
}

/// RDAP domain object
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RdapDomain {
    pub object_class_name: &'static str,
    pub handle: String,
    pub ldh_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unicode_name: Option<String>,
    pub status: Vec<String>,
    pub entities: Vec<Entity>,
    pub events: Vec<Event>,
    pub nameservers: Vec<Nameserver>,
    #[serde(rename = "secureDNS")]
    pub secure_dns: SecureDns,
    pub links: Vec<Link>,
    pub notices: Vec<Notice>,
    pub rdap_conformance: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub port43: Option<String>,
}

impl RdapDomain {
    /// Empty-but-valid domain object
    pub fn new(handle: impl Into<String>, ldh_name: impl Into<String>) -> Self {
        Self {
            object_class_name: "domain",
            handle: handle.into(),
            ldh_name: ldh_name.into(),
            unicode_name: None,
            status: Vec::new(),
            entities: Vec::new(),
            events: Vec::new(),
            nameservers: Vec::new(),
            secure_dns: SecureDns::default(),
            links: Vec::new(),
            notices: Vec::new(),
            rdap_conformance: conformance(),
            port43: None,
        }
    }

    /// First event with the given action
    pub fn event(&self, action: &str) -> Option<&Event> {
        self.events.iter().find(|e| e.event_action == action)
    }

    /// Registrar entity, if any
    pub fn registrar(&self) -> Option<&Entity> {
        self.entities.iter().find(|e| e.has_role("registrar"))
    }
}

/// Event such as registration or expiration
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub event_action: String,
    pub event_date: String,
}

impl Event {
    pub fn new(action: impl Into<String>, date: impl Into<String>) -> Self {
        Self {
            event_action: action.into(),
            event_date: date.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Nameserver {
    pub object_class_name: &'static str,
    pub ldh_name: String,
}

impl Nameserver {
    pub fn new(ldh_name: impl Into<String>) -> Self {
        Self {
            object_class_name: "nameserver",
            ldh_name: ldh_name.into(),
        }
    }
}

/// Public identifier such as an IANA Registrar ID
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PublicId {
    #[serde(rename = "type")]
    pub id_type: String,
    pub identifier: String,
}

/// Contact entity (registrar, abuse, privacy)
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Entity {
    pub object_class_name: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub handle: Option<String>,
    pub roles: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub public_ids: Vec<PublicId>,
    pub vcard_array: VCard,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub entities: Vec<Entity>,
}

impl Entity {
    pub fn new(role: impl Into<String>, vcard: VCard) -> Self {
        Self {
            object_class_name: "entity",
            handle: None,
            roles: vec![role.into()],
            public_ids: Vec::new(),
            vcard_array: vcard,
            entities: Vec::new(),
        }
    }

    pub fn has_role(&self, role: &str) -> bool {
        self.roles.iter().any(|r| r == role)
    }

    /// Nested entity with the given role
    pub fn child(&self, role: &str) -> Option<&Entity> {
        self.entities.iter().find(|e| e.has_role(role))
    }
}

/// jCard value
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum VCardValue {
    Text(String),
    /// Structured value such as `adr`; `None` components serialize as null
    Components(Vec<Option<String>>),
}

/// One jCard property: `[name, params, type, value]`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VCardProperty {
    pub name: String,
    pub params: BTreeMap<String, String>,
    pub value_type: String,
    pub value: VCardValue,
}

impl VCardProperty {
    pub fn text(name: &str, value: impl Into<String>) -> Self {
        Self {
            name: name.to_string(),
            params: BTreeMap::new(),
            value_type: "text".to_string(),
            value: VCardValue::Text(value.into()),
        }
    }

    pub fn with_param(mut self, key: &str, value: &str) -> Self {
        self.params.insert(key.to_string(), value.to_string());
        self
    }

    pub fn with_type(mut self, value_type: &str) -> Self {
        self.value_type = value_type.to_string();
        self
    }
}

impl Serialize for VCardProperty {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut tuple = serializer.serialize_tuple(4)?;
        tuple.serialize_element(&self.name)?;
        tuple.serialize_element(&self.params)?;
        tuple.serialize_element(&self.value_type)?;
        tuple.serialize_element(&self.value)?;
        tuple.end()
    }
}

/// jCard, serialized as `["vcard", [properties...]]`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VCard {
    pub properties: Vec<VCardProperty>,
}

impl VCard {
    /// vCard holding only the version property
    pub fn new() -> Self {
        Self {
            properties: vec![VCardProperty::text("version", "4.0")],
        }
    }

    pub fn push(&mut self, property: VCardProperty) {
        self.properties.push(property);
    }

    /// First property with the given name
    pub fn get(&self, name: &str) -> Option<&VCardProperty> {
        self.properties.iter().find(|p| p.name == name)
    }

    /// All properties with the given name
    pub fn all<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a VCardProperty> + 'a {
        self.properties.iter().filter(move |p| p.name == name)
    }
}

impl Serialize for VCard {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(2))?;
        seq.serialize_element("vcard")?;
        seq.serialize_element(&self.properties)?;
        seq.end()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SecureDns {
    pub delegation_signed: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Link {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rel: Option<String>,
    pub href: String,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub media_type: Option<String>,
}

impl Link {
    /// RDAP link where `value` and `href` are the same URL
    pub fn rdap(rel: &str, href: impl Into<String>) -> Self {
        let href = href.into();
        Self {
            value: Some(href.clone()),
            rel: Some(rel.to_string()),
            href,
            media_type: Some(RDAP_MEDIA_TYPE.to_string()),
        }
    }

    /// Plain reference link used inside notices
    pub fn reference(href: &str, media_type: &str) -> Self {
        Self {
            value: None,
            rel: None,
            href: href.to_string(),
            media_type: Some(media_type.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub title: String,
    pub description: Vec<String>,
    pub links: Vec<Link>,
}

/// RDAP error response
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RdapError {
    pub error_code: u16,
    pub title: String,
    pub description: Vec<String>,
    pub rdap_conformance: Vec<String>,
}

impl RdapError {
    pub fn new(error_code: u16, title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            error_code,
            title: title.into(),
            description: vec![description.into()],
            rdap_conformance: conformance(),
        }
    }
}

impl From<&crate::error::WhoisRdapError> for RdapError {
    fn from(err: &crate::error::WhoisRdapError) -> Self {
        Self::new(err.status_code(), err.title(), err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_vcard_serialization() {
        let mut vcard = VCard::new();
        vcard.push(VCardProperty::text("fn", "Cosmotown, Inc."));
        vcard.push(
            VCardProperty::text("tel", "tel:+1.6503198930")
                .with_param("type", "voice")
                .with_type("uri"),
        );
        vcard.push(VCardProperty {
            name: "adr".to_string(),
            params: BTreeMap::new(),
            value_type: "text".to_string(),
            value: VCardValue::Components(vec![None, Some("68 Willow Road".to_string())]),
        });

        assert_eq!(
            serde_json::to_value(&vcard).unwrap(),
            json!([
                "vcard",
                [
                    ["version", {}, "text", "4.0"],
                    ["fn", {}, "text", "Cosmotown, Inc."],
                    ["tel", {"type": "voice"}, "uri", "tel:+1.6503198930"],
                    ["adr", {}, "text", [null, "68 Willow Road"]]
                ]
            ])
        );
    }

    #[test]
    fn test_domain_serialization_keys() {
        let mut domain = RdapDomain::new("H-TAG", "example.com");
        domain.port43 = Some("whois.example.com".to_string());

        let value = serde_json::to_value(&domain).unwrap();
        assert_eq!(value["objectClassName"], "domain");
        assert_eq!(value["ldhName"], "example.com");
        assert_eq!(value["secureDNS"]["delegationSigned"], false);
        assert_eq!(value["port43"], "whois.example.com");
        assert_eq!(value["rdapConformance"].as_array().unwrap().len(), 3);
        assert!(value.get("unicodeName").is_none());
    }

    #[test]
    fn test_error_document() {
        let err = crate::error::WhoisRdapError::network("connection reset", None);
        let value = serde_json::to_value(RdapError::from(&err)).unwrap();

        assert_eq!(value["errorCode"], 500);
        assert_eq!(value["title"], "Internal Server Error");
        assert_eq!(value["description"][0], "Network error: connection reset");
        assert_eq!(value["rdapConformance"][0], "rdap_level_0");
    }

    #[test]
    fn test_links() {
        let link = serde_json::to_value(Link::rdap("self", "https://a/domain/x.com")).unwrap();
        assert_eq!(link["value"], link["href"]);
        assert_eq!(link["type"], RDAP_MEDIA_TYPE);

        let link = serde_json::to_value(Link::reference("https://icann.org/epp", "text/html")).unwrap();
        assert!(link.get("rel").is_none());
    }
}
