//! Registrar and contact entities

use super::registry::{lookup_registrar, PostalAddress, RegistrarEnrichment};
use super::types::{Entity, PublicId, VCard, VCardProperty, VCardValue};
use crate::whois::{fields, WhoisRecord};
use std::collections::BTreeMap;

const IANA_REGISTRAR_ID: &str = "IANA Registrar ID";

/// Build the registrar entity with nested abuse and privacy contacts.
pub fn registrar_entity(record: &WhoisRecord, registrar: &str, privacy_contacts: bool) -> Entity {
    let enrichment = lookup_registrar(registrar);

    // An unknown registrar without a WHOIS id keeps an empty handle
    let iana_id = record
        .text(fields::REGISTRAR_IANA_ID)
        .or_else(|| enrichment.map(|e| e.iana_id.to_string()))
        .unwrap_or_default();

    let mut vcard = VCard::new();
    vcard.push(VCardProperty::text("fn", registrar));
    vcard.push(VCardProperty::text("kind", "org"));
    if let Some(address) = enrichment.and_then(|e| e.address) {
        vcard.push(address_property(&address));
    }

    let mut entity = Entity::new("registrar", vcard);
    entity.handle = Some(iana_id.clone());
    entity.public_ids.push(PublicId {
        id_type: IANA_REGISTRAR_ID.to_string(),
        identifier: iana_id,
    });

    let emails = record.values(fields::EMAILS);

    if let Some(abuse) = abuse_entity(record, &emails, enrichment) {
        entity.entities.push(abuse);
    }
    if privacy_contacts {
        if let Some(privacy) = privacy_entity(&emails, enrichment) {
            entity.entities.push(privacy);
        }
    }

    entity
}

fn abuse_entity(
    record: &WhoisRecord,
    emails: &[String],
    enrichment: Option<&RegistrarEnrichment>,
) -> Option<Entity> {
    let emails = matching_emails(emails, "abuse", enrichment.and_then(|e| e.abuse_email));
    let phone = record
        .text(fields::REGISTRAR_ABUSE_CONTACT_PHONE)
        .or_else(|| enrichment.and_then(|e| e.abuse_phone).map(String::from));

    if emails.is_empty() && phone.is_none() {
        return None;
    }

    let mut vcard = contact_vcard("Abuse Contact");
    if let Some(phone) = phone {
        vcard.push(phone_property(&phone));
    }
    for email in emails {
        vcard.push(VCardProperty::text("email", email));
    }

    Some(Entity::new("abuse", vcard))
}

fn privacy_entity(emails: &[String], enrichment: Option<&RegistrarEnrichment>) -> Option<Entity> {
    let emails = matching_emails(emails, "privacy", enrichment.and_then(|e| e.privacy_email));
    if emails.is_empty() {
        return None;
    }

    let mut vcard = contact_vcard("Privacy Contact");
    for email in emails {
        vcard.push(VCardProperty::text("email", email));
    }

    Some(Entity::new("privacy", vcard))
}

/// Emails containing `needle` (case-insensitive), else the fallback address
fn matching_emails(emails: &[String], needle: &str, fallback: Option<&str>) -> Vec<String> {
    let matched: Vec<String> = emails
        .iter()
        .map(|e| e.trim())
        .filter(|e| e.to_lowercase().contains(needle))
        .map(String::from)
        .collect();

    if matched.is_empty() {
        fallback.map(|e| vec![e.to_string()]).unwrap_or_default()
    } else {
        matched
    }
}

fn contact_vcard(name: &str) -> VCard {
    let mut vcard = VCard::new();
    vcard.push(VCardProperty::text("fn", name));
    vcard.push(VCardProperty::text("kind", "individual"));
    vcard
}

fn phone_property(phone: &str) -> VCardProperty {
    let phone = phone.trim();
    let uri = if phone.starts_with("tel:") {
        phone.to_string()
    } else {
        format!("tel:{}", phone)
    };
    VCardProperty::text("tel", uri)
        .with_param("type", "voice")
        .with_type("uri")
}

fn address_property(address: &PostalAddress) -> VCardProperty {
    VCardProperty {
        name: "adr".to_string(),
        params: BTreeMap::new(),
        value_type: "text".to_string(),
        value: VCardValue::Components(vec![
            None,
            None,
            Some(address.street.to_string()),
            Some(address.locality.to_string()),
            Some(address.region.to_string()),
            Some(address.postal_code.to_string()),
            Some(address.country.to_string()),
        ]),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text_of(vcard: &VCard, name: &str) -> Vec<String> {
        vcard
            .all(name)
            .filter_map(|p| match &p.value {
                VCardValue::Text(s) => Some(s.clone()),
                VCardValue::Components(_) => None,
            })
            .collect()
    }

    #[test]
    fn test_known_registrar_without_id() {
        let record = WhoisRecord::new().with(fields::REGISTRAR, "Cosmotown, Inc.");
        let entity = registrar_entity(&record, "Cosmotown, Inc.", true);

        assert_eq!(entity.handle.as_deref(), Some("1509"));
        assert_eq!(entity.public_ids[0].identifier, "1509");
        assert_eq!(entity.public_ids[0].id_type, "IANA Registrar ID");
        assert_eq!(text_of(&entity.vcard_array, "fn"), vec!["Cosmotown, Inc."]);
        assert!(entity.vcard_array.get("adr").is_some());

        let abuse = entity.child("abuse").unwrap();
        assert_eq!(text_of(&abuse.vcard_array, "email"), vec!["abuse@cosmotown.com"]);
        assert_eq!(text_of(&abuse.vcard_array, "tel"), vec!["tel:+1.6503198930"]);

        let privacy = entity.child("privacy").unwrap();
        assert_eq!(text_of(&privacy.vcard_array, "email"), vec!["privacy@cosmotown.com"]);
    }

    #[test]
    fn test_whois_id_wins() {
        let record = WhoisRecord::new().with(fields::REGISTRAR_IANA_ID, "9999");
        let entity = registrar_entity(&record, "Cosmotown, Inc.", false);
        assert_eq!(entity.handle.as_deref(), Some("9999"));
        assert!(entity.child("privacy").is_none());
    }

    #[test]
    fn test_unknown_registrar_has_empty_handle() {
        let record = WhoisRecord::new();
        let entity = registrar_entity(&record, "Example Registrar, LLC", true);

        assert_eq!(entity.handle.as_deref(), Some(""));
        assert!(entity.vcard_array.get("adr").is_none());
        assert!(entity.entities.is_empty());
    }

    #[test]
    fn test_contacts_from_record_emails() {
        let record = WhoisRecord::new()
            .with(
                fields::EMAILS,
                vec!["Abuse@Example.net", "hostmaster@example.net", "privacy@example.net"],
            )
            .with(fields::REGISTRAR_ABUSE_CONTACT_PHONE, "+1.5555550100");
        let entity = registrar_entity(&record, "Example Registrar", true);

        let abuse = entity.child("abuse").unwrap();
        assert_eq!(text_of(&abuse.vcard_array, "email"), vec!["Abuse@Example.net"]);
        assert_eq!(text_of(&abuse.vcard_array, "tel"), vec!["tel:+1.5555550100"]);
        assert_eq!(text_of(&abuse.vcard_array, "kind"), vec!["individual"]);

        let privacy = entity.child("privacy").unwrap();
        assert_eq!(text_of(&privacy.vcard_array, "email"), vec!["privacy@example.net"]);
    }

    #[test]
    fn test_record_emails_beat_fallback() {
        let record = WhoisRecord::new().with(fields::EMAILS, "abuse-desk@cosmotown.com");
        let entity = registrar_entity(&record, "Cosmotown", true);

        let abuse = entity.child("abuse").unwrap();
        assert_eq!(text_of(&abuse.vcard_array, "email"), vec!["abuse-desk@cosmotown.com"]);
    }

    #[test]
    fn test_phone_only_abuse_contact() {
        let record = WhoisRecord::new().with(fields::REGISTRAR_ABUSE_CONTACT_PHONE, "tel:+1.5555550100");
        let entity = registrar_entity(&record, "Example Registrar", true);

        let abuse = entity.child("abuse").unwrap();
        assert_eq!(text_of(&abuse.vcard_array, "tel"), vec!["tel:+1.5555550100"]);
        assert!(abuse.vcard_array.get("email").is_none());
    }
}
