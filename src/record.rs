use serde::{Deserialize, Serialize};

use crate::errors::WhoisError;

/// Contact details of one role (registrant, admin or tech).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organization: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub telephone: Option<String>,
}

impl ContactInfo {
    pub fn is_empty(&self) -> bool {
        self.organization.is_none()
            && self.email.is_none()
            && self.name.is_none()
            && self.telephone.is_none()
    }

    pub(crate) fn found_fields(&self) -> usize {
        [&self.organization, &self.email, &self.name, &self.telephone]
            .iter()
            .filter(|field| field.is_some())
            .count()
    }
}

/// Registrar abuse contact.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbuseInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub telephone: Option<String>,
}

impl AbuseInfo {
    pub fn is_empty(&self) -> bool {
        self.email.is_none() && self.telephone.is_none()
    }
}

/// Structured result of parsing one whois response.
///
/// Field order here is the key order of the JSON output. Absent optional
/// fields are omitted; list fields and `is_rate_limited` are always present.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WhoisRecord {
    /// Normalized (trimmed, footer-stripped) input text
    pub raw_text: String,
    pub registrant: ContactInfo,
    pub admin: ContactInfo,
    pub tech: ContactInfo,
    pub abuse: AbuseInfo,
    pub statuses: Vec<String>,
    pub name_servers: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub registrar: Option<String>,
    /// Unix seconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub registered_at: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<i64>,
    pub is_rate_limited: bool,
}

impl WhoisRecord {
    /// Pretty JSON with four-space indentation.
    pub fn to_json_pretty(&self) -> Result<String, WhoisError> {
        let mut out = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut serializer = serde_json::Serializer::with_formatter(&mut out, formatter);
        self.serialize(&mut serializer)?;
        String::from_utf8(out)
            .map_err(|e| WhoisError::Internal(format!("Serializer produced invalid UTF-8: {}", e)))
    }

    pub fn to_json(&self) -> Result<String, WhoisError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Number of extracted values, counting each contact sub-field and list
    /// entry.
    pub fn found_fields(&self) -> usize {
        let scalars = [
            self.domain.is_some(),
            self.registrar.is_some(),
            self.expires_at.is_some(),
            self.registered_at.is_some(),
            self.updated_at.is_some(),
            self.abuse.email.is_some(),
            self.abuse.telephone.is_some(),
        ]
        .into_iter()
        .filter(|found| *found)
        .count();

        scalars
            + self.registrant.found_fields()
            + self.admin.found_fields()
            + self.tech.found_fields()
            + self.statuses.len()
            + self.name_servers.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    #[test]
    fn test_absent_fields_are_omitted() {
        let json = WhoisRecord::default().to_json().unwrap();
        assert_eq!(
            json,
            r#"{"raw_text":"","registrant":{},"admin":{},"tech":{},"abuse":{},"statuses":[],"name_servers":[],"is_rate_limited":false}"#
        );
    }

    #[test]
    fn test_key_order_follows_model() {
        let record = WhoisRecord {
            raw_text: "Domain Name: x.com".to_string(),
            domain: Some("x.com".to_string()),
            registrar: Some("Foo".to_string()),
            expires_at: Some(3),
            registered_at: Some(1),
            updated_at: Some(2),
            registrant: ContactInfo {
                name: Some("Jane".to_string()),
                organization: Some("Acme".to_string()),
                ..Default::default()
            },
            ..Default::default()
        };
        let json = record.to_json().unwrap();
        let keys = [
            "\"raw_text\"", "\"registrant\"", "\"admin\"", "\"tech\"", "\"abuse\"",
            "\"statuses\"", "\"name_servers\"", "\"domain\"", "\"registrar\"",
            "\"expires_at\"", "\"registered_at\"", "\"updated_at\"", "\"is_rate_limited\"",
        ];
        let positions: Vec<usize> = keys.iter().map(|k| json.find(k).unwrap()).collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]), "{json}");
        assert!(json.contains(r#""registrant":{"organization":"Acme","name":"Jane"}"#));
    }

    #[test]
    fn test_pretty_output_uses_four_spaces() {
        let pretty = WhoisRecord::default().to_json_pretty().unwrap();
        assert!(pretty.starts_with("{\n    \"raw_text\": \"\","));
        let value: Value = serde_json::from_str(&pretty).unwrap();
        assert_eq!(value["is_rate_limited"], Value::Bool(false));
    }

    #[test]
    fn test_json_round_trips_through_serde() {
        let record = WhoisRecord {
            statuses: vec!["ok".to_string()],
            abuse: AbuseInfo {
                email: Some("abuse@example.com".to_string()),
                telephone: None,
            },
            is_rate_limited: true,
            ..Default::default()
        };
        let back: WhoisRecord = serde_json::from_str(&record.to_json_pretty().unwrap()).unwrap();
        assert_eq!(back, record);
    }

    #[test]
    fn test_found_fields() {
        let mut record = WhoisRecord::default();
        assert_eq!(record.found_fields(), 0);
        assert!(record.admin.is_empty() && record.abuse.is_empty());

        record.domain = Some("x.com".to_string());
        record.admin.email = Some("a@x.com".to_string());
        record.name_servers = vec!["ns1.x.com".to_string(), "ns2.x.com".to_string()];
        assert_eq!(record.found_fields(), 4);
    }
}
