//! The twelve field extractors.
//!
//! Each extractor is a pure function of the normalized text. Keyword tables
//! are hand-curated from the labels real registries and registrars use; order
//! within a table is priority order, but line order always wins (see
//! [`crate::matcher`]).

use crate::dates::{find_date, DEFAULT_LAYOUTS};
use crate::matcher::{find_all, find_first, Keywords};
use crate::normalize::NormalizedText;
use crate::record::{AbuseInfo, ContactInfo};

pub const ABUSE_EMAIL: Keywords = &["Registrar Abuse Contact Email", "AC E-Mail"];
pub const ABUSE_TELEPHONE: Keywords = &["Registrar Abuse Contact Phone", "AC Phone Number"];

pub const DOMAIN: Keywords = &["Domain Name", "domain:"];

pub const REGISTRAR: Keywords = &[
    "Registrar:",
    "Registrar Name",
    "Sponsoring Registrar",
    "registrar-name",
    "Registration Service Provider",
    "Domain Support",
    "Sponsoring Registrar Organization",
    "Account Name",
];

pub const STATUSES: Keywords = &["Domain Status", "domaintype"];
pub const NAME_SERVERS: Keywords = &["Name server", "Nameserver", "nameservers", "Nserver", "Host Name"];

pub const REGISTERED_AT: Keywords = &[
    "Creation Date",
    "registered",
    "created",
    "activated",
    "Registration Time",
    "Registered Date",
    "Registration Date",
    "Record created on",
    "Created On",
    "registered on",
    "Created Date",
];

pub const UPDATED_AT: Keywords = &[
    "Updated Date",
    "Update Date",
    "updated",
    "changed",
    "modified",
    "Last Updated On",
    "Last Updated Date",
    "domain_datelastmodified",
    "Last Update",
    "Modified Date",
    "last-update",
];

pub const EXPIRES_AT: Keywords = &[
    "Expiry Date",
    "Expiration Date",
    "Expire Date",
    "expire",
    "expires",
    "Expires On",
    "Expiration Time",
    "Renewal Date",
    "Record expires on",
    "paid-till",
    "expire-date",
    "domain_datebilleduntil",
    "Valid Until",
    "validity",
];

/// Literal messages registries send instead of a record when throttling.
pub const RATE_LIMIT_MARKERS: &[&str] = &[
    "WHOIS LIMIT EXCEEDED - SEE WWW.PIR.ORG/WHOIS FOR DETAILS",
    "Your access is too fast,please try again later.",
    "Your connection limit exceeded.",
    "Number of allowed queries exceeded.",
    "WHOIS LIMIT EXCEEDED",
    "Requests of this client are not permitted.",
    "Too many connection attempts. Please try again in a few seconds.",
    "We are unable to process your request at this time.",
    "HTTP/1.1 400 Bad Request",
    "Closing connections because of Timeout",
    "Access to whois service at whois.isoc.org.il was **DENIED**",
    "IP Address Has Reached Rate Limit",
];

/// Status value some registries return for unknown domains; kept whole.
const NO_OBJECT_FOUND: &str = "No Object Found";

/// Keyword tables for one contact role.
#[derive(Debug, Clone, Copy)]
pub struct ContactKeywords {
    pub name: Keywords,
    pub email: Keywords,
    pub telephone: Keywords,
    pub organization: Keywords,
}

pub const REGISTRANT: ContactKeywords = ContactKeywords {
    name: &[
        "Registrant Name",
        "Registrant",
        "Registrant Contact Name",
        "Person",
        "registrant_contact_name",
        "Domain Holder",
        "personname",
        "responsible",
    ],
    email: &["Registrant Email", "Registrant Contact Email"],
    telephone: &["Registrant Phone"],
    organization: &[
        "Registrant Organization",
        "org",
        "org-name",
        "Registrant Contact Organisation",
        "Domain Holder Organization",
    ],
};

pub const ADMIN: ContactKeywords = ContactKeywords {
    name: &["Admin Name"],
    email: &["Admin Email"],
    telephone: &["Admin Phone"],
    organization: &["Admin Organization"],
};

pub const TECH: ContactKeywords = ContactKeywords {
    name: &["Tech Name", "Tech Contact Name", "Tech Contact"],
    email: &["Tech Email", "Tech Contact Email"],
    telephone: &["Tech Phone"],
    organization: &["Tech Organization", "Tech Contact Organisation"],
};

/// One independent extraction job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Extractor {
    Abuse,
    Admin,
    Domain,
    ExpiresAt,
    NameServers,
    RegisteredAt,
    UpdatedAt,
    Registrant,
    Registrar,
    Statuses,
    Tech,
    RateLimited,
}

/// The value produced by one [`Extractor`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Abuse(AbuseInfo),
    Admin(ContactInfo),
    Domain(Option<String>),
    ExpiresAt(Option<i64>),
    NameServers(Vec<String>),
    RegisteredAt(Option<i64>),
    UpdatedAt(Option<i64>),
    Registrant(ContactInfo),
    Registrar(Option<String>),
    Statuses(Vec<String>),
    Tech(ContactInfo),
    RateLimited(bool),
}

impl Extractor {
    pub const ALL: [Extractor; 12] = [
        Extractor::Abuse,
        Extractor::Admin,
        Extractor::Domain,
        Extractor::ExpiresAt,
        Extractor::NameServers,
        Extractor::RegisteredAt,
        Extractor::UpdatedAt,
        Extractor::Registrant,
        Extractor::Registrar,
        Extractor::Statuses,
        Extractor::Tech,
        Extractor::RateLimited,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Extractor::Abuse => "abuse",
            Extractor::Admin => "admin",
            Extractor::Domain => "domain",
            Extractor::ExpiresAt => "expires_at",
            Extractor::NameServers => "name_servers",
            Extractor::RegisteredAt => "registered_at",
            Extractor::UpdatedAt => "updated_at",
            Extractor::Registrant => "registrant",
            Extractor::Registrar => "registrar",
            Extractor::Statuses => "statuses",
            Extractor::Tech => "tech",
            Extractor::RateLimited => "is_rate_limited",
        }
    }

    /// Run against the normalized text. `raw` is only read by the rate-limit
    /// detector, which must see text the footer stripping would remove.
    pub fn run(self, text: &NormalizedText, raw: &str) -> FieldValue {
        match self {
            Extractor::Abuse => FieldValue::Abuse(find_abuse(text)),
            Extractor::Admin => FieldValue::Admin(find_contact(text, &ADMIN)),
            Extractor::Domain => FieldValue::Domain(find_first(text, DOMAIN)),
            Extractor::ExpiresAt => FieldValue::ExpiresAt(find_date(text, EXPIRES_AT, DEFAULT_LAYOUTS)),
            Extractor::NameServers => FieldValue::NameServers(find_name_servers(text)),
            Extractor::RegisteredAt => {
                FieldValue::RegisteredAt(find_date(text, REGISTERED_AT, DEFAULT_LAYOUTS))
            }
            Extractor::UpdatedAt => FieldValue::UpdatedAt(find_date(text, UPDATED_AT, DEFAULT_LAYOUTS)),
            Extractor::Registrant => FieldValue::Registrant(find_contact(text, &REGISTRANT)),
            Extractor::Registrar => FieldValue::Registrar(find_first(text, REGISTRAR)),
            Extractor::Statuses => FieldValue::Statuses(find_statuses(text)),
            Extractor::Tech => FieldValue::Tech(find_contact(text, &TECH)),
            Extractor::RateLimited => FieldValue::RateLimited(is_rate_limited(raw)),
        }
    }
}

pub fn find_abuse(text: &NormalizedText) -> AbuseInfo {
    AbuseInfo {
        email: find_first(text, ABUSE_EMAIL),
        telephone: find_first(text, ABUSE_TELEPHONE),
    }
}

pub fn find_contact(text: &NormalizedText, keywords: &ContactKeywords) -> ContactInfo {
    ContactInfo {
        organization: find_first(text, keywords.organization),
        email: find_first(text, keywords.email),
        name: find_first(text, keywords.name),
        telephone: find_first(text, keywords.telephone),
    }
}

/// Status codes, without the ICANN explanation URL that usually follows.
pub fn find_statuses(text: &NormalizedText) -> Vec<String> {
    let tokens = find_all(text, STATUSES).into_iter().filter_map(|value| {
        if value == NO_OBJECT_FOUND {
            Some(value)
        } else {
            value.split_whitespace().next().map(str::to_string)
        }
    });
    dedup(tokens)
}

/// Host names, lower-cased, without trailing glue addresses.
pub fn find_name_servers(text: &NormalizedText) -> Vec<String> {
    let hosts = find_all(text, NAME_SERVERS)
        .into_iter()
        .filter_map(|value| value.split_whitespace().next().map(str::to_lowercase));
    dedup(hosts)
}

pub fn is_rate_limited(raw: &str) -> bool {
    let raw = raw.trim();
    RATE_LIMIT_MARKERS.iter().any(|marker| raw.contains(marker))
}

// First occurrence wins, so output order is deterministic.
fn dedup(values: impl Iterator<Item = String>) -> Vec<String> {
    let mut unique: Vec<String> = Vec::new();
    for value in values {
        if !unique.contains(&value) {
            unique.push(value);
        }
    }
    unique
}
