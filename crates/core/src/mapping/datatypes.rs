//! CDA → FHIR data type conversions shared by the mappers.

use crate::constants::{CODE_SYSTEMS, UCUM_SYSTEM, URI_IDENTIFIER_SYSTEM};
use c2f_ids::Uuid;
use ccda::{CodedValue, InstanceIdentifier, PersonName, TimeInterval};
use chrono::{FixedOffset, NaiveDate, NaiveDateTime};
use fhir::{AdministrativeGender, CodeableConcept, Coding, HumanName, Identifier, Period, Quantity};

/// Canonical FHIR URI for a code system OID; unknown OIDs become `urn:oid:<oid>`.
pub fn code_system_uri(oid: &str) -> String {
    CODE_SYSTEMS
        .iter()
        .find(|(known, _)| *known == oid)
        .map(|(_, uri)| (*uri).to_string())
        .unwrap_or_else(|| format!("urn:oid:{oid}"))
}

/// Converts a CDA `TS` (`YYYY[MM[DD[HH[MM[SS[.S+]]]]]][+/-ZZZZ]`) to FHIR date/dateTime text.
///
/// Precision is preserved down to the day; times are rendered to the second. A zone offset is
/// kept for times and dropped for dates. Returns `None` for anything that is not a valid
/// calendar timestamp.
pub fn fhir_date_time(ts: &str) -> Option<String> {
    let (body, offset) = split_offset(ts.trim())?;
    let body = body.split_once('.').map_or(body, |(whole, _)| whole);
    if body.is_empty() || !body.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    match body.len() {
        4 => {
            let year: i32 = body.parse().ok()?;
            NaiveDate::from_ymd_opt(year, 1, 1)?;
            Some(body.to_string())
        }
        6 => {
            let date = NaiveDate::parse_from_str(&format!("{body}01"), "%Y%m%d").ok()?;
            Some(date.format("%Y-%m").to_string())
        }
        8 => {
            let date = NaiveDate::parse_from_str(body, "%Y%m%d").ok()?;
            Some(date.format("%Y-%m-%d").to_string())
        }
        10 | 12 | 14 => {
            let padded = format!("{body}{}", "0".repeat(14 - body.len()));
            let time = NaiveDateTime::parse_from_str(&padded, "%Y%m%d%H%M%S").ok()?;
            let mut text = time.format("%Y-%m-%dT%H:%M:%S").to_string();
            if let Some(offset) = offset {
                text.push_str(&offset);
            }
            Some(text)
        }
        _ => None,
    }
}

/// Like [`fhir_date_time`] but truncated to at most day precision.
pub fn fhir_date(ts: &str) -> Option<String> {
    fhir_date_time(ts).map(|text| text.chars().take(10).collect())
}

/// Splits a trailing `+HHMM`/`-HHMM` zone from a timestamp, rendering it as `+HH:MM`.
fn split_offset(ts: &str) -> Option<(&str, Option<String>)> {
    let Some(pos) = ts.find(|c: char| c == '+' || c == '-') else {
        return Some((ts, None));
    };
    let (body, zone) = ts.split_at(pos);

    if zone.len() != 5 || !zone[1..].bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let hours: i32 = zone[1..3].parse().ok()?;
    let minutes: i32 = zone[3..5].parse().ok()?;
    if minutes >= 60 {
        return None;
    }
    let sign = if zone.starts_with('-') { -1 } else { 1 };
    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))?;

    Some((body, Some(format!("{}{}:{}", &zone[..1], &zone[1..3], &zone[3..5]))))
}

pub(crate) fn period(interval: &TimeInterval) -> Option<Period> {
    let start = interval.start().and_then(fhir_date_time);
    let end = interval.high.as_deref().and_then(fhir_date_time);
    if start.is_none() && end.is_none() {
        return None;
    }
    Some(Period { start, end })
}

/// `urn:oid:` / `urn:uuid:` form of an identifier root; other roots are kept verbatim.
fn root_uri(root: &str) -> String {
    let root = root.trim();
    if !root.is_empty() && root.contains('.') && root.bytes().all(|b| b.is_ascii_digit() || b == b'.')
    {
        return format!("urn:oid:{root}");
    }
    match Uuid::parse_str(root) {
        Ok(uuid) => format!("urn:uuid:{}", uuid.hyphenated()),
        Err(_) => root.to_string(),
    }
}

/// `II` → `Identifier`. With an extension the root is the namespace; without one the root
/// alone identifies the instance and becomes a URI value.
pub(crate) fn identifier(ii: &InstanceIdentifier) -> Identifier {
    match ii.extension.as_deref() {
        Some(extension) => Identifier {
            system: Some(root_uri(&ii.root)),
            value: Some(extension.to_string()),
        },
        None => Identifier {
            system: Some(URI_IDENTIFIER_SYSTEM.to_string()),
            value: Some(root_uri(&ii.root)),
        },
    }
}

pub(crate) fn identifiers(ids: &[InstanceIdentifier]) -> Vec<Identifier> {
    ids.iter().map(identifier).collect()
}

/// `CD` → `CodeableConcept`, or `None` when the value carries nothing at all.
pub(crate) fn codeable_concept(cd: &CodedValue) -> Option<CodeableConcept> {
    let coding: Vec<Coding> = cd
        .code
        .as_ref()
        .map(|code| Coding {
            system: cd.code_system.as_deref().map(code_system_uri),
            code: Some(code.clone()),
            display: cd.display_name.clone(),
        })
        .into_iter()
        .collect();
    let text = cd.original_text.clone().or_else(|| {
        if coding.is_empty() {
            cd.display_name.clone()
        } else {
            None
        }
    });

    let concept = CodeableConcept { coding, text };
    (!concept.is_empty()).then_some(concept)
}

pub(crate) fn human_name(name: &PersonName) -> HumanName {
    let use_type = name.use_code.as_deref().and_then(|code| match code {
        "L" | "OR" => Some("official".to_string()),
        "P" => Some("nickname".to_string()),
        "C" => Some("usual".to_string()),
        _ => None,
    });

    HumanName {
        use_type,
        family: name.family.iter().cloned().collect(),
        given: name.given.clone(),
        prefix: name.prefix.clone(),
        suffix: name.suffix.clone(),
    }
}

pub(crate) fn address(address: &ccda::Address) -> fhir::Address {
    let use_type = address.use_code.as_deref().and_then(|code| match code {
        "H" | "HP" | "HV" => Some("home".to_string()),
        "WP" => Some("work".to_string()),
        "TMP" => Some("temp".to_string()),
        "OLD" | "BAD" => Some("old".to_string()),
        _ => None,
    });

    fhir::Address {
        use_type,
        line: address.street_address_lines.clone(),
        city: address.city.clone(),
        state: address.state.clone(),
        postal_code: address.postal_code.clone(),
        country: address.country.clone(),
    }
}

pub(crate) fn gender(code: &CodedValue) -> Option<AdministrativeGender> {
    match code.code.as_deref()? {
        "M" => Some(AdministrativeGender::Male),
        "F" => Some(AdministrativeGender::Female),
        "UN" => Some(AdministrativeGender::Other),
        _ => Some(AdministrativeGender::Unknown),
    }
}

pub(crate) fn quantity(value: Option<f64>, unit: Option<&str>) -> Quantity {
    Quantity {
        value,
        unit: unit.map(str::to_string),
        system: unit.map(|_| UCUM_SYSTEM.to_string()),
        code: unit.map(str::to_string),
    }
}
