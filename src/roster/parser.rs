//! Placement roster CSV parsing
//!
//! The roster is a spreadsheet export with one student per row. Rows
//! without a name or matric number are dropped, as are repeated matric
//! numbers (first occurrence wins).

use serde::Deserialize;
use std::collections::HashSet;
use std::io::Read;
use std::path::Path;
use tracing::{debug, warn};

use crate::errors::{RosterError, RosterResult};
use crate::models::Student;

pub const UNASSIGNED_COMPANY_ID: &str = "unassigned";
pub const UNASSIGNED_COMPANY_NAME: &str = "Unassigned";
const DEFAULT_LEVEL: u32 = 300;
const DEFAULT_DEPARTMENT: &str = "Computer Science";
const LINKEDIN_PEOPLE_SEARCH: &str = "https://www.linkedin.com/search/results/people/?keywords=";
const LINKEDIN_SCHOOL: &str = "Covenant University";

#[derive(Debug, Default, Deserialize)]
struct RosterRow {
    #[serde(rename = "NAME", default)]
    name: String,
    #[serde(rename = "MATRIC NO", default)]
    matric_no: String,
    #[serde(rename = "REG. NO.", default)]
    reg_no: String,
    #[serde(rename = "LEVEL", default)]
    level: String,
    #[serde(rename = "DEPARTMENT", default)]
    department: String,
    #[serde(rename = "COMPANY'S NAME", default)]
    company_name: String,
    #[serde(rename = "COMPANIES ADDRESS", default)]
    company_address: String,
    #[serde(rename = "STUDENTS' GSM NO", default)]
    phone: String,
    #[serde(rename = "PARENT GSM NO.", default)]
    parent_phone: String,
    #[serde(rename = "STUDENT EMAIL", default)]
    email: String,
}

/// URL-safe identifier for a company name
///
/// ```rust
/// use logo_resolver::roster::slugify;
///
/// assert_eq!(slugify("  Quidax Technologies Ltd. "), "quidax-technologies-ltd");
/// assert_eq!(slugify("Ernst & Young"), "ernst-young");
/// ```
pub fn slugify(text: &str) -> String {
    let kept: String = text
        .trim()
        .to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_' || *c == '-' || c.is_whitespace())
        .collect();

    let mut slug = String::with_capacity(kept.len());
    let mut in_separator = false;
    for c in kept.chars() {
        if c.is_whitespace() || c == '_' || c == '-' {
            in_separator = true;
        } else {
            if in_separator && !slug.is_empty() {
                slug.push('-');
            }
            in_separator = false;
            slug.push(c);
        }
    }
    slug
}

/// Keep digits only, restoring the leading zero of 10-digit local numbers
pub fn normalize_phone(phone: &str) -> String {
    let digits: String = phone.chars().filter(char::is_ascii_digit).collect();
    if digits.len() == 10 && !digits.starts_with('0') {
        format!("0{digits}")
    } else {
        digits
    }
}

fn parse_level(level: &str) -> u32 {
    let digits: String = level
        .trim()
        .chars()
        .take_while(char::is_ascii_digit)
        .collect();
    match digits.parse::<u32>() {
        Ok(level) if level > 0 => level,
        _ => DEFAULT_LEVEL,
    }
}

/// LinkedIn people search for a student's first two names at the school
pub fn linkedin_search_url(name: &str) -> String {
    let name = name.split_whitespace().take(2).collect::<Vec<_>>().join(" ");
    let query = format!("{name} {LINKEDIN_SCHOOL}");
    format!("{LINKEDIN_PEOPLE_SEARCH}{}", urlencoding::encode(query.trim()))
}

impl RosterRow {
    fn into_student(self) -> Student {
        let company_name = self.company_name.trim();
        let has_internship = !company_name.is_empty();
        let company_id = if has_internship {
            let slug = slugify(company_name);
            if slug.is_empty() {
                UNASSIGNED_COMPANY_ID.to_string()
            } else {
                slug
            }
        } else {
            UNASSIGNED_COMPANY_ID.to_string()
        };
        let department = match self.department.trim() {
            "" => DEFAULT_DEPARTMENT.to_string(),
            department => department.to_string(),
        };
        let matric_no = self.matric_no.trim().to_string();
        let name = self.name.trim().to_string();

        Student {
            id: matric_no.clone(),
            linkedin_url: linkedin_search_url(&name),
            name,
            matric_no,
            reg_no: self.reg_no.trim().to_string(),
            level: parse_level(&self.level),
            department,
            company_id,
            company_name: if has_internship {
                company_name.to_string()
            } else {
                UNASSIGNED_COMPANY_NAME.to_string()
            },
            company_address: self.company_address.trim().to_string(),
            email: self.email.trim().to_string(),
            phone: normalize_phone(&self.phone),
            parent_phone: normalize_phone(&self.parent_phone),
            has_internship,
        }
    }
}

/// Parse roster CSV text from any reader
pub fn parse_students<R: Read>(reader: R) -> RosterResult<Vec<Student>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let mut students = Vec::new();
    let mut seen_matric_nos = HashSet::new();

    for (line, row) in csv_reader.deserialize::<RosterRow>().enumerate() {
        let row = match row {
            Ok(row) => row,
            Err(e) if e.is_io_error() => return Err(RosterError::Csv(e)),
            Err(e) => {
                warn!("Skipping malformed roster row {}: {}", line + 2, e);
                continue;
            }
        };

        if row.name.trim().is_empty() || row.matric_no.trim().is_empty() {
            continue;
        }
        if !seen_matric_nos.insert(row.matric_no.trim().to_string()) {
            debug!("Skipping duplicate matric number {}", row.matric_no.trim());
            continue;
        }

        students.push(row.into_student());
    }

    Ok(students)
}

/// Parse a roster CSV file
pub fn load_students(path: &Path) -> RosterResult<Vec<Student>> {
    let file = std::fs::File::open(path).map_err(|source| RosterError::Io {
        path: path.display().to_string(),
        source,
    })?;
    parse_students(file)
}
