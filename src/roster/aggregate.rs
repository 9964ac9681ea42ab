//! Company aggregation and dashboard metrics over parsed students

use std::collections::HashMap;

use crate::models::{
    Company, CompanyBadge, CompanyFilter, CompanyLogoGap, DashboardStats, Industry,
    IndustryMetric, LocationMetric, Student,
};
use crate::services::LogoCacheEntry;
use crate::utils::normalize_company_name;

const DEFAULT_CITY: &str = "Lagos";
const UNKNOWN_CITY: &str = "Unknown";
const DEFAULT_STATE: &str = "Lagos";
const DEFAULT_TOP_INDUSTRY: &str = "IT & Consulting";
const NO_COMPANY: &str = "N/A";
const TOP_COMPANIES: usize = 3;

/// Address keyword -> city; state names map to their major city
const CITY_KEYWORDS: &[(&str, &str)] = &[
    ("lagos", "Lagos"),
    ("abuja", "Abuja"),
    ("port harcourt", "Port Harcourt"),
    ("ibadan", "Ibadan"),
    ("kaduna", "Kaduna"),
    ("warri", "Warri"),
    ("delta", "Warri"),
    ("ogun", "Lagos"),
    ("rivers", "Port Harcourt"),
    ("akure", "Akure"),
];

const STATE_KEYWORDS: &[(&str, &[&str])] = &[
    ("Lagos", &["lagos"]),
    ("Abuja", &["abuja", "fct"]),
    ("Rivers", &["rivers", "port harcourt"]),
    ("Oyo", &["oyo", "ibadan"]),
    ("Kaduna", &["kaduna"]),
    ("Delta", &["delta", "warri"]),
    ("Ogun", &["ogun", "abeokuta"]),
];

const INDUSTRY_KEYWORDS: &[(Industry, &[&str])] = &[
    (
        Industry::BankingFintech,
        &[
            "bank", "fintech", "payment", "cowry", "quidax", "payaza", "moniepoint", "credit",
            "microfinance",
        ],
    ),
    (
        Industry::ItConsulting,
        &[
            "tech", "software", "systems", "digital", "innovation", "consulting", "hiit",
            "interswitch",
        ],
    ),
    (
        Industry::Telecommunications,
        &["telecom", "tizeti", "ipnx", "network"],
    ),
    (
        Industry::EnergyOilGas,
        &["nnpc", "oil", "gas", "energy", "total", "petroleum"],
    ),
    (
        Industry::Government,
        &["faan", "nimasa", "statistics", "authority", "federal"],
    ),
    (
        Industry::Manufacturing,
        &["nestle", "tobacco", "manufacturing", "emzor"],
    ),
    (
        Industry::Education,
        &["college", "university", "niit", "sqi", "aptech"],
    ),
];

/// City named in an address, `Unknown` when blank and `Lagos` when unrecognized
pub fn extract_city(address: &str) -> String {
    let address = address.trim().to_lowercase();
    if address.is_empty() {
        return UNKNOWN_CITY.to_string();
    }
    CITY_KEYWORDS
        .iter()
        .find(|(keyword, _)| address.contains(keyword))
        .map_or(DEFAULT_CITY, |(_, city)| city)
        .to_string()
}

pub fn extract_state(address: &str) -> String {
    let address = address.trim().to_lowercase();
    STATE_KEYWORDS
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|keyword| address.contains(keyword)))
        .map_or(DEFAULT_STATE, |(state, _)| state)
        .to_string()
}

/// Industry guessed from keywords in the company name
pub fn detect_industry(company_name: &str) -> Industry {
    let name = company_name.to_lowercase();
    INDUSTRY_KEYWORDS
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|keyword| name.contains(keyword)))
        .map_or(Industry::Other, |(industry, _)| *industry)
}

fn company_tags(company: &Company) -> Vec<String> {
    let mut tags = vec![company.city.clone(), company.industry.to_string()];
    match company.badge {
        CompanyBadge::Popular => tags.push("Popular".to_string()),
        CompanyBadge::Validated => tags.push("Validated".to_string()),
        CompanyBadge::Emerging => {}
    }
    tags
}

/// Group placed students by company slug and rank the result
pub fn aggregate_companies(students: &[Student]) -> Vec<Company> {
    let mut companies: Vec<Company> = Vec::new();
    let mut positions: HashMap<&str, usize> = HashMap::new();

    for student in students.iter().filter(|s| s.has_internship) {
        let position = *positions.entry(&student.company_id).or_insert_with(|| {
            companies.push(Company {
                id: student.company_id.clone(),
                name: student.company_name.clone(),
                name_variations: vec![student.company_name.clone()],
                address: student.company_address.clone(),
                city: extract_city(&student.company_address),
                state: extract_state(&student.company_address),
                intern_count: 0,
                student_ids: Vec::new(),
                industry: detect_industry(&student.company_name),
                tags: Vec::new(),
                rank: 0,
                badge: CompanyBadge::Emerging,
            });
            companies.len() - 1
        });

        let company = &mut companies[position];
        company.intern_count += 1;
        company.student_ids.push(student.id.clone());
        if !company.name_variations.contains(&student.company_name) {
            company.name_variations.push(student.company_name.clone());
        }
    }

    companies.sort_by(|a, b| {
        b.intern_count
            .cmp(&a.intern_count)
            .then_with(|| a.name.to_lowercase().cmp(&b.name.to_lowercase()))
            .then_with(|| a.name.cmp(&b.name))
    });

    for (index, company) in companies.iter_mut().enumerate() {
        company.rank = index + 1;
        company.badge = CompanyBadge::for_intern_count(company.intern_count);
        company.tags = company_tags(company);
    }

    companies
}

/// Sum counts per key, keeping first-seen order
fn tally<K: PartialEq + Copy>(items: impl Iterator<Item = (K, usize)>) -> Vec<(K, usize)> {
    let mut totals: Vec<(K, usize)> = Vec::new();
    for (key, count) in items {
        match totals.iter_mut().find(|(k, _)| *k == key) {
            Some((_, total)) => *total += count,
            None => totals.push((key, count)),
        }
    }
    totals
}

/// First key with the highest count; earlier keys win ties
fn leader<K: Copy>(totals: &[(K, usize)]) -> Option<K> {
    let mut best: Option<(K, usize)> = None;
    for &(key, count) in totals {
        if best.is_none_or(|(_, best_count)| count > best_count) {
            best = Some((key, count));
        }
    }
    best.map(|(key, _)| key)
}

pub fn dashboard_stats(students: &[Student], companies: &[Company]) -> DashboardStats {
    let placed = students.iter().filter(|s| s.has_internship).count();

    let industries = tally(companies.iter().map(|c| (c.industry, c.intern_count)));
    let cities = tally(companies.iter().map(|c| (c.city.as_str(), c.intern_count)));

    DashboardStats {
        total_students: placed,
        total_companies: companies.len(),
        average_interns_per_company: if companies.is_empty() {
            0.0
        } else {
            placed as f64 / companies.len() as f64
        },
        top_industry: leader(&industries)
            .map_or_else(|| DEFAULT_TOP_INDUSTRY.to_string(), |i| i.to_string()),
        top_city: leader(&cities).unwrap_or(DEFAULT_CITY).to_string(),
        most_popular_company: companies
            .first()
            .map_or_else(|| NO_COMPANY.to_string(), |c| c.name.clone()),
    }
}

/// Intern share per industry, largest first
pub fn industry_metrics(companies: &[Company]) -> Vec<IndustryMetric> {
    let mut metrics: Vec<IndustryMetric> = Vec::new();
    for company in companies {
        let metric = match metrics.iter().position(|m| m.name == company.industry) {
            Some(position) => &mut metrics[position],
            None => {
                metrics.push(IndustryMetric {
                    name: company.industry,
                    count: 0,
                    percentage: 0.0,
                    top_companies: Vec::new(),
                });
                let last = metrics.len() - 1;
                &mut metrics[last]
            }
        };
        metric.count += company.intern_count;
        if metric.top_companies.len() < TOP_COMPANIES {
            metric.top_companies.push(company.name.clone());
        }
    }

    let total: usize = metrics.iter().map(|m| m.count).sum();
    for metric in &mut metrics {
        metric.percentage = if total == 0 {
            0.0
        } else {
            metric.count as f64 / total as f64 * 100.0
        };
    }

    metrics.sort_by(|a, b| b.count.cmp(&a.count));
    metrics
}

/// Interns per city, largest first
pub fn location_metrics(companies: &[Company]) -> Vec<LocationMetric> {
    let mut metrics: Vec<LocationMetric> = Vec::new();
    for company in companies {
        let metric = match metrics.iter().position(|m| m.city == company.city) {
            Some(position) => &mut metrics[position],
            None => {
                metrics.push(LocationMetric {
                    city: company.city.clone(),
                    state: company.state.clone(),
                    count: 0,
                    top_companies: Vec::new(),
                });
                let last = metrics.len() - 1;
                &mut metrics[last]
            }
        };
        metric.count += company.intern_count;
        if metric.top_companies.len() < TOP_COMPANIES
            && !metric.top_companies.contains(&company.name)
        {
            metric.top_companies.push(company.name.clone());
        }
    }

    metrics.sort_by(|a, b| b.count.cmp(&a.count));
    metrics
}

/// Students matching by name, company, e-mail or matric number
///
/// Name-prefix matches come first; relative order is otherwise preserved.
pub fn search_students<'a>(students: &'a [Student], query: &str) -> Vec<&'a Student> {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return students.iter().collect();
    }

    let mut matches: Vec<&Student> = students
        .iter()
        .filter(|s| {
            s.name.to_lowercase().contains(&query)
                || s.company_name.to_lowercase().contains(&query)
                || s.email.to_lowercase().contains(&query)
                || s.matric_no.to_lowercase().contains(&query)
        })
        .collect();
    matches.sort_by_key(|s| !s.name.to_lowercase().starts_with(&query));
    matches
}

/// Companies whose name or any spelling variation contains `query`
pub fn search_companies<'a>(companies: &'a [Company], query: &str) -> Vec<&'a Company> {
    let query = query.trim().to_lowercase();
    companies
        .iter()
        .filter(|c| {
            query.is_empty()
                || c.name_variations
                    .iter()
                    .chain(std::iter::once(&c.name))
                    .any(|name| name.to_lowercase().contains(&query))
        })
        .collect()
}

pub fn filter_companies<'a>(
    companies: impl IntoIterator<Item = &'a Company>,
    filter: &CompanyFilter,
) -> Vec<&'a Company> {
    companies
        .into_iter()
        .filter(|c| filter.industry.is_none_or(|industry| c.industry == industry))
        .filter(|c| {
            filter
                .city
                .as_deref()
                .is_none_or(|city| c.city.eq_ignore_ascii_case(city.trim()))
        })
        .filter(|c| filter.min_interns.is_none_or(|min| c.intern_count >= min))
        .collect()
}

/// Roster companies with no usable cached logo, most interns first
///
/// Counts come from the raw company spellings so each spelling that needs
/// its own cache entry is listed. `n/a` and `none` placeholders are ignored.
pub fn companies_without_logos(
    students: &[Student],
    cache: &HashMap<String, LogoCacheEntry>,
) -> Vec<CompanyLogoGap> {
    let counts = tally(
        students
            .iter()
            .filter(|s| s.has_internship)
            .map(|s| s.company_name.trim())
            .filter(|name| {
                let lower = name.to_lowercase();
                !name.is_empty() && lower != "n/a" && lower != "none"
            })
            .map(|name| (name, 1)),
    );

    let mut gaps: Vec<CompanyLogoGap> = counts
        .into_iter()
        .filter_map(|(name, intern_count)| {
            let entry = cache.get(&normalize_company_name(name));
            match entry {
                Some(entry) if entry.has_url() => None,
                _ => Some(CompanyLogoGap {
                    name: name.to_string(),
                    intern_count,
                    current_logo: entry
                        .map(|e| e.url.clone())
                        .filter(|url| !url.is_empty() && url != "null"),
                }),
            }
        })
        .collect();

    gaps.sort_by(|a, b| b.intern_count.cmp(&a.intern_count));
    gaps
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::LogoSource;
    use rstest::rstest;

    fn student(id: &str, name: &str, company: &str, address: &str) -> Student {
        let has_internship = !company.is_empty();
        Student {
            id: id.to_string(),
            name: name.to_string(),
            matric_no: id.to_string(),
            reg_no: String::new(),
            level: 300,
            department: "Computer Science".to_string(),
            company_id: if has_internship {
                crate::roster::slugify(company)
            } else {
                "unassigned".to_string()
            },
            company_name: if has_internship { company } else { "Unassigned" }.to_string(),
            company_address: address.to_string(),
            email: format!("{}@example.com", name.to_lowercase().replace(' ', ".")),
            phone: String::new(),
            parent_phone: String::new(),
            has_internship,
            linkedin_url: crate::roster::linkedin_search_url(name),
        }
    }

    fn roster() -> Vec<Student> {
        vec![
            student("1", "Ada Obi", "Quidax", "Lekki, Lagos"),
            student("2", "Bola Ade", "quidax", "Lekki, Lagos"),
            student("3", "Chi Eze", "Interswitch", "Victoria Island, Lagos"),
            student("4", "Dayo Ola", "NNPC", "Central Area, Abuja FCT"),
            student("5", "Efe Uche", "Quidax", "Lagos"),
            student("6", "Femi Ojo", "", ""),
            student("7", "Ada Nwosu", "Interswitch", "Lagos"),
        ]
    }

    #[rstest]
    #[case("12 Trans Amadi, Port Harcourt", "Port Harcourt")]
    #[case("Effurun, Delta State", "Warri")]
    #[case("Abeokuta, OGUN", "Lagos")]
    #[case("Garki, ABUJA", "Abuja")]
    #[case("Somewhere else", "Lagos")]
    #[case("   ", "Unknown")]
    fn test_extract_city(#[case] address: &str, #[case] city: &str) {
        assert_eq!(extract_city(address), city);
    }

    #[rstest]
    #[case("Plot 1, FCT", "Abuja")]
    #[case("Ibadan", "Oyo")]
    #[case("Warri", "Delta")]
    #[case("", "Lagos")]
    fn test_extract_state(#[case] address: &str, #[case] state: &str) {
        assert_eq!(extract_state(address), state);
    }

    #[rstest]
    #[case("Moniepoint MFB", Industry::BankingFintech)]
    #[case("Interswitch Group", Industry::ItConsulting)]
    #[case("Tizeti Networks", Industry::Telecommunications)]
    #[case("NNPC Limited", Industry::EnergyOilGas)]
    #[case("Nigerian Ports Authority", Industry::Government)]
    #[case("Emzor Pharmaceuticals", Industry::Manufacturing)]
    #[case("Yaba College", Industry::Education)]
    #[case("Andela", Industry::Other)]
    fn test_detect_industry(#[case] name: &str, #[case] industry: Industry) {
        assert_eq!(detect_industry(name), industry);
    }

    #[test]
    fn test_aggregate_ranks_and_badges() {
        let companies = aggregate_companies(&roster());
        let names: Vec<_> = companies.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Quidax", "Interswitch", "NNPC"]);

        let quidax = &companies[0];
        assert_eq!(quidax.intern_count, 3);
        assert_eq!(quidax.rank, 1);
        assert_eq!(quidax.badge, CompanyBadge::Validated);
        assert_eq!(quidax.name_variations, vec!["Quidax", "quidax"]);
        assert_eq!(quidax.student_ids, vec!["1", "2", "5"]);
        assert_eq!(quidax.tags, vec!["Lagos", "Banking & Fintech", "Validated"]);

        let nnpc = &companies[2];
        assert_eq!(nnpc.badge, CompanyBadge::Emerging);
        assert_eq!(nnpc.city, "Abuja");
        assert_eq!(nnpc.tags.len(), 2);
    }

    #[test]
    fn test_ties_break_alphabetically() {
        let students = vec![
            student("1", "A", "zeta", "Lagos"),
            student("2", "B", "Alpha", "Lagos"),
        ];
        let companies = aggregate_companies(&students);
        assert_eq!(companies[0].name, "Alpha");
        assert_eq!(companies[1].rank, 2);
    }

    #[test]
    fn test_dashboard_stats() {
        let students = roster();
        let companies = aggregate_companies(&students);
        let stats = dashboard_stats(&students, &companies);

        assert_eq!(stats.total_students, 6);
        assert_eq!(stats.total_companies, 3);
        assert!((stats.average_interns_per_company - 2.0).abs() < f64::EPSILON);
        assert_eq!(stats.top_industry, "Banking & Fintech");
        assert_eq!(stats.top_city, "Lagos");
        assert_eq!(stats.most_popular_company, "Quidax");
    }

    #[test]
    fn test_dashboard_stats_defaults_when_empty() {
        let stats = dashboard_stats(&[], &[]);
        assert_eq!(stats.top_industry, "IT & Consulting");
        assert_eq!(stats.top_city, "Lagos");
        assert_eq!(stats.most_popular_company, "N/A");
        assert_eq!(stats.average_interns_per_company, 0.0);
    }

    #[test]
    fn test_industry_and_location_metrics() {
        let companies = aggregate_companies(&roster());

        let industries = industry_metrics(&companies);
        assert_eq!(industries[0].name, Industry::BankingFintech);
        assert_eq!(industries[0].count, 3);
        assert!((industries[0].percentage - 50.0).abs() < 1e-9);
        let total: f64 = industries.iter().map(|m| m.percentage).sum();
        assert!((total - 100.0).abs() < 1e-9);

        let locations = location_metrics(&companies);
        assert_eq!(locations[0].city, "Lagos");
        assert_eq!(locations[0].count, 5);
        assert_eq!(locations[0].top_companies, vec!["Quidax", "Interswitch"]);
        assert_eq!(locations[1].state, "Abuja");
    }

    #[test]
    fn test_search_students_prefers_name_prefix() {
        let students = roster();
        let found = search_students(&students, "ada");
        let ids: Vec<_> = found.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "7"]);

        let found = search_students(&students, "b");
        let ids: Vec<_> = found.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["2", "1"]);

        assert_eq!(search_students(&students, "  ").len(), students.len());
        assert_eq!(search_students(&students, "nnpc")[0].id, "4");
    }

    #[test]
    fn test_search_and_filter_companies() {
        let companies = aggregate_companies(&roster());

        assert_eq!(search_companies(&companies, "QUID").len(), 1);

        let lagos = filter_companies(
            &companies,
            &CompanyFilter {
                city: Some("lagos".to_string()),
                ..CompanyFilter::default()
            },
        );
        assert_eq!(lagos.len(), 2);

        let busy = filter_companies(
            &companies,
            &CompanyFilter {
                industry: Some(Industry::BankingFintech),
                min_interns: Some(3),
                ..CompanyFilter::default()
            },
        );
        assert_eq!(busy.len(), 1);
        assert_eq!(busy[0].id, "quidax");
    }

    #[test]
    fn test_companies_without_logos() {
        let mut students = roster();
        students.push(student("8", "Gbenga", "N/A", "Lagos"));

        let mut cache = HashMap::new();
        cache.insert(
            "quidax".to_string(),
            LogoCacheEntry::new("https://q/logo.png", LogoSource::Clearbit, "QU"),
        );
        cache.insert(
            "interswitch".to_string(),
            LogoCacheEntry::new("", LogoSource::Unknown, "IN"),
        );

        let gaps = companies_without_logos(&students, &cache);
        let names: Vec<_> = gaps.iter().map(|g| g.name.as_str()).collect();
        assert_eq!(names, vec!["Interswitch", "NNPC"]);
        assert_eq!(gaps[0].intern_count, 2);
        assert_eq!(gaps[0].current_logo, None);
    }
}
