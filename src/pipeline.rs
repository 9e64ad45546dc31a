use anyhow::Result;
use log::info;
use std::collections::HashSet;
use std::time::Duration as StdDuration;
use tokio::time::sleep;

use crate::apollo::ApolloClient;
use crate::models::{Lead, RawPerson};

const NA: &str = "N/A";
const DEFAULT_INDUSTRY: &str = "AEC";
const SOURCE_LABEL: &str = "Apollo API";
const UNKNOWN_STATUS: &str = "unknown";

pub struct RunSettings {
    pub target_leads: usize,
    pub per_page: u32,
    pub page_delay_ms: u64,
    /// 0 = no cap
    pub max_pages: u32,
}

/// Drive the paged search until the target is reached or the search is
/// exhausted. Leads are deduplicated by work email as they arrive; the final
/// collection is trimmed to exactly the target.
pub async fn run(client: &ApolloClient, settings: &RunSettings) -> Result<Vec<Lead>> {
    let run_date = chrono::Utc::now().format("%Y-%m-%d").to_string();
    let mut acc = LeadAccumulator::new(settings.target_leads);
    let mut page = 1u32;
    while !acc.is_full() {
        if settings.max_pages > 0 && page > settings.max_pages {
            info!("page cap {} reached; stopping", settings.max_pages);
            break;
        }
        info!("fetching page {} (current count: {})", page, acc.len());
        let people = client.search_page(page, settings.per_page).await?;
        if people.is_empty() {
            info!("no more results");
            break;
        }
        let accepted = acc.absorb_page(&people, &run_date);
        info!(
            "page {}: {} records, {} accepted, {} collected",
            page,
            people.len(),
            accepted,
            acc.len()
        );
        page += 1;
        sleep(StdDuration::from_millis(settings.page_delay_ms)).await;
    }
    Ok(acc.finish())
}

/// Ordered lead buffer plus the set of emails already admitted this run.
pub struct LeadAccumulator {
    leads: Vec<Lead>,
    seen_emails: HashSet<String>,
    target: usize,
}

impl LeadAccumulator {
    pub fn new(target: usize) -> Self {
        Self {
            leads: Vec::new(),
            seen_emails: HashSet::new(),
            target,
        }
    }

    pub fn len(&self) -> usize {
        self.leads.len()
    }

    pub fn is_full(&self) -> bool {
        self.leads.len() >= self.target
    }

    /// Admit every record with a fresh work email, in arrival order. Records
    /// without an email and repeat emails are skipped silently. Returns the
    /// number accepted.
    pub fn absorb_page(&mut self, people: &[RawPerson], run_date: &str) -> usize {
        let mut accepted = 0;
        for person in people {
            let email = person.email.as_deref().unwrap_or(NA);
            if email == NA || self.seen_emails.contains(email) {
                continue;
            }
            self.seen_emails.insert(email.to_string());
            self.leads.push(normalize(person, run_date));
            accepted += 1;
        }
        accepted
    }

    /// Consume the accumulator, trimming any overshoot from the last page.
    /// A shorter-than-target collection is returned as-is.
    pub fn finish(mut self) -> Vec<Lead> {
        self.leads.truncate(self.target);
        self.leads
    }
}

/// Map one raw record onto the fixed output schema. Absent organization
/// fields fall back to "N/A" ("AEC" for industry); the job title passes
/// through untouched.
pub fn normalize(person: &RawPerson, run_date: &str) -> Lead {
    let org = person.organization.as_ref();
    Lead {
        company_name: field_or_na(org.and_then(|o| o.name.as_deref())),
        domain: field_or_na(org.and_then(|o| o.primary_domain.as_deref())),
        industry: org
            .and_then(|o| o.industry.clone())
            .unwrap_or_else(|| DEFAULT_INDUSTRY.to_string()),
        company_size: org
            .and_then(|o| o.estimated_num_employees)
            .map(|n| n.to_string())
            .unwrap_or_else(|| NA.to_string()),
        contact_name: contact_name(person.first_name.as_deref(), person.last_name.as_deref()),
        job_title: person.title.clone(),
        work_email: field_or_na(person.email.as_deref()),
        linkedin_contact: field_or_na(person.linkedin_url.as_deref()),
        linkedin_company: field_or_na(org.and_then(|o| o.linkedin_url.as_deref())),
        source: SOURCE_LABEL.to_string(),
        email_status: person
            .email_status
            .clone()
            .unwrap_or_else(|| UNKNOWN_STATUS.to_string()),
        last_verified: run_date.to_string(),
    }
}

fn field_or_na(value: Option<&str>) -> String {
    value.map(|v| v.to_string()).unwrap_or_else(|| NA.to_string())
}

// Join whatever name parts are present; never embed a placeholder token
// inside a composed name.
fn contact_name(first: Option<&str>, last: Option<&str>) -> String {
    match (first, last) {
        (Some(f), Some(l)) => format!("{} {}", f, l),
        (Some(f), None) => f.to_string(),
        (None, Some(l)) => l.to_string(),
        (None, None) => NA.to_string(),
    }
}
