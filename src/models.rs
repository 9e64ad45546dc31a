use serde::{Deserialize, Serialize};

/// One person record as returned by the people search. Every field is
/// optional; absent fields receive defaults during normalization.
#[derive(Debug, Clone, Deserialize)]
pub struct RawPerson {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub title: Option<String>,
    pub email: Option<String>,
    pub email_status: Option<String>,
    pub linkedin_url: Option<String>,
    pub organization: Option<RawOrganization>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawOrganization {
    pub name: Option<String>,
    pub primary_domain: Option<String>,
    pub industry: Option<String>,
    pub estimated_num_employees: Option<u64>,
    pub linkedin_url: Option<String>,
}

/// Fixed output schema, one row per accepted contact. Field order is the CSV
/// column order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Lead {
    pub company_name: String,
    pub domain: String,
    pub industry: String,
    pub company_size: String,
    pub contact_name: String,
    pub job_title: Option<String>,
    pub work_email: String,
    pub linkedin_contact: String,
    pub linkedin_company: String,
    pub source: String,
    pub email_status: String,
    pub last_verified: String,
}
