use anyhow::Result;
use serde::Deserialize;
use serde_json::{json, Value as JsonValue};
use std::time::Duration as StdDuration;

use crate::models::RawPerson;

const SEARCH_URL: &str = "https://api.apollo.io/v1/mixed_people/search";

// Fixed search filter: executive titles at mid-size AEC companies in the US
// and Canada.
const PERSON_TITLES: [&str; 6] = [
    "CEO",
    "Chief Executive Officer",
    "COO",
    "Chief Operating Officer",
    "CFO",
    "Chief Financial Officer",
];
const EMPLOYEE_RANGES: [&str; 2] = ["200,500", "500,1000"];
const PERSON_LOCATIONS: [&str; 2] = ["United States", "Canada"];
const KEYWORD_TAGS: [&str; 4] = [
    "construction",
    "architecture & planning",
    "civil engineering",
    "commercial real estate",
];

#[derive(Deserialize)]
struct SearchResponse {
    people: Option<Vec<RawPerson>>,
}

pub struct ApolloClient {
    http: reqwest::Client,
    api_key: String,
}

impl ApolloClient {
    pub fn new(api_key: String) -> Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent("leads-fetcher/0.1")
            .timeout(StdDuration::from_secs(30))
            .build()?;
        Ok(Self { http, api_key })
    }

    /// Fetch one page of search results. An empty vec means the search is
    /// exhausted. Any transport error or non-success status aborts the run.
    pub async fn search_page(&self, page: u32, per_page: u32) -> Result<Vec<RawPerson>> {
        let resp = self
            .http
            .post(SEARCH_URL)
            .header("X-Api-Key", &self.api_key)
            .json(&search_body(page, per_page))
            .send()
            .await?;
        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            anyhow::bail!("apollo search error {}: {}", status, body);
        }
        let parsed: SearchResponse = resp.json().await?;
        Ok(parsed.people.unwrap_or_default())
    }
}

fn search_body(page: u32, per_page: u32) -> JsonValue {
    json!({
        "page": page,
        "per_page": per_page,
        "person_titles": PERSON_TITLES,
        "organization_num_employees_ranges": EMPLOYEE_RANGES,
        "person_locations": PERSON_LOCATIONS,
        "q_organization_keyword_tags": KEYWORD_TAGS,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_body_carries_paging_and_filters() {
        let body = search_body(3, 50);
        assert_eq!(body["page"], 3);
        assert_eq!(body["per_page"], 50);
        assert_eq!(body["person_titles"].as_array().unwrap().len(), 6);
        assert_eq!(body["organization_num_employees_ranges"][0], "200,500");
        assert_eq!(body["person_locations"][1], "Canada");
        assert_eq!(body["q_organization_keyword_tags"][2], "civil engineering");
        // The key travels in a header, never in the body.
        assert!(body.get("api_key").is_none());
    }

    #[test]
    fn parses_people_list_with_extra_fields() {
        let raw = r#"{
            "pagination": {"page": 1, "per_page": 50, "total_entries": 2},
            "people": [
                {
                    "id": "p1",
                    "first_name": "Ada",
                    "last_name": "Quinn",
                    "email": "ada@acme.test",
                    "organization": {"name": "Acme", "estimated_num_employees": 320}
                },
                {"id": "p2", "first_name": "Bo"}
            ]
        }"#;
        let parsed: SearchResponse = serde_json::from_str(raw).unwrap();
        let people = parsed.people.unwrap();
        assert_eq!(people.len(), 2);
        assert_eq!(people[0].email.as_deref(), Some("ada@acme.test"));
        let org = people[0].organization.as_ref().unwrap();
        assert_eq!(org.estimated_num_employees, Some(320));
        assert!(people[1].email.is_none());
    }

    #[test]
    fn missing_people_field_means_exhausted() {
        let parsed: SearchResponse = serde_json::from_str(r#"{"pagination": {}}"#).unwrap();
        assert!(parsed.people.unwrap_or_default().is_empty());
    }
}
