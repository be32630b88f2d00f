use anyhow::Context;
use async_trait::async_trait;

use super::BookingStore;
use crate::models::BookingRecord;

/// Supabase REST store. Inserts one row per booking into the configured
/// table; considered unconfigured when either the project URL or the key
/// is empty.
pub struct SupabaseStore {
    url: String,
    key: String,
    table: String,
    client: reqwest::Client,
}

impl SupabaseStore {
    pub fn new(url: String, key: String, table: String) -> Self {
        Self {
            url,
            key,
            table,
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl BookingStore for SupabaseStore {
    fn is_configured(&self) -> bool {
        !self.url.is_empty() && !self.key.is_empty()
    }

    async fn insert_booking(&self, record: &BookingRecord) -> anyhow::Result<()> {
        let endpoint = format!("{}/rest/v1/{}", self.url.trim_end_matches('/'), self.table);

        self.client
            .post(&endpoint)
            .header("apikey", &self.key)
            .bearer_auth(&self.key)
            .header("Prefer", "return=minimal")
            .json(record)
            .send()
            .await
            .context("failed to reach booking store")?
            .error_for_status()
            .context("booking store rejected insert")?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_configured_requires_url_and_key() {
        let store = SupabaseStore::new(String::new(), String::new(), "bookings".to_string());
        assert!(!store.is_configured());

        let store = SupabaseStore::new(
            "https://example.supabase.co".to_string(),
            String::new(),
            "bookings".to_string(),
        );
        assert!(!store.is_configured());

        let store = SupabaseStore::new(
            "https://example.supabase.co".to_string(),
            "anon-key".to_string(),
            "bookings".to_string(),
        );
        assert!(store.is_configured());
    }
}
