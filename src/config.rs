use std::env;

/// What to do about the single persistence write at submission time.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PersistPolicy {
    /// Fire-and-forget (the default): the write runs detached and the
    /// confirmation response says nothing about it.
    Detached,
    /// Await the write and report `persisted` in the confirmation
    /// response. Confirmation still succeeds either way.
    Report,
}

impl PersistPolicy {
    fn parse(s: &str) -> Self {
        match s {
            "report" => PersistPolicy::Report,
            _ => PersistPolicy::Detached,
        }
    }
}

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub port: u16,
    pub supabase_url: String,
    pub supabase_key: String,
    pub bookings_table: String,
    pub persist_policy: PersistPolicy,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self {
            port: env::var("PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3000),
            supabase_url: env::var("SUPABASE_URL").unwrap_or_default(),
            supabase_key: env::var("SUPABASE_ANON_KEY").unwrap_or_default(),
            bookings_table: env::var("BOOKINGS_TABLE").unwrap_or_else(|_| "bookings".to_string()),
            persist_policy: PersistPolicy::parse(
                &env::var("PERSIST_POLICY").unwrap_or_default(),
            ),
        }
    }
}
