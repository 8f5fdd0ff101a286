use std::time::Duration;

/// PostgREST mount point under the project URL.
pub const REST_PATH: &str = "/rest/v1";

pub const LISTINGS_TABLE: &str = "franchises";
pub const CATEGORIES_TABLE: &str = "franchise_categories";
pub const INSIGHTS_TABLE: &str = "industry_insights";
pub const LIKES_TABLE: &str = "user_likes";
pub const COLLECTIONS_TABLE: &str = "user_collections";
pub const COMPARISONS_TABLE: &str = "franchise_comparisons";
pub const QUESTIONS_TABLE: &str = "ai_questions";

/// Tables tried in order by the universal record fetcher. Older
/// deployments stored listings under one of the alternate names.
pub const RECORD_TABLES: &[&str] = &["franchise_brands", "franchise_data", "franchises", "brands"];

/// Tables tried by single-listing lookup after the primary table fails.
pub const LOOKUP_FALLBACK_TABLES: &[&str] = &["franchise_brands", "franchise_data"];

/// Embedded joins requested with every listing so the resolver can fall
/// back to nested collections.
pub const LISTING_SELECT: &str = "*,franchise_categories(name),franchise_investments(*),\
franchise_locations(*),franchise_fees(*),franchise_support(*)";

/// Version of the listing field/alias contract implemented by
/// [`crate::resolver`]. Bump when the backend schema changes the table.
pub const LISTING_SCHEMA_VERSION: u32 = 1;

pub const COMPARE_LIMIT: usize = 3;
pub const DEFAULT_CATEGORY: &str = "Other";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

pub const ENV_URL: &str = "SUPABASE_URL";
pub const ENV_ANON_KEY: &str = "SUPABASE_ANON_KEY";
pub const ENV_URL_LEGACY: &str = "VITE_SUPABASE_URL";
pub const ENV_ANON_KEY_LEGACY: &str = "VITE_SUPABASE_ANON_KEY";

pub const PLACEHOLDER_URL: &str = "https://your-project.supabase.co";
pub const PLACEHOLDER_ANON_KEY: &str = "your-anon-key";

/// Read the first non-empty environment variable among `names`.
pub fn env_first(names: &[&str]) -> Option<String> {
    names
        .iter()
        .filter_map(|n| std::env::var(n).ok())
        .map(|v| v.trim().to_string())
        .find(|v| !v.is_empty())
}

/// Join the project URL and the REST mount point, tolerating a trailing slash.
pub fn rest_base(project_url: &str) -> String {
    format!("{}{}", project_url.trim_end_matches('/'), REST_PATH)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rest_base_strips_trailing_slash() {
        assert_eq!(rest_base("https://x.supabase.co/"), "https://x.supabase.co/rest/v1");
        assert_eq!(rest_base("http://127.0.0.1:1234"), "http://127.0.0.1:1234/rest/v1");
    }

    #[test]
    fn listing_select_embeds_every_nested_collection() {
        for join in [
            "franchise_categories(name)",
            "franchise_investments(*)",
            "franchise_locations(*)",
            "franchise_fees(*)",
            "franchise_support(*)",
        ] {
            assert!(LISTING_SELECT.contains(join), "missing {join}");
        }
    }
}
