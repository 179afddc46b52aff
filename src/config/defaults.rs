//! Default values for configuration fields.
//!
//! These functions are used by serde for default deserialization.

// ============================================================================
// Common Defaults
// ============================================================================

pub fn r#true() -> bool {
    true
}

// ============================================================================
// [site] Section Defaults
// ============================================================================

pub mod site {
    pub fn name() -> String {
        "Dominica News".into()
    }

    pub fn url() -> String {
        "https://dominicanews.com".into()
    }

    pub fn description() -> String {
        "Breaking news, politics, weather, sports and entertainment from the Commonwealth of Dominica and the Caribbean.".into()
    }

    pub fn default_image() -> String {
        "/images/og-default.jpg".into()
    }

    pub fn twitter() -> String {
        "@DominicaNews".into()
    }

    pub fn language() -> String {
        "en".into()
    }

    pub fn locale() -> String {
        "en_US".into()
    }
}

// ============================================================================
// [organization] Section Defaults
// ============================================================================

pub mod organization {
    pub fn name() -> String {
        "Dominica News".into()
    }

    pub fn logo() -> String {
        "/images/logo.png".into()
    }

    pub fn country() -> String {
        "DM".into()
    }
}

// ============================================================================
// [geo] Section Defaults
// ============================================================================

pub mod geo {
    pub fn region() -> String {
        "DM".into()
    }

    pub fn placename() -> String {
        "Dominica".into()
    }

    pub fn position() -> String {
        "15.414999;-61.370976".into()
    }
}

// ============================================================================
// [output] Section Defaults
// ============================================================================

pub mod output {
    use std::path::PathBuf;

    pub fn sitemap() -> PathBuf {
        "public/news-sitemap.xml".into()
    }

    pub fn feed() -> PathBuf {
        "public/feed.xml".into()
    }

    pub fn news_window_hours() -> i64 {
        48
    }
}
