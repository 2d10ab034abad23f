use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Fixed identity of the singleton settings document.
pub const SETTINGS_ID: &str = "site_settings";

/// A subscription plan as shown on the pricing section, in display order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricingPlan {
    /// Duration label, e.g. "3 Months". Not unique.
    pub duration: String,
    pub price: String,
    /// Crossed-out price
    pub original: String,
    /// Effective monthly price
    pub monthly: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub featured: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub best_value: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Faq {
    pub q: String,
    pub a: String,
}

/// The site settings document edited from the admin page.
///
/// Keys the service doesn't know about are kept in `extra` so that a newer
/// admin page can store fields before the service learns about them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteSettings {
    pub id: String,
    // Banner
    pub show_update_banner: bool,
    pub banner_text: String,
    pub banner_link: String,
    // Hero
    pub hero_title1: String,
    pub hero_title2: String,
    pub hero_subtitle: String,
    // Stats
    pub stat_channels: String,
    pub stat_movies: String,
    pub stat_uptime: String,
    pub pricing: Vec<PricingPlan>,
    // Contact
    pub whatsapp_number: String,
    pub telegram_handle: String,
    pub faqs: Vec<Faq>,
    // Popup
    pub show_popup: bool,
    pub popup_title: String,
    pub popup_text: String,
    pub popup_button_text: String,
    pub popup_button_link: String,
    // Maintenance
    pub maintenance_mode: bool,
    pub maintenance_message: String,
    // Theme
    pub default_theme: String,
    pub accent_color: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl SiteSettings {
    /// Build a document from a fully merged JSON object.
    pub fn from_object(object: Map<String, Value>) -> serde_json::Result<Self> {
        serde_json::from_value(Value::Object(object))
    }

    pub fn into_object(self) -> serde_json::Result<Map<String, Value>> {
        match serde_json::to_value(self)? {
            Value::Object(map) => Ok(map),
            // A struct always serializes to an object
            _ => Ok(Map::new()),
        }
    }
}

fn plan(duration: &str, price: &str, original: &str, monthly: &str, link: &str) -> PricingPlan {
    PricingPlan {
        duration: duration.to_string(),
        price: price.to_string(),
        original: original.to_string(),
        monthly: monthly.to_string(),
        link: Some(link.to_string()),
        featured: None,
        best_value: None,
    }
}

fn faq(q: &str, a: &str) -> Faq {
    Faq {
        q: q.to_string(),
        a: a.to_string(),
    }
}

impl Default for SiteSettings {
    /// The compiled-in document every read and write is merged over.
    /// Timestamps are left unset; the store stamps them.
    fn default() -> Self {
        Self {
            id: SETTINGS_ID.to_string(),
            show_update_banner: true,
            banner_text: "🎉 NEW 2026 Updates: 4K HDR, Dolby Atmos & 50+ New Channels!".to_string(),
            banner_link: "#pricing".to_string(),
            hero_title1: "Stream everything.".to_string(),
            hero_title2: "Pay almost nothing.".to_string(),
            hero_subtitle: "22,000+ live channels. 80,000+ movies & series. Crystal clear 4K."
                .to_string(),
            stat_channels: "22000".to_string(),
            stat_movies: "80000".to_string(),
            stat_uptime: "99".to_string(),
            pricing: vec![
                plan(
                    "1 Month",
                    "14.99",
                    "30",
                    "14.99",
                    "https://iptvusca.sell.app/product/1-month-trial-nero-gold?quantity=1&info=faq",
                ),
                plan(
                    "3 Months",
                    "39.99",
                    "60",
                    "13.33",
                    "https://iptvusca.sell.app/product/3-months-claudius-Gold?store=iptvusca&quantity=1&info=faq",
                ),
                PricingPlan {
                    featured: Some(true),
                    ..plan(
                        "6 Months",
                        "69.99",
                        "90",
                        "11.67",
                        "https://iptvusca.sell.app/product/6-months-julius-caesar-gold?store=iptvusca&quantity=1&info=faq",
                    )
                },
                PricingPlan {
                    best_value: Some(true),
                    ..plan(
                        "1 Year",
                        "99.99",
                        "140",
                        "8.33",
                        "https://iptvusca.sell.app/product/12-months-augustus-gold?store=iptvusca&quantity=1&info=faq",
                    )
                },
            ],
            whatsapp_number: "+14509127880".to_string(),
            telegram_handle: "@iptvusca".to_string(),
            faqs: vec![
                faq(
                    "Can I use multiple devices?",
                    "Each subscription supports one device at a time. Additional connections available for extra fee.",
                ),
                faq(
                    "What devices are supported?",
                    "Fire Stick, Android TV, Smart TV (Samsung, LG), iOS, Android, PC, Mac, and all streaming boxes.",
                ),
                faq(
                    "Is there a refund policy?",
                    "Free 24-hour trial for all customers. Full refund within 7 days if not satisfied.",
                ),
                faq(
                    "How fast is activation?",
                    "Instant activation after payment. Our team works 24/7.",
                ),
                faq(
                    "Do you update content?",
                    "Yes! Regular updates with new movies, series, and channels. All updates are free.",
                ),
                faq(
                    "What payment methods?",
                    "PayPal, cryptocurrency (Bitcoin), and all major credit cards.",
                ),
            ],
            show_popup: false,
            popup_title: "Special Offer!".to_string(),
            popup_text: "Get 50% off your first month!".to_string(),
            popup_button_text: "Claim Now".to_string(),
            popup_button_link: "#pricing".to_string(),
            maintenance_mode: false,
            maintenance_message:
                "We are currently performing scheduled maintenance. Please check back soon!"
                    .to_string(),
            default_theme: "light".to_string(),
            accent_color: "#E50914".to_string(),
            created_at: None,
            updated_at: None,
            extra: Map::new(),
        }
    }
}
