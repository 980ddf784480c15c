use chrono::{DateTime, FixedOffset, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One entry of the fixed deck.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Card {
    pub name: &'static str,
    pub keywords: &'static str,
    pub advice: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Insight {
    pub title: String,
    pub description: String,
    pub advice: String,
}

impl Insight {
    /// Builds the display projection of a card. Takes a reference, so an
    /// absent card has to be handled by the caller before this point.
    pub fn from_card(prefix: &str, card: &Card) -> Self {
        Self {
            title: format!("{} · {}", prefix, card.name),
            description: card.keywords.to_string(),
            advice: card.advice.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Blueprint {
    pub life_card: Insight,
    pub ruling_card: Insight,
    pub soul_resource_card: Option<Insight>,
    pub soul_challenge_card: Option<Insight>,
    pub is_special_family: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cycle {
    pub cycle_index: u32,
    pub cycle_start: NaiveDate,
    pub cycle_end: NaiveDate,
    pub theme: String,
    pub advice: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForecastResponse {
    pub personal_blueprint: Blueprint,
    pub yearly_cycles: Vec<Cycle>,
    pub today_card: Insight,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompatibilityInsight {
    pub compatibility_score: i32,
    pub shared_lessons: Vec<String>,
    pub growth_opportunities: Vec<String>,
    pub relationship_theme: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubscriptionPlan {
    #[default]
    Free,
    Premium,
}

impl fmt::Display for SubscriptionPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SubscriptionPlan::Free => write!(f, "free"),
            SubscriptionPlan::Premium => write!(f, "premium"),
        }
    }
}

impl FromStr for SubscriptionPlan {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "free" => Ok(SubscriptionPlan::Free),
            "premium" => Ok(SubscriptionPlan::Premium),
            other => Err(format!("unknown subscription plan: {}", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BirthProfile {
    pub birth_date: NaiveDate,
    /// `UTC` or a fixed offset like `+08:00`. Unset means the clock's own offset.
    pub timezone: Option<String>,
}

impl BirthProfile {
    pub fn new(birth_date: NaiveDate) -> Self {
        Self {
            birth_date,
            timezone: None,
        }
    }

    /// The reader's own offset; `None` when unset or unparseable.
    pub fn utc_offset(&self) -> Option<FixedOffset> {
        let timezone = self.timezone.as_deref()?;
        match crate::utils::validation::parse_utc_offset("timezone", timezone) {
            Ok(offset) => Some(offset),
            Err(e) => {
                tracing::warn!("Ignoring timezone: {}", e);
                None
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailPreference {
    pub daily_digest_enabled: bool,
    pub cycle_digest_enabled: bool,
    pub last_daily_sent: Option<DateTime<Utc>>,
    pub last_cycle_sent: Option<DateTime<Utc>>,
}

impl Default for EmailPreference {
    fn default() -> Self {
        Self {
            daily_digest_enabled: true,
            cycle_digest_enabled: true,
            last_daily_sent: None,
            last_cycle_sent: None,
        }
    }
}

/// Partial update of digest switches; `None` leaves a switch as it is.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailPreferenceUpdate {
    pub daily_digest_enabled: Option<bool>,
    pub cycle_digest_enabled: Option<bool>,
}

impl EmailPreferenceUpdate {
    pub fn is_empty(&self) -> bool {
        self.daily_digest_enabled.is_none() && self.cycle_digest_enabled.is_none()
    }

    pub fn apply(&self, prefs: &mut EmailPreference) {
        if let Some(enabled) = self.daily_digest_enabled {
            prefs.daily_digest_enabled = enabled;
        }
        if let Some(enabled) = self.cycle_digest_enabled {
            prefs.cycle_digest_enabled = enabled;
        }
    }
}

/// What the insight layer needs to know about a user. Storage and auth live elsewhere.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub email: String,
    pub full_name: Option<String>,
    pub plan: SubscriptionPlan,
    pub profile: Option<BirthProfile>,
    #[serde(default)]
    pub email_preferences: EmailPreference,
}

impl UserProfile {
    pub fn new(email: impl Into<String>, plan: SubscriptionPlan, birth_date: Option<NaiveDate>) -> Self {
        Self {
            email: email.into(),
            full_name: None,
            plan,
            profile: birth_date.map(BirthProfile::new),
            email_preferences: EmailPreference::default(),
        }
    }

    pub fn birth_date(&self) -> Option<NaiveDate> {
        self.profile.as_ref().map(|p| p.birth_date)
    }

    pub fn utc_offset(&self) -> Option<FixedOffset> {
        self.profile.as_ref().and_then(BirthProfile::utc_offset)
    }

    pub fn display_name(&self) -> &str {
        self.full_name.as_deref().unwrap_or(&self.email)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DigestKind {
    Daily,
    Cycle,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DigestMessage {
    pub kind: DigestKind,
    pub from: String,
    pub recipient: String,
    pub subject: String,
    pub text_body: String,
}
