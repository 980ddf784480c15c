use crate::core::selector;
use crate::domain::model::{
    Blueprint, CompatibilityInsight, ForecastResponse, Insight, SubscriptionPlan, UserProfile,
};
use crate::domain::ports::Clock;
use crate::utils::error::{InsightError, Result};
use chrono::{Datelike, NaiveDate};

const SHARED_LESSON_COUNT: usize = 2;

/// Applies plan gating and profile checks in front of the selector.
///
/// Plan is checked before the birth profile, so a free user without a
/// profile is told to upgrade rather than to fill in a birthday.
pub struct InsightService<C: Clock> {
    clock: C,
}

impl<C: Clock> InsightService<C> {
    pub fn new(clock: C) -> Self {
        Self { clock }
    }

    pub fn personal(&self, user: &UserProfile) -> Result<Blueprint> {
        let birth_date = require_birth_date(user)?;
        tracing::debug!("Deriving blueprint for {}", user.email);
        Ok(selector::derive_blueprint(birth_date))
    }

    pub fn forecast(&self, user: &UserProfile, cycle_count: usize) -> Result<ForecastResponse> {
        require_premium(user, "完整分析")?;
        let birth_date = require_birth_date(user)?;

        let today = self.clock.today();
        tracing::debug!(
            "Building forecast for {} ({} cycles, today {})",
            user.email,
            cycle_count,
            today
        );

        Ok(ForecastResponse {
            personal_blueprint: selector::derive_blueprint(birth_date),
            yearly_cycles: selector::build_yearly_cycles(birth_date, cycle_count, today.year()),
            today_card: selector::draw_today_card(birth_date, today),
        })
    }

    pub fn today(&self, user: &UserProfile) -> Result<Insight> {
        require_premium(user, "今日牌")?;
        let birth_date = require_birth_date(user)?;

        let today = self.clock.today();
        tracing::debug!("Drawing today's card for {} on {}", user.email, today);
        Ok(selector::draw_today_card(birth_date, today))
    }

    pub fn compatibility(
        &self,
        user: &UserProfile,
        partner_birth_date: NaiveDate,
    ) -> Result<CompatibilityInsight> {
        require_premium(user, "合盘")?;
        let birth_date = require_birth_date(user)?;

        let mut lessons = selector::compatibility_lessons(birth_date, partner_birth_date);
        let growth_opportunities = lessons.split_off(SHARED_LESSON_COUNT.min(lessons.len()));

        tracing::debug!("Compatibility for {} vs {}", birth_date, partner_birth_date);

        Ok(CompatibilityInsight {
            compatibility_score: selector::compatibility_score(birth_date, partner_birth_date),
            shared_lessons: lessons,
            growth_opportunities,
            relationship_theme: selector::compatibility_theme(birth_date, partner_birth_date),
        })
    }
}

pub(crate) fn require_premium(user: &UserProfile, feature: &str) -> Result<()> {
    if user.plan != SubscriptionPlan::Premium {
        tracing::debug!("{} denied for {} on the {} plan", feature, user.email, user.plan);
        return Err(InsightError::SubscriptionRequired {
            feature: feature.to_string(),
        });
    }
    Ok(())
}

pub(crate) fn require_birth_date(user: &UserProfile) -> Result<NaiveDate> {
    user.birth_date().ok_or(InsightError::ProfileMissing)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::clock::FixedClock;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn service() -> InsightService<FixedClock> {
        InsightService::new(FixedClock::on(date(2026, 10, 19)))
    }

    fn premium() -> UserProfile {
        UserProfile::new("reader@example.com", SubscriptionPlan::Premium, Some(date(2000, 3, 15)))
    }

    #[test]
    fn test_personal_is_available_on_free_plan() {
        let user = UserProfile::new("free@example.com", SubscriptionPlan::Free, Some(date(2000, 3, 15)));
        let blueprint = service().personal(&user).unwrap();
        assert_eq!(blueprint.life_card.title, "生命牌 · Ten of Clubs");
    }

    #[test]
    fn test_personal_requires_profile() {
        let user = UserProfile::new("free@example.com", SubscriptionPlan::Free, None);
        assert!(matches!(service().personal(&user), Err(InsightError::ProfileMissing)));
    }

    #[test]
    fn test_premium_features_denied_on_free_plan() {
        let user = UserProfile::new("free@example.com", SubscriptionPlan::Free, Some(date(2000, 3, 15)));
        let svc = service();

        assert!(matches!(
            svc.forecast(&user, 7),
            Err(InsightError::SubscriptionRequired { .. })
        ));
        assert!(matches!(svc.today(&user), Err(InsightError::SubscriptionRequired { .. })));
        assert!(matches!(
            svc.compatibility(&user, date(2000, 9, 10)),
            Err(InsightError::SubscriptionRequired { .. })
        ));
    }

    #[test]
    fn test_plan_is_checked_before_profile() {
        let user = UserProfile::new("free@example.com", SubscriptionPlan::Free, None);
        assert!(matches!(
            service().today(&user),
            Err(InsightError::SubscriptionRequired { .. })
        ));

        let premium_without_profile = UserProfile::new("p@example.com", SubscriptionPlan::Premium, None);
        assert!(matches!(
            service().today(&premium_without_profile),
            Err(InsightError::ProfileMissing)
        ));
    }

    #[test]
    fn test_forecast_uses_clock_year() {
        let forecast = service().forecast(&premium(), 7).unwrap();
        assert_eq!(forecast.yearly_cycles.len(), 7);
        assert_eq!(forecast.yearly_cycles[0].cycle_start, date(2026, 3, 15));
        assert_eq!(
            forecast.today_card,
            selector::draw_today_card(date(2000, 3, 15), date(2026, 10, 19))
        );
    }

    #[test]
    fn test_compatibility_splits_lessons() {
        let insight = service().compatibility(&premium(), date(2000, 9, 10)).unwrap();
        assert_eq!(insight.compatibility_score, 54);
        assert_eq!(insight.shared_lessons.len(), 2);
        assert_eq!(insight.growth_opportunities.len(), 2);
        assert_eq!(insight.relationship_theme, "关系的核心能量来自 Four of Clubs");
    }

    #[test]
    fn test_today_follows_clock_local_date() {
        use chrono::{FixedOffset, TimeZone, Utc};

        // 23:30 UTC on Oct 19 is already Oct 20 in +08:00
        let instant = Utc.with_ymd_and_hms(2026, 10, 19, 23, 30, 0).unwrap();
        let clock = FixedClock::new(instant).with_offset(FixedOffset::east_opt(8 * 3600).unwrap());
        let card = InsightService::new(clock).today(&premium()).unwrap();
        assert_eq!(card, selector::draw_today_card(date(2000, 3, 15), date(2026, 10, 20)));
    }
}
