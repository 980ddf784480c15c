//! Daily and cycle digest composition.
//!
//! Delivery is someone else's job: this module decides which digests are due
//! for a user and builds their plain-text content.

use crate::core::insights::{require_birth_date, require_premium};
use crate::core::selector;
use crate::domain::model::{
    Cycle, DigestKind, DigestMessage, EmailPreference, Insight, UserProfile,
};
use crate::domain::ports::Clock;
use chrono::{DateTime, Datelike, FixedOffset, NaiveDate, Utc};

#[derive(Debug, Clone)]
pub struct DigestSettings {
    pub app_name: String,
    pub from_name: String,
    pub sender: String,
    pub cycle_count: usize,
}

impl Default for DigestSettings {
    fn default() -> Self {
        Self {
            app_name: "Card Science Insight".to_string(),
            from_name: "Card Science Insight".to_string(),
            sender: "no-reply@cardsci.app".to_string(),
            cycle_count: selector::DEFAULT_CYCLE_COUNT,
        }
    }
}

impl DigestSettings {
    fn from_header(&self) -> String {
        format!("{} <{}>", self.from_name, self.sender)
    }
}

fn sent_on(last_sent: Option<DateTime<Utc>>, today: NaiveDate, offset: FixedOffset) -> bool {
    last_sent.is_some_and(|at| at.with_timezone(&offset).date_naive() >= today)
}

/// Digest kinds due today, daily first.
///
/// `today` is a local date in `offset`; send timestamps are moved into the
/// same offset before comparing.
pub fn plan_digests(
    prefs: &EmailPreference,
    today: NaiveDate,
    offset: FixedOffset,
    cycles: &[Cycle],
) -> Vec<DigestKind> {
    let mut due = Vec::new();

    if prefs.daily_digest_enabled && !sent_on(prefs.last_daily_sent, today, offset) {
        due.push(DigestKind::Daily);
    }

    let cycle_starts_today = cycles.iter().any(|c| c.cycle_start == today);
    if prefs.cycle_digest_enabled
        && cycle_starts_today
        && !sent_on(prefs.last_cycle_sent, today, offset)
    {
        due.push(DigestKind::Cycle);
    }

    due
}

pub fn mark_sent(prefs: &mut EmailPreference, kind: DigestKind, at: DateTime<Utc>) {
    match kind {
        DigestKind::Daily => prefs.last_daily_sent = Some(at),
        DigestKind::Cycle => prefs.last_cycle_sent = Some(at),
    }
}

pub fn compose_daily(
    settings: &DigestSettings,
    user: &UserProfile,
    today_card: &Insight,
    today: NaiveDate,
) -> DigestMessage {
    let text_body = format!(
        "{}，你好！\n\n{}（{}）\n{}\n\n建议：{}\n",
        user.display_name(),
        today_card.title,
        today.format("%Y-%m-%d"),
        today_card.description,
        today_card.advice,
    );

    DigestMessage {
        kind: DigestKind::Daily,
        from: settings.from_header(),
        recipient: user.email.clone(),
        subject: format!("{} · {}", settings.app_name, today_card.title),
        text_body,
    }
}

pub fn compose_cycle(settings: &DigestSettings, user: &UserProfile, cycle: &Cycle) -> DigestMessage {
    let text_body = format!(
        "{}，你好！\n\n第 {} 周期：{} 至 {}\n{}\n\n建议：{}\n",
        user.display_name(),
        cycle.cycle_index,
        cycle.cycle_start.format("%Y-%m-%d"),
        cycle.cycle_end.format("%Y-%m-%d"),
        cycle.theme,
        cycle.advice,
    );

    DigestMessage {
        kind: DigestKind::Cycle,
        from: settings.from_header(),
        recipient: user.email.clone(),
        subject: format!("{} · 第 {} 周期开始", settings.app_name, cycle.cycle_index),
        text_body,
    }
}

pub struct DigestPlanner<C: Clock> {
    clock: C,
    settings: DigestSettings,
}

impl<C: Clock> DigestPlanner<C> {
    pub fn new(clock: C, settings: DigestSettings) -> Self {
        Self { clock, settings }
    }

    /// Composes every digest due for `user` right now.
    pub fn run(&self, user: &UserProfile) -> Vec<DigestMessage> {
        if let Err(e) = require_premium(user, "digest") {
            tracing::debug!("Skipping digests for {}: {}", user.email, e);
            return Vec::new();
        }
        let birth_date = match require_birth_date(user) {
            Ok(date) => date,
            Err(e) => {
                tracing::debug!("Skipping digests for {}: {}", user.email, e);
                return Vec::new();
            }
        };

        // 使用者自己的時區優先
        let offset = user.utc_offset().unwrap_or_else(|| self.clock.offset());
        let today = self.clock.now().with_timezone(&offset).date_naive();
        let cycles = selector::build_yearly_cycles(birth_date, self.settings.cycle_count, today.year());

        let messages: Vec<DigestMessage> = plan_digests(&user.email_preferences, today, offset, &cycles)
            .into_iter()
            .filter_map(|kind| match kind {
                DigestKind::Daily => {
                    let card = selector::draw_today_card(birth_date, today);
                    Some(compose_daily(&self.settings, user, &card, today))
                }
                DigestKind::Cycle => cycles
                    .iter()
                    .find(|c| c.cycle_start == today)
                    .map(|cycle| compose_cycle(&self.settings, user, cycle)),
            })
            .collect();

        tracing::debug!(
            "{} digest(s) due for {} on {} ({})",
            messages.len(),
            user.email,
            today,
            offset
        );
        messages
    }

    /// Records delivery of `messages` in the user's preferences.
    pub fn acknowledge(&self, prefs: &mut EmailPreference, messages: &[DigestMessage]) {
        let at = self.clock.now();
        for message in messages {
            mark_sent(prefs, message.kind, at);
        }
    }
}
