use crate::domain::model::{Cycle, DigestKind, DigestMessage, EmailPreference, ForecastResponse};
use crate::domain::ports::{ConfigProvider, Storage};
use crate::utils::error::{InsightError, Result};

pub const FORECAST_FILE: &str = "forecast.json";
pub const CYCLES_FILE: &str = "cycles.csv";
pub const OUTBOX_DIR: &str = "outbox";
pub const PREFERENCES_DIR: &str = "preferences";

pub struct ReportEngine<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
}

impl<S: Storage, C: ConfigProvider> ReportEngine<S, C> {
    pub fn new(storage: S, config: C) -> Self {
        Self { storage, config }
    }

    /// Writes the forecast as JSON plus its cycles as CSV and returns the output directory.
    pub async fn export(&self, forecast: &ForecastResponse) -> Result<String> {
        tracing::info!("Exporting forecast to {}", self.config.output_path());

        let json = serde_json::to_string_pretty(forecast)?;
        self.storage.write_file(FORECAST_FILE, json.as_bytes()).await?;
        tracing::debug!("Wrote {} ({} bytes)", FORECAST_FILE, json.len());

        let csv_data = cycles_to_csv(&forecast.yearly_cycles)?;
        self.storage.write_file(CYCLES_FILE, &csv_data).await?;
        tracing::debug!(
            "Wrote {} ({} cycles)",
            CYCLES_FILE,
            forecast.yearly_cycles.len()
        );

        Ok(self.config.output_path().to_string())
    }

    /// Drops composed digests into the outbox as text files, one per message.
    pub async fn write_outbox(&self, messages: &[DigestMessage]) -> Result<Vec<String>> {
        let mut written = Vec::with_capacity(messages.len());

        for message in messages {
            let path = outbox_file_name(message);
            let content = format!(
                "From: {}\nTo: {}\nSubject: {}\n\n{}",
                message.from, message.recipient, message.subject, message.text_body
            );
            self.storage.write_file(&path, content.as_bytes()).await?;
            tracing::info!("Queued {:?} digest for {} at {}", message.kind, message.recipient, path);
            written.push(path);
        }

        Ok(written)
    }

    /// Digest bookkeeping for one recipient, persisted between runs.
    /// Defaults when nothing was saved for that recipient yet.
    pub async fn load_preferences(&self, recipient: &str) -> Result<EmailPreference> {
        let path = preferences_file_name(recipient);
        match self.storage.read_file(&path).await {
            Ok(data) => Ok(serde_json::from_slice(&data)?),
            Err(InsightError::IoError(e)) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!("No saved preferences at {}, using defaults", path);
                Ok(EmailPreference::default())
            }
            Err(e) => Err(e),
        }
    }

    pub async fn save_preferences(&self, recipient: &str, prefs: &EmailPreference) -> Result<()> {
        let path = preferences_file_name(recipient);
        let json = serde_json::to_vec_pretty(prefs)?;
        self.storage.write_file(&path, &json).await?;
        tracing::debug!("Saved preferences to {}", path);
        Ok(())
    }
}

pub fn cycles_to_csv(cycles: &[Cycle]) -> Result<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    for cycle in cycles {
        writer.serialize(cycle)?;
    }
    writer
        .into_inner()
        .map_err(|e| InsightError::IoError(e.into_error()))
}

/// File-name-safe form of an address; anything outside `[A-Za-z0-9.-]` becomes `_`.
fn sanitize_recipient(recipient: &str) -> String {
    recipient
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '.' || c == '-' { c } else { '_' })
        .collect()
}

fn outbox_file_name(message: &DigestMessage) -> String {
    let kind = match message.kind {
        DigestKind::Daily => "daily",
        DigestKind::Cycle => "cycle",
    };
    format!("{}/{}-{}.txt", OUTBOX_DIR, kind, sanitize_recipient(&message.recipient))
}

pub fn preferences_file_name(recipient: &str) -> String {
    format!("{}/{}.json", PREFERENCES_DIR, sanitize_recipient(recipient))
}
