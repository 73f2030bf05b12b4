use chrono::DateTime;
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

/// Form fields Slack posts for a slash command. Missing fields decode as empty.
#[derive(Debug, Deserialize, Default, Clone)]
#[serde(default)]
pub struct SlackCommand {
    pub token: String,
    pub team_id: String,
    pub team_domain: String,
    pub channel_id: String,
    pub channel_name: String,
    pub user_id: String,
    pub user_name: String,
    pub command: String,
    pub text: String,
    pub response_url: String,
    pub trigger_id: String,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct SlackMessage {
    #[serde(rename = "type")]
    pub message_type: String,
    pub text: String,
}

impl SlackMessage {
    pub fn mrkdwn(text: impl Into<String>) -> Self {
        Self {
            message_type: "mrkdwn".to_string(),
            text: text.into(),
        }
    }
}

/// Current time in one resolved zone.
#[derive(Debug, Clone)]
pub struct TimeReading {
    pub zone: Tz,
    pub local: DateTime<Tz>,
    pub is_business_hour: bool,
}
