use std::time::Duration;

use async_trait::async_trait;

use crate::{
    cli::{
        CliError, Command, CommandResult,
        formatting::format_duration,
        types::{ArgType, CommandArg, CommandMetadata},
    },
    services::session::SessionController,
};

use super::utils::require_loaded;

/// Moves the playhead within the current track.
pub struct SeekCommand;

/// A parsed `seek` argument before it is resolved against the track.
#[derive(Debug, Clone, Copy, PartialEq)]
enum SeekTarget {
    At(Duration),
    Fraction(f64),
    Forward(Duration),
    Back(Duration),
}

impl SeekTarget {
    fn parse(input: &str) -> Result<Self, &'static str> {
        if let Some(percent) = input.strip_suffix('%') {
            let percent: f64 = percent.parse().map_err(|_| "not a percentage")?;
            if !(0.0..=100.0).contains(&percent) {
                return Err("percentage must be within 0-100");
            }
            return Ok(Self::Fraction(percent / 100.0));
        }

        if let Some(secs) = input.strip_prefix('+') {
            return seconds(secs).map(Self::Forward);
        }
        if let Some(secs) = input.strip_prefix('-') {
            return seconds(secs).map(Self::Back);
        }

        match input.split_once(':') {
            Some((mins, secs)) => {
                let mins: u64 = mins.parse().map_err(|_| "bad minutes")?;
                let secs: u64 = secs.parse().map_err(|_| "bad seconds")?;
                if secs >= 60 {
                    return Err("seconds must be below 60");
                }
                mins.checked_mul(60)
                    .and_then(|mins| mins.checked_add(secs))
                    .map(|total| Self::At(Duration::from_secs(total)))
                    .ok_or("position too large")
            }
            None => seconds(input)
                .map(Self::At)
                .map_err(|_| "expected 90, 1:30, 50%, +10 or -10"),
        }
    }

    fn resolve(self, current: Duration, length: Duration) -> Duration {
        match self {
            Self::At(position) => position,
            Self::Fraction(fraction) => length.mul_f64(fraction),
            Self::Forward(delta) => current.saturating_add(delta).min(length),
            Self::Back(delta) => current.saturating_sub(delta),
        }
    }
}

fn seconds(input: &str) -> Result<Duration, &'static str> {
    input
        .parse()
        .map(Duration::from_secs)
        .map_err(|_| "not a number of seconds")
}

impl SeekCommand {
    pub(crate) fn parse_position(
        input: &str,
        current: Duration,
        length: Duration,
    ) -> Result<Duration, CliError> {
        SeekTarget::parse(input)
            .map(|target| target.resolve(current, length))
            .map_err(|reason| CliError::InvalidArgument {
                arg: "position".to_string(),
                reason: reason.to_string(),
            })
    }
}

#[async_trait]
impl Command for SeekCommand {
    async fn execute(&self, session: &SessionController, args: &[String]) -> CommandResult {
        let snapshot = require_loaded(session)?;
        let input = args.first().map(String::as_str).unwrap_or_default();
        let length_ms = snapshot.track_length_ms();

        let target = Self::parse_position(
            input,
            Duration::from_millis(snapshot.seek_position_ms()),
            Duration::from_millis(length_ms),
        )?;
        let target_ms = u64::try_from(target.as_millis()).unwrap_or(u64::MAX);

        if target_ms > length_ms {
            return Err(CliError::InvalidArgument {
                arg: "position".to_string(),
                reason: format!(
                    "{} is past the end of the track ({})",
                    format_duration(target_ms),
                    format_duration(length_ms)
                ),
            });
        }

        session.seek_to(target_ms);
        Ok(format!("Position {}", format_duration(target_ms)))
    }

    fn metadata(&self) -> CommandMetadata {
        CommandMetadata {
            name: "seek".to_string(),
            aliases: vec!["s".to_string()],
            description: "Move to a position in the current track".to_string(),
            args: vec![CommandArg {
                name: "position".to_string(),
                description: "90, 1:30, 50% or a relative +10 / -10 seconds".to_string(),
                required: true,
                value_type: ArgType::String,
            }],
            examples: vec![
                "seek 30".to_string(),
                "seek 1:30".to_string(),
                "seek 50%".to_string(),
                "seek +10".to_string(),
            ],
        }
    }
}
