use crate::algorithm::FixedIntervalScheduler;
use crate::deck::DeckFormat;
use crate::traits::{FlashcardError, FlashcardResult};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Settings for a review session, read from a yaml file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    /// Seconds until a correctly answered card is shown again.
    pub correct_interval_secs: i64,
    /// Seconds until an incorrectly answered card is shown again.
    pub incorrect_interval_secs: i64,
    /// Deck layout, guessed from the file extension when absent.
    pub deck_format: Option<DeckFormat>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            correct_interval_secs: 24 * 60 * 60,
            incorrect_interval_secs: 60,
            deck_format: None,
        }
    }
}

impl Config {
    /// Load from `path`, a file that doesn't exist gives the defaults. The intervals are
    /// checked, see [`FixedIntervalScheduler::new`].
    pub fn load(path: &Path) -> FlashcardResult<Self> {
        if !path.exists() {
            return Ok(Default::default());
        }
        let file = std::fs::File::open(path)?;
        let config: Config = serde_yaml::from_reader(file)?;
        config.scheduler()?;
        Ok(config)
    }

    pub fn scheduler(&self) -> FlashcardResult<FixedIntervalScheduler> {
        FixedIntervalScheduler::new(
            seconds("correct", self.correct_interval_secs)?,
            seconds("incorrect", self.incorrect_interval_secs)?,
        )
    }
}

fn seconds(name: &str, secs: i64) -> FlashcardResult<chrono::Duration> {
    chrono::Duration::try_seconds(secs).ok_or_else(|| {
        FlashcardError::InvalidConfig(format!("{name} interval of {secs} seconds is out of range"))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_scheduler() {
        let config = Config::default();
        assert_eq!(config.scheduler().unwrap(), FixedIntervalScheduler::default());
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load(&dir.path().join("config.yaml")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_partial_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(&path, "incorrect_interval_secs: 30\ndeck_format: Yaml\n").unwrap();
        let config = Config::load(&path).unwrap();
        assert_eq!(config.correct_interval_secs, 86400);
        assert_eq!(config.incorrect_interval_secs, 30);
        assert_eq!(config.deck_format, Some(DeckFormat::Yaml));
        assert_eq!(
            config.scheduler().unwrap().incorrect(),
            chrono::Duration::seconds(30)
        );
    }

    #[test]
    fn test_rejects_bad_intervals() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        for bad in [
            "correct_interval_secs: 9223372036854775807\n",
            "correct_interval_secs: 9000000000000000\n",
            "incorrect_interval_secs: -60\n",
            "incorrect_interval_secs: 0\n",
        ] {
            std::fs::write(&path, bad).unwrap();
            assert!(
                matches!(Config::load(&path), Err(FlashcardError::InvalidConfig(_))),
                "{bad:?} should be rejected"
            );
        }

        let config = Config {
            correct_interval_secs: i64::MIN,
            ..Default::default()
        };
        assert!(matches!(
            config.scheduler(),
            Err(FlashcardError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_bad_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(&path, "correct_interval_secs: soon\n").unwrap();
        assert!(matches!(
            Config::load(&path),
            Err(FlashcardError::Yaml(_))
        ));
    }
}
