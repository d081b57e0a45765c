use crate::error::{PromoError, PromoResult};
use std::{path::PathBuf, str::FromStr};

pub const DEFAULT_DICT_PATH: &str = "/usr/share/dict/words";
pub const DEFAULT_MIN_WORD_LEN: usize = 3;
pub const DEFAULT_MAX_WORD_LEN: usize = 6;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub dict_path: PathBuf,
    pub min_word_len: usize,
    pub max_word_len: usize,
}

fn env_or<T: FromStr>(name: &str, default: T) -> T {
    dotenvy::var(name).ok().and_then(|s| s.trim().parse().ok()).unwrap_or(default)
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            dict_path: PathBuf::from(DEFAULT_DICT_PATH),
            min_word_len: DEFAULT_MIN_WORD_LEN,
            max_word_len: DEFAULT_MAX_WORD_LEN,
        }
    }
}

impl Settings {
    /// Reads `PROMO_*` variables (after `.env` has been loaded), falling back to the defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            dict_path: env_or("PROMO_DICT_PATH", defaults.dict_path),
            min_word_len: env_or("PROMO_MIN_WORD_LEN", defaults.min_word_len),
            max_word_len: env_or("PROMO_MAX_WORD_LEN", defaults.max_word_len),
        }
    }

    #[must_use]
    pub fn with_overrides(
        mut self,
        dict_path: Option<PathBuf>,
        min_word_len: Option<usize>,
        max_word_len: Option<usize>,
    ) -> Self {
        if let Some(path) = dict_path {
            self.dict_path = path;
        }
        if let Some(min) = min_word_len {
            self.min_word_len = min;
        }
        if let Some(max) = max_word_len {
            self.max_word_len = max;
        }

        self
    }

    pub fn validate(self) -> PromoResult<Self> {
        if self.min_word_len == 0 {
            return Err(PromoError::invalid("minimum word length must be at least 1"));
        }

        if self.min_word_len > self.max_word_len {
            return Err(PromoError::invalid(format!(
                "minimum word length ({}) is greater than maximum ({})",
                self.min_word_len, self.max_word_len
            )));
        }

        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_dictionary_conventions() {
        let settings = Settings::default();
        assert_eq!(settings.dict_path, PathBuf::from("/usr/share/dict/words"));
        assert_eq!(settings.min_word_len, 3);
        assert_eq!(settings.max_word_len, 6);
    }

    #[test]
    fn env_or_falls_back_when_unset() {
        assert_eq!(env_or("PROMO_SURELY_NOT_SET_ANYWHERE", 42_usize), 42);
    }

    #[test]
    fn overrides_replace_only_given_values() {
        let settings =
            Settings::default().with_overrides(Some(PathBuf::from("words.txt")), None, Some(8));

        assert_eq!(settings.dict_path, PathBuf::from("words.txt"));
        assert_eq!(settings.min_word_len, 3);
        assert_eq!(settings.max_word_len, 8);
    }

    #[test]
    fn rejects_inverted_length_band() {
        let result = Settings::default().with_overrides(None, Some(7), Some(4)).validate();
        assert!(matches!(result, Err(PromoError::InvalidArgument { .. })));
    }

    #[test]
    fn rejects_zero_minimum() {
        let result = Settings::default().with_overrides(None, Some(0), None).validate();
        assert!(matches!(result, Err(PromoError::InvalidArgument { .. })));
    }

    #[test]
    fn accepts_single_length_band() {
        let settings = Settings::default().with_overrides(None, Some(5), Some(5)).validate();
        assert!(settings.is_ok());
    }
}
