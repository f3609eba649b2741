//! crates/logging/src/config.rs
//! Verbosity configuration combining info and debug levels.

use super::levels::{DebugFlag, DebugLevels, InfoFlag, InfoLevels};

/// Combined verbosity configuration for info and debug flags.
#[derive(Clone, Default, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VerbosityConfig {
    /// Info flag levels.
    pub info: InfoLevels,
    /// Debug flag levels.
    pub debug: DebugLevels,
}

impl VerbosityConfig {
    /// Creates a configuration from a `-v` count.
    ///
    /// Level 1 enables the info summaries, level 2 adds first-level debug
    /// output for everything except per-pattern matching, and each further
    /// level raises every debug flag by one.
    pub fn from_verbose_level(level: u8) -> Self {
        let mut config = Self::default();
        if level == 0 {
            return config;
        }

        config.info.set_all(1);
        if level == 1 {
            return config;
        }

        config.info.scan = 2;
        config.debug.set_all(level - 1);
        config.debug.r#match = level.saturating_sub(2);
        config
    }

    /// Apply a single info flag token (e.g., "scan2", "path", "all").
    pub fn apply_info_flag(&mut self, token: &str) -> Result<(), String> {
        let (name, level) = parse_flag_token(token)?;
        if name == "all" {
            self.info.set_all(level);
            return Ok(());
        }

        let flag = InfoFlag::ALL
            .into_iter()
            .find(|flag| flag.name() == name)
            .ok_or_else(|| format!("unknown info flag: {name}"))?;
        self.info.set(flag, level);
        Ok(())
    }

    /// Apply a single debug flag token (e.g., "fresh2", "refs", "all").
    pub fn apply_debug_flag(&mut self, token: &str) -> Result<(), String> {
        let (name, level) = parse_flag_token(token)?;
        if name == "all" {
            self.debug.set_all(level);
            return Ok(());
        }

        let flag = DebugFlag::ALL
            .into_iter()
            .find(|flag| flag.name() == name)
            .ok_or_else(|| format!("unknown debug flag: {name}"))?;
        self.debug.set(flag, level);
        Ok(())
    }

    /// Applies a comma-separated list of info tokens.
    pub fn apply_info_flags(&mut self, list: &str) -> Result<(), String> {
        split_tokens(list).try_for_each(|token| self.apply_info_flag(token))
    }

    /// Applies a comma-separated list of debug tokens.
    pub fn apply_debug_flags(&mut self, list: &str) -> Result<(), String> {
        split_tokens(list).try_for_each(|token| self.apply_debug_flag(token))
    }
}

fn split_tokens(list: &str) -> impl Iterator<Item = &str> {
    list.split(',').map(str::trim).filter(|token| !token.is_empty())
}

/// Parse a flag token like "scan2" into ("scan", 2) or "refs" into ("refs", 1).
fn parse_flag_token(token: &str) -> Result<(&str, u8), String> {
    let name = token.trim_end_matches(|c: char| c.is_ascii_digit());
    if name.is_empty() {
        return Err(format!("missing flag name in '{token}'"));
    }

    let digits = &token[name.len()..];
    if digits.is_empty() {
        return Ok((name, 1));
    }

    digits
        .parse::<u8>()
        .map(|level| (name, level))
        .map_err(|_| format!("invalid level in flag: {token}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbose_level_zero_is_silent() {
        assert_eq!(VerbosityConfig::from_verbose_level(0), VerbosityConfig::default());
    }

    #[test]
    fn verbose_level_one_enables_info_only() {
        let config = VerbosityConfig::from_verbose_level(1);
        assert_eq!(config.info.scan, 1);
        assert_eq!(config.info.select, 1);
        assert_eq!(config.info.path, 1);
        assert_eq!(config.debug, DebugLevels::default());
    }

    #[test]
    fn verbose_level_two_enables_debug_without_match() {
        let config = VerbosityConfig::from_verbose_level(2);
        assert_eq!(config.info.scan, 2);
        assert_eq!(config.debug.scan, 1);
        assert_eq!(config.debug.fresh, 1);
        assert_eq!(config.debug.r#match, 0);
    }

    #[test]
    fn verbose_level_four_raises_everything() {
        let config = VerbosityConfig::from_verbose_level(4);
        assert_eq!(config.debug.scan, 3);
        assert_eq!(config.debug.r#match, 2);
    }

    #[test]
    fn parse_flag_token_defaults_to_level_one() {
        assert_eq!(parse_flag_token("scan").unwrap(), ("scan", 1));
        assert_eq!(parse_flag_token("fresh3").unwrap(), ("fresh", 3));
        assert_eq!(parse_flag_token("scan0").unwrap(), ("scan", 0));
        assert!(parse_flag_token("").is_err());
        assert!(parse_flag_token("42").is_err());
        assert!(parse_flag_token("scan999").is_err());
    }

    #[test]
    fn apply_flags_accepts_lists_and_all() {
        let mut config = VerbosityConfig::default();
        config.apply_debug_flags("fresh2, refs").unwrap();
        assert_eq!(config.debug.fresh, 2);
        assert_eq!(config.debug.refs, 1);

        config.apply_info_flags("all2").unwrap();
        assert_eq!(config.info.path, 2);

        assert!(config.apply_debug_flag("bogus").is_err());
        assert!(config.apply_info_flag("match").is_err());
    }
}
