//! Information display handlers

use crate::cli::output::*;
use crate::tone::ToneProvider;
use crate::AppConfig;
use crate::Result;

pub fn handle_config_command(config: &AppConfig) -> Result<()> {
    print_config(config);
    println!();

    if config.tone.provider == ToneProvider::Http && config.tone_api_key().is_none() {
        print_warning(&format!(
            "Tone provider is http but ${} is not set; the bot will refuse to start",
            config.tone.api_key_env
        ));
    } else {
        print_success("Configuration is ready to use");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_command_warns_without_failing() {
        let mut config = AppConfig::default();
        assert!(handle_config_command(&config).is_ok());

        config.tone.provider = ToneProvider::Http;
        config.tone.api_key_env = "MOODMAP_INFO_TEST_UNSET_KEY".to_string();
        assert!(handle_config_command(&config).is_ok());
    }
}
