use super::Config;
use crate::announcement::DismissPolicy;

impl Config {
    pub fn apply_env_overrides(&mut self) {
        if let Ok(url) = std::env::var("NOTICEBOARD_SOURCE_URL")
            && !url.is_empty()
        {
            self.source.base_url = Some(url);
        }

        if let Ok(key) = std::env::var("NOTICEBOARD_API_KEY")
            && !key.is_empty()
        {
            self.source.api_key = Some(key);
        }

        if let Ok(table) = std::env::var("NOTICEBOARD_TABLE")
            && !table.is_empty()
        {
            self.source.table = table;
        }

        if let Ok(path) = std::env::var("NOTICEBOARD_STORE_PATH")
            && !path.is_empty()
        {
            self.storage.path = Some(path);
        }

        if let Ok(raw) = std::env::var("NOTICEBOARD_DISMISS_POLICY")
            && !raw.is_empty()
        {
            match raw.parse::<DismissPolicy>() {
                Ok(policy) => self.banner.dismiss_policy = policy,
                Err(err) => {
                    tracing::warn!(value = %raw, error = %err, "ignoring NOTICEBOARD_DISMISS_POLICY");
                }
            }
        }
    }
}
