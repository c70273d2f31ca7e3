use crate::config::SiteConfig;
use crate::form_log::FormLog;

/// State shared by every connection: the read-only site settings and the
/// form log.
#[derive(Debug)]
pub struct Site {
    pub config: SiteConfig,
    pub form_log: FormLog,
}

impl Site {
    pub fn new(config: SiteConfig) -> Self {
        let form_log = FormLog::new(config.form_log.clone());
        Self { config, form_log }
    }
}
