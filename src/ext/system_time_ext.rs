use std::time::{Duration, SystemTime};

pub trait SystemTimeExt {
    /// Drops the sub-second part, rounding towards the past.
    fn truncate_to_seconds(&self) -> SystemTime;
}

impl SystemTimeExt for SystemTime {
    fn truncate_to_seconds(&self) -> SystemTime {
        match self.duration_since(SystemTime::UNIX_EPOCH) {
            Ok(since_epoch) => SystemTime::UNIX_EPOCH + Duration::from_secs(since_epoch.as_secs()),
            Err(err) => {
                let before_epoch = err.duration();
                let whole_seconds = if before_epoch.subsec_nanos() == 0 {
                    before_epoch.as_secs()
                } else {
                    before_epoch.as_secs() + 1
                };
                SystemTime::UNIX_EPOCH - Duration::from_secs(whole_seconds)
            }
        }
    }
}
