use std::time::SystemTime;

use chrono::{DateTime, Local};

pub trait Clock {
    fn now(&self) -> SystemTime;

    /// Current time in the local timezone.
    fn now_local(&self) -> DateTime<Local> {
        DateTime::<Local>::from(self.now())
    }
}

pub struct DefaultClock;
impl Clock for DefaultClock {
    fn now(&self) -> SystemTime {
        SystemTime::now()
    }
}
