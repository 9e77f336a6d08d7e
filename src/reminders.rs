//! Recipe reminder scheduling
//!
//! Each armed reminder owns one recurring check task. The check runs once
//! immediately at arm time and then on a fixed 60-second period, comparing
//! the local wall-clock hour and minute to the configured time; on an exact
//! match it fires a notification through the [`Notifier`] collaborator.
//!
//! The tick period equals one clock minute but is not aligned to minute
//! boundaries, so a matching minute can in principle be hit by more than
//! one tick (or, under drift, by none). Tests pin tick alignment instead of
//! assuming once-per-day semantics.

use crate::error::{NamuError, Result};
use chrono::Timelike;
use metrics::increment_counter;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

/// Default period of the recurring reminder check
pub const DEFAULT_TICK: Duration = Duration::from_secs(60);

/// Body text of every reminder notification
const REMINDER_BODY: &str = "It's time to cook your saved recipe!";

/// Notification permission state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Permission {
    /// The user granted notification permission
    Granted,
    /// The user refused notification permission
    Denied,
    /// The user has not been asked yet
    Undetermined,
}

/// Notification collaborator
///
/// Capability-gated alert facility. `show` fires a user-visible alert; its
/// outcome is not consumed.
pub trait Notifier: Send + Sync {
    /// Whether a notification facility exists at all
    fn available(&self) -> bool;

    /// Current permission state
    fn permission(&self) -> Permission;

    /// Ask the user for permission; returns the resulting state
    fn request_permission(&self) -> Permission;

    /// Fire a user-visible notification
    fn show(&self, title: &str, body: &str);
}

/// Wall-clock collaborator, injectable for tests
pub trait Clock: Send + Sync {
    /// Current local time as (hour, minute)
    fn now_hour_minute(&self) -> (u32, u32);
}

/// System clock reading local time via `chrono`
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_hour_minute(&self) -> (u32, u32) {
        let now = chrono::Local::now();
        (now.hour(), now.minute())
    }
}

/// A reminder's configured time of day
///
/// Parses from and serializes to the `HH:MM` form the client sends.
///
/// # Examples
///
/// ```
/// use namunamu::reminders::ReminderTime;
///
/// let time: ReminderTime = "14:07".parse().unwrap();
/// assert_eq!(time.hour, 14);
/// assert_eq!(time.minute, 7);
/// assert_eq!(time.to_string(), "14:07");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReminderTime {
    /// Hour of day, 0..=23
    pub hour: u32,
    /// Minute of hour, 0..=59
    pub minute: u32,
}

impl ReminderTime {
    /// Construct a time of day
    ///
    /// # Errors
    ///
    /// Returns `NamuError::InvalidReminderTime` if either field is out of
    /// range
    pub fn new(hour: u32, minute: u32) -> Result<Self> {
        if hour > 23 || minute > 59 {
            return Err(NamuError::InvalidReminderTime(format!("{}:{}", hour, minute)).into());
        }
        Ok(Self { hour, minute })
    }
}

impl FromStr for ReminderTime {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || NamuError::InvalidReminderTime(s.to_string());

        let (hour, minute) = s.split_once(':').ok_or_else(invalid)?;
        let hour: u32 = hour.trim().parse().map_err(|_| invalid())?;
        let minute: u32 = minute.trim().parse().map_err(|_| invalid())?;
        Self::new(hour, minute).map_err(|_| invalid().into())
    }
}

impl fmt::Display for ReminderTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

impl Serialize for ReminderTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for ReminderTime {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(de::Error::custom)
    }
}

/// Opaque handle to an armed reminder's recurring check task
///
/// Holding the handle keeps nothing alive; cancelling it stops the task.
/// The wrapped abort handle is a plain value, safe to store inside recipe
/// records without capturing live closures.
#[derive(Debug, Clone)]
pub struct ReminderHandle {
    abort: tokio::task::AbortHandle,
}

impl ReminderHandle {
    /// Stop the recurring check task
    ///
    /// Idempotent: cancelling an already-cancelled reminder is a no-op.
    pub fn cancel(&self) {
        self.abort.abort();
    }
}

/// Schedules recurring reminder checks for saved recipes
///
/// One timer task exists per armed reminder; arming is gated on the
/// notification collaborator being available and permitted. The scheduler
/// itself holds no per-recipe state — callers own the returned
/// [`ReminderHandle`] and must cancel it when the reminder is disarmed or
/// its recipe removed.
pub struct ReminderScheduler {
    notifier: Arc<dyn Notifier>,
    clock: Arc<dyn Clock>,
    tick: Duration,
}

impl ReminderScheduler {
    /// Create a scheduler with the default 60-second tick
    pub fn new(notifier: Arc<dyn Notifier>) -> Self {
        Self {
            notifier,
            clock: Arc::new(SystemClock),
            tick: DEFAULT_TICK,
        }
    }

    /// Create a scheduler with the tick period from configuration
    pub fn from_config(notifier: Arc<dyn Notifier>, config: &crate::config::ReminderConfig) -> Self {
        Self::new(notifier).with_tick(Duration::from_secs(config.tick_seconds))
    }

    /// Replace the wall clock (tests)
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Replace the tick period
    pub fn with_tick(mut self, tick: Duration) -> Self {
        self.tick = tick;
        self
    }

    /// Arm a reminder for a recipe
    ///
    /// Performs one check immediately, then rechecks on every tick until
    /// the returned handle is cancelled. Must be called within a tokio
    /// runtime.
    ///
    /// # Arguments
    ///
    /// * `recipe_id` - Identifier used in the fired observability event
    /// * `title` - Recipe title referenced by the notification
    /// * `time` - Time of day the reminder should fire
    ///
    /// # Errors
    ///
    /// Returns `NamuError::NotificationsUnavailable` if no notification
    /// facility exists, or `NamuError::PermissionDenied` if permission is
    /// refused (after requesting it once when undetermined). Nothing is
    /// scheduled on failure.
    pub fn arm(&self, recipe_id: i64, title: &str, time: ReminderTime) -> Result<ReminderHandle> {
        if !self.notifier.available() {
            return Err(NamuError::NotificationsUnavailable.into());
        }

        let permission = match self.notifier.permission() {
            Permission::Undetermined => self.notifier.request_permission(),
            decided => decided,
        };
        if permission != Permission::Granted {
            tracing::warn!(recipe_id, "Notification permission denied, reminder not armed");
            return Err(NamuError::PermissionDenied.into());
        }

        let notifier = Arc::clone(&self.notifier);
        let clock = Arc::clone(&self.clock);
        let tick = self.tick;
        let title = title.to_string();

        let task = tokio::spawn(async move {
            let mut interval = tokio::time::interval(tick);
            loop {
                // The first tick completes immediately.
                interval.tick().await;
                check_reminder(recipe_id, &title, time, clock.as_ref(), notifier.as_ref());
            }
        });

        tracing::debug!(recipe_id, time = %time, "Reminder armed");
        Ok(ReminderHandle {
            abort: task.abort_handle(),
        })
    }
}

/// Compare the current local time to the target and fire on exact match
fn check_reminder(
    recipe_id: i64,
    title: &str,
    target: ReminderTime,
    clock: &dyn Clock,
    notifier: &dyn Notifier,
) {
    let (hour, minute) = clock.now_hour_minute();
    if hour == target.hour && minute == target.minute {
        notifier.show(&format!("Meal Reminder: {}", title), REMINDER_BODY);
        tracing::info!(recipe_id, title, time = %target, "Reminder notification fired");
        increment_counter!("reminder_notifications_total");
    }
}
