//! Reminder scheduling integration tests
//!
//! Exercises the favorites store and reminder scheduler together over a
//! paused tokio clock. Tick alignment is pinned by the paused clock: the
//! immediate arm-time check runs first, then one check per 60-second
//! advance.

use std::sync::atomic::{AtomicU32, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use namunamu::favorites::FavoritesStore;
use namunamu::reminders::{Clock, Notifier, Permission, ReminderScheduler, ReminderTime};
use namunamu::storage::MemoryStore;

const RECIPE: &str = "# Recipe Title: Lemon Chicken\n\n## Ingredients\n- chicken\n- lemon\n";

/// Notifier counting fired notifications
struct CountingNotifier {
    permission: Permission,
    fired: AtomicUsize,
    titles: Mutex<Vec<String>>,
}

impl CountingNotifier {
    fn granted() -> Arc<Self> {
        Arc::new(Self {
            permission: Permission::Granted,
            fired: AtomicUsize::new(0),
            titles: Mutex::new(Vec::new()),
        })
    }

    fn denied() -> Arc<Self> {
        Arc::new(Self {
            permission: Permission::Denied,
            fired: AtomicUsize::new(0),
            titles: Mutex::new(Vec::new()),
        })
    }

    fn count(&self) -> usize {
        self.fired.load(Ordering::SeqCst)
    }
}

impl Notifier for CountingNotifier {
    fn available(&self) -> bool {
        true
    }

    fn permission(&self) -> Permission {
        self.permission
    }

    fn request_permission(&self) -> Permission {
        self.permission
    }

    fn show(&self, title: &str, _body: &str) {
        self.fired.fetch_add(1, Ordering::SeqCst);
        self.titles.lock().unwrap().push(title.to_string());
    }
}

/// Clock pinned to a settable hour and minute
struct SettableClock {
    hour: AtomicU32,
    minute: AtomicU32,
}

impl SettableClock {
    fn at(hour: u32, minute: u32) -> Arc<Self> {
        Arc::new(Self {
            hour: AtomicU32::new(hour),
            minute: AtomicU32::new(minute),
        })
    }

    fn set(&self, hour: u32, minute: u32) {
        self.hour.store(hour, Ordering::SeqCst);
        self.minute.store(minute, Ordering::SeqCst);
    }
}

impl Clock for SettableClock {
    fn now_hour_minute(&self) -> (u32, u32) {
        (
            self.hour.load(Ordering::SeqCst),
            self.minute.load(Ordering::SeqCst),
        )
    }
}

fn make_store(
    notifier: Arc<CountingNotifier>,
    clock: Arc<SettableClock>,
) -> FavoritesStore {
    let scheduler = ReminderScheduler::new(notifier).with_clock(clock);
    FavoritesStore::load(Arc::new(MemoryStore::new()), scheduler).expect("empty store loads")
}

/// Arming at the configured minute fires once immediately; a different
/// configured minute never fires.
#[tokio::test(start_paused = true)]
async fn test_reminder_fires_only_on_exact_minute() {
    let notifier = CountingNotifier::granted();
    let clock = SettableClock::at(14, 7);
    let store = make_store(notifier.clone(), clock.clone());

    let id = store.add(RECIPE).unwrap().id;
    store
        .toggle_reminder(id, ReminderTime::new(14, 7).unwrap())
        .unwrap();
    tokio::task::yield_now().await;
    assert_eq!(notifier.count(), 1);
    assert_eq!(notifier.titles.lock().unwrap()[0], "Meal Reminder: Lemon Chicken");

    // Re-configure to 14:08 while the clock still reads 14:07.
    store
        .toggle_reminder(id, ReminderTime::new(14, 8).unwrap())
        .unwrap();
    store
        .toggle_reminder(id, ReminderTime::new(14, 8).unwrap())
        .unwrap();
    tokio::task::yield_now().await;
    assert_eq!(notifier.count(), 1);

    // Clock reaches 14:08: the next tick fires.
    clock.set(14, 8);
    tokio::time::advance(Duration::from_secs(60)).await;
    tokio::task::yield_now().await;
    assert_eq!(notifier.count(), 2);
}

/// Removing a recipe cancels its timer exactly once; nothing fires for a
/// removed recipe.
#[tokio::test(start_paused = true)]
async fn test_removal_cancels_timer() {
    let notifier = CountingNotifier::granted();
    let clock = SettableClock::at(7, 30);
    let store = make_store(notifier.clone(), clock);

    let id = store.add(RECIPE).unwrap().id;
    store
        .toggle_reminder(id, ReminderTime::new(7, 30).unwrap())
        .unwrap();
    tokio::task::yield_now().await;
    let fired_before_removal = notifier.count();
    assert_eq!(fired_before_removal, 1);

    store.remove(id).unwrap();
    assert!(store.list().is_empty());

    tokio::time::advance(Duration::from_secs(600)).await;
    tokio::task::yield_now().await;
    assert_eq!(notifier.count(), fired_before_removal);
}

/// Re-arming replaces the prior timer; two timers never run for one recipe.
#[tokio::test(start_paused = true)]
async fn test_rearm_never_leaves_two_timers() {
    let notifier = CountingNotifier::granted();
    let clock = SettableClock::at(12, 0);
    let store = make_store(notifier.clone(), clock);

    let id = store.add(RECIPE).unwrap().id;
    let noon = ReminderTime::new(12, 0).unwrap();

    store.toggle_reminder(id, noon).unwrap();
    tokio::task::yield_now().await;
    // Disarm, then arm again.
    store.toggle_reminder(id, noon).unwrap();
    store.toggle_reminder(id, noon).unwrap();
    tokio::task::yield_now().await;
    let baseline = notifier.count();

    // One tick adds exactly one notification: only one timer is live.
    tokio::time::advance(Duration::from_secs(60)).await;
    tokio::task::yield_now().await;
    assert_eq!(notifier.count(), baseline + 1);
}

/// The armed flag and the configured time always move together.
#[tokio::test(start_paused = true)]
async fn test_armed_state_tracks_reminder_time() {
    let notifier = CountingNotifier::granted();
    let clock = SettableClock::at(3, 0);
    let store = make_store(notifier, clock);

    let id = store.add(RECIPE).unwrap().id;

    let recipe = &store.list()[0];
    assert!(!recipe.armed());
    assert!(recipe.reminder_time.is_none());

    store
        .toggle_reminder(id, ReminderTime::new(18, 45).unwrap())
        .unwrap();
    let recipe = &store.list()[0];
    assert!(recipe.armed());
    assert_eq!(recipe.reminder_time, Some(ReminderTime::new(18, 45).unwrap()));

    store.disarm_reminder(id).unwrap();
    let recipe = &store.list()[0];
    assert!(!recipe.armed());
    assert!(recipe.reminder_time.is_none());
}

/// Denied permission aborts arming without mutating the recipe.
#[tokio::test(start_paused = true)]
async fn test_denied_permission_arms_nothing() {
    let notifier = CountingNotifier::denied();
    let clock = SettableClock::at(9, 0);
    let store = make_store(notifier.clone(), clock);

    let id = store.add(RECIPE).unwrap().id;
    let result = store.toggle_reminder(id, ReminderTime::new(9, 0).unwrap());

    assert!(result.is_err());
    let recipe = &store.list()[0];
    assert!(!recipe.armed());
    assert!(recipe.reminder_time.is_none());

    tokio::time::advance(Duration::from_secs(120)).await;
    tokio::task::yield_now().await;
    assert_eq!(notifier.count(), 0);
}

/// Disarming an unarmed recipe is a no-op, not an error.
#[tokio::test(start_paused = true)]
async fn test_disarm_unarmed_is_noop() {
    let notifier = CountingNotifier::granted();
    let clock = SettableClock::at(9, 0);
    let store = make_store(notifier, clock);

    let id = store.add(RECIPE).unwrap().id;
    assert!(store.disarm_reminder(id).is_ok());
    assert!(store.disarm_reminder(id).is_ok());
}
