//! Favorited recipes with local persistence and reminder wiring
//!
//! Recipes persist as JSON under the `favoriteRecipes` storage key. A
//! recipe's live timer handle is never serialized; it exists exactly while
//! the recipe's reminder is armed, and removal always cancels the timer
//! before the record is discarded.

use crate::error::{NamuError, Result};
use crate::reminders::{ReminderHandle, ReminderScheduler, ReminderTime};
use crate::storage::KeyValueStore;
use crate::stores::cell::StateCell;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex};

const STORAGE_KEY: &str = "favoriteRecipes";
const TITLE_PATTERN: &str = r"(?m)^#?\s*Recipe Title:\s*(.*)";

/// A favorited recipe
///
/// `content` is the full formatted recipe text and is immutable after
/// creation. The reminder handle is runtime-only state: present if and only
/// if the reminder is currently armed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavedRecipe {
    /// Unique identifier, assigned at creation time
    pub id: i64,
    /// Title extracted from the content at creation time
    pub title: String,
    /// Full formatted recipe text
    pub content: String,
    /// Creation time, epoch milliseconds
    pub timestamp: i64,
    /// Configured reminder time of day, if any
    pub reminder_time: Option<ReminderTime>,
    /// Live timer handle while the reminder is armed
    #[serde(skip)]
    reminder_handle: Option<ReminderHandle>,
}

impl SavedRecipe {
    /// Whether this recipe's reminder is currently armed
    pub fn armed(&self) -> bool {
        self.reminder_handle.is_some()
    }
}

/// Store of favorited recipes
///
/// All mutations run under one lock so that arm, disarm, and removal each
/// observe a consistent recipe list and timer-handle set. Every change is
/// persisted and republished to subscribers.
pub struct FavoritesStore {
    storage: Arc<dyn KeyValueStore>,
    scheduler: ReminderScheduler,
    recipes: Mutex<Vec<SavedRecipe>>,
    cell: StateCell<Vec<SavedRecipe>>,
    title_pattern: Regex,
}

impl FavoritesStore {
    /// Load the store from persistence
    ///
    /// # Arguments
    ///
    /// * `storage` - Key-value persistence backend
    /// * `scheduler` - Reminder scheduler used by [`FavoritesStore::toggle_reminder`]
    ///
    /// # Errors
    ///
    /// Returns error if persistence fails or holds malformed JSON
    pub fn load(storage: Arc<dyn KeyValueStore>, scheduler: ReminderScheduler) -> Result<Self> {
        let stored = storage.get(STORAGE_KEY)?.unwrap_or_else(|| "[]".to_string());
        let recipes: Vec<SavedRecipe> = serde_json::from_str(&stored)?;

        let title_pattern = Regex::new(TITLE_PATTERN)
            .map_err(|e| NamuError::Config(format!("Invalid title pattern: {}", e)))?;

        let cell = StateCell::new(recipes.clone());
        Ok(Self {
            storage,
            scheduler,
            recipes: Mutex::new(recipes),
            cell,
            title_pattern,
        })
    }

    /// Favorite a recipe
    ///
    /// The id is derived from the creation time (epoch milliseconds),
    /// monotonicized so two recipes created within the same millisecond
    /// still get distinct ids. The title comes from the first
    /// `Recipe Title:` heading in the content, falling back to an untitled
    /// placeholder embedding the id.
    ///
    /// # Errors
    ///
    /// Returns error if persistence fails
    pub fn add(&self, content: &str) -> Result<SavedRecipe> {
        let mut recipes = self.lock_recipes()?;

        let now_ms = chrono::Utc::now().timestamp_millis();
        let last_id = recipes.iter().map(|r| r.id).max().unwrap_or(0);
        let id = now_ms.max(last_id + 1);

        let title = self
            .extract_title(content)
            .unwrap_or_else(|| format!("Untitled Recipe {}", id));

        let recipe = SavedRecipe {
            id,
            title,
            content: content.to_string(),
            timestamp: now_ms,
            reminder_time: None,
            reminder_handle: None,
        };

        recipes.push(recipe.clone());
        self.persist_and_publish(&recipes)?;
        tracing::debug!(id, title = %recipe.title, "Recipe favorited");
        Ok(recipe)
    }

    /// Remove a favorited recipe
    ///
    /// Cancels the recipe's reminder timer, if armed, before discarding the
    /// record. Removing an unknown id is a no-op.
    ///
    /// # Errors
    ///
    /// Returns error if persistence fails
    pub fn remove(&self, id: i64) -> Result<()> {
        let mut recipes = self.lock_recipes()?;

        let Some(position) = recipes.iter().position(|r| r.id == id) else {
            return Ok(());
        };

        let recipe = recipes.remove(position);
        if let Some(handle) = recipe.reminder_handle {
            handle.cancel();
            tracing::debug!(id, "Reminder cancelled on removal");
        }

        self.persist_and_publish(&recipes)
    }

    /// Toggle a recipe's reminder
    ///
    /// If the reminder is armed, disarms it (clearing both the configured
    /// time and the timer). Otherwise arms it at `time`. Toggling an
    /// unknown id is a no-op.
    ///
    /// # Errors
    ///
    /// Propagates `NamuError::NotificationsUnavailable` and
    /// `NamuError::PermissionDenied` from arming; no state is mutated on
    /// failure. Returns error if persistence fails.
    pub fn toggle_reminder(&self, id: i64, time: ReminderTime) -> Result<()> {
        let mut recipes = self.lock_recipes()?;

        let Some(recipe) = recipes.iter_mut().find(|r| r.id == id) else {
            return Ok(());
        };

        if let Some(handle) = recipe.reminder_handle.take() {
            handle.cancel();
            recipe.reminder_time = None;
        } else {
            let handle = self.scheduler.arm(recipe.id, &recipe.title, time)?;
            recipe.reminder_time = Some(time);
            recipe.reminder_handle = Some(handle);
        }

        self.persist_and_publish(&recipes)
    }

    /// Disarm a recipe's reminder if armed
    ///
    /// A no-op (not an error) when the recipe is unknown or its reminder is
    /// not armed.
    ///
    /// # Errors
    ///
    /// Returns error if persistence fails
    pub fn disarm_reminder(&self, id: i64) -> Result<()> {
        let mut recipes = self.lock_recipes()?;

        let Some(recipe) = recipes.iter_mut().find(|r| r.id == id) else {
            return Ok(());
        };
        let Some(handle) = recipe.reminder_handle.take() else {
            return Ok(());
        };

        handle.cancel();
        recipe.reminder_time = None;
        self.persist_and_publish(&recipes)
    }

    /// Snapshot the current recipe list
    pub fn list(&self) -> Vec<SavedRecipe> {
        self.cell.get()
    }

    /// Subscribe to recipe list changes
    pub fn subscribe(&self) -> tokio::sync::watch::Receiver<Vec<SavedRecipe>> {
        self.cell.subscribe()
    }

    fn lock_recipes(&self) -> Result<std::sync::MutexGuard<'_, Vec<SavedRecipe>>> {
        self.recipes
            .lock()
            .map_err(|_| NamuError::Storage("Favorites lock poisoned".to_string()).into())
    }

    fn extract_title(&self, content: &str) -> Option<String> {
        self.title_pattern
            .captures(content)
            .and_then(|captures| captures.get(1))
            .map(|title| title.as_str().trim().to_string())
            .filter(|title| !title.is_empty())
    }

    fn persist_and_publish(&self, recipes: &[SavedRecipe]) -> Result<()> {
        let json = serde_json::to_string(recipes)?;
        self.storage.set(STORAGE_KEY, &json)?;
        self.cell.set(recipes.to_vec());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reminders::tests::{FixedClock, MockNotifier};
    use crate::reminders::Permission;
    use crate::storage::MemoryStore;

    const RECIPE: &str = "# Recipe Title: Garlic Butter Pasta\n\n## Ingredients\n- pasta\n";

    fn make_store() -> FavoritesStore {
        make_store_with(Arc::new(MockNotifier::granted()))
    }

    fn make_store_with(notifier: Arc<MockNotifier>) -> FavoritesStore {
        let scheduler =
            ReminderScheduler::new(notifier).with_clock(Arc::new(FixedClock::at(3, 0)));
        FavoritesStore::load(Arc::new(MemoryStore::new()), scheduler).unwrap()
    }

    #[test]
    fn test_add_extracts_title() {
        let store = make_store();
        let recipe = store.add(RECIPE).unwrap();
        assert_eq!(recipe.title, "Garlic Butter Pasta");
        assert_eq!(recipe.content, RECIPE);
        assert!(!recipe.armed());
    }

    #[test]
    fn test_add_without_heading_uses_fallback_title() {
        let store = make_store();
        let recipe = store.add("just some text").unwrap();
        assert_eq!(recipe.title, format!("Untitled Recipe {}", recipe.id));
    }

    #[test]
    fn test_add_extracts_unhashed_heading() {
        let store = make_store();
        let recipe = store.add("Recipe Title: Miso Soup\nrest").unwrap();
        assert_eq!(recipe.title, "Miso Soup");
    }

    #[test]
    fn test_ids_are_unique_within_a_burst() {
        let store = make_store();
        let a = store.add("one").unwrap();
        let b = store.add("two").unwrap();
        let c = store.add("three").unwrap();
        assert!(a.id < b.id);
        assert!(b.id < c.id);
    }

    #[test]
    fn test_remove_unknown_id_is_noop() {
        let store = make_store();
        store.add(RECIPE).unwrap();
        store.remove(999).unwrap();
        assert_eq!(store.list().len(), 1);
    }

    #[test]
    fn test_persistence_roundtrip() {
        let storage = Arc::new(MemoryStore::new());
        let scheduler = ReminderScheduler::new(Arc::new(MockNotifier::granted()));
        let id = {
            let store = FavoritesStore::load(storage.clone(), scheduler).unwrap();
            store.add(RECIPE).unwrap().id
        };

        let scheduler = ReminderScheduler::new(Arc::new(MockNotifier::granted()));
        let store = FavoritesStore::load(storage, scheduler).unwrap();
        let recipes = store.list();
        assert_eq!(recipes.len(), 1);
        assert_eq!(recipes[0].id, id);
        assert_eq!(recipes[0].title, "Garlic Butter Pasta");
        // Armed state never survives a reload.
        assert!(!recipes[0].armed());
    }

    #[test]
    fn test_corrupt_persisted_json_fails_load() {
        let storage = Arc::new(MemoryStore::new());
        storage.set(STORAGE_KEY, "{not json").unwrap();

        let scheduler = ReminderScheduler::new(Arc::new(MockNotifier::granted()));
        assert!(FavoritesStore::load(storage, scheduler).is_err());
    }

    #[tokio::test]
    async fn test_toggle_arms_then_disarms() {
        let store = make_store();
        let id = store.add(RECIPE).unwrap().id;
        let time = ReminderTime::new(14, 7).unwrap();

        store.toggle_reminder(id, time).unwrap();
        let recipe = &store.list()[0];
        assert!(recipe.armed());
        assert_eq!(recipe.reminder_time, Some(time));

        store.toggle_reminder(id, time).unwrap();
        let recipe = &store.list()[0];
        assert!(!recipe.armed());
        assert_eq!(recipe.reminder_time, None);
    }

    #[tokio::test]
    async fn test_armed_iff_handle_present_after_every_operation() {
        let store = make_store();
        let id = store.add(RECIPE).unwrap().id;
        let time = ReminderTime::new(6, 30).unwrap();

        let recipe = &store.list()[0];
        assert_eq!(recipe.armed(), recipe.reminder_time.is_some());

        store.toggle_reminder(id, time).unwrap();
        let recipe = &store.list()[0];
        assert_eq!(recipe.armed(), recipe.reminder_time.is_some());

        store.disarm_reminder(id).unwrap();
        let recipe = &store.list()[0];
        assert_eq!(recipe.armed(), recipe.reminder_time.is_some());
    }

    #[tokio::test]
    async fn test_denied_permission_leaves_recipe_unarmed() {
        let notifier = Arc::new(MockNotifier::with_permission(Permission::Denied));
        let store = make_store_with(notifier);
        let id = store.add(RECIPE).unwrap().id;

        let result = store.toggle_reminder(id, ReminderTime::new(9, 0).unwrap());
        assert!(result.is_err());

        let recipe = &store.list()[0];
        assert!(!recipe.armed());
        assert_eq!(recipe.reminder_time, None);
    }

    #[tokio::test]
    async fn test_disarm_unarmed_recipe_is_noop() {
        let store = make_store();
        let id = store.add(RECIPE).unwrap().id;

        store.disarm_reminder(id).unwrap();
        store.disarm_reminder(id).unwrap();
        assert!(!store.list()[0].armed());
    }

    #[tokio::test(start_paused = true)]
    async fn test_remove_cancels_armed_timer() {
        let notifier = Arc::new(MockNotifier::granted());
        let scheduler = ReminderScheduler::new(notifier.clone())
            .with_clock(Arc::new(FixedClock::at(14, 7)));
        let store = FavoritesStore::load(Arc::new(MemoryStore::new()), scheduler).unwrap();

        let id = store.add(RECIPE).unwrap().id;
        store
            .toggle_reminder(id, ReminderTime::new(14, 7).unwrap())
            .unwrap();

        // Immediate check fired once.
        tokio::task::yield_now().await;
        assert_eq!(notifier.shown_count(), 1);

        store.remove(id).unwrap();
        assert!(store.list().is_empty());

        // No timer callback fires for a removed recipe.
        tokio::time::advance(std::time::Duration::from_secs(180)).await;
        tokio::task::yield_now().await;
        assert_eq!(notifier.shown_count(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_rearm_cancels_prior_timer() {
        let notifier = Arc::new(MockNotifier::granted());
        let scheduler = ReminderScheduler::new(notifier.clone())
            .with_clock(Arc::new(FixedClock::at(14, 7)));
        let store = FavoritesStore::load(Arc::new(MemoryStore::new()), scheduler).unwrap();

        let id = store.add(RECIPE).unwrap().id;
        let time = ReminderTime::new(14, 7).unwrap();

        // Toggle off and on again: disarm then re-arm.
        store.toggle_reminder(id, time).unwrap();
        tokio::task::yield_now().await;
        store.toggle_reminder(id, time).unwrap();
        store.toggle_reminder(id, time).unwrap();
        tokio::task::yield_now().await;
        let fired_after_rearm = notifier.shown_count();

        // Were two timers alive, each tick would add two notifications.
        tokio::time::advance(std::time::Duration::from_secs(60)).await;
        tokio::task::yield_now().await;
        assert_eq!(notifier.shown_count(), fired_after_rearm + 1);
    }

    #[tokio::test]
    async fn test_subscriber_sees_additions() {
        let store = make_store();
        let mut rx = store.subscribe();

        store.add(RECIPE).unwrap();
        rx.changed().await.unwrap();
        assert_eq!(rx.borrow().len(), 1);
    }
}
