use crate::repository::require_registered;
use crate::{DiaryError, DiaryRepository, Notification, Result as DiaryErrorResult};

use confide_core::{DiaryDraft, DiaryEntry, Identity};

use std::mem;

use log::debug;

/// Headless controller for the private diary page.
///
/// Holds the last snapshot fetched from the store. Every successful mutation
/// is followed by exactly one full refresh; nothing is patched locally.
/// Outcomes are queued as notifications for the caller to display.
#[derive(Debug)]
pub struct DiaryView {
    repository: DiaryRepository,
    entries: Vec<DiaryEntry>,
    is_loading: bool,
    editing: Option<String>,
    notifications: Vec<Notification>,
}

impl DiaryView {
    pub fn new(repository: DiaryRepository) -> Self {
        Self {
            repository,
            entries: Vec::new(),
            is_loading: true,
            editing: None,
            notifications: Vec::new(),
        }
    }

    /// Loads the page for `identity`. Only registered identities are fetched.
    pub async fn open(&mut self, identity: Option<&Identity>) -> DiaryErrorResult<()> {
        match identity {
            Some(owner) if owner.is_registered() => self.refresh(owner).await,
            _ => {
                self.entries.clear();
                self.is_loading = false;
                Ok(())
            }
        }
    }

    /// Replaces the snapshot with a fresh listing. On failure the previous
    /// snapshot stays.
    pub async fn refresh(&mut self, owner: &Identity) -> DiaryErrorResult<()> {
        let result = self.repository.list(owner).await;
        self.is_loading = false;
        match result {
            Ok(entries) => {
                self.entries = entries;
                Ok(())
            }
            Err(e) => {
                self.notify(Notification::destructive(
                    "Error",
                    "Could not load your diary entries.",
                ));
                Err(e)
            }
        }
    }

    /// Resets the form for a new entry.
    pub fn start_new(&mut self) -> DiaryDraft {
        self.editing = None;
        DiaryDraft::default()
    }

    /// Switches the form to editing `entry`, pre-filled with its fields.
    pub fn start_edit(&mut self, entry: &DiaryEntry) -> DiaryDraft {
        self.editing = Some(entry.id.clone());
        DiaryDraft::from_entry(entry)
    }

    pub fn cancel_edit(&mut self) {
        self.editing = None;
    }

    /// Saves the form: an update when editing, otherwise a new entry.
    pub async fn submit(
        &mut self,
        identity: Option<&Identity>,
        draft: &DiaryDraft,
    ) -> DiaryErrorResult<()> {
        let owner = self.require_member(identity)?;

        if let Err(e) = draft.validate() {
            self.notify(Notification::destructive(
                "Error",
                "Title and content are required.",
            ));
            return Err(e.into());
        }

        let editing = self.editing.clone();
        let saved = match editing.as_deref() {
            Some(id) => self.repository.update(id, draft).await,
            None => self.repository.create(owner, draft).await.map(|_| ()),
        };

        if let Err(e) = saved {
            self.notify(Notification::destructive(
                "Error",
                "Could not save the entry. Please try again.",
            ));
            return Err(e);
        }

        self.notify(match editing {
            Some(_) => Notification::success("Updated!", "Your entry was updated."),
            None => Notification::success("Saved!", "Your entry was saved to your private diary."),
        });
        self.editing = None;

        // The save already happened; a failed reload is reported on its own.
        let _ = self.refresh(owner).await;
        Ok(())
    }

    /// Deletes an entry permanently and reloads the list.
    pub async fn delete(
        &mut self,
        identity: Option<&Identity>,
        id: &str,
    ) -> DiaryErrorResult<()> {
        let owner = self.require_member(identity)?;

        if let Err(e) = self.repository.delete(id).await {
            self.notify(Notification::destructive(
                "Error",
                "Could not delete the entry.",
            ));
            return Err(e);
        }

        self.notify(Notification::success(
            "Deleted",
            "The entry was removed from your diary.",
        ));
        if self.editing.as_deref() == Some(id) {
            self.editing = None;
        }

        let _ = self.refresh(owner).await;
        Ok(())
    }

    /// The last fetched snapshot, newest first.
    pub fn entries(&self) -> &[DiaryEntry] {
        &self.entries
    }

    pub fn find(&self, id: &str) -> Option<&DiaryEntry> {
        self.entries.iter().find(|entry| entry.id == id)
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn is_editing(&self) -> bool {
        self.editing.is_some()
    }

    /// Drains queued notifications, oldest first.
    pub fn take_notifications(&mut self) -> Vec<Notification> {
        mem::take(&mut self.notifications)
    }

    fn require_member<'a>(
        &mut self,
        identity: Option<&'a Identity>,
    ) -> DiaryErrorResult<&'a Identity> {
        let checked = match identity {
            Some(owner) => require_registered(owner).map(|()| owner),
            None => Err(DiaryError::not_authenticated()),
        };
        if checked.is_err() {
            self.notify(Notification::destructive(
                "Sign-in required",
                "You need to sign in to use the private diary.",
            ));
        }
        checked
    }

    fn notify(&mut self, notification: Notification) {
        debug!("Notification: {notification}");
        self.notifications.push(notification);
    }
}
