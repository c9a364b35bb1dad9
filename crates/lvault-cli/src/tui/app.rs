//! Application state and logic

use std::time::{Duration, Instant};

use lvault_core::{
    browser_url, DeleteOutcome, KeyValueStore, LinkInput, LinkRecord, LinkStore, ValidationError,
};

/// How long a status message stays visible
const STATUS_TIMEOUT: Duration = Duration::from_secs(5);

/// Current input mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    /// Navigating the list
    Normal,
    /// Typing a search term (filters live)
    Search,
    /// Filling in the add/edit form
    Form,
    /// Waiting for y/n on a delete
    ConfirmDelete,
}

/// Field of the add/edit form that has focus
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Title,
    Url,
    Description,
    Tags,
}

impl FormField {
    /// All fields in display order
    pub const ALL: [FormField; 4] = [
        FormField::Title,
        FormField::Url,
        FormField::Description,
        FormField::Tags,
    ];

    /// Move to the next field (wrapping)
    pub fn next(self) -> Self {
        match self {
            FormField::Title => FormField::Url,
            FormField::Url => FormField::Description,
            FormField::Description => FormField::Tags,
            FormField::Tags => FormField::Title,
        }
    }

    /// Move to the previous field (wrapping)
    pub fn prev(self) -> Self {
        match self {
            FormField::Title => FormField::Tags,
            FormField::Url => FormField::Title,
            FormField::Description => FormField::Url,
            FormField::Tags => FormField::Description,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            FormField::Title => "Title *",
            FormField::Url => "URL *",
            FormField::Description => "Description",
            FormField::Tags => "Tags (comma-separated)",
        }
    }
}

/// The add/edit form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Form {
    /// Id of the link being edited, `None` when adding
    pub editing: Option<i64>,
    /// Current field values
    pub input: LinkInput,
    /// Focused field
    pub field: FormField,
}

impl Form {
    fn add() -> Self {
        Self {
            editing: None,
            input: LinkInput::default(),
            field: FormField::Title,
        }
    }

    fn edit(link: &LinkRecord) -> Self {
        Self {
            editing: Some(link.id),
            input: LinkInput::from_record(link),
            field: FormField::Title,
        }
    }

    pub fn title(&self) -> &'static str {
        if self.editing.is_some() {
            "Edit Link"
        } else {
            "Add New Link"
        }
    }

    /// Text of a field
    pub fn value(&self, field: FormField) -> &str {
        match field {
            FormField::Title => &self.input.title,
            FormField::Url => &self.input.url,
            FormField::Description => &self.input.description,
            FormField::Tags => &self.input.tags,
        }
    }

    fn focused_mut(&mut self) -> &mut String {
        match self.field {
            FormField::Title => &mut self.input.title,
            FormField::Url => &mut self.input.url,
            FormField::Description => &mut self.input.description,
            FormField::Tags => &mut self.input.tags,
        }
    }
}

/// Application state
pub struct App {
    /// Whether the app should exit
    pub should_quit: bool,
    /// Current input mode
    pub input_mode: InputMode,
    /// Active search term
    pub search_term: String,
    /// Links matching the search term, newest first
    pub links: Vec<LinkRecord>,
    /// Size of the whole collection
    pub total: usize,
    /// Currently selected link index
    pub link_index: usize,
    /// Open add/edit form
    pub form: Option<Form>,
    /// Link waiting for delete confirmation
    pub pending_delete: Option<LinkRecord>,
    /// Status message to display temporarily
    pub status_message: Option<String>,
    /// Whether the status message is an error
    pub status_is_error: bool,
    /// When the status message was set
    status_time: Option<Instant>,
}

impl App {
    /// Create a new app showing every link in the store
    pub fn new<S: KeyValueStore>(store: &LinkStore<S>) -> Self {
        let mut app = Self {
            should_quit: false,
            input_mode: InputMode::Normal,
            search_term: String::new(),
            links: Vec::new(),
            total: 0,
            link_index: 0,
            form: None,
            pending_delete: None,
            status_message: None,
            status_is_error: false,
            status_time: None,
        };
        app.refresh(store);
        app
    }

    /// Re-run the search against the store, keeping the selection in range
    pub fn refresh<S: KeyValueStore>(&mut self, store: &LinkStore<S>) {
        self.links = store
            .search(&self.search_term)
            .into_iter()
            .cloned()
            .collect();
        self.total = store.len();
        self.link_index = self.link_index.min(self.links.len().saturating_sub(1));
    }

    /// Get the currently selected link
    pub fn current_link(&self) -> Option<&LinkRecord> {
        self.links.get(self.link_index)
    }

    /// Select the link with `id` if it is visible
    fn select_id(&mut self, id: i64) {
        if let Some(pos) = self.links.iter().position(|l| l.id == id) {
            self.link_index = pos;
        }
    }

    // ==================== Status ====================

    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
        self.status_is_error = false;
        self.status_time = Some(Instant::now());
    }

    pub fn set_error(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
        self.status_is_error = true;
        self.status_time = Some(Instant::now());
    }

    /// Clear the status message once it has been shown long enough
    pub fn check_status_timeout(&mut self) {
        if let Some(time) = self.status_time {
            if time.elapsed() >= STATUS_TIMEOUT {
                self.clear_status();
            }
        }
    }

    pub fn clear_status(&mut self) {
        self.status_message = None;
        self.status_is_error = false;
        self.status_time = None;
    }

    /// Surface a failed write from the last mutation
    fn report_save_error<S: KeyValueStore>(&mut self, store: &mut LinkStore<S>) {
        if let Some(e) = store.take_save_error() {
            self.set_error(format!("Changes were not saved: {}", e));
        }
    }

    // ==================== Navigation ====================

    pub fn move_up(&mut self) {
        if self.link_index > 0 {
            self.link_index -= 1;
        }
    }

    pub fn move_down(&mut self) {
        if self.link_index < self.links.len().saturating_sub(1) {
            self.link_index += 1;
        }
    }

    pub fn move_to_first(&mut self) {
        self.link_index = 0;
    }

    pub fn move_to_last(&mut self) {
        self.link_index = self.links.len().saturating_sub(1);
    }

    /// Open the selected link in the browser
    pub fn open_current(&mut self) {
        let Some(link) = self.current_link() else {
            return;
        };
        let url = browser_url(&link.url);

        match open::that(&url) {
            Ok(()) => self.set_status(format!("Opened {}", url)),
            Err(e) => self.set_error(format!("Failed to open: {}", e)),
        }
    }

    // ==================== Search ====================

    pub fn enter_search_mode(&mut self) {
        self.input_mode = InputMode::Search;
    }

    pub fn search_insert_char<S: KeyValueStore>(&mut self, store: &LinkStore<S>, c: char) {
        self.search_term.push(c);
        self.link_index = 0;
        self.refresh(store);
    }

    pub fn search_delete_char<S: KeyValueStore>(&mut self, store: &LinkStore<S>) {
        self.search_term.pop();
        self.link_index = 0;
        self.refresh(store);
    }

    /// Leave search mode keeping the term
    pub fn finish_search(&mut self) {
        self.input_mode = InputMode::Normal;
    }

    /// Leave search mode and show everything again
    pub fn clear_search<S: KeyValueStore>(&mut self, store: &LinkStore<S>) {
        self.search_term.clear();
        self.input_mode = InputMode::Normal;
        self.refresh(store);
    }

    // ==================== Form ====================

    pub fn open_add_form(&mut self) {
        self.form = Some(Form::add());
        self.input_mode = InputMode::Form;
    }

    pub fn open_edit_form(&mut self) {
        if let Some(link) = self.current_link() {
            self.form = Some(Form::edit(link));
            self.input_mode = InputMode::Form;
        }
    }

    pub fn close_form(&mut self) {
        self.form = None;
        self.input_mode = InputMode::Normal;
    }

    pub fn form_next_field(&mut self) {
        if let Some(form) = self.form.as_mut() {
            form.field = form.field.next();
        }
    }

    pub fn form_prev_field(&mut self) {
        if let Some(form) = self.form.as_mut() {
            form.field = form.field.prev();
        }
    }

    pub fn form_insert_char(&mut self, c: char) {
        if let Some(form) = self.form.as_mut() {
            form.focused_mut().push(c);
        }
    }

    pub fn form_delete_char(&mut self) {
        if let Some(form) = self.form.as_mut() {
            form.focused_mut().pop();
        }
    }

    /// Create or update from the form
    ///
    /// On a validation error the form stays open with its contents.
    pub fn submit_form<S: KeyValueStore>(&mut self, store: &mut LinkStore<S>) {
        let Some(form) = self.form.as_ref() else {
            return;
        };

        let result = match form.editing {
            None => store.create(&form.input).map(|link| Some(link.id)),
            Some(id) => store
                .update(id, &form.input)
                .map(|link| link.map(|l| l.id)),
        };

        match result {
            Ok(Some(id)) => {
                let message = if form.editing.is_some() {
                    "Link updated"
                } else {
                    "Link added"
                };
                self.close_form();
                self.refresh(store);
                self.select_id(id);
                self.set_status(message);
            }
            Ok(None) => {
                self.close_form();
                self.refresh(store);
                self.set_error("Link no longer exists");
            }
            Err(e) => {
                if let Some(form) = self.form.as_mut() {
                    form.field = match e {
                        ValidationError::MissingTitle => FormField::Title,
                        ValidationError::MissingUrl => FormField::Url,
                    };
                }
                self.set_error(e.to_string());
                return;
            }
        }

        self.report_save_error(store);
    }

    // ==================== Delete ====================

    /// Ask before deleting the selected link
    pub fn request_delete(&mut self) {
        if let Some(link) = self.current_link() {
            self.pending_delete = Some(link.clone());
            self.input_mode = InputMode::ConfirmDelete;
        }
    }

    /// Finish a delete request with the user's answer
    pub fn resolve_delete<S: KeyValueStore>(&mut self, store: &mut LinkStore<S>, confirmed: bool) {
        self.input_mode = InputMode::Normal;
        let Some(pending) = self.pending_delete.take() else {
            return;
        };

        match store.delete(pending.id, |_| confirmed) {
            DeleteOutcome::Deleted(link) => {
                self.refresh(store);
                self.set_status(format!("Deleted: {}", link.title));
                self.report_save_error(store);
            }
            DeleteOutcome::Cancelled => self.set_status("Cancelled"),
            DeleteOutcome::NotFound => {
                self.refresh(store);
                self.set_error("Link no longer exists");
            }
        }
    }
}
