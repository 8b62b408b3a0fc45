use crate::api_client::ApiClient;
use crate::api_model::AddItem;
use crate::api_model::UpdateItem;
use crate::constants::LIST_FETCH_ERROR;
use crate::database_api::Rowid;
use crate::error::Error;
use crate::error::ErrorContext;
use crate::error::Result;
use crate::list_renderer::render_item;
use crate::list_renderer::row_element_id;
use crate::list_renderer::ChangeListener;
use crate::list_renderer::ItemRow;
use log::debug;
use log::warn;

/// State of one checkbox as the page shows it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckboxState {
    pub value: String,
    pub checked: bool,
}

/// The page the controller keeps in sync. Implemented by whatever owns the
/// actual document; the controller only calls into it.
pub trait TodoPage {
    /// Append a rendered row to the visible list.
    fn append_row(&mut self, row: ItemRow);
    fn checkbox(&self, checkbox_id: &str) -> Option<CheckboxState>;
    /// Text displayed in the row with element id `row_id`.
    fn row_text(&self, row_id: &str) -> Option<String>;
    fn set_row_completed(&mut self, row_id: &str, completed: bool);
    fn input_text(&self) -> String;
    fn clear_input(&mut self);
    fn show_error(&mut self, message: &str);
}

/// Submit event of the add form.
#[derive(Debug, Default)]
pub struct SubmitEvent {
    default_prevented: bool,
}

impl SubmitEvent {
    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    pub fn default_prevented(&self) -> bool {
        self.default_prevented
    }
}

pub struct SyncController<P: TodoPage> {
    client: ApiClient,
    page: P,
}

impl<P: TodoPage> SyncController<P> {
    pub fn new(client: ApiClient, page: P) -> SyncController<P> {
        SyncController { client, page }
    }

    pub fn page(&self) -> &P {
        &self.page
    }

    pub fn page_mut(&mut self) -> &mut P {
        &mut self.page
    }

    /// Fetch the whole list and append a row per item.
    /// A failed fetch leaves the list alone and shows an error message instead.
    pub async fn load(&mut self) -> Result<()> {
        match self.client.list().await {
            Ok(items) => {
                debug!("Loaded {} todo items", items.len());
                for item in &items {
                    self.page.append_row(render_item(item));
                }
                Ok(())
            }
            Err(err) => {
                warn!("Failed to fetch todo items: {}", err);
                self.page.show_error(LIST_FETCH_ERROR);
                Err(err)
            }
        }
    }

    /// Route a bound checkbox listener to its handler.
    pub async fn dispatch_change(
        &mut self,
        listener: ChangeListener,
        checkbox_id: &str,
    ) -> Result<()> {
        match listener {
            ChangeListener::ToggleCompletion => self.on_checkbox_change(checkbox_id).await,
        }
    }

    /// Send the row's current state as an update, then mark the row
    /// completed or not according to what the server saved.
    pub async fn on_checkbox_change(&mut self, checkbox_id: &str) -> Result<()> {
        let checkbox = self.page.checkbox(checkbox_id).ok_or_else(|| {
            Error::bad_request(format!("No checkbox {} on the page", checkbox_id))
        })?;
        let id = checkbox.value.parse::<Rowid>().map_err(|err| {
            Error::bad_request(format!(
                "Checkbox value {:?} is not an id, {}",
                checkbox.value, err
            ))
        })?;
        let text = self.page.row_text(&row_element_id(id)).ok_or_else(|| {
            Error::bad_request(format!("No row for item {} on the page", id))
        })?;
        let body = UpdateItem {
            id,
            text,
            is_complete: checkbox.checked,
        };
        let outcome = self
            .client
            .update(&body)
            .await
            .context(|| format!("Failed to update item {}", id))?;
        let row_id = row_element_id(outcome.item.id);
        self.page.set_row_completed(&row_id, outcome.item.is_complete);
        Ok(())
    }

    /// Add the input's text as a new item and append its row.
    pub async fn on_submit(&mut self, event: &mut SubmitEvent) -> Result<()> {
        event.prevent_default();
        let body = AddItem {
            text: self.page.input_text(),
        };
        let outcome = self
            .client
            .add(&body)
            .await
            .context_str("Failed to add item")?;
        self.page.clear_input();
        self.page.append_row(render_item(&outcome.item));
        Ok(())
    }
}
