//
// Turns todo items into list rows for the page.
//

use crate::constants::COMPLETED_CLASS;
use crate::database_api::Rowid;
use crate::todo_item::TodoItem;

/// Handler bound to a row's checkbox `change` event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeListener {
    ToggleCompletion,
}

/// A rendered list row, the same shape as the page's row template:
///
/// ```html
/// <li id="item_tmpl" class="template">
///   <input type="checkbox" id="item_checkbox_tmpl" value="0"/>
///   <span id="item_text">Item Text</span>
/// </li>
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemRow {
    pub element_id: String,
    pub classes: Vec<String>,
    pub checkbox_id: String,
    pub checkbox_value: String,
    pub checked: bool,
    pub text: String,
    pub on_change: Option<ChangeListener>,
}

pub fn row_element_id(id: Rowid) -> String {
    format!("item_{}", id)
}

pub fn checkbox_element_id(id: Rowid) -> String {
    format!("item_checkbox_{}", id)
}

impl ItemRow {
    /// The hidden template row every item row starts from.
    pub fn template() -> ItemRow {
        ItemRow {
            element_id: "item_tmpl".to_string(),
            classes: vec!["template".to_string()],
            checkbox_id: "item_checkbox_tmpl".to_string(),
            checkbox_value: "0".to_string(),
            checked: false,
            text: "Item Text".to_string(),
            on_change: None,
        }
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    pub fn add_class(&mut self, class: &str) {
        if !self.has_class(class) {
            self.classes.push(class.to_string());
        }
    }

    pub fn remove_class(&mut self, class: &str) {
        self.classes.retain(|c| c != class);
    }

    pub fn set_completed(&mut self, completed: bool) {
        if completed {
            self.add_class(COMPLETED_CLASS);
        } else {
            self.remove_class(COMPLETED_CLASS);
        }
    }

    pub fn is_completed(&self) -> bool {
        self.has_class(COMPLETED_CLASS)
    }

    pub fn to_html(&self) -> String {
        let class = if self.classes.is_empty() {
            String::new()
        } else {
            format!(" class=\"{}\"", escape_html(&self.classes.join(" ")))
        };
        let checked = if self.checked { " checked" } else { "" };
        format!(
            "<li id=\"{}\"{}><input type=\"checkbox\" id=\"{}\" value=\"{}\"{}/><span id=\"item_text\">{}</span></li>",
            escape_html(&self.element_id),
            class,
            escape_html(&self.checkbox_id),
            escape_html(&self.checkbox_value),
            checked,
            escape_html(&self.text),
        )
    }
}

/// Build the row for `item` out of the template.
pub fn render_item(item: &TodoItem) -> ItemRow {
    let mut row = ItemRow::template();
    row.remove_class("template");
    row.set_completed(item.is_complete);
    row.element_id = row_element_id(item.id);
    row.text = item.text.clone();
    row.checkbox_value = item.id.to_string();
    row.checkbox_id = checkbox_element_id(item.id);
    row.checked = item.is_complete;
    row.on_change = Some(ChangeListener::ToggleCompletion);
    row
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
