//! Render models for the list and its items.
//!
//! Views are plain values computed from [`TodoState`]. Rendering to HTML is
//! a convenience for the demo binary; any other surface can read the fields.

use crate::types::{TodoAction, TodoId, TodoItem, TodoState};
use std::fmt::Write as _;

/// One rendered item
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TodoItemView {
    /// Stable row key
    pub key: TodoId,
    /// Display text
    pub label: String,
    /// Checkbox state
    pub checked: bool,
}

impl TodoItemView {
    /// Maps an item to its view
    #[must_use]
    pub fn new(item: &TodoItem) -> Self {
        Self {
            key: item.id.clone(),
            label: item.value.clone(),
            checked: item.checked,
        }
    }

    /// Forward a checkbox change: calls `callback` with this item's id
    pub fn on_change<F>(&self, callback: F)
    where
        F: FnOnce(TodoId),
    {
        callback(self.key.clone());
    }

    /// The action a checkbox change sends to the container
    #[must_use]
    pub fn toggle_action(&self) -> TodoAction {
        TodoAction::Toggle { id: self.key.clone() }
    }

    /// Renders the item as a heading with a checkbox
    #[must_use]
    pub fn render_html(&self) -> String {
        format!(
            r#"<h4>{} <input type="checkbox"{}></h4>"#,
            escape_html(&self.label),
            if self.checked { " checked" } else { "" }
        )
    }
}

/// The rendered list: the featured item plus every item in order
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TodoListView {
    /// Featured item, if the list is non-empty
    pub featured: Option<TodoItemView>,
    /// Every item, in collection order
    pub all: Vec<TodoItemView>,
}

impl TodoListView {
    /// Builds the view for the current state
    #[must_use]
    pub fn from_state(state: &TodoState) -> Self {
        Self {
            featured: state.featured_item().map(TodoItemView::new),
            all: state.todos.iter().map(TodoItemView::new).collect(),
        }
    }

    /// Renders both sections as HTML
    #[must_use]
    pub fn render_html(&self) -> String {
        let mut html = String::from("<section>\n<h2>Featured Todo</h2>\n");
        if let Some(featured) = &self.featured {
            html.push_str(&featured.render_html());
            html.push('\n');
        }

        html.push_str("<h2>All Todos</h2>\n<ul>\n");
        for item in &self.all {
            // Writing to a String cannot fail.
            let _ = writeln!(
                html,
                r#"<li data-key="{}">{}</li>"#,
                escape_html(&item.key.to_string()),
                item.render_html()
            );
        }
        html.push_str("</ul>\n</section>\n");
        html
    }
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::featured::FeaturedSelector;
    use todo_view_testing::FixedRandom;

    #[test]
    fn item_view_mirrors_the_item() {
        let view = TodoItemView::new(&TodoItem::new(3, "milk").with_checked(true));

        assert_eq!(view.key, TodoId::from(3));
        assert_eq!(view.label, "milk");
        assert!(view.checked);
    }

    #[test]
    fn on_change_passes_the_id_through() {
        let view = TodoItemView::new(&TodoItem::new("abc", "x"));
        let mut seen = None;

        view.on_change(|id| seen = Some(id));

        assert_eq!(seen, Some(TodoId::from("abc")));
        assert_eq!(view.toggle_action(), TodoAction::Toggle { id: TodoId::from("abc") });
    }

    #[test]
    fn item_html_escapes_and_marks_checked() {
        let view = TodoItemView::new(&TodoItem::new(1, "<b>&</b>").with_checked(true));
        assert_eq!(
            view.render_html(),
            r#"<h4>&lt;b&gt;&amp;&lt;/b&gt; <input type="checkbox" checked></h4>"#
        );
    }

    #[test]
    fn empty_list_renders_both_sections() {
        let view = TodoListView::from_state(&TodoState::new());
        let html = view.render_html();

        assert!(view.featured.is_none());
        assert!(html.contains("Featured Todo"));
        assert!(html.contains("All Todos"));
        assert!(!html.contains("<li"));
    }

    #[test]
    fn list_renders_featured_and_every_row() {
        let mut state = TodoState::with_todos(vec![TodoItem::new(1, "a"), TodoItem::new(2, "b")]);
        let mut featured = FeaturedSelector::new();
        featured.start(&state.todos, &FixedRandom::new(1));
        state.featured = featured;

        let view = TodoListView::from_state(&state);
        let html = view.render_html();

        assert_eq!(view.featured.as_ref().map(|f| &f.label), Some(&"b".to_string()));
        assert_eq!(view.all.len(), 2);
        assert!(html.contains(r#"<li data-key="1">"#));
        assert!(html.contains(r#"<li data-key="2">"#));
        assert!(html.find("data-key=\"1\"") < html.find("data-key=\"2\""));
    }
}
