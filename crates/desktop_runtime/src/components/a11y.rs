//! Internal DOM focus, focus-trap and menu-keyboard helpers for desktop shell widgets.

use wasm_bindgen::JsCast;

use crate::{dialog::focus_trap_target, menus::roving_index};

const FOCUSABLE_SELECTOR: &str = concat!(
    "button:not([disabled]), [href], input:not([disabled]), select:not([disabled]), ",
    "textarea:not([disabled]), [tabindex]:not([tabindex=\"-1\"])"
);

fn document() -> Option<web_sys::Document> {
    web_sys::window().and_then(|window| window.document())
}

/// Returns the current active element as an [`web_sys::HtmlElement`] when possible.
pub(crate) fn active_html_element() -> Option<web_sys::HtmlElement> {
    document()
        .and_then(|document| document.active_element())
        .and_then(|element| element.dyn_into::<web_sys::HtmlElement>().ok())
}

/// Focuses an HTML element, ignoring browser focus errors.
pub(crate) fn focus_html_element(element: &web_sys::HtmlElement) {
    let _ = element.focus();
}

/// Focuses an element by ID and reports whether a focusable HTML element was found.
pub(crate) fn focus_element_by_id(id: &str) -> bool {
    let Some(element) = document().and_then(|document| document.get_element_by_id(id)) else {
        return false;
    };
    let Ok(element) = element.dyn_into::<web_sys::HtmlElement>() else {
        return false;
    };
    focus_html_element(&element);
    true
}

fn collect_html_elements(nodes: web_sys::NodeList, skip_disabled: bool) -> Vec<web_sys::HtmlElement> {
    let mut items = Vec::new();
    for index in 0..nodes.length() {
        let Some(node) = nodes.item(index) else {
            continue;
        };
        let Ok(item) = node.dyn_into::<web_sys::HtmlElement>() else {
            continue;
        };
        if skip_disabled
            && (item.get_attribute("disabled").is_some()
                || item.get_attribute("aria-disabled").as_deref() == Some("true"))
        {
            continue;
        }
        items.push(item);
    }
    items
}

/// Focusable descendants of `container` in DOM order.
pub(crate) fn focusable_elements(container: &web_sys::Element) -> Vec<web_sys::HtmlElement> {
    container
        .query_selector_all(FOCUSABLE_SELECTOR)
        .map(|nodes| collect_html_elements(nodes, false))
        .unwrap_or_default()
}

/// Focuses the first focusable element of `container`. Returns `false` when there is none.
pub(crate) fn focus_first_within(container: &web_sys::Element) -> bool {
    match focusable_elements(container).first() {
        Some(first) => {
            focus_html_element(first);
            true
        }
        None => false,
    }
}

/// Moves focus into the window whose frame has DOM id `dom_id`.
pub(crate) fn focus_window_content(dom_id: &str) -> bool {
    document()
        .and_then(|document| document.get_element_by_id(dom_id))
        .is_some_and(|frame| focus_first_within(&frame))
}

/// Keeps Tab and Shift+Tab inside `container`. Returns `true` when focus was moved.
pub(crate) fn handle_focus_trap_keydown(
    ev: &web_sys::KeyboardEvent,
    container: &web_sys::Element,
) -> bool {
    if ev.key() != "Tab" {
        return false;
    }
    let items = focusable_elements(container);
    let active = active_html_element();
    let current = active
        .as_ref()
        .and_then(|active| items.iter().position(|item| item == active));

    match focus_trap_target(current, items.len(), ev.shift_key()) {
        Some(target) => {
            ev.prevent_default();
            focus_html_element(&items[target]);
            true
        }
        None if items.is_empty() => {
            ev.prevent_default();
            true
        }
        None => false,
    }
}

fn menu_focusable_items(menu_id: &str) -> Vec<web_sys::HtmlElement> {
    let Some(menu) = document().and_then(|document| document.get_element_by_id(menu_id)) else {
        return Vec::new();
    };
    menu.query_selector_all(
        r#"[role="menuitem"], [role="menuitemcheckbox"], [role="menuitemradio"]"#,
    )
    .map(|nodes| collect_html_elements(nodes, true))
    .unwrap_or_default()
}

/// Focuses the first enabled menu item inside a menu container.
pub(crate) fn focus_first_menu_item(menu_id: &str) -> bool {
    let items = menu_focusable_items(menu_id);
    if let Some(first) = items.first() {
        focus_html_element(first);
        true
    } else {
        false
    }
}

/// Handles arrow/home/end menu navigation and prevents default when handled.
pub(crate) fn handle_menu_roving_keydown(ev: &web_sys::KeyboardEvent, menu_id: &str) -> bool {
    let items = menu_focusable_items(menu_id);
    let active_id = active_html_element().map(|el| el.id()).unwrap_or_default();
    let current = items
        .iter()
        .position(|item| !active_id.is_empty() && item.id() == active_id);

    let Some(next) = roving_index(current, items.len(), ev.key().as_str()) else {
        return false;
    };
    focus_html_element(&items[next]);
    ev.prevent_default();
    ev.stop_propagation();
    true
}
