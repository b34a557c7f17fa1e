// DOM drawing for the board. Every function tolerates missing elements so a
// trimmed-down page still plays.
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement};

use crate::grid::{Cell, Grid};

/// Pixel width of one grid column.
const CELL_PX: u32 = 40;

fn html_by_id(doc: &Document, id: &str) -> Option<HtmlElement> {
    doc.get_element_by_id(id)?.dyn_into().ok()
}

pub fn show(doc: &Document, id: &str, visible: bool) {
    let display = match (id, visible) {
        (_, false) => "none",
        ("levelCompletionOverlay", true) => "flex",
        _ => "block",
    };
    if let Some(el) = html_by_id(doc, id) {
        el.style().set_property("display", display).ok();
        el.style().set_property("opacity", if visible { "1" } else { "0" }).ok();
    }
}

pub fn set_text(doc: &Document, id: &str, text: &str) {
    if let Some(el) = doc.get_element_by_id(id) {
        el.set_text_content(Some(text));
    }
}

/// Swaps the `level-N` class on the game container (1-based).
pub fn set_background(doc: &Document, level_index: usize) {
    if let Some(el) = doc.get_element_by_id("gameContainer") {
        el.set_class_name(&format!("level-{}", level_index + 1));
    }
}

/// Replaces the grid contents with one `.grid-cell` div per letter.
pub fn grid(doc: &Document, grid: &Grid) {
    let Some(container) = html_by_id(doc, "grid") else {
        return;
    };
    container.set_inner_html("");
    container
        .style()
        .set_property("grid-template-columns", &format!("repeat({}, {}px)", grid.size(), CELL_PX))
        .ok();
    for (row, letters) in grid.rows().enumerate() {
        for (col, &letter) in letters.iter().enumerate() {
            let Ok(div) = doc.create_element("div") else {
                continue;
            };
            div.set_class_name("grid-cell");
            let letter = (letter as char).to_string();
            div.set_text_content(Some(&letter));
            div.set_attribute("data-row", &row.to_string()).ok();
            div.set_attribute("data-col", &col.to_string()).ok();
            div.set_attribute("data-letter", &letter).ok();
            container.append_child(&div).ok();
        }
    }
}

pub fn word_list(doc: &Document, words: &[String]) {
    let Some(list) = doc.get_element_by_id("words") else {
        return;
    };
    list.set_inner_html("");
    for word in words {
        if let Ok(li) = doc.create_element("li") {
            li.set_text_content(Some(word));
            li.set_attribute("data-word", word).ok();
            list.append_child(&li).ok();
        }
    }
}

pub fn strike_word(doc: &Document, word: &str) {
    let selector = format!("li[data-word=\"{word}\"]");
    if let Ok(Some(li)) = doc.query_selector(&selector) {
        li.class_list().add_1("found").ok();
    }
}

pub fn mark_cells(doc: &Document, cells: &[Cell], class: &str, on: bool) {
    for cell in cells {
        let selector = format!(".grid-cell[data-row=\"{}\"][data-col=\"{}\"]", cell.row, cell.col);
        let Ok(Some(el)) = doc.query_selector(&selector) else {
            continue;
        };
        let classes = el.class_list();
        if on {
            classes.add_1(class).ok();
        } else {
            classes.remove_1(class).ok();
        }
    }
}

/// Drops the highlight from every cell that is not part of a found word.
pub fn clear_selection(doc: &Document) {
    let Ok(stale) = doc.query_selector_all(".grid-cell.selected:not(.correct)") else {
        return;
    };
    for i in 0..stale.length() {
        if let Some(el) = stale.get(i).and_then(|n| n.dyn_into::<Element>().ok()) {
            el.class_list().remove_1("selected").ok();
        }
    }
}

/// Fills in and reveals the level-complete overlay. `progress` is 0..=1.
pub fn level_overlay(doc: &Document, title: &str, subtitle: &str, progress: f64, is_final: bool) {
    set_text(doc, "overlayTitle", title);
    set_text(doc, "overlaySubtitle", subtitle);
    if let Some(bar) = html_by_id(doc, "progressBar") {
        bar.style()
            .set_property("width", &format!("{}%", (progress * 100.0).round()))
            .ok();
    }
    let button = |id: &str, visible: bool| {
        if let Some(el) = html_by_id(doc, id) {
            el.style()
                .set_property("display", if visible { "inline-block" } else { "none" })
                .ok();
        }
    };
    button("completeGameBtn", is_final);
    button("nextLevelBtn", !is_final);
    show(doc, "levelCompletionOverlay", true);
}
