//! Applies the theme projection to the live document: every variable is
//! assigned on the root element's inline style, and the same projection is
//! mirrored into one injected `<style>` block for plain-CSS consumers.
//! Full re-application on every configuration change, no diffing.

#[cfg(feature = "csr")]
use wasm_bindgen::JsCast;

use crate::site::SiteConfig;
use crate::theme::{project, render_stylesheet};

pub const THEME_STYLE_ID: &str = "wicker-theme";

#[cfg(feature = "csr")]
pub fn apply_theme(config: &SiteConfig) {
  let vars = project(config);

  let Some(window) = web_sys::window() else {
    return;
  };
  let Some(document) = window.document() else {
    return;
  };

  if let Some(root) = document.document_element() {
    if let Ok(html) = root.dyn_into::<web_sys::HtmlElement>() {
      let style = html.style();
      for (name, value) in &vars {
        let _ = style.set_property(name, value);
      }
    }
  }

  inject_stylesheet(&document, &render_stylesheet(&vars));
}

#[cfg(feature = "csr")]
fn inject_stylesheet(document: &web_sys::Document, css: &str) {
  if let Some(existing) = document.get_element_by_id(THEME_STYLE_ID) {
    existing.set_text_content(Some(css));
    return;
  }
  let Ok(element) = document.create_element("style") else {
    return;
  };
  element.set_id(THEME_STYLE_ID);
  element.set_text_content(Some(css));
  if let Some(head) = document.head() {
    let _ = head.append_child(&element);
  }
}
