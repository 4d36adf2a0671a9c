//! Renders the projected variables as a single `:root { … }` text block,
//! for injection as an inline stylesheet where variable assignment on the
//! document element is not enough (plain CSS selector reuse).

use super::StyleVar;

pub fn render_stylesheet(vars: &[StyleVar]) -> String {
  let mut css = String::with_capacity(vars.len() * 32 + 16);
  css.push_str(":root {\n");
  for (name, value) in vars {
    css.push_str("  ");
    css.push_str(name);
    css.push_str(": ");
    css.push_str(value);
    css.push_str(";\n");
  }
  css.push_str("}\n");
  css
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::site::config::SiteConfig;
  use crate::theme::project;

  #[test]
  fn renders_root_block() {
    let css = render_stylesheet(&project(&SiteConfig::default()));
    assert!(css.starts_with(":root {\n"));
    assert!(css.trim_end().ends_with('}'));
    assert!(css.contains("  --brand-primary: #2563EB;\n"));
    assert!(css.contains("  --brand-primary-rgb: 37, 99, 235;\n"));
  }

  #[test]
  fn one_line_per_variable() {
    let vars = project(&SiteConfig::default());
    let css = render_stylesheet(&vars);
    let body_lines = css.lines().count() - 2;
    assert_eq!(body_lines, vars.len());
  }
}
