use serde::{Deserialize, Serialize};

/// Footer content, managed independently of the main site configuration
/// and merged over these defaults on fetch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FooterContent {
  #[serde(default = "default_about_heading")]
  pub about_heading: String,
  #[serde(default = "default_about_text")]
  pub about_text: String,
  #[serde(default = "default_columns")]
  pub columns: Vec<FooterColumn>,
  #[serde(default = "default_newsletter_blurb")]
  pub newsletter_blurb: String,
  #[serde(default = "default_copyright")]
  pub copyright: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FooterColumn {
  #[serde(default)]
  pub heading: String,
  #[serde(default)]
  pub links: Vec<FooterLink>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FooterLink {
  #[serde(default)]
  pub label: String,
  #[serde(default)]
  pub href: String,
}

fn default_about_heading() -> String {
  "About us".into()
}
fn default_about_text() -> String {
  "A small shop for everyday goods.".into()
}
fn default_newsletter_blurb() -> String {
  "Sign up for news and occasional offers.".into()
}
fn default_copyright() -> String {
  "© Wicker. All rights reserved.".into()
}

fn default_columns() -> Vec<FooterColumn> {
  vec![
    FooterColumn {
      heading: "Shop".into(),
      links: vec![
        FooterLink {
          label: "All products".into(),
          href: "/products".into(),
        },
        FooterLink {
          label: "Cart".into(),
          href: "/cart".into(),
        },
      ],
    },
    FooterColumn {
      heading: "Account".into(),
      links: vec![
        FooterLink {
          label: "Sign in".into(),
          href: "/login".into(),
        },
        FooterLink {
          label: "Orders".into(),
          href: "/orders".into(),
        },
      ],
    },
  ]
}

impl Default for FooterContent {
  fn default() -> Self {
    Self {
      about_heading: default_about_heading(),
      about_text: default_about_text(),
      columns: default_columns(),
      newsletter_blurb: default_newsletter_blurb(),
      copyright: default_copyright(),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn empty_document_yields_defaults() {
    let footer: FooterContent = serde_json::from_str("{}").unwrap();
    assert_eq!(footer, FooterContent::default());
    assert_eq!(footer.columns.len(), 2);
  }

  #[test]
  fn stored_columns_replace_defaults_wholesale() {
    let footer: FooterContent = serde_json::from_str(
      r#"{"columns":[{"heading":"Help","links":[{"label":"FAQ","href":"/faq"}]}]}"#,
    )
    .unwrap();
    assert_eq!(footer.columns.len(), 1);
    assert_eq!(footer.columns[0].heading, "Help");
    assert_eq!(footer.copyright, default_copyright());
  }
}
