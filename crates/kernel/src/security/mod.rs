//! Sanitization boundary shared by every menu strategy.
//!
//! Strategies never interpolate host strings directly into markup. URLs go
//! through [`sanitize_url`], class lists through [`sanitize_css_classes`],
//! text through [`esc_html`]/[`esc_attr`], and rich fragments through
//! [`sanitize_html_content`]. Failures degrade to safe defaults instead of
//! erroring.

mod css;
mod html;
mod url;

pub use css::{DEFAULT_MAX_CLASS_LENGTH, sanitize_css_class, sanitize_css_classes, sanitize_html_class};
pub use html::{decode_entities, esc_attr, esc_html, sanitize_html_content, strip_tags};
pub use self::url::{
    DEFAULT_MAX_URL_LENGTH, DEFAULT_PROTOCOLS, PLACEHOLDER_URL, UrlPolicy, UrlSanitizer,
    sanitize_url,
};
