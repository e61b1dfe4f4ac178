//! Share link construction.

const WHATSAPP_SHARE_BASE: &str = "https://wa.me/?text=";

/// Builds a `wa.me` deep link carrying `text` as the message body.
///
/// The text is component-encoded, so newlines and `&` survive intact.
pub fn whatsapp_share_url(text: &str) -> String {
    format!("{WHATSAPP_SHARE_BASE}{}", urlencoding::encode(text))
}
