//! Profile image sources and file encoding.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;

/// Placeholder shown when the user has no image.
pub const DEFAULT_PROFILE_IMAGE: &str = "/assets/profile.png";

const DATA_URL_MARKER: &str = ";base64,";

/// Image `src` for a profile: selected file, then stored image, then placeholder.
#[must_use]
pub fn profile_image_src(temp_image: Option<&str>, stored: Option<&str>) -> String {
    if let Some(temp) = temp_image.filter(|value| !value.is_empty()) {
        return temp.to_string();
    }
    stored
        .filter(|name| !name.is_empty())
        .map_or_else(|| DEFAULT_PROFILE_IMAGE.to_string(), |name| format!("/images/{name}"))
}

/// Encode a selected file as a `data:` URL.
#[must_use]
pub fn encode_data_url(mime: &str, bytes: &[u8]) -> String {
    let mime = if mime.is_empty() {
        "application/octet-stream"
    } else {
        mime
    };
    format!("data:{mime}{DATA_URL_MARKER}{}", STANDARD.encode(bytes))
}

/// Base64 part of a `data:` URL, as the update endpoint expects it.
#[must_use]
pub fn data_url_payload(data_url: &str) -> Option<&str> {
    data_url
        .split_once(DATA_URL_MARKER)
        .map(|(_, payload)| payload)
        .filter(|payload| !payload.is_empty())
}
