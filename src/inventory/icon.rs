use base64::{engine::general_purpose::STANDARD, Engine as _};
use image::ImageFormat;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Strings at or below this length are always glyphs.
pub const ENCODED_ICON_MIN_LEN: usize = 100;

/// Shown when the platform reports no icon at all.
pub const PLACEHOLDER_GLYPH: &str = "📱";

const URI_MARKER: &str = "://";
const DATA_URL_PREFIX: &str = "data:";

/// What the presentation layer renders for an app icon: a text glyph or an
/// encoded raster image. Classified once at the bridge boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum IconSource {
    Glyph { value: String },
    Image { data: String },
}

#[derive(Debug, Error)]
pub enum IconError {
    #[error("icon is a glyph, not an encoded image")]
    NotAnImage,
    #[error("icon payload is not valid base64: {0}")]
    InvalidBase64(#[from] base64::DecodeError),
    #[error("icon payload is not a recognised raster format: {0}")]
    UnknownFormat(#[from] image::ImageError),
}

/// True when `raw` should be rendered as an image rather than as text.
///
/// The platform field is overloaded: it carries either a short symbolic
/// placeholder or a large base64 payload. Anything longer than
/// [`ENCODED_ICON_MIN_LEN`] characters that does not look like a URI is
/// treated as an encoded image.
pub fn is_encoded_icon(raw: &str) -> bool {
    raw.chars().count() > ENCODED_ICON_MIN_LEN && !raw.contains(URI_MARKER)
}

impl IconSource {
    /// The length heuristic sees the raw field; surrounding whitespace is
    /// only stripped from the stored value.
    pub fn classify(raw: Option<&str>) -> Self {
        let Some(raw) = raw.filter(|value| !value.trim().is_empty()) else {
            return Self::placeholder();
        };
        if is_encoded_icon(raw) {
            Self::Image {
                data: raw.trim().to_string(),
            }
        } else {
            Self::Glyph {
                value: raw.trim().to_string(),
            }
        }
    }

    pub fn placeholder() -> Self {
        Self::Glyph {
            value: PLACEHOLDER_GLYPH.to_string(),
        }
    }

    pub fn is_image(&self) -> bool {
        matches!(self, Self::Image { .. })
    }

    pub fn decode(&self) -> Result<DecodedIcon, IconError> {
        match self {
            Self::Glyph { .. } => Err(IconError::NotAnImage),
            Self::Image { data } => DecodedIcon::from_base64(data),
        }
    }
}

#[derive(Debug, Clone)]
pub struct DecodedIcon {
    pub bytes: Vec<u8>,
    pub format: ImageFormat,
}

impl DecodedIcon {
    /// Accepts bare base64 (line-wrapped or not) and `data:` URLs.
    pub fn from_base64(payload: &str) -> Result<Self, IconError> {
        let body = strip_data_url(payload);
        // Android's default encoder wraps lines every 76 characters.
        let compact: String = body.chars().filter(|c| !c.is_ascii_whitespace()).collect();
        let bytes = STANDARD.decode(compact.as_bytes())?;
        let format = image::guess_format(&bytes)?;
        Ok(Self { bytes, format })
    }

    pub fn mime_type(&self) -> &'static str {
        self.format.to_mime_type()
    }

    pub fn to_data_url(&self) -> String {
        format!(
            "data:{};base64,{}",
            self.mime_type(),
            STANDARD.encode(&self.bytes)
        )
    }
}

fn strip_data_url(payload: &str) -> &str {
    if !payload.starts_with(DATA_URL_PREFIX) {
        return payload;
    }
    payload
        .split_once(',')
        .map(|(_, body)| body)
        .unwrap_or(payload)
}
