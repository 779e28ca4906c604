#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MediaKind {
    Picture,
    Video,
}

impl MediaKind {
    /// Map a catalog format code to a media kind. The code list is closed;
    /// anything outside it is a data error the caller must surface with
    /// album/image context.
    pub fn from_format(format: &str) -> Option<Self> {
        match format {
            "JPG" | "PNG" | "GIF" => Some(MediaKind::Picture),
            "MP4" | "AVI" => Some(MediaKind::Video),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_picture_formats() {
        assert_eq!(MediaKind::from_format("JPG"), Some(MediaKind::Picture));
        assert_eq!(MediaKind::from_format("PNG"), Some(MediaKind::Picture));
        assert_eq!(MediaKind::from_format("GIF"), Some(MediaKind::Picture));
    }

    #[test]
    fn test_video_formats() {
        assert_eq!(MediaKind::from_format("MP4"), Some(MediaKind::Video));
        assert_eq!(MediaKind::from_format("AVI"), Some(MediaKind::Video));
    }

    #[test]
    fn test_unknown_format_rejected() {
        assert_eq!(MediaKind::from_format("TIFF"), None);
        assert_eq!(MediaKind::from_format("jpg"), None); // codes are uppercase
        assert_eq!(MediaKind::from_format(""), None);
    }
}
