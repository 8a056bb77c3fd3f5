use std::path::{Path, PathBuf};

/// The error pages this server knows how to render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    NotFound,
    BadGateway,
    ServiceUnavailable,
}

impl ErrorCode {
    pub fn parse(code: &str) -> Option<Self> {
        match code {
            "404" => Some(Self::NotFound),
            "502" => Some(Self::BadGateway),
            "503" => Some(Self::ServiceUnavailable),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::NotFound => "404",
            Self::BadGateway => "502",
            Self::ServiceUnavailable => "503",
        }
    }

    /// Available styles. The first one is the default.
    pub fn styles(self) -> &'static [&'static str] {
        match self {
            Self::NotFound => &["dark", "minimal", "creative"],
            Self::BadGateway => &["warm", "minimal", "tech"],
            Self::ServiceUnavailable => &["cool", "minimal", "modern"],
        }
    }

    /// Resolve a requested style, falling back to the default for unknown
    /// or missing names. Only names from [`ErrorCode::styles`] come back,
    /// so the result is always safe to join onto a path.
    pub fn style(self, requested: Option<&str>) -> &'static str {
        let styles = self.styles();
        requested
            .and_then(|r| styles.iter().find(|s| **s == r))
            .copied()
            .unwrap_or(styles[0])
    }

    /// `<pages>/<code>/<style>.html`
    pub fn styled_page(self, pages_dir: &Path, requested: Option<&str>) -> PathBuf {
        pages_dir
            .join(self.as_str())
            .join(format!("{}.html", self.style(requested)))
    }

    /// `<pages>/<code>.html`, the standalone page served by the HTML API.
    pub fn api_page(self, pages_dir: &Path) -> PathBuf {
        pages_dir.join(format!("{}.html", self.as_str()))
    }
}
