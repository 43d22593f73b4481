// DOM element ids
pub const CANVAS_ID: &str = "webgl";
pub const SETTINGS_PANEL_ID: &str = "settings";
pub const DOWNLOAD_BUTTON_ID: &str = "download-button";
pub const PROFILE_BUTTON_ID: &str = "profile-button";

/// Canvas attribute naming the OBJ companion asset; absent means the plain
/// three-section page.
pub const COMPANION_ATTR: &str = "data-companion-asset";

pub const DOWNLOAD_HREF: &str = "/static/resume.pdf";
pub const DOWNLOAD_FILENAME: &str = "resume.pdf";
pub const PROFILE_URL: &str = "https://github.com/rgilks";
